//! Circular doubly-linked ring primitives.
//!
//! Every ring has a sentinel node that carries no value. A ring is empty iff
//! the sentinel is its own successor. All multi-step relinking lives here:
//! each primitive captures the neighbours it needs before mutating anything,
//! so callers never rewire `prev`/`next` by hand.
//!
//! ```text
//!        ┌──────────────────────────────────────┐
//!        ▼                                      │
//!   [sentinel] ⇄ [a] ⇄ [b] ⇄ [c] ─────────────────┘
//! ```

use crate::NodePool;

impl NodePool {
    /// Returns the successor of `key`.
    #[inline]
    pub(crate) fn next(&self, key: usize) -> usize {
        self.node(key).next
    }

    /// Returns the predecessor of `key`.
    #[inline]
    pub(crate) fn prev(&self, key: usize) -> usize {
        self.node(key).prev
    }

    /// Makes `key` a self-looped, empty ring.
    #[inline]
    pub(crate) fn init_empty(&mut self, key: usize) {
        let node = self.node_mut(key);
        node.prev = key;
        node.next = key;
    }

    #[inline]
    pub(crate) fn is_ring_empty(&self, sentinel: usize) -> bool {
        self.next(sentinel) == sentinel
    }

    /// Returns `true` if the ring holds exactly one node.
    #[inline]
    pub(crate) fn is_singular(&self, sentinel: usize) -> bool {
        let next = self.next(sentinel);
        next != sentinel && next == self.prev(sentinel)
    }

    #[inline]
    fn link_between(&mut self, key: usize, prev: usize, next: usize) {
        self.node_mut(next).prev = key;
        let node = self.node_mut(key);
        node.next = next;
        node.prev = prev;
        self.node_mut(prev).next = key;
    }

    /// Links `key` immediately after `at`.
    #[inline]
    pub(crate) fn link_after(&mut self, key: usize, at: usize) {
        let next = self.next(at);
        self.link_between(key, at, next);
    }

    /// Links `key` immediately before `at`.
    #[inline]
    pub(crate) fn link_before(&mut self, key: usize, at: usize) {
        let prev = self.prev(at);
        self.link_between(key, prev, at);
    }

    /// Removes `key` from its ring and leaves it self-looped.
    #[inline]
    pub(crate) fn unlink(&mut self, key: usize) {
        let Links { prev, next } = self.links(key);
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
        self.init_empty(key);
    }

    /// Unlinks `key` and relinks it immediately after `target`.
    #[inline]
    pub(crate) fn move_after(&mut self, key: usize, target: usize) {
        if key == target {
            return;
        }
        self.unlink(key);
        self.link_after(key, target);
    }

    /// Moves the run `(from, to]` out of its ring into the empty ring `dest`.
    ///
    /// `from` may be the source sentinel. If `from == to` the run is empty
    /// and nothing moves.
    pub(crate) fn cut_range(&mut self, dest: usize, from: usize, to: usize) {
        debug_assert!(self.is_ring_empty(dest), "cut destination must be empty");
        if from == to {
            return;
        }

        let first = self.next(from);
        let after = self.next(to);

        self.node_mut(from).next = after;
        self.node_mut(after).prev = from;

        self.node_mut(dest).next = first;
        self.node_mut(first).prev = dest;
        self.node_mut(dest).prev = to;
        self.node_mut(to).next = dest;
    }

    /// Moves every node of `src` to just after `at`, leaving `src` empty.
    pub(crate) fn splice_at(&mut self, src: usize, at: usize) {
        if self.is_ring_empty(src) {
            return;
        }

        let first = self.next(src);
        let last = self.prev(src);
        let after = self.next(at);

        self.node_mut(at).next = first;
        self.node_mut(first).prev = at;
        self.node_mut(last).next = after;
        self.node_mut(after).prev = last;

        self.init_empty(src);
    }

    /// Moves every node of `src` to the tail of `dest`, leaving `src` empty.
    #[inline]
    pub(crate) fn splice_tail(&mut self, src: usize, dest: usize) {
        let at = self.prev(dest);
        self.splice_at(src, at);
    }

    /// Reverses the ring headed by `sentinel` in place.
    ///
    /// Each node is moved to the front in visit order, so identities are
    /// preserved and only links change.
    pub(crate) fn reverse_ring(&mut self, sentinel: usize) {
        let mut walk = SafeWalk::new(self, sentinel);
        while let Some(key) = walk.advance(self) {
            self.move_after(key, sentinel);
        }
    }

    /// Unlinks an element node and drops it along with its value.
    #[inline]
    pub(crate) fn release(&mut self, key: usize) {
        self.unlink(key);
        self.remove(key);
    }

    #[inline]
    fn links(&self, key: usize) -> Links {
        let node = self.node(key);
        Links {
            prev: node.prev,
            next: node.next,
        }
    }
}

/// Snapshot of a node's neighbours.
#[derive(Clone, Copy)]
struct Links {
    prev: usize,
    next: usize,
}

/// Walks a ring front to back, tolerating removal of the yielded node.
///
/// The successor is captured before a key is handed out, so the caller may
/// unlink or release that key. Removing any *other* node that the walk has
/// not reached yet is not supported.
///
/// The walker does not borrow the pool, so the pool can be mutated between
/// steps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SafeWalk {
    sentinel: usize,
    upcoming: usize,
}

impl SafeWalk {
    #[inline]
    pub(crate) fn new(pool: &NodePool, sentinel: usize) -> Self {
        Self {
            sentinel,
            upcoming: pool.next(sentinel),
        }
    }

    /// Returns the next key, or `None` once the sentinel is reached.
    #[inline]
    pub(crate) fn advance(&mut self, pool: &NodePool) -> Option<usize> {
        if self.upcoming == self.sentinel {
            return None;
        }
        let key = self.upcoming;
        self.upcoming = pool.next(key);
        Some(key)
    }

    /// Returns the key the next call to `advance` will consider.
    ///
    /// This is the sentinel once the walk is exhausted.
    #[inline]
    pub(crate) const fn upcoming(&self) -> usize {
        self.upcoming
    }
}
