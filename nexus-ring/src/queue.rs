//! Queue handles: creation, insertion, removal, and counting.
//!
//! A [`Queue`] is a handle naming a sentinel node in a [`NodePool`]. The pool
//! holds the nodes; the handle says which ring they belong to. Every method
//! takes the pool explicitly, and a queue must always be used with the pool it
//! was created in.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{NodePool, Queue};
//!
//! let mut pool = NodePool::new();
//! let queue = Queue::new(&mut pool).unwrap();
//!
//! queue.insert_tail(&mut pool, "b").unwrap();
//! queue.insert_head(&mut pool, "a").unwrap();
//! queue.insert_tail(&mut pool, "c").unwrap();
//!
//! assert_eq!(queue.size(&pool), 3);
//! assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["a", "b", "c"]);
//!
//! let head = queue.remove_head(&mut pool, None).unwrap();
//! assert_eq!(head.value(), "a");
//!
//! queue.free(&mut pool);
//! assert!(pool.is_empty());
//! ```
//!
//! # Moving Between Queues
//!
//! Elements move between queues of the same pool by relinking only, so any
//! number of queues can share one pool:
//!
//! ```
//! use nexus_ring::{NodePool, Queue};
//!
//! let mut pool = NodePool::new();
//! let a = Queue::new(&mut pool).unwrap();
//! let b = Queue::new(&mut pool).unwrap();
//!
//! a.insert_tail(&mut pool, "apple").unwrap();
//! b.insert_tail(&mut pool, "banana").unwrap();
//!
//! a.merge_sorted(&b, &mut pool);
//! assert_eq!(a.values(&pool).collect::<Vec<_>>(), ["apple", "banana"]);
//! assert!(b.is_empty(&pool));
//! ```

use std::iter::FusedIterator;

use crate::{Element, Error, NodePool, Result};

/// A queue of string elements living in a [`NodePool`].
///
/// The handle is deliberately not `Copy`: [`free`](Queue::free) consumes it,
/// so a freed queue cannot be named again.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Queue {
    head: usize,
}

impl Queue {
    /// Creates an empty queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if the pool is bounded and has no free slot for
    /// the sentinel.
    pub fn new(pool: &mut NodePool) -> Result<Self> {
        let head = pool.try_insert(None)?;
        Ok(Self { head })
    }

    /// Releases every element and then the queue itself.
    ///
    /// Does nothing if the handle does not name a live queue in `pool`.
    pub fn free(self, pool: &mut NodePool) {
        let Some(head) = self.sentinel(pool) else {
            return;
        };

        let mut key = pool.next(head);
        while key != head {
            let next = pool.next(key);
            pool.remove(key);
            key = next;
        }
        pool.remove(head);
    }

    /// Returns the sentinel key if the handle names a live queue.
    #[inline]
    pub(crate) fn sentinel(&self, pool: &NodePool) -> Option<usize> {
        pool.is_sentinel(self.head).then_some(self.head)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts a copy of `value` at the front of the queue.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidQueue`] if the handle does not name a live queue
    /// - [`Error::Alloc`] if the value buffer could not be allocated
    /// - [`Error::Full`] if bounded storage has no free slot
    ///
    /// Nothing is retained from a failed call.
    pub fn insert_head(&self, pool: &mut NodePool, value: &str) -> Result<()> {
        let head = self.sentinel(pool).ok_or(Error::InvalidQueue)?;
        let key = pool.try_insert(Some(owned_value(value)?))?;
        pool.link_after(key, head);
        Ok(())
    }

    /// Inserts a copy of `value` at the back of the queue.
    ///
    /// # Errors
    ///
    /// Same as [`insert_head`](Queue::insert_head).
    pub fn insert_tail(&self, pool: &mut NodePool, value: &str) -> Result<()> {
        let head = self.sentinel(pool).ok_or(Error::InvalidQueue)?;
        let key = pool.try_insert(Some(owned_value(value)?))?;
        pool.link_before(key, head);
        Ok(())
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes the front element and hands it to the caller.
    ///
    /// If `buf` is given, the value is also copied into it as a NUL-terminated
    /// byte string (see [`Element::copy_to`]).
    ///
    /// Returns `None` if the queue is empty or the handle is invalid.
    pub fn remove_head(&self, pool: &mut NodePool, buf: Option<&mut [u8]>) -> Option<Element> {
        let head = self.sentinel(pool)?;
        let key = pool.next(head);
        take(pool, head, key, buf)
    }

    /// Removes the back element and hands it to the caller.
    ///
    /// Returns `None` if the queue is empty or the handle is invalid.
    pub fn remove_tail(&self, pool: &mut NodePool, buf: Option<&mut [u8]>) -> Option<Element> {
        let head = self.sentinel(pool)?;
        let key = pool.prev(head);
        take(pool, head, key, buf)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns the number of elements, counted by traversal.
    ///
    /// Returns 0 if the handle is invalid. This is O(n).
    pub fn size(&self, pool: &NodePool) -> usize {
        self.values(pool).count()
    }

    /// Returns `true` if the queue has no elements (or the handle is invalid).
    #[inline]
    pub fn is_empty(&self, pool: &NodePool) -> bool {
        self.sentinel(pool)
            .is_none_or(|head| pool.is_ring_empty(head))
    }

    /// Returns an iterator over the values, front to back.
    pub fn values<'a>(&self, pool: &'a NodePool) -> Values<'a> {
        let cursor = self.sentinel(pool).map_or(self.head, |head| pool.next(head));
        Values {
            pool,
            head: self.head,
            cursor,
        }
    }
}

/// Copies `value` into a buffer of exactly its length.
fn owned_value(value: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(value.len())?;
    owned.push_str(value);
    Ok(owned)
}

/// Unlinks `key` and turns it into an owned [`Element`].
fn take(pool: &mut NodePool, head: usize, key: usize, buf: Option<&mut [u8]>) -> Option<Element> {
    if key == head {
        return None;
    }
    pool.unlink(key);
    let element = Element::new(pool.remove(key)?.value?);
    if let Some(buf) = buf {
        element.copy_to(buf);
    }
    Some(element)
}

/// Iterator over the values of a queue.
///
/// Created by [`Queue::values`].
#[derive(Debug, Clone)]
pub struct Values<'a> {
    pool: &'a NodePool,
    head: usize,
    cursor: usize,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.head {
            return None;
        }
        let key = self.cursor;
        self.cursor = self.pool.next(key);
        Some(self.pool.value(key))
    }
}

impl FusedIterator for Values<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(pool: &mut NodePool, values: &[&str]) -> Queue {
        let queue = Queue::new(pool).unwrap();
        for v in values {
            queue.insert_tail(pool, v).unwrap();
        }
        queue
    }

    fn contents(queue: &Queue, pool: &NodePool) -> Vec<String> {
        queue.values(pool).map(str::to_owned).collect()
    }

    #[test]
    fn new_queue_is_empty() {
        let mut pool = NodePool::new();
        let queue = Queue::new(&mut pool).unwrap();

        assert!(queue.is_empty(&pool));
        assert_eq!(queue.size(&pool), 0);
        assert_eq!(pool.len(), 1);
        assert!(queue.values(&pool).next().is_none());
    }

    #[test]
    fn insert_head_multiple() {
        let mut pool = NodePool::new();
        let queue = Queue::new(&mut pool).unwrap();

        queue.insert_head(&mut pool, "1").unwrap();
        queue.insert_head(&mut pool, "2").unwrap();
        queue.insert_head(&mut pool, "3").unwrap();

        assert_eq!(contents(&queue, &pool), vec!["3", "2", "1"]);
    }

    #[test]
    fn insert_tail_multiple() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["1", "2", "3"]);

        assert_eq!(contents(&queue, &pool), vec!["1", "2", "3"]);
        assert_eq!(queue.size(&pool), 3);
    }

    #[test]
    fn insert_copies_exact_value() {
        let mut pool = NodePool::new();
        let queue = Queue::new(&mut pool).unwrap();
        let mut source = String::from("mutable");

        queue.insert_tail(&mut pool, &source).unwrap();
        source.push_str(" changed");

        let element = queue.remove_head(&mut pool, None).unwrap();
        assert_eq!(element.value(), "mutable");
        assert_eq!(element.into_value().capacity(), "mutable".len());
    }

    #[test]
    fn insert_empty_string() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &[""]);

        assert_eq!(queue.size(&pool), 1);
        assert_eq!(contents(&queue, &pool), vec![""]);
    }

    #[test]
    fn remove_head_and_tail() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["a", "b", "c"]);

        assert_eq!(queue.remove_head(&mut pool, None).unwrap().value(), "a");
        assert_eq!(queue.remove_tail(&mut pool, None).unwrap().value(), "c");
        assert_eq!(contents(&queue, &pool), vec!["b"]);

        assert_eq!(queue.remove_tail(&mut pool, None).unwrap().value(), "b");
        assert!(queue.remove_head(&mut pool, None).is_none());
        assert!(queue.remove_tail(&mut pool, None).is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn remove_copies_into_buffer() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["dolphin", "cat"]);

        let mut buf = [0xffu8; 5];
        let element = queue.remove_head(&mut pool, Some(&mut buf)).unwrap();
        assert_eq!(&buf, b"dolp\0");
        assert_eq!(element.value(), "dolphin");

        let mut buf = [0xffu8; 8];
        let element = queue.remove_tail(&mut pool, Some(&mut buf)).unwrap();
        assert_eq!(&buf[..4], b"cat\0");
        assert_eq!(element.value(), "cat");
    }

    #[test]
    fn remove_hands_over_ownership() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["x"]);
        assert_eq!(pool.len(), 2);

        let element = queue.remove_head(&mut pool, None).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(queue.is_empty(&pool));
        drop(element);
    }

    #[test]
    fn free_releases_everything() {
        let mut pool = NodePool::new();
        let a = filled(&mut pool, &["a", "b", "c"]);
        let b = filled(&mut pool, &["d"]);
        assert_eq!(pool.len(), 6);

        a.free(&mut pool);
        assert_eq!(pool.len(), 2);
        assert_eq!(contents(&b, &pool), vec!["d"]);

        b.free(&mut pool);
        assert!(pool.is_empty());
    }

    #[test]
    fn invalid_handle() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["a"]);
        let stale = Queue { head: queue.head };
        queue.free(&mut pool);

        assert_eq!(stale.insert_head(&mut pool, "x"), Err(Error::InvalidQueue));
        assert_eq!(stale.insert_tail(&mut pool, "x"), Err(Error::InvalidQueue));
        assert!(stale.remove_head(&mut pool, None).is_none());
        assert!(stale.remove_tail(&mut pool, None).is_none());
        assert_eq!(stale.size(&pool), 0);
        assert!(stale.is_empty(&pool));
        assert!(pool.is_empty());

        stale.free(&mut pool);
        assert!(pool.is_empty());
    }

    #[test]
    fn handle_to_element_is_invalid() {
        let mut pool = NodePool::new();
        let queue = filled(&mut pool, &["a"]);
        let element_key = pool.next(queue.head);
        let bogus = Queue { head: element_key };

        assert_eq!(bogus.insert_tail(&mut pool, "x"), Err(Error::InvalidQueue));
        assert_eq!(bogus.size(&pool), 0);
        assert_eq!(queue.size(&pool), 1);
    }

    #[test]
    fn full_pool_leaves_no_partial_state() {
        let mut pool = NodePool::bounded(3);
        let queue = filled(&mut pool, &["a", "b"]);

        assert_eq!(queue.insert_head(&mut pool, "c"), Err(Error::Full));
        assert_eq!(queue.insert_tail(&mut pool, "c"), Err(Error::Full));
        assert_eq!(pool.len(), 3);
        assert_eq!(contents(&queue, &pool), vec!["a", "b"]);

        queue.remove_head(&mut pool, None).unwrap();
        queue.insert_tail(&mut pool, "c").unwrap();
        assert_eq!(contents(&queue, &pool), vec!["b", "c"]);
    }

    #[test]
    fn new_fails_on_full_pool() {
        let mut pool = NodePool::bounded(1);
        let _queue = Queue::new(&mut pool).unwrap();
        assert_eq!(Queue::new(&mut pool), Err(Error::Full));
    }

    #[test]
    fn size_tracks_every_operation() {
        let mut pool = NodePool::new();
        let queue = Queue::new(&mut pool).unwrap();
        let mut expected = 0usize;

        for i in 0..20 {
            if i % 3 == 2 {
                queue.remove_tail(&mut pool, None).unwrap();
                expected -= 1;
            } else if i % 2 == 0 {
                queue.insert_head(&mut pool, &i.to_string()).unwrap();
                expected += 1;
            } else {
                queue.insert_tail(&mut pool, &i.to_string()).unwrap();
                expected += 1;
            }
            assert_eq!(queue.size(&pool), expected);
            assert_eq!(pool.len(), expected + 1);
        }
    }
}
