//! In-place structural transforms.
//!
//! These only relink nodes. No value is copied and no element is
//! reallocated, so keys stay valid across every transform except
//! [`delete_mid`](Queue::delete_mid), which releases one element.

use tracing::debug;

use crate::ring::SafeWalk;
use crate::{NodePool, Queue};

impl Queue {
    /// Deletes the middle element.
    ///
    /// Two pointers start at the first element and advance by one and two;
    /// when the fast one reaches the sentinel the slow one is the target.
    /// That is index `n / 2`, so for even lengths the second of the two
    /// middle elements goes.
    ///
    /// Returns `false` if the queue is empty or the handle is invalid.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// for v in ["a", "b", "c", "d"] {
    ///     queue.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// assert!(queue.delete_mid(&mut pool));
    /// assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["a", "b", "d"]);
    /// ```
    pub fn delete_mid(&self, pool: &mut NodePool) -> bool {
        let Some(head) = self.sentinel(pool) else {
            return false;
        };
        if pool.is_ring_empty(head) {
            return false;
        }

        let mut slow = pool.next(head);
        let mut fast = slow;
        while fast != head && pool.next(fast) != head {
            slow = pool.next(slow);
            fast = pool.next(pool.next(fast));
        }

        pool.release(slow);
        true
    }

    /// Swaps every two adjacent elements.
    ///
    /// Positions (0, 1), (2, 3), ... trade places. A trailing odd element
    /// stays put.
    pub fn swap_pairs(&self, pool: &mut NodePool) {
        let Some(head) = self.sentinel(pool) else {
            return;
        };

        let mut first = pool.next(head);
        while first != head {
            let second = pool.next(first);
            if second == head {
                break;
            }
            pool.move_after(first, second);
            first = pool.next(first);
        }
    }

    /// Reverses the queue in place.
    ///
    /// Elements keep their identity; only links change. Reversing twice
    /// restores the original order.
    pub fn reverse(&self, pool: &mut NodePool) {
        if let Some(head) = self.sentinel(pool) {
            pool.reverse_ring(head);
        }
    }

    /// Reverses each consecutive group of `k` elements.
    ///
    /// Groups are taken left to right in the original order. A trailing group
    /// shorter than `k` is left as is, and `k <= 1` does nothing.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// for v in ["1", "2", "3", "4", "5"] {
    ///     queue.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// queue.reverse_k_groups(&mut pool, 2);
    /// assert_eq!(
    ///     queue.values(&pool).collect::<Vec<_>>(),
    ///     ["2", "1", "4", "3", "5"]
    /// );
    /// ```
    pub fn reverse_k_groups(&self, pool: &mut NodePool, k: usize) {
        if k <= 1 {
            return;
        }
        let Some(head) = self.sentinel(pool) else {
            return;
        };
        debug!(k, "reversing queue in groups");

        let group = pool.insert_scratch();
        let mut begin = head;
        let mut count = 0;
        let mut walk = SafeWalk::new(pool, head);

        while let Some(key) = walk.advance(pool) {
            count += 1;
            if count < k {
                continue;
            }

            // Cut (begin, key] out, flip it, and put it back where it was.
            pool.cut_range(group, begin, key);
            pool.reverse_ring(group);
            pool.splice_at(group, begin);

            begin = pool.prev(walk.upcoming());
            count = 0;
        }

        pool.release_scratch(group);
    }
}
