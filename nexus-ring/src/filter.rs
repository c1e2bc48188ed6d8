//! Content filters: duplicate removal and monotonic pruning.
//!
//! Each filter walks the queue once and releases elements as it goes, using
//! a walk that tolerates removal of the element it just yielded.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::ring::SafeWalk;
use crate::{NodePool, Queue};

impl Queue {
    /// Removes every element whose value occurs more than once.
    ///
    /// Values are compared by content. All copies of a repeated value go, not
    /// just the extras, and order need not be sorted:
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// for v in ["a", "b", "a", "c"] {
    ///     queue.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// assert!(queue.remove_duplicates(&mut pool));
    /// assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["b", "c"]);
    /// ```
    ///
    /// Returns `false` only if the handle is invalid.
    pub fn remove_duplicates(&self, pool: &mut NodePool) -> bool {
        let Some(head) = self.sentinel(pool) else {
            return false;
        };

        let repeated: HashSet<String> = {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for value in self.values(pool) {
                *seen.entry(value).or_default() += 1;
            }
            seen.into_iter()
                .filter(|&(_, count)| count > 1)
                .map(|(value, _)| value.to_owned())
                .collect()
        };
        if repeated.is_empty() {
            return true;
        }
        debug!(distinct = repeated.len(), "removing repeated values");

        let mut walk = SafeWalk::new(pool, head);
        while let Some(key) = walk.advance(pool) {
            if repeated.contains(pool.value(key)) {
                pool.release(key);
            }
        }
        true
    }

    /// Removes every element that has a strictly smaller value somewhere to
    /// its right.
    ///
    /// What remains is non-decreasing. Returns the remaining size, or 0 if the
    /// handle is invalid.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// for v in ["5", "3", "8", "2"] {
    ///     queue.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// assert_eq!(queue.ascend(&mut pool), 1);
    /// assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["2"]);
    /// ```
    pub fn ascend(&self, pool: &mut NodePool) -> usize {
        self.prune(pool, |left, right| left > right)
    }

    /// Removes every element that has a strictly greater value somewhere to
    /// its right.
    ///
    /// What remains is non-increasing. Returns the remaining size, or 0 if the
    /// handle is invalid.
    pub fn descend(&self, pool: &mut NodePool) -> usize {
        self.prune(pool, |left, right| left < right)
    }

    /// Single left-to-right pass: each element evicts the run of surviving
    /// predecessors it `beats`. The survivors form a monotonic stack, so the
    /// pass is linear.
    fn prune(&self, pool: &mut NodePool, beats: impl Fn(&str, &str) -> bool) -> usize {
        let Some(head) = self.sentinel(pool) else {
            return 0;
        };

        let mut removed = 0usize;
        let mut walk = SafeWalk::new(pool, head);
        while let Some(key) = walk.advance(pool) {
            loop {
                let prev = pool.prev(key);
                if prev == head || !beats(pool.value(prev), pool.value(key)) {
                    break;
                }
                pool.release(prev);
                removed += 1;
            }
        }

        debug!(removed, "pruned queue to monotonic run");
        self.size(pool)
    }
}
