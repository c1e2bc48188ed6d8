//! Ordering: stable two-way merge and top-down merge sort.
//!
//! Both work purely by relinking. The sort splits at the structural midpoint
//! found by a slow/fast walk, cuts the right half into a scratch ring, sorts
//! the halves recursively, and fuses them with the same merge that
//! [`Queue::merge_sorted`] uses.
//!
//! Values compare byte-wise (`str`'s `Ord`).

use tracing::debug;

use crate::{NodePool, Queue};

impl Queue {
    /// Merges the ascending queue `other` into this ascending queue.
    ///
    /// Afterwards `self` holds every element in ascending order and `other` is
    /// empty. The merge is stable: equal values keep their relative order and
    /// ties take from `self` first. Nothing is copied.
    ///
    /// If either queue is not sorted the result is not guaranteed sorted.
    /// Invalid handles, or `other` naming the same queue, do nothing.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let a = Queue::new(&mut pool).unwrap();
    /// let b = Queue::new(&mut pool).unwrap();
    /// for v in ["1", "3", "5"] {
    ///     a.insert_tail(&mut pool, v).unwrap();
    /// }
    /// for v in ["2", "4"] {
    ///     b.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// a.merge_sorted(&b, &mut pool);
    /// assert_eq!(a.values(&pool).collect::<Vec<_>>(), ["1", "2", "3", "4", "5"]);
    /// assert!(b.is_empty(&pool));
    /// ```
    pub fn merge_sorted(&self, other: &Queue, pool: &mut NodePool) {
        let (Some(head), Some(src)) = (self.sentinel(pool), other.sentinel(pool)) else {
            return;
        };
        if head == src {
            return;
        }
        merge_rings(pool, head, src, false);
    }

    /// Sorts the queue in place.
    ///
    /// Ascending when `descending` is `false`, descending otherwise. Both
    /// directions are stable. O(n log n) time, O(log n) recursion depth, and
    /// no per-element allocation.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// for v in ["pear", "apple", "fig"] {
    ///     queue.insert_tail(&mut pool, v).unwrap();
    /// }
    ///
    /// queue.sort(&mut pool, false);
    /// assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["apple", "fig", "pear"]);
    ///
    /// queue.sort(&mut pool, true);
    /// assert_eq!(queue.values(&pool).collect::<Vec<_>>(), ["pear", "fig", "apple"]);
    /// ```
    pub fn sort(&self, pool: &mut NodePool, descending: bool) {
        let Some(head) = self.sentinel(pool) else {
            return;
        };
        debug!(descending, "sorting queue");
        sort_ring(pool, head, descending);
    }
}

/// Returns `true` if `right` must be placed before `left`.
///
/// Strict, so equal values never jump ahead and the merge stays stable.
#[inline]
fn jumps_ahead(right: &str, left: &str, descending: bool) -> bool {
    if descending { right > left } else { right < left }
}

/// Fuses ring `src` into ring `dest`. Both must already be ordered in the
/// requested direction. `src` is left empty.
pub(crate) fn merge_rings(pool: &mut NodePool, dest: usize, src: usize, descending: bool) {
    let mut left = pool.next(dest);
    while left != dest && !pool.is_ring_empty(src) {
        let right = pool.next(src);
        if jumps_ahead(pool.value(right), pool.value(left), descending) {
            let at = pool.prev(left);
            pool.move_after(right, at);
        } else {
            left = pool.next(left);
        }
    }
    pool.splice_tail(src, dest);
}

fn sort_ring(pool: &mut NodePool, head: usize, descending: bool) {
    if pool.is_ring_empty(head) || pool.is_singular(head) {
        return;
    }

    // `last` ends on the final node of the left half, which keeps ceil(n / 2).
    let mut last = pool.next(head);
    let mut fast = pool.next(last);
    while fast != head && pool.next(fast) != head {
        last = pool.next(last);
        fast = pool.next(pool.next(fast));
    }

    let right = pool.insert_scratch();
    let tail = pool.prev(head);
    pool.cut_range(right, last, tail);

    sort_ring(pool, head, descending);
    sort_ring(pool, right, descending);
    merge_rings(pool, head, right, descending);

    pool.release_scratch(right);
}


#[cfg(test)]
mod bench_sort {
    use crate::{NodePool, Queue};
    use hdrhistogram::Histogram;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:8} cycles | p99: {:8} cycles | p999: {:8} cycles | min: {:8} | max: {:8}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const LEN: usize = 1_000;
    const ITERATIONS: usize = 1_000;

    #[test]
    #[ignore]
    fn bench_sort_random_1k() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut pool = NodePool::with_capacity(LEN + 8);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..ITERATIONS {
            let queue = Queue::new(&mut pool).unwrap();
            for _ in 0..LEN {
                let v: u32 = rng.r#gen();
                queue.insert_tail(&mut pool, &v.to_string()).unwrap();
            }

            let start = rdtscp();
            queue.sort(&mut pool, false);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();

            queue.free(&mut pool);
        }

        print_histogram("sort/random/1k", &hist);
    }

    #[test]
    #[ignore]
    fn bench_merge_sorted_1k() {
        let mut pool = NodePool::with_capacity(2 * LEN + 8);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..ITERATIONS {
            let a = Queue::new(&mut pool).unwrap();
            let b = Queue::new(&mut pool).unwrap();
            for i in 0..LEN {
                a.insert_tail(&mut pool, &format!("{:06}", 2 * i)).unwrap();
                b.insert_tail(&mut pool, &format!("{:06}", 2 * i + 1)).unwrap();
            }

            let start = rdtscp();
            a.merge_sorted(&b, &mut pool);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();

            a.free(&mut pool);
            b.free(&mut pool);
        }

        print_histogram("merge_sorted/1k+1k", &hist);
    }
}
