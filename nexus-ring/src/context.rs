//! K-way merge over a set of sorted queues.
//!
//! A [`MergeContext`] borrows queues from the caller and remembers a size for
//! each. It never creates or frees queues; it only moves elements between
//! them.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{MergeContext, NodePool, Queue};
//!
//! let mut pool = NodePool::new();
//! let queues: Vec<Queue> = (0..3).map(|_| Queue::new(&mut pool).unwrap()).collect();
//! for (queue, values) in queues.iter().zip([["1", "4"], ["2", "5"], ["3", "6"]]) {
//!     for v in values {
//!         queue.insert_tail(&mut pool, v).unwrap();
//!     }
//! }
//!
//! let mut ctx = MergeContext::new();
//! for queue in &queues {
//!     ctx.push(queue, &pool);
//! }
//!
//! assert_eq!(ctx.merge_queues(&mut pool, false), 6);
//! assert_eq!(
//!     queues[0].values(&pool).collect::<Vec<_>>(),
//!     ["1", "2", "3", "4", "5", "6"]
//! );
//! assert_eq!(ctx.sizes().collect::<Vec<_>>(), [6, 0, 0]);
//! ```

use tracing::debug;

use crate::order::merge_rings;
use crate::{NodePool, Queue};

/// A queue taking part in a merge, with its cached size.
#[derive(Debug, Clone, Copy)]
struct Descriptor<'a> {
    queue: &'a Queue,
    size: usize,
}

/// An ordered set of borrowed queues to be fused by [`merge_queues`].
///
/// [`merge_queues`]: MergeContext::merge_queues
#[derive(Debug, Default)]
pub struct MergeContext<'a> {
    chain: Vec<Descriptor<'a>>,
}

impl<'a> MergeContext<'a> {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context with room for `capacity` queues.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chain: Vec::with_capacity(capacity),
        }
    }

    /// Appends a queue, caching its current size.
    pub fn push(&mut self, queue: &'a Queue, pool: &NodePool) {
        self.chain.push(Descriptor {
            queue,
            size: queue.size(pool),
        });
    }

    /// Returns the number of queues in the context.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if the context holds no queues.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Returns the queue that receives the merged result.
    #[inline]
    pub fn first(&self) -> Option<&'a Queue> {
        self.chain.first().map(|d| d.queue)
    }

    /// Returns the cached sizes in context order.
    ///
    /// These are refreshed by [`merge_queues`](Self::merge_queues) and are
    /// otherwise only as current as the last [`push`](Self::push).
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.chain.iter().map(|d| d.size)
    }

    /// Fuses every queue into the first one.
    ///
    /// Each member must be sorted ascending. The others are merged into the
    /// first one by one, each left empty with a cached size of zero. If
    /// `descending` is set the fused queue is reversed at the end.
    ///
    /// Returns the number of elements in the result, or 0 for an empty
    /// context.
    pub fn merge_queues(&mut self, pool: &mut NodePool, descending: bool) -> usize {
        let Some((first, rest)) = self.chain.split_first_mut() else {
            return 0;
        };
        let Some(dest) = first.queue.sentinel(pool) else {
            first.size = 0;
            return 0;
        };
        debug!(queues = rest.len() + 1, descending, "merging queues");

        for member in rest {
            let Some(src) = member.queue.sentinel(pool) else {
                continue;
            };
            if src == dest {
                continue;
            }
            merge_rings(pool, dest, src, false);
            member.size = 0;
        }

        if descending {
            pool.reverse_ring(dest);
        }

        first.size = first.queue.size(pool);
        first.size
    }
}
