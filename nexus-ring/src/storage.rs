//! Slab-backed node storage shared by every queue in a pool.
//!
//! Nodes live in a [`slab::Slab`] and are addressed by stable `usize` keys.
//! A key remains valid until the node is released, so queues can relink
//! nodes between each other without moving or copying them.
//!
//! # Bounded vs Unbounded
//!
//! An unbounded pool grows as needed. A bounded pool refuses to hold more
//! than `max_nodes` live nodes and reports [`Error::Full`] instead, which is
//! how allocation failure surfaces to callers.
//!
//! ```
//! use nexus_ring::{Error, NodePool, Queue};
//!
//! let mut pool = NodePool::bounded(2);
//! let queue = Queue::new(&mut pool).unwrap(); // sentinel takes one slot
//!
//! queue.insert_tail(&mut pool, "a").unwrap();
//! assert_eq!(queue.insert_tail(&mut pool, "b"), Err(Error::Full));
//! assert_eq!(queue.size(&pool), 1);
//! ```

use slab::Slab;
use tracing::warn;

use crate::{Error, PoolConfig, Result};

/// A ring node: circular links plus an optional payload.
///
/// Sentinels carry no payload. Every element node carries `Some(value)`.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) value: Option<String>,
}

/// Storage for the nodes of any number of queues.
///
/// All operations on a queue must use the pool the queue was created in.
/// This is the caller's responsibility (same discipline as the `slab` crate).
#[derive(Debug, Default)]
pub struct NodePool {
    nodes: Slab<Node>,
    max_nodes: Option<usize>,
}

impl NodePool {
    /// Creates an empty, unbounded pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbounded pool with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(PoolConfig::default().capacity(capacity))
    }

    /// Creates a pool holding at most `max_nodes` live nodes.
    ///
    /// Every queue consumes one node for its sentinel.
    pub fn bounded(max_nodes: usize) -> Self {
        Self::with_config(
            PoolConfig::default()
                .capacity(max_nodes)
                .max_nodes(max_nodes),
        )
    }

    /// Creates a pool from a [`PoolConfig`].
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            nodes: Slab::with_capacity(config.capacity),
            max_nodes: config.max_nodes,
        }
    }

    /// Returns the number of live nodes, sentinels included.
    ///
    /// Freeing every queue brings this back to zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of preallocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the node bound, or `None` if unbounded.
    #[inline]
    pub const fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Returns `true` if a bounded pool has no free slot.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.max_nodes.is_some_and(|max| self.nodes.len() >= max)
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Inserts a self-linked node, honouring the bound.
    pub(crate) fn try_insert(&mut self, value: Option<String>) -> Result<usize> {
        if self.is_full() {
            warn!(live = self.nodes.len(), "node pool is full");
            return Err(Error::Full);
        }
        Ok(self.insert_unbounded(value))
    }

    /// Allocates an empty sentinel for temporary use by an algorithm.
    ///
    /// Scratch rings are transient and bypass the bound, so an in-place
    /// algorithm never fails halfway through.
    pub(crate) fn insert_scratch(&mut self) -> usize {
        self.insert_unbounded(None)
    }

    /// Releases a scratch sentinel. The ring must be empty.
    pub(crate) fn release_scratch(&mut self, key: usize) {
        debug_assert!(self.is_ring_empty(key), "scratch ring still holds nodes");
        self.nodes.remove(key);
    }

    fn insert_unbounded(&mut self, value: Option<String>) -> usize {
        let entry = self.nodes.vacant_entry();
        let key = entry.key();
        entry.insert(Node {
            prev: key,
            next: key,
            value,
        });
        key
    }

    /// Removes an unlinked node from storage.
    pub(crate) fn remove(&mut self, key: usize) -> Option<Node> {
        self.nodes.try_remove(key)
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[inline]
    pub(crate) fn node(&self, key: usize) -> &Node {
        &self.nodes[key]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: usize) -> &mut Node {
        &mut self.nodes[key]
    }

    /// Returns the value of an element node.
    ///
    /// # Panics
    ///
    /// Panics if `key` is a sentinel.
    #[inline]
    pub(crate) fn value(&self, key: usize) -> &str {
        self.nodes[key]
            .value
            .as_deref()
            .expect("sentinel has no value")
    }

    /// Returns `true` if `key` names a live sentinel.
    #[inline]
    pub(crate) fn is_sentinel(&self, key: usize) -> bool {
        self.nodes.get(key).is_some_and(|node| node.value.is_none())
    }
}
