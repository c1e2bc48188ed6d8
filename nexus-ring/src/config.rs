//! Pool configuration.

/// Sizing for a [`NodePool`](crate::NodePool).
///
/// The default is unbounded with no preallocation.
///
/// # Example
///
/// ```
/// use nexus_ring::{NodePool, PoolConfig};
///
/// let config = PoolConfig::default().capacity(1024).max_nodes(4096);
/// let pool = NodePool::with_config(config);
///
/// assert_eq!(pool.max_nodes(), Some(4096));
/// assert!(pool.capacity() >= 1024);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Slots to preallocate.
    pub capacity: usize,
    /// Upper bound on live nodes (sentinels and elements). `None` is unbounded.
    pub max_nodes: Option<usize>,
}

impl PoolConfig {
    /// Sets the number of slots to preallocate.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Bounds the pool to at most `max_nodes` live nodes.
    #[must_use]
    pub const fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}
