//! Error types for queue creation and insertion.

use std::collections::TryReserveError;

/// Errors returned by fallible queue operations.
///
/// Only creation and insertion allocate, so only they return `Result`.
/// Every other operation reports failure through its return value
/// (`bool`, `Option`, or a count of zero).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Bounded node storage has no free slot.
    #[error("node storage is full")]
    Full,

    /// The value buffer could not be allocated.
    #[error("failed to allocate value buffer: {0}")]
    Alloc(#[from] TryReserveError),

    /// The handle does not name a live queue in this pool.
    #[error("queue handle does not name a live queue")]
    InvalidQueue,
}

/// Result alias for fallible queue operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::Full.to_string(), "node storage is full");
        assert_eq!(
            Error::InvalidQueue.to_string(),
            "queue handle does not name a live queue"
        );
    }

    #[test]
    fn alloc_from_try_reserve() {
        let mut s = String::new();
        let err = s.try_reserve_exact(usize::MAX).unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::Alloc(_)));
        assert!(err.to_string().starts_with("failed to allocate value buffer"));
    }
}
