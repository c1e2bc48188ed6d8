//! Sentinel-headed circular queues over shared slab storage.
//!
//! This crate provides string queues built on an intrusive, circular,
//! doubly-linked ring. Nodes live in a [`NodePool`]; a [`Queue`] is just a
//! handle naming the sentinel node of one ring. Because every queue in a pool
//! shares the same storage, moving elements between queues is pure relinking.
//!
//! # Design Philosophy
//!
//! Separate storage from structure:
//!
//! ```text
//! NodePool (Slab)  - owns every node, provides stable keys
//! Queue            - names a sentinel, coordinates keys
//! MergeContext     - borrows queues, fuses them
//! ```
//!
//! Benefits:
//! - **Stable keys**: transforms, sorts, and merges relink nodes; nothing moves
//! - **No per-element allocation** in sort, merge, reverse, or the filters
//! - **Bounded pools** surface allocation failure as [`Error::Full`] instead
//!   of aborting
//!
//! # Quick Start
//!
//! ```
//! use nexus_ring::{NodePool, Queue};
//!
//! let mut pool = NodePool::new();
//! let queue = Queue::new(&mut pool).unwrap();
//!
//! for v in ["delta", "alpha", "charlie", "bravo"] {
//!     queue.insert_tail(&mut pool, v).unwrap();
//! }
//!
//! queue.sort(&mut pool, false);
//! assert_eq!(
//!     queue.values(&pool).collect::<Vec<_>>(),
//!     ["alpha", "bravo", "charlie", "delta"]
//! );
//!
//! queue.reverse_k_groups(&mut pool, 2);
//! assert_eq!(
//!     queue.values(&pool).collect::<Vec<_>>(),
//!     ["bravo", "alpha", "delta", "charlie"]
//! );
//!
//! let first = queue.remove_head(&mut pool, None).unwrap();
//! assert_eq!(first.value(), "bravo");
//!
//! queue.free(&mut pool);
//! assert!(pool.is_empty());
//! ```
//!
//! # Critical Invariant: Same Pool Instance
//!
//! All operations on a queue must use the pool it was created in. A handle
//! used with a pool where its key is vacant or names an element is rejected
//! ([`Error::InvalidQueue`], `None`, `false`, or 0 depending on the
//! operation), but a handle whose key happens to name some other sentinel in
//! a different pool cannot be detected.
//!
//! # Operations
//!
//! | Group | Operations |
//! |-------|------------|
//! | Lifecycle | [`Queue::new`], [`Queue::free`], [`Queue::size`] |
//! | Ends | [`Queue::insert_head`], [`Queue::insert_tail`], [`Queue::remove_head`], [`Queue::remove_tail`] |
//! | Structure | [`Queue::delete_mid`], [`Queue::swap_pairs`], [`Queue::reverse`], [`Queue::reverse_k_groups`] |
//! | Filters | [`Queue::remove_duplicates`], [`Queue::ascend`], [`Queue::descend`] |
//! | Ordering | [`Queue::merge_sorted`], [`Queue::sort`], [`MergeContext::merge_queues`] |
//!
//! Values compare byte-wise. Nothing here is thread-safe beyond what the
//! borrow checker enforces: every mutation takes `&mut NodePool`.

#![warn(missing_docs)]

mod config;
mod context;
mod element;
mod error;
mod filter;
mod order;
mod queue;
mod ring;
mod storage;
mod transform;

pub use config::PoolConfig;
pub use context::MergeContext;
pub use element::Element;
pub use error::{Error, Result};
pub use queue::{Queue, Values};
pub use storage::NodePool;
