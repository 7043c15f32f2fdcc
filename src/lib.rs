#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RecencyCache`] | Single-threaded LRU cache bounded by a byte budget |
//! | [`ByteSize`] | Trait every cached value implements to report its size |
//! | [`config::RecencyCacheConfig`] | Public-field configuration |
//! | [`metrics::CacheMetrics`] | Deterministic metric reports |
//! | `concurrent::ConcurrentRecencyCache` | Mutex-wrapped cache (requires `concurrent` feature) |
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `get_mut` / `peek` | O(1) |
//! | `add` | O(1) + O(1) per eviction it triggers |
//! | `remove` / `remove_oldest` | O(1) |
//! | `len` / `used_bytes` | O(1) |
//!
//! ## Byte Accounting
//!
//! An entry is charged `key.len() + value.byte_size()`. The running total is
//! updated incrementally on every insert, update, eviction and removal, and is
//! never recomputed by walking the entries.
//!
//! ```rust
//! use recency_cache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(100);
//! cache.add("k", vec![0u8; 10]);
//! assert_eq!(cache.used_bytes(), 11);
//!
//! // replacing the value applies only the difference
//! cache.add("k", vec![0u8; 4]);
//! assert_eq!(cache.used_bytes(), 5);
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Oversized Entries
//!
//! An entry larger than the whole budget cannot stay. The eviction loop keeps
//! taking the least recently used entry until the total fits, which ends with
//! the new entry itself:
//!
//! ```rust
//! use recency_cache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(16);
//! cache.add("small", vec![0u8; 4]);
//! cache.add("huge", vec![0u8; 64]);
//! assert!(cache.is_empty());
//! assert_eq!(cache.used_bytes(), 0);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The byte-budgeted LRU cache
//! - [`value`]: The `ByteSize` trait and its implementations
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache monitoring
//! - `concurrent`: Thread-safe wrapper (requires `concurrent` feature)

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Resident cache entries.
///
/// Internal: pairs each key with its value and computes the entry's charge.
pub(crate) mod entry;

/// Arena-backed doubly linked list with stable integer handles.
///
/// **Note**: This module is internal infrastructure and should not be used directly
/// by library consumers. Use [`RecencyCache`] instead.
pub(crate) mod list;

/// Byte-size reporting for cached values.
pub mod value;

/// Cache configuration structures.
pub mod config;

/// Byte-budgeted Least Recently Used (LRU) cache.
///
/// Provides [`RecencyCache`], which evicts the least recently used entries once
/// the total size of resident entries exceeds its budget.
pub mod lru;

/// Cache metrics system.
///
/// Counters for hits, misses, writes and evictions, reported in deterministic order.
pub mod metrics;

/// Concurrent cache wrapper.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use lru::{EvictionListener, RecencyCache, ValueMut};
pub use value::ByteSize;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentRecencyCache;
