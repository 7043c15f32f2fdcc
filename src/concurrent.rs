//! Concurrent Cache Wrapper
//!
//! [`RecencyCache`](crate::RecencyCache) is single-threaded: every operation,
//! including `get`, takes `&mut self` because a hit reorders the recency list.
//! This module provides the synchronization layer for callers that need to
//! share one cache between threads.
//!
//! # Architecture
//!
//! [`ConcurrentRecencyCache`] owns one `parking_lot::Mutex` around one whole
//! cache. There is no sharding, so the LRU order and the byte budget are exact
//! and global, at the price of serializing every operation.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! A `get` moves the entry to the front of the recency list, so it is a write.
//! With an `RwLock` every access would still need the write lock, and a
//! `Mutex` has less bookkeeping.
//!
//! # Eviction Listener
//!
//! The listener runs while the lock is held. It must not call back into the
//! same `ConcurrentRecencyCache`; doing so deadlocks.
//!
//! # Example
//!
//! ```rust
//! use recency_cache::concurrent::ConcurrentRecencyCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentRecencyCache::new(64 * 1024));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.add(key.clone(), vec![0u8; 16]);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert!(cache.used_bytes() <= 64 * 1024);
//! ```

mod lru;

pub use self::lru::ConcurrentRecencyCache;
