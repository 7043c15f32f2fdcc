//! Concurrent LRU Cache Implementation
//!
//! A thread-safe wrapper around [`RecencyCache`](crate::RecencyCache). All
//! methods take `&self`, lock the whole cache for the duration of the call and
//! release it before returning.
//!
//! # When to Use
//!
//! **Use ConcurrentRecencyCache when:**
//! - Multiple threads need one shared byte budget
//! - Eviction order must be the exact global LRU order
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `RecencyCache`
//! - Lock contention dominates → partition keys across several caches yourself

extern crate alloc;

use crate::config::RecencyCacheConfig;
use crate::lru::{EvictionListener, RecencyCache};
use crate::metrics::CacheMetrics;
use crate::value::ByteSize;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::BuildHasher;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe, byte-budgeted LRU cache.
///
/// # Type Parameters
///
/// - `V`: Value type. Must implement `ByteSize + Send`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use recency_cache::concurrent::ConcurrentRecencyCache;
/// use std::sync::Arc;
///
/// let cache = Arc::new(ConcurrentRecencyCache::new(1024));
///
/// // Safe to use from multiple threads
/// cache.add("key", "value".to_string());
/// assert_eq!(cache.get("key"), Some("value".to_string()));
/// ```
pub struct ConcurrentRecencyCache<V, S = DefaultHashBuilder> {
    inner: Mutex<RecencyCache<V, S>>,
}

impl<V> ConcurrentRecencyCache<V, DefaultHashBuilder>
where
    V: ByteSize + Send,
{
    /// Creates a concurrent cache from a configuration and an optional listener.
    ///
    /// # Arguments
    ///
    /// * `config` - Byte budget; `max_bytes: 0` disables eviction
    /// * `on_evicted` - Called once per evicted entry, while the lock is held
    pub fn init(config: RecencyCacheConfig, on_evicted: Option<EvictionListener<V>>) -> Self {
        Self {
            inner: Mutex::new(RecencyCache::init(config, on_evicted)),
        }
    }

    /// Creates a concurrent cache with the given byte budget and no listener.
    pub fn new(max_bytes: u64) -> Self {
        Self::init(RecencyCacheConfig { max_bytes }, None)
    }
}

impl<V, S> ConcurrentRecencyCache<V, S>
where
    V: ByteSize + Send,
    S: BuildHasher + Send,
{
    /// Creates a concurrent cache with a custom hash builder.
    pub fn init_with_hasher(
        config: RecencyCacheConfig,
        on_evicted: Option<EvictionListener<V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            inner: Mutex::new(RecencyCache::init_with_hasher(
                config,
                on_evicted,
                hash_builder,
            )),
        }
    }

    /// Wraps an existing cache, keeping its entries, listener and metrics.
    pub fn from_cache(cache: RecencyCache<V, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> RecencyCache<V, S> {
        self.inner.into_inner()
    }

    /// Returns a clone of the value for `key`, marking it most recently used.
    ///
    /// Use [`get_with`](Self::get_with) to avoid the clone.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` on the value for `key` while the lock is held.
    ///
    /// Marks the key most recently used on a hit. `f` must not access this cache.
    pub fn get_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Inserts or replaces a value, evicting until the cache fits its budget.
    pub fn add<K: Into<String>>(&self, key: K, value: V) {
        self.inner.lock().add(key, value);
    }

    /// Evicts the least recently used entry. No-op on an empty cache.
    pub fn remove_oldest(&self) {
        self.inner.lock().remove_oldest();
    }

    /// Removes a key and returns its value without notifying the listener.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Returns true if the key is resident. Does not change recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the current total charge of resident entries in bytes.
    pub fn used_bytes(&self) -> u64 {
        self.inner.lock().used_bytes()
    }

    /// Returns the configured byte budget, zero when unbounded.
    pub fn max_bytes(&self) -> u64 {
        self.inner.lock().max_bytes()
    }

    /// Drops every entry without notifying the listener.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<V, S> CacheMetrics for ConcurrentRecencyCache<V, S>
where
    V: ByteSize + Send,
    S: BuildHasher + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<V, S> fmt::Debug for ConcurrentRecencyCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentRecencyCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentRecencyCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    extern crate std;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let cache: ConcurrentRecencyCache<Vec<u8>> = ConcurrentRecencyCache::new(10);
        cache.add("a", vec![0; 4]);
        cache.add("b", vec![0; 4]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.used_bytes(), 10);

        assert_eq!(cache.get_with("a", |v| v.len()), Some(4));
        cache.add("c", vec![0; 4]);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));

        assert_eq!(cache.remove("a"), Some(vec![0; 4]));
        cache.remove_oldest();
        assert!(cache.is_empty());
        assert_eq!(cache.max_bytes(), 10);
    }

    #[test]
    fn test_listener_runs_under_lock() {
        let evicted = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let cache: ConcurrentRecencyCache<Vec<u8>> = ConcurrentRecencyCache::init(
            RecencyCacheConfig { max_bytes: 5 },
            Some(alloc::boxed::Box::new(move |key: String, _value: Vec<u8>| {
                sink.lock().push(key);
            })),
        );
        cache.add("a", vec![0; 4]);
        cache.add("b", vec![0; 4]);
        assert_eq!(evicted.lock().as_slice(), &[String::from("a")]);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ConcurrentRecencyCache::new(4096));
        let num_threads = 8;
        let ops_per_thread = 500;

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("key_{}", (t * 31 + i) % 200);
                        if i % 2 == 0 {
                            cache.add(key, vec![0u8; 40]);
                        } else {
                            let _ = cache.get_with(&key, |v| v.len());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.used_bytes() <= 4096);
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_round_trip_through_inner() {
        let mut plain = RecencyCache::new(100);
        plain.add("kept", vec![1u8, 2, 3]);
        let shared = ConcurrentRecencyCache::from_cache(plain);
        shared.add("other", vec![4u8]);
        let plain = shared.into_inner();
        assert_eq!(plain.len(), 2);
        assert_eq!(plain.peek("kept"), Some(&vec![1u8, 2, 3]));
    }

    #[test]
    fn test_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConcurrentRecencyCache<Vec<u8>>>();
    }
}
