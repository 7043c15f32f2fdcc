//! Byte-Budgeted Least Recently Used (LRU) Cache
//!
//! This module provides [`RecencyCache`], an LRU cache keyed by strings whose
//! capacity is a byte budget rather than an entry count. Each entry is charged
//! its key length plus the size its value reports through [`ByteSize`]. When a
//! write pushes the total over the budget, least recently used entries are
//! evicted until it fits again.
//!
//! # Algorithm
//!
//! Entries sit in a recency list, most recently used at the front. A hash map
//! resolves a key to the entry's handle in that list. Every hit or write moves
//! the entry to the front; eviction always takes from the back.
//!
//! ```text
//!   map: "b" ─────────────┐        "a" ─────────────────────┐
//!                         ▼                                  ▼
//!   list:  front ─▶ [ c ] ◀─▶ [ b ] ◀─▶ [ d ] ◀─▶ ... ◀─▶ [ a ] ◀─ back
//!                   (MRU)                                 (LRU, next victim)
//! ```
//!
//! The eviction loop is unconditional: an entry whose own charge exceeds the
//! budget evicts everything older, then itself, leaving the cache empty.
//!
//! # Performance Characteristics
//!
//! - Get / Add / Remove: O(1), plus O(1) per eviction an add triggers
//! - Memory: one list node and one map slot per entry; the key is stored twice
//!
//! # Thread Safety
//!
//! `RecencyCache` is not thread-safe. Wrap it in a `Mutex`, or enable the
//! `concurrent` feature for `ConcurrentRecencyCache`, which does exactly that.

extern crate alloc;

use crate::config::RecencyCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{self, List, NodeId};
use crate::metrics::{CacheMetrics, RecencyCacheMetrics};
use crate::value::ByteSize;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::BuildHasher;
use core::mem;
use core::ops::{Deref, DerefMut};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Callback invoked with the key and value of every evicted entry.
///
/// The listener runs synchronously inside the `add` or `remove_oldest` call
/// that caused the eviction, after the entry has been unlinked and the byte
/// total updated. It must not call back into the same cache. The `&mut self`
/// receivers rule this out for a plain `RecencyCache`; a cache shared behind a
/// lock would deadlock instead.
pub type EvictionListener<V> = Box<dyn FnMut(String, V) + Send>;

/// A string-keyed LRU cache bounded by a byte budget.
///
/// # Examples
///
/// ```
/// use recency_cache::RecencyCache;
///
/// // "a", "b", "c" each cost 1 byte of key plus 4 bytes of value
/// let mut cache = RecencyCache::new(10);
/// cache.add("a", "aaaa");
/// cache.add("b", "bbbb");
/// assert_eq!(cache.used_bytes(), 10);
///
/// // a third entry does not fit, so the least recently used one goes
/// cache.add("c", "cccc");
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("b"), Some(&"bbbb"));
/// assert_eq!(cache.used_bytes(), 10);
/// ```
///
/// Reacting to evictions:
///
/// ```
/// use recency_cache::RecencyCache;
/// use recency_cache::config::RecencyCacheConfig;
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel();
/// let config = RecencyCacheConfig { max_bytes: 8 };
/// let mut cache: RecencyCache<Vec<u8>> = RecencyCache::init(
///     config,
///     Some(Box::new(move |key: String, value: Vec<u8>| {
///         tx.send((key, value.len())).unwrap();
///     })),
/// );
///
/// cache.add("x", vec![0; 4]);
/// cache.add("y", vec![0; 4]);
/// assert_eq!(rx.try_recv(), Ok(("x".to_string(), 4)));
/// ```
pub struct RecencyCache<V, S = DefaultHashBuilder> {
    config: RecencyCacheConfig,
    list: List<CacheEntry<V>>,
    map: HashMap<String, NodeId, S>,
    used_bytes: u64,
    on_evicted: Option<EvictionListener<V>>,
    metrics: RecencyCacheMetrics,
}

impl<V: ByteSize> RecencyCache<V, DefaultHashBuilder> {
    /// Creates a cache from a configuration and an optional eviction listener.
    ///
    /// This is the **recommended** way to create a cache.
    ///
    /// # Arguments
    ///
    /// * `config` - Byte budget; `max_bytes: 0` disables eviction
    /// * `on_evicted` - Called once per evicted entry, see [`EvictionListener`]
    pub fn init(config: RecencyCacheConfig, on_evicted: Option<EvictionListener<V>>) -> Self {
        Self::init_with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }

    /// Creates a cache with the given byte budget and no eviction listener.
    pub fn new(max_bytes: u64) -> Self {
        Self::init(RecencyCacheConfig { max_bytes }, None)
    }

    /// Creates a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Creates a cache with the given byte budget that reports evictions to `listener`.
    ///
    /// Same as [`init`](Self::init), but the closure's argument types are
    /// inferred from `V`.
    pub fn with_eviction_listener<F>(max_bytes: u64, listener: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        Self::init(RecencyCacheConfig { max_bytes }, Some(Box::new(listener)))
    }
}

impl<V: ByteSize, S: BuildHasher> RecencyCache<V, S> {
    /// Creates a cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn init_with_hasher(
        config: RecencyCacheConfig,
        on_evicted: Option<EvictionListener<V>>,
        hash_builder: S,
    ) -> Self {
        RecencyCache {
            config,
            list: List::new(),
            map: HashMap::with_hasher(hash_builder),
            used_bytes: 0,
            on_evicted,
            metrics: RecencyCacheMetrics::new(config.max_bytes),
        }
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the current total charge of resident entries in bytes.
    #[inline]
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    /// Returns the configured byte budget, zero when unbounded.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    /// Returns the configuration this cache was built with.
    #[inline]
    pub fn config(&self) -> RecencyCacheConfig {
        self.config
    }

    /// Returns the raw metric counters.
    #[inline]
    pub fn counters(&self) -> &RecencyCacheMetrics {
        &self.metrics
    }

    /// Replaces the eviction listener. `None` stops notifications.
    pub fn set_eviction_listener(&mut self, on_evicted: Option<EvictionListener<V>>) {
        self.on_evicted = on_evicted;
    }

    /// Looks up a key, marking it most recently used on a hit.
    ///
    /// A hit changes eviction order even though nothing is written.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let node = self.touch(key)?;
        self.list.get(node).map(|entry| &entry.value)
    }

    /// Looks up a key for in-place mutation, marking it most recently used on a hit.
    ///
    /// The returned [`ValueMut`] derefs to the value. The value is measured
    /// once here and once more when the guard is dropped; the byte total then
    /// moves by the difference and entries are evicted until the cache fits
    /// its budget, notifying the listener as `add` would. A value grown past
    /// the whole budget evicts itself.
    ///
    /// ```
    /// use recency_cache::RecencyCache;
    ///
    /// let mut cache = RecencyCache::new(0);
    /// cache.add("k", vec![0u8; 1]);
    /// if let Some(mut value) = cache.get_mut("k") {
    ///     value.extend_from_slice(&[0; 10]);
    /// }
    /// assert_eq!(cache.used_bytes(), 1 + 11);
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<ValueMut<'_, V, S>> {
        let node = self.touch(key)?;
        let size_before = self.list.get(node)?.value.byte_size() as u64;
        Some(ValueMut {
            cache: self,
            node,
            size_before,
        })
    }

    /// Looks up a key without changing its recency or the metrics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let node = self.map.get(key).copied()?;
        self.list.get(node).map(|entry| &entry.value)
    }

    /// Returns true if the key is resident. Does not change recency.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn touch(&mut self, key: &str) -> Option<NodeId> {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.core.record_hit();
                Some(node)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Inserts or replaces a value, then evicts until the cache fits its budget.
    ///
    /// If the key is resident its value is replaced in place, the byte total
    /// moves by the difference in value size, and the entry becomes most
    /// recently used. The replaced value is dropped without notifying the
    /// eviction listener. Otherwise a new entry is added at the front.
    ///
    /// While the budget is exceeded, the least recently used entry is evicted.
    /// That can include the entry just written when its own charge is larger
    /// than the budget.
    pub fn add<K: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value_size = value.byte_size() as u64;
        let charge = (key.len() as u64).saturating_add(value_size);

        if let Some(node) = self.map.get(key.as_str()).copied() {
            self.list.move_to_front(node);
            if let Some(entry) = self.list.get_mut(node) {
                let old = mem::replace(&mut entry.value, value);
                self.resize(old.byte_size() as u64, value_size);
                self.metrics.core.record_update(value_size);
            }
        } else {
            let node = self.list.add(CacheEntry::new(key.clone(), value));
            self.map.insert(key, node);
            self.used_bytes = self.used_bytes.saturating_add(charge);
            self.metrics.core.record_insertion(charge);
        }

        if self.config.is_exceeded_by(charge) {
            self.metrics.record_oversized_add();
        }

        let evicted = self.evict_to_fit();
        self.metrics.record_add_evictions(evicted);
    }

    /// Moves the byte total from one value size to another. Saturates at both ends.
    fn resize(&mut self, old_size: u64, new_size: u64) {
        self.used_bytes = self
            .used_bytes
            .saturating_sub(old_size)
            .saturating_add(new_size);
    }

    /// Evicts from the back while over budget. Returns the number evicted.
    fn evict_to_fit(&mut self) -> u64 {
        let mut evicted = 0;
        while self.config.is_exceeded_by(self.used_bytes) {
            if !self.evict_oldest() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    /// Evicts the least recently used entry, notifying the listener.
    ///
    /// Does nothing on an empty cache.
    pub fn remove_oldest(&mut self) {
        self.evict_oldest();
    }

    fn evict_oldest(&mut self) -> bool {
        let Some(entry) = self.list.remove_last() else {
            return false;
        };
        self.map.remove(entry.key.as_str());
        let charge = entry.charge();
        self.used_bytes = self.used_bytes.saturating_sub(charge);
        self.metrics.core.record_eviction(charge);

        // State is consistent from here on; the listener sees the cache without the entry.
        let (key, value) = entry.into_parts();
        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(key, value);
        }
        true
    }

    /// Removes a key and returns its value.
    ///
    /// The value is handed to the caller, so the eviction listener is not called.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let node = self.map.remove(key)?;
        let entry = self.list.remove(node)?;
        self.used_bytes = self.used_bytes.saturating_sub(entry.charge());
        self.metrics.core.record_removal();
        Some(entry.value)
    }

    /// Drops every entry without notifying the eviction listener.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.used_bytes = 0;
    }

    /// Iterates over `(key, value)` pairs from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<V: ByteSize> Default for RecencyCache<V, DefaultHashBuilder> {
    /// An unbounded cache without a listener.
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<V, S> fmt::Debug for RecencyCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyCache")
            .field("max_bytes", &self.config.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.list.len())
            .field("has_listener", &self.on_evicted.is_some())
            .finish()
    }
}

impl<V: ByteSize, S: BuildHasher> CacheMetrics for RecencyCache<V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap(self.used_bytes)
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

/// Mutable access to a cached value, returned by [`RecencyCache::get_mut`].
///
/// Dropping the guard re-measures the value, settles the byte total and
/// evicts until the cache fits its budget again.
pub struct ValueMut<'a, V, S = DefaultHashBuilder>
where
    V: ByteSize,
    S: BuildHasher,
{
    cache: &'a mut RecencyCache<V, S>,
    node: NodeId,
    size_before: u64,
}

impl<V: ByteSize, S: BuildHasher> Deref for ValueMut<'_, V, S> {
    type Target = V;

    fn deref(&self) -> &V {
        // the guard borrows the cache mutably, so its node cannot be removed
        &self.cache.list[self.node].value
    }
}

impl<V: ByteSize, S: BuildHasher> DerefMut for ValueMut<'_, V, S> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.cache.list[self.node].value
    }
}

impl<V: ByteSize, S: BuildHasher> Drop for ValueMut<'_, V, S> {
    fn drop(&mut self) {
        let Some(entry) = self.cache.list.get(self.node) else {
            return;
        };
        let size_after = entry.value.byte_size() as u64;
        if size_after != self.size_before {
            self.cache.resize(self.size_before, size_after);
            self.cache.evict_to_fit();
        }
    }
}

impl<V: ByteSize + fmt::Debug, S: BuildHasher> fmt::Debug for ValueMut<'_, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueMut").field(&**self).finish()
    }
}

/// Iterator over a [`RecencyCache`] from most to least recently used.
pub struct Iter<'a, V> {
    inner: list::Iter<'a, CacheEntry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, V: ByteSize, S: BuildHasher> IntoIterator for &'a RecencyCache<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
