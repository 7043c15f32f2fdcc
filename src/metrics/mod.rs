//! Cache Metrics System
//!
//! Counters kept by every [`RecencyCache`](crate::RecencyCache) and reported
//! through the [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! BTreeMap keeps the keys in a fixed order, so reports diff cleanly between
//! runs and can be written straight to CSV or logs.
//!
//! Metrics are bookkeeping only. They reuse the byte sizes the cache already
//! computes while adding and evicting, and never call
//! [`ByteSize::byte_size`](crate::ByteSize::byte_size) themselves.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::RecencyCacheMetrics;

/// Counters common to every cache operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get` and `get_mut`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of adds that created a new entry
    pub insertions: u64,

    /// Number of adds that replaced the value of a resident key
    pub updates: u64,

    /// Number of entries dropped by the LRU policy
    pub evictions: u64,

    /// Number of entries taken out with an explicit `remove`
    pub removals: u64,

    /// Total bytes charged by inserts and updates (key + value for inserts, value for updates)
    pub bytes_written_to_cache: u64,

    /// Total bytes released by evictions
    pub bytes_evicted: u64,

    /// Configured byte budget, zero when unbounded
    pub max_cache_size_bytes: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance with the specified byte budget
    ///
    /// # Arguments
    /// * `max_cache_size_bytes` - The configured budget in bytes, zero when unbounded
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            max_cache_size_bytes,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry with the given charge.
    pub fn record_insertion(&mut self, charge: u64) {
        self.insertions += 1;
        self.bytes_written_to_cache = self.bytes_written_to_cache.saturating_add(charge);
    }

    /// Records a value replacement. `value_size` is the size of the new value.
    pub fn record_update(&mut self, value_size: u64) {
        self.updates += 1;
        self.bytes_written_to_cache = self.bytes_written_to_cache.saturating_add(value_size);
    }

    /// Records an eviction of an entry with the given charge.
    pub fn record_eviction(&mut self, charge: u64) {
        self.evictions += 1;
        self.bytes_evicted = self.bytes_evicted.saturating_add(charge);
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates how full the cache is relative to its budget
    ///
    /// # Returns
    /// `cache_size_bytes / max_cache_size_bytes`, or 0.0 for an unbounded cache
    pub fn cache_utilization(&self, cache_size_bytes: u64) -> f64 {
        if self.max_cache_size_bytes > 0 {
            cache_size_bytes as f64 / self.max_cache_size_bytes as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    ///
    /// The live byte total belongs to the cache, not to the counters, so the
    /// caller passes it in as `cache_size_bytes`.
    pub fn to_btreemap(&self, cache_size_bytes: u64) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        // Bytes
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );
        metrics.insert("bytes_evicted".to_string(), self.bytes_evicted as f64);

        // Size and utilization
        metrics.insert("cache_size_bytes".to_string(), cache_size_bytes as f64);
        metrics.insert(
            "max_cache_size_bytes".to_string(),
            self.max_cache_size_bytes as f64,
        );
        metrics.insert(
            "cache_utilization".to_string(),
            self.cache_utilization(cache_size_bytes),
        );

        let writes = self.insertions + self.updates;
        if writes > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / writes as f64,
            );
        }

        metrics
    }
}

/// Trait implemented by caches that report metrics.
///
/// The returned map is ordered by key, so two reports from the same workload
/// compare equal line by line.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LRU"`
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_metrics_report_zero_rates() {
        let core = CoreCacheMetrics::new(100);
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);
        let map = core.to_btreemap(0);
        assert_eq!(map.get("requests"), Some(&0.0));
        assert_eq!(map.get("cache_utilization"), Some(&0.0));
        assert!(map.get("eviction_rate").is_none());
    }

    #[test]
    fn test_hits_and_misses() {
        let mut core = CoreCacheMetrics::new(0);
        core.record_hit();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_misses(), 1);
        assert_eq!(core.hit_rate(), 0.75);
        assert_eq!(core.miss_rate(), 0.25);
    }

    #[test]
    fn test_byte_counters() {
        let mut core = CoreCacheMetrics::new(100);
        core.record_insertion(30);
        core.record_update(10);
        core.record_eviction(25);
        core.record_removal();
        assert_eq!(core.bytes_written_to_cache, 40);
        assert_eq!(core.bytes_evicted, 25);

        let map = core.to_btreemap(50);
        assert_eq!(map.get("cache_size_bytes"), Some(&50.0));
        assert_eq!(map.get("cache_utilization"), Some(&0.5));
        assert_eq!(map.get("eviction_rate"), Some(&0.5));
        assert_eq!(map.get("removals"), Some(&1.0));
    }

    #[test]
    fn test_unbounded_utilization_is_zero() {
        let core = CoreCacheMetrics::new(0);
        assert_eq!(core.cache_utilization(1_000_000), 0.0);
    }
}
