//! LRU Cache Metrics
//!
//! Metrics specific to the byte-budgeted LRU policy of
//! [`RecencyCache`](crate::RecencyCache).

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyCacheMetrics {
    /// Core metrics common to all cache operations
    pub core: CoreCacheMetrics,

    /// Adds whose own charge exceeded the budget.
    ///
    /// Such an entry cannot fit even in an empty cache, so the eviction loop
    /// removes it along with everything older before `add` returns.
    pub oversized_adds: u64,

    /// Most evictions triggered by a single add
    pub max_evictions_per_add: u64,
}

impl RecencyCacheMetrics {
    /// Creates a new RecencyCacheMetrics instance with the specified byte budget
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
            oversized_adds: 0,
            max_evictions_per_add: 0,
        }
    }

    /// Records one add whose charge alone was larger than the budget.
    pub fn record_oversized_add(&mut self) {
        self.oversized_adds += 1;
    }

    /// Records how many evictions one add caused.
    pub fn record_add_evictions(&mut self, evictions: u64) {
        self.max_evictions_per_add = self.max_evictions_per_add.max(evictions);
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self, cache_size_bytes: u64) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap(cache_size_bytes);
        metrics.insert("oversized_adds".to_string(), self.oversized_adds as f64);
        metrics.insert(
            "max_evictions_per_add".to_string(),
            self.max_evictions_per_add as f64,
        );
        metrics
    }
}

/// Standalone report for metrics detached from a cache, e.g. a cloned snapshot.
///
/// Without the owning cache the live byte total is unknown and reported as zero.
impl CacheMetrics for RecencyCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap(0)
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_metrics_extend_core() {
        let mut metrics = RecencyCacheMetrics::new(64);
        metrics.core.record_insertion(10);
        metrics.record_oversized_add();
        metrics.record_add_evictions(3);
        metrics.record_add_evictions(1);

        let map = metrics.to_btreemap(10);
        assert_eq!(map.get("oversized_adds"), Some(&1.0));
        assert_eq!(map.get("max_evictions_per_add"), Some(&3.0));
        assert_eq!(map.get("insertions"), Some(&1.0));
        assert_eq!(map.get("cache_size_bytes"), Some(&10.0));
        assert_eq!(metrics.algorithm_name(), "LRU");
    }
}
