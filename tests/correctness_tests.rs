//! Correctness Tests for the Byte-Budgeted LRU Cache
//!
//! This module validates the eviction behavior of `RecencyCache` using small,
//! predictable byte budgets. Each test states which key is evicted by which add.
//!
//! ## Test Strategy
//! - Single-character keys so an entry's charge is `1 + value length`
//! - Budgets of a few dozen bytes for predictable eviction
//! - Explicit checks on `len()` and `used_bytes()` after each step
//! - An eviction log shared with the listener to verify notification order

use recency_cache::config::RecencyCacheConfig;
use recency_cache::metrics::CacheMetrics;
use recency_cache::{ByteSize, EvictionListener, RecencyCache};
use std::sync::{Arc, Mutex};

type EvictionLog = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create a cache of byte vectors with the given budget
fn make_cache(max_bytes: u64) -> RecencyCache<Vec<u8>> {
    RecencyCache::init(RecencyCacheConfig { max_bytes }, None)
}

/// Helper to create a cache whose evictions are appended to a shared log
fn make_logged_cache(max_bytes: u64) -> (RecencyCache<Vec<u8>>, EvictionLog) {
    let log: EvictionLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let listener: EvictionListener<Vec<u8>> = Box::new(move |key: String, value: Vec<u8>| {
        sink.lock().unwrap().push((key, value));
    });
    let cache = RecencyCache::init(RecencyCacheConfig { max_bytes }, Some(listener));
    (cache, log)
}

/// Keys evicted so far, in order
fn evicted_keys(log: &EvictionLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
}

/// Sum of `key.len() + value.byte_size()` over the resident entries
fn resident_charge<V: ByteSize>(cache: &RecencyCache<V>) -> u64 {
    cache
        .iter()
        .map(|(k, v)| (k.len() + v.byte_size()) as u64)
        .sum()
}

// ============================================================================
// BASIC SCENARIOS
// ============================================================================

#[test]
fn test_budget_ten_three_keys() {
    let (mut cache, log) = make_logged_cache(10);

    cache.add("a", vec![0; 4]);
    cache.add("b", vec![0; 4]);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.used_bytes(), 10);

    cache.add("c", vec![0; 4]);
    assert_eq!(evicted_keys(&log), vec!["a"]);
    assert!(cache.get("a").is_none());
    assert!(cache.get("b").is_some());
    assert!(cache.get("c").is_some());
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.used_bytes(), 10);
}

#[test]
fn test_hit_updates_recency() {
    // room for exactly two entries of charge 5
    let (mut cache, log) = make_logged_cache(10);
    cache.add("x", vec![0; 4]);
    cache.add("y", vec![0; 4]);
    assert!(cache.get("x").is_some());
    cache.add("z", vec![0; 4]);

    assert_eq!(evicted_keys(&log), vec!["y"]);
    assert!(cache.contains("x"));
    assert!(cache.contains("z"));
}

#[test]
fn test_update_in_place() {
    let mut cache = make_cache(100);
    cache.add("k", vec![1; 3]);
    cache.add("k", vec![2; 7]);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.used_bytes(), 1 + 7);
    assert_eq!(cache.get("k"), Some(&vec![2; 7]));
}

#[test]
fn test_update_does_not_notify_listener() {
    let (mut cache, log) = make_logged_cache(100);
    cache.add("k", vec![1; 3]);
    cache.add("k", vec![2; 3]);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_shrinking_update_frees_budget() {
    let (mut cache, log) = make_logged_cache(20);
    cache.add("a", vec![0; 9]);
    cache.add("b", vec![0; 9]);
    cache.add("a", vec![0; 1]);
    assert_eq!(cache.used_bytes(), 12);

    cache.add("c", vec![0; 7]);
    assert_eq!(cache.used_bytes(), 20);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_miss_leaves_state_unchanged() {
    let mut cache = make_cache(50);
    cache.add("a", vec![0; 4]);
    let len = cache.len();
    let used = cache.used_bytes();

    assert!(cache.get("nope").is_none());
    assert_eq!(cache.len(), len);
    assert_eq!(cache.used_bytes(), used);
}

#[test]
fn test_empty_key_is_valid() {
    let mut cache = make_cache(10);
    cache.add("", vec![0; 10]);
    assert_eq!(cache.used_bytes(), 10);
    assert_eq!(cache.get(""), Some(&vec![0; 10]));
}

// ============================================================================
// EVICTION
// ============================================================================

#[test]
fn test_listener_fidelity() {
    let (mut cache, log) = make_logged_cache(12);
    cache.add("a", vec![1; 5]);
    cache.add("b", vec![2; 5]);
    cache.add("c", vec![3; 5]);

    let log_now = log.lock().unwrap().clone();
    assert_eq!(log_now, vec![("a".to_string(), vec![1; 5])]);
    assert!(cache.get("a").is_none());
}

#[test]
fn test_single_add_evicts_several() {
    let (mut cache, log) = make_logged_cache(20);
    cache.add("a", vec![0; 4]);
    cache.add("b", vec![0; 4]);
    cache.add("c", vec![0; 4]);
    cache.add("d", vec![0; 4]);

    // charge 13 needs three of the four resident entries gone
    cache.add("e", vec![0; 12]);
    assert_eq!(evicted_keys(&log), vec!["a", "b", "c"]);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.used_bytes(), 18);
}

#[test]
fn test_oversized_entry_self_evicts() {
    let (mut cache, log) = make_logged_cache(10);
    cache.add("a", vec![0; 4]);
    cache.add("big", vec![9; 20]);

    assert_eq!(evicted_keys(&log), vec!["a", "big"]);
    assert!(cache.is_empty());
    assert_eq!(cache.used_bytes(), 0);
    assert!(cache.get("big").is_none());
}

#[test]
fn test_exact_fit_is_kept() {
    let (mut cache, log) = make_logged_cache(10);
    cache.add("k", vec![0; 9]);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.used_bytes(), 10);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_remove_oldest() {
    let (mut cache, log) = make_logged_cache(0);
    cache.add("a", vec![1]);
    cache.add("b", vec![2]);
    cache.get("a");

    cache.remove_oldest();
    assert_eq!(evicted_keys(&log), vec!["b"]);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.used_bytes(), 2);

    cache.remove_oldest();
    cache.remove_oldest();
    assert!(cache.is_empty());
    assert_eq!(evicted_keys(&log), vec!["b", "a"]);
}

#[test]
fn test_recency_ordering() {
    let (mut cache, log) = make_logged_cache(0);
    for key in ["a", "b", "c", "d", "e"] {
        cache.add(key, vec![0]);
    }
    cache.get("b");
    cache.get("d");
    cache.add("a", vec![1]);

    for _ in 0..5 {
        cache.remove_oldest();
    }
    assert_eq!(evicted_keys(&log), vec!["c", "e", "b", "d", "a"]);
}

#[test]
fn test_unbounded_never_evicts() {
    let (mut cache, log) = make_logged_cache(0);
    for i in 0..1000 {
        cache.add(format!("key{i}"), vec![0; 100]);
    }
    assert_eq!(cache.len(), 1000);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_capacity_invariant_random_workload() {
    let (mut cache, log) = make_logged_cache(256);
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

    for _ in 0..5000 {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let key = format!("k{}", (seed >> 33) % 64);
        let size = ((seed >> 17) % 48) as usize;
        cache.add(key, vec![0; size]);

        assert!(cache.used_bytes() <= 256);
        assert_eq!(cache.used_bytes(), resident_charge(&cache));
    }
    assert!(!log.lock().unwrap().is_empty());
}

// ============================================================================
// EXPLICIT REMOVAL
// ============================================================================

#[test]
fn test_remove_returns_value_without_notifying() {
    let (mut cache, log) = make_logged_cache(100);
    cache.add("a", vec![1, 2]);
    cache.add("b", vec![3]);

    assert_eq!(cache.remove("a"), Some(vec![1, 2]));
    assert_eq!(cache.remove("a"), None);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.used_bytes(), 2);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_clear() {
    let (mut cache, log) = make_logged_cache(100);
    cache.add("a", vec![1]);
    cache.add("b", vec![2]);
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.used_bytes(), 0);
    assert!(log.lock().unwrap().is_empty());

    cache.add("c", vec![3]);
    assert_eq!(cache.used_bytes(), 2);
}

// ============================================================================
// INSPECTION
// ============================================================================

#[test]
fn test_peek_and_iter_do_not_touch_recency() {
    let (mut cache, log) = make_logged_cache(10);
    cache.add("a", vec![0; 4]);
    cache.add("b", vec![0; 4]);

    assert_eq!(cache.peek("a"), Some(&vec![0; 4]));
    let keys: Vec<&str> = cache.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a"]);

    cache.add("c", vec![0; 4]);
    assert_eq!(evicted_keys(&log), vec!["a"]);
}

#[test]
fn test_metrics_report() {
    let mut cache = make_cache(10);
    cache.add("a", vec![0; 4]);
    cache.add("b", vec![0; 4]);
    cache.get("a");
    cache.get("zzz");
    cache.add("c", vec![0; 4]);

    let metrics = cache.metrics();
    assert_eq!(metrics.get("requests"), Some(&2.0));
    assert_eq!(metrics.get("cache_hits"), Some(&1.0));
    assert_eq!(metrics.get("cache_misses"), Some(&1.0));
    assert_eq!(metrics.get("insertions"), Some(&3.0));
    assert_eq!(metrics.get("evictions"), Some(&1.0));
    assert_eq!(metrics.get("cache_size_bytes"), Some(&10.0));
    assert_eq!(metrics.get("max_cache_size_bytes"), Some(&10.0));
    assert_eq!(cache.algorithm_name(), "LRU");
}

#[test]
fn test_string_values() {
    let mut cache: RecencyCache<String> = RecencyCache::new(12);
    cache.add("greeting", "hey".to_string());
    assert_eq!(cache.used_bytes(), 11);
    cache.add("x", "yy".to_string());
    assert_eq!(cache.len(), 1);
    assert!(cache.get("greeting").is_none());
}
