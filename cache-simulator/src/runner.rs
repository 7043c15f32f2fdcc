//! Simulation runner
//!
//! Replays a trace through one `RecencyCache` per byte budget. Every request
//! is a `get`; a miss is followed by an `add` of the object, as a read-through
//! cache in front of a backend would do.
//!
//! The trace is streamed once and fed to all caches in lockstep, so memory use
//! is proportional to the budgets rather than to the trace length.

use std::collections::HashSet;
use std::time::Instant;

use recency_cache::config::RecencyCacheConfig;
use recency_cache::RecencyCache;

use crate::input::{LogParseError, LogReader};
use crate::models::{BudgetStats, ObjectSize, SimulationConfig, SimulationResult};

/// A cache under test together with what has been observed about it
struct SimulatedCache {
    cache: RecencyCache<ObjectSize>,
    stats: BudgetStats,
    elapsed_ns: u128,
}

impl SimulatedCache {
    fn new(max_bytes: u64) -> Self {
        Self {
            cache: RecencyCache::init(RecencyCacheConfig { max_bytes }, None),
            stats: BudgetStats::new(max_bytes),
            elapsed_ns: 0,
        }
    }

    fn process(&mut self, key: &str, size: u64) {
        let start = Instant::now();
        let hit = self.cache.get(key).is_some();
        if !hit {
            self.cache.add(key, ObjectSize(size));
        }
        self.elapsed_ns += start.elapsed().as_nanos();

        if hit {
            self.stats.hits += 1;
            self.stats.bytes_hit = self.stats.bytes_hit.saturating_add(size);
        } else {
            self.stats.misses += 1;
            self.stats.bytes_miss = self.stats.bytes_miss.saturating_add(size);
            self.stats.peak_bytes = self.stats.peak_bytes.max(self.cache.used_bytes());
        }
    }

    fn finish(mut self) -> BudgetStats {
        let counters = self.cache.counters();
        self.stats.evictions = counters.core.evictions;
        self.stats.oversized_adds = counters.oversized_adds;
        self.stats.final_bytes = self.cache.used_bytes();
        self.stats.final_entries = self.cache.len();
        self.stats.simulation_time_ms =
            u64::try_from(self.elapsed_ns / 1_000_000).unwrap_or(u64::MAX);
        self.stats
    }
}

/// Runs a simulation over every trace file in the configured directory
#[derive(Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    /// Create a new simulation runner with the given configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the simulation and return the result
    pub fn run(&self) -> Result<SimulationResult, LogParseError> {
        let start_time = Instant::now();
        let reader = LogReader::new(&self.config.input_dir);

        let mut caches: Vec<SimulatedCache> = self
            .config
            .budgets
            .iter()
            .map(|&max_bytes| SimulatedCache::new(max_bytes))
            .collect();

        let mut unique_keys = HashSet::new();
        let mut total_requests = 0u64;
        let mut total_bytes = 0u64;

        for request in reader.stream_requests()? {
            let request = request?;
            total_requests += 1;
            total_bytes = total_bytes.saturating_add(request.size);

            for cache in &mut caches {
                cache.process(&request.key, request.size);
            }

            if total_requests % 1_000_000 == 0 {
                println!("  processed {total_requests} requests");
            }
            unique_keys.insert(request.key);
        }

        Ok(SimulationResult {
            stats: caches.into_iter().map(SimulatedCache::finish).collect(),
            total_requests,
            total_bytes,
            unique_objects: unique_keys.len(),
            duration: start_time.elapsed(),
        })
    }
}
