// Data models for cache simulation

use recency_cache::ByteSize;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Represents a single cache request
#[derive(Debug, Clone)]
pub struct Request {
    /// Timestamp of the request
    pub timestamp: SystemTime,
    /// Cache key
    pub key: String,
    /// Size of the object in bytes
    pub size: u64,
}

impl Request {
    /// Create a new request
    pub fn new(timestamp: SystemTime, key: String, size: u64) -> Self {
        Self {
            timestamp,
            key,
            size,
        }
    }
}

/// Stand-in for a cached object: only its size is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSize(pub u64);

impl ByteSize for ObjectSize {
    fn byte_size(&self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Directory containing trace files
    pub input_dir: PathBuf,
    /// Byte budgets to simulate, one cache per budget
    pub budgets: Vec<u64>,
}

/// Outcome of replaying a trace through one cache
#[derive(Debug, Clone, Default)]
pub struct BudgetStats {
    /// Configured byte budget (0 = unbounded)
    pub max_bytes: u64,
    pub hits: u64,
    pub misses: u64,
    pub bytes_hit: u64,
    pub bytes_miss: u64,
    pub evictions: u64,
    /// Adds whose own charge exceeded the budget
    pub oversized_adds: u64,
    /// Highest `used_bytes` observed after any add
    pub peak_bytes: u64,
    pub final_bytes: u64,
    pub final_entries: usize,
    /// Wall time spent inside cache calls
    pub simulation_time_ms: u64,
}

impl BudgetStats {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            ..Default::default()
        }
    }

    /// Fraction of requests served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of requested bytes served from the cache
    pub fn byte_hit_rate(&self) -> f64 {
        let total = self.bytes_hit.saturating_add(self.bytes_miss);
        if total == 0 {
            0.0
        } else {
            self.bytes_hit as f64 / total as f64
        }
    }
}

/// Results of a complete simulation
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Stats per budget, in the order the budgets were given
    pub stats: Vec<BudgetStats>,
    pub total_requests: u64,
    pub total_bytes: u64,
    pub unique_objects: usize,
    pub duration: Duration,
}

/// One row of the exported results file
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub max_bytes: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub byte_hit_rate: f64,
    pub bytes_hit: u64,
    pub bytes_miss: u64,
    pub evictions: u64,
    pub oversized_adds: u64,
    pub peak_bytes: u64,
    pub final_bytes: u64,
    pub final_entries: usize,
    pub simulation_time_ms: u64,
}

impl From<&BudgetStats> for CsvResultRow {
    fn from(stats: &BudgetStats) -> Self {
        Self {
            max_bytes: stats.max_bytes,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            byte_hit_rate: stats.byte_hit_rate(),
            bytes_hit: stats.bytes_hit,
            bytes_miss: stats.bytes_miss,
            evictions: stats.evictions,
            oversized_adds: stats.oversized_adds,
            peak_bytes: stats.peak_bytes,
            final_bytes: stats.final_bytes,
            final_entries: stats.final_entries,
            simulation_time_ms: stats.simulation_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_on_empty_stats() {
        let stats = BudgetStats::new(1024);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.byte_hit_rate(), 0.0);
    }

    #[test]
    fn test_rates() {
        let stats = BudgetStats {
            hits: 3,
            misses: 1,
            bytes_hit: 100,
            bytes_miss: 300,
            ..BudgetStats::new(1024)
        };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.byte_hit_rate(), 0.25);
    }

    #[test]
    fn test_object_size_reports_its_size() {
        assert_eq!(ObjectSize(4096).byte_size(), 4096);
    }
}
