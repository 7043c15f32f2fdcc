// Statistics reporting for cache simulation

use crate::models::{BudgetStats, CsvResultRow, SimulationResult};
use std::path::Path;

/// Formats and exports the per-budget results of a simulation
#[derive(Debug)]
pub struct SimulationStats {
    stats: Vec<BudgetStats>,
    total_requests: u64,
    total_bytes: u64,
}

impl SimulationStats {
    /// Create stats from a simulation result
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            stats: result.stats.clone(),
            total_requests: result.total_requests,
            total_bytes: result.total_bytes,
        }
    }

    /// Print a summary report of the simulation results
    pub fn print_summary(&self) {
        println!("\nCache Simulation Summary");
        println!("========================");
        println!("Total requests: {}", self.total_requests);
        println!(
            "Total bytes: {} ({:.2} MB)",
            self.total_bytes,
            self.total_bytes as f64 / (1024.0 * 1024.0)
        );

        println!("\nResults by Budget:");
        println!(
            "{:>14} {:>8} {:>9} {:>10} {:>10} {:>14} {:>10} {:>10}",
            "Budget", "HitRate", "ByteHit%", "Evictions", "Oversized", "PeakBytes", "Entries", "Time(ms)"
        );
        println!("{}", "-".repeat(92));

        for stats in &self.stats {
            println!(
                "{:>14} {:>7.2}% {:>8.2}% {:>10} {:>10} {:>14} {:>10} {:>10}",
                format_budget(stats.max_bytes),
                stats.hit_rate() * 100.0,
                stats.byte_hit_rate() * 100.0,
                stats.evictions,
                stats.oversized_adds,
                stats.peak_bytes,
                stats.final_entries,
                stats.simulation_time_ms
            );
        }
    }

    /// Export results to a CSV file, one row per budget
    pub fn export_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for stats in &self.stats {
            writer.serialize(CsvResultRow::from(stats))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_budget(max_bytes: u64) -> String {
    if max_bytes == 0 {
        "unbounded".to_string()
    } else {
        max_bytes.to_string()
    }
}
