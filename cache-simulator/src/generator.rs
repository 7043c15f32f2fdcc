//! Synthetic trace generation
//!
//! Writes request traces with a popular/regular split: a configurable share of
//! the traffic goes to a configurable share of the objects (80/20 by default).
//! Each object keeps one size for the whole trace, so repeated requests for a
//! key ask for the same number of bytes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Parameters for generating a trace
#[derive(Debug, Clone)]
pub struct TrafficLogConfig {
    /// Total number of requests
    pub requests: u64,
    /// Requests written to each output file
    pub requests_per_file: u64,
    /// Number of unique objects
    pub unique_objects: u32,
    /// Percentage of traffic going to popular objects
    pub popular_traffic_percent: u8,
    /// Percentage of objects considered popular
    pub popular_objects_percent: u8,
    /// Minimum object size in bytes
    pub min_size: u64,
    /// Maximum object size in bytes
    pub max_size: u64,
    /// Output directory
    pub output_dir: PathBuf,
    /// Fixed RNG seed for reproducible traces
    pub seed: Option<u64>,
}

impl Default for TrafficLogConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            requests_per_file: 50_000,
            unique_objects: 10_000,
            popular_traffic_percent: 80,
            popular_objects_percent: 20,
            min_size: 1024,        // 1KB
            max_size: 1024 * 1024, // 1MB
            output_dir: PathBuf::from("traffic_logs"),
            seed: None,
        }
    }
}

/// Generator for synthetic traces
#[derive(Debug)]
pub struct TrafficLogGenerator {
    config: TrafficLogConfig,
}

impl TrafficLogGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TrafficLogConfig) -> Self {
        Self { config }
    }

    /// Generate the trace, returning the paths of the files written
    pub fn generate(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let config = &self.config;
        if config.unique_objects == 0 {
            return Err("unique_objects must be at least 1".into());
        }
        if config.min_size > config.max_size {
            return Err("min_size must not exceed max_size".into());
        }

        fs::create_dir_all(&config.output_dir)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let popular_objects = ((config.unique_objects as u64
            * config.popular_objects_percent.min(100) as u64)
            / 100)
            .max(1) as u32;
        let popular_probability = config.popular_traffic_percent.min(100) as f64 / 100.0;

        let sizes: Vec<u64> = (0..config.unique_objects)
            .map(|_| rng.gen_range(config.min_size..=config.max_size))
            .collect();

        println!("Generating trace with the following parameters:");
        println!("  Requests: {}", config.requests);
        println!("  Unique objects: {}", config.unique_objects);
        println!(
            "  Traffic distribution: {}% from {}% of objects",
            config.popular_traffic_percent, config.popular_objects_percent
        );
        println!(
            "  Size range: {} - {} bytes",
            config.min_size, config.max_size
        );
        println!("  Output directory: {}", config.output_dir.display());

        let mut timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let per_file = config.requests_per_file.max(1);
        let mut written = 0u64;
        let mut files = Vec::new();

        while written < config.requests {
            let path = config
                .output_dir
                .join(format!("traffic_{:03}.csv", files.len()));
            let mut writer = BufWriter::new(File::create(&path)?);
            writeln!(writer, "timestamp,key,size")?;

            let in_this_file = per_file.min(config.requests - written);
            for _ in 0..in_this_file {
                let object = if rng.gen::<f64>() < popular_probability
                    || popular_objects == config.unique_objects
                {
                    rng.gen_range(0..popular_objects)
                } else {
                    rng.gen_range(popular_objects..config.unique_objects)
                };
                let size = sizes[object as usize];
                writeln!(writer, "{timestamp},obj_{object},{size}")?;
                timestamp += rng.gen_range(0..=2);
            }
            writer.flush()?;

            written += in_this_file;
            println!("  {}: {written}/{} requests", path.display(), config.requests);
            files.push(path);
        }

        println!("Trace generation complete");
        Ok(files)
    }
}
