use cache_simulator::generator::{TrafficLogConfig, TrafficLogGenerator};
use cache_simulator::models::SimulationConfig;
use cache_simulator::runner::SimulationRunner;
use cache_simulator::stats::SimulationStats;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Byte-budgeted LRU cache simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay traces through the cache at one or more byte budgets
    Simulate {
        /// Directory containing trace files (.csv, .log or .txt)
        #[arg(short, long, value_name = "DIR")]
        input_dir: PathBuf,

        /// Byte budgets to simulate, comma separated; 0 means unbounded
        /// Example: 1048576,8388608,67108864
        #[arg(short, long, value_name = "BYTES", num_args = 1.., value_delimiter = ',', default_value = "104857600")]
        budgets: Vec<u64>,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Generate a synthetic trace
    Generate {
        /// Total number of requests
        #[arg(long, default_value = "100000")]
        requests: u64,

        /// Requests per output file
        #[arg(long, default_value = "50000")]
        requests_per_file: u64,

        /// Number of unique objects
        #[arg(long, default_value = "10000")]
        objects: u32,

        /// Percentage of traffic from popular objects
        #[arg(long, default_value = "80")]
        popular_traffic: u8,

        /// Percentage of objects that are popular
        #[arg(long, default_value = "20")]
        popular_objects: u8,

        /// Minimum object size in KB
        #[arg(long, default_value = "1")]
        min_size: u64,

        /// Maximum object size in KB
        #[arg(long, default_value = "1024")]
        max_size: u64,

        /// RNG seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = "traffic_logs")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            requests,
            requests_per_file,
            objects,
            popular_traffic,
            popular_objects,
            min_size,
            max_size,
            seed,
            output,
        } => {
            let config = TrafficLogConfig {
                requests,
                requests_per_file,
                unique_objects: objects,
                popular_traffic_percent: popular_traffic,
                popular_objects_percent: popular_objects,
                min_size: min_size * 1024,
                max_size: max_size * 1024,
                output_dir: output,
                seed,
            };
            TrafficLogGenerator::new(config).generate()?;
            Ok(())
        }

        Commands::Simulate {
            input_dir,
            budgets,
            output_csv,
        } => run_simulation(input_dir, budgets, output_csv),
    }
}

/// Run the simulation and report its results
fn run_simulation(
    input_dir: PathBuf,
    budgets: Vec<u64>,
    output_csv: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cache Simulation");
    println!("===============");
    println!("Input directory: {}", input_dir.display());
    println!("Budgets (bytes): {budgets:?}");
    println!();

    let runner = SimulationRunner::new(SimulationConfig { input_dir, budgets });
    let result = match runner.run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error running simulation: {e}");
            return Err(e.into());
        }
    };

    println!("\nSimulation completed in {:.2?}", result.duration);
    println!("Unique objects: {}", result.unique_objects);

    let stats = SimulationStats::from_result(&result);
    stats.print_summary();

    if let Some(csv_path) = output_csv {
        if let Err(e) = stats.export_csv(&csv_path) {
            eprintln!("Failed to export CSV: {e}");
            return Err(e.into());
        }
        println!("\nResults exported to: {}", csv_path.display());
    }

    Ok(())
}
