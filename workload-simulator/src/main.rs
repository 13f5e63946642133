use clap::{Args as ClapArgs, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use workload_simulator::generator::{WorkloadConfig, WorkloadGenerator};
use workload_simulator::input;
use workload_simulator::models::{FibRunConfig, RangeRunConfig, Strategy, Workload};
use workload_simulator::runner;
use workload_simulator::stats;

/// Range-query and memoization workload simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Parameters of a randomly generated range workload
#[derive(ClapArgs, Debug, Clone)]
struct GenerateParams {
    /// Number of array elements
    #[arg(long, default_value = "100000")]
    array_len: usize,

    /// Number of operations
    #[arg(long, default_value = "50000")]
    queries: usize,

    /// Fraction of operations that are range queries (the rest are point updates)
    #[arg(long, default_value = "0.7")]
    range_ratio: f64,

    /// Largest array element or update value
    #[arg(long, default_value = "1000")]
    max_value: u64,

    /// Seed for a reproducible workload
    #[arg(long)]
    seed: Option<u64>,
}

impl From<GenerateParams> for WorkloadConfig {
    fn from(params: GenerateParams) -> Self {
        WorkloadConfig {
            array_len: params.array_len,
            queries: params.queries,
            range_ratio: params.range_ratio,
            max_value: params.max_value,
            seed: params.seed,
        }
    }
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a random range workload and write it to CSV
    Generate {
        #[command(flatten)]
        params: GenerateParams,

        /// Operations file; the array is written next to it as <stem>.array.csv
        #[arg(short, long, default_value = "workload.csv")]
        output: PathBuf,
    },

    /// Run a range workload through each strategy and compare
    Range {
        /// Workload operations file written by `generate` (generated in memory if absent)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        params: GenerateParams,

        /// Interval cache capacity (number of cached sums)
        #[arg(short, long, default_value = "1000")]
        capacity: NonZeroUsize,

        /// Strategies to run (uncached, overlap, clear-all, lru)
        /// If not provided, all strategies will be used
        #[arg(short, long, value_name = "STRATEGIES", num_args = 1.., value_delimiter = ',')]
        strategies: Option<Vec<String>>,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Compare Fibonacci memoized in an LRU map against a splay tree
    Fib {
        /// Largest n measured
        #[arg(long, default_value = "950")]
        max_n: u64,

        /// Distance between measured values of n
        #[arg(long, default_value = "50")]
        step: u64,

        /// Timed repetitions per n
        #[arg(long, default_value = "10")]
        repeats: u32,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Generate { params, output } => {
            let workload = WorkloadGenerator::new(params.into())?.generate();
            input::write_workload(&workload, &output)?;
            println!(
                "Wrote {} operations ({} range, {} update) over {} elements to {}",
                workload.operations.len(),
                workload.range_queries(),
                workload.point_updates(),
                workload.array.len(),
                output.display()
            );
            println!("Array written to {}", input::array_path(&output).display());
            Ok(())
        }

        Commands::Range {
            input,
            params,
            capacity,
            strategies,
            output_csv,
        } => {
            let workload = load_workload(input, params)?;
            let config = RangeRunConfig {
                capacity,
                strategies: parse_strategies(strategies),
            };
            let result = runner::run_range(&workload, &config)?;
            stats::print_range_summary(&result);
            println!("\nAll strategies returned identical answers.");

            if let Some(path) = output_csv {
                stats::export_range_csv(&result, &path)?;
                println!("Results exported to: {}", path.display());
            }
            Ok(())
        }

        Commands::Fib {
            max_n,
            step,
            repeats,
            output_csv,
        } => {
            let config = FibRunConfig {
                max_n,
                step,
                repeats,
            };
            let samples = runner::run_fib(&config)?;
            stats::print_fib_summary(&samples);

            if let Some(path) = output_csv {
                stats::export_fib_csv(&samples, &path)?;
                println!("Results exported to: {}", path.display());
            }
            Ok(())
        }
    }
}

/// Read the workload from `source`, or generate one from `params`
fn load_workload(
    source: Option<PathBuf>,
    params: GenerateParams,
) -> Result<Workload, input::WorkloadError> {
    match source {
        Some(path) => {
            info!(path = %path.display(), "reading workload");
            input::read_workload(&path)
        }
        None => Ok(WorkloadGenerator::new(params.into())?.generate()),
    }
}

/// Parse strategy names, falling back to all strategies
fn parse_strategies(names: Option<Vec<String>>) -> Vec<Strategy> {
    let Some(names) = names else {
        return Strategy::all();
    };

    let mut selected = Vec::new();
    for name in names {
        match name.parse::<Strategy>() {
            Ok(strategy) if !selected.contains(&strategy) => selected.push(strategy),
            Ok(_) => {}
            Err(e) => warn!("{e}, skipping"),
        }
    }

    if selected.is_empty() {
        warn!("no valid strategies selected, using all available strategies");
        return Strategy::all();
    }
    selected
}
