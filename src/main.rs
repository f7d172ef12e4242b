//! Command-line interface for healthid-mockgen
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # Built-in seeds, wall-clock reference time
//! healthid-mockgen generate --output-dir ./out
//!
//! # Reproducible run with a config override, only two collections
//! healthid-mockgen generate -o ./out --now 2025-06-01T00:00:00Z \
//!   --config dataset.yaml --collections identities,campaigns
//! ```
//!
//! ## Verify
//! ```bash
//! # Invariants plus record-by-record comparison against a regeneration
//! healthid-mockgen verify --input-dir ./out --config dataset.yaml
//!
//! # Invariants only, duplicate ids fail the run
//! healthid-mockgen verify -i ./out --invariants-only --strict
//! ```
//!
//! ## Stats
//! ```bash
//! healthid-mockgen stats --now 2025-06-01 --cohort wearable-verified --format yaml
//! ```
//!
//! Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=healthid_generator=debug`.

use clap::{Parser, Subcommand};
use healthid_mockgen::commands::{run_generate, run_stats, run_verify, StatsArgs};
use healthid_mockgen::DatasetOpts;
use healthid_populate_json::PopulateArgs;
use healthid_verify::VerifyArgs;

#[derive(Parser)]
#[command(name = "healthid-mockgen")]
#[command(about = "Deterministic mock dataset generator for HealthID dashboards")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write it to disk
    Generate {
        #[command(flatten)]
        dataset: DatasetOpts,

        #[command(flatten)]
        output: PopulateArgs,
    },

    /// Verify an exported dataset
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },

    /// Print dashboard aggregates
    Stats {
        #[command(flatten)]
        dataset: DatasetOpts,

        #[command(flatten)]
        args: StatsArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { dataset, output } => run_generate(&dataset, &output)?,
        Commands::Verify { args } => {
            run_verify(&args)?;
        }
        Commands::Stats { dataset, args } => run_stats(&dataset, &args)?,
    }
    Ok(())
}
