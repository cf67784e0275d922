//! Forecast CLI - Command Line Scenario Projections
//!
//! This is the operational entry point for the scenario forecaster.
//!
//! # Commands
//!
//! - `forecast run --input <file>` - Project scenarios and report indicators
//! - `forecast check` - Validate the engine configuration
//!
//! # Architecture
//!
//! As the service layer, this crate only wires inputs, configuration and
//! output formats around `forecast_engine`.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;
mod output;

pub use error::{CliError, Result};

/// Scenario forecaster CLI
#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = forecast_engine::config::DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project scenarios from an input file
    Run {
        /// Path to the scenario file (TOML/JSON)
        #[arg(short, long)]
        input: String,

        /// Scenario kind to run (optimistic, neutral, pessimistic)
        #[arg(short, long, conflicts_with = "all")]
        kind: Option<String>,

        /// Run all scenario kinds; same as omitting --kind
        #[arg(short, long)]
        all: bool,

        /// Projection horizon in years
        #[arg(long)]
        horizon: Option<usize>,

        /// Metric plotted by the chart bars (revenue, margin, profit)
        #[arg(short, long)]
        metric: Option<String>,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check configuration and run the reference scenario
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; logs go to stderr so stdout carries only results
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let engine_config = config::load(&cli.config)?;

    match cli.command {
        Commands::Run {
            input,
            kind,
            all,
            horizon,
            metric,
            format,
            output,
        } => {
            let options = commands::run::RunOptions {
                input,
                kind,
                all,
                horizon,
                metric,
                format,
                output,
            };
            commands::run::run(&options, &engine_config)?
        }
        Commands::Check => commands::check::run(&engine_config)?,
    }

    Ok(())
}
