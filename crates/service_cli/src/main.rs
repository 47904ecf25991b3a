//! Dalitz CLI - operational entry point for the three-body decay sampler
//!
//! # Commands
//!
//! - `dalitz generate` - Generate accepted (X, Y) points
//! - `dalitz check` - Validate the resolved configuration
//! - `dalitz inspect <file>` - Summarise a generated dataset

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dalitz_engine::DatasetFormat;
use service_cli::commands;
use service_cli::config::{build_config, CliArgs};
use service_cli::CliError;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Rejection sampler for three-body decay Dalitz points
#[derive(Parser)]
#[command(name = "dalitz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by the commands that resolve a run configuration.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Number of accepted events to write
    #[arg(short = 'n', long)]
    events: Option<u64>,

    /// Base seed of the random source
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dataset path (replaced once the run completes)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dataset format (csv, jsonl)
    #[arg(short, long)]
    format: Option<String>,

    /// Worker streams, 0 for one per CPU
    #[arg(short, long)]
    workers: Option<usize>,

    /// Give up on an event after this many candidates
    #[arg(long)]
    max_attempts: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate accepted (X, Y) points into a dataset
    Generate(RunArgs),

    /// Validate the resolved configuration without generating
    Check(RunArgs),

    /// Summarise an existing dataset
    Inspect {
        /// Dataset to read
        input: PathBuf,

        /// Dataset format (csv, jsonl); guessed from the extension if omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

impl Cli {
    fn config_args(&self, run: &RunArgs) -> CliArgs {
        let log_level = match (&self.log_level, self.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        };

        CliArgs {
            config_file: self.config.clone(),
            events: run.events,
            seed: run.seed,
            output: run.output.clone(),
            format: run.format.clone(),
            workers: run.workers,
            max_attempts: run.max_attempts,
            log_level,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(run) => {
            let config = build_config(&cli.config_args(run)).context("resolving configuration")?;
            init_tracing(config.log_level.as_filter_str());
            info!("Dalitz generator v{}", service_cli::VERSION);

            commands::generate::run(&config)
                .with_context(|| format!("generating {}", config.output.display()))?;
        }
        Commands::Check(run) => {
            let config = build_config(&cli.config_args(run)).context("resolving configuration")?;
            init_tracing(config.log_level.as_filter_str());

            commands::check::run(&config)?;
        }
        Commands::Inspect { input, format } => {
            let config = build_config(&cli.config_args(&RunArgs::default()))
                .context("resolving configuration")?;
            init_tracing(config.log_level.as_filter_str());

            let format = format
                .as_deref()
                .map(str::parse::<DatasetFormat>)
                .transpose()
                .map_err(CliError::InvalidArgument)?;
            commands::inspect::run(input, format)
                .with_context(|| format!("inspecting {}", input.display()))?;
        }
    }

    Ok(())
}
