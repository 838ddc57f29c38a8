//! symgrad command-line driver

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use infra_config::Settings;
use tracing::debug;

use crate::error::Result;

#[derive(Parser)]
#[command(name = "symgrad")]
#[command(about = "Symbolic differentiation engine - build, inspect and train expression graphs")]
#[command(version)]
struct Cli {
    /// Configuration file, layered over config/ and under SYMGRAD_* variables
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train logistic regression on synthetic data
    Fit(commands::fit::FitArgs),

    /// Print demo expressions with their values and gradients
    Inspect,

    /// Validate configuration and report the runtime environment
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    logging::init(&settings.logging.level);
    rayon::ThreadPoolBuilder::new()
        .num_threads(settings.training.thread_pool_size)
        .build_global()?;
    debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Fit(args) => commands::fit::run(&args, settings),
        Commands::Inspect => commands::inspect::run(),
        Commands::Check => commands::check::run(&settings),
    }
}
