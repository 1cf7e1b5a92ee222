//! Inscroll CLI
//!
//! Replay scripted scroll sessions against the headless host.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inscroll_core::{InfiniteScrollOptions, InfiniteScrollSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;
mod simulate;

use scenario::Scenario;
use simulate::Simulation;

#[derive(Parser)]
#[command(name = "inscroll")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infinite scroll engine CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print every notification
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Default options file (TOML), scenario options win over it
        #[arg(short, long)]
        defaults: Option<PathBuf>,
    },

    /// Print the built-in default options as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate { scenario, defaults } => cmd_simulate(&scenario, defaults.as_deref()),
        Commands::Defaults => cmd_defaults(),
    }
}

fn cmd_simulate(path: &Path, defaults: Option<&Path>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let defaults = match defaults {
        Some(path) => load_options(path)?,
        None => InfiniteScrollOptions::default(),
    };

    let effective = defaults.merge(&scenario.options);
    if let Err(err) = effective.validate() {
        warn!("{}, that direction will never fire", err);
    }

    info!(
        "Replaying {} ({} steps)",
        scenario.display_name(),
        scenario.steps.len()
    );

    let mut sim = Simulation::new(&scenario, &defaults)?;
    if !sim.component().is_listening() {
        warn!("Infinite scroll is not listening, no notifications will be emitted");
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        let fired = sim
            .step(step)
            .with_context(|| format!("Step {} failed", index + 1))?;
        for notification in fired {
            println!("{}", notification);
        }
    }

    let total = sim.notifications().len();
    match sim.stats() {
        Some(stats) => info!(
            "{} notifications ({} events, {} evaluations, {} skipped)",
            total, stats.events, stats.evaluations, stats.skipped
        ),
        None => info!("{} notifications", total),
    }

    Ok(())
}

fn cmd_defaults() -> Result<()> {
    let toml = InfiniteScrollSettings::default()
        .to_options()
        .to_toml_string()
        .context("Failed to serialize default options")?;
    print!("{}", toml);
    Ok(())
}

fn load_options(path: &Path) -> Result<InfiniteScrollOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    InfiniteScrollOptions::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
