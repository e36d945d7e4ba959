//! Glide CLI
//!
//! Replay scroll scenarios against the headless host and inspect track geometry.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;
mod simulate;

use glide_scroll::Config;
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glide scrollbar engine CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON scenario and print every notification as a JSON line
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// TOML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Compute the track geometry of one axis
    Geometry {
        /// Scroll offset in pixels
        #[arg(long, allow_hyphen_values = true)]
        position: f64,

        /// Viewport size in pixels
        #[arg(long)]
        view: f64,

        /// Content size in pixels
        #[arg(long)]
        content: f64,

        /// Smallest track, in percent
        #[arg(long, default_value = "5")]
        min: f64,

        /// Largest track, in percent
        #[arg(long, default_value = "90")]
        max: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for JSON output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate { scenario, settings } => cmd_simulate(scenario, settings),
        Commands::Geometry {
            position,
            view,
            content,
            min,
            max,
        } => cmd_geometry(position, view, content, min, max),
    }
}

fn cmd_simulate(scenario: PathBuf, settings: Option<PathBuf>) -> Result<()> {
    let config = match settings {
        Some(path) => Config::from_path(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Config::default(),
    };

    let scenario = Scenario::from_path(&scenario)
        .with_context(|| format!("Failed to load scenario {}", scenario.display()))?;

    info!("Replaying {} step(s)", scenario.steps.len());
    simulate::run(&scenario, config)
}

fn cmd_geometry(position: f64, view: f64, content: f64, min: f64, max: f64) -> Result<()> {
    let geometry = glide_scroll::calculate(position, view, content, min, max);
    println!("{}", serde_json::to_string(&geometry)?);
    Ok(())
}
