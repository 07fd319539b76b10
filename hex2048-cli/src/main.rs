//! hex2048 CLI - Command-line interface
//!
//! Commands:
//! - play: Play interactively in the terminal
//! - auto: Self-play many seeded games with random moves
//! - serve: Start the spawn server

mod auto;
mod play;
mod render;
mod server;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hex2048_core::SpawnRules;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hex2048")]
#[command(about = "Hexagonal 2048 in the terminal")]
struct Cli {
    /// Random seed for reproducible spawns
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file overriding the spawn rules
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game interactively
    Play(play::PlayArgs),
    /// Self-play games with random moves and report results
    Auto(auto::AutoArgs),
    /// Start the spawn server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so the board owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed, rules),
        Commands::Auto(args) => auto::run(args, cli.seed, rules),
        Commands::Serve(args) => server::run(args, cli.seed, rules),
    }
}

fn load_rules(path: Option<&Path>) -> Result<SpawnRules> {
    match path {
        Some(path) => SpawnRules::load(path)
            .with_context(|| format!("Failed to load spawn rules: {}", path.display())),
        None => Ok(SpawnRules::default()),
    }
}
