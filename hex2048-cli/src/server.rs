//! Serve command - start the spawn server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to hex2048-server crate)
//! - Level 4: configuration validation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hex2048_core::SpawnRules;
use hex2048_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "13337")]
    pub port: u16,

    /// Directory containing static files for a browser front end
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, seed: Option<u64>, rules: SpawnRules) -> Result<()> {
    let config = configure_server(&args, seed, rules)?;

    tracing::info!("Starting hex2048 spawn server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs, seed: Option<u64>, rules: SpawnRules) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;
    rules.validate()?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        seed,
        rules,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Only the API will be served.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
