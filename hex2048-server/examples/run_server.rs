//! Example to run the hex2048 spawn server standalone
//!
//! Run with: cargo run -p hex2048-server --example run_server

use hex2048_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        seed: Some(2048),
        ..Default::default()
    };

    println!("Starting hex2048 spawn server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Spawn endpoint: http://localhost:{}/api/spawn/<side>", config.port);

    run_server(config).await
}
