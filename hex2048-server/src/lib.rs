//! hex2048 Server - HTTP spawn service
//!
//! This crate provides the web backend:
//! - Spawn API granting new tiles after every move
//! - Board geometry for clients drawing the grid
//! - Static file serving for a browser front end
//! - Clients speaking the spawn API, over the network or in-process

mod client;
mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use hex2048_core::SpawnRules;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use client::{HttpSource, RouterSource};
pub use error::ApiError;
pub use routes::spawn::SpawnRequest;
pub use state::ServerState;

/// Largest side length the API serves
pub const MAX_SIDE: u32 = 100;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    pub rules: SpawnRules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 13337,
            static_dir: "static".to_string(),
            seed: None,
            rules: SpawnRules::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry
        .route("/api/board/:side", get(routes::board::get_board))
        // Spawn API
        .route("/api/spawn/:side", post(routes::spawn::spawn_tiles))
        // Shared state
        .with_state(state)
        // Browser clients post from another origin
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Build the state a router needs from its configuration
pub fn create_state(config: &ServerConfig) -> anyhow::Result<Arc<ServerState>> {
    config.rules.validate()?;
    Ok(Arc::new(ServerState::new(config.rules.clone(), config.seed)))
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("hex2048 spawn server starting on http://0.0.0.0:{}", config.port);
    serve(listener, &config).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: tokio::net::TcpListener, config: &ServerConfig) -> anyhow::Result<()> {
    let state = create_state(config)?;
    let router = create_router(config, state);

    tracing::info!("Static files served from: {}", config.static_dir);
    axum::serve(listener, router).await?;

    Ok(())
}
