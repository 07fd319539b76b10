//! Error types for the engine

/// Errors surfaced by parsing and encoding helpers.
///
/// Grid mutations never fail; invalid spawns are ignored instead.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Tile encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
