//! hex2048 Core - Grid engine for hexagonal 2048
//!
//! This crate provides the core game logic:
//! - Board geometry (hex grid with cube coordinates)
//! - The six slide directions and their traversal orders
//! - Tiles with per-slide history
//! - Slide/merge resolution and win/loss detection
//! - Tile spawning policy and the game session loop

pub mod board;
pub mod direction;
pub mod error;
pub mod grid;
pub mod session;
pub mod spawn;
pub mod tile;

// Re-exports for convenient access
pub use board::{cell_count, hexagon_coordinates, Axis, Cube};
pub use direction::Direction;
pub use error::GridError;
pub use grid::{Grid, Outcome, SlideSummary, WIN_VALUE};
pub use session::{Game, GameConfig, LocalSource, TileSource, Turn};
pub use spawn::{spawn_tiles, SpawnRules};
pub use tile::{decode_records, encode_records, Tile, TileRecord};
