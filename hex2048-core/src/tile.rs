//! Tiles and their wire format

use serde::{Deserialize, Serialize};

use crate::board::Cube;
use crate::error::Result;

/// A numbered tile on the board.
///
/// `previous_pos` and `merged_from` only describe the most recent slide; the
/// renderer uses them to animate and the grid uses `merged_from` to stop a
/// freshly merged tile from merging again in the same slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub curr_pos: Cube,
    pub previous_pos: Option<Cube>,
    pub merged_from: Option<Box<[Tile; 2]>>,
    pub value: u32,
}

impl Tile {
    pub(crate) fn new(position: Cube, value: u32) -> Self {
        Self {
            curr_pos: position,
            previous_pos: None,
            merged_from: None,
            value,
        }
    }

    /// Tile produced by merging `a` into `b`, sitting on `b`'s cell
    pub(crate) fn merged(a: Tile, b: Tile) -> Self {
        Self {
            curr_pos: b.curr_pos,
            previous_pos: None,
            value: a.value.saturating_add(b.value),
            merged_from: Some(Box::new([a, b])),
        }
    }

    pub fn save_position(&mut self) {
        self.previous_pos = Some(self.curr_pos);
    }

    pub fn update_position(&mut self, position: Cube) {
        self.curr_pos = position;
    }

    /// Whether the tile was created by a merge during the latest slide
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    pub fn record(&self) -> TileRecord {
        TileRecord {
            x: self.curr_pos.x,
            y: self.curr_pos.y,
            z: self.curr_pos.z,
            value: self.value,
        }
    }
}

/// Flat `{x, y, z, value}` record exchanged with the spawn service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub value: u32,
}

impl TileRecord {
    pub const fn new(position: Cube, value: u32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            value,
        }
    }

    pub const fn position(&self) -> Cube {
        Cube::new(self.x, self.y, self.z)
    }
}

/// Encode records as a JSON array
pub fn encode_records(records: &[TileRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decode a JSON array of records; `null` decodes as no records
pub fn decode_records(json: &str) -> Result<Vec<TileRecord>> {
    let records: Option<Vec<TileRecord>> = serde_json::from_str(json)?;
    Ok(records.unwrap_or_default())
}
