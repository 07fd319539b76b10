//! Board geometry endpoint

use axum::extract::Path;
use axum::Json;
use hex2048_core::{cell_count, hexagon_coordinates, Direction};
use serde::Serialize;

use super::radius_for_side;
use crate::error::ApiError;
use crate::MAX_SIDE;

#[derive(Serialize)]
pub struct BoardInfo {
    pub radius: u32,
    pub side_length: u32,
    pub cells: usize,
    pub hexes: Vec<[i32; 3]>,
    pub directions: Vec<[i32; 3]>,
    pub direction_names: Vec<&'static str>,
}

/// Get board geometry for a side length
pub async fn get_board(Path(side): Path<u32>) -> Result<Json<BoardInfo>, ApiError> {
    let radius = radius_for_side(side)?;
    let cells = cell_count(radius).ok_or(ApiError::SideTooLarge {
        side,
        max: MAX_SIDE,
    })?;

    Ok(Json(BoardInfo {
        radius,
        side_length: side,
        cells,
        hexes: hexagon_coordinates(radius)
            .into_iter()
            .map(|c| [c.x, c.y, c.z])
            .collect(),
        directions: Direction::ALL
            .iter()
            .map(|d| {
                let o = d.offset();
                [o.x, o.y, o.z]
            })
            .collect(),
        direction_names: Direction::ALL.iter().map(|d| d.token()).collect(),
    }))
}
