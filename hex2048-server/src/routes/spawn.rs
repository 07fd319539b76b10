//! Spawn endpoint
//!
//! Receives the board's live tiles and answers with the tiles to add, or
//! `null` when the board has no free cell.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use hex2048_core::{decode_records, TileRecord};
use serde::Deserialize;

use super::radius_for_side;
use crate::error::ApiError;
use crate::state::ServerState;

/// Live tiles, either as an array or as the JSON string a client encoded
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SpawnRequest {
    Records(Vec<TileRecord>),
    Encoded(String),
}

impl SpawnRequest {
    fn into_records(self) -> Result<Vec<TileRecord>, ApiError> {
        match self {
            SpawnRequest::Records(records) => Ok(records),
            SpawnRequest::Encoded(json) => Ok(decode_records(&json)?),
        }
    }
}

/// Grant new tiles for a board of the given side length
pub async fn spawn_tiles(
    State(state): State<Arc<ServerState>>,
    Path(side): Path<u32>,
    Json(req): Json<SpawnRequest>,
) -> Result<Json<Option<Vec<TileRecord>>>, ApiError> {
    let radius = radius_for_side(side)?;
    let occupied = req.into_records()?;

    if let Some(&record) = occupied.iter().find(|r| !r.position().is_within(radius)) {
        return Err(ApiError::OffBoard { record, side });
    }

    let granted = state.grant(radius, &occupied);
    tracing::debug!(
        side,
        occupied = occupied.len(),
        granted = granted.as_ref().map_or(0, Vec::len),
        "spawn request"
    );

    Ok(Json(granted))
}
