//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hex2048_core::{GridError, TileRecord};
use serde_json::json;

/// Rejections for malformed spawn and board requests
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Side length must be at least 1")]
    ZeroSide,

    #[error("Side length {side} is larger than {max}")]
    SideTooLarge { side: u32, max: u32 },

    #[error("Tile ({}, {}, {}) is not on a board of side {side}", .record.x, .record.y, .record.z)]
    OffBoard { record: TileRecord, side: u32 },

    #[error("Malformed tile list: {0}")]
    Malformed(#[from] GridError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {self}");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
