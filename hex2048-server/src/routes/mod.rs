//! HTTP route handlers

pub mod board;
pub mod spawn;
pub mod status;

use crate::error::ApiError;
use crate::MAX_SIDE;

/// Board radius for a requested side length within `1..=MAX_SIDE`
fn radius_for_side(side: u32) -> Result<u32, ApiError> {
    if side > MAX_SIDE {
        return Err(ApiError::SideTooLarge {
            side,
            max: MAX_SIDE,
        });
    }
    side.checked_sub(1).ok_or(ApiError::ZeroSide)
}
