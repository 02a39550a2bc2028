//! Zone error types.

use thiserror::Error;

pub type ZoneResult<T> = Result<T, ZoneError>;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("invalid zone definition: expected {expected} points, got {got}")]
    InvalidDefinition { expected: usize, got: usize },
}

impl ZoneError {
    /// Create an invalid-definition error for a point count.
    pub fn invalid_definition(got: usize) -> Self {
        Self::InvalidDefinition {
            expected: crate::zone::ZONE_POINT_COUNT,
            got,
        }
    }
}
