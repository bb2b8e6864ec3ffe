//! Engine error types.

use thiserror::Error;

use crate::engine::registry::UnitId;
use crate::track::TrackError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// tracking layer error surfaced through the capture hook
    #[error("tracking error: {0}")]
    Track(#[from] TrackError),

    /// the addressed unit is not open in the registry
    #[error("unit not found: {0}")]
    UnitNotFound(UnitId),
}
