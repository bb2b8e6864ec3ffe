//! Tracking layer error types
//!
//! All errors that can occur while building or buffering change records
//! are defined here. We use `thiserror` for ergonomic error definition.

use thiserror::Error;

use crate::track::record::ChangeState;
use crate::track::types::{EntityKey, InvalidKeyError};

/// Result type for tracking operations.
pub type TrackResult<T> = Result<T, TrackError>;

/// Errors that can occur while building or buffering change records.
///
/// These indicate a bug in the upstream persistence pipeline, not a
/// transient condition; callers are expected to fail fast, not retry.
#[derive(Debug, Error)]
pub enum TrackError {
    /// invalid entity key supplied by the capture source
    #[error("invalid entity key: {0}")]
    InvalidKey(#[from] InvalidKeyError),

    /// a removed record arrived carrying row data
    #[error("removed record cannot carry row data: key={0}")]
    RemovedWithData(EntityKey),

    /// a created/changed record arrived without row data
    #[error("{state} record requires row data: key={key}")]
    MissingData { key: EntityKey, state: ChangeState },
}
