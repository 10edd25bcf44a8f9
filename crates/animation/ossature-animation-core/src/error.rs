//! Error types for animation construction, loading and lookup.
//!
//! Playback itself never fails; only building timelines, parsing animation
//! JSON and resolving animations by name can.

use serde::{Deserialize, Serialize};

/// Errors raised while building or loading animations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Two keyframes in one timeline share a time
    #[error("Duplicate keyframe at tick {time}")]
    DuplicateKeyFrame { time: u32 },

    /// Animation not present in the registry
    #[error("Animation not found: {name}")]
    AnimationNotFound { name: String },

    /// Two bones of one skeleton share a name
    #[error("Duplicate bone name: {name}")]
    DuplicateBone { name: String },

    /// Structurally invalid animation data
    #[error("Invalid animation: {reason}")]
    InvalidAnimation { reason: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for animation operations
pub type Result<T> = core::result::Result<T, AnimationError>;
