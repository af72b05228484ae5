//! Error types for scene construction and loading.
//!
//! Intersection and shading never fail; these errors only come from
//! building, validating or reading a scene.

use thiserror::Error;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid geometry in {name}: {reason}")]
    InvalidGeometry { name: String, reason: String },

    #[error("Unknown shading model: {0}")]
    UnknownShadingModel(String),
}

impl SceneError {
    pub(crate) fn invalid_geometry(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
