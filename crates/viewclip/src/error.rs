//! Error types for the scene and its window.

use thiserror::Error;
use viewclip_curve::CurveError;

use crate::ObjectId;

/// Errors that can occur while building or editing a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Window size is zero, negative or not finite.
    #[error("degenerate window size {0}")]
    DegenerateWindow(f64),

    /// Scale factor is zero, negative or not finite.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),

    /// No object with this id.
    #[error("unknown object {0:?}")]
    UnknownObject(ObjectId),

    /// An object with this name already exists.
    #[error("an object named {0:?} already exists")]
    DuplicateName(String),

    /// Control points or faces do not describe a valid object.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Pipeline settings out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings could not be parsed.
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Curve or surface evaluation failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
