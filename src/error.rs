//! Error types for the canvas engine
//!
//! Geometry and gesture code never fails: malformed inputs degrade to safe
//! defaults. These errors cover the fallible edges only (settings files,
//! parsing handle names coming from markup).

use thiserror::Error;

/// Errors that can occur at the canvas engine's boundaries
#[derive(Error, Debug)]
pub enum CanvasError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Resize handle name outside `n`, `s`, `e`, `w`, `ne`, `nw`, `se`, `sw`
    #[error("Unknown resize direction: {0:?}")]
    UnknownResizeDirection(String),

    /// Settings values that would break the geometry invariants
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// No settings location is available on this platform
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

