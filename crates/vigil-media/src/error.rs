//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur at the media collaborator boundary.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The capture source is depleted. Terminal for the current session,
    /// not fatal for the process.
    #[error("capture source exhausted")]
    CaptureExhausted,

    #[error("failed to open output sink {path}: {message}")]
    SinkOpenFailed { path: PathBuf, message: String },

    #[error("output sink is closed")]
    SinkClosed,

    #[error("detection failed: {0}")]
    DetectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a sink-open failure error.
    pub fn sink_open_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SinkOpenFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// True if this error means the capture source ran out of frames.
    pub fn is_capture_exhausted(&self) -> bool {
        matches!(self, MediaError::CaptureExhausted)
    }
}
