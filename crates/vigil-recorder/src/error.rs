//! Recorder error types.

use thiserror::Error;

pub type RecorderResult<T> = Result<T, RecorderError>;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("media error: {0}")]
    Media(#[from] vigil_media::MediaError),

    #[error("zone error: {0}")]
    Zone(#[from] vigil_zones::ZoneError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecorderError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// True if this error came from sink creation failing.
    pub fn is_sink_open_failure(&self) -> bool {
        matches!(
            self,
            RecorderError::Media(vigil_media::MediaError::SinkOpenFailed { .. })
        )
    }
}
