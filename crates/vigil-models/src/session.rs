//! Recording session identifiers and end-of-session summaries.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a recording session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// The capture source was depleted
    SourceExhausted,
    /// A quit command or process interrupt was observed
    QuitRequested,
}

impl SessionEndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEndReason::SourceExhausted => "source_exhausted",
            SessionEndReason::QuitRequested => "quit_requested",
        }
    }
}

/// Summary of one completed recording session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    /// Session ID
    pub session_id: SessionId,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// Frames written to the output sink
    pub frames_written: u64,
    /// Wall-clock duration of the session, in seconds on the wire
    #[serde(with = "duration_secs")]
    #[schemars(with = "f64")]
    pub duration: Duration,
    /// Output file the session recorded into
    pub output_path: PathBuf,
    /// Why the session ended
    pub end_reason: SessionEndReason,
}

impl SessionSummary {
    /// Realized average frame rate over the whole session.
    ///
    /// Reported at cycle end only; a zero-duration session yields 0.0.
    pub fn realized_fps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.frames_written as f64 / secs
        } else {
            0.0
        }
    }

    /// Absolute deviation of the realized rate from a target rate.
    pub fn rate_deviation(&self, target_fps: f64) -> f64 {
        (self.realized_fps() - target_fps).abs()
    }
}

/// Serialize `Duration` as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(secs.max(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(frames: u64, secs: f64) -> SessionSummary {
        SessionSummary {
            session_id: SessionId::new(),
            started_at: Utc::now(),
            frames_written: frames,
            duration: Duration::from_secs_f64(secs),
            output_path: PathBuf::from("recordings/test.avi"),
            end_reason: SessionEndReason::SourceExhausted,
        }
    }

    #[test]
    fn test_realized_fps() {
        assert_eq!(summary(90, 3.0).realized_fps(), 30.0);
        assert_eq!(summary(0, 0.0).realized_fps(), 0.0);
    }

    #[test]
    fn test_rate_deviation() {
        let s = summary(60, 3.0); // 20 fps
        assert!((s.rate_deviation(30.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let s = summary(90, 3.0);
        let json = serde_json::to_string(&s).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames_written, 90);
        assert_eq!(back.end_reason, SessionEndReason::SourceExhausted);
    }
}
