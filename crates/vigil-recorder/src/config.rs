//! Recorder configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Recorder configuration.
///
/// Passed into the orchestrator at construction; there is no process-wide
/// mutable settings object.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Pause between recording sessions
    pub restart_interval: Duration,
    /// How often recordings are archived into dated folders
    pub archive_interval: Duration,
    /// Flat output area for session files
    pub output_dir: PathBuf,
    /// Detection class IDs evaluated against zones; empty allows all
    pub allowed_classes: Vec<u32>,
    /// Target recording frame rate
    pub target_fps: f64,
    /// Output file extension (with the dot)
    pub extension: String,
    /// Device label embedded in output file names
    pub device_label: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            restart_interval: Duration::from_secs(15 * 60),
            archive_interval: Duration::from_secs(60 * 60),
            output_dir: PathBuf::from("recordings"),
            allowed_classes: vec![0, 2], // person, car
            target_fps: 30.0,
            extension: ".avi".to_string(),
            device_label: "camera-01".to_string(),
        }
    }
}

impl RecorderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            restart_interval: Duration::from_secs(
                std::env::var("VIGIL_RESTART_INTERVAL_MINS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(|mins| mins * 60)
                    .unwrap_or(defaults.restart_interval.as_secs()),
            ),
            archive_interval: Duration::from_secs(
                std::env::var("VIGIL_ARCHIVE_INTERVAL_HOURS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(|hours| hours * 3600)
                    .unwrap_or(defaults.archive_interval.as_secs()),
            ),
            output_dir: std::env::var("VIGIL_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            allowed_classes: std::env::var("VIGIL_DETECTION_CLASSES")
                .ok()
                .map(|s| parse_class_list(&s))
                .unwrap_or(defaults.allowed_classes),
            target_fps: std::env::var("VIGIL_TARGET_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.target_fps),
            extension: std::env::var("VIGIL_VIDEO_EXTENSION").unwrap_or(defaults.extension),
            device_label: std::env::var("VIGIL_DEVICE_LABEL").unwrap_or(defaults.device_label),
        }
    }

    /// True if detections of this class participate in zone evaluation.
    ///
    /// An empty allow-list admits every class.
    pub fn is_class_allowed(&self, class_id: u32) -> bool {
        self.allowed_classes.is_empty() || self.allowed_classes.contains(&class_id)
    }
}

/// Parse a comma-separated class list, ignoring malformed entries.
fn parse_class_list(s: &str) -> Vec<u32> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecorderConfig::default();
        assert_eq!(config.target_fps, 30.0);
        assert_eq!(config.extension, ".avi");
        assert_eq!(config.allowed_classes, vec![0, 2]);
    }

    #[test]
    fn test_parse_class_list() {
        assert_eq!(parse_class_list("0,2"), vec![0, 2]);
        assert_eq!(parse_class_list(" 1 , 3 ,bad, 5"), vec![1, 3, 5]);
        assert!(parse_class_list("").is_empty());
    }

    #[test]
    fn test_class_allow_list() {
        let mut config = RecorderConfig::default();
        assert!(config.is_class_allowed(0));
        assert!(!config.is_class_allowed(7));

        config.allowed_classes.clear();
        assert!(config.is_class_allowed(7));
    }
}
