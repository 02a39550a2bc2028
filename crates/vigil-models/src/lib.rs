//! Shared data models for the Vigil recorder.
//!
//! This crate provides Serde-serializable types for:
//! - Pixel geometry (points, bounding boxes)
//! - Object detections and class names
//! - Recording session identifiers and summaries

pub mod detection;
pub mod geometry;
pub mod session;

// Re-export common types
pub use detection::{class_name, Detection, COCO_CLASSES};
pub use geometry::{BoundingBox, Point};
pub use session::{SessionEndReason, SessionId, SessionSummary};
