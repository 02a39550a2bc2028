//! Overlay composition plan.
//!
//! The core computes what the composed frame should show; turning the plan
//! into pixels is the encode/display collaborator's job.

use serde::{Deserialize, Serialize};
use vigil_models::Detection;
use vigil_zones::ZoneSnapshot;

/// Everything the sink needs to compose a frame's overlay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayPlan {
    /// Every defined zone, in creation order, with its current trigger state
    pub zones: Vec<ZoneSnapshot>,
    /// Detection boxes to draw
    pub detections: Vec<Detection>,
    /// Show the alert banner (at least one zone is triggered this frame)
    pub alert_banner: bool,
}

impl OverlayPlan {
    /// Plan with no zones, no detections and no banner.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a plan from the frame's evaluation inputs.
    pub fn new(zones: Vec<ZoneSnapshot>, detections: Vec<Detection>, alert_banner: bool) -> Self {
        Self {
            zones,
            detections,
            alert_banner,
        }
    }
}
