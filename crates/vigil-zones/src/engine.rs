//! Per-frame evaluation of detections against the zone set.

use tracing::warn;
use vigil_models::Detection;

use crate::store::ZoneStore;
use crate::zone::ZoneSnapshot;

/// A new alert: a zone transitioned into the triggered state this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneAlert {
    /// Name of the zone that fired
    pub zone: String,
    /// Lifetime ordinal of this alert for the zone (1-based)
    pub ordinal: u64,
}

/// Outcome of evaluating one frame's detections.
#[derive(Debug, Clone, Default)]
pub struct FrameEvaluation {
    /// Snapshots of every zone triggered this frame, in creation order
    pub triggered: Vec<ZoneSnapshot>,
    /// Alerts raised by not-triggered -> triggered transitions
    pub alerts: Vec<ZoneAlert>,
}

impl FrameEvaluation {
    /// True when at least one zone is triggered this frame.
    pub fn any_triggered(&self) -> bool {
        !self.triggered.is_empty()
    }
}

/// Maps detection results to overlapping zones and maintains trigger state.
#[derive(Debug, Default)]
pub struct ZoneTriggerEngine;

impl ZoneTriggerEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one frame of detections against every zone in the store.
    ///
    /// A zone is triggered for the frame iff at least one detection box
    /// intersects it. The per-zone state is aggregated over all boxes before
    /// any persistent state mutates, so the result is independent of box
    /// iteration order. Rising edges increment the zone's trigger count and
    /// raise an alert.
    pub fn evaluate(&self, store: &mut ZoneStore, detections: &[Detection]) -> FrameEvaluation {
        // OR-aggregation pass: no zone state is touched until every
        // (box, zone) pair has been tested.
        let hits: Vec<bool> = store
            .zones()
            .iter()
            .map(|zone| detections.iter().any(|d| zone.intersects_box(&d.bbox)))
            .collect();

        let mut result = FrameEvaluation::default();
        for (zone, hit) in store.zones_mut().iter_mut().zip(hits) {
            let rising_edge = zone.apply_frame_state(hit);
            if rising_edge {
                warn!(
                    zone = zone.name(),
                    ordinal = zone.trigger_count(),
                    "ALERT: object detected in restricted zone"
                );
                result.alerts.push(ZoneAlert {
                    zone: zone.name().to_string(),
                    ordinal: zone.trigger_count(),
                });
            }
            if hit {
                result.triggered.push(zone.snapshot());
            }
        }
        result
    }
}
