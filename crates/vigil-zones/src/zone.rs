//! Restricted zone entity and its geometric predicates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vigil_models::{BoundingBox, Point};

/// Number of corner points in a finalized zone.
pub const ZONE_POINT_COUNT: usize = 4;

/// A restricted zone: a quadrilateral in frame pixel coordinates with
/// per-frame trigger bookkeeping.
///
/// The shape is immutable after creation; only the trigger state mutates,
/// once per frame, driven by the trigger engine. Insertion order of the
/// points is the polygon winding order, so non-convex and non-axis-aligned
/// quadrilaterals are supported.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    points: [Point; ZONE_POINT_COUNT],
    name: String,
    triggered: bool,
    trigger_count: u64,
}

impl Zone {
    /// Create a new zone from its four corner points.
    pub fn new(points: [Point; ZONE_POINT_COUNT], name: impl Into<String>) -> Self {
        Self {
            points,
            name: name.into(),
            triggered: false,
            trigger_count: 0,
        }
    }

    /// Zone display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Corner points in winding order.
    pub fn points(&self) -> &[Point; ZONE_POINT_COUNT] {
        &self.points
    }

    /// Whether the zone is triggered for the current frame.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// How many times this zone has transitioned into the triggered state.
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Check whether a point lies on or inside the polygon boundary.
    ///
    /// Even-odd ray casting with an explicit on-edge test, so vertices and
    /// boundary points count as inside.
    pub fn contains_point(&self, p: Point) -> bool {
        if self.on_boundary(p) {
            return true;
        }

        let mut inside = false;
        let mut j = ZONE_POINT_COUNT - 1;
        for i in 0..ZONE_POINT_COUNT {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) as f64 / (b.y - a.y) as f64;
                let x_cross = a.x as f64 + t * (b.x - a.x) as f64;
                if (p.x as f64) < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Check whether a detection box intersects this zone.
    ///
    /// Corner-sampling approximation: true iff any of the box's four corners
    /// lies inside-or-on the polygon. This misses a box that fully contains
    /// the polygon without any corner inside it, and an edge that crosses
    /// the polygon without a corner entering. Accepted trade-off for speed
    /// at per-frame evaluation rates.
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        bbox.corners().iter().any(|&c| self.contains_point(c))
    }

    /// Read-only view for rendering and serialization.
    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot {
            name: self.name.clone(),
            points: self.points,
            triggered: self.triggered,
            trigger_count: self.trigger_count,
        }
    }

    /// Apply the frame's aggregated triggered state.
    ///
    /// Returns true on a not-triggered -> triggered transition, which also
    /// increments the trigger count.
    pub(crate) fn apply_frame_state(&mut self, triggered: bool) -> bool {
        let rising_edge = triggered && !self.triggered;
        if rising_edge {
            self.trigger_count += 1;
        }
        self.triggered = triggered;
        rising_edge
    }

    /// True if `p` lies on one of the polygon's edges (vertices included).
    fn on_boundary(&self, p: Point) -> bool {
        let mut j = ZONE_POINT_COUNT - 1;
        for i in 0..ZONE_POINT_COUNT {
            if on_segment(self.points[j], self.points[i], p) {
                return true;
            }
            j = i;
        }
        false
    }
}

/// True if `p` lies on the closed segment `a`-`b`.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.x - a.x) as i64 * (p.y - a.y) as i64 - (b.y - a.y) as i64 * (p.x - a.x) as i64;
    if cross != 0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Read-only view of a zone for rendering and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoneSnapshot {
    /// Zone display name
    pub name: String,
    /// Corner points in winding order
    pub points: [Point; ZONE_POINT_COUNT],
    /// Whether the zone is triggered in the current frame
    pub triggered: bool,
    /// Lifetime count of trigger transitions
    pub trigger_count: u64,
}
