//! Zone ownership: interactive definition, clearing, and snapshots.

use std::fmt::Write as _;

use tracing::info;
use vigil_models::Point;

use crate::error::{ZoneError, ZoneResult};
use crate::zone::{Zone, ZoneSnapshot, ZONE_POINT_COUNT};

/// Owns the set of restricted zones.
///
/// Zones are kept in creation order. A zone under construction lives in the
/// in-progress point buffer and is never visible through `snapshots()` or to
/// the trigger engine; reaching four points commits the zone atomically and
/// clears the buffer.
#[derive(Debug, Default)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    pending: Vec<Point>,
    counter: u32,
}

impl ZoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            pending: Vec::new(),
            counter: 1,
        }
    }

    /// Place the next corner of the zone being defined.
    ///
    /// Models a click-to-place-corner gesture. The fourth point commits a
    /// new auto-named zone and returns its snapshot; earlier points return
    /// `None`.
    pub fn push_point(&mut self, p: Point) -> Option<ZoneSnapshot> {
        self.pending.push(p);
        if self.pending.len() < ZONE_POINT_COUNT {
            return None;
        }

        let points: [Point; ZONE_POINT_COUNT] = [
            self.pending[0],
            self.pending[1],
            self.pending[2],
            self.pending[3],
        ];
        self.pending.clear();
        Some(self.add_zone(points, None))
    }

    /// Add a finalized zone.
    ///
    /// Auto-names the zone `Zone {n}` when no name is given, where n is the
    /// creation order since the last clear.
    pub fn add_zone(
        &mut self,
        points: [Point; ZONE_POINT_COUNT],
        name: Option<String>,
    ) -> ZoneSnapshot {
        let name = name.unwrap_or_else(|| {
            let n = format!("Zone {}", self.counter);
            self.counter += 1;
            n
        });
        let zone = Zone::new(points, name);
        info!(zone = zone.name(), points = ?zone.points(), "Added restricted zone");
        let snapshot = zone.snapshot();
        self.zones.push(zone);
        snapshot
    }

    /// Add a zone from a programmatic point list.
    ///
    /// Rejects anything but exactly four points; the zone never enters the
    /// store on failure.
    pub fn try_add_zone(&mut self, points: &[Point], name: Option<String>) -> ZoneResult<ZoneSnapshot> {
        let points: [Point; ZONE_POINT_COUNT] = points
            .try_into()
            .map_err(|_| ZoneError::invalid_definition(points.len()))?;
        Ok(self.add_zone(points, name))
    }

    /// Remove every zone and reset the auto-name counter.
    ///
    /// Also discards any in-progress definition; a half-drawn zone must not
    /// survive a clear.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.pending.clear();
        self.counter = 1;
        info!("All restricted zones cleared");
    }

    /// Number of finalized zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True when no zones are defined.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Points accumulated for the zone currently being defined.
    pub fn pending_points(&self) -> &[Point] {
        &self.pending
    }

    /// Read-only views of every zone, in creation order.
    ///
    /// Stable across calls until the next mutation; feeds both rendering and
    /// trigger evaluation.
    pub fn snapshots(&self) -> Vec<ZoneSnapshot> {
        self.zones.iter().map(Zone::snapshot).collect()
    }

    /// Human-readable listing of all zones and their trigger counts.
    pub fn describe(&self) -> String {
        if self.zones.is_empty() {
            return "No restricted zones defined".to_string();
        }

        let mut out = String::from("Restricted zones:\n");
        for (i, zone) in self.zones.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {}: {:?} - triggers: {}",
                i + 1,
                zone.name(),
                zone.points(),
                zone.trigger_count()
            );
        }
        out
    }

    pub(crate) fn zones_mut(&mut self) -> &mut [Zone] {
        &mut self.zones
    }

    pub(crate) fn zones(&self) -> &[Zone] {
        &self.zones
    }
}
