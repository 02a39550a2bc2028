//! Interactive input events, queued and drained at frame boundaries.
//!
//! Zone mutation and trigger evaluation must never interleave mid-frame:
//! input arrives on a channel and is applied at exactly one point per loop
//! iteration, so the zone snapshot read by evaluation is always internally
//! consistent.

use tokio::sync::mpsc;
use tracing::info;
use vigil_models::Point;
use vigil_zones::ZoneStore;

/// Channel capacity for queued input events.
const INPUT_QUEUE_CAPACITY: usize = 64;

/// A zone-definition or command event from the input collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Place the next corner of the zone being defined
    ZonePoint { x: i32, y: i32 },
    /// Remove all zones and reset auto-naming
    ClearZones,
    /// Log a listing of the current zones
    Info,
    /// Request orderly shutdown
    Quit,
}

/// What a frame-boundary drain observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    /// A quit command was queued
    pub quit_requested: bool,
    /// Zones committed by points applied in this drain
    pub zones_committed: usize,
}

/// Receiving side of the input event queue.
pub struct InputQueue {
    rx: mpsc::Receiver<InputEvent>,
}

impl InputQueue {
    /// Create the queue and its sender handle.
    pub fn channel() -> (mpsc::Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel(INPUT_QUEUE_CAPACITY);
        (tx, Self { rx })
    }

    /// Apply every queued event to the zone store.
    ///
    /// Called once per frame boundary; never blocks.
    pub fn drain(&mut self, zones: &mut ZoneStore) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        while let Ok(event) = self.rx.try_recv() {
            match event {
                InputEvent::ZonePoint { x, y } => {
                    if let Some(committed) = zones.push_point(Point::new(x, y)) {
                        outcome.zones_committed += 1;
                        info!(zone = %committed.name, "Zone definition completed");
                    }
                }
                InputEvent::ClearZones => zones.clear(),
                InputEvent::Info => info!("{}", zones.describe()),
                InputEvent::Quit => outcome.quit_requested = true,
            }
        }
        outcome
    }
}
