//! Restricted zones and the per-frame trigger engine.
//!
//! This crate provides:
//! - `Zone`: an immutable-shape quadrilateral with trigger bookkeeping
//! - `ZoneStore`: interactive zone definition, clearing, and snapshots
//! - `ZoneTriggerEngine`: per-frame evaluation of detections against zones

pub mod engine;
pub mod error;
pub mod store;
pub mod zone;

pub use engine::{FrameEvaluation, ZoneAlert, ZoneTriggerEngine};
pub use error::{ZoneError, ZoneResult};
pub use store::ZoneStore;
pub use zone::{Zone, ZoneSnapshot, ZONE_POINT_COUNT};
