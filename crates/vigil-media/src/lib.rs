//! Media collaborator contracts for the Vigil recorder.
//!
//! The recorder core treats capture, object detection and encoding as
//! externally supplied capabilities with fixed contracts. This crate defines
//! those contracts, the frame type that flows between them, the overlay
//! composition plan, and the archival of finished session files.

pub mod archive;
pub mod capture;
pub mod detect;
pub mod error;
pub mod frame;
pub mod overlay;
pub mod sink;
pub mod stub;

pub use archive::{archive_recordings, move_file, ArchiveReport};
pub use capture::FrameSource;
pub use detect::ObjectDetector;
pub use error::{MediaError, MediaResult};
pub use frame::{Frame, StreamProperties};
pub use overlay::OverlayPlan;
pub use sink::{SinkFactory, VideoSink};
