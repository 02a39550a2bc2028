//! Encode/display collaborator contract.

use std::path::Path;

use async_trait::async_trait;

use crate::error::MediaResult;
use crate::frame::{Frame, StreamProperties};
use crate::overlay::OverlayPlan;

/// Output sink for composed frames.
///
/// One sink is opened per recording session and finalized before the session
/// returns, on every exit path.
#[async_trait]
pub trait VideoSink: Send {
    /// Compose the overlay onto the frame and append it to the output file.
    async fn write_frame(&mut self, frame: &Frame, overlay: &OverlayPlan) -> MediaResult<()>;

    /// Compose and present the frame on the live display.
    ///
    /// Best-effort; callers may ignore failures without losing footage.
    async fn present(&mut self, frame: &Frame, overlay: &OverlayPlan) -> MediaResult<()>;

    /// Flush and close the output file.
    async fn finalize(&mut self) -> MediaResult<()>;
}

/// Opens output sinks for recording sessions.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    /// Open a sink writing to `path` with the given stream properties.
    ///
    /// Fails with `MediaError::SinkOpenFailed` when the output cannot be
    /// created.
    async fn open(&self, path: &Path, properties: StreamProperties)
        -> MediaResult<Box<dyn VideoSink>>;
}
