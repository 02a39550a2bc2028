//! Capture collaborator contract.

use async_trait::async_trait;

use crate::error::MediaResult;
use crate::frame::{Frame, StreamProperties};

/// Source of captured frames.
///
/// Implementations wrap a camera device, a video file, or a test script.
/// `next_frame` may block (the blocking behavior is owned by the
/// implementation); it returns `MediaError::CaptureExhausted` once the
/// source is depleted.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Pull the next frame from the source.
    async fn next_frame(&mut self) -> MediaResult<Frame>;

    /// Stream properties (dimensions, nominal rate).
    fn properties(&self) -> StreamProperties;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
