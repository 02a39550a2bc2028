//! Detector collaborator contract.

use async_trait::async_trait;
use vigil_models::Detection;

use crate::error::MediaResult;
use crate::frame::Frame;

/// Object detection over single frames.
///
/// The model is a black box to the core: given a frame it returns
/// axis-aligned boxes with class labels. Implementations must be
/// deterministic given the same frame and persistent tracker state. The core
/// does not inspect confidence scores or class semantics beyond filtering by
/// the configured class allow-list.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Detect objects in a frame.
    async fn detect(&mut self, frame: &Frame) -> MediaResult<Vec<Detection>>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}
