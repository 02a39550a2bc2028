//! Stub collaborators for development wiring and tests.
//!
//! Real deployments plug camera, model and encoder integrations in behind
//! the `FrameSource` / `ObjectDetector` / `VideoSink` traits. These stubs
//! keep the recorder runnable without any of them present.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vigil_models::Detection;

use crate::capture::FrameSource;
use crate::detect::ObjectDetector;
use crate::error::{MediaError, MediaResult};
use crate::frame::{Frame, StreamProperties};
use crate::overlay::OverlayPlan;
use crate::sink::{SinkFactory, VideoSink};

/// Frame source producing empty frames of a fixed geometry.
///
/// Exhausts after `frame_limit` frames when a limit is set; otherwise runs
/// until the session is cancelled.
#[derive(Debug)]
pub struct SyntheticSource {
    properties: StreamProperties,
    frame_limit: Option<u64>,
    produced: u64,
}

impl SyntheticSource {
    /// Unbounded source.
    pub fn new(properties: StreamProperties) -> Self {
        Self {
            properties,
            frame_limit: None,
            produced: 0,
        }
    }

    /// Source that exhausts after `limit` frames.
    pub fn bounded(properties: StreamProperties, limit: u64) -> Self {
        Self {
            properties,
            frame_limit: Some(limit),
            produced: 0,
        }
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    async fn next_frame(&mut self) -> MediaResult<Frame> {
        if let Some(limit) = self.frame_limit {
            if self.produced >= limit {
                return Err(MediaError::CaptureExhausted);
            }
        }
        let frame = Frame::empty(self.produced, self.properties.width, self.properties.height);
        self.produced += 1;
        Ok(frame)
    }

    fn properties(&self) -> StreamProperties {
        self.properties
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

/// Detector that never detects anything.
#[derive(Debug, Default)]
pub struct NullDetector;

#[async_trait]
impl ObjectDetector for NullDetector {
    async fn detect(&mut self, _frame: &Frame) -> MediaResult<Vec<Detection>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Sink that appends raw frame bytes to a file, no container format.
pub struct RawFileSink {
    file: Option<fs::File>,
    path: PathBuf,
}

#[async_trait]
impl VideoSink for RawFileSink {
    async fn write_frame(&mut self, frame: &Frame, _overlay: &OverlayPlan) -> MediaResult<()> {
        let file = self.file.as_mut().ok_or(MediaError::SinkClosed)?;
        file.write_all(&frame.data).await?;
        Ok(())
    }

    async fn present(&mut self, _frame: &Frame, _overlay: &OverlayPlan) -> MediaResult<()> {
        // Headless: nothing to display
        Ok(())
    }

    async fn finalize(&mut self) -> MediaResult<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
            tracing::debug!(path = %self.path.display(), "Finalized raw sink");
        }
        Ok(())
    }
}

/// Factory opening `RawFileSink`s.
#[derive(Debug, Default)]
pub struct RawFileSinkFactory;

#[async_trait]
impl SinkFactory for RawFileSinkFactory {
    async fn open(
        &self,
        path: &Path,
        _properties: StreamProperties,
    ) -> MediaResult<Box<dyn VideoSink>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaError::sink_open_failed(path, e.to_string()))?;
        }
        let file = fs::File::create(path)
            .await
            .map_err(|e| MediaError::sink_open_failed(path, e.to_string()))?;
        Ok(Box::new(RawFileSink {
            file: Some(file),
            path: path.to_path_buf(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bounded_source_exhausts() {
        let mut source = SyntheticSource::bounded(StreamProperties::new(640, 480, 30.0), 2);
        assert_eq!(source.next_frame().await.unwrap().index, 0);
        assert_eq!(source.next_frame().await.unwrap().index, 1);
        let err = source.next_frame().await.unwrap_err();
        assert!(err.is_capture_exhausted());
    }

    #[tokio::test]
    async fn test_raw_sink_writes_and_finalizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.avi");
        let factory = RawFileSinkFactory;

        let mut sink = factory
            .open(&path, StreamProperties::new(2, 2, 30.0))
            .await
            .unwrap();

        let frame = Frame {
            index: 0,
            width: 2,
            height: 2,
            data: vec![1, 2, 3, 4],
        };
        sink.write_frame(&frame, &OverlayPlan::empty()).await.unwrap();
        sink.finalize().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4]);

        // Writes after finalize are rejected
        let err = sink.write_frame(&frame, &OverlayPlan::empty()).await;
        assert!(matches!(err, Err(MediaError::SinkClosed)));
    }
}
