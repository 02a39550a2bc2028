//! One bounded recording session: capture, detect, evaluate, compose, write.

use std::time::Duration;

use chrono::{Local, Utc};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use vigil_media::{FrameSource, ObjectDetector, OverlayPlan, SinkFactory, VideoSink};
use vigil_models::{SessionEndReason, SessionId, SessionSummary};
use vigil_zones::{ZoneStore, ZoneTriggerEngine};

use crate::config::RecorderConfig;
use crate::error::RecorderResult;
use crate::input::{InputEvent, InputQueue};
use crate::logging::SessionLogger;
use crate::pacing::FrameGate;

/// Drives recording sessions over the capture, detection and encode
/// collaborators.
///
/// The per-frame loop is strictly sequential; zones are only mutated by the
/// input drain at the top of each iteration, never mid-evaluation.
pub struct SessionOrchestrator {
    config: RecorderConfig,
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    sinks: Box<dyn SinkFactory>,
    zones: ZoneStore,
    engine: ZoneTriggerEngine,
    input: InputQueue,
    input_tx: mpsc::Sender<InputEvent>,
    shutdown: watch::Sender<bool>,
}

impl SessionOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        config: RecorderConfig,
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
        sinks: Box<dyn SinkFactory>,
    ) -> Self {
        let (input_tx, input) = InputQueue::channel();
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            source,
            detector,
            sinks,
            zones: ZoneStore::new(),
            engine: ZoneTriggerEngine::new(),
            input,
            input_tx,
            shutdown,
        }
    }

    /// Sender for zone-definition and command events.
    pub fn input_sender(&self) -> mpsc::Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Sender half of the shutdown signal (for ctrl-c wiring).
    pub fn shutdown_sender(&self) -> watch::Sender<bool> {
        self.shutdown.clone()
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// True once a quit has been requested.
    pub fn quit_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// The configuration this orchestrator runs with.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// The zone store (zones persist across sessions).
    pub fn zones(&self) -> &ZoneStore {
        &self.zones
    }

    /// Run one recording session to completion.
    ///
    /// Opens a uniquely named output sink, then loops pulling frames,
    /// detecting, evaluating zones and writing composed frames, pacing each
    /// iteration against the target rate. Ends when the source is exhausted
    /// or a quit is observed; the sink is finalized on every exit path.
    pub async fn run_session(&mut self) -> RecorderResult<SessionSummary> {
        let session_id = SessionId::new();
        let logger = SessionLogger::new(&session_id, "record");

        let output_path = self.config.output_dir.join(session_file_name(&self.config));
        let properties = self.source.properties();
        let mut sink = match self.sinks.open(&output_path, properties).await {
            Ok(sink) => sink,
            Err(e) => {
                logger.log_error(&format!("failed to open {}: {e}", output_path.display()));
                return Err(e.into());
            }
        };
        logger.log_start(&format!(
            "recording to {} ({}x{} @ {:.1} fps target)",
            output_path.display(),
            properties.width,
            properties.height,
            self.config.target_fps
        ));

        let started_at = Utc::now();
        let started = Instant::now();
        let mut frames_written = 0u64;

        let loop_result = self.record_loop(&mut sink, &mut frames_written).await;

        // The sink is flushed and closed before the session returns,
        // including on error and quit paths.
        match (loop_result, sink.finalize().await) {
            (Ok(end_reason), finalize_result) => {
                finalize_result?;
                let summary = SessionSummary {
                    session_id,
                    started_at,
                    frames_written,
                    duration: started.elapsed(),
                    output_path,
                    end_reason,
                };
                logger.log_completion(&format!(
                    "{} frames in {:.2}s (realized {:.2} fps, {})",
                    summary.frames_written,
                    summary.duration.as_secs_f64(),
                    summary.realized_fps(),
                    summary.end_reason.as_str()
                ));
                Ok(summary)
            }
            (Err(e), finalize_result) => {
                if let Err(fe) = finalize_result {
                    logger.log_warning(&format!("sink finalize failed after error: {fe}"));
                }
                logger.log_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// The per-frame loop.
    async fn record_loop(
        &mut self,
        sink: &mut Box<dyn VideoSink>,
        frames_written: &mut u64,
    ) -> RecorderResult<SessionEndReason> {
        let target = FrameGate::interval_for(self.config.target_fps);
        let mut last_frame = Instant::now();

        loop {
            // Input events are applied at exactly one point per frame
            if self.input.drain(&mut self.zones).quit_requested {
                let _ = self.shutdown.send(true);
            }
            if self.quit_requested() {
                return Ok(SessionEndReason::QuitRequested);
            }

            let frame = match self.source.next_frame().await {
                Ok(frame) => frame,
                Err(e) if e.is_capture_exhausted() => {
                    return Ok(SessionEndReason::SourceExhausted)
                }
                Err(e) => return Err(e.into()),
            };

            let mut detections = self.detector.detect(&frame).await?;
            detections.retain(|d| self.config.is_class_allowed(d.class_id));

            let evaluation = self.engine.evaluate(&mut self.zones, &detections);
            let overlay = OverlayPlan::new(
                self.zones.snapshots(),
                detections,
                evaluation.any_triggered(),
            );

            sink.write_frame(&frame, &overlay).await?;
            if let Err(e) = sink.present(&frame, &overlay).await {
                // Display is best-effort; footage writes are not
                tracing::debug!(error = %e, "Display present failed");
            }
            *frames_written += 1;

            let pause = FrameGate::sleep_needed(target, Instant::now(), last_frame);
            if pause > Duration::ZERO {
                tokio::time::sleep(pause).await;
            }
            last_frame = Instant::now();
        }
    }
}

/// Unique, timestamp-derived output file name: `{timestamp}_{label}{ext}`.
fn session_file_name(config: &RecorderConfig) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    format!(
        "{timestamp}_{}{}",
        config.device_label, config.extension
    )
}
