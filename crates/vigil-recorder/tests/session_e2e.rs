//! End-to-end recording scenarios over scripted collaborators.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use vigil_media::stub::SyntheticSource;
use vigil_media::{
    Frame, MediaResult, ObjectDetector, OverlayPlan, SinkFactory, StreamProperties, VideoSink,
};
use vigil_models::{BoundingBox, Detection, SessionEndReason};
use vigil_recorder::{InputEvent, RecorderConfig, Scheduler, SessionOrchestrator};

/// Detector returning the same detection list for every frame.
struct ScriptedDetector {
    detections: Vec<Detection>,
}

impl ScriptedDetector {
    fn returning(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    fn empty() -> Self {
        Self::returning(Vec::new())
    }
}

#[async_trait]
impl ObjectDetector for ScriptedDetector {
    async fn detect(&mut self, _frame: &Frame) -> MediaResult<Vec<Detection>> {
        Ok(self.detections.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// What a memory sink observed over its lifetime.
#[derive(Debug, Default)]
struct SinkLog {
    overlays: Vec<OverlayPlan>,
    finalized: bool,
}

/// Sink capturing overlay plans in memory.
struct MemorySink {
    log: Arc<Mutex<SinkLog>>,
}

#[async_trait]
impl VideoSink for MemorySink {
    async fn write_frame(&mut self, _frame: &Frame, overlay: &OverlayPlan) -> MediaResult<()> {
        self.log.lock().unwrap().overlays.push(overlay.clone());
        Ok(())
    }

    async fn present(&mut self, _frame: &Frame, _overlay: &OverlayPlan) -> MediaResult<()> {
        Ok(())
    }

    async fn finalize(&mut self) -> MediaResult<()> {
        self.log.lock().unwrap().finalized = true;
        Ok(())
    }
}

#[derive(Default)]
struct MemorySinkFactory {
    log: Arc<Mutex<SinkLog>>,
}

impl MemorySinkFactory {
    fn log(&self) -> Arc<Mutex<SinkLog>> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl SinkFactory for MemorySinkFactory {
    async fn open(
        &self,
        _path: &Path,
        _properties: StreamProperties,
    ) -> MediaResult<Box<dyn VideoSink>> {
        Ok(Box::new(MemorySink {
            log: Arc::clone(&self.log),
        }))
    }
}

fn props() -> StreamProperties {
    StreamProperties::new(640, 480, 30.0)
}

fn config_for(dir: &TempDir) -> RecorderConfig {
    RecorderConfig {
        output_dir: dir.path().to_path_buf(),
        ..RecorderConfig::default()
    }
}

fn person_at(x1: i32, y1: i32, x2: i32, y2: i32) -> Detection {
    Detection::new(0, BoundingBox::new(x1, y1, x2, y2), 0.9)
}

fn send_square_zone(orchestrator: &SessionOrchestrator) {
    let input = orchestrator.input_sender();
    for (x, y) in [(100, 100), (200, 100), (200, 200), (100, 200)] {
        input.try_send(InputEvent::ZonePoint { x, y }).unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn detection_inside_zone_raises_one_alert() {
    let dir = TempDir::new().unwrap();
    let sinks = MemorySinkFactory::default();
    let log = sinks.log();

    let mut orchestrator = SessionOrchestrator::new(
        config_for(&dir),
        Box::new(SyntheticSource::bounded(props(), 5)),
        Box::new(ScriptedDetector::returning(vec![person_at(
            150, 150, 160, 160,
        )])),
        Box::new(sinks),
    );
    send_square_zone(&orchestrator);

    let summary = orchestrator.run_session().await.unwrap();
    assert_eq!(summary.frames_written, 5);
    assert_eq!(summary.end_reason, SessionEndReason::SourceExhausted);

    let zones = orchestrator.zones().snapshots();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].name, "Zone 1");
    assert!(zones[0].triggered);
    assert_eq!(zones[0].trigger_count, 1, "sustained presence is one alert");

    let log = log.lock().unwrap();
    assert!(log.finalized);
    assert_eq!(log.overlays.len(), 5);
    assert!(log.overlays.iter().all(|o| o.alert_banner));
}

#[tokio::test(start_paused = true)]
async fn detection_outside_zone_does_not_trigger() {
    let dir = TempDir::new().unwrap();
    let sinks = MemorySinkFactory::default();
    let log = sinks.log();

    let mut orchestrator = SessionOrchestrator::new(
        config_for(&dir),
        Box::new(SyntheticSource::bounded(props(), 5)),
        Box::new(ScriptedDetector::returning(vec![person_at(
            300, 300, 310, 310,
        )])),
        Box::new(sinks),
    );
    send_square_zone(&orchestrator);

    orchestrator.run_session().await.unwrap();

    let zones = orchestrator.zones().snapshots();
    assert!(!zones[0].triggered);
    assert_eq!(zones[0].trigger_count, 0);

    let log = log.lock().unwrap();
    assert!(log.overlays.iter().all(|o| !o.alert_banner));
    // The detection box is still drawn even though no zone fired
    assert!(log.overlays.iter().all(|o| o.detections.len() == 1));
}

#[tokio::test(start_paused = true)]
async fn session_reports_realized_rate_at_target() {
    let dir = TempDir::new().unwrap();

    let mut orchestrator = SessionOrchestrator::new(
        config_for(&dir), // 30 fps target
        Box::new(SyntheticSource::bounded(props(), 90)),
        Box::new(ScriptedDetector::empty()),
        Box::new(MemorySinkFactory::default()),
    );

    let summary = orchestrator.run_session().await.unwrap();
    assert_eq!(summary.frames_written, 90);
    // 90 frames paced at 30 fps is 3 simulated seconds
    assert!((summary.duration.as_secs_f64() - 3.0).abs() < 0.01);
    assert!((summary.realized_fps() - 30.0).abs() < 0.01);
}

#[tokio::test(start_paused = true)]
async fn clearing_zones_resets_bookkeeping_and_auto_names() {
    let dir = TempDir::new().unwrap();

    let mut orchestrator = SessionOrchestrator::new(
        config_for(&dir),
        // First session consumes all frames; the second exhausts immediately
        Box::new(SyntheticSource::bounded(props(), 3)),
        Box::new(ScriptedDetector::returning(vec![person_at(
            150, 150, 160, 160,
        )])),
        Box::new(MemorySinkFactory::default()),
    );
    send_square_zone(&orchestrator);

    orchestrator.run_session().await.unwrap();
    assert_eq!(orchestrator.zones().snapshots()[0].trigger_count, 1);

    // Clear and redefine between frames; the next zone numbers from 1 again
    let input = orchestrator.input_sender();
    input.try_send(InputEvent::ClearZones).unwrap();
    for (x, y) in [(10, 10), (20, 10), (20, 20), (10, 20)] {
        input.try_send(InputEvent::ZonePoint { x, y }).unwrap();
    }

    orchestrator.run_session().await.unwrap();
    let zones = orchestrator.zones().snapshots();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].name, "Zone 1");
    assert_eq!(zones[0].trigger_count, 0);
}

#[tokio::test(start_paused = true)]
async fn quit_finalizes_sink_and_runs_final_archival() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("old.avi"), b"footage").unwrap();

    let sinks = MemorySinkFactory::default();
    let log = sinks.log();

    let orchestrator = SessionOrchestrator::new(
        config_for(&dir),
        Box::new(SyntheticSource::new(props())), // unbounded; only quit ends it
        Box::new(ScriptedDetector::empty()),
        Box::new(sinks),
    );
    orchestrator
        .input_sender()
        .try_send(InputEvent::Quit)
        .unwrap();

    let mut scheduler = Scheduler::new(orchestrator);
    scheduler.run().await.unwrap();

    assert!(log.lock().unwrap().finalized);

    let dated = dir
        .path()
        .join(chrono::Local::now().format("%Y-%m-%d").to_string());
    assert!(
        dated.join("old.avi").exists(),
        "cancellation must archive captured footage before exit"
    );
    assert!(!dir.path().join("old.avi").exists());
}

#[tokio::test(start_paused = true)]
async fn filtered_classes_do_not_trigger_zones() {
    let dir = TempDir::new().unwrap();

    let mut orchestrator = SessionOrchestrator::new(
        config_for(&dir), // allow-list is person + car
        Box::new(SyntheticSource::bounded(props(), 2)),
        Box::new(ScriptedDetector::returning(vec![Detection::new(
            7, // truck: not in the allow-list
            BoundingBox::new(150, 150, 160, 160),
            0.9,
        )])),
        Box::new(MemorySinkFactory::default()),
    );
    send_square_zone(&orchestrator);

    orchestrator.run_session().await.unwrap();
    assert_eq!(orchestrator.zones().snapshots()[0].trigger_count, 0);
}
