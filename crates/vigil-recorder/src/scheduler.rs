//! Outer control loop: session restarts and periodic archival.

use tokio::time::Instant;
use tracing::{error, info, warn};

use vigil_media::archive::archive_recordings;
use vigil_models::{SessionEndReason, SessionSummary};

use crate::config::RecorderConfig;
use crate::error::RecorderResult;
use crate::session::SessionOrchestrator;

/// Realized-vs-target rate gap (fps) before a session is flagged degraded.
const RATE_TOLERANCE_FPS: f64 = 5.0;

/// Process-wide scheduling state.
///
/// The archival timer is an absolute "next due" timestamp checked once per
/// outer-loop iteration, so repeated sleeps cannot accumulate drift.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleState {
    next_archive_due: Instant,
    cycles: u64,
}

impl ScheduleState {
    /// Initialize at process start.
    pub fn new(now: Instant, archive_interval: std::time::Duration) -> Self {
        Self {
            next_archive_due: now + archive_interval,
            cycles: 0,
        }
    }

    /// True when an archival pass is due.
    pub fn archive_due(&self, now: Instant) -> bool {
        now >= self.next_archive_due
    }

    /// Reset the archival timer after a pass.
    pub fn mark_archived(&mut self, now: Instant, archive_interval: std::time::Duration) {
        self.next_archive_due = now + archive_interval;
    }

    /// Completed session cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn record_cycle(&mut self) {
        self.cycles += 1;
    }
}

/// Runs recording sessions back-to-back and keeps footage archived.
///
/// A single session's failure never crashes the process: it is logged,
/// followed by an archival attempt, and the loop moves on. Cancellation
/// always runs one final archival pass before returning.
pub struct Scheduler {
    config: RecorderConfig,
    orchestrator: SessionOrchestrator,
}

impl Scheduler {
    /// Create a scheduler around an orchestrator.
    pub fn new(orchestrator: SessionOrchestrator) -> Self {
        Self {
            config: orchestrator.config().clone(),
            orchestrator,
        }
    }

    /// Access the orchestrator (input/shutdown handles, zone store).
    pub fn orchestrator(&self) -> &SessionOrchestrator {
        &self.orchestrator
    }

    /// Run sessions until cancelled.
    pub async fn run(&mut self) -> RecorderResult<()> {
        info!(
            restart_interval = ?self.config.restart_interval,
            archive_interval = ?self.config.archive_interval,
            output_dir = %self.config.output_dir.display(),
            "Starting recording scheduler"
        );

        let mut state = ScheduleState::new(Instant::now(), self.config.archive_interval);
        let mut shutdown_rx = self.orchestrator.subscribe_shutdown();

        loop {
            if self.orchestrator.quit_requested() {
                break;
            }

            match self.orchestrator.run_session().await {
                Ok(summary) => {
                    state.record_cycle();
                    self.log_summary(&summary);
                    if summary.end_reason == SessionEndReason::QuitRequested {
                        break;
                    }
                }
                Err(e) => {
                    state.record_cycle();
                    if e.is_sink_open_failure() {
                        error!(error = %e, "Could not open output sink; retrying next cycle");
                    } else {
                        error!(error = %e, "Recording session failed; preserving footage");
                    }
                    self.archive(&mut state).await;
                }
            }

            if state.archive_due(Instant::now()) {
                self.archive(&mut state).await;
            } else {
                // Pause before the next session; cancellation cuts it short
                tokio::select! {
                    _ = tokio::time::sleep(self.config.restart_interval) => {}
                    _ = shutdown_rx.changed() => {}
                }
            }
        }

        // Preserve already-captured footage on every exit path
        self.archive(&mut state).await;
        info!(cycles = state.cycles(), "Recording scheduler stopped");
        Ok(())
    }

    /// Run one archival pass and reset the archival timer.
    ///
    /// Archival failures are contained here; the loop keeps going.
    async fn archive(&self, state: &mut ScheduleState) {
        match archive_recordings(&self.config.output_dir, &self.config.extension).await {
            Ok(report) => info!(
                moved = report.moved,
                skipped = report.skipped,
                "Archival pass complete"
            ),
            Err(e) => error!(error = %e, "Archival pass failed"),
        }
        state.mark_archived(Instant::now(), self.config.archive_interval);
    }

    fn log_summary(&self, summary: &SessionSummary) {
        info!(
            session_id = %summary.session_id,
            frames = summary.frames_written,
            duration_secs = summary.duration.as_secs_f64(),
            realized_fps = summary.realized_fps(),
            end_reason = summary.end_reason.as_str(),
            "Session complete"
        );
        if summary.frames_written > 0
            && summary.rate_deviation(self.config.target_fps) > RATE_TOLERANCE_FPS
        {
            warn!(
                target_fps = self.config.target_fps,
                realized_fps = summary.realized_fps(),
                "Realized frame rate differs significantly from target"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_archive_due_uses_absolute_deadline() {
        let interval = Duration::from_secs(3600);
        let state = ScheduleState::new(Instant::now(), interval);

        assert!(!state.archive_due(Instant::now()));
        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(!state.archive_due(Instant::now()));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(state.archive_due(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_archived_resets_deadline() {
        let interval = Duration::from_secs(60);
        let mut state = ScheduleState::new(Instant::now(), interval);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(state.archive_due(Instant::now()));

        state.mark_archived(Instant::now(), interval);
        assert!(!state.archive_due(Instant::now()));
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(state.archive_due(Instant::now()));
    }
}
