//! Per-frame pacing against a target rate.

use std::time::Duration;

use tokio::time::Instant;

/// Frame pacing gate.
///
/// Guarantees a minimum period between frames so the recorded file's
/// timestamp base matches its nominal rate when capture+detect+encode runs
/// faster than target. It does not compensate when the pipeline is slower:
/// no frames are dropped and no catch-up occurs, the realized rate simply
/// falls below target and is reported in the session summary at cycle end.
#[derive(Debug, Clone, Copy)]
pub struct FrameGate;

impl FrameGate {
    /// Target inter-frame interval for a frame rate.
    ///
    /// A non-positive rate disables pacing (zero interval).
    pub fn interval_for(fps: f64) -> Duration {
        if fps > 0.0 {
            Duration::from_secs_f64(1.0 / fps)
        } else {
            Duration::ZERO
        }
    }

    /// How long the caller should suspend before pulling the next frame.
    ///
    /// Pure: `max(0, target - (now - last_frame))`. The caller owns the
    /// actual sleep.
    pub fn sleep_needed(target_interval: Duration, now: Instant, last_frame: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(last_frame);
        target_interval.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_for_rate() {
        assert_eq!(FrameGate::interval_for(30.0), Duration::from_secs_f64(1.0 / 30.0));
        assert_eq!(FrameGate::interval_for(0.0), Duration::ZERO);
        assert_eq!(FrameGate::interval_for(-5.0), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_interval_when_no_time_elapsed() {
        let target = Duration::from_millis(100);
        let now = Instant::now();
        assert_eq!(FrameGate::sleep_needed(target, now, now), target);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_interval_remaining() {
        let target = Duration::from_millis(100);
        let last = Instant::now();
        tokio::time::advance(Duration::from_millis(40)).await;
        assert_eq!(
            FrameGate::sleep_needed(target, Instant::now(), last),
            Duration::from_millis(60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_when_target_already_met() {
        let target = Duration::from_millis(100);
        let last = Instant::now();
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(
            FrameGate::sleep_needed(target, Instant::now(), last),
            Duration::ZERO
        );

        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(
            FrameGate::sleep_needed(target, Instant::now(), last),
            Duration::ZERO
        );
    }
}
