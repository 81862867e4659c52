//! Stall detection and hard reset for drones that stop making progress.

use glam::Vec3;
use web_time::{Duration, Instant};

use crate::options::FailsafeOptions;

/// Per-drone progress memory. Only [`StuckFailsafe`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailsafeTracker {
    /// Position at the previous check.
    pub last_position: Vec3,
    /// Time of the previous check.
    pub last_check_time: Instant,
    /// Consecutive no-progress time.
    pub stuck_duration: Duration,
}

impl FailsafeTracker {
    /// Tracker whose first check falls one interval after `now`.
    #[must_use]
    pub fn new(now: Instant, position: Vec3) -> Self {
        Self {
            last_position: position,
            last_check_time: now,
            stuck_duration: Duration::ZERO,
        }
    }
}

/// Result of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailsafeVerdict {
    /// Keep going.
    Clear,
    /// Teleport and reschedule now.
    HardReset,
}

/// Periodic displacement check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StuckFailsafe {
    check_interval: Duration,
    epsilon: f32,
    threshold: Duration,
}

impl StuckFailsafe {
    /// Failsafe with the configured interval, epsilon and threshold.
    #[must_use]
    pub fn from_options(options: &FailsafeOptions) -> Self {
        Self {
            check_interval: Duration::from_millis(options.check_interval_ms),
            epsilon: options.epsilon,
            threshold: Duration::from_millis(options.stuck_threshold_ms),
        }
    }

    /// Record `position` at `now` if a check is due.
    ///
    /// `holding` marks a deliberate stationary hold: the check still runs
    /// but the tracker is re-armed instead of accumulating.
    pub fn observe(
        &self,
        tracker: &mut FailsafeTracker,
        now: Instant,
        position: Vec3,
        holding: bool,
    ) -> FailsafeVerdict {
        let elapsed = now.saturating_duration_since(tracker.last_check_time);
        if elapsed < self.check_interval {
            return FailsafeVerdict::Clear;
        }
        let displacement = position.distance(tracker.last_position);
        tracker.last_position = position;
        tracker.last_check_time = now;

        if holding || displacement >= self.epsilon {
            tracker.stuck_duration = Duration::ZERO;
            return FailsafeVerdict::Clear;
        }
        tracker.stuck_duration += elapsed;
        if tracker.stuck_duration >= self.threshold {
            tracker.stuck_duration = Duration::ZERO;
            FailsafeVerdict::HardReset
        } else {
            FailsafeVerdict::Clear
        }
    }

    /// Clear the tracker after a reset or a new schedule.
    pub fn rearm(tracker: &mut FailsafeTracker, now: Instant, position: Vec3) {
        *tracker = FailsafeTracker::new(now, position);
    }
}

impl Default for StuckFailsafe {
    fn default() -> Self {
        Self::from_options(&FailsafeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: Duration = Duration::from_millis(2500);

    #[test]
    fn three_stalled_checks_reset_once() {
        let failsafe = StuckFailsafe::default();
        let t0 = Instant::now();
        let mut tracker = FailsafeTracker::new(t0, Vec3::ZERO);
        let jitter = [Vec3::new(0.05, 0.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.1, 0.0)];

        let verdicts: Vec<_> = (1..=3u32)
            .map(|i| failsafe.observe(&mut tracker, t0 + CHECK * i, jitter[i as usize - 1], false))
            .collect();
        assert_eq!(
            verdicts,
            vec![FailsafeVerdict::Clear, FailsafeVerdict::Clear, FailsafeVerdict::HardReset]
        );
        assert_eq!(tracker.stuck_duration, Duration::ZERO);

        // The next check starts accumulating from zero again
        let next = failsafe.observe(&mut tracker, t0 + CHECK * 4, Vec3::ZERO, false);
        assert_eq!(next, FailsafeVerdict::Clear);
        assert_eq!(tracker.stuck_duration, CHECK);
    }

    #[test]
    fn checks_only_run_each_interval() {
        let failsafe = StuckFailsafe::default();
        let t0 = Instant::now();
        let mut tracker = FailsafeTracker::new(t0, Vec3::ZERO);
        for ms in (100..2500).step_by(100) {
            let verdict = failsafe.observe(&mut tracker, t0 + Duration::from_millis(ms), Vec3::ZERO, false);
            assert_eq!(verdict, FailsafeVerdict::Clear);
        }
        assert_eq!(tracker.stuck_duration, Duration::ZERO);
        assert_eq!(tracker.last_check_time, t0);
    }

    #[test]
    fn movement_resets_accumulation() {
        let failsafe = StuckFailsafe::default();
        let t0 = Instant::now();
        let mut tracker = FailsafeTracker::new(t0, Vec3::ZERO);
        let _ = failsafe.observe(&mut tracker, t0 + CHECK, Vec3::ZERO, false);
        let _ = failsafe.observe(&mut tracker, t0 + CHECK * 2, Vec3::ZERO, false);
        assert_eq!(tracker.stuck_duration, CHECK * 2);
        let _ = failsafe.observe(&mut tracker, t0 + CHECK * 3, Vec3::X, false);
        assert_eq!(tracker.stuck_duration, Duration::ZERO);
    }

    #[test]
    fn holds_never_trigger() {
        let failsafe = StuckFailsafe::default();
        let t0 = Instant::now();
        let mut tracker = FailsafeTracker::new(t0, Vec3::ZERO);
        for i in 1..=10u32 {
            let verdict = failsafe.observe(&mut tracker, t0 + CHECK * i, Vec3::ZERO, true);
            assert_eq!(verdict, FailsafeVerdict::Clear);
        }
        assert_eq!(tracker.stuck_duration, Duration::ZERO);
    }
}
