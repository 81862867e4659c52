//! Start-time plus duration progress clock shared by timed motions.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;

/// A timed window measured against an explicit start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    /// When the window opened.
    pub start: Instant,
    /// Length of the window.
    pub duration: Duration,
}

impl Tween {
    /// Window of `duration` opening at `start`.
    #[must_use]
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self { start, duration }
    }

    /// Time elapsed since the window opened (zero before it opens).
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    /// Normalized progress (0.0 to 1.0). Zero-length windows are complete.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        progress_of(self.elapsed(now), self.duration)
    }

    /// Progress mapped through an easing curve.
    #[must_use]
    pub fn eased(&self, now: Instant, easing: EasingFunction) -> f32 {
        easing.evaluate(self.progress(now))
    }

    /// Whether the window has fully elapsed.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }
}

/// Ratio of `elapsed` over `duration`, clamped to [0, 1].
#[must_use]
pub fn progress_of(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }
}
