//! Adaptive frame throttling.

use web_time::{Duration, Instant};

/// Adaptive frame throttle with FPS measurement.
///
/// Frames arriving sooner than the target interval are skipped. A processed
/// frame keeps the sub-interval remainder (`last_frame = now - delta mod
/// interval`) so the cadence does not drift when the host's refresh rate
/// is not a multiple of the target.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    interval: Duration,
    /// Timestamp the next delta is measured from; `None` until armed
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            interval: interval_for(target_fps),
            last_frame: None,
            smoothed_fps: target_fps.max(1) as f32,
            smoothing: 0.05,
        }
    }

    /// Change the target without resetting the cadence.
    pub fn set_target_fps(&mut self, target_fps: u32) {
        if target_fps != self.target_fps {
            self.target_fps = target_fps;
            self.interval = interval_for(target_fps);
        }
    }

    /// Current target FPS.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Current minimum frame interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Decide whether the frame at `now` runs. Returns the delta since the
    /// previous processed frame, or `None` to skip. The first frame after
    /// arming runs with a zero delta.
    pub fn begin_frame(&mut self, now: Instant) -> Option<Duration> {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            return Some(Duration::ZERO);
        };
        let delta = now.saturating_duration_since(last);
        if delta < self.interval {
            return None;
        }
        self.last_frame = Some(now.checked_sub(remainder(delta, self.interval)).unwrap_or(now));

        let frame_time = delta.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        Some(delta)
    }

    /// Re-arm at `now` so the next delta carries no catch-up.
    pub fn reset(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn interval_for(target_fps: u32) -> Duration {
    if target_fps > 0 {
        Duration::from_secs_f64(1.0 / f64::from(target_fps))
    } else {
        Duration::ZERO
    }
}

/// `delta mod interval`, zero for an unlimited target.
fn remainder(delta: Duration, interval: Duration) -> Duration {
    let interval_ns = interval.as_nanos();
    if interval_ns == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((delta.as_nanos() % interval_ns) as u64)
}
