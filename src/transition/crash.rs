//! Three-phase crash cinematic: shake, ascend, hold.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use web_time::{Duration, Instant};

use crate::host::TransitionEvent;
use crate::options::TransitionOptions;
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::look_at;
use crate::util::tween::progress_of;

/// Jitter frequencies per axis, in Hz. Incommensurate so the shake never
/// settles into a visible loop.
const JITTER_HZ: Vec3 = Vec3::new(23.0, 29.0, 17.0);

/// Current crash phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashPhase {
    /// Decaying jitter at the captured pose.
    Shake,
    /// Climb to the overhead vantage.
    Ascending,
    /// Static overhead hold until the game leaves the crashed state.
    Holding,
}

/// One sampled crash frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrashFrame {
    /// Camera pose.
    pub transform: Transform,
    /// Visual emphasis in [0, 1].
    pub emphasis: f32,
    /// `CrashAscendComplete` on the frame the ascent finishes.
    pub event: Option<TransitionEvent>,
}

/// Crash cinematic state.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashSequence {
    /// Camera transform captured at the crash.
    pub from: Transform,
    /// Overhead pose the ascent ends on.
    pub vantage: Transform,
    phase: CrashPhase,
    started: Instant,
    shake: Duration,
    ascend: Duration,
    amplitude: f32,
    pulse_hz: f32,
    ascend_reported: bool,
}

impl CrashSequence {
    /// Crash at `site`, starting from camera pose `from`.
    #[must_use]
    pub fn new(
        now: Instant,
        from: Transform,
        site: Vec3,
        options: &TransitionOptions,
    ) -> Self {
        let vantage_position = site + Vec3::Y * options.ascend_height;
        let down = look_at(vantage_position, site).unwrap_or(Quat::IDENTITY);
        Self {
            from,
            vantage: Transform::new(vantage_position, down),
            phase: CrashPhase::Shake,
            started: now,
            shake: Duration::from_millis(options.crash_shake_ms),
            ascend: Duration::from_millis(options.crash_ascend_ms),
            amplitude: options.shake_amplitude,
            pulse_hz: options.emphasis_pulse_hz,
            ascend_reported: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CrashPhase {
        self.phase
    }

    /// Advance to `now`. The ascend-complete event is returned at most
    /// once per sequence.
    pub fn sample(&mut self, now: Instant) -> CrashFrame {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < self.shake {
            return self.shake_frame(elapsed);
        }
        self.phase = CrashPhase::Ascending;

        let t = progress_of(elapsed - self.shake, self.ascend);
        if t < 1.0 {
            let eased = EasingFunction::CubicOut.evaluate(t);
            return CrashFrame {
                transform: self.from.interpolate(&self.vantage, eased),
                emphasis: 0.0,
                event: None,
            };
        }

        self.phase = CrashPhase::Holding;
        let event = if self.ascend_reported {
            None
        } else {
            self.ascend_reported = true;
            log::info!("crash camera reached overhead vantage");
            Some(TransitionEvent::CrashAscendComplete)
        };
        CrashFrame {
            transform: self.vantage,
            emphasis: 0.0,
            event,
        }
    }

    fn shake_frame(&self, elapsed: Duration) -> CrashFrame {
        let secs = elapsed.as_secs_f32();
        let decay = 1.0 - progress_of(elapsed, self.shake);
        let wave = (JITTER_HZ * (TAU * secs)).to_array().map(f32::sin);
        let jitter = Vec3::from_array(wave) * (self.amplitude * decay);
        let pulse = 0.5 + 0.5 * (TAU * self.pulse_hz * secs).cos();
        CrashFrame {
            transform: Transform::new(self.from.position + jitter, self.from.orientation),
            emphasis: pulse * decay,
            event: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(now: Instant) -> CrashSequence {
        CrashSequence::new(
            now,
            Transform::new(Vec3::new(0.0, 8.0, 10.0), Quat::from_rotation_y(0.4)),
            Vec3::new(2.0, 0.5, -3.0),
            &TransitionOptions::default(),
        )
    }

    #[test]
    fn shake_holds_orientation_and_pulses() {
        let t0 = Instant::now();
        let mut crash = sequence(t0);
        let opts = TransitionOptions::default();
        for ms in (0..1500).step_by(50) {
            let frame = crash.sample(t0 + Duration::from_millis(ms));
            assert_eq!(crash.phase(), CrashPhase::Shake);
            assert_eq!(frame.transform.orientation, crash.from.orientation);
            assert!((frame.transform.position - crash.from.position).length() <= opts.shake_amplitude * 1.8);
            assert!((0.0..=1.0).contains(&frame.emphasis));
            assert!(frame.event.is_none());
        }
        assert_eq!(crash.sample(t0).emphasis, 1.0);
    }

    #[test]
    fn ascend_complete_fires_exactly_once() {
        let t0 = Instant::now();
        let mut crash = sequence(t0);
        let mut events = 0;
        for ms in (0..8000).step_by(16) {
            if crash.sample(t0 + Duration::from_millis(ms)).event.is_some() {
                events += 1;
            }
        }
        // Re-evaluating the completed state never re-fires
        for _ in 0..5 {
            assert!(crash.sample(t0 + Duration::from_millis(9000)).event.is_none());
        }
        assert_eq!(events, 1);
        assert_eq!(crash.phase(), CrashPhase::Holding);
    }

    #[test]
    fn ascends_to_overhead_vantage() {
        let t0 = Instant::now();
        let mut crash = sequence(t0);
        let mid = crash.sample(t0 + Duration::from_millis(2500));
        assert_eq!(crash.phase(), CrashPhase::Ascending);
        assert!(mid.transform.position.y > crash.from.position.y);

        let held = crash.sample(t0 + Duration::from_millis(3500));
        assert_eq!(held.transform, crash.vantage);
        assert!(held.transform.forward().dot(Vec3::NEG_Y) > 0.999);
        assert!((held.transform.position.y - 25.5).abs() < 1e-4);
    }
}
