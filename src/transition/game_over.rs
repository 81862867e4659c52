//! Game-over pan back to the orbit vantage.

use web_time::{Duration, Instant};

use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::tween::Tween;

/// Pan from the last camera pose to the orbit's starting vantage.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverPan {
    /// Camera transform captured at game over.
    pub from: Transform,
    /// Orbit pose at the configured start azimuth.
    pub to: Transform,
    /// Orbit azimuth `to` corresponds to.
    pub azimuth: f32,
    tween: Tween,
}

impl GameOverPan {
    /// Pan over `duration` starting at `now`.
    #[must_use]
    pub fn new(
        now: Instant,
        from: Transform,
        to: Transform,
        azimuth: f32,
        duration: Duration,
    ) -> Self {
        Self {
            from,
            to,
            azimuth,
            tween: Tween::new(now, duration),
        }
    }

    /// Pose at `now` and whether the pan has arrived.
    #[must_use]
    pub fn sample(&self, now: Instant) -> (Transform, bool) {
        let eased = self.tween.eased(now, EasingFunction::CubicInOut);
        (self.from.interpolate(&self.to, eased), self.tween.is_complete(now))
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    #[test]
    fn eases_to_orbit_start() {
        let t0 = Instant::now();
        let pan = GameOverPan::new(
            t0,
            Transform::new(Vec3::new(2.0, 1.0, 2.0), Quat::IDENTITY),
            Transform::new(Vec3::new(60.0, 35.0, 0.0), Quat::from_rotation_y(1.0)),
            0.0,
            Duration::from_millis(2000),
        );
        let (early, done) = pan.sample(t0 + Duration::from_millis(200));
        assert!(!done);
        let linear = pan.from.position.lerp(pan.to.position, 0.1);
        // Cubic ease-in starts slower than linear
        assert!(early.position.distance(pan.from.position) < linear.distance(pan.from.position));

        let (end, done) = pan.sample(t0 + Duration::from_millis(2000));
        assert!(done);
        assert!((end.position - pan.to.position).length() < 1e-5);
    }
}
