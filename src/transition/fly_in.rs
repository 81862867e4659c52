//! Round-start camera flight onto the gameplay view.

use web_time::{Duration, Instant};

use crate::camera::controller::gameplay_pose;
use crate::host::{GameplayView, PlayerSnapshot};
use crate::options::{CameraOptions, TransitionOptions};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::arc_bump;
use crate::util::tween::Tween;

/// Round-start flight from wherever the camera was onto the player's
/// gameplay view.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyIn {
    /// Camera transform captured when the round started.
    pub from: Transform,
    /// View the flight lands on.
    pub view: GameplayView,
    flight: Tween,
    arc: f32,
}

impl FlyIn {
    /// Fly-in captured at `now`.
    #[must_use]
    pub fn new(
        now: Instant,
        from: Transform,
        view: GameplayView,
        options: &TransitionOptions,
    ) -> Self {
        let delay = Duration::from_millis(options.fly_in_delay_ms);
        Self {
            from,
            view,
            flight: Tween::new(now + delay, Duration::from_millis(options.fly_in_ms)),
            arc: options.fly_in_arc,
        }
    }

    /// Pose at `now` and whether the flight has landed. The landing pose
    /// follows the live player snapshot.
    #[must_use]
    pub fn sample(
        &self,
        now: Instant,
        player: &PlayerSnapshot,
        camera: &CameraOptions,
    ) -> (Transform, bool) {
        if now < self.flight.start {
            return (self.from, false);
        }
        let t = self.flight.progress(now);
        let target = gameplay_pose(self.view.view_mode(), player, camera);
        let mut pose = self
            .from
            .interpolate(&target, EasingFunction::CubicInOut.evaluate(t));
        pose.position.y += arc_bump(t, self.arc);
        (pose, self.flight.is_complete(now))
    }

}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    fn fly_in(now: Instant) -> FlyIn {
        FlyIn::new(
            now,
            Transform::new(Vec3::new(0.0, 40.0, 60.0), Quat::IDENTITY),
            GameplayView::FirstPerson,
            &TransitionOptions::default(),
        )
    }

    #[test]
    fn holds_during_delay() {
        let t0 = Instant::now();
        let anim = fly_in(t0);
        let (pose, done) = anim.sample(
            t0 + Duration::from_millis(400),
            &PlayerSnapshot::default(),
            &CameraOptions::default(),
        );
        assert_eq!(pose, anim.from);
        assert!(!done);
    }

    #[test]
    fn lands_on_gameplay_pose() {
        let t0 = Instant::now();
        let anim = fly_in(t0);
        let player = PlayerSnapshot {
            head: Vec3::new(5.0, 0.5, 5.0),
            heading: 1.2,
            ..PlayerSnapshot::default()
        };
        let camera = CameraOptions::default();
        let (mid, done) = anim.sample(t0 + Duration::from_millis(1750), &player, &camera);
        assert!(!done);
        let straight = anim.from.interpolate(
            &gameplay_pose(anim.view.view_mode(), &player, &camera),
            0.5,
        );
        assert!(mid.position.y > straight.position.y);

        let (end, done) = anim.sample(t0 + Duration::from_millis(3000), &player, &camera);
        assert!(done);
        let target = gameplay_pose(anim.view.view_mode(), &player, &camera);
        assert!((end.position - target.position).length() < 1e-4);
    }
}
