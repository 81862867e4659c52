//! Time-bounded action assignment driving one drone.

use glam::Quat;
use rand::Rng;
use web_time::{Duration, Instant};

use super::actions::{ActionContext, ActionPlan, ActionSpec};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::arc_bump;
use crate::util::tween::progress_of;

/// Share of the approach distance used as the vertical bump height.
const ARC_HEIGHT_RATIO: f32 = 0.25;

/// Approach phase followed by the action's main phase.
///
/// Created atomically by selection and replaced wholesale on expiry. The
/// timing and transform fields never change after construction; only a
/// panoramic dive's sub-machine state inside `action` advances.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneSchedule {
    /// When the approach began.
    pub start_time: Instant,
    /// Pose the approach leaves from.
    pub start_transform: Transform,
    /// Pose the approach arrives at; the main phase starts here.
    pub target_transform: Transform,
    /// Straight-line flight time at the approach speed.
    pub approach_duration: Duration,
    /// Main-phase length.
    pub main_duration: Duration,
    /// `approach_duration + main_duration`.
    pub total_duration: Duration,
    /// Peak of the vertical bump added to the approach.
    pub arc_height: f32,
    /// Main-phase behavior.
    pub action: ActionSpec,
}

/// Where in its lifetime a schedule is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulePhase {
    /// Flying to the target; linear progress in [0, 1].
    Approach(f32),
    /// Running the action; time since the main phase began.
    Main(Duration),
}

impl DroneSchedule {
    /// Schedule from `from` executing `plan`, starting at `start_time`.
    #[must_use]
    pub fn new(
        start_time: Instant,
        from: Transform,
        plan: ActionPlan,
        approach_speed: f32,
        max_arc_height: f32,
    ) -> Self {
        let distance = from.position.distance(plan.target.position);
        let approach_duration = approach_duration(distance, approach_speed);
        Self {
            start_time,
            start_transform: from,
            target_transform: plan.target,
            approach_duration,
            main_duration: plan.main_duration,
            total_duration: approach_duration + plan.main_duration,
            arc_height: (distance * ARC_HEIGHT_RATIO).min(max_arc_height),
            action: plan.action,
        }
    }

    /// Whether the schedule has run its full length.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= self.total_duration
    }

    /// Phase at `now`.
    #[must_use]
    pub fn phase(&self, now: Instant) -> SchedulePhase {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed < self.approach_duration {
            SchedulePhase::Approach(progress_of(elapsed, self.approach_duration))
        } else {
            SchedulePhase::Main(elapsed - self.approach_duration)
        }
    }

    /// Eased approach pose with the vertical bump, flying toward the
    /// action's live approach target.
    #[must_use]
    pub fn approach_pose(&self, t: f32, ctx: &ActionContext<'_>) -> Transform {
        let eased = EasingFunction::QuadraticInOut.evaluate(t);
        let target = self.action.approach_target(&self.target_transform, ctx);
        let mut pose = self.start_transform.interpolate(&target, eased);
        pose.position.y += arc_bump(t, self.arc_height);
        pose
    }

    /// Pose at `now`, and whether the drone is deliberately stationary.
    pub fn pose<R: Rng + ?Sized>(
        &mut self,
        ctx: &ActionContext<'_>,
        current: Quat,
        rng: &mut R,
    ) -> (Transform, bool) {
        match self.phase(ctx.now) {
            SchedulePhase::Approach(t) => (self.approach_pose(t, ctx), false),
            SchedulePhase::Main(elapsed) => {
                let pose = self.action.main_pose(
                    &self.target_transform,
                    elapsed.min(self.main_duration),
                    self.main_duration,
                    current,
                    ctx,
                    rng,
                );
                (pose, self.action.holds_position())
            }
        }
    }
}

/// Straight-line flight time for `distance` at `speed` units per second.
#[must_use]
pub fn approach_duration(distance: f32, speed: f32) -> Duration {
    if speed <= 0.0 || !distance.is_finite() {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(f64::from(distance) / f64::from(speed))
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::drone::actions::fixtures::World;
    use crate::drone::actions::{plan_snake_orbit, Wall, WallRun};

    fn wall_run_plan(target: Vec3) -> ActionPlan {
        ActionPlan {
            target: Transform::new(target, Quat::IDENTITY),
            main_duration: Duration::from_millis(30_000),
            action: ActionSpec::WallRun(WallRun {
                start: target,
                end: target + Vec3::X * 50.0,
                wall: Wall::North,
            }),
        }
    }

    #[test]
    fn wall_run_example_durations() {
        let from = Transform::new(Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY);
        let schedule = DroneSchedule::new(
            Instant::now(),
            from,
            wall_run_plan(Vec3::new(10.0, 5.0, 0.0)),
            3.0,
            4.0,
        );
        let approach_ms = schedule.approach_duration.as_secs_f64() * 1000.0;
        assert!((approach_ms - 3333.33).abs() < 1.0, "approach {approach_ms}");
        assert_eq!(schedule.main_duration, Duration::from_millis(30_000));
        let total_ms = schedule.total_duration.as_secs_f64() * 1000.0;
        assert!((total_ms - 33_333.33).abs() < 1.0, "total {total_ms}");
        assert_eq!(
            schedule.total_duration,
            schedule.approach_duration + schedule.main_duration
        );
    }

    #[test]
    fn approach_is_proportional_to_distance() {
        let a = approach_duration(10.0, 4.0).as_secs_f64();
        let b = approach_duration(20.0, 4.0).as_secs_f64();
        assert!((b / a - 2.0).abs() < 1e-6);
        assert_eq!(approach_duration(0.0, 4.0), Duration::ZERO);
    }

    #[test]
    fn approach_bumps_upward_midway_and_lands_on_target() {
        let from = Transform::new(Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY);
        let schedule = DroneSchedule::new(
            Instant::now(),
            from,
            wall_run_plan(Vec3::new(16.0, 5.0, 0.0)),
            3.0,
            10.0,
        );
        assert_eq!(schedule.arc_height, 4.0);
        let world = World::furnished();
        let ctx = world.ctx(Instant::now());
        let mid = schedule.approach_pose(0.5, &ctx);
        assert!((mid.position.y - 9.0).abs() < 1e-4);
        let end = schedule.approach_pose(1.0, &ctx);
        assert!((end.position - Vec3::new(16.0, 5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn phase_switches_after_approach() {
        let start = Instant::now();
        let from = Transform::new(Vec3::ZERO, Quat::IDENTITY);
        let schedule = DroneSchedule::new(
            start,
            from,
            wall_run_plan(Vec3::new(3.0, 0.0, 0.0)),
            3.0,
            4.0,
        );
        assert!(matches!(schedule.phase(start), SchedulePhase::Approach(_)));
        let later = start + Duration::from_millis(1500);
        assert_eq!(
            schedule.phase(later),
            SchedulePhase::Main(Duration::from_millis(500))
        );
        assert!(!schedule.is_expired(later));
        assert!(schedule.is_expired(start + Duration::from_millis(31_000)));
    }

    #[test]
    fn snake_orbit_approach_lands_on_the_moving_head_orbit() {
        let start = Instant::now();
        let mut world = World::furnished();
        let mut rng = StdRng::seed_from_u64(11);
        let from = Transform::new(Vec3::new(-35.0, 20.0, -35.0), Quat::IDENTITY);
        let plan = plan_snake_orbit(&from, &world.ctx(start), &mut rng).unwrap();
        let mut schedule = DroneSchedule::new(start, from, plan, 3.0, 4.0);

        // The snake travels while the drone is still on its way
        world.player.head += Vec3::X * 20.0;
        let before = start + schedule.approach_duration - Duration::from_millis(1);
        let after = start + schedule.approach_duration + Duration::from_millis(1);
        let (a, _) = schedule.pose(&world.ctx(before), from.orientation, &mut rng);
        let (b, _) = schedule.pose(&world.ctx(after), a.orientation, &mut rng);
        assert!(
            a.position.distance(b.position) < 0.05,
            "jump of {}",
            a.position.distance(b.position)
        );
    }
}
