//! Panoramic dive: climb to a vantage, hover, tilt and pan a full turn,
//! then swoop down along a quadratic bezier.
//!
//! The phase timers run on the action's own main-phase clock, so the
//! sub-machine is independent of how long the outer approach took.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::{
    look_rotation, quadratic_bezier, quadratic_bezier_tangent, yaw_rotation,
};
use crate::util::tween::progress_of;

/// Hover at the vantage before the pan.
pub const HOVER_DURATION: Duration = Duration::from_millis(2000);
/// Whole tilt-and-pan window.
pub const ROTATE_DOWN_DURATION: Duration = Duration::from_millis(10_000);
/// Leading part of the rotate-down window spent tilting.
pub const TILT_DURATION: Duration = Duration::from_millis(1000);
/// Bezier descent.
pub const DIVE_DURATION: Duration = Duration::from_millis(7000);
/// Main-phase length: hover + rotate-down + dive.
pub const MAIN_DURATION: Duration = Duration::from_millis(
    HOVER_DURATION.as_millis() as u64
        + ROTATE_DOWN_DURATION.as_millis() as u64
        + DIVE_DURATION.as_millis() as u64,
);

/// Fraction of the dive over which the view turns from the pan heading to
/// the flight path.
const DIVE_LOOK_BLEND: f32 = 0.15;

/// Sub-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivePhase {
    /// Climbing to the vantage (covered by the approach phase).
    Ascending,
    /// Holding level at the vantage.
    Hovering,
    /// Tilting down, then panning a full turn.
    RotatingDown,
    /// Descending along the bezier.
    Diving,
}

/// Control points of the descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiveGeometry {
    /// Vantage the dive leaves from.
    pub from: Vec3,
    /// Bezier control point.
    pub control: Vec3,
    /// Landing point inside the playable bounds.
    pub to: Vec3,
}

/// Runtime state of the panoramic sub-machine.
#[derive(Debug, Clone, PartialEq)]
pub struct PanoramicDive {
    /// Current phase.
    pub phase: DivePhase,
    /// Main-phase time at which `phase` began.
    pub phase_started: Duration,
    /// Descent geometry, chosen on entering [`DivePhase::Diving`].
    pub dive: Option<DiveGeometry>,
    /// Yaw held while hovering and where the pan starts.
    pub heading: f32,
    /// Downward tilt reached during rotate-down, in radians.
    pub tilt: f32,
}

impl PanoramicDive {
    fn new(heading: f32, tilt: f32) -> Self {
        Self {
            phase: DivePhase::Ascending,
            phase_started: Duration::ZERO,
            dive: None,
            heading,
            tilt,
        }
    }

    /// Stationary phases (the pan only turns the view).
    #[must_use]
    pub fn holds_position(&self) -> bool {
        !matches!(self.phase, DivePhase::Diving)
    }

    /// Step the sub-machine to `elapsed` and return the pose.
    pub(crate) fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        vantage: &Transform,
        fallback: Quat,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) -> Transform {
        self.step_phases(elapsed, vantage.position, ctx, rng);
        let local = elapsed.saturating_sub(self.phase_started);

        match self.phase {
            DivePhase::Ascending | DivePhase::Hovering => {
                Transform::new(vantage.position, yaw_rotation(self.heading))
            }
            DivePhase::RotatingDown => Transform::new(
                vantage.position,
                self.rotate_down_orientation(local),
            ),
            DivePhase::Diving => self.dive_pose(local, vantage, fallback),
        }
    }

    /// Run phase transitions, catching up through several if a frame
    /// spans more than one boundary.
    fn step_phases<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        vantage: Vec3,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) {
        loop {
            let local = elapsed.saturating_sub(self.phase_started);
            match self.phase {
                // Hands over on the first update; the climb itself is the
                // schedule's approach.
                DivePhase::Ascending => {
                    self.phase = DivePhase::Hovering;
                    self.phase_started = Duration::ZERO;
                }
                DivePhase::Hovering if local >= HOVER_DURATION => {
                    self.phase = DivePhase::RotatingDown;
                    self.phase_started += HOVER_DURATION;
                }
                DivePhase::RotatingDown if local >= ROTATE_DOWN_DURATION => {
                    self.phase = DivePhase::Diving;
                    self.phase_started += ROTATE_DOWN_DURATION;
                    self.dive = plan_descent(vantage, ctx, rng);
                    log::debug!(
                        "panoramic dive: descending to {:?}",
                        self.dive.map(|d| d.to)
                    );
                }
                _ => return,
            }
        }
    }

    fn rotate_down_orientation(&self, local: Duration) -> Quat {
        let (pitch, yaw) = if local < TILT_DURATION {
            let t = progress_of(local, TILT_DURATION);
            (self.tilt * EasingFunction::QuadraticOut.evaluate(t), self.heading)
        } else {
            let pan = ROTATE_DOWN_DURATION.saturating_sub(TILT_DURATION);
            let t = progress_of(local - TILT_DURATION, pan);
            (self.tilt, self.heading + TAU * EasingFunction::CubicInOut.evaluate(t))
        };
        (yaw_rotation(yaw) * Quat::from_rotation_x(-pitch)).normalize()
    }

    fn dive_pose(&self, local: Duration, vantage: &Transform, fallback: Quat) -> Transform {
        let Some(dive) = self.dive else {
            // No usable landing point: keep looking down from the vantage.
            return Transform::new(vantage.position, fallback);
        };
        let raw = progress_of(local, DIVE_DURATION);
        let t = EasingFunction::CubicInOut.evaluate(raw);
        let position = quadratic_bezier(dive.from, dive.control, dive.to, t);

        // Tangent vanishes at the eased endpoints; sample slightly inside.
        let tangent_t = t.clamp(0.02, 0.98);
        let path = quadratic_bezier_tangent(dive.from, dive.control, dive.to, tangent_t);
        let along_path = look_rotation(path).unwrap_or(fallback);
        let pan_end = (yaw_rotation(self.heading) * Quat::from_rotation_x(-self.tilt)).normalize();
        let blend = (raw / DIVE_LOOK_BLEND).min(1.0);
        Transform::new(position, pan_end.slerp(along_path, blend))
    }
}

/// Bezier from the vantage to a random low point, bowing out level with
/// the vantage so the drone swoops rather than drops.
fn plan_descent<R: Rng + ?Sized>(
    vantage: Vec3,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Option<DiveGeometry> {
    let floor = ctx.options.dive_floor_altitude;
    let to = ctx.bounds.random_point(rng, floor, floor);
    if to.distance(vantage) < f32::EPSILON {
        return None;
    }
    let mid = (vantage + to) * 0.5;
    Some(DiveGeometry {
        from: vantage,
        control: Vec3::new(mid.x, vantage.y, mid.z),
        to,
    })
}

pub(crate) fn plan(from: &Transform, ctx: &ActionContext<'_>) -> ActionPlan {
    let center = ctx.layout.board_center;
    let vantage = ctx.bounds.clamp(Vec3::new(
        center.x,
        ctx.options.panorama_altitude,
        center.z,
    ));

    // Keep the drone's current heading for the hover.
    let forward = from.forward();
    let heading = if forward.x == 0.0 && forward.z == 0.0 {
        0.0
    } else {
        (-forward.x).atan2(-forward.z)
    };

    ActionPlan {
        target: Transform::new(vantage, yaw_rotation(heading)),
        main_duration: MAIN_DURATION,
        action: ActionSpec::PanoramicDive(PanoramicDive::new(
            heading,
            ctx.options.panorama_tilt_deg.to_radians(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Instant;

    use super::*;
    use crate::drone::actions::fixtures::World;

    fn run_to(
        dive: &mut PanoramicDive,
        vantage: &Transform,
        world: &World,
        rng: &mut StdRng,
        ms: u64,
    ) -> Transform {
        dive.advance(
            Duration::from_millis(ms),
            vantage,
            vantage.orientation,
            &world.ctx(Instant::now()),
            rng,
        )
    }

    #[test]
    fn main_duration_is_hover_rotate_dive() {
        assert_eq!(MAIN_DURATION, Duration::from_millis(2000 + 10_000 + 7000));
        let world = World::bare();
        let far = Transform::new(Vec3::new(30.0, 5.0, 30.0), Quat::IDENTITY);
        let near = Transform::new(Vec3::new(0.0, 44.0, 1.0), Quat::IDENTITY);
        assert_eq!(plan(&far, &world.ctx(Instant::now())).main_duration, MAIN_DURATION);
        assert_eq!(plan(&near, &world.ctx(Instant::now())).main_duration, MAIN_DURATION);
    }

    #[test]
    fn ascending_hands_over_on_first_update() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()));
        let ActionSpec::PanoramicDive(mut dive) = plan.action else {
            panic!("expected panoramic dive");
        };
        assert_eq!(dive.phase, DivePhase::Ascending);
        let _ = run_to(&mut dive, &plan.target, &world, &mut rng, 0);
        assert_eq!(dive.phase, DivePhase::Hovering);
    }

    #[test]
    fn phases_follow_the_action_clock() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(3);
        let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()));
        let vantage = plan.target;
        let ActionSpec::PanoramicDive(mut dive) = plan.action else {
            panic!("expected panoramic dive");
        };

        let hover = run_to(&mut dive, &vantage, &world, &mut rng, 1000);
        assert_eq!(dive.phase, DivePhase::Hovering);
        assert_eq!(hover.position, vantage.position);

        let _ = run_to(&mut dive, &vantage, &world, &mut rng, 2500);
        assert_eq!(dive.phase, DivePhase::RotatingDown);
        assert_eq!(dive.phase_started, HOVER_DURATION);

        // Tilt finished: looking down by the configured tilt
        let tilted = run_to(&mut dive, &vantage, &world, &mut rng, 3000);
        let down = -tilted.forward().y;
        assert!((down - world.options.panorama_tilt_deg.to_radians().sin()).abs() < 1e-3);

        let _ = run_to(&mut dive, &vantage, &world, &mut rng, 12_000);
        assert_eq!(dive.phase, DivePhase::Diving);
        assert_eq!(dive.phase_started, HOVER_DURATION + ROTATE_DOWN_DURATION);
        assert!(dive.dive.is_some());

        let landed = run_to(&mut dive, &vantage, &world, &mut rng, 19_000);
        let geometry = dive.dive.unwrap();
        assert!((landed.position - geometry.to).length() < 1e-3);
        assert!(world.bounds.contains(geometry.to));
        assert!((geometry.to.y - world.options.dive_floor_altitude).abs() < 1e-5);
    }

    #[test]
    fn large_frame_catches_up_through_phases() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(8);
        let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()));
        let vantage = plan.target;
        let ActionSpec::PanoramicDive(mut dive) = plan.action else {
            panic!("expected panoramic dive");
        };
        let _ = run_to(&mut dive, &vantage, &world, &mut rng, 15_000);
        assert_eq!(dive.phase, DivePhase::Diving);
        assert!(!dive.holds_position());
    }

    #[test]
    fn pan_completes_a_full_turn() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()));
        let vantage = plan.target;
        let ActionSpec::PanoramicDive(mut dive) = plan.action else {
            panic!("expected panoramic dive");
        };
        let after_tilt = run_to(&mut dive, &vantage, &world, &mut rng, 3000);
        let mid_pan = run_to(&mut dive, &vantage, &world, &mut rng, 7500);
        let end_pan = run_to(&mut dive, &vantage, &world, &mut rng, 11_999);
        assert!(after_tilt.orientation.angle_between(end_pan.orientation) < 0.01);
        // Halfway through the pan the view faces the opposite way
        let a = after_tilt.forward();
        let b = mid_pan.forward();
        assert!(Vec3::new(a.x, 0.0, a.z).dot(Vec3::new(b.x, 0.0, b.z)) < 0.0);
    }
}
