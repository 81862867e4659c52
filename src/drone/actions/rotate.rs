use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::yaw_rotation;

/// Spin magnitudes to choose from, in degrees.
const SPIN_CHOICES_DEG: [f32; 3] = [90.0, 180.0, 360.0];

/// Yaw spin in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotate {
    /// Signed spin in radians.
    pub arc: f32,
}

impl Rotate {
    pub(crate) fn pose(&self, main_start: &Transform, t: f32) -> Transform {
        let yaw = self.arc * EasingFunction::CubicInOut.evaluate(t);
        Transform::new(
            main_start.position,
            (yaw_rotation(yaw) * main_start.orientation).normalize(),
        )
    }
}

/// Spin duration scales linearly with the magnitude.
pub(crate) fn plan<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> ActionPlan {
    let degrees = SPIN_CHOICES_DEG[rng.random_range(0..SPIN_CHOICES_DEG.len())];
    let sign = if rng.random_bool(0.5) { 1.0_f32 } else { -1.0 };
    let millis = (degrees * ctx.options.rotate_ms_per_degree).round() as u64;
    ActionPlan {
        target: *from,
        main_duration: Duration::from_millis(millis),
        action: ActionSpec::Rotate(Rotate {
            arc: sign * degrees.to_radians(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Instant;

    use super::*;
    use crate::drone::actions::fixtures::World;

    #[test]
    fn duration_scales_with_magnitude() {
        let world = World::bare();
        let ctx = world.ctx(Instant::now());
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..30 {
            let plan = plan(&Transform::IDENTITY, &ctx, &mut rng);
            let ActionSpec::Rotate(spin) = &plan.action else {
                panic!("expected rotate");
            };
            let degrees = spin.arc.abs().to_degrees();
            let expected = degrees * world.options.rotate_ms_per_degree;
            assert!((plan.main_duration.as_millis() as f32 - expected).abs() <= 1.0);
            assert!([90.0, 180.0, 360.0].iter().any(|d| (d - degrees).abs() < 0.01));
        }
    }

    #[test]
    fn spins_in_place() {
        let start = Transform::new(Vec3::new(3.0, 9.0, -2.0), Quat::IDENTITY);
        let spin = Rotate {
            arc: std::f32::consts::FRAC_PI_2,
        };
        let mid = spin.pose(&start, 0.5);
        assert_eq!(mid.position, start.position);
        let end = spin.pose(&start, 1.0);
        assert!(end.orientation.angle_between(yaw_rotation(std::f32::consts::FRAC_PI_2)) < 1e-4);
    }
}
