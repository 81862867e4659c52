use glam::{Quat, Vec3};
use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec, PlanFailure};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::circle_point;

/// Eased horizontal arc around a banner anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerOrbit {
    /// Orbit center: the banner, altitude-clamped.
    pub center: Vec3,
    /// Orbit radius.
    pub radius: f32,
    /// Outward normal from the board center toward the banner.
    pub normal: Vec3,
    /// Signed swept angle in radians.
    pub arc: f32,
    /// Angle of the approach point around `center`.
    pub start_angle: f32,
}

impl BannerOrbit {
    pub(crate) fn pose(&self, t: f32, fallback: Quat) -> Transform {
        let eased = EasingFunction::QuadraticInOut.evaluate(t);
        let angle = self.start_angle + self.arc * eased;
        let position = circle_point(self.center, self.radius, angle);
        Transform::looking_at(position, self.center, fallback)
    }
}

pub(crate) fn plan<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Result<ActionPlan, PlanFailure> {
    let banners = &ctx.layout.banners;
    if banners.is_empty() {
        return Err(PlanFailure::MissingResource);
    }
    let banner = banners[rng.random_range(0..banners.len())].position;

    let outward = banner - ctx.layout.board_center;
    let normal = Vec3::new(outward.x, 0.0, outward.z)
        .try_normalize()
        .ok_or(PlanFailure::Degenerate)?;

    let opts = ctx.options;
    let center = Vec3::new(banner.x, ctx.bounds.clamp_altitude(banner.y), banner.z);
    let start_angle = normal.z.atan2(normal.x);
    let sign = if rng.random_bool(0.5) { 1.0_f32 } else { -1.0 };
    let sweep = rng.random_range(0.5_f32..=1.0) * opts.banner_max_arc_deg.to_radians();

    let orbit = BannerOrbit {
        center,
        radius: opts.banner_orbit_radius,
        normal,
        arc: sign * sweep,
        start_angle,
    };
    Ok(ActionPlan {
        target: orbit.pose(0.0, from.orientation),
        main_duration: Duration::from_millis(opts.banner_orbit_ms),
        action: ActionSpec::BannerOrbit(orbit),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Instant;

    use super::*;
    use crate::drone::actions::fixtures::World;

    #[test]
    fn missing_banners_reported() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(0);
        let result = plan(&Transform::IDENTITY, &world.ctx(Instant::now()), &mut rng);
        assert_eq!(result, Err(PlanFailure::MissingResource));
    }

    #[test]
    fn banner_at_board_center_is_degenerate() {
        let mut world = World::furnished();
        world.layout.banners.truncate(1);
        world.layout.banners[0].position = Vec3::new(0.0, 12.0, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let result = plan(&Transform::IDENTITY, &world.ctx(Instant::now()), &mut rng);
        assert_eq!(result, Err(PlanFailure::Degenerate));
    }

    #[test]
    fn orbit_starts_on_the_outward_side() {
        let world = World::furnished();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()), &mut rng).unwrap();
            let ActionSpec::BannerOrbit(orbit) = &plan.action else {
                panic!("expected banner orbit");
            };
            // Approach point lies further from the board center than the banner
            let start = plan.target.position;
            assert!(start.length() > orbit.center.length());
            assert!(orbit.arc.abs() <= 120f32.to_radians() + 1e-5);
            assert!(orbit.arc.abs() >= 60f32.to_radians() - 1e-5);
            assert!(((start - orbit.center).length() - orbit.radius).abs() < 1e-4);
        }
    }

    #[test]
    fn orbit_keeps_radius_and_faces_banner() {
        let orbit = BannerOrbit {
            center: Vec3::new(30.0, 15.0, 0.0),
            radius: 12.0,
            normal: Vec3::X,
            arc: 2.0,
            start_angle: 0.0,
        };
        for i in 0..=10 {
            let pose = orbit.pose(i as f32 / 10.0, Quat::IDENTITY);
            assert!(((pose.position - orbit.center).length() - 12.0).abs() < 1e-4);
            let to_center = (orbit.center - pose.position).normalize();
            assert!(pose.forward().dot(to_center) > 0.999);
        }
        let end = orbit.pose(1.0, Quat::IDENTITY).position;
        assert!((end - circle_point(orbit.center, 12.0, 2.0)).length() < 1e-4);
    }
}
