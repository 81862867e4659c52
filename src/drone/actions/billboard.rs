use glam::{Quat, Vec3};
use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec, PlanFailure};
use crate::transform::Transform;
use crate::util::easing::EasingFunction;

/// Dolly along the billboard's face normal while staring at the face.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardApproach {
    /// Cruise start, far out along the normal.
    pub start: Vec3,
    /// Cruise end, close to the face.
    pub end: Vec3,
    /// Fixed look-at point on the face.
    pub look_at: Vec3,
}

impl BillboardApproach {
    pub(crate) fn pose(&self, t: f32, fallback: Quat) -> Transform {
        let eased = EasingFunction::CubicInOut.evaluate(t);
        let position = self.start.lerp(self.end, eased);
        Transform::looking_at(position, self.look_at, fallback)
    }
}

pub(crate) fn plan<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    _rng: &mut R,
) -> Result<ActionPlan, PlanFailure> {
    let billboard = ctx.layout.billboard.ok_or(PlanFailure::MissingResource)?;
    let normal = billboard.normal.try_normalize().ok_or(PlanFailure::Degenerate)?;
    let opts = ctx.options;

    let start = ctx.bounds.clamp(billboard.center + normal * opts.billboard_far);
    let end = ctx.bounds.clamp(billboard.center + normal * opts.billboard_near);
    if start.distance(end) < f32::EPSILON {
        return Err(PlanFailure::Degenerate);
    }

    let dolly = BillboardApproach {
        start,
        end,
        look_at: billboard.center,
    };
    Ok(ActionPlan {
        target: dolly.pose(0.0, from.orientation),
        main_duration: Duration::from_millis(opts.billboard_cruise_ms),
        action: ActionSpec::BillboardApproach(dolly),
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
    fn missing_billboard_reported() {
        let world = World::bare();
        let mut rng = StdRng::seed_from_u64(0);
        let result = plan(&Transform::IDENTITY, &world.ctx(Instant::now()), &mut rng);
        assert_eq!(result, Err(PlanFailure::MissingResource));
    }

    #[test]
    fn cruise_runs_along_the_normal_toward_the_face() {
        let world = World::furnished();
        let mut rng = StdRng::seed_from_u64(0);
        let plan = plan(&Transform::IDENTITY, &world.ctx(Instant::now()), &mut rng).unwrap();
        let ActionSpec::BillboardApproach(dolly) = &plan.action else {
            panic!("expected billboard approach");
        };
        let face = dolly.look_at;
        assert!(dolly.start.distance(face) > dolly.end.distance(face));
        assert_eq!(dolly.start.x, face.x);
        assert_eq!(dolly.end.y, face.y);

        for i in 0..=4 {
            let pose = dolly.pose(i as f32 / 4.0, Quat::IDENTITY);
            let to_face = (face - pose.position).normalize();
            assert!(pose.forward().dot(to_face) > 0.999);
        }
    }
}
