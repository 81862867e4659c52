use glam::{Quat, Vec3};
use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec, PlanFailure};
use crate::host::GameState;
use crate::transform::Transform;
use crate::util::easing::EasingFunction;
use crate::util::geometry::{circle_point, horizontal_angle};

/// Degrees swept around the player's head.
const SNAKE_ARC_DEG: f32 = 270.0;

/// Eased arc around the player's live head position.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeOrbit {
    /// Orbit radius.
    pub radius: f32,
    /// Signed swept angle in radians.
    pub arc: f32,
    /// Angle around the head where the orbit begins.
    pub start_angle: f32,
    /// Height above the head.
    pub height: f32,
}

impl SnakeOrbit {
    /// Pose around `head`, which moves between frames.
    pub(crate) fn pose(&self, t: f32, head: Vec3, fallback: Quat) -> Transform {
        let eased = EasingFunction::QuadraticInOut.evaluate(t);
        let angle = self.start_angle + self.arc * eased;
        let center = head + Vec3::Y * self.height;
        let position = circle_point(center, self.radius, angle);
        Transform::looking_at(position, head, fallback)
    }
}

pub(crate) fn plan<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Result<ActionPlan, PlanFailure> {
    if ctx.game_state != GameState::Playing {
        return Err(PlanFailure::MissingResource);
    }
    let head = ctx.player.head;
    let sign = if rng.random_bool(0.5) { 1.0_f32 } else { -1.0 };
    let orbit = SnakeOrbit {
        radius: ctx.options.snake_orbit_radius,
        arc: sign * SNAKE_ARC_DEG.to_radians(),
        // Start on the side the drone is already on
        start_angle: horizontal_angle(head, from.position),
        height: ctx.options.snake_orbit_height,
    };
    Ok(ActionPlan {
        target: orbit.pose(0.0, head, from.orientation),
        main_duration: Duration::from_millis(ctx.options.snake_orbit_ms),
        action: ActionSpec::SnakeOrbit(orbit),
    })
}
