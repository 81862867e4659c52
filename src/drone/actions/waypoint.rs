use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec};
use crate::transform::Transform;

/// Hold the current pose for a random interval.
pub(crate) fn plan_idle<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> ActionPlan {
    let opts = ctx.options;
    let hold_ms = if opts.idle_max_ms > opts.idle_min_ms {
        rng.random_range(opts.idle_min_ms..=opts.idle_max_ms)
    } else {
        opts.idle_min_ms
    };
    ActionPlan {
        target: *from,
        main_duration: Duration::from_millis(hold_ms),
        action: ActionSpec::Idle,
    }
}

/// Fly to a random point inside the bounds, facing the direction of travel,
/// then hover briefly.
pub(crate) fn plan_moving<R: Rng + ?Sized>(
    from: &Transform,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> ActionPlan {
    let waypoint = ctx.bounds.random_safe_point(rng);
    let travel = waypoint - from.position;
    ActionPlan {
        target: Transform::looking_at(
            waypoint,
            waypoint + travel,
            from.orientation,
        ),
        main_duration: Duration::from_millis(ctx.options.moving_hover_ms),
        action: ActionSpec::Moving,
    }
}
