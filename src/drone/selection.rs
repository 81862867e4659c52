//! Weighted action draw with availability gating and substitution.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use super::actions::{
    plan_banner_orbit, plan_billboard_approach, plan_idle, plan_moving,
    plan_panoramic_dive, plan_rotate, plan_snake_orbit, plan_wall_run,
    ActionContext, ActionPlan, PlanFailure, WallCycle,
};
use super::schedule::DroneSchedule;
use crate::host::GameState;
use crate::options::ActionWeights;
use crate::transform::Transform;

/// Selectable action, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Hold in place.
    Idle,
    /// Fly to a random waypoint.
    Moving,
    /// Traverse a wall lane.
    WallRun,
    /// Orbit a banner.
    BannerOrbit,
    /// Orbit the player's head.
    SnakeOrbit,
    /// Spin in place.
    Rotate,
    /// Dolly toward the billboard.
    BillboardApproach,
    /// Climb, pan and dive.
    PanoramicDive,
}

impl ActionKind {
    /// Fixed candidate list, in draw order.
    pub const ALL: [Self; 8] = [
        Self::Idle,
        Self::Moving,
        Self::WallRun,
        Self::BannerOrbit,
        Self::SnakeOrbit,
        Self::Rotate,
        Self::BillboardApproach,
        Self::PanoramicDive,
    ];

    /// Configured weight before availability is applied.
    #[must_use]
    pub fn base_weight(self, weights: &ActionWeights) -> f32 {
        match self {
            Self::Idle => weights.idle,
            Self::Moving => weights.moving,
            Self::WallRun => weights.wall_run,
            Self::BannerOrbit => weights.banner_orbit,
            Self::SnakeOrbit => weights.snake_orbit,
            Self::Rotate => weights.rotate,
            Self::BillboardApproach => weights.billboard_approach,
            Self::PanoramicDive => weights.panoramic_dive,
        }
    }

    /// Whether the action's prerequisite is present right now.
    #[must_use]
    pub fn is_available(self, ctx: &ActionContext<'_>) -> bool {
        match self {
            Self::BannerOrbit => !ctx.layout.banners.is_empty(),
            Self::BillboardApproach => ctx.layout.billboard.is_some(),
            Self::SnakeOrbit => ctx.game_state == GameState::Playing,
            Self::Idle
            | Self::Moving
            | Self::WallRun
            | Self::Rotate
            | Self::PanoramicDive => true,
        }
    }

    /// Weight used for the draw; zero when unavailable.
    #[must_use]
    pub fn effective_weight(self, ctx: &ActionContext<'_>) -> f32 {
        if self.is_available(ctx) {
            self.base_weight(&ctx.options.weights).max(0.0)
        } else {
            0.0
        }
    }
}

/// Draws schedules for every drone of a fleet.
///
/// Owns the wall cycle so successive wall runs visit N, S, E, W in turn no
/// matter what the RNG produces.
#[derive(Debug, Clone, Default)]
pub struct ActionSelector {
    wall_cycle: WallCycle,
}

impl ActionSelector {
    /// Selector starting at the north wall.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted draw over [`ActionKind::ALL`]. Falls back to `Idle` when
    /// every weight is zero.
    pub fn draw_kind<R: Rng + ?Sized>(
        &self,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) -> ActionKind {
        let weights = ActionKind::ALL.map(|kind| kind.effective_weight(ctx));
        match WeightedIndex::new(weights) {
            Ok(dist) => ActionKind::ALL[dist.sample(rng)],
            Err(_) => ActionKind::Idle,
        }
    }

    /// Plan `kind` from `from`, substituting on failure.
    pub fn plan<R: Rng + ?Sized>(
        &mut self,
        kind: ActionKind,
        from: &Transform,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) -> ActionPlan {
        let planned = match kind {
            ActionKind::Idle => Ok(plan_idle(from, ctx, rng)),
            ActionKind::Moving => Ok(plan_moving(from, ctx, rng)),
            ActionKind::WallRun => {
                plan_wall_run(self.wall_cycle.next_wall(), ctx, rng)
            }
            ActionKind::BannerOrbit => plan_banner_orbit(from, ctx, rng),
            ActionKind::SnakeOrbit => plan_snake_orbit(from, ctx, rng),
            ActionKind::Rotate => Ok(plan_rotate(from, ctx, rng)),
            ActionKind::BillboardApproach => {
                plan_billboard_approach(from, ctx, rng)
            }
            ActionKind::PanoramicDive => Ok(plan_panoramic_dive(from, ctx)),
        };
        match planned {
            Ok(plan) => plan,
            Err(PlanFailure::MissingResource) => {
                log::warn!("{kind:?} resource missing, substituting moving");
                plan_moving(from, ctx, rng)
            }
            Err(PlanFailure::Degenerate) => {
                log::warn!("{kind:?} geometry degenerate, falling back to idle");
                plan_idle(from, ctx, rng)
            }
        }
    }

    /// Draw and plan a complete schedule starting at `ctx.now`.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        from: &Transform,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) -> DroneSchedule {
        let kind = self.draw_kind(ctx, rng);
        let plan = self.plan(kind, from, ctx, rng);
        let schedule = DroneSchedule::new(
            ctx.now,
            *from,
            plan,
            ctx.options.approach_speed,
            ctx.options.max_arc_height,
        );
        log::debug!(
            "scheduled {} (approach {:?}, main {:?})",
            schedule.action.name(),
            schedule.approach_duration,
            schedule.main_duration,
        );
        schedule
    }
}
