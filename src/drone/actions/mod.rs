//! Parametrized drone motion primitives.
//!
//! Each primitive has two halves:
//! - a **planner** that, given the drone's current transform and the world,
//!   produces an [`ActionPlan`]: the pose to approach, the main-phase
//!   duration and the [`ActionSpec`] payload;
//! - a **motion function** that maps main-phase elapsed time onto a pose.
//!
//! Planners fail with [`PlanFailure`] instead of producing bad geometry; the
//! selector substitutes a waypoint move or an idle hold.

mod banner_orbit;
mod billboard;
mod panoramic;
mod rotate;
mod snake_orbit;
mod waypoint;
mod wall_run;

pub(crate) use banner_orbit::plan as plan_banner_orbit;
pub use banner_orbit::BannerOrbit;
pub(crate) use billboard::plan as plan_billboard_approach;
pub use billboard::BillboardApproach;
use glam::Quat;
pub(crate) use panoramic::plan as plan_panoramic_dive;
pub use panoramic::{
    DiveGeometry, DivePhase, PanoramicDive, DIVE_DURATION, HOVER_DURATION,
    MAIN_DURATION as PANORAMIC_MAIN_DURATION, ROTATE_DOWN_DURATION,
    TILT_DURATION,
};
use rand::Rng;
pub(crate) use rotate::plan as plan_rotate;
pub use rotate::Rotate;
pub(crate) use snake_orbit::plan as plan_snake_orbit;
pub use snake_orbit::SnakeOrbit;
pub(crate) use wall_run::plan as plan_wall_run;
pub use wall_run::{Wall, WallCycle, WallRun};
pub(crate) use waypoint::{plan_idle, plan_moving};
use web_time::{Duration, Instant};

use crate::host::{GameState, PlayerSnapshot, WorldLayout};
use crate::options::{DroneOptions, PlayableBounds};
use crate::transform::Transform;
use crate::util::tween::progress_of;

/// Read-only world state an action plans and moves against.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Frame timestamp.
    pub now: Instant,
    /// Region the drone must stay inside.
    pub bounds: &'a PlayableBounds,
    /// Static scene anchors.
    pub layout: &'a WorldLayout,
    /// Player head snapshot.
    pub player: &'a PlayerSnapshot,
    /// Host game state.
    pub game_state: GameState,
    /// Drone geometry options.
    pub options: &'a DroneOptions,
}

/// The main-phase behavior of a schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSpec {
    /// Hold position and orientation.
    Idle,
    /// Hover at a waypoint reached during the approach.
    Moving,
    /// Lane traversal along an arena wall.
    WallRun(WallRun),
    /// Eased arc around a banner.
    BannerOrbit(BannerOrbit),
    /// Eased arc around the player's head.
    SnakeOrbit(SnakeOrbit),
    /// Yaw spin in place.
    Rotate(Rotate),
    /// Dolly toward the billboard face.
    BillboardApproach(BillboardApproach),
    /// Hover, pan and bezier dive sub-machine.
    PanoramicDive(PanoramicDive),
}

impl ActionSpec {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::WallRun(_) => "wall_run",
            Self::BannerOrbit(_) => "banner_orbit",
            Self::SnakeOrbit(_) => "snake_orbit",
            Self::Rotate(_) => "rotate",
            Self::BillboardApproach(_) => "billboard_approach",
            Self::PanoramicDive(_) => "panoramic_dive",
        }
    }

    /// Pose at `elapsed` into the main phase.
    ///
    /// `main_start` is the schedule's approach target; `fallback` is the
    /// drone's current orientation, kept whenever a look direction
    /// degenerates.
    pub fn main_pose<R: Rng + ?Sized>(
        &mut self,
        main_start: &Transform,
        elapsed: Duration,
        duration: Duration,
        fallback: Quat,
        ctx: &ActionContext<'_>,
        rng: &mut R,
    ) -> Transform {
        let t = progress_of(elapsed, duration);
        match self {
            Self::Idle | Self::Moving => *main_start,
            Self::WallRun(run) => run.pose(elapsed, t, ctx.options),
            Self::BannerOrbit(orbit) => orbit.pose(t, fallback),
            Self::SnakeOrbit(orbit) => orbit.pose(t, ctx.player.head, fallback),
            Self::Rotate(spin) => spin.pose(main_start, t),
            Self::BillboardApproach(dolly) => dolly.pose(t, fallback),
            Self::PanoramicDive(dive) => {
                dive.advance(elapsed, main_start, fallback, ctx, rng)
            }
        }
    }

    /// Pose the approach should land on at this frame.
    ///
    /// Equal to the planned target except for a snake orbit, whose entry
    /// point follows the live head so the main phase starts where the
    /// approach ends.
    #[must_use]
    pub fn approach_target(&self, planned: &Transform, ctx: &ActionContext<'_>) -> Transform {
        match self {
            Self::SnakeOrbit(orbit) => orbit.pose(0.0, ctx.player.head, planned.orientation),
            _ => *planned,
        }
    }

    /// Whether the drone is deliberately stationary at this point of the
    /// main phase, so lack of displacement is not a stall.
    #[must_use]
    pub fn holds_position(&self) -> bool {
        match self {
            Self::Idle | Self::Moving | Self::Rotate(_) => true,
            Self::PanoramicDive(dive) => dive.holds_position(),
            Self::WallRun(_)
            | Self::BannerOrbit(_)
            | Self::SnakeOrbit(_)
            | Self::BillboardApproach(_) => false,
        }
    }
}

/// Output of a planner: where to fly first and what to do on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPlan {
    /// Pose the approach phase ends on.
    pub target: Transform,
    /// Main-phase length.
    pub main_duration: Duration,
    /// Main-phase behavior.
    pub action: ActionSpec,
}

/// Why a planner could not produce geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFailure {
    /// The resource the action needs is absent.
    MissingResource,
    /// The geometry collapsed (zero-length lane or normal).
    Degenerate,
}
