//! Lane traversal parallel to one of the four arena walls.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;
use web_time::Duration;

use super::{ActionContext, ActionPlan, ActionSpec, PlanFailure};
use crate::options::{DroneOptions, PlayableBounds};
use crate::transform::Transform;
use crate::util::geometry::look_rotation;

/// Shortest lane worth flying.
const MIN_LANE_LENGTH: f32 = 1.0;

/// One edge of the playable rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// Minimum-Z edge.
    North,
    /// Maximum-Z edge.
    South,
    /// Maximum-X edge.
    East,
    /// Minimum-X edge.
    West,
}

impl Wall {
    /// Visiting order of the round-robin cycle.
    pub const CYCLE: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Lane endpoints in the wall's forward direction, inset by `offset`
    /// from the wall and from both corners.
    #[must_use]
    pub fn lane(self, bounds: &PlayableBounds, offset: f32, altitude: f32) -> (Vec3, Vec3) {
        let y = bounds.clamp_altitude(altitude);
        let (x0, x1) = (bounds.min_x + offset, bounds.max_x - offset);
        let (z0, z1) = (bounds.min_z + offset, bounds.max_z - offset);
        match self {
            Self::North => (Vec3::new(x0, y, z0), Vec3::new(x1, y, z0)),
            Self::South => (Vec3::new(x1, y, z1), Vec3::new(x0, y, z1)),
            Self::East => (Vec3::new(x1, y, z0), Vec3::new(x1, y, z1)),
            Self::West => (Vec3::new(x0, y, z1), Vec3::new(x0, y, z0)),
        }
    }
}

/// Persistent round-robin index over [`Wall::CYCLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallCycle {
    index: usize,
}

impl WallCycle {
    /// Wall for this draw; advances the cycle.
    pub fn next_wall(&mut self) -> Wall {
        let wall = Wall::CYCLE[self.index % Wall::CYCLE.len()];
        self.index = (self.index + 1) % Wall::CYCLE.len();
        wall
    }
}

/// A straight lane run with a lateral bobble.
#[derive(Debug, Clone, PartialEq)]
pub struct WallRun {
    /// Lane start (approach target).
    pub start: Vec3,
    /// Lane end.
    pub end: Vec3,
    /// Wall the lane runs along.
    pub wall: Wall,
}

impl WallRun {
    /// Pose at main-phase `elapsed` (linear progress `t`).
    pub(crate) fn pose(&self, elapsed: Duration, t: f32, opts: &DroneOptions) -> Transform {
        let travel = self.end - self.start;
        let along = self.start + travel * t;
        let lateral = travel.cross(Vec3::Y).normalize_or_zero();
        let phase = TAU * opts.bobble_frequency_hz * elapsed.as_secs_f32();
        let position = along + lateral * (phase.sin() * opts.bobble_amplitude);
        Transform::new(position, look_rotation(travel).unwrap_or(Quat::IDENTITY))
    }
}

pub(crate) fn plan<R: Rng + ?Sized>(
    wall: Wall,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Result<ActionPlan, PlanFailure> {
    let opts = ctx.options;
    let (mut start, mut end) = wall.lane(ctx.bounds, opts.wall_offset, opts.wall_altitude);
    if !rng.random_bool(opts.wall_forward_chance.clamp(0.0, 1.0)) {
        std::mem::swap(&mut start, &mut end);
    }
    let travel = end - start;
    if travel.length() < MIN_LANE_LENGTH {
        return Err(PlanFailure::Degenerate);
    }
    let orientation = look_rotation(travel).ok_or(PlanFailure::Degenerate)?;
    Ok(ActionPlan {
        target: Transform::new(start, orientation),
        main_duration: Duration::from_millis(opts.wall_run_ms),
        action: ActionSpec::WallRun(WallRun { start, end, wall }),
    })
}
