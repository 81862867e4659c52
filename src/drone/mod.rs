//! Roaming camera drones and the choreographer that flies them.
//!
//! Each drone runs one [`DroneSchedule`] at a time: an approach flight to
//! the action's start pose followed by the action itself. When a schedule
//! expires the [`ActionSelector`] draws the next one. After every update
//! the drone is clamped into the playable bounds and checked by the
//! [`StuckFailsafe`].

pub mod actions;
pub mod failsafe;
pub mod schedule;
pub mod selection;

use glam::Quat;
use rand::rngs::StdRng;
use web_time::Instant;

pub use self::actions::{ActionContext, ActionPlan, ActionSpec, PlanFailure};
pub use self::failsafe::{FailsafeTracker, FailsafeVerdict, StuckFailsafe};
pub use self::schedule::{DroneSchedule, SchedulePhase};
pub use self::selection::{ActionKind, ActionSelector};
use crate::host::{GameState, PlayerSnapshot, WorldLayout};
use crate::options::{DroneOptions, Options, PlayableBounds};
use crate::transform::Transform;

/// One roaming drone.
#[derive(Debug, Clone)]
pub struct Drone {
    id: usize,
    transform: Transform,
    schedule: Option<DroneSchedule>,
    tracker: Option<FailsafeTracker>,
}

impl Drone {
    fn new(id: usize, transform: Transform) -> Self {
        Self {
            id,
            transform,
            schedule: None,
            tracker: None,
        }
    }

    /// Index within the fleet.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current pose.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Active schedule; `None` until the first update.
    #[must_use]
    pub fn schedule(&self) -> Option<&DroneSchedule> {
        self.schedule.as_ref()
    }

    /// Stall tracker; `None` until the first update.
    #[must_use]
    pub fn tracker(&self) -> Option<&FailsafeTracker> {
        self.tracker.as_ref()
    }
}

/// Owns the fleet and is the single update authority for drone
/// transforms.
#[derive(Debug)]
pub struct DroneChoreographer {
    drones: Vec<Drone>,
    selector: ActionSelector,
    rng: StdRng,
    options: DroneOptions,
    bounds: PlayableBounds,
    failsafe: StuckFailsafe,
}

impl DroneChoreographer {
    /// Spawn `options.drone.count` drones at random safe points.
    #[must_use]
    pub fn new(options: &Options, mut rng: StdRng) -> Self {
        let bounds = options.bounds.clone();
        let drones = (0..options.drone.count)
            .map(|id| {
                let position = bounds.random_safe_point(&mut rng);
                Drone::new(id, Transform::new(position, Quat::IDENTITY))
            })
            .collect();
        Self {
            drones,
            selector: ActionSelector::new(),
            rng,
            options: options.drone.clone(),
            bounds,
            failsafe: StuckFailsafe::from_options(&options.failsafe),
        }
    }

    /// All drones, in id order.
    #[must_use]
    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    /// Pose of drone `index`, if it exists.
    #[must_use]
    pub fn drone_transform(&self, index: usize) -> Option<Transform> {
        self.drones.get(index).map(Drone::transform)
    }

    /// Advance every drone to `now`.
    pub fn update(
        &mut self,
        now: Instant,
        layout: &WorldLayout,
        player: &PlayerSnapshot,
        game_state: GameState,
    ) {
        let Self {
            drones,
            selector,
            rng,
            options,
            bounds,
            failsafe,
        } = self;
        let ctx = ActionContext {
            now,
            bounds,
            layout,
            player,
            game_state,
            options,
        };
        for drone in drones.iter_mut() {
            update_drone(drone, &ctx, selector, failsafe, rng);
        }
    }
}

fn update_drone(
    drone: &mut Drone,
    ctx: &ActionContext<'_>,
    selector: &mut ActionSelector,
    failsafe: &StuckFailsafe,
    rng: &mut StdRng,
) {
    if drone.tracker.is_none() {
        drone.tracker = Some(FailsafeTracker::new(ctx.now, drone.transform.position));
    }
    if drone.schedule.as_ref().is_none_or(|s| s.is_expired(ctx.now)) {
        drone.schedule = Some(selector.draw(&drone.transform, ctx, rng));
    }
    let Some(schedule) = drone.schedule.as_mut() else {
        return;
    };

    let (pose, holding) = schedule.pose(ctx, drone.transform.orientation, rng);
    drone.transform = Transform::new(ctx.bounds.clamp(pose.position), pose.orientation);

    let Some(tracker) = drone.tracker.as_mut() else {
        return;
    };
    let verdict = failsafe.observe(tracker, ctx.now, drone.transform.position, holding);
    if verdict == FailsafeVerdict::HardReset {
        hard_reset(drone, ctx, selector, rng);
    }
}

/// Teleport to a random safe point, clear the tracker and start over.
fn hard_reset(
    drone: &mut Drone,
    ctx: &ActionContext<'_>,
    selector: &mut ActionSelector,
    rng: &mut StdRng,
) {
    let from = drone.transform.position;
    let position = ctx.bounds.random_safe_point(rng);
    drone.transform.position = position;
    let tracker = drone
        .tracker
        .get_or_insert_with(|| FailsafeTracker::new(ctx.now, position));
    StuckFailsafe::rearm(tracker, ctx.now, position);
    drone.schedule = Some(selector.draw(&drone.transform, ctx, rng));
    log::info!(
        "drone {} stuck near {from}, reset to {}",
        drone.id,
        drone.transform.position
    );
}
