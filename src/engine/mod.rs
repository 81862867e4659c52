//! Per-frame orchestration of drones, transitions and the camera.
//!
//! The host calls [`FrameScheduler::tick`] from its refresh callback. The
//! scheduler throttles to an adaptive target rate and, on a processed
//! frame, runs every subsystem in a fixed order:
//!
//! 1. environment lighting clock
//! 2. drones (schedule advance, bounds clamp, stuck failsafe)
//! 3. lifecycle triggers
//! 4. the active transition, or else the camera view mode
//! 5. renderer outputs (camera uniform)

pub mod environment;

use rand::rngs::StdRng;
use rand::SeedableRng;
use web_time::{Duration, Instant};

use self::environment::{Environment, EnvironmentUniform};
use crate::camera::controller::{CameraFrame, CameraModeController};
use crate::camera::core::{CameraUniform, Lens};
use crate::drone::{Drone, DroneChoreographer};
use crate::error::ChoreoError;
use crate::host::{
    FrameInput, GameState, GraphicsQuality, TransitionEvent, WorldLayout,
};
use crate::options::Options;
use crate::transform::Transform;
use crate::transition::{TransitionAnimator, TransitionInput};
use crate::util::frame_timing::FrameTiming;

/// Viewport assumed until the host reports its size.
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// What a call to [`FrameScheduler::tick`] did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    /// Whether the frame ran; skipped frames change nothing.
    pub processed: bool,
    /// Time since the previous processed frame.
    pub dt: Duration,
    /// Completion events raised this frame.
    pub events: Vec<TransitionEvent>,
}

impl TickOutcome {
    fn skipped() -> Self {
        Self::default()
    }
}

/// Owns every choreography subsystem and the camera transform.
#[derive(Debug)]
pub struct FrameScheduler {
    options: Options,
    layout: WorldLayout,
    timing: FrameTiming,
    suspended: bool,
    environment: Environment,
    drones: DroneChoreographer,
    controller: CameraModeController,
    transitions: TransitionAnimator,
    camera: Transform,
    lens: Lens,
    uniform: CameraUniform,
    emphasis: f32,
}

impl FrameScheduler {
    /// Scheduler with an OS-seeded RNG.
    pub fn new(options: Options, layout: WorldLayout) -> Result<Self, ChoreoError> {
        Self::with_rng(options, layout, StdRng::from_os_rng())
    }

    /// Scheduler with a fixed seed, for reproducible runs.
    pub fn with_seed(
        options: Options,
        layout: WorldLayout,
        seed: u64,
    ) -> Result<Self, ChoreoError> {
        Self::with_rng(options, layout, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        options: Options,
        layout: WorldLayout,
        rng: StdRng,
    ) -> Result<Self, ChoreoError> {
        options.validate()?;
        let (width, height) = DEFAULT_VIEWPORT;
        log::info!(
            "choreography ready: {} drones, {} banners, billboard {}",
            options.drone.count,
            layout.banners.len(),
            if layout.billboard.is_some() { "present" } else { "absent" },
        );
        Ok(Self {
            timing: FrameTiming::new(options.frame.idle_fps),
            suspended: false,
            environment: Environment::new(&options.environment),
            drones: DroneChoreographer::new(&options, rng),
            controller: CameraModeController::new(&options.camera),
            transitions: TransitionAnimator::new(&options.transition, &options.camera),
            camera: Transform::IDENTITY,
            lens: Lens::new(&options.camera, width, height),
            uniform: CameraUniform::new(),
            emphasis: 0.0,
            options,
            layout,
        })
    }

    /// Frame rate the current input calls for.
    #[must_use]
    pub fn target_fps(&self, input: &FrameInput) -> u32 {
        let active = input.game_state == GameState::Playing
            && !input.paused
            && input.quality != GraphicsQuality::Low;
        if active {
            self.options.frame.active_fps
        } else {
            self.options.frame.idle_fps
        }
    }

    /// Run one frame at `now` if it is due.
    pub fn tick(&mut self, now: Instant, input: &FrameInput) -> TickOutcome {
        if self.suspended {
            return TickOutcome::skipped();
        }
        self.timing.set_target_fps(self.target_fps(input));
        let Some(dt) = self.timing.begin_frame(now) else {
            return TickOutcome::skipped();
        };

        self.environment.advance(dt, input.quality);
        self.drones
            .update(now, &self.layout, &input.player, input.game_state);

        let mut events = Vec::new();
        let outcome = self.transitions.update(&TransitionInput {
            now,
            game_state: input.game_state,
            camera: self.camera,
            player: &input.player,
            gameplay_view: input.gameplay_view,
            board_center: self.layout.board_center,
        });
        if outcome.released {
            self.controller.invalidate();
        }

        if let Some(frame) = outcome.frame {
            self.camera = frame.transform;
            self.emphasis = frame.emphasis;
            if let Some(event) = frame.event {
                if event == TransitionEvent::GameOverPanComplete {
                    self.controller
                        .set_orbit_azimuth(self.options.transition.orbit_start_azimuth);
                }
                events.push(event);
            }
        } else {
            self.emphasis = 0.0;
            self.camera = self.controller.update(
                input.view_mode,
                &self.camera,
                &CameraFrame {
                    dt,
                    player: &input.player,
                    drag: input.drag,
                    board_center: self.layout.board_center,
                    drones: self.drones.drones(),
                },
            );
        }

        self.uniform.update(&self.camera, &self.lens, self.emphasis);
        TickOutcome {
            processed: true,
            dt,
            events,
        }
    }

    /// Stop processing frames (hidden page, modal dialog).
    pub fn suspend(&mut self) {
        if !self.suspended {
            log::debug!("frame loop suspended");
        }
        self.suspended = true;
    }

    /// Restart processing at `now` without a catch-up delta.
    pub fn resume(&mut self, now: Instant) {
        if self.suspended {
            log::debug!("frame loop resumed");
        }
        self.suspended = false;
        self.timing.reset(now);
    }

    /// Whether the loop is suspended.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Viewport size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.lens.resize(width, height);
        self.uniform.update(&self.camera, &self.lens, self.emphasis);
    }

    /// Replace the scene anchors (after the host rebuilds the arena).
    pub fn set_layout(&mut self, layout: WorldLayout) {
        self.layout = layout;
    }

    /// Camera transform after the last processed frame.
    #[must_use]
    pub fn camera_transform(&self) -> Transform {
        self.camera
    }

    /// Camera uniform after the last processed frame.
    #[must_use]
    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    /// Transition emphasis after the last processed frame.
    #[must_use]
    pub fn emphasis(&self) -> f32 {
        self.emphasis
    }

    /// Current lens.
    #[must_use]
    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    /// Environment lighting values.
    #[must_use]
    pub fn environment(&self) -> &EnvironmentUniform {
        self.environment.uniform()
    }

    /// The drone fleet.
    #[must_use]
    pub fn drones(&self) -> &DroneChoreographer {
        &self.drones
    }

    /// Every drone's transform, in id order.
    pub fn drone_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.drones.drones().iter().map(Drone::transform)
    }

    /// The transition animator.
    #[must_use]
    pub fn transitions(&self) -> &TransitionAnimator {
        &self.transitions
    }

    /// Smoothed processed-frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}
