//! One-shot camera cinematics triggered by game lifecycle changes.
//!
//! At most one [`TransitionAnimation`] runs at a time and, while it runs,
//! it alone drives the camera. A new lifecycle trigger replaces whatever
//! is running. Completion is reported back to the host as
//! [`TransitionEvent`] values.

pub mod crash;
pub mod fly_in;
pub mod game_over;

use glam::Vec3;
use web_time::{Duration, Instant};

pub use self::crash::{CrashFrame, CrashPhase, CrashSequence};
pub use self::fly_in::FlyIn;
pub use self::game_over::GameOverPan;
use crate::camera::controller::orbit_pose;
use crate::host::{GameState, GameplayView, PlayerSnapshot, TransitionEvent};
use crate::options::{CameraOptions, TransitionOptions};
use crate::transform::Transform;

/// The running cinematic.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionAnimation {
    /// Round-start flight onto the gameplay view.
    StartFlyIn(FlyIn),
    /// Shake, ascend and hold after a crash.
    CrashSequence(CrashSequence),
    /// Pan to the orbit start after game over.
    GameOverPan(GameOverPan),
}

impl TransitionAnimation {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartFlyIn(_) => "start_fly_in",
            Self::CrashSequence(_) => "crash_sequence",
            Self::GameOverPan(_) => "game_over_pan",
        }
    }
}

/// Per-frame inputs the animator reads.
#[derive(Debug, Clone, Copy)]
pub struct TransitionInput<'a> {
    /// Frame timestamp.
    pub now: Instant,
    /// Host game state.
    pub game_state: GameState,
    /// Camera transform before this frame.
    pub camera: Transform,
    /// Player head snapshot.
    pub player: &'a PlayerSnapshot,
    /// Gameplay view the fly-in lands on.
    pub gameplay_view: GameplayView,
    /// Board center the game-over pan looks at.
    pub board_center: Vec3,
}

/// Camera output of a frame the animator drove.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Camera pose.
    pub transform: Transform,
    /// Visual emphasis in [0, 1].
    pub emphasis: f32,
    /// Completion event raised this frame.
    pub event: Option<TransitionEvent>,
}

/// Result of [`TransitionAnimator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionOutcome {
    /// The driven frame, or `None` when no animation ran.
    pub frame: Option<TransitionFrame>,
    /// An animation completed or was torn down this frame; the camera
    /// controller takes over next frame and must snap.
    pub released: bool,
}

/// Starts, runs and tears down lifecycle cinematics.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    options: TransitionOptions,
    camera: CameraOptions,
    active: Option<TransitionAnimation>,
    last_state: Option<GameState>,
}

impl TransitionAnimator {
    /// Animator with nothing running.
    #[must_use]
    pub fn new(options: &TransitionOptions, camera: &CameraOptions) -> Self {
        Self {
            options: options.clone(),
            camera: camera.clone(),
            active: None,
            last_state: None,
        }
    }

    /// The running animation, if any.
    #[must_use]
    pub fn active(&self) -> Option<&TransitionAnimation> {
        self.active.as_ref()
    }

    /// Whether an animation is driving the camera.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Check lifecycle triggers, then advance the running animation.
    pub fn update(&mut self, input: &TransitionInput<'_>) -> TransitionOutcome {
        let mut released = self.observe_state(input);
        let Some(animation) = self.active.as_mut() else {
            return TransitionOutcome {
                frame: None,
                released,
            };
        };

        let (frame, finished) = match animation {
            TransitionAnimation::StartFlyIn(fly_in) => {
                let (transform, done) =
                    fly_in.sample(input.now, input.player, &self.camera);
                let event = done.then_some(TransitionEvent::StartFlyInComplete);
                (still(transform, event), done)
            }
            TransitionAnimation::CrashSequence(crash) => {
                let frame = crash.sample(input.now);
                (
                    TransitionFrame {
                        transform: frame.transform,
                        emphasis: frame.emphasis,
                        event: frame.event,
                    },
                    false,
                )
            }
            TransitionAnimation::GameOverPan(pan) => {
                let (transform, done) = pan.sample(input.now);
                let event = done.then_some(TransitionEvent::GameOverPanComplete);
                (still(transform, event), done)
            }
        };

        if finished {
            log::info!("{} complete", animation.name());
            self.active = None;
            released = true;
        }
        TransitionOutcome {
            frame: Some(frame),
            released,
        }
    }

    /// Start or tear down animations on game state changes. Returns true
    /// when a running animation was dropped without a replacement.
    fn observe_state(&mut self, input: &TransitionInput<'_>) -> bool {
        let state = input.game_state;
        if self.last_state == Some(state) {
            return false;
        }
        self.last_state = Some(state);

        let next = match state {
            GameState::Starting => Some(TransitionAnimation::StartFlyIn(FlyIn::new(
                input.now,
                input.camera,
                input.gameplay_view,
                &self.options,
            ))),
            GameState::Crashed => Some(TransitionAnimation::CrashSequence(CrashSequence::new(
                input.now,
                input.camera,
                input.player.head,
                &self.options,
            ))),
            GameState::GameOver => {
                let azimuth = self.options.orbit_start_azimuth;
                Some(TransitionAnimation::GameOverPan(GameOverPan::new(
                    input.now,
                    input.camera,
                    orbit_pose(input.board_center, azimuth, &self.camera),
                    azimuth,
                    Duration::from_millis(self.options.game_over_pan_ms),
                )))
            }
            GameState::Idle | GameState::Playing => None,
        };

        match next {
            Some(animation) => {
                if let Some(previous) = &self.active {
                    log::info!("{} replaced by {}", previous.name(), animation.name());
                } else {
                    log::info!("{} started", animation.name());
                }
                self.active = Some(animation);
                false
            }
            None => {
                // Only the crash hold depends on staying in its state
                if matches!(self.active, Some(TransitionAnimation::CrashSequence(_))) {
                    log::info!("crash_sequence torn down on {state:?}");
                    self.active = None;
                    return true;
                }
                false
            }
        }
    }
}

fn still(transform: Transform, event: Option<TransitionEvent>) -> TransitionFrame {
    TransitionFrame {
        transform,
        emphasis: 0.0,
        event,
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    struct Harness {
        animator: TransitionAnimator,
        player: PlayerSnapshot,
        camera: Transform,
        t0: Instant,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                animator: TransitionAnimator::new(
                    &TransitionOptions::default(),
                    &CameraOptions::default(),
                ),
                player: PlayerSnapshot {
                    head: Vec3::new(3.0, 0.5, 3.0),
                    ..PlayerSnapshot::default()
                },
                camera: Transform::new(Vec3::new(0.0, 30.0, 50.0), Quat::IDENTITY),
                t0: Instant::now(),
            }
        }

        fn step(&mut self, ms: u64, state: GameState) -> TransitionOutcome {
            let input = TransitionInput {
                now: self.t0 + Duration::from_millis(ms),
                game_state: state,
                camera: self.camera,
                player: &self.player,
                gameplay_view: GameplayView::ThirdPerson,
                board_center: Vec3::ZERO,
            };
            let outcome = self.animator.update(&input);
            if let Some(frame) = outcome.frame {
                self.camera = frame.transform;
            }
            outcome
        }
    }

    #[test]
    fn idle_runs_nothing() {
        let mut h = Harness::new();
        let outcome = h.step(0, GameState::Idle);
        assert_eq!(outcome, TransitionOutcome::default());
        assert!(!h.animator.is_active());
    }

    #[test]
    fn fly_in_completes_once_and_releases() {
        let mut h = Harness::new();
        let _ = h.step(0, GameState::Idle);
        let mut events = Vec::new();
        let mut released = 0;
        for ms in (16..4000).step_by(16) {
            let outcome = h.step(ms, GameState::Starting);
            events.extend(outcome.frame.and_then(|f| f.event));
            released += usize::from(outcome.released);
        }
        assert_eq!(events, vec![TransitionEvent::StartFlyInComplete]);
        assert_eq!(released, 1);
        assert!(!h.animator.is_active());
    }

    #[test]
    fn crash_holds_until_state_changes() {
        let mut h = Harness::new();
        let _ = h.step(0, GameState::Playing);
        let mut events = Vec::new();
        for ms in (16..10_000).step_by(16) {
            let outcome = h.step(ms, GameState::Crashed);
            assert!(!outcome.released);
            events.extend(outcome.frame.and_then(|f| f.event));
        }
        assert_eq!(events, vec![TransitionEvent::CrashAscendComplete]);
        assert!(matches!(
            h.animator.active(),
            Some(TransitionAnimation::CrashSequence(c)) if c.phase() == CrashPhase::Holding
        ));

        let outcome = h.step(10_016, GameState::Idle);
        assert!(outcome.released);
        assert!(outcome.frame.is_none());
        assert!(!h.animator.is_active());
    }

    #[test]
    fn game_over_replaces_crash_and_lands_on_orbit_start() {
        let mut h = Harness::new();
        let _ = h.step(0, GameState::Crashed);
        let _ = h.step(4000, GameState::Crashed);
        let outcome = h.step(4016, GameState::GameOver);
        assert!(!outcome.released);
        assert!(matches!(h.animator.active(), Some(TransitionAnimation::GameOverPan(_))));

        let outcome = h.step(6016, GameState::GameOver);
        let Some(frame) = outcome.frame else {
            panic!("pan frame missing");
        };
        assert_eq!(frame.event, Some(TransitionEvent::GameOverPanComplete));
        assert!(outcome.released);
        let orbit = orbit_pose(Vec3::ZERO, 0.0, &CameraOptions::default());
        assert!((frame.transform.position - orbit.position).length() < 1e-4);
    }
}
