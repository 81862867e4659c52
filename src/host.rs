//! Read-only inputs supplied by the host game each frame, and the events
//! handed back to it.

use glam::{Quat, Vec2, Vec3};
use web_time::Duration;

use crate::camera::view::ViewMode;
use crate::util::geometry::yaw_rotation;

// ── Lifecycle ────────────────────────────────────────────────────────────

/// Game lifecycle state owned by the host's game-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Attract mode / menus; no round in progress.
    #[default]
    Idle,
    /// Round countdown; triggers the start fly-in.
    Starting,
    /// Round in progress.
    Playing,
    /// Player crashed; triggers the crash sequence.
    Crashed,
    /// Round over; triggers the game-over pan.
    GameOver,
}

/// Host graphics-quality setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum GraphicsQuality {
    /// Reduced effects and frame rate.
    Low,
    /// Standard quality.
    #[default]
    Medium,
    /// Full quality.
    High,
}

/// The gameplay camera the player used last, which the start fly-in lands
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameplayView {
    /// Eye-level view from the snake's head.
    FirstPerson,
    /// Chase view behind and above the head.
    #[default]
    ThirdPerson,
}

impl GameplayView {
    /// Camera view mode matching this gameplay view.
    #[must_use]
    pub fn view_mode(self) -> ViewMode {
        match self {
            Self::FirstPerson => ViewMode::FirstPerson,
            Self::ThirdPerson => ViewMode::ThirdPerson,
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────

/// Snapshot of the player's head as published by the gameplay simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    /// Head position in world space.
    pub head: Vec3,
    /// Actual heading (yaw about +Y, radians, 0 = -Z).
    pub heading: f32,
    /// Anticipatory heading the renderer is turning toward.
    pub visual_heading: f32,
    /// Current gameplay speed in cells per second.
    pub speed: f32,
    /// Duration of one gameplay tick.
    pub tick_duration: Duration,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            head: Vec3::ZERO,
            heading: 0.0,
            visual_heading: 0.0,
            speed: 0.0,
            tick_duration: Duration::from_millis(150),
        }
    }
}

impl PlayerSnapshot {
    /// Head orientation derived from the actual heading.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        yaw_rotation(self.heading)
    }
}

// ── Layout ───────────────────────────────────────────────────────────────

/// A banner mesh drones may orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerAnchor {
    /// Banner center in world space.
    pub position: Vec3,
}

/// The advertising billboard drones may approach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardAnchor {
    /// Center of the billboard face.
    pub center: Vec3,
    /// Outward face normal.
    pub normal: Vec3,
}

/// Static scene anchors built by the scene collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldLayout {
    /// Center of the game board.
    pub board_center: Vec3,
    /// Banner anchors; empty when no banners are present.
    pub banners: Vec<BannerAnchor>,
    /// Billboard anchor, if one is configured.
    pub billboard: Option<BillboardAnchor>,
}

// ── Per-frame input ──────────────────────────────────────────────────────

/// Manual orbit drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDrag {
    /// Whether a drag is currently held.
    pub active: bool,
    /// Pointer movement since the previous processed frame, in pixels.
    pub delta: Vec2,
}

/// Everything the engine reads from its collaborators in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Host game state.
    pub game_state: GameState,
    /// Whether gameplay is paused.
    pub paused: bool,
    /// Camera view mode selected by the player.
    pub view_mode: ViewMode,
    /// Last gameplay view the player used.
    pub gameplay_view: GameplayView,
    /// Player head snapshot.
    pub player: PlayerSnapshot,
    /// Graphics-quality setting.
    pub quality: GraphicsQuality,
    /// Pointer drag for manual orbit control.
    pub drag: PointerDrag,
}

// ── Output ───────────────────────────────────────────────────────────────

/// Completion notifications for the host's game-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The start fly-in reached its gameplay pose.
    StartFlyInComplete,
    /// The crash camera finished ascending to its overhead vantage.
    CrashAscendComplete,
    /// The game-over pan reached the orbit start vantage.
    GameOverPanComplete,
}
