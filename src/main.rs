//! Headless driver: runs the choreography against a scripted game session
//! and logs lifecycle events and drone schedules.

use std::f32::consts::FRAC_PI_2;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dronecam::camera::input::DragTracker;
use dronecam::camera::view::ViewMode;
use dronecam::engine::FrameScheduler;
use dronecam::error::ChoreoError;
use dronecam::host::{
    BannerAnchor, BillboardAnchor, FrameInput, GameState, GameplayView,
    PlayerSnapshot, PointerDrag, TransitionEvent, WorldLayout,
};
use dronecam::options::Options;
use dronecam::util::geometry::yaw_forward;
use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "dronecam")]
#[command(about = "Simulate a scripted game session headlessly", long_about = None)]
struct Args {
    /// Options preset (TOML); defaults apply when omitted
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Simulated session length
    #[arg(long, value_name = "SECONDS", default_value_t = 90.0)]
    seconds: f32,

    /// Host refresh rate driving tick()
    #[arg(long, value_name = "HZ", default_value_t = 120)]
    hz: u32,

    /// RNG seed for reproducible drone choreography
    #[arg(long)]
    seed: Option<u64>,

    /// Camera view while no transition runs
    #[arg(long, value_enum, default_value_t = View::Orbit)]
    view: View,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum View {
    Orbit,
    First,
    Third,
    Drone,
}

impl View {
    fn view_mode(self) -> ViewMode {
        match self {
            Self::Orbit => ViewMode::Orbit,
            Self::First => ViewMode::FirstPerson,
            Self::Third => ViewMode::ThirdPerson,
            Self::Drone => ViewMode::Drone(0),
        }
    }
}

/// Round durations of the scripted session.
const IDLE_SPAN: Duration = Duration::from_secs(5);
const PLAY_SPAN: Duration = Duration::from_secs(15);
const CRASH_LINGER: Duration = Duration::from_secs(2);
const TURN_EVERY: Duration = Duration::from_secs(2);
const PLAYER_SPEED: f32 = 4.0;
/// Window of the scripted orbit drag, and its pointer speed.
const DRAG_FROM: Duration = Duration::from_secs(1);
const DRAG_UNTIL: Duration = Duration::from_secs(3);
const DRAG_PX_PER_SEC: f32 = 120.0;

/// Stand-in for the host game-state machine and snake simulation.
struct ScriptedHost {
    state: GameState,
    entered: Duration,
    ascended_at: Option<Duration>,
    player: PlayerSnapshot,
    last_turn: Duration,
    drag: DragTracker,
    dragging: bool,
}

impl ScriptedHost {
    fn new() -> Self {
        Self {
            state: GameState::Idle,
            entered: Duration::ZERO,
            ascended_at: None,
            player: PlayerSnapshot {
                head: Vec3::new(-8.0, 0.5, 8.0),
                ..PlayerSnapshot::default()
            },
            last_turn: Duration::ZERO,
            drag: DragTracker::new(),
            dragging: false,
        }
    }

    /// Sweep the pointer across the attract screen once, early on.
    fn sweep_pointer(&mut self, at: Duration) {
        let position = Vec2::new(at.as_secs_f32() * DRAG_PX_PER_SEC, 0.0);
        let sweeping =
            self.state == GameState::Idle && (DRAG_FROM..DRAG_UNTIL).contains(&at);
        match (sweeping, self.dragging) {
            (true, false) => self.drag.pointer_down(position),
            (true, true) => {
                let _ = self.drag.pointer_moved(position);
            }
            (false, true) => self.drag.pointer_up(),
            (false, false) => {}
        }
        self.dragging = sweeping;
    }

    fn enter(&mut self, state: GameState, at: Duration) {
        log::info!("[{:>6.2}s] game state {:?} -> {state:?}", at.as_secs_f32(), self.state);
        self.state = state;
        self.entered = at;
        self.ascended_at = None;
    }

    /// React to elapsed time and completion events.
    fn advance(&mut self, at: Duration, dt: Duration, events: &[TransitionEvent]) {
        let in_state = at.saturating_sub(self.entered);
        match self.state {
            GameState::Idle if in_state >= IDLE_SPAN => self.enter(GameState::Starting, at),
            GameState::Starting if events.contains(&TransitionEvent::StartFlyInComplete) => {
                self.last_turn = at;
                self.enter(GameState::Playing, at);
            }
            GameState::Playing => {
                self.slither(at, dt);
                if in_state >= PLAY_SPAN {
                    self.enter(GameState::Crashed, at);
                }
            }
            GameState::Crashed => {
                if events.contains(&TransitionEvent::CrashAscendComplete) {
                    self.ascended_at = Some(at);
                }
                if self.ascended_at.is_some_and(|t| at.saturating_sub(t) >= CRASH_LINGER) {
                    self.enter(GameState::GameOver, at);
                }
            }
            GameState::GameOver if events.contains(&TransitionEvent::GameOverPanComplete) => {
                self.enter(GameState::Idle, at);
            }
            _ => {}
        }
    }

    /// Move the head in a square loop, turning left every few seconds.
    fn slither(&mut self, at: Duration, dt: Duration) {
        let player = &mut self.player;
        player.speed = PLAYER_SPEED;
        player.head += yaw_forward(player.heading) * (PLAYER_SPEED * dt.as_secs_f32());
        if at.saturating_sub(self.last_turn) >= TURN_EVERY {
            self.last_turn = at;
            player.heading += FRAC_PI_2;
        }
        player.visual_heading = player.heading;
    }
}

fn arena_layout() -> WorldLayout {
    WorldLayout {
        board_center: Vec3::ZERO,
        banners: vec![
            BannerAnchor {
                position: Vec3::new(32.0, 14.0, 0.0),
            },
            BannerAnchor {
                position: Vec3::new(-32.0, 14.0, 0.0),
            },
        ],
        billboard: Some(BillboardAnchor {
            center: Vec3::new(0.0, 18.0, -39.0),
            normal: Vec3::Z,
        }),
    }
}

fn run(args: &Args) -> Result<(), ChoreoError> {
    if args.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| ChoreoError::OptionsParse(e.to_string()))?;
        writeln!(std::io::stdout().lock(), "{schema}")?;
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let mut scheduler = match args.seed {
        Some(seed) => FrameScheduler::with_seed(options, arena_layout(), seed)?,
        None => FrameScheduler::new(options, arena_layout())?,
    };

    let host_step = Duration::from_secs_f64(1.0 / f64::from(args.hz.max(1)));
    let session = Duration::from_secs_f32(args.seconds.max(0.0));
    let origin = Instant::now();
    let mut host = ScriptedHost::new();
    let mut input = FrameInput {
        view_mode: args.view.view_mode(),
        gameplay_view: GameplayView::ThirdPerson,
        ..FrameInput::default()
    };
    let mut at = Duration::ZERO;
    let mut last_processed = Duration::ZERO;
    let mut processed = 0u64;
    let mut drag = PointerDrag::default();

    while at <= session {
        input.game_state = host.state;
        input.player = host.player;
        host.sweep_pointer(at);
        // Skipped frames keep their drag for the next processed one
        let fresh = host.drag.take();
        drag.active = fresh.active;
        drag.delta += fresh.delta;
        input.drag = drag;
        let outcome = scheduler.tick(origin + at, &input);
        if outcome.processed {
            processed += 1;
            drag.delta = Vec2::ZERO;
            for event in &outcome.events {
                log::info!("[{:>6.2}s] {event:?}", at.as_secs_f32());
            }
            host.advance(at, at.saturating_sub(last_processed), &outcome.events);
            last_processed = at;
        }
        at += host_step;
    }

    let camera = scheduler.camera_transform();
    log::info!(
        "simulated {:.1}s: {processed} frames processed, camera at {}",
        session.as_secs_f32(),
        camera.position,
    );
    for (id, transform) in scheduler.drone_transforms().enumerate() {
        log::info!("drone {id} at {}", transform.position);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
