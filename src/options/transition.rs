use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timing and geometry of the lifecycle cinematics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transitions", inline)]
#[serde(default)]
pub struct TransitionOptions {
    /// Hold before the round-start fly-in begins.
    pub fly_in_delay_ms: u64,
    /// Round-start fly-in duration.
    pub fly_in_ms: u64,
    /// Vertical bump of the fly-in path.
    pub fly_in_arc: f32,

    /// Crash shake duration.
    pub crash_shake_ms: u64,
    /// Peak positional jitter during the shake.
    pub shake_amplitude: f32,
    /// Emphasis pulses per second during the shake.
    pub emphasis_pulse_hz: f32,
    /// Crash ascend duration.
    pub crash_ascend_ms: u64,
    /// Height of the overhead vantage above the crash site.
    pub ascend_height: f32,

    /// Game-over pan duration.
    pub game_over_pan_ms: u64,
    /// Orbit azimuth the game-over pan ends on, in radians.
    pub orbit_start_azimuth: f32,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            fly_in_delay_ms: 500,
            fly_in_ms: 2500,
            fly_in_arc: 6.0,
            crash_shake_ms: 1500,
            shake_amplitude: 0.4,
            emphasis_pulse_hz: 4.0,
            crash_ascend_ms: 2000,
            ascend_height: 25.0,
            game_over_pan_ms: 2000,
            orbit_start_azimuth: 0.0,
        }
    }
}

/// Adaptive frame pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Frame Pacing", inline)]
#[serde(default)]
pub struct FrameOptions {
    /// Target rate during active, unpaused, higher-quality gameplay.
    #[schemars(title = "Active FPS", range(min = 15, max = 240))]
    pub active_fps: u32,
    /// Target rate otherwise.
    #[schemars(title = "Idle FPS", range(min = 5, max = 120))]
    pub idle_fps: u32,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            active_fps: 60,
            idle_fps: 30,
        }
    }
}

/// Ambient lighting clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Environment", inline)]
#[serde(default)]
pub struct EnvironmentOptions {
    /// Length of a full sun cycle in seconds.
    pub day_length_s: f32,
    /// Sun elevation at noon, in degrees.
    pub sun_elevation_deg: f32,
    /// Ambient light level at full quality.
    pub ambient: f32,
    /// Ambient multiplier applied at low graphics quality.
    pub low_quality_ambient_scale: f32,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            day_length_s: 240.0,
            sun_elevation_deg: 55.0,
            ambient: 0.45,
            low_quality_ambient_scale: 0.7,
        }
    }
}
