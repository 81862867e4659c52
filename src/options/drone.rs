use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Base selection weight of each drone action before availability is
/// applied. A zero weight disables the action outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Action Weights", inline)]
#[serde(default)]
pub struct ActionWeights {
    /// Hold in place.
    pub idle: f32,
    /// Fly to a random waypoint.
    pub moving: f32,
    /// Traverse a lane along one of the arena walls.
    pub wall_run: f32,
    /// Orbit a banner.
    pub banner_orbit: f32,
    /// Orbit the player's head.
    pub snake_orbit: f32,
    /// Spin in place.
    pub rotate: f32,
    /// Dolly toward the billboard.
    pub billboard_approach: f32,
    /// Climb, pan and dive.
    pub panoramic_dive: f32,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            idle: 1.0,
            moving: 1.0,
            wall_run: 2.0,
            banner_orbit: 1.5,
            snake_orbit: 1.5,
            rotate: 0.8,
            billboard_approach: 1.0,
            panoramic_dive: 0.6,
        }
    }
}

/// Drone fleet size, flight speed and per-action geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Drones", inline)]
#[serde(default)]
pub struct DroneOptions {
    /// Number of roaming drones.
    #[schemars(title = "Drone Count", range(min = 0, max = 8))]
    pub count: usize,
    /// Cruise speed during the approach phase, in units per second.
    #[schemars(title = "Approach Speed", range(min = 0.5, max = 30.0), extend("step" = 0.5))]
    pub approach_speed: f32,
    /// Upper limit of the vertical bump added to approach paths.
    pub max_arc_height: f32,
    /// Selection weights.
    pub weights: ActionWeights,

    /// Shortest idle hold.
    pub idle_min_ms: u64,
    /// Longest idle hold.
    pub idle_max_ms: u64,
    /// Hover after a waypoint move.
    pub moving_hover_ms: u64,

    /// Full lane traversal time.
    pub wall_run_ms: u64,
    /// Lane distance inside the wall.
    pub wall_offset: f32,
    /// Lane altitude.
    pub wall_altitude: f32,
    /// Probability of running the lane in its forward direction.
    pub wall_forward_chance: f64,
    /// Lateral bobble amplitude.
    pub bobble_amplitude: f32,
    /// Lateral bobble frequency.
    pub bobble_frequency_hz: f32,

    /// Distance from the banner anchor while orbiting.
    pub banner_orbit_radius: f32,
    /// Banner orbit duration.
    pub banner_orbit_ms: u64,
    /// Largest swept arc around a banner.
    pub banner_max_arc_deg: f32,

    /// Distance from the player's head while orbiting it.
    pub snake_orbit_radius: f32,
    /// Height above the player's head while orbiting it.
    pub snake_orbit_height: f32,
    /// Player orbit duration.
    pub snake_orbit_ms: u64,

    /// Spin time per degree of rotation.
    pub rotate_ms_per_degree: f32,

    /// Cruise start distance from the billboard face.
    pub billboard_far: f32,
    /// Cruise end distance from the billboard face.
    pub billboard_near: f32,
    /// Billboard dolly duration.
    pub billboard_cruise_ms: u64,

    /// Altitude of the panorama vantage.
    pub panorama_altitude: f32,
    /// Downward tilt reached before the panorama pan.
    pub panorama_tilt_deg: f32,
    /// Altitude at the bottom of a dive.
    pub dive_floor_altitude: f32,
}

impl Default for DroneOptions {
    fn default() -> Self {
        Self {
            count: 2,
            approach_speed: 3.0,
            max_arc_height: 4.0,
            weights: ActionWeights::default(),
            idle_min_ms: 2000,
            idle_max_ms: 4000,
            moving_hover_ms: 1000,
            wall_run_ms: 30_000,
            wall_offset: 6.0,
            wall_altitude: 12.0,
            wall_forward_chance: 0.8,
            bobble_amplitude: 1.5,
            bobble_frequency_hz: 0.25,
            banner_orbit_radius: 12.0,
            banner_orbit_ms: 9000,
            banner_max_arc_deg: 120.0,
            snake_orbit_radius: 10.0,
            snake_orbit_height: 6.0,
            snake_orbit_ms: 12_000,
            rotate_ms_per_degree: 16.0,
            billboard_far: 30.0,
            billboard_near: 12.0,
            billboard_cruise_ms: 8000,
            panorama_altitude: 45.0,
            panorama_tilt_deg: 35.0,
            dive_floor_altitude: 6.0,
        }
    }
}

/// Stuck-detection cadence and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Failsafe", inline)]
#[serde(default)]
pub struct FailsafeOptions {
    /// Time between progress checks.
    pub check_interval_ms: u64,
    /// Displacement below which a check counts as no progress.
    pub epsilon: f32,
    /// Accumulated no-progress time that triggers a hard reset.
    pub stuck_threshold_ms: u64,
}

impl Default for FailsafeOptions {
    fn default() -> Self {
        Self {
            check_interval_ms: 2500,
            epsilon: 0.2,
            stuck_threshold_ms: 7500,
        }
    }
}
