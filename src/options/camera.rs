use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and per-view-mode control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,

    /// Horizontal distance of the orbit camera from the board center.
    pub orbit_radius: f32,
    /// Height of the orbit camera above the board center.
    pub orbit_height: f32,
    /// Automatic orbit rate in radians per second.
    #[schemars(title = "Orbit Speed", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub orbit_speed: f32,
    /// Orbit azimuth change per dragged pixel.
    #[schemars(title = "Drag Sensitivity", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub drag_sensitivity: f32,

    /// Eye height above the player's head in first person.
    pub eye_height: f32,
    /// Gameplay speed above which first person tracks the true heading.
    pub speed_threshold: f32,
    /// Per-frame convergence toward the true heading at speed.
    pub fast_convergence: f32,

    /// Height above the player in third person.
    pub third_person_height: f32,
    /// Distance behind the player in third person.
    pub third_person_distance: f32,
    /// Look-at distance ahead of the player in third person.
    pub look_ahead: f32,
    /// Scale on the tick-duration smoothing rate in third person.
    pub third_person_smoothing: f32,

    /// Onboard camera attachment point in drone-local space.
    pub drone_mount_offset: [f32; 3],
    /// Blend of the drone's forward vector toward straight down.
    #[schemars(title = "Drone Tilt", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub drone_tilt_blend: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 1000.0,
            orbit_radius: 60.0,
            orbit_height: 35.0,
            orbit_speed: 0.1,
            drag_sensitivity: 0.005,
            eye_height: 0.6,
            speed_threshold: 8.0,
            fast_convergence: 0.9,
            third_person_height: 6.0,
            third_person_distance: 10.0,
            look_ahead: 8.0,
            third_person_smoothing: 1.0,
            drone_mount_offset: [0.0, -0.4, -0.3],
            drone_tilt_blend: 0.35,
        }
    }
}
