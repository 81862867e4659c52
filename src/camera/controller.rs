use glam::{Vec2, Vec3};
use web_time::Duration;

use crate::camera::view::{CameraViewState, ViewMode};
use crate::drone::Drone;
use crate::host::{PlayerSnapshot, PointerDrag};
use crate::options::CameraOptions;
use crate::transform::Transform;
use crate::util::geometry::{
    circle_point, lerp_angle, look_at, look_rotation, yaw_forward, yaw_rotation,
};

/// Everything a controlled camera frame reads.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame<'a> {
    /// Time since the previous processed frame.
    pub dt: Duration,
    /// Player head snapshot.
    pub player: &'a PlayerSnapshot,
    /// Manual orbit drag.
    pub drag: PointerDrag,
    /// Board center the orbit circles.
    pub board_center: Vec3,
    /// Drone fleet for onboard views.
    pub drones: &'a [Drone],
}

/// Derives the camera transform from the active view mode.
#[derive(Debug, Clone)]
pub struct CameraModeController {
    options: CameraOptions,
    state: CameraViewState,
}

impl CameraModeController {
    /// Controller starting in orbit mode; the first frame snaps.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            options: options.clone(),
            state: CameraViewState::default(),
        }
    }

    /// Per-mode smoothing memory.
    #[must_use]
    pub fn state(&self) -> &CameraViewState {
        &self.state
    }

    /// Make the next controlled frame snap instead of smoothing.
    pub fn invalidate(&mut self) {
        self.state.invalidate();
    }

    /// Current orbit azimuth in radians.
    #[must_use]
    pub fn orbit_azimuth(&self) -> f32 {
        self.state.orbit_azimuth
    }

    /// Jump the orbit to `azimuth`.
    pub fn set_orbit_azimuth(&mut self, azimuth: f32) {
        self.state.orbit_azimuth = azimuth;
    }

    /// Camera transform for `mode` this frame. `current` is held when the
    /// mode has nothing to show (unknown drone index).
    pub fn update(
        &mut self,
        mode: ViewMode,
        current: &Transform,
        frame: &CameraFrame<'_>,
    ) -> Transform {
        let entering = self.state.enter(mode);
        let dt = frame.dt.as_secs_f32();
        match mode {
            ViewMode::Orbit => {
                self.advance_orbit(dt, frame.drag);
                orbit_pose(frame.board_center, self.state.orbit_azimuth, &self.options)
            }
            ViewMode::FirstPerson => {
                self.update_first_person(entering, frame.dt, frame.player)
            }
            ViewMode::ThirdPerson => {
                self.update_third_person(entering, frame.dt, frame.player, current)
            }
            ViewMode::Drone(index) => frame
                .drones
                .get(index)
                .map_or(*current, |drone| drone_pose(&drone.transform(), &self.options)),
        }
    }

    fn advance_orbit(&mut self, dt: f32, drag: PointerDrag) {
        if drag.active {
            self.apply_drag(drag.delta);
        } else {
            self.state.orbit_azimuth += self.options.orbit_speed * dt;
        }
    }

    /// Rotate the orbit by a pointer movement in pixels.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.state.orbit_azimuth -= delta.x * self.options.drag_sensitivity;
    }

    fn update_first_person(
        &mut self,
        entering: bool,
        dt: Duration,
        player: &PlayerSnapshot,
    ) -> Transform {
        let yaw = &mut self.state.first_person_yaw;
        if entering {
            *yaw = player.heading;
        } else if player.speed > self.options.speed_threshold {
            *yaw = lerp_angle(*yaw, player.heading, self.options.fast_convergence);
        } else {
            *yaw = lerp_angle(*yaw, player.visual_heading, tick_factor(dt, player, 1.0));
        }
        first_person_pose(player.head, *yaw, &self.options)
    }

    fn update_third_person(
        &mut self,
        entering: bool,
        dt: Duration,
        player: &PlayerSnapshot,
        current: &Transform,
    ) -> Transform {
        let (ideal_position, ideal_look_at) = third_person_ideal(player, &self.options);
        if entering {
            self.state.third_person_position = ideal_position;
            self.state.third_person_look_at = ideal_look_at;
        } else {
            let factor = tick_factor(dt, player, self.options.third_person_smoothing);
            self.state.third_person_position =
                self.state.third_person_position.lerp(ideal_position, factor);
            self.state.third_person_look_at =
                self.state.third_person_look_at.lerp(ideal_look_at, factor);
        }
        Transform::looking_at(
            self.state.third_person_position,
            self.state.third_person_look_at,
            current.orientation,
        )
    }
}

/// `min(1, dt / tick_duration * scale)`.
fn tick_factor(dt: Duration, player: &PlayerSnapshot, scale: f32) -> f32 {
    let tick = player.tick_duration.as_secs_f32();
    if tick <= 0.0 {
        return 1.0;
    }
    (dt.as_secs_f32() / tick * scale).min(1.0)
}

/// Orbit camera at `azimuth` around `center`, looking at it.
#[must_use]
pub fn orbit_pose(center: Vec3, azimuth: f32, options: &CameraOptions) -> Transform {
    let position = circle_point(
        center + Vec3::Y * options.orbit_height,
        options.orbit_radius,
        azimuth,
    );
    Transform::new(position, look_at(position, center).unwrap_or_default())
}

/// Eye-level camera at the head facing `yaw`.
#[must_use]
pub fn first_person_pose(head: Vec3, yaw: f32, options: &CameraOptions) -> Transform {
    Transform::new(head + Vec3::Y * options.eye_height, yaw_rotation(yaw))
}

/// Unsmoothed chase-camera position and look-at point.
#[must_use]
pub fn third_person_ideal(player: &PlayerSnapshot, options: &CameraOptions) -> (Vec3, Vec3) {
    let offset = Vec3::new(0.0, options.third_person_height, options.third_person_distance);
    let position = player.head + player.orientation() * offset;
    let look_at = player.head + yaw_forward(player.heading) * options.look_ahead;
    (position, look_at)
}

/// Unsmoothed chase-camera transform.
#[must_use]
pub fn third_person_pose(player: &PlayerSnapshot, options: &CameraOptions) -> Transform {
    let (position, target) = third_person_ideal(player, options);
    Transform::looking_at(position, target, player.orientation())
}

/// Gameplay camera pose for `mode`, as the fly-in lands on it.
#[must_use]
pub fn gameplay_pose(mode: ViewMode, player: &PlayerSnapshot, options: &CameraOptions) -> Transform {
    if mode == ViewMode::FirstPerson {
        first_person_pose(player.head, player.heading, options)
    } else {
        third_person_pose(player, options)
    }
}

/// Onboard camera of a drone: mounted below the hull, pitched toward the
/// ground.
#[must_use]
pub fn drone_pose(drone: &Transform, options: &CameraOptions) -> Transform {
    let position = drone.position + drone.orientation * Vec3::from_array(options.drone_mount_offset);
    let blend = options.drone_tilt_blend.clamp(0.0, 1.0);
    let direction = drone.forward() * (1.0 - blend) + Vec3::NEG_Y * blend;
    Transform::new(position, look_rotation(direction).unwrap_or(drone.orientation))
}
