use glam::Vec3;

/// Which source drives the camera while no transition is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Slow automatic orbit around the board, draggable.
    #[default]
    Orbit,
    /// Eye-level view from the player's head.
    FirstPerson,
    /// Smoothed chase view behind the player.
    ThirdPerson,
    /// Onboard view from drone `n`.
    Drone(usize),
}

/// Active view mode plus the smoothing memory of each mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraViewState {
    /// Mode of the most recent controlled frame.
    pub mode: ViewMode,
    /// Mode of the frame before; `None` after an invalidation, which makes
    /// the next frame an entry frame for every mode.
    previous: Option<ViewMode>,
    /// First-person yaw accumulator.
    pub first_person_yaw: f32,
    /// Smoothed third-person eye position.
    pub third_person_position: Vec3,
    /// Smoothed third-person look-at point.
    pub third_person_look_at: Vec3,
    /// Orbit azimuth in radians.
    pub orbit_azimuth: f32,
}

impl Default for CameraViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Orbit,
            previous: None,
            first_person_yaw: 0.0,
            third_person_position: Vec3::ZERO,
            third_person_look_at: Vec3::ZERO,
            orbit_azimuth: 0.0,
        }
    }
}

impl CameraViewState {
    /// Switch to `mode` for this frame. Returns `true` on an entry frame,
    /// when the smoothing memory must be reset rather than blended.
    pub fn enter(&mut self, mode: ViewMode) -> bool {
        let entering = self.previous != Some(mode);
        self.previous = Some(mode);
        self.mode = mode;
        entering
    }

    /// Forget the previous mode so the next frame snaps.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Whether the next frame will snap regardless of mode.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.previous.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_detected_once_per_switch() {
        let mut state = CameraViewState::default();
        assert!(state.enter(ViewMode::Orbit));
        assert!(!state.enter(ViewMode::Orbit));
        assert!(state.enter(ViewMode::FirstPerson));
        assert!(!state.enter(ViewMode::FirstPerson));
        assert!(state.enter(ViewMode::Drone(1)));
        assert!(state.enter(ViewMode::Drone(0)));
    }

    #[test]
    fn invalidate_forces_entry() {
        let mut state = CameraViewState::default();
        let _ = state.enter(ViewMode::ThirdPerson);
        state.invalidate();
        assert!(state.is_invalidated());
        assert!(state.enter(ViewMode::ThirdPerson));
        assert!(!state.is_invalidated());
    }
}
