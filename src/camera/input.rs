use glam::Vec2;

use crate::host::PointerDrag;

/// Folds raw pointer events into the per-frame [`PointerDrag`] the orbit
/// camera reads.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    last_pointer_pos: Option<Vec2>,
    pressed: bool,
    accumulated: Vec2,
}

impl DragTracker {
    /// Tracker with no pointer history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary button went down at `position`.
    pub fn pointer_down(&mut self, position: Vec2) {
        self.pressed = true;
        self.last_pointer_pos = Some(position);
    }

    /// Pointer moved to `position`. Returns true if the move was part of a
    /// drag.
    pub fn pointer_moved(&mut self, position: Vec2) -> bool {
        let delta = self
            .last_pointer_pos
            .map_or(Vec2::ZERO, |last| position - last);
        self.last_pointer_pos = Some(position);
        if self.pressed {
            self.accumulated += delta;
        }
        self.pressed
    }

    /// Primary button released.
    pub fn pointer_up(&mut self) {
        self.pressed = false;
    }

    /// Drag state for this frame; clears the accumulated delta.
    pub fn take(&mut self) -> PointerDrag {
        let delta = std::mem::take(&mut self.accumulated);
        PointerDrag {
            active: self.pressed,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_only_while_pressed() {
        let mut tracker = DragTracker::new();
        assert!(!tracker.pointer_moved(Vec2::new(10.0, 10.0)));
        tracker.pointer_down(Vec2::new(10.0, 10.0));
        assert!(tracker.pointer_moved(Vec2::new(15.0, 12.0)));
        assert!(tracker.pointer_moved(Vec2::new(25.0, 12.0)));

        let drag = tracker.take();
        assert!(drag.active);
        assert_eq!(drag.delta, Vec2::new(15.0, 2.0));
        assert_eq!(tracker.take().delta, Vec2::ZERO);

        tracker.pointer_up();
        let _ = tracker.pointer_moved(Vec2::new(50.0, 50.0));
        let drag = tracker.take();
        assert!(!drag.active);
        assert_eq!(drag.delta, Vec2::ZERO);
    }
}
