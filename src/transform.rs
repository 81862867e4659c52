//! Position plus orientation of a camera or drone.

use glam::{Quat, Vec3};

use crate::util::geometry::look_at;

/// Rigid transform: world-space position and unit orientation.
///
/// The identity orientation looks down `-Z` with `+Y` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Unit orientation.
    pub orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Origin, looking down `-Z`.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Transform from parts.
    #[must_use]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Transform at `position` facing `target`.
    ///
    /// Keeps `fallback` orientation when the two points coincide.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3, fallback: Quat) -> Self {
        Self {
            position,
            orientation: look_at(position, target).unwrap_or(fallback),
        }
    }

    /// Unit forward (`-Z`) direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Lerp position and slerp orientation by `t`.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            orientation: self.orientation.slerp(other.orientation, t),
        }
    }

    /// Point `distance` units ahead along the forward axis.
    #[must_use]
    pub fn point_ahead(&self, distance: f32) -> Vec3 {
        self.position + self.forward() * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        let a = Transform::new(Vec3::ZERO, Quat::IDENTITY);
        let b = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(1.0));
        assert_eq!(a.interpolate(&b, 0.0).position, a.position);
        let end = a.interpolate(&b, 1.0);
        assert!((end.position - b.position).length() < 1e-5);
        assert!(end.orientation.angle_between(b.orientation) < 1e-3);
    }

    #[test]
    fn test_looking_at_coincident_keeps_fallback() {
        let fallback = Quat::from_rotation_y(0.7);
        let t = Transform::looking_at(Vec3::ONE, Vec3::ONE, fallback);
        assert_eq!(t.orientation, fallback);
    }

    #[test]
    fn test_point_ahead() {
        let t = Transform::looking_at(Vec3::ZERO, Vec3::X * 5.0, Quat::IDENTITY);
        assert!((t.point_ahead(2.0) - Vec3::X * 2.0).length() < 1e-5);
    }
}
