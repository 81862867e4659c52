//! Small geometry helpers for trajectory synthesis.
//!
//! Conventions: Y is up, an identity orientation looks down `-Z`, yaw is
//! measured counter-clockwise about `+Y` starting from `-Z`.

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Quat, Vec3};

/// Minimum squared length treated as a usable direction.
const DIRECTION_EPSILON_SQ: f32 = 1e-10;

/// Orientation whose forward (`-Z`) axis points along `direction`.
///
/// Returns `None` for a zero-length direction so callers can keep their
/// previous orientation instead of normalizing a zero vector.
#[must_use]
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    if direction.length_squared() < DIRECTION_EPSILON_SQ {
        return None;
    }
    let forward = direction.normalize();
    // Straight up/down: borrow Z as the reference so the basis stays valid.
    let reference = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::NEG_Z
    } else {
        Vec3::Y
    };
    let right = forward.cross(reference).normalize();
    let up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize())
}

/// Orientation at `from` looking toward `target`, if they are distinct.
#[must_use]
pub fn look_at(from: Vec3, target: Vec3) -> Option<Quat> {
    look_rotation(target - from)
}

/// Pure yaw rotation about `+Y`.
#[inline]
#[must_use]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Forward vector of a yaw heading on the horizontal plane.
#[inline]
#[must_use]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::NEG_Z
}

/// Signed shortest angular difference `to - from`, in (-π, π].
#[must_use]
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Move `from` toward `to` by `factor` along the shortest arc.
#[must_use]
pub fn lerp_angle(from: f32, to: f32, factor: f32) -> f32 {
    from + shortest_angle(from, to) * factor.clamp(0.0, 1.0)
}

/// Point on the horizontal circle around `center` at `angle` (radians,
/// measured from `+X` toward `+Z`).
#[inline]
#[must_use]
pub fn circle_point(center: Vec3, radius: f32, angle: f32) -> Vec3 {
    center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// Angle of `point` around `center` in the same convention as
/// [`circle_point`]. Coincident points yield zero.
#[must_use]
pub fn horizontal_angle(center: Vec3, point: Vec3) -> f32 {
    let d = point - center;
    if d.x == 0.0 && d.z == 0.0 {
        0.0
    } else {
        d.z.atan2(d.x)
    }
}

/// Quadratic bezier through control point `p1`.
#[must_use]
pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let omt = 1.0 - t;
    p0 * (omt * omt) + p1 * (2.0 * omt * t) + p2 * (t * t)
}

/// Derivative of [`quadratic_bezier`] with respect to `t`.
#[must_use]
pub fn quadratic_bezier_tangent(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    (p1 - p0) * (2.0 * (1.0 - t)) + (p2 - p1) * (2.0 * t)
}

/// Vertical bump peaking at mid-progress, zero at both ends.
#[inline]
#[must_use]
pub fn arc_bump(t: f32, height: f32) -> f32 {
    (PI * t.clamp(0.0, 1.0)).sin() * height
}
