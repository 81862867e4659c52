use glam::Vec3;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Horizontal rectangle and altitude band that drones may occupy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playable Bounds", inline)]
#[serde(default)]
pub struct PlayableBounds {
    /// Western edge (minimum X).
    pub min_x: f32,
    /// Eastern edge (maximum X).
    pub max_x: f32,
    /// Northern edge (minimum Z).
    pub min_z: f32,
    /// Southern edge (maximum Z).
    pub max_z: f32,
    /// Lowest allowed altitude.
    #[schemars(title = "Floor", range(min = 0.0, max = 50.0))]
    pub min_altitude: f32,
    /// Highest allowed altitude.
    #[schemars(title = "Ceiling", range(min = 5.0, max = 200.0))]
    pub max_altitude: f32,
}

impl Default for PlayableBounds {
    fn default() -> Self {
        Self {
            min_x: -40.0,
            max_x: 40.0,
            min_z: -40.0,
            max_z: 40.0,
            min_altitude: 3.0,
            max_altitude: 60.0,
        }
    }
}

impl PlayableBounds {
    /// Clamp a position into the rectangle and altitude band.
    #[must_use]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_altitude, self.max_altitude),
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    /// Clamp only the altitude.
    #[must_use]
    pub fn clamp_altitude(&self, y: f32) -> f32 {
        y.clamp(self.min_altitude, self.max_altitude)
    }

    /// Whether `p` lies inside the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&p.x)
            && (self.min_z..=self.max_z).contains(&p.z)
            && (self.min_altitude..=self.max_altitude).contains(&p.y)
    }

    /// Uniform random point inside the rectangle at an altitude drawn from
    /// `[lo, hi]` (clamped to the band).
    pub fn random_point<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        lo: f32,
        hi: f32,
    ) -> Vec3 {
        let lo = self.clamp_altitude(lo);
        let hi = self.clamp_altitude(hi).max(lo);
        Vec3::new(
            lerp(self.min_x, self.max_x, rng.random::<f32>()),
            lerp(lo, hi, rng.random::<f32>()),
            lerp(self.min_z, self.max_z, rng.random::<f32>()),
        )
    }

    /// Random point anywhere inside the bounds.
    pub fn random_safe_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.random_point(rng, self.min_altitude, self.max_altitude)
    }

    /// Non-empty extents on every axis.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x
            && self.min_z < self.max_z
            && self.min_altitude < self.max_altitude
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn clamp_pulls_points_inside() {
        let b = PlayableBounds::default();
        let p = b.clamp(Vec3::new(100.0, -5.0, -100.0));
        assert_eq!(p, Vec3::new(40.0, 3.0, -40.0));
        assert!(b.contains(p));
    }

    #[test]
    fn random_points_stay_inside() {
        let b = PlayableBounds::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(b.contains(b.random_safe_point(&mut rng)));
        }
    }

    #[test]
    fn random_point_respects_altitude_window() {
        let b = PlayableBounds::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let p = b.random_point(&mut rng, 10.0, 12.0);
            assert!((10.0..=12.0).contains(&p.y));
        }
    }

    #[test]
    fn inverted_bounds_are_invalid() {
        let b = PlayableBounds {
            min_x: 5.0,
            max_x: -5.0,
            ..PlayableBounds::default()
        };
        assert!(!b.is_valid());
        assert!(PlayableBounds::default().is_valid());
    }
}
