//! Ambient lighting clock for the arena.

use std::f32::consts::TAU;

use glam::Vec3;
use web_time::Duration;

use crate::host::GraphicsQuality;
use crate::options::EnvironmentOptions;

/// Lighting values handed to the renderer each frame.
///
/// Layout (32 bytes):
///   sun_dir: vec3<f32>   (offset 0, align 16)
///   ambient: f32         (offset 12)
///   sun_azimuth: f32     (offset 16)
///   _pad: vec3<f32>      (offset 20)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EnvironmentUniform {
    /// Direction light travels, from the sun toward the ground.
    pub sun_dir: [f32; 3],
    /// Ambient intensity after the quality scale.
    pub ambient: f32,
    /// Sun azimuth in radians.
    pub sun_azimuth: f32,
    pub(crate) _pad: [f32; 3],
}

/// Day-cycle clock advancing the sun around the arena.
#[derive(Debug, Clone)]
pub struct Environment {
    options: EnvironmentOptions,
    sun_azimuth: f32,
    uniform: EnvironmentUniform,
}

impl Environment {
    /// Clock starting at azimuth zero.
    #[must_use]
    pub fn new(options: &EnvironmentOptions) -> Self {
        let mut environment = Self {
            options: options.clone(),
            sun_azimuth: 0.0,
            uniform: bytemuck::Zeroable::zeroed(),
        };
        environment.refresh(GraphicsQuality::default());
        environment
    }

    /// Advance the sun by `dt` and refresh the lighting values.
    pub fn advance(&mut self, dt: Duration, quality: GraphicsQuality) {
        if self.options.day_length_s > 0.0 {
            let turn = dt.as_secs_f32() / self.options.day_length_s;
            self.sun_azimuth = (self.sun_azimuth + turn * TAU).rem_euclid(TAU);
        }
        self.refresh(quality);
    }

    /// Latest lighting values.
    #[must_use]
    pub fn uniform(&self) -> &EnvironmentUniform {
        &self.uniform
    }

    fn refresh(&mut self, quality: GraphicsQuality) {
        let elevation = self.options.sun_elevation_deg.to_radians();
        let toward_sun = Vec3::new(
            elevation.cos() * self.sun_azimuth.cos(),
            elevation.sin(),
            elevation.cos() * self.sun_azimuth.sin(),
        );
        let scale = if quality == GraphicsQuality::Low {
            self.options.low_quality_ambient_scale
        } else {
            1.0
        };
        self.uniform.sun_dir = (-toward_sun).normalize_or_zero().to_array();
        self.uniform.ambient = self.options.ambient * scale;
        self.uniform.sun_azimuth = self.sun_azimuth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_completes_a_day() {
        let options = EnvironmentOptions::default();
        let mut env = Environment::new(&options);
        let quarter = Duration::from_secs_f32(options.day_length_s / 4.0);
        env.advance(quarter, GraphicsQuality::High);
        assert!((env.uniform().sun_azimuth - TAU / 4.0).abs() < 1e-4);
        for _ in 0..3 {
            env.advance(quarter, GraphicsQuality::High);
        }
        let azimuth = env.uniform().sun_azimuth;
        assert!(azimuth < 1e-3 || (TAU - azimuth) < 1e-3);
    }

    #[test]
    fn light_points_down_and_low_quality_dims_ambient() {
        let options = EnvironmentOptions::default();
        let mut env = Environment::new(&options);
        env.advance(Duration::from_secs(1), GraphicsQuality::Medium);
        assert!(env.uniform().sun_dir[1] < 0.0);
        let full = env.uniform().ambient;
        env.advance(Duration::ZERO, GraphicsQuality::Low);
        let dimmed = env.uniform().ambient;
        assert!((dimmed - full * options.low_quality_ambient_scale).abs() < 1e-6);
    }

    #[test]
    fn uniform_is_gpu_sized() {
        assert_eq!(size_of::<EnvironmentUniform>(), 32);
    }
}
