use glam::{Mat4, Vec3};

use crate::options::CameraOptions;
use crate::transform::Transform;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Lens {
    /// Lens from options for a `width` x `height` viewport.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let mut lens = Self {
            fovy: options.fovy,
            aspect: 1.0,
            znear: options.znear,
            zfar: options.zfar,
        };
        lens.resize(width, height);
        lens
    }

    /// Update the aspect ratio. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Projection matrix with a [0, 1] depth range.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection for an observer at `transform`.
    #[must_use]
    pub fn view_projection(&self, transform: &Transform) -> Mat4 {
        let view = Mat4::look_to_rh(
            transform.position,
            transform.forward(),
            transform.orientation * Vec3::Y,
        );
        self.projection() * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Uniform block handed to the renderer each frame.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Cinematic emphasis in [0, 1] (crash pulse), 0 otherwise.
    pub emphasis: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 3],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 60.0,
            emphasis: 0.0,
            _pad: [0.0; 3],
        }
    }

    /// Refresh from the camera transform, lens and emphasis.
    pub fn update(&mut self, transform: &Transform, lens: &Lens, emphasis: f32) {
        self.view_proj = lens.view_projection(transform).to_cols_array_2d();
        self.position = transform.position.to_array();
        self.aspect = lens.aspect;
        self.forward = transform.forward().to_array();
        self.fovy = lens.fovy;
        self.emphasis = emphasis.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec4};

    use super::*;

    #[test]
    fn uniform_is_gpu_sized() {
        assert_eq!(size_of::<CameraUniform>(), 112);
        let uniform = CameraUniform::new();
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 112);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut lens = Lens::new(&CameraOptions::default(), 1600, 900);
        assert!((lens.aspect - 16.0 / 9.0).abs() < 1e-6);
        lens.resize(0, 900);
        assert!((lens.aspect - 16.0 / 9.0).abs() < 1e-6);
        lens.resize(800, 800);
        assert_eq!(lens.aspect, 1.0);
    }

    #[test]
    fn point_ahead_projects_to_screen_center() {
        let lens = Lens::new(&CameraOptions::default(), 800, 600);
        let camera = Transform::new(Vec3::new(3.0, 4.0, 5.0), Quat::from_rotation_y(0.7));
        let ahead = camera.point_ahead(10.0);
        let clip = lens.view_projection(&camera) * Vec4::new(ahead.x, ahead.y, ahead.z, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
