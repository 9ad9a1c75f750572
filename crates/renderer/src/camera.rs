//! Orbit camera circling a focus point.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use std::f32::consts::PI;

/// Camera that orbits a target point, with configurable FOV and clipping planes.
///
/// The eye position is stored directly rather than as spherical angles so that
/// fly-to animations can move it freely; orbit and zoom re-derive the angles
/// from the current offset.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Closest the eye may dolly toward the target.
    pub min_distance: f32,
    /// Furthest the eye may dolly from the target.
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            eye: Self::home_eye(),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            aspect: 16.0 / 9.0,
            min_distance: 10.0,
            max_distance: 60.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default eye position: 30 units out at 30 degrees elevation, pulled back on Z.
    pub fn home_eye() -> Vec3 {
        let a = PI / 6.0;
        Vec3::new(30.0 * a.cos(), 30.0 * a.sin(), 40.0)
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Distance from eye to target.
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Rotate the eye around the target from a mouse drag.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length().max(0.001);

        // Spherical angles: theta around Y measured from +Z, phi from the +Y pole.
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= delta_x * sensitivity;
        phi -= delta_y * sensitivity;
        // Keep away from the poles so the up vector stays valid.
        phi = phi.clamp(0.05, PI - 0.05);

        self.eye = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Dolly toward/away from the target. Positive `steps` zooms in.
    pub fn zoom(&mut self, steps: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length().max(0.001);
        let new_radius = (radius * 0.92f32.powf(steps)).clamp(self.min_distance, self.max_distance);
        self.eye = self.target + offset / radius * new_radius;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.eye
    }

    /// Unproject a cursor position into a world-space ray (origin, direction).
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (screen_x / width.max(1.0)) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / height.max(1.0)) * 2.0;

        let inv = self.view_projection_matrix().inverse();
        // wgpu clip space: depth 0 at the near plane, 1 at the far plane.
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        (near, (far - near).normalize())
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &OrbitCamera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_preserves_distance() {
        let mut camera = OrbitCamera::default();
        let before = camera.distance();
        camera.orbit(35.0, -12.0, 0.01);
        let after = camera.distance();
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut camera = OrbitCamera::default();
        camera.zoom(500.0);
        assert!((camera.distance() - camera.min_distance).abs() < 1e-3);
        camera.zoom(-500.0);
        assert!((camera.distance() - camera.max_distance).abs() < 1e-3);
    }

    #[test]
    fn screen_center_ray_points_at_target() {
        let mut camera = OrbitCamera::default();
        camera.eye = Vec3::new(0.0, 0.0, 50.0);
        camera.target = Vec3::ZERO;
        camera.aspect = 1.0;

        let (origin, dir) = camera.screen_ray(400.0, 300.0, 800.0, 600.0);
        assert!(origin.z < 50.0 && origin.z > 49.0);
        assert!(dir.z < -0.999);
        assert!(dir.x.abs() < 1e-4 && dir.y.abs() < 1e-4);
    }
}
