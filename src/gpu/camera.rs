//! Fixed perspective camera looking down the -z axis.

use crate::config::SceneConfig;
use glam::{Mat4, Vec3};

/// Perspective camera for the smoke scene.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height of the surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Eye position. The camera always looks toward -z.
    pub position: Vec3,
}

impl Camera {
    /// Camera configured from the scene settings.
    pub fn new(scene: &SceneConfig, aspect: f32) -> Self {
        Self {
            fov_degrees: scene.fov_degrees,
            aspect,
            near: scene.near,
            far: scene.far,
            position: Vec3::new(0.0, 0.0, scene.camera_distance),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
