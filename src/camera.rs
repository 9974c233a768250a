//! Orthographic follow camera
//!
//! Looks down at the floor from an isometric-like angle. The vertical extent
//! of the view is fixed by the frustum height; horizontal bounds stretch with
//! the viewport aspect ratio.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthoCamera {
    /// Vertical extent of the view in world units
    pub frustum_height: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl OrthoCamera {
    pub fn new(frustum_height: f32, aspect: f32) -> Self {
        // Start up and to the side of the origin at 45 degrees in XZ
        let distance = frustum_height * 0.8;
        let mut camera = Self {
            frustum_height,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: 1.0,
            far: 1000.0,
            position: Vec3::new(distance * 0.8, distance, distance * 0.8),
            target: Vec3::ZERO,
        };
        camera.set_aspect(aspect);
        camera
    }

    /// Horizontal offset kept between the camera and what it follows
    pub fn follow_offset(&self) -> f32 {
        self.frustum_height * 0.8
    }

    /// Recompute projection bounds for a new aspect ratio
    pub fn set_aspect(&mut self, aspect: f32) {
        let h = self.frustum_height;
        self.left = -h * aspect / 2.0;
        self.right = h * aspect / 2.0;
        self.top = h / 2.0;
        self.bottom = -h / 2.0;
    }

    /// Recompute projection bounds for a viewport size in pixels
    ///
    /// Degenerate sizes are ignored so the projection never becomes NaN.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.set_aspect(width / height);
        true
    }

    pub fn aspect(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    /// Track a point at the fixed offset, keeping the current height
    pub fn follow(&mut self, target: Vec3) {
        let offset = self.follow_offset();
        self.position.x = target.x + offset;
        self.position.z = target.z + offset;
        self.look_at(target);
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Direction the camera is looking (unit length)
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Y)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_placement() {
        let cam = OrthoCamera::new(15.0, 1.0);
        assert!((cam.position - Vec3::new(9.6, 12.0, 9.6)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_resize_keeps_vertical_extent() {
        let mut cam = OrthoCamera::new(15.0, 1.0);

        assert!(cam.resize(800.0, 600.0));
        assert!((cam.left + 10.0).abs() < 1e-4);
        assert!((cam.right - 10.0).abs() < 1e-4);
        assert_eq!(cam.top, 7.5);
        assert_eq!(cam.bottom, -7.5);

        assert!(cam.resize(400.0, 800.0));
        assert!((cam.left + 3.75).abs() < 1e-4);
        assert!((cam.right - 3.75).abs() < 1e-4);
        assert_eq!(cam.top, 7.5);
        assert_eq!(cam.bottom, -7.5);
        assert!((cam.aspect() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_resize_ignores_empty_viewport() {
        let mut cam = OrthoCamera::new(15.0, 2.0);
        assert!(!cam.resize(800.0, 0.0));
        assert!((cam.aspect() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_follow_offsets_and_looks_at() {
        let mut cam = OrthoCamera::new(15.0, 1.0);
        let player = Vec3::new(3.0, 0.5, -4.0);
        cam.follow(player);
        assert!((cam.position.x - 15.0).abs() < 1e-4);
        assert!((cam.position.z - 8.0).abs() < 1e-4);
        assert!((cam.position.y - 12.0).abs() < 1e-4);
        assert_eq!(cam.target, player);
        assert!(cam.forward().y < 0.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut cam = OrthoCamera::new(15.0, 4.0 / 3.0);
        let player = Vec3::new(-2.0, 0.5, 6.0);
        cam.follow(player);
        let clip = cam.view_projection() * player.extend(1.0);
        assert!(clip.x.abs() < 1e-4);
        assert!(clip.y.abs() < 1e-4);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }
}
