//! Static scene description
//!
//! Background, lights and the floor grid, built once at startup. The
//! renderer turns this into GPU data; gameplay never reads it.

use glam::Vec3;

use crate::colors;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    /// Light position; it shines from here toward the origin
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene toward the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

/// Wireframe floor grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub size: f32,
    pub segments: u32,
    pub color: u32,
}

impl Floor {
    /// Line segment endpoints on y = 0, two points per line
    pub fn grid_lines(&self) -> Vec<Vec3> {
        let half = self.size / 2.0;
        let segments = self.segments.max(1);
        let step = self.size / segments as f32;
        let mut points = Vec::with_capacity((segments as usize + 1) * 4);

        for i in 0..=segments {
            let offset = -half + i as f32 * step;
            // Lines along X
            points.push(Vec3::new(-half, 0.0, offset));
            points.push(Vec3::new(half, 0.0, offset));
            // Lines along Z
            points.push(Vec3::new(offset, 0.0, -half));
            points.push(Vec3::new(offset, 0.0, half));
        }
        points
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSetup {
    pub background: u32,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    pub floor: Floor,
}

impl SceneSetup {
    /// Scene for a square map of the given size
    pub fn new(map_size: f32) -> Self {
        Self {
            background: colors::BACKGROUND,
            ambient: AmbientLight {
                color: colors::WHITE,
                intensity: 0.7,
            },
            sun: DirectionalLight {
                color: colors::WHITE,
                intensity: 1.0,
                position: Vec3::new(5.0, 10.0, 7.5),
            },
            floor: Floor {
                size: map_size,
                // One grid cell per two world units
                segments: (map_size / 2.0).round().max(1.0) as u32,
                color: colors::FLOOR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene() {
        let scene = SceneSetup::new(40.0);
        assert_eq!(scene.background, 0x222233);
        assert_eq!(scene.floor.segments, 20);
        assert!((scene.sun.direction().length() - 1.0).abs() < 1e-5);
        assert!(scene.sun.direction().y > 0.0);
    }

    #[test]
    fn test_grid_spans_floor() {
        let floor = Floor {
            size: 20.0,
            segments: 10,
            color: colors::FLOOR,
        };
        let points = floor.grid_lines();
        assert_eq!(points.len(), 11 * 4);
        assert!(points.iter().all(|p| p.y == 0.0));
        assert!(points.iter().all(|p| p.x.abs() <= 10.0 && p.z.abs() <= 10.0));
        assert_eq!(points[0], Vec3::new(-10.0, 0.0, -10.0));
    }
}
