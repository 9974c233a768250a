//! Axis-aligned bounding boxes
//!
//! Player and memory blocks collide as boxes. Touching faces count as
//! overlap.

use glam::Vec3;

/// An axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centered on `center` extending `half_extents` along each axis
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// True if the boxes overlap or touch
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.8, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.0, 0.0, 1.2), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_counts() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_union_and_center() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(-2.0, 0.0, -0.5), Vec3::new(0.0, 0.1, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(u.max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(u.center(), Vec3::new(-0.5, 0.5, 0.0));
        assert!(u.contains_point(Vec3::new(-1.5, 0.05, 0.0)));
    }

    #[test]
    fn test_new_orders_corners() {
        let a = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(a.min, Vec3::ZERO);
        assert_eq!(a.half_extents(), Vec3::splat(0.5));
    }
}
