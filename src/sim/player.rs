//! The player avatar

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Player-controlled capsule walking on the floor plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Displacement applied during the last update
    pub velocity: Vec3,
    /// Units per second
    pub speed: f32,
    /// Capsule radius, used as the margin when clamping to the map
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_SPEED)
    }
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec3::new(0.0, PLAYER_HEIGHT, 0.0),
            velocity: Vec3::ZERO,
            speed,
            radius: PLAYER_RADIUS,
        }
    }

    /// Advance the player along `intent` and keep it inside the map
    ///
    /// `intent` is on the floor plane (`x` = world X, `y` = world Z) and may
    /// be non-unit or zero; a zero intent produces zero velocity.
    pub fn update(&mut self, dt: f32, intent: Vec2, map_size: f32) {
        let dir = Vec3::new(intent.x, 0.0, intent.y).normalize_or_zero();
        self.velocity = dir * self.speed * dt;
        self.position += self.velocity;
        self.clamp_to_map(map_size);
    }

    /// Clamp X and Z into `[-map/2 + radius, map/2 - radius]`
    pub fn clamp_to_map(&mut self, map_size: f32) {
        let half = (map_size / 2.0 - self.radius).max(0.0);
        self.position.x = self.position.x.clamp(-half, half);
        self.position.z = self.position.z.clamp(-half, half);
    }

    /// Bounding box of the capsule (axis along world Z)
    pub fn bounds(&self) -> Aabb {
        let half_length = self.radius + PLAYER_CAPSULE_LENGTH / 2.0;
        Aabb::from_center(
            self.position,
            Vec3::new(self.radius, self.radius, half_length),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_origin() {
        let player = Player::default();
        assert_eq!(player.position, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_moves_at_speed() {
        let mut player = Player::default();
        player.update(1.0, Vec2::new(1.0, 0.0), MAP_SIZE);
        assert!((player.position.x - PLAYER_SPEED).abs() < 1e-5);
        assert_eq!(player.position.z, 0.0);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut player = Player::default();
        player.update(1.0, Vec2::new(1.0, -1.0), MAP_SIZE);
        let flat = Vec2::new(player.position.x, player.position.z);
        assert!((flat.length() - PLAYER_SPEED).abs() < 1e-4);
        assert!(player.position.z < 0.0);
    }

    #[test]
    fn test_zero_intent_zero_velocity() {
        let mut player = Player::default();
        player.update(0.5, Vec2::ZERO, MAP_SIZE);
        assert_eq!(player.velocity, Vec3::ZERO);
        assert!(!player.position.is_nan());
    }

    #[test]
    fn test_clamped_at_edge() {
        let mut player = Player::default();
        player.update(100.0, Vec2::new(1.0, 1.0), 40.0);
        assert!((player.position.x - 19.6).abs() < 1e-5);
        assert!((player.position.z - 19.6).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_follow_capsule() {
        let player = Player::default();
        let b = player.bounds();
        assert!((b.half_extents() - Vec3::new(0.4, 0.4, 0.5)).length() < 1e-6);
        assert_eq!(b.center(), player.position);
    }

    proptest! {
        #[test]
        fn zero_intent_never_moves(dt in 0.0f32..10.0, x in -19.0f32..19.0, z in -19.0f32..19.0) {
            let mut player = Player::default();
            player.position = Vec3::new(x, PLAYER_HEIGHT, z);
            let before = player.position;
            player.update(dt, Vec2::ZERO, MAP_SIZE);
            prop_assert_eq!(player.position, before);
        }

        #[test]
        fn never_escapes_bounds(
            steps in proptest::collection::vec((0.0f32..2.0, -1i32..=1, -1i32..=1), 1..64),
        ) {
            let mut player = Player::default();
            let limit = MAP_SIZE / 2.0 - PLAYER_RADIUS;
            for (dt, x, z) in steps {
                player.update(dt, Vec2::new(x as f32, z as f32), MAP_SIZE);
                prop_assert!(player.position.x.abs() <= limit);
                prop_assert!(player.position.z.abs() <= limit);
            }
        }
    }
}
