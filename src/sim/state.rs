//! Game state and world construction
//!
//! Everything the frame loop mutates lives here. Block layout is derived
//! from the run seed, so the same seed always yields the same floor.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::{InteractionEvent, MemoryBlock, MemoryDetails};
use super::player::Player;
use crate::camera::OrthoCamera;
use crate::colors::BLOCK_PALETTE;
use crate::consts::*;
use crate::settings::Settings;

/// Description every generated memory carries
pub const DEFAULT_DESCRIPTION: &str = "This is a memory of something interesting that happened.";

/// Something that happened during a tick, for the session layer to consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A memory block was walked into for the first time
    MemoryActivated(InteractionEvent),
}

/// World dimensions and counts a state is built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub map_size: f32,
    pub block_count: usize,
    pub camera_height: f32,
    pub player_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_size: MAP_SIZE,
            block_count: BLOCK_COUNT,
            camera_height: CAMERA_HEIGHT,
            player_speed: PLAYER_SPEED,
        }
    }
}

impl From<&Settings> for WorldConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            map_size: settings.map_size,
            block_count: settings.block_count,
            camera_height: settings.camera_height,
            player_speed: settings.player_speed,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: WorldConfig,
    pub player: Player,
    /// Memory blocks, identified by their index
    pub blocks: Vec<MemoryBlock>,
    pub camera: OrthoCamera,
    /// Seconds of simulated time
    pub elapsed: f64,
    /// Events produced since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state with the default world layout
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, WorldConfig::default())
    }

    pub fn with_config(seed: u64, config: WorldConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let blocks = (0..config.block_count)
            .map(|_| random_block(&mut rng, config.map_size))
            .collect();

        Self::from_parts(seed, config, blocks)
    }

    /// Create a state with a hand-placed set of blocks
    pub fn from_parts(seed: u64, config: WorldConfig, blocks: Vec<MemoryBlock>) -> Self {
        Self {
            seed,
            config,
            player: Player::new(config.player_speed),
            blocks,
            camera: OrthoCamera::new(config.camera_height, 1.0),
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events in the order they were produced
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn interacted_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.interacted()).count()
    }

    /// Index of the idle block closest to the player, if any remain
    pub fn nearest_idle_block(&self) -> Option<usize> {
        let player = self.player.position;
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.interacted())
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance_squared(player)
                    .partial_cmp(&b.position.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }
}

/// Place one block uniformly on the map, away from the player's spawn
fn random_block(rng: &mut Pcg32, map_size: f32) -> MemoryBlock {
    let color = BLOCK_PALETTE[rng.random_range(0..BLOCK_PALETTE.len())];
    let details = MemoryDetails {
        title: format!("Memory {}", rng.random_range(0..100)),
        description: DEFAULT_DESCRIPTION.to_string(),
    };

    let extent = (map_size / 2.0 - BLOCK_EDGE_MARGIN).max(SPAWN_EXCLUSION + 0.1);
    let position = loop {
        let x = rng.random_range(-extent..extent);
        let z = rng.random_range(-extent..extent);
        if x.abs() > SPAWN_EXCLUSION || z.abs() > SPAWN_EXCLUSION {
            break Vec3::new(x, BLOCK_HEIGHT, z);
        }
    };

    MemoryBlock::new(position, color, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.blocks.len(), BLOCK_COUNT);

        let extent = MAP_SIZE / 2.0 - BLOCK_EDGE_MARGIN;
        for block in &state.blocks {
            let p = block.position;
            assert_eq!(p.y, BLOCK_HEIGHT);
            assert!(p.x.abs() <= extent && p.z.abs() <= extent);
            assert!(p.x.abs() > SPAWN_EXCLUSION || p.z.abs() > SPAWN_EXCLUSION);
            assert!(BLOCK_PALETTE.contains(&block.base_color));
            assert!(block.details.title.starts_with("Memory "));
            assert_eq!(block.details.description, DEFAULT_DESCRIPTION);
            assert!(!block.interacted());
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(777);
        let b = GameState::new(777);
        let c = GameState::new(778);
        let positions = |s: &GameState| s.blocks.iter().map(|b| b.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn test_small_map_still_places() {
        let config = WorldConfig {
            map_size: 4.0,
            block_count: 10,
            ..Default::default()
        };
        let state = GameState::with_config(1, config);
        assert_eq!(state.blocks.len(), 10);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::from_parts(1, WorldConfig::default(), Vec::new());
        let event = InteractionEvent {
            title: "t".into(),
            description: "d".into(),
            position: Vec3::ZERO,
        };
        state.push_event(GameEvent::MemoryActivated(event.clone()));
        assert_eq!(state.drain_events(), vec![GameEvent::MemoryActivated(event)]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_nearest_idle_block() {
        let details = || MemoryDetails {
            title: "m".into(),
            description: "d".into(),
        };
        let blocks = vec![
            MemoryBlock::new(Vec3::new(10.0, 0.5, 0.0), 0xffadad, details()),
            MemoryBlock::new(Vec3::new(3.0, 0.5, 0.0), 0xffadad, details()),
        ];
        let mut state = GameState::from_parts(1, WorldConfig::default(), blocks);
        assert_eq!(state.nearest_idle_block(), Some(1));
        state.blocks[1].interact();
        assert_eq!(state.nearest_idle_block(), Some(0));
        assert_eq!(state.interacted_count(), 1);
    }
}
