//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (blocks by index)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod block;
pub mod player;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use block::{BlockPhase, InteractionEvent, Material, MemoryBlock, MemoryDetails, Pop, Pulse};
pub use player::Player;
pub use state::{DEFAULT_DESCRIPTION, GameEvent, GameState, WorldConfig};
pub use tick::{TickInput, check_collisions, tick};
