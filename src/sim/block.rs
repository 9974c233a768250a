//! Memory blocks
//!
//! A block sits on the floor waiting to be walked into. While idle it shows
//! a pulsing disc when the player is near; the first contact turns it grey
//! and releases its memory as an [`InteractionEvent`]. Nothing turns it back
//! except an explicit [`MemoryBlock::reset`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::colors;
use crate::consts::*;

/// Offset of the indicator disc above the block's center
const INDICATOR_LIFT: f32 = 0.01;

/// Interaction state of a block (one-way unless reset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockPhase {
    /// Waiting for the player
    Idle,
    /// Memory has been shown
    Triggered,
}

/// Text a block reveals when triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDetails {
    pub title: String,
    pub description: String,
}

/// Emitted exactly once when a block is first triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub title: String,
    pub description: String,
    pub position: Vec3,
}

/// Triangle-wave scale/opacity oscillation of the proximity indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub scale: f32,
    /// +1 while growing, -1 while shrinking
    pub direction: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    /// Scale units per second
    pub speed: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            scale: 0.7,
            direction: 1.0,
            min_scale: 0.7,
            max_scale: 1.0,
            min_opacity: 0.2,
            max_opacity: 0.5,
            speed: 1.0,
        }
    }
}

impl Pulse {
    /// Move the scale toward the current bound, bouncing off it
    pub fn advance(&mut self, dt: f32) {
        self.scale += dt * self.speed * self.direction;

        if self.scale >= self.max_scale {
            self.direction = -1.0;
            self.scale = self.max_scale;
        } else if self.scale <= self.min_scale {
            self.direction = 1.0;
            self.scale = self.min_scale;
        }
    }

    /// Opacity mapped linearly from the scale's position in its range
    pub fn opacity(&self) -> f32 {
        let scale_range = self.max_scale - self.min_scale;
        let ratio = if scale_range > 0.0 {
            (self.scale - self.min_scale) / scale_range
        } else {
            0.0
        };
        self.min_opacity + ratio * (self.max_opacity - self.min_opacity)
    }
}

/// Brief scale-up applied when a block is triggered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pop {
    pub remaining: f32,
}

impl Pop {
    pub const DURATION: f32 = 0.1;
    pub const SCALE: f32 = 1.2;
}

/// Surface appearance of the block cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
}

impl Material {
    fn plain(color: u32) -> Self {
        Self {
            color,
            emissive: colors::BLACK,
            emissive_intensity: 0.0,
        }
    }
}

/// A memory block entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub position: Vec3,
    /// Color the block was created with
    pub base_color: u32,
    pub material: Material,
    pub phase: BlockPhase,
    pub indicator_visible: bool,
    pub interaction_radius: f32,
    pub pulse: Pulse,
    pub pop: Option<Pop>,
    pub details: MemoryDetails,
}

impl MemoryBlock {
    pub fn new(position: Vec3, color: u32, details: MemoryDetails) -> Self {
        Self {
            position,
            base_color: color,
            material: Material::plain(color),
            phase: BlockPhase::Idle,
            indicator_visible: false,
            interaction_radius: INTERACTION_RADIUS,
            pulse: Pulse::default(),
            pop: None,
            details,
        }
    }

    pub fn interacted(&self) -> bool {
        self.phase == BlockPhase::Triggered
    }

    /// Per-frame update: proximity indicator, pulse, pop timer
    pub fn update(&mut self, dt: f32, player_position: Vec3) {
        self.advance_pop(dt);

        match self.phase {
            BlockPhase::Idle => {
                let distance = self.position.distance(player_position);
                self.indicator_visible = distance <= self.interaction_radius * 2.0;
                self.pulse.advance(dt);
            }
            BlockPhase::Triggered => {
                self.indicator_visible = false;
            }
        }
    }

    fn advance_pop(&mut self, dt: f32) {
        if let Some(pop) = &mut self.pop {
            pop.remaining -= dt;
            if pop.remaining <= 0.0 {
                self.pop = None;
            }
        }
    }

    /// Trigger the block. Returns the event only on the first call.
    pub fn interact(&mut self) -> Option<InteractionEvent> {
        if self.interacted() {
            return None;
        }

        self.phase = BlockPhase::Triggered;
        self.material = Material {
            color: colors::INTERACTED,
            emissive: colors::INTERACTED,
            emissive_intensity: 0.3,
        };
        self.pop = Some(Pop {
            remaining: Pop::DURATION,
        });
        self.indicator_visible = false;

        Some(InteractionEvent {
            title: self.details.title.clone(),
            description: self.details.description.clone(),
            position: self.position,
        })
    }

    /// Return to idle with the original appearance
    pub fn reset(&mut self) {
        self.phase = BlockPhase::Idle;
        self.material = Material::plain(self.base_color);
        self.pop = None;
        self.indicator_visible = true;
    }

    /// Current uniform scale of the cube (1.0 outside of a pop)
    pub fn scale(&self) -> f32 {
        if self.pop.is_some() { Pop::SCALE } else { 1.0 }
    }

    /// World-space radius of the indicator disc at the current pulse
    pub fn indicator_radius(&self) -> f32 {
        self.interaction_radius * self.pulse.scale * self.scale()
    }

    /// Height of the indicator disc: a hair above the cube's center, where
    /// it rides along with the pop scale
    pub fn indicator_height(&self) -> f32 {
        self.position.y + INDICATOR_LIFT * self.scale()
    }

    /// Box around the cube and its indicator disc
    ///
    /// The disc lies inside the cube's height range, so it widens the box
    /// in X and Z only.
    pub fn bounds(&self) -> Aabb {
        let half = BLOCK_SIZE / 2.0 * self.scale();
        let cube = Aabb::from_center(self.position, Vec3::splat(half));

        let r = self.indicator_radius();
        let disc_y = self.indicator_height();
        let disc = Aabb::new(
            Vec3::new(self.position.x - r, disc_y, self.position.z - r),
            Vec3::new(self.position.x + r, disc_y, self.position.z + r),
        );
        cube.union(&disc)
    }
}
