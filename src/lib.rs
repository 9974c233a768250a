//! Memory Walk - wander a floor of memory blocks and relive them
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, memory blocks, collisions)
//! - `input`: Keyboard state to movement intent
//! - `camera`: Orthographic follow camera
//! - `modal`: Memory dialog state and its fade animation
//! - `game`: Session orchestration (frame loop, event forwarding)
//! - `scene`: Static scene description (lights, floor, background)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted preferences and tunables

pub mod camera;
pub mod game;
pub mod input;
pub mod modal;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use camera::OrthoCamera;
pub use game::Game;
pub use input::InputHandler;
pub use modal::{Modal, ModalDetails};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side length of the square play area, centered at the origin
    pub const MAP_SIZE: f32 = 40.0;
    /// Number of memory blocks scattered at startup
    pub const BLOCK_COUNT: usize = 50;
    /// Orthographic frustum height; also drives the camera offset
    pub const CAMERA_HEIGHT: f32 = 15.0;

    /// Player movement speed (units per second)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player capsule radius (also the bounds clamp margin)
    pub const PLAYER_RADIUS: f32 = 0.4;
    /// Length of the capsule's cylindrical section
    pub const PLAYER_CAPSULE_LENGTH: f32 = 0.2;
    /// Height of the player's center above the floor
    pub const PLAYER_HEIGHT: f32 = PLAYER_RADIUS + 0.1;

    /// Block cube edge length
    pub const BLOCK_SIZE: f32 = 1.0;
    /// Height of a block's center above the floor
    pub const BLOCK_HEIGHT: f32 = 0.5;
    /// Radius of a block's interaction disc
    pub const INTERACTION_RADIUS: f32 = 1.5;
    /// Blocks may not be placed with both |x| and |z| inside this
    pub const SPAWN_EXCLUSION: f32 = 1.5;
    /// Blocks keep this distance from the map edge
    pub const BLOCK_EDGE_MARGIN: f32 = 1.0;

    /// Upper bound on a single frame's elapsed time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Hex colors shared by the simulation and the renderer
pub mod colors {
    /// Pastel palette memory blocks are painted from
    pub const BLOCK_PALETTE: [u32; 8] = [
        0xffadad, 0xffd6a5, 0xfdffb6, 0xcaffbf, 0x9bf6ff, 0xa0c4ff, 0xbdb2ff, 0xffc6ff,
    ];
    /// Grey a block turns once its memory has been seen
    pub const INTERACTED: u32 = 0x888888;
    pub const PLAYER: u32 = 0x00ff00;
    pub const BACKGROUND: u32 = 0x222233;
    pub const FLOOR: u32 = 0x444455;
    pub const WHITE: u32 = 0xffffff;
    pub const BLACK: u32 = 0x000000;
}

/// Convert a 0xRRGGBB color to normalized RGB
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Convert a 0xRRGGBB color plus alpha to normalized RGBA
#[inline]
pub fn hex_to_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_rgb(hex);
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        let grey = hex_to_rgb(colors::INTERACTED);
        assert!((grey[0] - 0x88 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(grey[0], grey[2]);
    }

    #[test]
    fn test_hex_to_rgba_alpha() {
        assert_eq!(hex_to_rgba(colors::BLACK, 0.5), [0.0, 0.0, 0.0, 0.5]);
    }
}
