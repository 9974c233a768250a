//! Game session
//!
//! Owns the simulation, the input handler and the memory dialog, and wires
//! them together once per frame. Platform code only forwards host events
//! (keys, resize, animation frames) into this type.

use crate::consts::MAX_FRAME_DT;
use crate::input::InputHandler;
use crate::modal::{Modal, ModalDetails};
use crate::scene::SceneSetup;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, WorldConfig, tick};

pub struct Game {
    pub state: GameState,
    pub input: InputHandler,
    pub modal: Modal,
    pub scene: SceneSetup,
    pub settings: Settings,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let config = WorldConfig::from(&settings);
        let state = GameState::with_config(seed, config);
        log::info!(
            "Placed {} memory blocks on a {}x{} floor (seed {})",
            state.blocks.len(),
            config.map_size,
            config.map_size,
            seed
        );

        Self {
            state,
            input: InputHandler::new(),
            modal: Modal::new(),
            scene: SceneSetup::new(config.map_size),
            settings,
            running: false,
        }
    }

    /// Build a session around an existing state (hand-made levels, tests)
    pub fn from_state(state: GameState) -> Self {
        let map_size = state.config.map_size;
        Self {
            state,
            input: InputHandler::new(),
            modal: Modal::new(),
            scene: SceneSetup::new(map_size),
            settings: Settings::default(),
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the frame loop; further `update` calls do nothing
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Key press from the host. The dialog sees it first (Escape).
    pub fn key_down(&mut self, key: &str) {
        if self.modal.handle_key(key) {
            return;
        }
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Host lost focus: key-up events will not arrive, so drop held keys
    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Viewport resized (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state.camera.resize(width, height) {
            log::debug!("Viewport resized to {}x{}", width, height);
        }
    }

    /// Run one frame. Returns the number of memories activated.
    pub fn update(&mut self, dt: f32) -> usize {
        if !self.running {
            return 0;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        let input = TickInput {
            intent: self.input.intent(),
        };
        tick(&mut self.state, &input, dt);

        let mut activated = 0;
        for event in self.state.drain_events() {
            match event {
                GameEvent::MemoryActivated(memory) => {
                    self.modal.show(&ModalDetails::from(&memory));
                    activated += 1;
                }
            }
        }

        self.modal.update(dt);
        activated
    }

    /// Put a triggered block back to idle so it can be replayed
    pub fn reset_block(&mut self, index: usize) -> bool {
        match self.state.blocks.get_mut(index) {
            Some(block) => {
                block.reset();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{MemoryBlock, MemoryDetails};
    use glam::Vec3;

    fn game_with_block(title: &str) -> Game {
        let block = MemoryBlock::new(
            Vec3::new(5.0, 0.5, 5.0),
            0xcaffbf,
            MemoryDetails {
                title: title.to_string(),
                description: "We got lost on the way".to_string(),
            },
        );
        let mut game =
            Game::from_state(GameState::from_parts(7, WorldConfig::default(), vec![block]));
        game.start();
        game
    }

    fn run(game: &mut Game, frames: usize) -> usize {
        (0..frames).map(|_| game.update(1.0 / 60.0)).sum()
    }

    #[test]
    fn test_memory_reaches_modal_once() {
        let mut game = game_with_block("Road trip");
        game.key_down("d");
        game.key_down("s");
        assert_eq!(run(&mut game, 80), 1);
        assert!(game.modal.is_visible());
        assert_eq!(game.modal.title(), "Road trip");
        assert_eq!(game.modal.description(), "We got lost on the way");

        // Stand on it: nothing new arrives
        game.key_up("d");
        game.key_up("s");
        assert_eq!(run(&mut game, 60), 0);
    }

    #[test]
    fn test_escape_closes_modal_not_movement() {
        let mut game = game_with_block("Road trip");
        game.key_down("ArrowRight");
        game.key_down("ArrowDown");
        run(&mut game, 80);
        assert!(game.modal.is_visible());

        game.key_down("Escape");
        assert!(!game.modal.is_visible());
        assert_eq!(game.input.intent(), glam::Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_stopped_game_does_not_advance() {
        let mut game = game_with_block("x");
        game.stop();
        game.key_down("d");
        assert_eq!(game.update(0.5), 0);
        assert_eq!(game.state.player.position.x, 0.0);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut game = game_with_block("x");
        game.key_down("a");
        game.update(5.0);
        let moved = -game.state.player.position.x;
        assert!((moved - game.state.player.speed * MAX_FRAME_DT).abs() < 1e-5);
        assert!((game.state.elapsed - MAX_FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_reset_block_allows_replay() {
        let mut game = game_with_block("Again");
        game.key_down("d");
        game.key_down("s");
        assert_eq!(run(&mut game, 80), 1);
        game.key_down("Escape");

        // Walk well clear, reset, walk back
        game.key_up("d");
        game.key_up("s");
        game.key_down("w");
        game.key_down("a");
        run(&mut game, 180);
        assert!(game.reset_block(0));
        assert!(!game.reset_block(5));
        game.key_up("w");
        game.key_up("a");
        game.key_down("s");
        game.key_down("d");
        assert_eq!(run(&mut game, 240), 1);
        assert!(game.modal.is_visible());
    }

    #[test]
    fn test_resize_updates_camera() {
        let mut game = game_with_block("x");
        game.resize(800.0, 600.0);
        assert!((game.state.camera.right - 10.0).abs() < 1e-4);
        game.resize(0.0, 0.0);
        assert!((game.state.camera.right - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_blur_releases_keys() {
        let mut game = game_with_block("x");
        game.key_down("w");
        game.blur();
        assert_eq!(game.input.intent(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_generated_session() {
        let mut game = Game::new(99, Settings::default());
        game.start();
        assert_eq!(game.state.blocks.len(), 50);
        assert_eq!(game.scene.floor.size, 40.0);
        game.key_down("w");
        run(&mut game, 600);
        assert!(game.state.player.position.z < -19.0);
    }
}
