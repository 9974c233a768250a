//! Per-frame simulation step
//!
//! Runs in a fixed order: read intent, move the player, resolve contacts
//! with idle blocks, move the camera, then update every block.

use glam::Vec2;

use super::state::{GameEvent, GameState};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent on the floor plane (`y` is world Z)
    pub intent: Vec2,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    let map_size = state.config.map_size;
    state.player.update(dt, input.intent, map_size);

    check_collisions(state);

    state.camera.follow(state.player.position);

    let player_pos = state.player.position;
    for block in &mut state.blocks {
        block.update(dt, player_pos);
    }

    state.elapsed += dt as f64;
}

/// Trigger every idle block whose box overlaps the player's
///
/// Returns how many blocks were triggered this call.
pub fn check_collisions(state: &mut GameState) -> usize {
    let player_box = state.player.bounds();
    let mut triggered = 0;

    for i in 0..state.blocks.len() {
        let block = &mut state.blocks[i];
        if block.interacted() || !player_box.intersects(&block.bounds()) {
            continue;
        }
        if let Some(event) = block.interact() {
            log::info!("Memory activated: {}", event.title);
            state.push_event(GameEvent::MemoryActivated(event));
            triggered += 1;
        }
    }

    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::block::{MemoryBlock, MemoryDetails};
    use crate::sim::state::WorldConfig;
    use glam::Vec3;

    fn single_block_state() -> GameState {
        let block = MemoryBlock::new(
            Vec3::new(5.0, 0.5, 5.0),
            0xa0c4ff,
            MemoryDetails {
                title: "First bike".to_string(),
                description: "Training wheels came off".to_string(),
            },
        );
        GameState::from_parts(1, WorldConfig::default(), vec![block])
    }

    fn walk(state: &mut GameState, intent: Vec2, frames: usize) -> Vec<GameEvent> {
        let input = TickInput { intent };
        let mut events = Vec::new();
        for _ in 0..frames {
            tick(state, &input, 1.0 / 60.0);
            events.extend(state.drain_events());
        }
        events
    }

    #[test]
    fn test_walk_into_block_fires_once() {
        let mut state = single_block_state();
        assert_eq!(state.player.position, Vec3::new(0.0, PLAYER_HEIGHT, 0.0));

        // Diagonal toward (5, 5) for ~1.3s covers the distance to the box
        let events = walk(&mut state, Vec2::new(1.0, 1.0), 80);
        assert_eq!(events.len(), 1);
        let GameEvent::MemoryActivated(event) = &events[0];
        assert_eq!(event.title, "First bike");
        assert_eq!(event.description, "Training wheels came off");
        assert_eq!(event.position, Vec3::new(5.0, 0.5, 5.0));
        assert!(state.blocks[0].interacted());

        // Still overlapping on later frames: no re-fire
        assert!(state.player.bounds().intersects(&state.blocks[0].bounds()));
        let more = walk(&mut state, Vec2::ZERO, 30);
        assert!(more.is_empty());
    }

    #[test]
    fn test_no_trigger_from_distance() {
        let mut state = single_block_state();
        let events = walk(&mut state, Vec2::ZERO, 60);
        assert!(events.is_empty());
        assert!(!state.blocks[0].interacted());
        assert!(!state.blocks[0].indicator_visible);
    }

    #[test]
    fn test_indicator_shows_when_near() {
        let mut state = single_block_state();
        state.player.position = Vec3::new(2.5, PLAYER_HEIGHT, 5.0);
        tick(&mut state, &TickInput::default(), 0.016);
        assert!(!state.blocks[0].interacted());
        assert!(state.blocks[0].indicator_visible);
    }

    #[test]
    fn test_camera_tracks_player() {
        let mut state = single_block_state();
        walk(&mut state, Vec2::new(-1.0, 0.0), 30);
        let offset = state.camera.follow_offset();
        assert!((state.camera.position.x - (state.player.position.x + offset)).abs() < 1e-4);
        assert_eq!(state.camera.target, state.player.position);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut state = single_block_state();
        let before = state.player.position;
        tick(&mut state, &TickInput { intent: Vec2::X }, -1.0);
        assert_eq!(state.player.position, before);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_generated_world_runs() {
        let mut state = GameState::new(42);
        let events = walk(&mut state, Vec2::new(1.0, 0.0), 600);
        assert_eq!(events.len(), state.interacted_count());
        let limit = MAP_SIZE / 2.0 - PLAYER_RADIUS;
        assert!((state.player.position.x - limit).abs() < 1e-4);
    }
}
