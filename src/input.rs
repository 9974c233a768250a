//! Keyboard input to movement intent
//!
//! Platform code forwards key transitions here; the frame loop reads a
//! snapshot of the resulting intent. Arrow keys and WASD are aliases.

use glam::Vec2;

/// A tracked movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    W,
    ArrowUp,
    S,
    ArrowDown,
    A,
    ArrowLeft,
    D,
    ArrowRight,
}

impl MoveKey {
    const COUNT: usize = 8;

    /// Parse a browser `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MoveKey::W),
            "arrowup" => Some(MoveKey::ArrowUp),
            "s" => Some(MoveKey::S),
            "arrowdown" => Some(MoveKey::ArrowDown),
            "a" => Some(MoveKey::A),
            "arrowleft" => Some(MoveKey::ArrowLeft),
            "d" => Some(MoveKey::D),
            "arrowright" => Some(MoveKey::ArrowRight),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tracks pressed movement keys and the intent derived from them
///
/// The intent is a 2D vector on the floor plane: `x` is world X and `y` is
/// world Z. Components are in {-1, 0, 1} and are not normalized; diagonal
/// movement is normalized by the player when it is consumed.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pressed: [bool; MoveKey::COUNT],
    intent: Vec2,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns false for keys that are not tracked.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Record a key release. Returns false for keys that are not tracked.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, down: bool) -> bool {
        let Some(key) = MoveKey::from_key(key) else {
            return false;
        };
        self.pressed[key.index()] = down;
        self.recompute_intent();
        true
    }

    pub fn is_pressed(&self, key: MoveKey) -> bool {
        self.pressed[key.index()]
    }

    /// Release every key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute_intent(&mut self) {
        let held = |a: MoveKey, b: MoveKey| self.is_pressed(a) || self.is_pressed(b);

        let mut intent = Vec2::ZERO;
        if held(MoveKey::W, MoveKey::ArrowUp) {
            intent.y -= 1.0;
        }
        if held(MoveKey::S, MoveKey::ArrowDown) {
            intent.y += 1.0;
        }
        if held(MoveKey::A, MoveKey::ArrowLeft) {
            intent.x -= 1.0;
        }
        if held(MoveKey::D, MoveKey::ArrowRight) {
            intent.x += 1.0;
        }
        self.intent = intent;
    }

    /// Current movement intent (a copy; callers cannot alter the handler)
    pub fn intent(&self) -> Vec2 {
        self.intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEYS: [&str; 8] = [
        "w",
        "ArrowUp",
        "s",
        "ArrowDown",
        "a",
        "ArrowLeft",
        "d",
        "ArrowRight",
    ];

    #[test]
    fn test_forward_is_negative_z() {
        let mut input = InputHandler::new();
        assert!(input.key_down("w"));
        assert_eq!(input.intent(), Vec2::new(0.0, -1.0));
        input.key_up("w");
        assert_eq!(input.intent(), Vec2::ZERO);
    }

    #[test]
    fn test_aliases_and_case() {
        let mut input = InputHandler::new();
        input.key_down("ArrowRight");
        input.key_down("S");
        assert_eq!(input.intent(), Vec2::new(1.0, 1.0));
        assert!(input.is_pressed(MoveKey::S));
    }

    #[test]
    fn test_alias_release_keeps_direction() {
        let mut input = InputHandler::new();
        input.key_down("a");
        input.key_down("ArrowLeft");
        input.key_up("a");
        assert_eq!(input.intent(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputHandler::new();
        input.key_down("d");
        assert!(!input.key_down("Escape"));
        assert!(!input.key_up("q"));
        assert_eq!(input.intent(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut input = InputHandler::new();
        input.key_down("w");
        let mut snapshot = input.intent();
        snapshot.x = 42.0;
        assert_eq!(input.intent(), Vec2::new(0.0, -1.0));
    }

    proptest! {
        #[test]
        fn opposing_keys_cancel(presses in proptest::collection::vec((0usize..8, any::<bool>()), 0..32)) {
            let mut input = InputHandler::new();
            for (key, down) in presses {
                if down {
                    input.key_down(KEYS[key]);
                } else {
                    input.key_up(KEYS[key]);
                }
            }
            // Force both ends of the vertical axis down
            input.key_down("w");
            input.key_down("ArrowDown");
            prop_assert_eq!(input.intent().y, 0.0);
            prop_assert!(input.intent().x.abs() <= 1.0);

            // And both ends of the horizontal axis
            input.key_down("ArrowLeft");
            input.key_down("d");
            prop_assert_eq!(input.intent(), Vec2::ZERO);
        }
    }
}
