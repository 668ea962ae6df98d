//! Level-triggered keyboard state and the per-tick movement intent.
//!
//! Key events arrive asynchronously from the host and only toggle membership
//! in the pressed-set. The render loop samples the set once per tick through
//! [`InputState::intent`], so a key that is held across many ticks keeps
//! producing motion without any repeat events.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Map a symbolic key name as reported by the host (`"a"`, `"ArrowLeft"`, ...).
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            _ => None,
        }
    }
}

pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    /// Returns false for names that do not map to a movement key.
    pub fn key_down(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.held.insert(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => self.held.remove(&key),
            None => false,
        }
    }

    /// Drop every held key, e.g. when the window loses focus and key-up
    /// events will never arrive.
    pub fn blur(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Desired velocity in world units per second. Opposing keys cancel.
    pub fn intent(&self, speed: f32) -> Vec2 {
        let mut dx: f32 = 0.0;
        let mut dy: f32 = 0.0;
        if self.is_held(Key::Left) || self.is_held(Key::A) {
            dx -= speed;
        }
        if self.is_held(Key::Right) || self.is_held(Key::D) {
            dx += speed;
        }
        if self.is_held(Key::Up) || self.is_held(Key::W) {
            dy -= speed;
        }
        if self.is_held(Key::Down) || self.is_held(Key::S) {
            dy += speed;
        }
        Vec2::new(dx, dy)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held() {
        let mut input = InputState::new();
        assert!(input.key_down("a"));
        assert!(input.is_held(Key::A));
    }

    #[test]
    fn unknown_key_names_are_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Shift"));
        assert!(!input.key_up("Enter"));
        assert_eq!(input.intent(200.0), Vec2::ZERO);
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        assert!(!input.key_up("d"));
        assert!(!input.is_held(Key::D));
    }

    #[test]
    fn held_key_persists_until_released() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        for _ in 0..5 {
            assert_eq!(input.intent(10.0), Vec2::new(10.0, 0.0));
        }
        input.key_up("ArrowRight");
        assert_eq!(input.intent(10.0), Vec2::ZERO);
    }

    #[test]
    fn letter_and_arrow_aliases_do_not_stack() {
        let mut input = InputState::new();
        input.key_down("a");
        input.key_down("ArrowLeft");
        assert_eq!(input.intent(200.0), Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("s");
        input.key_down("d");
        assert_eq!(input.intent(5.0), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn diagonal_intent_uses_both_axes() {
        let mut input = InputState::new();
        input.key_down("W");
        input.key_down("A");
        assert_eq!(input.intent(200.0), Vec2::new(-200.0, -200.0));
    }

    #[test]
    fn blur_releases_everything() {
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("ArrowDown");
        input.blur();
        assert!(!input.is_held(Key::W));
        assert!(!input.is_held(Key::Down));
    }
}
