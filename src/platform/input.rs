//! Keyboard and pointer mapping
//!
//! Tracks held keys by name (as browsers report `KeyboardEvent.key`) and folds
//! them into a [`TickInput`]. Pointer positions arrive already converted to
//! world coordinates.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Fire,
}

impl Action {
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            "ArrowUp" | "w" | "W" => Some(Action::Jump),
            "j" | "J" | "z" | "Z" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Held keys, last pointer position and the pending tick input
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
    /// Last known pointer position (world space)
    pointer: Option<Vec2>,
    /// Input for the next tick; the scheduler clears `fire_at` once used
    pub current: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. Fire keys throw toward the pointer, or straight ahead
    /// of `player_pos` when the pointer hasn't been seen yet.
    pub fn key_down(&mut self, key: &str, player_pos: Vec2) {
        match Action::for_key(key) {
            Some(Action::Fire) => {
                let target = self.pointer.unwrap_or(player_pos + Vec2::X);
                self.current.fire_at = Some(target);
            }
            Some(_) => {
                self.held.insert(key.to_string());
                self.refresh();
            }
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if self.held.remove(key) {
            self.refresh();
        }
    }

    pub fn pointer_move(&mut self, world: Vec2) {
        self.pointer = Some(world);
    }

    /// Click/tap: throw at the pointer
    pub fn click(&mut self, world: Vec2) {
        self.pointer = Some(world);
        self.current.fire_at = Some(world);
    }

    /// Forget held keys (focus lost, restart)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.current = TickInput::default();
    }

    fn is_held(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|k| Action::for_key(k) == Some(action))
    }

    fn refresh(&mut self) {
        self.current.left = self.is_held(Action::Left);
        self.current.right = self.is_held(Action::Right);
        self.current.jump = self.is_held(Action::Jump);
    }
}
