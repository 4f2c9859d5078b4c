//! Keyboard state
//!
//! Hosts forward key down/up events; the game polls held keys once per tick.
//! Input is level-triggered: a held key reads as pressed on every tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    R,
}

impl Key {
    /// Parse a host key name ("space", " ", "r")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "space" | " " | "spacebar" => Some(Key::Space),
            "r" | "keyr" => Some(Key::R),
            _ => None,
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Drop everything (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Input for the next tick: Space jumps, R restarts
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            jump: self.is_pressed(Key::Space),
            restart: self.is_pressed(Key::R),
        }
    }
}
