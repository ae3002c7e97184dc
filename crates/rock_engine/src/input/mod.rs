//! Input snapshot and event queue
//!
//! The window layer writes key levels into [`InputState`] and pushes discrete
//! presses onto its queue; gameplay reads levels for held controls and drains
//! the queue for edge-triggered ones.

use std::collections::{HashMap, VecDeque};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// P key
    P,
    /// Q key
    Q,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = match name.to_ascii_lowercase().as_str() {
            "a" => Self::A,
            "d" => Self::D,
            "s" => Self::S,
            "w" => Self::W,
            "p" => Self::P,
            "q" => Self::Q,
            "space" => Self::Space,
            "enter" | "return" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => return Err(format!("unknown key name '{name}'")),
        };
        Ok(key)
    }
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key went down this frame
    KeyPressed(KeyCode),
    /// Key went up this frame
    KeyReleased(KeyCode),
}

/// Per-tick input snapshot
#[derive(Debug, Clone, Default)]
pub struct InputState {
    levels: HashMap<KeyCode, f32>,
    events: VecDeque<InputEvent>,
}

impl InputState {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the analog level of a key (0.0 = released)
    pub fn set(&mut self, key: KeyCode, level: f32) {
        self.levels.insert(key, level);
    }

    /// Convenience for digital keys
    pub fn set_pressed(&mut self, key: KeyCode, pressed: bool) {
        self.set(key, if pressed { 1.0 } else { 0.0 });
    }

    /// Raw level of a key
    pub fn level(&self, key: KeyCode) -> f32 {
        self.levels.get(&key).copied().unwrap_or(0.0)
    }

    /// Whether a key is currently held
    pub fn is_active(&self, key: KeyCode) -> bool {
        self.level(key) > 0.0
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.levels.clear();
    }

    /// Queue a discrete event
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event in arrival order
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }
}
