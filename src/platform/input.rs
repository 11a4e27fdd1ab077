//! Keyboard and pointer input
//!
//! Arrow keys are held state; mute and click are one-shots that the frame
//! loop clears after the first simulation step sees them.

use crate::sim::TickInput;

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Music on/off
    Mute,
    /// Idle/demo mode on/off
    Autopilot,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "m" | "M" => Some(Key::Mute),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Accumulates device events into the next `TickInput`
#[derive(Debug, Clone, Default)]
pub struct InputState {
    input: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.input.up = true,
            Key::Down => self.input.down = true,
            Key::Left => self.input.left = true,
            Key::Right => self.input.right = true,
            Key::Mute => self.input.toggle_music = true,
            Key::Autopilot => {
                self.input.autopilot = !self.input.autopilot;
                log::info!("Autopilot: {}", self.input.autopilot);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.input.up = false,
            Key::Down => self.input.down = false,
            Key::Left => self.input.left = false,
            Key::Right => self.input.right = false,
            Key::Mute | Key::Autopilot => {}
        }
    }

    /// Pointer click anywhere
    pub fn click(&mut self) {
        self.input.restart = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    pub fn current(&self) -> &TickInput {
        &self.input
    }

    /// Clear one-shot inputs after processing
    pub fn clear_one_shots(&mut self) {
        self.input.toggle_music = false;
        self.input.restart = false;
    }
}
