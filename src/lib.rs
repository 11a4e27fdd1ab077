//! Fruit Boat - a top-down fruit delivery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, overlaps, timers, session state)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Backend-agnostic draw list and HUD text
//! - `audio`: Background music state driven by simulation commands
//! - `platform`: Clock, held-key input and the fixed timestep frame loop
//! - `settings`: Player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (100 Hz)
    pub const SIM_DT_MS: u64 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Port (delivery zone), display size and centre x
    pub const PORT_SIZE: f32 = 150.0;
    pub const PORT_X: f32 = 105.0;

    /// Fruit island, display size (centred `ISLAND_SIZE / 2` from the right edge)
    pub const ISLAND_SIZE: f32 = 150.0;

    /// Boat sprite size and the fraction of it that collides
    pub const BOAT_DISPLAY_W: f32 = 140.0;
    pub const BOAT_DISPLAY_H: f32 = 70.0;
    pub const BOAT_HITBOX_SCALE: f32 = 0.8;
    pub const BOAT_START_X: f32 = 75.0;

    /// Shark sprite size and hitbox fraction
    pub const SHARK_DISPLAY_W: f32 = 120.0;
    pub const SHARK_DISPLAY_H: f32 = 60.0;
    pub const SHARK_HITBOX_SCALE: f32 = 0.85;

    /// Tornadoes and waves are plain squares
    pub const HAZARD_SIZE: f32 = 30.0;
    /// Tornado/wave spawn y is kept this far from the top and bottom edges
    pub const HAZARD_EDGE_INSET: f32 = 30.0;

    /// Repair boat pickup size
    pub const REPAIR_BOAT_SIZE: f32 = 40.0;
}

/// Seconds from a millisecond step, for velocity integration
#[inline]
pub fn ms_to_secs(ms: u64) -> f32 {
    ms as f32 / 1000.0
}

/// Unit direction from a pair of opposing axis inputs (screen space, +y down)
///
/// Opposite presses cancel. Diagonals are normalized so they are no faster
/// than axial movement.
#[inline]
pub fn axis_direction(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let x = (right as i8 - left as i8) as f32;
    let y = (down as i8 - up as i8) as f32;
    Vec2::new(x, y).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_direction_cancels_opposites() {
        assert_eq!(axis_direction(true, true, false, false), Vec2::ZERO);
        assert_eq!(axis_direction(false, false, true, true), Vec2::ZERO);
        assert_eq!(axis_direction(true, true, true, false), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_axis_direction_diagonal_is_unit() {
        let dir = axis_direction(false, true, false, true);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn test_ms_to_secs() {
        assert!((ms_to_secs(250) - 0.25).abs() < f32::EPSILON);
    }
}
