//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt_ms` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BounceAxis, bounce_in_field, boxes_overlap, clamp_to_field};
pub use rect::Rect;
pub use state::{
    AudioCommand, Boat, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, RepairBoat,
    SEED_OBSTACLES, Spawners, Tint, Zone,
};
pub use tick::{TickInput, autopilot_input, spawn_repair_boat, spawn_shark, tick};
