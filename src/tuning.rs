//! Data-driven game balance
//!
//! Every rule constant lives here so a run can be re-balanced from a JSON file
//! without touching the simulation. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play field width in pixels
    pub field_width: f32,
    /// Play field height in pixels
    pub field_height: f32,

    /// Boat speed (pixels per second)
    pub boat_speed: f32,
    pub max_hearts: u8,
    pub fruits_per_trip: u8,
    pub fruits_to_win: u32,

    /// Obstacle speeds (pixels per second)
    pub shark_speed: f32,
    pub tornado_speed: f32,
    pub wave_speed: f32,

    pub repair_boat_spawn_interval_ms: u64,
    pub repair_boat_duration_ms: u64,
    /// Keep repair boats this far from the field edges
    pub repair_boat_margin: f32,

    /// Invincibility window after a hit
    pub blink_duration_ms: u64,
    /// Boat ignores steering for this long after a hit
    pub stun_duration_ms: u64,
    /// Visibility flips every `blink_rate_ms` while blinking
    pub blink_rate_ms: u64,
    pub delivery_cooldown_ms: u64,

    /// Shark spawner re-arm delay range (inclusive)
    pub shark_spawn_min_ms: u64,
    pub shark_spawn_max_ms: u64,
    /// Lifetime range for spawned sharks; `None` keeps them forever
    pub shark_fade_ms: Option<(u64, u64)>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 1200.0,
            field_height: 900.0,

            boat_speed: 180.0,
            max_hearts: 5,
            fruits_per_trip: 3,
            fruits_to_win: 25,

            shark_speed: 120.0,
            tornado_speed: 240.0,
            wave_speed: 90.0,

            repair_boat_spawn_interval_ms: 15_000,
            repair_boat_duration_ms: 5_000,
            repair_boat_margin: 50.0,

            blink_duration_ms: 1_000,
            stun_duration_ms: 1_000,
            blink_rate_ms: 100,
            delivery_cooldown_ms: 500,

            shark_spawn_min_ms: 2_000,
            shark_spawn_max_ms: 5_000,
            shark_fade_ms: Some((10_000, 15_000)),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning JSON object
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Speed for an obstacle kind
    pub fn obstacle_speed(&self, kind: ObstacleKind) -> f32 {
        match kind {
            ObstacleKind::Shark => self.shark_speed,
            ObstacleKind::Tornado => self.tornado_speed,
            ObstacleKind::Wave => self.wave_speed,
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(format!(
                "field must have a positive size, got {}x{}",
                self.field_width, self.field_height
            ));
        }
        if self.repair_boat_margin * 2.0 >= self.field_width.min(self.field_height) {
            return Err(format!(
                "repair_boat_margin {} leaves no room to spawn",
                self.repair_boat_margin
            ));
        }
        if self.max_hearts == 0 {
            return Err("max_hearts must be at least 1".to_string());
        }
        if self.fruits_per_trip == 0 || self.fruits_to_win == 0 {
            return Err("fruits_per_trip and fruits_to_win must be at least 1".to_string());
        }
        if self.blink_rate_ms == 0 {
            return Err("blink_rate_ms must be at least 1".to_string());
        }
        if self.repair_boat_spawn_interval_ms == 0 {
            return Err("repair_boat_spawn_interval_ms must be at least 1".to_string());
        }
        if self.shark_spawn_min_ms == 0 || self.shark_spawn_min_ms > self.shark_spawn_max_ms {
            return Err(format!(
                "shark spawn range [{}, {}] is empty or zero",
                self.shark_spawn_min_ms, self.shark_spawn_max_ms
            ));
        }
        if let Some((lo, hi)) = self.shark_fade_ms {
            if lo == 0 || lo > hi {
                return Err(format!("shark fade range [{lo}, {hi}] is empty or zero"));
            }
        }
        let speeds = [
            self.boat_speed,
            self.shark_speed,
            self.tornado_speed,
            self.wave_speed,
        ];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err("speeds must be finite and non-negative".to_string());
        }
        Ok(())
    }
}
