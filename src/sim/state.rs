//! Game state and core simulation types
//!
//! All session state lives here: the boat, the stationary zones, moving
//! obstacles, the repair boat pickup and the spawner deadlines. Timers are
//! plain millisecond timestamps compared against `GameState::now_ms`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{BounceAxis, bounce_in_field, clamp_to_field};
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Enough fruit delivered
    Won,
    /// Out of hearts
    Lost,
}

impl GamePhase {
    /// Won and Lost only leave through a restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Color modulation applied to the boat sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tint {
    #[default]
    None,
    /// Recently hit (red while blinking or stunned)
    Hit,
    Won,
    Lost,
}

impl Tint {
    /// RGB color, `None` for an untinted sprite
    pub fn rgb(self) -> Option<u32> {
        match self {
            Tint::None => None,
            Tint::Hit | Tint::Lost => Some(0xff0000),
            Tint::Won => Some(0x00ff00),
        }
    }
}

/// Outcome of an obstacle hit that was not absorbed by invincibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub hearts_left: u8,
    pub fruit_lost: u8,
}

/// Which recovery windows closed during an expiry check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub blink: bool,
    pub stun: bool,
}

/// The player's boat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hitbox size (smaller than the sprite)
    pub size: Vec2,
    pub hearts: u8,
    pub fruits_carried: u8,
    pub fruits_delivered: u32,
    /// Invincibility window active
    pub is_blinking: bool,
    /// Steering ignored
    pub is_stunned: bool,
    /// Carried fruit came from the island (not left over from a previous trip)
    pub has_legitimate_fruit: bool,
    pub blink_started_at: u64,
    pub stun_started_at: u64,
    /// `None` until the first delivery
    pub last_delivery_at: Option<u64>,
    pub tint: Tint,
}

impl Boat {
    pub fn new(pos: Vec2, hearts: u8) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(BOAT_DISPLAY_W, BOAT_DISPLAY_H) * BOAT_HITBOX_SCALE,
            hearts,
            fruits_carried: 0,
            fruits_delivered: 0,
            is_blinking: false,
            is_stunned: false,
            has_legitimate_fruit: false,
            blink_started_at: 0,
            stun_started_at: 0,
            last_delivery_at: None,
            tint: Tint::None,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Blink visibility: on for `blink_rate_ms`, off for the next, and so on
    pub fn is_visible(&self, now: u64, blink_rate_ms: u64) -> bool {
        if !self.is_blinking {
            return true;
        }
        let elapsed = now.saturating_sub(self.blink_started_at);
        (elapsed / blink_rate_ms.max(1)) % 2 == 0
    }

    /// Close the blink and stun windows whose time is up
    ///
    /// The hit tint stays until both windows are closed.
    pub fn expire_effects(&mut self, now: u64, blink_ms: u64, stun_ms: u64) -> Expired {
        let mut expired = Expired::default();
        if self.is_blinking && now.saturating_sub(self.blink_started_at) >= blink_ms {
            self.is_blinking = false;
            expired.blink = true;
        }
        if self.is_stunned && now.saturating_sub(self.stun_started_at) >= stun_ms {
            self.is_stunned = false;
            expired.stun = true;
        }
        if !self.is_blinking && !self.is_stunned && self.tint == Tint::Hit {
            self.tint = Tint::None;
        }
        expired
    }

    /// Load a full trip of fruit, only when the hold is empty
    pub fn collect_fruit(&mut self, per_trip: u8) -> Option<u8> {
        if self.fruits_carried != 0 {
            return None;
        }
        self.fruits_carried = per_trip;
        self.has_legitimate_fruit = true;
        Some(per_trip)
    }

    /// Unload carried fruit at the port; returns the amount delivered
    pub fn try_deliver(&mut self, now: u64, cooldown_ms: u64) -> Option<u8> {
        if let Some(last) = self.last_delivery_at {
            if now.saturating_sub(last) < cooldown_ms {
                return None;
            }
        }
        if self.fruits_carried == 0 || !self.has_legitimate_fruit {
            return None;
        }
        let amount = self.fruits_carried;
        self.fruits_delivered += u32::from(amount);
        self.fruits_carried = 0;
        self.has_legitimate_fruit = false;
        self.last_delivery_at = Some(now);
        Some(amount)
    }

    /// Apply an obstacle hit; `None` while invincible
    ///
    /// A new hit restarts both recovery windows.
    pub fn take_hit(&mut self, now: u64, rng: &mut impl Rng) -> Option<Hit> {
        if self.is_blinking {
            return None;
        }
        self.hearts = self.hearts.saturating_sub(1);

        let mut fruit_lost = 0;
        if self.fruits_carried > 0 {
            fruit_lost = rng.random_range(1..=self.fruits_carried.min(3));
            self.fruits_carried -= fruit_lost;
            if self.fruits_carried == 0 {
                self.has_legitimate_fruit = false;
            }
        }

        self.is_blinking = true;
        self.is_stunned = true;
        self.blink_started_at = now;
        self.stun_started_at = now;
        self.tint = Tint::Hit;

        Some(Hit {
            hearts_left: self.hearts,
            fruit_lost,
        })
    }

    /// Restore one heart up to the cap; returns whether a heart was added
    pub fn repair(&mut self, max_hearts: u8) -> bool {
        if self.hearts < max_hearts {
            self.hearts += 1;
            true
        } else {
            false
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Shark,
    Tornado,
    Wave,
}

impl ObstacleKind {
    pub fn name(self) -> &'static str {
        match self {
            ObstacleKind::Shark => "shark",
            ObstacleKind::Tornado => "tornado",
            ObstacleKind::Wave => "wave",
        }
    }

    /// Sprite size
    pub fn display_size(self) -> Vec2 {
        match self {
            ObstacleKind::Shark => Vec2::new(SHARK_DISPLAY_W, SHARK_DISPLAY_H),
            ObstacleKind::Tornado | ObstacleKind::Wave => Vec2::splat(HAZARD_SIZE),
        }
    }

    /// Collision box size
    pub fn hitbox_size(self) -> Vec2 {
        match self {
            ObstacleKind::Shark => self.display_size() * SHARK_HITBOX_SCALE,
            ObstacleKind::Tornado | ObstacleKind::Wave => self.display_size(),
        }
    }

    /// Sharks patrol across the field, the rest oscillate up and down
    pub fn bounce_axis(self) -> BounceAxis {
        match self {
            ObstacleKind::Shark => BounceAxis::Horizontal,
            ObstacleKind::Tornado | ObstacleKind::Wave => BounceAxis::Vertical,
        }
    }
}

/// A moving hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    pub spawned_at: u64,
    /// Fading sharks disappear after this many milliseconds
    pub lifetime_ms: Option<u64>,
}

impl Obstacle {
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, self.kind.hitbox_size())
    }

    /// Integrate one step and bounce off the field edges
    pub fn advance(&mut self, dt_secs: f32, field: &Rect) {
        self.pos += self.vel * dt_secs;
        bounce_in_field(
            &mut self.pos,
            &mut self.vel,
            self.kind.hitbox_size(),
            field,
            self.kind.bounce_axis(),
        );
    }

    /// Render opacity, fading linearly over the lifetime
    pub fn alpha(&self, now: u64) -> f32 {
        match self.lifetime_ms {
            Some(lifetime) if lifetime > 0 => {
                let age = now.saturating_sub(self.spawned_at) as f32;
                (1.0 - age / lifetime as f32).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.lifetime_ms
            .is_some_and(|lifetime| now.saturating_sub(self.spawned_at) >= lifetime)
    }
}

/// The temporary heart pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairBoat {
    pub id: u32,
    /// Centre position
    pub pos: Vec2,
    pub spawned_at: u64,
    pub expires_at: u64,
}

impl RepairBoat {
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(REPAIR_BOAT_SIZE))
    }

    pub fn is_active(&self, now: u64) -> bool {
        now < self.expires_at
    }
}

/// A fixed rectangular area (port or fruit island)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Centre position
    pub pos: Vec2,
    pub size: Vec2,
}

impl Zone {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// Periodic spawner deadlines; `None` once cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawners {
    pub next_repair_at: Option<u64>,
    pub next_shark_at: Option<u64>,
}

/// Commands for the background music collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCommand {
    /// Session began: play unless already playing
    StartMusic,
    /// Mute key: pause if playing, otherwise resume
    ToggleMusic,
    /// Session ended
    PauseMusic,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FruitCollected { amount: u8 },
    FruitDelivered { amount: u8, total: u32 },
    BoatHit { kind: ObstacleKind, hearts_left: u8, fruit_lost: u8 },
    BlinkEnded,
    StunEnded,
    RepairBoatSpawned { id: u32, pos: Vec2 },
    RepairBoatCollected { id: u32, heart_restored: bool },
    RepairBoatExpired { id: u32 },
    SharkSpawned { id: u32, from_left: bool },
    SharkFaded { id: u32 },
    Won { delivered: u32 },
    Lost { delivered: u32 },
    Restarted,
    Audio(AudioCommand),
}

/// Fixed starting obstacles
pub const SEED_OBSTACLES: [(ObstacleKind, f32, f32); 6] = [
    (ObstacleKind::Shark, 300.0, 300.0),
    (ObstacleKind::Tornado, 500.0, 200.0),
    (ObstacleKind::Wave, 400.0, 400.0),
    (ObstacleKind::Shark, 200.0, 150.0),
    (ObstacleKind::Wave, 600.0, 250.0),
    (ObstacleKind::Tornado, 350.0, 450.0),
];

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Session clock (milliseconds since the session began)
    pub now_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// `StartMusic` has been emitted for this session
    pub music_started: bool,
    pub boat: Boat,
    pub port: Zone,
    pub island: Zone,
    /// Active obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    pub repair_boat: Option<RepairBoat>,
    pub spawners: Spawners,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let w = tuning.field_width;
        let h = tuning.field_height;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            music_started: false,
            boat: Boat::new(Vec2::new(BOAT_START_X, h / 2.0), tuning.max_hearts),
            port: Zone {
                pos: Vec2::new(PORT_X, h / 2.0),
                size: Vec2::splat(PORT_SIZE),
            },
            island: Zone {
                pos: Vec2::new(w - ISLAND_SIZE / 2.0, h / 2.0),
                size: Vec2::splat(ISLAND_SIZE),
            },
            obstacles: Vec::new(),
            repair_boat: None,
            spawners: Spawners::default(),
            next_id: 1,
            tuning,
        };

        state.boat.pos = clamp_to_field(state.boat.pos, state.boat.size, &state.field());
        state.spawn_seed_obstacles();

        let first_shark = state.shark_spawn_delay();
        state.spawners = Spawners {
            next_repair_at: Some(state.tuning.repair_boat_spawn_interval_ms),
            next_shark_at: Some(first_shark),
        };

        state
    }

    /// The play field rectangle
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.field_width, self.tuning.field_height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Throw everything away and start over with the same seed and tuning
    ///
    /// Every deadline is rebuilt from scratch, so restarting twice yields the
    /// same state both times.
    pub fn restart(&mut self) {
        *self = Self::with_tuning(self.seed, self.tuning.clone());
    }

    /// Random delay before the next shark
    pub fn shark_spawn_delay(&mut self) -> u64 {
        let lo = self.tuning.shark_spawn_min_ms;
        let hi = self.tuning.shark_spawn_max_ms.max(lo);
        self.rng.random_range(lo..=hi)
    }

    fn spawn_seed_obstacles(&mut self) {
        let field = self.field();
        let h = self.tuning.field_height;
        for (kind, x, y) in SEED_OBSTACLES {
            let speed = self.tuning.obstacle_speed(kind);
            let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let (pos, vel) = match kind.bounce_axis() {
                BounceAxis::Horizontal => (Vec2::new(x, y), Vec2::new(speed * sign, 0.0)),
                BounceAxis::Vertical => {
                    let y = y.clamp(HAZARD_EDGE_INSET, (h - HAZARD_EDGE_INSET).max(HAZARD_EDGE_INSET));
                    (Vec2::new(x, y), Vec2::new(0.0, speed * sign))
                }
            };
            let id = self.next_entity_id();
            self.obstacles.push(Obstacle {
                id,
                kind,
                pos: clamp_to_field(pos, kind.hitbox_size(), &field),
                vel,
                spawned_at: self.now_ms,
                lifetime_ms: None,
            });
        }
    }

    /// Freeze the session in a terminal phase
    ///
    /// Stops the boat, cancels the spawners and recovery windows, and clears
    /// the pickup and every shark.
    pub fn end_session(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.spawners = Spawners::default();
        self.repair_boat = None;
        self.obstacles.retain(|o| o.kind != ObstacleKind::Shark);

        let boat = &mut self.boat;
        boat.vel = Vec2::ZERO;
        boat.is_blinking = false;
        boat.is_stunned = false;
        boat.tint = if phase == GamePhase::Won {
            Tint::Won
        } else {
            Tint::Lost
        };
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}
