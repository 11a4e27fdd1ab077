//! Simulation tick
//!
//! Core game loop step: timers, spawners, movement, then overlap resolution.

use glam::Vec2;
use rand::Rng;

use super::collision::clamp_to_field;
use super::state::{
    AudioCommand, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, RepairBoat,
};
use crate::{axis_direction, ms_to_secs};

/// Autopilot treats obstacles within this many pixels of the hull as threats
const AUTOPILOT_DANGER: f32 = 60.0;
/// Autopilot stops pressing a key this close to the target
const AUTOPILOT_DEAD_ZONE: f32 = 4.0;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Arrow keys currently held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Mute key pressed (one-shot)
    pub toggle_music: bool,
    /// Pointer click (one-shot); only restarts a finished session
    pub restart: bool,
    /// Idle/demo mode - the boat steers itself
    pub autopilot: bool,
}

/// Advance the session by `dt_ms` milliseconds
///
/// Returns everything that happened during the step, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.toggle_music {
        events.push(GameEvent::Audio(AudioCommand::ToggleMusic));
    }

    // Finished sessions stay frozen until the player clicks
    if state.phase.is_terminal() {
        if input.restart {
            log::info!("Restarting session (seed {})", state.seed);
            state.restart();
            events.push(GameEvent::Restarted);
        }
        return events;
    }

    if !state.music_started {
        state.music_started = true;
        events.push(GameEvent::Audio(AudioCommand::StartMusic));
    }

    state.time_ticks += 1;
    state.now_ms += dt_ms;

    expire_timers(state, &mut events);
    run_spawners(state, &mut events);

    let input = if input.autopilot {
        autopilot_input(state, input)
    } else {
        input.clone()
    };
    move_boat(state, &input, dt_ms);

    let dt = ms_to_secs(dt_ms);
    let field = state.field();
    for obstacle in &mut state.obstacles {
        obstacle.advance(dt, &field);
    }

    resolve_overlaps(state, &mut events);

    // Ensure deterministic ordering
    state.normalize_order();
    events
}

/// Close recovery windows, drop the expired pickup and faded sharks
fn expire_timers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.now_ms;

    let expired = state.boat.expire_effects(
        now,
        state.tuning.blink_duration_ms,
        state.tuning.stun_duration_ms,
    );
    if expired.blink {
        events.push(GameEvent::BlinkEnded);
    }
    if expired.stun {
        events.push(GameEvent::StunEnded);
    }

    if let Some(gone) = state.repair_boat.take_if(|rb| !rb.is_active(now)) {
        log::debug!("Repair boat {} expired at {now} ms", gone.id);
        events.push(GameEvent::RepairBoatExpired { id: gone.id });
    }

    state.obstacles.retain(|o| {
        if o.is_expired(now) {
            log::debug!("Shark {} faded out", o.id);
            events.push(GameEvent::SharkFaded { id: o.id });
            false
        } else {
            true
        }
    });
}

/// Fire any spawner whose deadline has passed and re-arm it
fn run_spawners(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.now_ms;

    while let Some(at) = state.spawners.next_repair_at {
        if now < at {
            break;
        }
        events.push(spawn_repair_boat(state));
        let interval = state.tuning.repair_boat_spawn_interval_ms.max(1);
        state.spawners.next_repair_at = Some(at + interval);
    }

    while let Some(at) = state.spawners.next_shark_at {
        if now < at {
            break;
        }
        events.push(spawn_shark(state));
        let delay = state.shark_spawn_delay().max(1);
        state.spawners.next_shark_at = Some(at + delay);
    }
}

/// Uniform float in `[lo, hi]`, collapsing an empty range to `lo`
fn random_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Place a repair boat somewhere inside the field margin
///
/// Only one pickup exists at a time; a still-active one is replaced.
pub fn spawn_repair_boat(state: &mut GameState) -> GameEvent {
    let area = state.field().inset(state.tuning.repair_boat_margin);
    let pos = Vec2::new(
        random_between(&mut state.rng, area.x, area.right()),
        random_between(&mut state.rng, area.y, area.bottom()),
    );
    let id = state.next_entity_id();
    let now = state.now_ms;
    let replaced = state.repair_boat.replace(RepairBoat {
        id,
        pos,
        spawned_at: now,
        expires_at: now + state.tuning.repair_boat_duration_ms,
    });
    if let Some(old) = replaced {
        log::debug!("Repair boat {} replaced by {id}", old.id);
    }
    log::debug!("Repair boat {id} spawned at ({:.0}, {:.0})", pos.x, pos.y);
    GameEvent::RepairBoatSpawned { id, pos }
}

/// Launch a shark from just past a random side edge, heading across
pub fn spawn_shark(state: &mut GameState) -> GameEvent {
    let kind = ObstacleKind::Shark;
    let size = kind.display_size();
    let w = state.tuning.field_width;
    let h = state.tuning.field_height;
    let speed = state.tuning.shark_speed;

    let y = random_between(&mut state.rng, size.y / 2.0, h - size.y / 2.0);
    let from_left = state.rng.random_bool(0.5);
    let (x, vx) = if from_left {
        (-size.x / 2.0, speed)
    } else {
        (w + size.x / 2.0, -speed)
    };
    let lifetime_ms = state
        .tuning
        .shark_fade_ms
        .map(|(lo, hi)| state.rng.random_range(lo..=hi.max(lo)));

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx, 0.0),
        spawned_at: state.now_ms,
        lifetime_ms,
    });
    log::debug!("Shark {id} spawned at ({x:.0}, {y:.0}), vel {vx}");
    GameEvent::SharkSpawned { id, from_left }
}

fn move_boat(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    let field = state.field();
    let speed = state.tuning.boat_speed;
    let boat = &mut state.boat;

    if boat.is_stunned {
        boat.vel = Vec2::ZERO;
        return;
    }

    boat.vel = axis_direction(input.left, input.right, input.up, input.down) * speed;
    boat.pos = clamp_to_field(boat.pos + boat.vel * ms_to_secs(dt_ms), boat.size, &field);
}

/// Island, port, obstacles, pickup - stops as soon as the session ends
fn resolve_overlaps(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.now_ms;
    let boat_box = state.boat.hitbox();

    if boat_box.overlaps(&state.island.rect()) {
        if let Some(amount) = state.boat.collect_fruit(state.tuning.fruits_per_trip) {
            log::debug!("Loaded {amount} fruit");
            events.push(GameEvent::FruitCollected { amount });
        }
    }

    if boat_box.overlaps(&state.port.rect()) {
        if let Some(amount) = state.boat.try_deliver(now, state.tuning.delivery_cooldown_ms) {
            let total = state.boat.fruits_delivered;
            log::debug!("Delivered {amount} fruit ({total}/{})", state.tuning.fruits_to_win);
            events.push(GameEvent::FruitDelivered { amount, total });
            if total >= state.tuning.fruits_to_win {
                finish(state, GamePhase::Won, events);
                return;
            }
        }
    }

    let struck = state
        .obstacles
        .iter()
        .find(|o| o.hitbox().overlaps(&boat_box))
        .map(|o| o.kind);
    if let Some(kind) = struck {
        if let Some(hit) = state.boat.take_hit(now, &mut state.rng) {
            log::debug!(
                "Hit by {} - {} hearts left, lost {} fruit",
                kind.name(),
                hit.hearts_left,
                hit.fruit_lost
            );
            events.push(GameEvent::BoatHit {
                kind,
                hearts_left: hit.hearts_left,
                fruit_lost: hit.fruit_lost,
            });
            if hit.hearts_left == 0 {
                finish(state, GamePhase::Lost, events);
                return;
            }
        }
    }

    if let Some(pickup) = state
        .repair_boat
        .take_if(|rb| rb.hitbox().overlaps(&boat_box))
    {
        let heart_restored = state.boat.repair(state.tuning.max_hearts);
        events.push(GameEvent::RepairBoatCollected {
            id: pickup.id,
            heart_restored,
        });
    }
}

fn finish(state: &mut GameState, phase: GamePhase, events: &mut Vec<GameEvent>) {
    let delivered = state.boat.fruits_delivered;
    state.end_session(phase);
    log::info!(
        "Session {:?} at {} ms with {delivered} fruit delivered",
        phase,
        state.now_ms
    );
    events.push(match phase {
        GamePhase::Won => GameEvent::Won { delivered },
        _ => GameEvent::Lost { delivered },
    });
    events.push(GameEvent::Audio(AudioCommand::PauseMusic));
}

/// Steer the boat for idle/demo mode
///
/// Heads for the island while empty and the port while loaded, detours for a
/// repair boat when hurt, and sidesteps obstacles across their direction of
/// travel while not invincible.
pub fn autopilot_input(state: &GameState, input: &TickInput) -> TickInput {
    let boat = &state.boat;
    let mut target = if boat.fruits_carried == 0 {
        state.island.pos
    } else {
        state.port.pos
    };
    if let Some(pickup) = &state.repair_boat {
        if boat.hearts < state.tuning.max_hearts {
            target = pickup.pos;
        }
    }
    let mut delta = target - boat.pos;

    if !boat.is_blinking {
        let danger = boat.hitbox().inset(-AUTOPILOT_DANGER);
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.hitbox().overlaps(&danger))
            .min_by(|a, b| {
                a.pos
                    .distance_squared(boat.pos)
                    .partial_cmp(&b.pos.distance_squared(boat.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(threat) = threat {
            let away = boat.pos - threat.pos;
            let push = AUTOPILOT_DEAD_ZONE * 2.0;
            if threat.vel.x != 0.0 {
                delta.y = away.y.signum() * push;
            } else {
                delta.x = away.x.signum() * push;
            }
        }
    }

    TickInput {
        left: delta.x < -AUTOPILOT_DEAD_ZONE,
        right: delta.x > AUTOPILOT_DEAD_ZONE,
        up: delta.y < -AUTOPILOT_DEAD_ZONE,
        down: delta.y > AUTOPILOT_DEAD_ZONE,
        ..input.clone()
    }
}
