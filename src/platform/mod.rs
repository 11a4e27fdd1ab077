//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Time (injected `Clock`)
//! - Input events
//! - Fixed timestep accumulation

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::{Clock, ManualClock, SystemClock};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::sim::{GameEvent, GameState, tick};

/// Fixed timestep driver between rendered frames and simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leftover time not yet simulated
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator
    }

    /// Run simulation ticks for a frame drawn at `now_ms`
    pub fn frame(
        &mut self,
        now_ms: f64,
        state: &mut GameState,
        input: &mut InputState,
    ) -> Vec<GameEvent> {
        let step = SIM_DT_MS as f64;
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => step,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            events.extend(tick(state, input.current(), SIM_DT_MS));
            self.accumulator -= step;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.clear_one_shots();
        }

        // Drop backlog the substep cap could never catch up on
        self.accumulator = self.accumulator.min(MAX_FRAME_MS);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AudioCommand;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(1);
        state.obstacles.clear();
        state.spawners = Default::default();
        state
    }

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut frames = FrameLoop::new();
        let mut state = quiet_state();
        let mut input = InputState::new();
        frames.frame(0.0, &mut state, &mut input);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_accumulates_partial_steps() {
        let mut clock = ManualClock::new();
        let mut frames = FrameLoop::new();
        let mut state = quiet_state();
        let mut input = InputState::new();
        frames.frame(clock.now_ms(), &mut state, &mut input);

        clock.advance(35.0);
        frames.frame(clock.now_ms(), &mut state, &mut input);
        assert_eq!(state.time_ticks, 4);
        assert!((frames.accumulator_ms() - 5.0).abs() < 1e-9);

        clock.advance(5.0);
        frames.frame(clock.now_ms(), &mut state, &mut input);
        assert_eq!(state.time_ticks, 5);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = ManualClock::new();
        let mut frames = FrameLoop::new();
        let mut state = quiet_state();
        let mut input = InputState::new();
        frames.frame(clock.now_ms(), &mut state, &mut input);

        clock.advance(5_000.0);
        frames.frame(clock.now_ms(), &mut state, &mut input);
        assert_eq!(state.time_ticks, 1 + u64::from(MAX_SUBSTEPS));
        assert!(frames.accumulator_ms() <= MAX_FRAME_MS);
    }

    #[test]
    fn test_one_shot_seen_by_single_step() {
        let mut clock = ManualClock::new();
        let mut frames = FrameLoop::new();
        let mut state = quiet_state();
        let mut input = InputState::new();
        frames.frame(clock.now_ms(), &mut state, &mut input);

        input.key_down(Key::Mute);
        clock.advance(50.0);
        let events = frames.frame(clock.now_ms(), &mut state, &mut input);
        let toggles = events
            .iter()
            .filter(|e| **e == GameEvent::Audio(AudioCommand::ToggleMusic))
            .count();
        assert_eq!(toggles, 1);
        assert!(!input.current().toggle_music);
    }
}
