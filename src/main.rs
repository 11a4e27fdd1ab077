//! Fruit Boat entry point
//!
//! Headless runner: plays sessions on a simulated 60 Hz clock with the
//! autopilot at the helm and reports how each one ended.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use fruit_boat::audio::AudioManager;
use fruit_boat::platform::{Clock, FrameLoop, InputState, ManualClock};
use fruit_boat::renderer::Frame;
use fruit_boat::sim::{GameEvent, GamePhase, GameState};
use fruit_boat::{Settings, Tuning};

/// Simulated display refresh
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "fruit-boat")]
#[command(about = "Play Fruit Boat sessions headlessly with the autopilot")]
struct Cli {
    /// Seed of the first session (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Sessions to play; each one uses the next seed
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Abandon a session after this many simulated seconds
    #[arg(long, default_value_t = 600)]
    max_secs: u64,
    /// Tuning overrides (JSON, any subset of fields)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player settings (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Write the last session's final state here
    #[arg(long)]
    dump_state: Option<PathBuf>,
    /// Log every gameplay event
    #[arg(long)]
    verbose: bool,
}

/// Tally of one session's events
#[derive(Debug, Default)]
struct SessionSummary {
    trips: u32,
    hits: u32,
    hearts_restored: u32,
    sharks_spawned: u32,
}

impl SessionSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FruitDelivered { .. } => self.trips += 1,
            GameEvent::BoatHit { .. } => self.hits += 1,
            GameEvent::RepairBoatCollected {
                heart_restored: true,
                ..
            } => self.hearts_restored += 1,
            GameEvent::SharkSpawned { .. } => self.sharks_spawned += 1,
            _ => {}
        }
    }
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("parsing tuning file {}", path.display()))?;
    tuning
        .validate()
        .map_err(|e| anyhow!("invalid tuning in {}: {e}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn play_session(state: &mut GameState, settings: &Settings, max_ms: u64, verbose: bool) -> SessionSummary {
    let mut clock = ManualClock::new();
    let mut frames = FrameLoop::new();
    let mut input = InputState::new();
    input.set_autopilot(true);
    let mut audio = AudioManager::from_settings(settings);
    audio.set_muted(settings.start_muted);

    let mut summary = SessionSummary::default();
    while !state.phase.is_terminal() && state.now_ms < max_ms {
        clock.advance(FRAME_MS);
        let events = frames.frame(clock.now_ms(), state, &mut input);
        audio.handle_events(&events);
        for event in &events {
            summary.record(event);
            if verbose {
                log::info!("[{:>6} ms] {event:?}", state.now_ms);
            }
        }
    }
    log::debug!(
        "Music {:?} at volume {:.2}",
        audio.music(),
        audio.effective_volume()
    );
    summary
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Fruit Boat (headless) starting...");

    let cli = Cli::parse();
    let tuning = load_tuning(cli.tuning.as_deref())?;
    let settings = cli
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let first_seed = cli.seed.unwrap_or_else(rand::random);
    let max_ms = cli.max_secs.saturating_mul(1000);

    let mut last_state = None;
    let mut wins = 0;
    for i in 0..cli.sessions {
        let seed = first_seed.wrapping_add(u64::from(i));
        let mut state = GameState::with_tuning(seed, tuning.clone());
        log::info!("Session {} with seed: {seed}", i + 1);

        let summary = play_session(&mut state, &settings, max_ms, cli.verbose);
        let outcome = match state.phase {
            GamePhase::Won => {
                wins += 1;
                "won"
            }
            GamePhase::Lost => "lost",
            GamePhase::Playing => "timed out",
        };

        println!(
            "seed {seed}: {outcome} after {:.1}s | trips {} | hits {} | hearts restored {} | sharks {}",
            state.now_ms as f64 / 1000.0,
            summary.trips,
            summary.hits,
            summary.hearts_restored,
            summary.sharks_spawned,
        );
        let frame = Frame::build(&state, &settings);
        for line in frame.text.iter().skip(1) {
            println!("  {}", line.text);
        }
        last_state = Some(state);
    }
    println!("{wins}/{} sessions won", cli.sessions);

    if let (Some(path), Some(state)) = (cli.dump_state.as_deref(), last_state.as_ref()) {
        let json = serde_json::to_string_pretty(state).context("serializing final state")?;
        fs::write(path, json).with_context(|| format!("writing state to {}", path.display()))?;
        log::info!("Final state written to {}", path.display());
    }

    Ok(())
}
