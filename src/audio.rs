//! Background music state
//!
//! The simulation never plays sound itself; it emits `AudioCommand`s and the
//! host feeds them through `AudioManager`, which tracks what the music
//! backend should be doing.

use crate::settings::Settings;
use crate::sim::{AudioCommand, GameEvent};

/// What the background track is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    /// Never started this run
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    music: MusicState,
    master_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            music: MusicState::Stopped,
            master_volume: 0.8,
            music_volume: 0.5,
            muted: false,
        }
    }

    /// Volumes come from the player's settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_music_volume(settings.music_volume);
        audio
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Apply one command from the simulation
    pub fn apply(&mut self, command: AudioCommand) -> MusicState {
        let next = match (command, self.music) {
            (AudioCommand::StartMusic, _) => MusicState::Playing,
            (AudioCommand::ToggleMusic, MusicState::Playing) => MusicState::Paused,
            (AudioCommand::ToggleMusic, _) => MusicState::Playing,
            (AudioCommand::PauseMusic, MusicState::Playing) => MusicState::Paused,
            (AudioCommand::PauseMusic, state) => state,
        };
        if next != self.music {
            log::debug!("Music {:?} -> {:?} ({:?})", self.music, next, command);
            self.music = next;
        }
        self.music
    }

    /// Pick the audio commands out of a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Audio(command) = event {
                self.apply(*command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_plays_once() {
        let mut audio = AudioManager::new();
        assert_eq!(audio.apply(AudioCommand::StartMusic), MusicState::Playing);
        assert_eq!(audio.apply(AudioCommand::StartMusic), MusicState::Playing);
    }

    #[test]
    fn test_toggle_cycles() {
        let mut audio = AudioManager::new();
        assert_eq!(audio.apply(AudioCommand::ToggleMusic), MusicState::Playing);
        assert_eq!(audio.apply(AudioCommand::ToggleMusic), MusicState::Paused);
        assert_eq!(audio.apply(AudioCommand::ToggleMusic), MusicState::Playing);
    }

    #[test]
    fn test_pause_only_affects_playing_music() {
        let mut audio = AudioManager::new();
        assert_eq!(audio.apply(AudioCommand::PauseMusic), MusicState::Stopped);
        audio.apply(AudioCommand::StartMusic);
        assert_eq!(audio.apply(AudioCommand::PauseMusic), MusicState::Paused);
        assert_eq!(audio.apply(AudioCommand::PauseMusic), MusicState::Paused);
    }

    #[test]
    fn test_handle_events_ignores_gameplay() {
        let mut audio = AudioManager::new();
        audio.handle_events(&[
            GameEvent::FruitCollected { amount: 3 },
            GameEvent::Audio(AudioCommand::StartMusic),
            GameEvent::Won { delivered: 25 },
            GameEvent::Audio(AudioCommand::PauseMusic),
        ]);
        assert_eq!(audio.music(), MusicState::Paused);
    }

    #[test]
    fn test_effective_volume() {
        let settings = Settings {
            master_volume: 0.5,
            music_volume: 0.5,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        assert!((audio.effective_volume() - 0.25).abs() < 1e-6);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_master_volume(3.0);
        audio.set_muted(false);
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);
    }
}
