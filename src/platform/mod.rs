//! Platform glue
//!
//! `GameDriver` is the frame-loop side of the game: it owns the session and
//! its collaborators, feeds inputs in, and reacts to drained events by
//! saving progress, high score and settings and queueing sound cues. The
//! native binary and the browser bindings both run on top of it.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::audio::{AudioManager, SoundCue};
use crate::characters::CharacterId;
use crate::persistence::{KeyValueStore, Persistence, StorageError};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, TickInput, tick};
use crate::worlds::WorldCatalog;

pub struct GameDriver<S: KeyValueStore> {
    session: GameSession,
    persistence: Persistence<S>,
    settings: Settings,
    audio: AudioManager,
}

impl<S: KeyValueStore> GameDriver<S> {
    /// Restore saved progress and preferences and start a fresh session
    pub fn new(seed: u64, store: S) -> Self {
        Self::with_catalog(seed, store, WorldCatalog::standard())
    }

    pub fn with_catalog(seed: u64, store: S, catalog: WorldCatalog) -> Self {
        let persistence = Persistence::new(store);
        let settings = Settings::load(&persistence);
        let progress = persistence.load_progress(&catalog);
        let high_score = persistence.load_high_score();
        log::info!(
            "Starting with seed {} in world {} (best {})",
            seed,
            progress.current_world,
            high_score
        );
        let session = GameSession::new(seed, catalog, progress, settings.character, high_score);
        Self {
            session,
            persistence,
            settings,
            audio: AudioManager::new(settings.muted),
        }
    }

    /// Run one tick and settle its events
    pub fn step(&mut self, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
        tick(&mut self.session, input, now_ms);
        let events = self.session.drain_events();
        for event in &events {
            self.audio.on_event(event);
            if let Err(err) = self.persist(event) {
                log::warn!("Failed to save after {:?}: {}", event, err);
            }
        }
        events
    }

    fn persist(&mut self, event: &GameEvent) -> Result<(), StorageError> {
        match event {
            GameEvent::BossDefeated { .. } | GameEvent::WorldAdvanced { .. } => {
                self.persistence.save_progress(&self.session.progress)
            }
            GameEvent::GameOver {
                score,
                new_high_score: true,
            } => self.persistence.save_high_score(*score),
            _ => Ok(()),
        }
    }

    pub fn select_world(&mut self, world: usize) -> Result<bool, StorageError> {
        if !self.session.select_world(world) {
            return Ok(false);
        }
        self.persistence.save_progress(&self.session.progress)?;
        Ok(true)
    }

    pub fn select_level(&mut self, level: usize) -> Result<bool, StorageError> {
        if !self.session.select_level(level) {
            return Ok(false);
        }
        self.persistence.save_progress(&self.session.progress)?;
        Ok(true)
    }

    pub fn select_character(&mut self, id: CharacterId) -> Result<bool, StorageError> {
        if !self.session.select_character(id) {
            return Ok(false);
        }
        self.settings.character = id;
        self.settings.save(&mut self.persistence)?;
        Ok(true)
    }

    /// Flip mute and persist it. Returns the new value.
    pub fn toggle_mute(&mut self) -> Result<bool, StorageError> {
        let muted = self.settings.toggle_mute();
        self.audio.set_muted(muted);
        self.persistence.save_muted(muted)?;
        Ok(muted)
    }

    pub fn reset_progress(&mut self) -> Result<(), StorageError> {
        self.session.reset_progress();
        self.persistence.reset_progress()
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        self.audio.drain()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
