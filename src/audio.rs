//! Sound cue mixer
//!
//! Turns drained session events into sound cues with a playback volume.
//! Actual playback belongs to the front-end; this only decides what to play
//! and how loud, honoring the persisted mute flag.

use serde::Serialize;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    /// Player swims up
    Jump,
    /// Bubble fired
    Shoot,
    /// Ability kicks in
    Ability,
    /// Passed a barrier
    Score,
    /// Barrier smashed
    Break,
    /// Power-up collected
    PowerUp,
    /// Boss enters
    BossAppear,
    /// Boss takes a hit
    BossHit,
    /// Boss goes down
    BossDefeat,
    /// Run ended
    GameOver,
    /// Run ended on a new best
    HighScore,
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    queue: Vec<SoundCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted,
            queue: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting drops anything still queued.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.queue.clear();
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.queue.push(SoundCue { effect, volume });
    }

    /// Queue whatever sound an event calls for
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = effect_for(event) {
            self.play(effect);
        }
    }

    /// Take queued cues for playback
    pub fn drain(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.queue)
    }
}

/// Sound for an event, if it has one
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    let effect = match event {
        GameEvent::Jumped => SoundEffect::Jump,
        GameEvent::ProjectileFired => SoundEffect::Shoot,
        GameEvent::AbilityActivated { .. } => SoundEffect::Ability,
        GameEvent::ObstacleScored { .. } => SoundEffect::Score,
        GameEvent::ObstacleBroken => SoundEffect::Break,
        GameEvent::PowerUpCollected { .. } => SoundEffect::PowerUp,
        GameEvent::BossSpawned { .. } => SoundEffect::BossAppear,
        GameEvent::BossHit { .. } => SoundEffect::BossHit,
        GameEvent::BossDefeated { .. } => SoundEffect::BossDefeat,
        GameEvent::GameOver {
            new_high_score: true,
            ..
        } => SoundEffect::HighScore,
        GameEvent::GameOver { .. } => SoundEffect::GameOver,
        GameEvent::RunStarted | GameEvent::WorldAdvanced { .. } | GameEvent::GameCompleted => {
            return None;
        }
    };
    Some(effect)
}
