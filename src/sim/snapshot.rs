//! Read-only frame view handed to renderers and bindings

use serde::Serialize;

use super::boss::Boss;
use super::state::{GamePhase, GameSession, Obstacle, Particle, Player, PowerUp, Projectile};
use crate::characters::CharacterId;
use crate::worlds::{ColorPair, LevelDefinition};

/// HUD state of the character ability
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AbilityStatus {
    pub name: Option<&'static str>,
    pub active: bool,
    pub ready: bool,
    /// 1.0 when ready
    pub cooldown_progress: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoostStatus {
    pub active: bool,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldStatus<'a> {
    pub index: usize,
    pub name: &'a str,
    pub background: &'a ColorPair,
    pub obstacle_colors: &'a ColorPair,
    pub level: &'a LevelDefinition,
}

/// Everything a frame needs, borrowed from the session
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u64,
    pub high_score: u64,
    pub character: CharacterId,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub projectiles: &'a [Projectile],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub boss: Option<&'a Boss>,
    pub ability: AbilityStatus,
    pub boost: BoostStatus,
    pub world: Option<WorldStatus<'a>>,
}

impl GameSession {
    /// Borrow a snapshot for drawing. `now_ms` only feeds the HUD timers.
    pub fn snapshot(&self, now_ms: u64) -> Snapshot<'_> {
        let ability = self.character_def().ability.as_ref();
        let world = self.current_world().map(|w| WorldStatus {
            index: self.progress.current_world,
            name: &w.name,
            background: &w.background,
            obstacle_colors: &w.obstacle,
            level: &self.level,
        });

        Snapshot {
            phase: self.phase,
            tick: self.tick,
            score: self.score,
            high_score: self.high_score.best,
            character: self.character,
            player: &self.player,
            obstacles: &self.obstacles,
            projectiles: &self.projectiles,
            power_ups: &self.power_ups,
            particles: &self.particles,
            boss: self.boss.as_ref(),
            ability: AbilityStatus {
                name: ability.map(|a| a.name),
                active: self.ability.active,
                ready: self.ability.ready,
                cooldown_progress: self.ability.cooldown_progress(ability, now_ms),
            },
            boost: BoostStatus {
                active: self.boost.is_active(),
                remaining_ms: self
                    .boost
                    .expires_at_ms
                    .map_or(0, |expiry| expiry.saturating_sub(now_ms)),
            },
            world,
        }
    }
}
