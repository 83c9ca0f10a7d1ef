//! Game state and core simulation types
//!
//! `GameSession` is the single owned aggregate every subsystem mutates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::{AbilityState, BoostState};
use super::boss::Boss;
use crate::characters::{Character, CharacterId};
use crate::consts::*;
use crate::highscore::HighScore;
use crate::progress::ProgressRecord;
use crate::worlds::{LevelDefinition, WorldCatalog, WorldDefinition};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
    /// Boss beaten, waiting to move on to the next world
    BossDefeatedInterlude,
}

/// The player-controlled swimmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (pixels per tick, +y is down)
    pub vel_y: f32,
    /// Hitbox radius (from the selected character)
    pub radius: f32,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_START_Y),
            vel_y: 0.0,
            radius,
        }
    }
}

/// A top/bottom barrier pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    /// Set once the player has passed it
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A bubble shot, fired by the player or a boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
}

impl Projectile {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary jump boost
    Boost,
}

/// A drifting pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Fraction of lifetime left (for fading)
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Notable things that happened during a tick.
///
/// Drained by the driver for audio cues and persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    AbilityActivated { character: CharacterId },
    ProjectileFired,
    ObstacleScored { score: u64 },
    ObstacleBroken,
    PowerUpCollected { kind: PowerUpKind },
    BossSpawned { name: String },
    BossHit { health: u32 },
    BossDefeated { world: usize, unlocked: Option<usize> },
    WorldAdvanced { world: usize },
    GameCompleted,
    GameOver { score: u64, new_high_score: bool },
}

/// Monotonic entity id source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Complete session state (deterministic for a given seed, input and clock)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
    pub phase: GamePhase,
    /// Playing ticks since the run started
    pub tick: u64,
    pub score: u64,
    pub high_score: HighScore,
    pub character: CharacterId,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub boss: Option<Boss>,
    /// Boss already appeared in this run
    pub boss_triggered: bool,
    pub ability: AbilityState,
    pub boost: BoostState,
    pub last_shot_ms: Option<u64>,
    /// Deadline for leaving the boss-defeated interlude
    pub interlude_until_ms: Option<u64>,
    /// Active difficulty preset
    pub level: LevelDefinition,
    pub progress: ProgressRecord,
    pub(crate) catalog: WorldCatalog,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(
        seed: u64,
        catalog: WorldCatalog,
        progress: ProgressRecord,
        character: CharacterId,
        high_score: u64,
    ) -> Self {
        let progress = progress.normalized(&catalog);
        let level = catalog
            .get(progress.current_world)
            .and_then(|w| w.level(progress.current_level))
            .cloned()
            .unwrap_or_default();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
            phase: GamePhase::Ready,
            tick: 0,
            score: 0,
            high_score: HighScore::new(high_score),
            character,
            player: Player::new(character.character().radius),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            boss: None,
            boss_triggered: false,
            ability: AbilityState::default(),
            boost: BoostState::default(),
            last_shot_ms: None,
            interlude_until_ms: None,
            level,
            progress,
            catalog,
            events: Vec::new(),
        }
    }

    /// Fresh session on the standard catalog with default progress
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            seed,
            WorldCatalog::standard(),
            ProgressRecord::default(),
            CharacterId::default(),
            0,
        )
    }

    pub fn character_def(&self) -> &'static Character {
        self.character.character()
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn world_index(&self) -> usize {
        self.progress.current_world
    }

    pub fn current_world(&self) -> Option<&WorldDefinition> {
        self.catalog.get(self.progress.current_world)
    }

    /// Ability is active on a character that can smash through things
    pub fn can_break_now(&self) -> bool {
        self.ability.active && self.character_def().can_break_obstacles
    }

    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}
