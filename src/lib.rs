//! Reef Dash - A side-scrolling reef dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, bosses, abilities)
//! - `worlds`: Static world/level/boss catalog
//! - `characters`: Playable character variants
//! - `progress`: World unlock/completion tracking
//! - `persistence`: Key-value storage backends and the save/load contract
//! - `renderer`: Read-only frame consumer contract
//! - `audio`: Event-to-sound cue mapping
//! - `platform`: Frame driver plus browser bindings (wasm32 only)

pub mod audio;
pub mod characters;
pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod worlds;

pub use characters::{Character, CharacterId};
pub use highscore::HighScore;
pub use progress::ProgressRecord;
pub use settings::Settings;
pub use worlds::WorldCatalog;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds per tick, for drivers that derive the clock from ticks
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE as f64;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_IMPULSE: f32 = -9.0;
    /// Slow-fall ability modifiers
    pub const SLOW_FALL_GRAVITY_SCALE: f32 = 0.3;
    pub const SLOW_FALL_JUMP_SCALE: f32 = 0.5;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_TOP_MARGIN: f32 = 50.0;
    pub const GAP_BOTTOM_MARGIN: f32 = 100.0;

    /// Player projectiles (bubbles)
    pub const SHOT_SPEED: f32 = 5.0;
    pub const SHOT_RADIUS: f32 = 8.0;
    pub const SHOT_DAMAGE: u32 = 1;
    pub const SHOT_COOLDOWN_MS: u64 = 300;
    /// Slack beyond the playfield before projectiles are discarded
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Power-ups
    pub const POWERUP_CHECK_INTERVAL: u64 = 300;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.3;
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPEED: f32 = 2.0;
    pub const POWERUP_SAFE_MARGIN: f32 = 100.0;
    pub const BOOST_DURATION_MS: u64 = 5000;
    pub const BOOST_JUMP_MULTIPLIER: f32 = 1.8;

    /// Particles
    pub const BURST_SIZE: usize = 8;
    pub const BURST_SPEED: f32 = 8.0;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    pub const MAX_PARTICLES: usize = 512;

    /// Scoring
    pub const SCORE_OBSTACLE_PASSED: u64 = 1;
    pub const SCORE_OBSTACLE_BROKEN: u64 = 2;
    pub const SCORE_SHOT_DOWN: u64 = 1;
    pub const SCORE_POWERUP: u64 = 3;
    pub const SCORE_DEFLECTED: u64 = 1;
    pub const SCORE_BOSS_DEFEATED: u64 = 20;

    /// Boss encounter
    pub const BOSS_TRIGGER_SCORE: u64 = 10;
    pub const BOSS_ANCHOR_OFFSET: f32 = 100.0;
    pub const BOSS_RADIUS: f32 = 40.0;
    pub const BOSS_VERTICAL_SPEED: f32 = 2.0;
    pub const BOSS_CELEBRATION_BURSTS: usize = 30;
    pub const BOSS_INTERLUDE_MS: u64 = 2000;
}

