//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Clock sampled by the driver and passed in
//! - No rendering, audio or storage dependencies

pub mod ability;
pub mod boss;
pub mod collision;
pub mod combat;
pub mod entities;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ability::{AbilityState, BoostState};
pub use boss::Boss;
pub use snapshot::{AbilityStatus, BoostStatus, Snapshot, WorldStatus};
pub use state::{
    GameEvent, GamePhase, GameSession, Obstacle, Particle, Player, PowerUp, PowerUpKind,
    Projectile,
};
pub use tick::{TickInput, tick};
