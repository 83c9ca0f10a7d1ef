//! Boss encounter: movement scripts, firing, health
//!
//! Each boss runs exactly one pattern for its whole fight. All timing is
//! counted in boss frames, so staggered bursts need no timers.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::outside_playfield;
use super::state::{EntityIds, Projectile};
use crate::consts::*;
use crate::worlds::{BossDefinition, BossPattern};

/// Frames between the shots of a mechanical burst (~100 ms)
const MECH_BURST_SPACING: u64 = 6;
const MECH_BURST_SHOTS: u64 = 3;

/// Vertical bounce bands
const BASIC_BAND: f32 = 50.0;
const MECH_BAND: f32 = 100.0;

/// An active boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub pattern: BossPattern,
    pub pos: Vec2,
    /// Vertical speed for the bouncing patterns
    pub vel_y: f32,
    pub radius: f32,
    /// Frames since spawn
    pub frame: u64,
    pub projectiles: Vec<Projectile>,
    /// Frames at which queued burst shots leave the barrel
    pub pending_shots: Vec<u64>,
}

/// Where bosses hover
pub fn anchor() -> Vec2 {
    Vec2::new(PLAYFIELD_WIDTH - BOSS_ANCHOR_OFFSET, PLAYFIELD_HEIGHT / 2.0)
}

impl Boss {
    pub fn spawn(def: &BossDefinition) -> Self {
        Self {
            name: def.name.clone(),
            health: def.max_health,
            max_health: def.max_health,
            pattern: def.pattern,
            pos: anchor(),
            vel_y: BOSS_VERTICAL_SPEED,
            radius: BOSS_RADIUS,
            frame: 0,
            projectiles: Vec::new(),
            pending_shots: Vec::new(),
        }
    }

    /// Subtract damage, clamping at zero. Returns true once health is gone.
    pub fn apply_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    /// One frame of movement, firing and projectile upkeep
    pub fn advance(&mut self, rng: &mut Pcg32, ids: &mut EntityIds) {
        self.frame += 1;
        let f = self.frame;
        let t = f as f32;
        let home = anchor();

        match self.pattern {
            BossPattern::Basic => {
                self.bounce(BASIC_BAND);
                if f % 60 == 0 {
                    self.fire(ids, Vec2::new(-3.0, 0.0), 10.0);
                }
            }
            BossPattern::Tentacles => {
                self.pos.y = home.y + (t * 0.05).sin() * 100.0;
                if f % 80 == 0 {
                    for spread in [-1.0, 0.0, 1.0] {
                        self.fire(ids, Vec2::new(-3.0, spread * 2.0), 12.0);
                    }
                }
            }
            BossPattern::Whirlpool => {
                self.pos.x = home.x + (t * 0.03).cos() * 50.0;
                self.pos.y = home.y + (t * 0.03).sin() * 100.0;
                if f % 40 == 0 {
                    let angle = t * 0.1;
                    self.fire(ids, Vec2::new(-angle.cos() * 4.0, angle.sin() * 4.0), 10.0);
                }
            }
            BossPattern::Mechanical => {
                self.bounce(MECH_BAND);
                if f % 50 == 0 {
                    self.pending_shots
                        .extend((0..MECH_BURST_SHOTS).map(|i| f + i * MECH_BURST_SPACING));
                }
                let due = self.pending_shots.iter().filter(|&&at| at <= f).count();
                self.pending_shots.retain(|&at| at > f);
                for _ in 0..due {
                    let vy = rng.random_range(-1.5..1.5);
                    self.fire(ids, Vec2::new(-5.0, vy), 8.0);
                }
            }
            BossPattern::Final => {
                self.pos.x = home.x + (t * 0.02).cos() * 30.0;
                self.pos.y = home.y + (t * 0.04).sin() * 120.0;
                if f % 30 == 0 {
                    for i in 0..8 {
                        let angle = i as f32 / 8.0 * TAU;
                        self.fire(ids, Vec2::new(-angle.cos() * 3.0, angle.sin() * 3.0), 12.0);
                    }
                }
            }
        }

        for projectile in self.projectiles.iter_mut() {
            projectile.advance();
        }
        self.projectiles
            .retain(|p| !outside_playfield(p.pos, OFFSCREEN_MARGIN));
    }

    fn bounce(&mut self, band: f32) {
        self.pos.y += self.vel_y;
        if self.pos.y <= band || self.pos.y >= PLAYFIELD_HEIGHT - band {
            self.vel_y = -self.vel_y;
        }
    }

    fn fire(&mut self, ids: &mut EntityIds, vel: Vec2, radius: f32) {
        self.projectiles.push(Projectile {
            id: ids.next_id(),
            pos: self.pos,
            vel,
            radius,
            damage: 1,
        });
    }
}
