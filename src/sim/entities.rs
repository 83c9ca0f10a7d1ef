//! Entity lifecycle: spawning, integration and pruning
//!
//! Obstacles, player projectiles, power-ups and particles. Boss projectiles
//! are owned by the boss and advanced in `boss`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::outside_playfield;
use super::state::{GameEvent, GameSession, Obstacle, Particle, PowerUp, PowerUpKind, Projectile};
use crate::consts::*;

/// Spawn a barrier pair at the right edge when the level's interval comes up.
///
/// Never while a boss is on screen.
pub fn maybe_spawn_obstacle(session: &mut GameSession) {
    let interval = session.level.spawn_interval.max(1);
    if session.boss.is_none() && session.tick % interval == 0 {
        spawn_obstacle(session);
    }
}

pub fn spawn_obstacle(session: &mut GameSession) {
    let gap = session.level.gap_size;
    let low = GAP_TOP_MARGIN;
    let high = PLAYFIELD_HEIGHT - gap - GAP_BOTTOM_MARGIN;
    let gap_top = if high > low {
        session.rng.random_range(low..=high)
    } else {
        low
    };

    let id = session.ids.next_id();
    session.obstacles.push(Obstacle {
        id,
        x: PLAYFIELD_WIDTH,
        width: OBSTACLE_WIDTH,
        gap_top,
        gap_bottom: gap_top + gap,
        scored: false,
    });
}

/// Scroll obstacles, award pass points, drop the ones that left the screen
pub fn advance_obstacles(session: &mut GameSession) {
    let speed = session.level.speed;
    let player_x = session.player.pos.x;
    let mut passed = 0u64;

    for obstacle in session.obstacles.iter_mut() {
        obstacle.x -= speed;
        if !obstacle.scored && obstacle.trailing_edge() < player_x {
            obstacle.scored = true;
            passed += 1;
        }
    }
    session.obstacles.retain(|o| o.trailing_edge() >= 0.0);

    for _ in 0..passed {
        session.add_score(SCORE_OBSTACLE_PASSED);
        let score = session.score;
        session.emit(GameEvent::ObstacleScored { score });
    }
}

/// Fire a bubble from the player's nose
pub fn spawn_player_projectile(session: &mut GameSession) {
    let id = session.ids.next_id();
    let player = &session.player;
    session.projectiles.push(Projectile {
        id,
        pos: Vec2::new(player.pos.x + player.radius, player.pos.y),
        vel: Vec2::new(SHOT_SPEED, 0.0),
        radius: SHOT_RADIUS,
        damage: SHOT_DAMAGE,
    });
}

pub fn advance_projectiles(session: &mut GameSession) {
    for projectile in session.projectiles.iter_mut() {
        projectile.advance();
    }
    session
        .projectiles
        .retain(|p| p.pos.x <= PLAYFIELD_WIDTH + OFFSCREEN_MARGIN && p.pos.x >= -OFFSCREEN_MARGIN);
}

/// Periodic, probabilistic power-up drop (skipped during boss fights)
pub fn maybe_spawn_power_up(session: &mut GameSession) {
    if session.boss.is_some() || session.tick % POWERUP_CHECK_INTERVAL != 0 {
        return;
    }
    if session.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        spawn_power_up(session);
    }
}

pub fn spawn_power_up(session: &mut GameSession) {
    let y = session
        .rng
        .random_range(POWERUP_SAFE_MARGIN..=PLAYFIELD_HEIGHT - POWERUP_SAFE_MARGIN);
    let id = session.ids.next_id();
    session.power_ups.push(PowerUp {
        id,
        kind: PowerUpKind::Boost,
        pos: Vec2::new(PLAYFIELD_WIDTH, y),
        vel: Vec2::new(-POWERUP_SPEED, 0.0),
        radius: POWERUP_RADIUS,
    });
    log::debug!("Power-up spawned at y={:.0}", y);
}

pub fn advance_power_ups(session: &mut GameSession) {
    for power_up in session.power_ups.iter_mut() {
        power_up.pos += power_up.vel;
    }
    session
        .power_ups
        .retain(|p| !outside_playfield(p.pos, OFFSCREEN_MARGIN));
}

/// Integrate particles under their own gravity and expire them
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Scatter a small debris burst at `at`
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2) {
    let half = BURST_SPEED / 2.0;
    for _ in 0..BURST_SIZE {
        let vel = Vec2::new(rng.random_range(-half..half), rng.random_range(-half..half));
        particles.push(Particle {
            pos: at,
            vel,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        });
    }
    // Drop the oldest debris first
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

impl GameSession {
    pub(crate) fn burst(&mut self, at: Vec2) {
        spawn_burst(&mut self.particles, &mut self.rng, at);
    }
}

/// Advance every free-floating entity by one tick
pub fn advance_entities(session: &mut GameSession) {
    advance_obstacles(session);
    advance_projectiles(session);
    advance_power_ups(session);
    advance_particles(&mut session.particles);
}
