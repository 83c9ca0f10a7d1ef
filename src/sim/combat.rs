//! Collision & combat resolution
//!
//! Runs once per Playing tick after everything has moved. Checks are made in
//! a fixed priority order; a fatal hit ends the run and stops resolution,
//! and beating the boss stops it too.

use glam::Vec2;
use rand::Rng;

use super::boss::anchor;
use super::collision::{
    circles_overlap, player_hits_obstacle, player_out_of_bounds, point_hits_obstacle,
};
use super::state::{GameEvent, GamePhase, GameSession, PowerUpKind};
use crate::consts::*;

/// Whether the tick should keep going after a resolution step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Run ended (GameOver)
    Ended,
    /// Boss beaten, interlude started
    BossDown,
}

/// Resolve every pairwise interaction for this tick
pub fn resolve(session: &mut GameSession, now_ms: u64) -> Flow {
    const STEPS: [fn(&mut GameSession, u64) -> Flow; 6] = [
        player_vs_obstacles,
        player_vs_bounds,
        player_shots,
        player_vs_power_ups,
        boss_shots_vs_player,
        player_vs_boss_body,
    ];
    for step in STEPS {
        let flow = step(session, now_ms);
        if flow != Flow::Continue {
            return flow;
        }
    }
    Flow::Continue
}

/// 1. Player against barrier pairs. Breakers smash through, everyone else dies.
fn player_vs_obstacles(session: &mut GameSession, _now_ms: u64) -> Flow {
    let breaker = session.can_break_now();
    let pos = session.player.pos;
    let radius = session.player.radius;
    let mut broken: Vec<Vec2> = Vec::new();
    let mut fatal = false;

    session.obstacles.retain(|o| {
        if fatal || !player_hits_obstacle(pos, radius, o) {
            return true;
        }
        if breaker {
            broken.push(Vec2::new(o.center_x(), pos.y));
            false
        } else {
            fatal = true;
            true
        }
    });

    for at in broken {
        session.add_score(SCORE_OBSTACLE_BROKEN);
        session.burst(at);
        session.emit(GameEvent::ObstacleBroken);
        log::debug!("Obstacle broken at x={:.0}", at.x);
    }

    if fatal {
        end_run(session);
        return Flow::Ended;
    }
    Flow::Continue
}

/// 2. Floor and ceiling are always fatal
fn player_vs_bounds(session: &mut GameSession, _now_ms: u64) -> Flow {
    if player_out_of_bounds(session.player.pos, session.player.radius) {
        end_run(session);
        return Flow::Ended;
    }
    Flow::Continue
}

/// 3-5. Player bubbles against barriers, the boss and boss bubbles.
///
/// Barriers absorb bubbles but are not destroyed by them.
fn player_shots(session: &mut GameSession, now_ms: u64) -> Flow {
    let mut bursts: Vec<Vec2> = Vec::new();
    let mut shot_down = 0u64;
    let mut boss_hits: Vec<u32> = Vec::new();

    let obstacles = &session.obstacles;
    let mut boss = session.boss.as_mut();

    session.projectiles.retain(|shot| {
        if obstacles.iter().any(|o| point_hits_obstacle(shot.pos, o)) {
            bursts.push(shot.pos);
            return false;
        }

        let Some(boss) = boss.as_deref_mut() else {
            return true;
        };
        if !boss.is_defeated() && circles_overlap(shot.pos, shot.radius, boss.pos, boss.radius) {
            boss.apply_damage(shot.damage);
            boss_hits.push(boss.health);
            bursts.push(shot.pos);
            return false;
        }

        let hit = boss
            .projectiles
            .iter()
            .position(|b| circles_overlap(shot.pos, shot.radius, b.pos, b.radius));
        if let Some(index) = hit {
            boss.projectiles.remove(index);
            shot_down += 1;
            bursts.push(shot.pos);
            return false;
        }
        true
    });

    for at in bursts {
        session.burst(at);
    }
    session.add_score(shot_down * SCORE_SHOT_DOWN);
    for health in boss_hits {
        log::debug!("Boss hit, {} health left", health);
        session.emit(GameEvent::BossHit { health });
    }

    if session.boss.as_ref().is_some_and(|b| b.is_defeated()) {
        defeat_boss(session, now_ms);
        return Flow::BossDown;
    }
    Flow::Continue
}

/// 6. Pickups
fn player_vs_power_ups(session: &mut GameSession, now_ms: u64) -> Flow {
    let pos = session.player.pos;
    let radius = session.player.radius;
    let mut collected: Vec<(PowerUpKind, Vec2)> = Vec::new();

    session.power_ups.retain(|p| {
        if circles_overlap(pos, radius, p.pos, p.radius) {
            collected.push((p.kind, p.pos));
            false
        } else {
            true
        }
    });

    for (kind, at) in collected {
        match kind {
            PowerUpKind::Boost => session.boost.activate(now_ms),
        }
        session.burst(at);
        session.add_score(SCORE_POWERUP);
        session.emit(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {:?}", kind);
    }
    Flow::Continue
}

/// 7. Boss bubbles against the player. Breakers pop them for points.
fn boss_shots_vs_player(session: &mut GameSession, _now_ms: u64) -> Flow {
    let breaker = session.can_break_now();
    let pos = session.player.pos;
    let radius = session.player.radius;
    let Some(boss) = session.boss.as_mut() else {
        return Flow::Continue;
    };

    let mut popped: Vec<Vec2> = Vec::new();
    let mut fatal = false;
    boss.projectiles.retain(|p| {
        if fatal || !circles_overlap(pos, radius, p.pos, p.radius) {
            return true;
        }
        if breaker {
            popped.push(p.pos);
            false
        } else {
            fatal = true;
            true
        }
    });

    for at in popped {
        session.add_score(SCORE_DEFLECTED);
        session.burst(at);
    }
    if fatal {
        end_run(session);
        return Flow::Ended;
    }
    Flow::Continue
}

/// 8. Ramming the boss while breaking: one damage per tick of contact
fn player_vs_boss_body(session: &mut GameSession, now_ms: u64) -> Flow {
    if !session.can_break_now() {
        return Flow::Continue;
    }
    let pos = session.player.pos;
    let radius = session.player.radius;
    let Some(boss) = session.boss.as_mut() else {
        return Flow::Continue;
    };
    if !circles_overlap(pos, radius, boss.pos, boss.radius) {
        return Flow::Continue;
    }

    let defeated = boss.apply_damage(1);
    let (health, at) = (boss.health, boss.pos);
    session.burst(at);
    session.emit(GameEvent::BossHit { health });
    log::debug!("Boss rammed, {} health left", health);

    if defeated {
        defeat_boss(session, now_ms);
        return Flow::BossDown;
    }
    Flow::Continue
}

/// Terminate the run and settle the high score
pub fn end_run(session: &mut GameSession) {
    session.phase = GamePhase::GameOver;
    let score = session.score;
    let new_high_score = session.high_score.record(score);
    log::info!("Game over with score {}", score);
    session.emit(GameEvent::GameOver {
        score,
        new_high_score,
    });
}

/// Award the bonus, celebrate, unlock the next world and start the interlude
pub fn defeat_boss(session: &mut GameSession, now_ms: u64) {
    let Some(boss) = session.boss.take() else {
        return;
    };
    log::info!("Boss {} defeated!", boss.name);

    session.add_score(SCORE_BOSS_DEFEATED);
    let center = anchor();
    for _ in 0..BOSS_CELEBRATION_BURSTS {
        let jitter = Vec2::new(
            session.rng.random_range(-50.0..50.0),
            session.rng.random_range(-50.0..50.0),
        );
        session.burst(center + jitter);
    }

    let world = session.progress.current_world;
    let unlocked = session.progress.complete_current(&session.catalog);
    session.phase = GamePhase::BossDefeatedInterlude;
    session.interlude_until_ms = Some(now_ms.saturating_add(BOSS_INTERLUDE_MS));
    session.emit(GameEvent::BossDefeated { world, unlocked });
}
