//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The clock is
//! sampled once by the driver and passed in; nothing here reads wall time.

use super::ability::{jump_velocity, player_gravity};
use super::boss::Boss;
use super::combat::{self, Flow};
use super::entities::{
    advance_entities, advance_particles, maybe_spawn_obstacle, maybe_spawn_power_up,
    spawn_player_projectile,
};
use super::state::{GameEvent, GamePhase, GameSession, Player};
use crate::characters::CharacterId;
use crate::consts::*;
use crate::progress::ProgressRecord;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Swim upward (also starts a run from Ready)
    pub jump: bool,
    /// Trigger the character's special ability
    pub use_ability: bool,
    /// Fire a bubble
    pub shoot: bool,
    /// Abandon the current run
    pub reset: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: u64) {
    update_timers(session, now_ms);

    if input.reset {
        session.reset_run();
    }
    if input.jump {
        session.jump(now_ms);
    }
    if input.use_ability {
        session.use_ability(now_ms);
    }
    if input.shoot {
        session.shoot_projectile(now_ms);
    }

    match session.phase {
        GamePhase::Playing => step_playing(session, now_ms),
        GamePhase::BossDefeatedInterlude => {
            advance_particles(&mut session.particles);
            finish_interlude(session, now_ms);
        }
        // Debris keeps settling on the title and results screens
        GamePhase::Ready | GamePhase::GameOver => advance_particles(&mut session.particles),
    }
}

fn update_timers(session: &mut GameSession, now_ms: u64) {
    let ability = session.character.character().ability.as_ref();
    session.ability.update(ability, now_ms);
    session.boost.update(now_ms);
}

fn step_playing(session: &mut GameSession, now_ms: u64) {
    // Player physics
    let character = session.character.character();
    session.player.vel_y += player_gravity(character, session.ability.active);
    session.player.pos.y += session.player.vel_y;

    maybe_spawn_obstacle(session);
    advance_entities(session);

    maybe_trigger_boss(session);
    if let Some(boss) = session.boss.as_mut() {
        boss.advance(&mut session.rng, &mut session.ids);
    }

    match combat::resolve(session, now_ms) {
        Flow::Continue => {}
        Flow::Ended | Flow::BossDown => return,
    }
    // Breaks, pickups and popped bubbles can cross the threshold too
    maybe_trigger_boss(session);

    maybe_spawn_power_up(session);
    session.tick += 1;
}

/// Bring in the world's boss the first time the score reaches the threshold
fn maybe_trigger_boss(session: &mut GameSession) {
    if session.boss_triggered || session.score < BOSS_TRIGGER_SCORE {
        return;
    }
    let Some(def) = session.current_world().map(|w| w.boss.clone()) else {
        return;
    };

    session.boss_triggered = true;
    session.obstacles.clear();
    session.boss = Some(Boss::spawn(&def));
    log::info!("Boss {} appeared ({} hp)", def.name, def.max_health);
    session.emit(GameEvent::BossSpawned { name: def.name });
}

/// Leave the boss-defeated interlude once its deadline passes
fn finish_interlude(session: &mut GameSession, now_ms: u64) {
    let Some(deadline) = session.interlude_until_ms else {
        return;
    };
    if now_ms < deadline {
        return;
    }

    let current = session.progress.current_world;
    match session.catalog.next_index(current) {
        Some(next) if session.progress.select_world(next) => {
            session.apply_level_config();
            session.reset_run();
            log::info!("Advancing to world {}", next);
            session.emit(GameEvent::WorldAdvanced { world: next });
        }
        _ => {
            session.reset_run();
            log::info!("All worlds cleared!");
            session.emit(GameEvent::GameCompleted);
        }
    }
}

impl GameSession {
    /// Swim upward. Starts the run when waiting in Ready.
    pub fn jump(&mut self, _now_ms: u64) -> bool {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Playing;
            log::info!("Run started in world {}", self.progress.current_world);
            self.emit(GameEvent::RunStarted);
        }
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.vel_y =
            jump_velocity(self.character_def(), self.ability.active, self.boost.is_active());
        self.emit(GameEvent::Jumped);
        true
    }

    /// Activate the character's ability if it has one and it is ready
    pub fn use_ability(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let character = self.character_def();
        if !self.ability.try_activate(character.ability.as_ref(), now_ms) {
            return false;
        }
        log::debug!("{} used their ability", character.name);
        self.emit(GameEvent::AbilityActivated {
            character: self.character,
        });
        true
    }

    /// Fire a bubble, at most once per cooldown window
    pub fn shoot_projectile(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let cooling = self
            .last_shot_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < SHOT_COOLDOWN_MS);
        if cooling {
            return false;
        }
        spawn_player_projectile(self);
        self.last_shot_ms = Some(now_ms);
        log::debug!("Bubble fired at {}ms", now_ms);
        self.emit(GameEvent::ProjectileFired);
        true
    }

    /// Back to Ready with an empty playfield. Cancels a pending world advance.
    pub fn reset_run(&mut self) {
        self.phase = GamePhase::Ready;
        self.tick = 0;
        self.score = 0;
        self.player = Player::new(self.character_def().radius);
        self.obstacles.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.boss = None;
        self.boss_triggered = false;
        self.ability = Default::default();
        self.boost = Default::default();
        self.last_shot_ms = None;
        self.interlude_until_ms = None;
    }

    /// Copy the selected level's tunables into the session
    pub fn apply_level_config(&mut self) {
        let level = self
            .catalog
            .get(self.progress.current_world)
            .and_then(|w| w.level(self.progress.current_level));
        if let Some(level) = level {
            self.level = level.clone();
            log::info!(
                "Level {} ({}): speed {}, gap {}, spawn every {} ticks",
                level.name,
                level.difficulty,
                level.speed,
                level.gap_size,
                level.spawn_interval
            );
        }
    }

    /// Switch to an unlocked world. Resets the run.
    pub fn select_world(&mut self, world: usize) -> bool {
        if world >= self.catalog.len() || !self.progress.select_world(world) {
            return false;
        }
        self.apply_level_config();
        self.reset_run();
        true
    }

    /// Switch level within the current world. Resets the run.
    pub fn select_level(&mut self, level: usize) -> bool {
        let exists = self
            .current_world()
            .is_some_and(|w| w.level(level).is_some());
        if !exists {
            return false;
        }
        self.progress.current_level = level;
        self.apply_level_config();
        self.reset_run();
        true
    }

    /// Change character between runs. Refused mid-run.
    pub fn select_character(&mut self, id: CharacterId) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.character = id;
        self.reset_run();
        log::info!("Selected {}", id.as_str());
        true
    }

    /// Forget all progress (world 0 only)
    pub fn reset_progress(&mut self) {
        self.progress = ProgressRecord::default();
        self.apply_level_config();
        self.reset_run();
        log::info!("Progress reset");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{Obstacle, PowerUp, PowerUpKind, Projectile};
    use crate::worlds::WorldCatalog;

    fn playing(character: CharacterId) -> GameSession {
        let mut s = GameSession::new(
            42,
            WorldCatalog::standard(),
            ProgressRecord::default(),
            character,
            0,
        );
        s.jump(0);
        s.drain_events();
        // Skip the spawn tick so tests control the playfield
        s.tick = 1;
        s
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// A barrier pair overlapping the player with the gap well below them
    fn wall_at_player(s: &GameSession) -> Obstacle {
        let wall = Obstacle {
            id: 999,
            x: PLAYER_X - 10.0,
            width: OBSTACLE_WIDTH,
            gap_top: 400.0,
            gap_bottom: 550.0,
            scored: false,
        };
        assert!(s.player.pos.y + s.player.radius < wall.gap_top);
        wall
    }

    #[test]
    fn test_first_jump_starts_run() {
        let mut s = GameSession::with_seed(1);
        assert_eq!(s.phase, GamePhase::Ready);
        tick(&mut s, &TickInput { jump: true, ..idle() }, 0);
        assert_eq!(s.phase, GamePhase::Playing);
        let events = s.drain_events();
        assert_eq!(events[0], GameEvent::RunStarted);
        assert!(events.contains(&GameEvent::Jumped));
        // Jump sets the velocity, then one tick of gravity
        assert!((s.player.vel_y - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_ready_is_frozen() {
        let mut s = GameSession::with_seed(1);
        for t in 0..100 {
            tick(&mut s, &idle(), t * 16);
        }
        assert_eq!(s.player.pos.y, PLAYER_START_Y);
        assert_eq!(s.tick, 0);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_floor_ends_run_on_first_violation() {
        let mut s = playing(CharacterId::Fish);
        let r = s.player.radius;
        let mut prev_y = s.player.pos.y;
        for t in 0..200 {
            tick(&mut s, &idle(), t * 16);
            if s.phase == GamePhase::GameOver {
                break;
            }
            assert!(s.player.pos.y + r <= PLAYFIELD_HEIGHT);
            prev_y = s.player.pos.y;
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.player.pos.y + r > PLAYFIELD_HEIGHT);
        assert!(prev_y + r <= PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_fish_dies_on_barrier() {
        let mut s = playing(CharacterId::Fish);
        let wall = wall_at_player(&s);
        s.obstacles.push(wall);
        tick(&mut s, &idle(), 100);
        assert_eq!(s.phase, GamePhase::GameOver);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            new_high_score: false
        }));
    }

    #[test]
    fn test_shark_breaks_barrier_and_keeps_going() {
        let mut s = playing(CharacterId::Shark);
        assert!(s.use_ability(50));
        let wall = wall_at_player(&s);
        s.obstacles.push(wall);
        tick(&mut s, &idle(), 100);

        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, SCORE_OBSTACLE_BROKEN);
        assert!(s.obstacles.iter().all(|o| o.id != 999));
        assert_eq!(s.particles.len(), BURST_SIZE);
        assert!(s.drain_events().contains(&GameEvent::ObstacleBroken));
    }

    #[test]
    fn test_shark_without_ability_dies() {
        let mut s = playing(CharacterId::Shark);
        let wall = wall_at_player(&s);
        s.obstacles.push(wall);
        tick(&mut s, &idle(), 100);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_bubble_absorbed_by_barrier() {
        let mut s = playing(CharacterId::Fish);
        s.obstacles.push(Obstacle {
            id: 999,
            x: 200.0,
            width: OBSTACLE_WIDTH,
            gap_top: 400.0,
            gap_bottom: 550.0,
            scored: false,
        });
        s.projectiles.push(Projectile {
            id: 500,
            pos: Vec2::new(215.0, 300.0),
            vel: Vec2::new(SHOT_SPEED, 0.0),
            radius: SHOT_RADIUS,
            damage: SHOT_DAMAGE,
        });
        tick(&mut s, &idle(), 100);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_boss_arrives_at_threshold() {
        let mut s = playing(CharacterId::Fish);
        s.obstacles.push(Obstacle {
            id: 999,
            x: 300.0,
            width: OBSTACLE_WIDTH,
            gap_top: 100.0,
            gap_bottom: 500.0,
            scored: false,
        });
        s.score = BOSS_TRIGGER_SCORE;
        tick(&mut s, &idle(), 100);

        let boss = s.boss.as_ref().unwrap();
        assert_eq!(boss.name, "Mini Pipe");
        assert_eq!(boss.health, boss.max_health);
        assert!(s.obstacles.is_empty());
        assert!(s.boss_triggered);
        assert!(s.drain_events().contains(&GameEvent::BossSpawned {
            name: "Mini Pipe".to_string()
        }));

        // Only once per world
        s.boss = None;
        tick(&mut s, &idle(), 116);
        assert!(s.boss.is_none());
    }

    #[test]
    fn test_break_reaching_threshold_brings_boss_same_tick() {
        let mut s = playing(CharacterId::Shark);
        assert!(s.use_ability(50));
        s.score = BOSS_TRIGGER_SCORE - SCORE_OBSTACLE_BROKEN;
        let wall = wall_at_player(&s);
        s.obstacles.push(wall);
        tick(&mut s, &idle(), 100);

        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, BOSS_TRIGGER_SCORE);
        assert!(s.boss.is_some());
        assert!(s.obstacles.is_empty());
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::ObstacleBroken));
        assert!(events.iter().any(|e| matches!(e, GameEvent::BossSpawned { .. })));
    }

    #[test]
    fn test_slow_fall_through_tick() {
        let mut s = playing(CharacterId::Jellyfish);
        assert!(s.use_ability(0));
        s.player.vel_y = 0.0;
        tick(&mut s, &idle(), 16);
        let slow = GRAVITY * SLOW_FALL_GRAVITY_SCALE;
        assert!((s.player.vel_y - slow).abs() < 1e-5);
        tick(&mut s, &idle(), 32);
        assert!((s.player.vel_y - 2.0 * slow).abs() < 1e-5);

        // Jump is halved, then one slowed tick of gravity
        tick(&mut s, &TickInput { jump: true, ..idle() }, 48);
        assert!((s.player.vel_y - (-4.5 + slow)).abs() < 1e-5);
        s.jump(50);
        assert!((s.player.vel_y - JUMP_IMPULSE * SLOW_FALL_JUMP_SCALE).abs() < 1e-5);

        // Full gravity once the ability lapses
        let duration = s.character_def().ability.as_ref().unwrap().duration_ms;
        s.player.vel_y = 0.0;
        tick(&mut s, &idle(), duration);
        assert!(!s.ability.active);
        assert!((s.player.vel_y - GRAVITY).abs() < 1e-5);
    }

    #[test]
    fn test_no_obstacles_spawn_during_boss() {
        let mut s = playing(CharacterId::Fish);
        s.score = BOSS_TRIGGER_SCORE;
        s.tick = 0;
        tick(&mut s, &idle(), 0);
        assert!(s.boss.is_some());
        s.tick = s.level.spawn_interval;
        tick(&mut s, &idle(), 16);
        assert!(s.obstacles.is_empty());
    }

    /// Put a boss at one health point with a bubble about to hit it
    fn boss_about_to_fall(s: &mut GameSession) {
        let def = s.current_world().unwrap().boss.clone();
        let mut boss = Boss::spawn(&def);
        boss.health = 1;
        let target = boss.pos;
        s.boss = Some(boss);
        s.boss_triggered = true;
        s.projectiles.push(Projectile {
            id: 500,
            pos: target - Vec2::new(SHOT_SPEED, 0.0),
            vel: Vec2::new(SHOT_SPEED, 0.0),
            radius: SHOT_RADIUS,
            damage: SHOT_DAMAGE,
        });
    }

    #[test]
    fn test_boss_defeat_unlocks_next_world() {
        let mut s = playing(CharacterId::Fish);
        s.score = 12;
        boss_about_to_fall(&mut s);
        tick(&mut s, &idle(), 1_000);

        assert_eq!(s.score, 12 + SCORE_BOSS_DEFEATED);
        assert!(s.boss.is_none());
        assert_eq!(s.phase, GamePhase::BossDefeatedInterlude);
        assert!(s.progress.is_completed(0));
        assert!(s.progress.is_unlocked(1));
        assert_eq!(s.interlude_until_ms, Some(1_000 + BOSS_INTERLUDE_MS));
        assert!(!s.particles.is_empty());

        let events = s.drain_events();
        assert!(events.contains(&GameEvent::BossHit { health: 0 }));
        assert!(events.contains(&GameEvent::BossDefeated {
            world: 0,
            unlocked: Some(1)
        }));
    }

    #[test]
    fn test_interlude_moves_to_next_world() {
        let mut s = playing(CharacterId::Fish);
        boss_about_to_fall(&mut s);
        tick(&mut s, &idle(), 1_000);
        s.drain_events();

        // Input is ignored during the interlude
        tick(&mut s, &TickInput { jump: true, ..idle() }, 2_999);
        assert_eq!(s.phase, GamePhase::BossDefeatedInterlude);

        tick(&mut s, &idle(), 3_000);
        assert_eq!(s.phase, GamePhase::Ready);
        assert_eq!(s.world_index(), 1);
        assert_eq!(s.progress.current_level, 0);
        assert_eq!(s.score, 0);
        assert_eq!(&s.level, s.catalog().get(1).unwrap().level(0).unwrap());
        assert!(s.drain_events().contains(&GameEvent::WorldAdvanced { world: 1 }));
    }

    #[test]
    fn test_reset_cancels_pending_advance() {
        let mut s = playing(CharacterId::Fish);
        boss_about_to_fall(&mut s);
        tick(&mut s, &idle(), 1_000);
        assert!(s.interlude_until_ms.is_some());

        tick(&mut s, &TickInput { reset: true, ..idle() }, 1_500);
        assert_eq!(s.phase, GamePhase::Ready);
        assert_eq!(s.interlude_until_ms, None);

        tick(&mut s, &idle(), 5_000);
        assert_eq!(s.world_index(), 0);
        assert!(s.progress.is_unlocked(1));
    }

    #[test]
    fn test_last_world_completes_game() {
        let catalog = WorldCatalog::standard();
        let mut progress = ProgressRecord::default();
        progress.unlocked_worlds.extend(0..catalog.len());
        progress.current_world = catalog.len() - 1;
        let mut s = GameSession::new(3, catalog, progress, CharacterId::Fish, 0);
        s.jump(0);
        s.tick = 1;

        boss_about_to_fall(&mut s);
        tick(&mut s, &idle(), 1_000);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::BossDefeated {
            world: 4,
            unlocked: None
        }));

        tick(&mut s, &idle(), 3_000);
        assert_eq!(s.phase, GamePhase::Ready);
        assert_eq!(s.world_index(), 4);
        assert!(s.drain_events().contains(&GameEvent::GameCompleted));
    }

    #[test]
    fn test_breaker_contact_damage_per_tick() {
        let mut s = playing(CharacterId::Shark);
        s.use_ability(0);
        let def = s.current_world().unwrap().boss.clone();
        let mut boss = Boss::spawn(&def);
        boss.pos = s.player.pos;
        let start = boss.health;
        s.boss = Some(boss);
        s.boss_triggered = true;

        tick(&mut s, &idle(), 16);
        assert_eq!(s.boss.as_ref().unwrap().health, start - 1);
        tick(&mut s, &idle(), 32);
        assert_eq!(s.boss.as_ref().unwrap().health, start - 2);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_boss_bubble_kills_fish() {
        let mut s = playing(CharacterId::Fish);
        let def = s.current_world().unwrap().boss.clone();
        let mut boss = Boss::spawn(&def);
        boss.projectiles.push(Projectile {
            id: 700,
            pos: s.player.pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            damage: 1,
        });
        s.boss = Some(boss);
        s.boss_triggered = true;
        tick(&mut s, &idle(), 16);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_breaking_shark_pops_boss_bubbles() {
        let mut s = playing(CharacterId::Shark);
        s.use_ability(0);
        let def = s.current_world().unwrap().boss.clone();
        let mut boss = Boss::spawn(&def);
        boss.projectiles.push(Projectile {
            id: 700,
            pos: s.player.pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            damage: 1,
        });
        s.boss = Some(boss);
        s.boss_triggered = true;
        tick(&mut s, &idle(), 16);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, SCORE_DEFLECTED);
        assert!(s.boss.as_ref().unwrap().projectiles.is_empty());
    }

    #[test]
    fn test_bubbles_cancel_out() {
        let mut s = playing(CharacterId::Fish);
        let def = s.current_world().unwrap().boss.clone();
        let mut boss = Boss::spawn(&def);
        boss.projectiles.push(Projectile {
            id: 700,
            pos: Vec2::new(200.0, 200.0),
            vel: Vec2::ZERO,
            radius: 10.0,
            damage: 1,
        });
        s.boss = Some(boss);
        s.boss_triggered = true;
        s.projectiles.push(Projectile {
            id: 500,
            pos: Vec2::new(195.0, 200.0),
            vel: Vec2::new(SHOT_SPEED, 0.0),
            radius: SHOT_RADIUS,
            damage: SHOT_DAMAGE,
        });
        tick(&mut s, &idle(), 16);
        assert!(s.projectiles.is_empty());
        assert!(s.boss.as_ref().unwrap().projectiles.is_empty());
        assert_eq!(s.score, SCORE_SHOT_DOWN);
    }

    #[test]
    fn test_boost_pickup_and_expiry() {
        let mut s = playing(CharacterId::Fish);
        s.power_ups.push(PowerUp {
            id: 600,
            kind: PowerUpKind::Boost,
            pos: s.player.pos,
            vel: Vec2::ZERO,
            radius: POWERUP_RADIUS,
        });
        tick(&mut s, &idle(), 1_000);
        assert_eq!(s.score, SCORE_POWERUP);
        assert_eq!(s.boost.expires_at_ms, Some(1_000 + BOOST_DURATION_MS));
        assert!(s.power_ups.is_empty());

        s.jump(1_100);
        assert!((s.player.vel_y - JUMP_IMPULSE * BOOST_JUMP_MULTIPLIER).abs() < 1e-5);

        s.player.pos.y = PLAYER_START_Y;
        tick(&mut s, &idle(), 5_999);
        assert!(s.boost.is_active());
        s.player.pos.y = PLAYER_START_Y;
        s.player.vel_y = 0.0;
        tick(&mut s, &idle(), 6_000);
        assert!(!s.boost.is_active());
        s.jump(6_010);
        assert_eq!(s.player.vel_y, JUMP_IMPULSE);
    }

    #[test]
    fn test_shot_rate_limit() {
        let mut s = playing(CharacterId::Fish);
        assert!(s.shoot_projectile(0));
        assert!(!s.shoot_projectile(299));
        assert!(s.shoot_projectile(300));
        assert_eq!(s.projectiles.len(), 2);
    }

    #[test]
    fn test_triggers_ignored_outside_playing() {
        let mut s = GameSession::new(
            1,
            WorldCatalog::standard(),
            ProgressRecord::default(),
            CharacterId::Shark,
            0,
        );
        assert!(!s.use_ability(0));
        assert!(!s.shoot_projectile(0));
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_fish_has_no_ability() {
        let mut s = playing(CharacterId::Fish);
        assert!(!s.use_ability(0));
        assert!(!s.ability.active);
    }

    #[test]
    fn test_particles_settle_after_game_over() {
        let mut s = playing(CharacterId::Fish);
        s.burst(Vec2::new(100.0, 100.0));
        s.phase = GamePhase::GameOver;
        tick(&mut s, &idle(), 0);
        assert!(s.particles.iter().all(|p| p.life == PARTICLE_LIFE - 1));
    }

    #[test]
    fn test_high_score_set_on_game_over() {
        let mut s = GameSession::new(
            9,
            WorldCatalog::standard(),
            ProgressRecord::default(),
            CharacterId::Fish,
            3,
        );
        s.jump(0);
        s.score = 5;
        s.player.pos.y = PLAYFIELD_HEIGHT;
        tick(&mut s, &idle(), 16);
        assert_eq!(s.high_score.best, 5);
        assert!(s.drain_events().contains(&GameEvent::GameOver {
            score: 5,
            new_high_score: true
        }));
    }

    #[test]
    fn test_world_selection_rules() {
        let mut s = GameSession::with_seed(1);
        assert!(!s.select_world(1));
        assert!(!s.select_world(99));
        s.progress.unlocked_worlds.insert(2);
        assert!(s.select_world(2));
        assert_eq!(s.world_index(), 2);
        assert_eq!(s.level.speed, 3.0);
        assert!(!s.select_level(5));
        assert!(s.select_level(0));
    }

    #[test]
    fn test_character_locked_mid_run() {
        let mut s = playing(CharacterId::Fish);
        assert!(!s.select_character(CharacterId::Shark));
        s.phase = GamePhase::GameOver;
        assert!(s.select_character(CharacterId::Shark));
        assert_eq!(s.phase, GamePhase::Ready);
        assert_eq!(s.player.radius, 18.0);
    }

    #[test]
    fn test_reset_progress() {
        let mut s = GameSession::with_seed(1);
        s.progress.unlocked_worlds.insert(1);
        s.select_world(1);
        s.reset_progress();
        assert_eq!(s.progress, ProgressRecord::default());
        assert_eq!(s.level.speed, 2.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed: u64| {
            let mut s = GameSession::with_seed(seed);
            for t in 0..600u64 {
                let input = TickInput {
                    jump: s.player.pos.y > 320.0,
                    shoot: t % 20 == 0,
                    ..idle()
                };
                tick(&mut s, &input, t * 16);
            }
            (s.score, s.player.pos, s.obstacles.len(), s.particles.len())
        };
        assert_eq!(run(77), run(77));
    }
}
