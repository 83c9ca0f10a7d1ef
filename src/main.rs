//! Reef Dash entry point
//!
//! Native builds run a headless autopilot demo and print the final frame.
//! The browser build is driven from JavaScript through `WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::env;
    use std::path::PathBuf;
    use std::str::FromStr;

    use reef_dash::CharacterId;
    use reef_dash::consts::*;
    use reef_dash::persistence::FileStore;
    use reef_dash::platform::GameDriver;
    use reef_dash::renderer::{Renderer, TextRenderer};
    use reef_dash::sim::{GameEvent, GamePhase, GameSession, TickInput};

    /// Demo settings from `REEF_DASH_*` environment variables
    pub struct DemoConfig {
        pub seed: u64,
        pub character: Option<CharacterId>,
        pub ticks: u64,
        pub save_dir: PathBuf,
    }

    fn env_or<T: FromStr>(key: &str, default: T) -> T {
        match env::var(key) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid {}={:?}", key, raw);
                default
            }),
            Err(_) => default,
        }
    }

    impl DemoConfig {
        pub fn from_env() -> Self {
            Self {
                seed: env_or("REEF_DASH_SEED", 0xC0FFEE),
                character: env::var("REEF_DASH_CHARACTER")
                    .ok()
                    .map(|raw| CharacterId::from_str_or_default(&raw)),
                ticks: env_or("REEF_DASH_TICKS", 60 * TICK_RATE as u64),
                save_dir: env::var_os("REEF_DASH_SAVE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".reef-dash")),
            }
        }
    }

    /// Aim for the middle of the next gap, shoot at bosses, break when close
    fn autopilot(session: &GameSession) -> TickInput {
        let player = &session.player;
        let next_gap = session
            .obstacles
            .iter()
            .filter(|o| o.trailing_edge() >= player.pos.x - player.radius)
            .min_by(|a, b| a.x.total_cmp(&b.x));
        let target_y = next_gap.map_or(PLAYFIELD_HEIGHT / 2.0, |o| {
            (o.gap_top + o.gap_bottom) / 2.0
        });
        let close_call = next_gap.is_some_and(|o| o.x - player.pos.x < 60.0);

        TickInput {
            jump: session.phase == GamePhase::Ready
                || (player.pos.y > target_y + 10.0 && player.vel_y > 0.0),
            use_ability: close_call || session.boss_active(),
            shoot: session.boss_active(),
            reset: session.phase == GamePhase::GameOver,
        }
    }

    pub fn run(config: DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
        let store = FileStore::open(&config.save_dir)?;
        log::debug!("Save directory {}", store.dir().display());
        let mut driver = GameDriver::new(config.seed, store);
        if let Some(id) = config.character {
            driver.select_character(id)?;
        }
        log::info!(
            "Demo: {} ticks as {} (saves in {})",
            config.ticks,
            driver.session().character.as_str(),
            config.save_dir.display()
        );

        let mut runs = 0u32;
        let mut best_run = 0u64;
        for t in 0..config.ticks {
            let now_ms = (t as f64 * TICK_MS) as u64;
            let input = autopilot(driver.session());
            for event in driver.step(&input, now_ms) {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        runs += 1;
                        best_run = best_run.max(score);
                    }
                    GameEvent::GameCompleted => log::info!("Every world cleared"),
                    _ => {}
                }
            }
            // Sounds have nowhere to go in a terminal
            driver.drain_sounds();
        }

        let mut renderer = TextRenderer::default();
        let end_ms = (config.ticks as f64 * TICK_MS) as u64;
        renderer.draw(&driver.session().snapshot(end_ms));
        println!("{}", renderer.frame());
        println!(
            "{} finished runs, best {} this session, all-time {}",
            runs,
            best_run,
            driver.session().high_score.best
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Reef Dash (native) starting...");

    let config = demo::DemoConfig::from_env();
    if let Err(err) = demo::run(config) {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}
