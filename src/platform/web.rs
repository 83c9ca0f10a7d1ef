//! Browser bindings
//!
//! The page owns the canvas, DOM and audio; it drives `WebGame` from its
//! animation frame callback and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use super::GameDriver;
use crate::characters::CharacterId;
use crate::persistence::LocalStorageStore;
use crate::sim::TickInput;

const STORAGE_PREFIX: &str = "reef_dash_";

#[wasm_bindgen]
pub struct WebGame {
    driver: GameDriver<LocalStorageStore>,
    /// Triggers buffered until the next tick
    input: TickInput,
    last_now_ms: u64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebGame {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            // Already initialized by an earlier instance
            log::debug!("Logger already set");
        }
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let driver = GameDriver::new(seed, LocalStorageStore::new(STORAGE_PREFIX));
        log::info!("Reef Dash ready (seed {})", seed);
        WebGame {
            driver,
            input: TickInput::default(),
            last_now_ms: 0,
        }
    }

    /// Advance one tick. `now_ms` is the page clock (e.g. `performance.now()`).
    /// Returns the tick's sound cues as JSON.
    pub fn tick(&mut self, now_ms: f64) -> String {
        let now_ms = now_ms.max(0.0) as u64;
        self.last_now_ms = now_ms;
        let input = std::mem::take(&mut self.input);
        self.driver.step(&input, now_ms);
        serde_json::to_string(&self.driver.drain_sounds()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    pub fn use_ability(&mut self) {
        self.input.use_ability = true;
    }

    pub fn shoot(&mut self) {
        self.input.shoot = true;
    }

    pub fn reset(&mut self) {
        self.input.reset = true;
    }

    pub fn select_world(&mut self, index: usize) -> bool {
        self.driver.select_world(index).unwrap_or_else(|err| {
            log::warn!("World selected but not saved: {}", err);
            true
        })
    }

    pub fn select_level(&mut self, index: usize) -> bool {
        self.driver.select_level(index).unwrap_or_else(|err| {
            log::warn!("Level selected but not saved: {}", err);
            true
        })
    }

    /// Unknown ids fall back to the default character
    pub fn select_character(&mut self, id: &str) -> bool {
        let id = CharacterId::from_str_or_default(id);
        self.driver.select_character(id).unwrap_or_else(|err| {
            log::warn!("Character selected but not saved: {}", err);
            true
        })
    }

    pub fn toggle_mute(&mut self) -> bool {
        match self.driver.toggle_mute() {
            Ok(muted) => muted,
            Err(err) => {
                log::warn!("Mute toggled but not saved: {}", err);
                self.driver.settings().muted
            }
        }
    }

    pub fn reset_progress(&mut self) {
        if let Err(err) = self.driver.reset_progress() {
            log::warn!("Failed to clear saved progress: {}", err);
        }
    }

    /// Current frame as JSON for the page's renderer
    pub fn snapshot_json(&self) -> String {
        let snapshot = self.driver.session().snapshot(self.last_now_ms);
        match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize snapshot: {}", err);
                String::from("null")
            }
        }
    }

    /// Static world table as JSON (for world select screens)
    pub fn worlds_json(&self) -> String {
        let session = self.driver.session();
        let worlds: Vec<_> = session
            .catalog()
            .iter()
            .enumerate()
            .map(|(i, w)| {
                serde_json::json!({
                    "index": i,
                    "name": w.name,
                    "theme": w.theme,
                    "unlocked": session.progress.is_unlocked(i),
                    "completed": session.progress.is_completed(i),
                })
            })
            .collect();
        serde_json::Value::Array(worlds).to_string()
    }
}
