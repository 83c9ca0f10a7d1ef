//! Save/load persistence
//!
//! Features:
//! - Pluggable key-value backends (memory, JSON files, LocalStorage)
//! - Whole-record overwrite, no partial updates
//! - Missing or corrupt records decode to defaults

pub mod store;

pub use store::{FileStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;

use thiserror::Error;

use crate::characters::CharacterId;
use crate::progress::ProgressRecord;
use crate::worlds::WorldCatalog;

/// Storage keys
pub mod keys {
    pub const PROGRESS: &str = "progress";
    pub const HIGH_SCORE: &str = "high_score";
    pub const CHARACTER: &str = "character";
    pub const MUTED: &str = "muted";
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Typed save/load contract over a key-value backend
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_progress(&self, catalog: &WorldCatalog) -> ProgressRecord {
        match self.store.get(keys::PROGRESS) {
            Some(json) => ProgressRecord::decode(&json, catalog),
            None => {
                log::info!("No saved progress, starting fresh");
                ProgressRecord::default()
            }
        }
    }

    pub fn save_progress(&mut self, record: &ProgressRecord) -> Result<(), StorageError> {
        let json = record.encode()?;
        self.store.set(keys::PROGRESS, &json)?;
        log::debug!("Progress saved ({} worlds unlocked)", record.unlocked_worlds.len());
        Ok(())
    }

    /// Wipe saved progress (back to world 0 only)
    pub fn reset_progress(&mut self) -> Result<(), StorageError> {
        self.store.remove(keys::PROGRESS)
    }

    pub fn load_high_score(&self) -> u64 {
        self.store
            .get(keys::HIGH_SCORE)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save_high_score(&mut self, score: u64) -> Result<(), StorageError> {
        self.store.set(keys::HIGH_SCORE, &score.to_string())
    }

    pub fn load_selected_character(&self) -> CharacterId {
        self.store
            .get(keys::CHARACTER)
            .map(|s| CharacterId::from_str_or_default(&s))
            .unwrap_or_default()
    }

    /// Whether a character was ever chosen (first launch shows the picker)
    pub fn has_selected_character(&self) -> bool {
        self.store.get(keys::CHARACTER).is_some()
    }

    pub fn save_selected_character(&mut self, id: CharacterId) -> Result<(), StorageError> {
        self.store.set(keys::CHARACTER, id.as_str())
    }

    pub fn load_muted(&self) -> bool {
        self.store
            .get(keys::MUTED)
            .map(|s| s.trim() == "true")
            .unwrap_or(false)
    }

    pub fn save_muted(&mut self, muted: bool) -> Result<(), StorageError> {
        self.store.set(keys::MUTED, if muted { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::default())
    }

    #[test]
    fn test_defaults_when_empty() {
        let p = persistence();
        let catalog = WorldCatalog::standard();
        assert_eq!(p.load_progress(&catalog), ProgressRecord::default());
        assert_eq!(p.load_high_score(), 0);
        assert_eq!(p.load_selected_character(), CharacterId::Fish);
        assert!(!p.has_selected_character());
        assert!(!p.load_muted());
    }

    #[test]
    fn test_save_load_progress_is_idempotent() {
        let catalog = WorldCatalog::standard();
        let mut p = persistence();
        let mut record = ProgressRecord::default();
        record.complete_current(&catalog);
        p.save_progress(&record).unwrap();

        let first = p.store().get(keys::PROGRESS).unwrap();
        let loaded = p.load_progress(&catalog);
        p.save_progress(&loaded).unwrap();
        let second = p.store().get(keys::PROGRESS).unwrap();

        assert_eq!(loaded, record);
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let catalog = WorldCatalog::standard();
        let mut store = MemoryStore::default();
        store.set(keys::PROGRESS, "]]]").unwrap();
        store.set(keys::HIGH_SCORE, "lots").unwrap();
        store.set(keys::CHARACTER, "whale").unwrap();
        store.set(keys::MUTED, "maybe").unwrap();
        let p = Persistence::new(store);

        assert_eq!(p.load_progress(&catalog), ProgressRecord::default());
        assert_eq!(p.load_high_score(), 0);
        assert_eq!(p.load_selected_character(), CharacterId::Fish);
        assert!(!p.load_muted());
    }

    #[test]
    fn test_scalar_round_trips() {
        let mut p = persistence();
        p.save_high_score(42).unwrap();
        p.save_selected_character(CharacterId::Jellyfish).unwrap();
        p.save_muted(true).unwrap();

        assert_eq!(p.load_high_score(), 42);
        assert_eq!(p.load_selected_character(), CharacterId::Jellyfish);
        assert!(p.load_muted());
    }

    #[test]
    fn test_reset_progress() {
        let catalog = WorldCatalog::standard();
        let mut p = persistence();
        let mut record = ProgressRecord::default();
        record.complete_current(&catalog);
        p.save_progress(&record).unwrap();
        p.reset_progress().unwrap();
        assert_eq!(p.load_progress(&catalog), ProgressRecord::default());
    }
}
