//! World progression
//!
//! Tracks unlocked/completed worlds and the current world/level selection.
//! Persisted as a versioned JSON envelope; anything unreadable decodes to
//! the default record instead of failing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::worlds::WorldCatalog;

/// Current on-disk schema version
pub const PROGRESS_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub version: u32,
    /// Always contains world 0, only ever grows
    pub unlocked_worlds: BTreeSet<usize>,
    pub completed_worlds: BTreeSet<usize>,
    pub current_world: usize,
    pub current_level: usize,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            version: PROGRESS_VERSION,
            unlocked_worlds: BTreeSet::from([0]),
            completed_worlds: BTreeSet::new(),
            current_world: 0,
            current_level: 0,
        }
    }
}

impl ProgressRecord {
    /// Decode a stored record.
    ///
    /// Missing fields take their defaults. Garbage or a newer schema version
    /// yields a fresh record.
    pub fn decode(json: &str, catalog: &WorldCatalog) -> Self {
        let record = match serde_json::from_str::<ProgressRecord>(json) {
            Ok(record) if record.version <= PROGRESS_VERSION => record,
            Ok(record) => {
                log::warn!(
                    "Ignoring progress with unsupported version {} (expected {})",
                    record.version,
                    PROGRESS_VERSION
                );
                return Self::default();
            }
            Err(err) => {
                log::warn!("Discarding unreadable progress: {}", err);
                return Self::default();
            }
        };
        record.normalized(catalog)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Repair invariants against the catalog
    pub fn normalized(mut self, catalog: &WorldCatalog) -> Self {
        self.version = PROGRESS_VERSION;
        self.unlocked_worlds.retain(|&i| i < catalog.len());
        self.unlocked_worlds.insert(0);
        self.completed_worlds.retain(|&i| i < catalog.len());

        if !self.unlocked_worlds.contains(&self.current_world) {
            self.current_world = 0;
            self.current_level = 0;
        }
        let level_count = catalog
            .get(self.current_world)
            .map(|w| w.levels.len())
            .unwrap_or(1);
        if self.current_level >= level_count {
            self.current_level = 0;
        }
        self
    }

    pub fn is_unlocked(&self, world: usize) -> bool {
        self.unlocked_worlds.contains(&world)
    }

    pub fn is_completed(&self, world: usize) -> bool {
        self.completed_worlds.contains(&world)
    }

    /// Select an unlocked world (level resets to 0). Locked worlds are refused.
    pub fn select_world(&mut self, world: usize) -> bool {
        if !self.is_unlocked(world) {
            return false;
        }
        self.current_world = world;
        self.current_level = 0;
        true
    }

    /// Mark the current world completed and unlock its successor.
    ///
    /// Returns the newly reachable world index, if the catalog has one.
    pub fn complete_current(&mut self, catalog: &WorldCatalog) -> Option<usize> {
        self.completed_worlds.insert(self.current_world);
        let next = catalog.next_index(self.current_world)?;
        if self.unlocked_worlds.insert(next) {
            log::info!("Unlocked world {}", next);
        }
        Some(next)
    }

    /// Whether every world in the catalog has been completed
    pub fn all_completed(&self, catalog: &WorldCatalog) -> bool {
        (0..catalog.len()).all(|i| self.completed_worlds.contains(&i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_world_zero_only() {
        let record = ProgressRecord::default();
        assert!(record.is_unlocked(0));
        assert!(!record.is_unlocked(1));
        assert_eq!(record.current_world, 0);
    }

    #[test]
    fn test_decode_garbage_falls_back() {
        let catalog = WorldCatalog::standard();
        assert_eq!(
            ProgressRecord::decode("{not json", &catalog),
            ProgressRecord::default()
        );
        assert_eq!(ProgressRecord::decode("", &catalog), ProgressRecord::default());
    }

    #[test]
    fn test_decode_future_version_falls_back() {
        let catalog = WorldCatalog::standard();
        let json = r#"{"version": 99, "unlocked_worlds": [0, 1, 2]}"#;
        assert_eq!(ProgressRecord::decode(json, &catalog), ProgressRecord::default());
    }

    #[test]
    fn test_decode_missing_fields_use_defaults() {
        let catalog = WorldCatalog::standard();
        let record = ProgressRecord::decode(r#"{"unlocked_worlds": [2]}"#, &catalog);
        assert!(record.is_unlocked(0));
        assert!(record.is_unlocked(2));
        assert!(record.completed_worlds.is_empty());
        assert_eq!(record.version, PROGRESS_VERSION);
    }

    #[test]
    fn test_decode_repairs_locked_selection() {
        let catalog = WorldCatalog::standard();
        let json = r#"{"version":1,"unlocked_worlds":[0],"completed_worlds":[],"current_world":3,"current_level":0}"#;
        let record = ProgressRecord::decode(json, &catalog);
        assert_eq!(record.current_world, 0);

        let json = r#"{"unlocked_worlds":[0, 1, 42],"current_world":1,"current_level":7}"#;
        let record = ProgressRecord::decode(json, &catalog);
        assert_eq!(record.current_world, 1);
        assert_eq!(record.current_level, 0);
        assert!(!record.is_unlocked(42));
    }

    #[test]
    fn test_select_world_requires_unlock() {
        let mut record = ProgressRecord::default();
        assert!(!record.select_world(1));
        record.unlocked_worlds.insert(1);
        record.current_level = 3;
        assert!(record.select_world(1));
        assert_eq!(record.current_world, 1);
        assert_eq!(record.current_level, 0);
    }

    #[test]
    fn test_complete_last_world() {
        let catalog = WorldCatalog::standard();
        let mut record = ProgressRecord::default();
        record.unlocked_worlds.extend(0..5);
        record.current_world = 4;
        assert_eq!(record.complete_current(&catalog), None);
        assert!(record.is_completed(4));
        assert!(!record.all_completed(&catalog));
    }

    #[test]
    fn test_encode_decode_is_stable() {
        let catalog = WorldCatalog::standard();
        let mut record = ProgressRecord::default();
        record.complete_current(&catalog);
        record.select_world(1);

        let json = record.encode().unwrap();
        let decoded = ProgressRecord::decode(&json, &catalog);
        assert_eq!(decoded, record);
        assert_eq!(decoded.encode().unwrap(), json);
    }
}
