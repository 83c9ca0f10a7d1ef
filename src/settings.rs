//! Player preferences
//!
//! Persisted separately from progress: selected character and mute flag.

use serde::{Deserialize, Serialize};

use crate::characters::CharacterId;
use crate::persistence::{KeyValueStore, Persistence, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Audio muted
    pub muted: bool,
    /// Last chosen character
    pub character: CharacterId,
}

impl Settings {
    pub fn load<S: KeyValueStore>(persistence: &Persistence<S>) -> Self {
        let settings = Self {
            muted: persistence.load_muted(),
            character: persistence.load_selected_character(),
        };
        log::info!(
            "Settings loaded (character: {}, muted: {})",
            settings.character.as_str(),
            settings.muted
        );
        settings
    }

    pub fn save<S: KeyValueStore>(
        &self,
        persistence: &mut Persistence<S>,
    ) -> Result<(), StorageError> {
        persistence.save_muted(self.muted)?;
        persistence.save_selected_character(self.character)
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}
