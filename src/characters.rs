//! Playable character registry
//!
//! Characters are plain data. Gameplay branches on the capability flags
//! (`can_break_obstacles`, `has_slow_fall`) rather than on the variant.

use serde::{Deserialize, Serialize};

/// Stable character identifier (persisted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    #[default]
    Fish,
    Shark,
    Jellyfish,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Fish, CharacterId::Shark, CharacterId::Jellyfish];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Fish => "fish",
            CharacterId::Shark => "shark",
            CharacterId::Jellyfish => "jellyfish",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fish" => Some(CharacterId::Fish),
            "shark" => Some(CharacterId::Shark),
            "jellyfish" | "jelly" => Some(CharacterId::Jellyfish),
            _ => None,
        }
    }

    /// Parse an id, falling back to the default character for unknown input
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn character(&self) -> &'static Character {
        match self {
            CharacterId::Fish => &FISH,
            CharacterId::Shark => &SHARK,
            CharacterId::Jellyfish => &JELLYFISH,
        }
    }
}

/// Cooldown-gated special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ability {
    pub name: &'static str,
    pub cooldown_ms: u64,
    pub duration_ms: u64,
}

/// Immutable character descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: &'static str,
    pub description: &'static str,
    /// Hitbox radius
    pub radius: f32,
    pub can_break_obstacles: bool,
    pub has_slow_fall: bool,
    pub ability: Option<Ability>,
}

pub const FISH: Character = Character {
    id: CharacterId::Fish,
    name: "Ordinary Fish",
    description: "Quick and nimble",
    radius: 15.0,
    can_break_obstacles: false,
    has_slow_fall: false,
    ability: None,
};

pub const SHARK: Character = Character {
    id: CharacterId::Shark,
    name: "Shark",
    description: "Powerful and fearsome",
    radius: 18.0,
    can_break_obstacles: true,
    has_slow_fall: false,
    ability: Some(Ability {
        name: "Pipe Breaker",
        cooldown_ms: 5000,
        duration_ms: 5000,
    }),
};

pub const JELLYFISH: Character = Character {
    id: CharacterId::Jellyfish,
    name: "Jellyfish",
    description: "Drifts gently",
    radius: 16.0,
    can_break_obstacles: false,
    has_slow_fall: true,
    ability: Some(Ability {
        name: "Slow Float",
        cooldown_ms: 4000,
        duration_ms: 6000,
    }),
};

/// All characters in menu order
pub fn all() -> impl Iterator<Item = &'static Character> {
    CharacterId::ALL.iter().map(|id| id.character())
}
