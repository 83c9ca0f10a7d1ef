//! World catalog
//!
//! Immutable, ordered table of themed worlds. Each world bundles its colors,
//! one or more level presets and the boss that gates progression.

use serde::{Deserialize, Serialize};

/// Boss movement/attack script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossPattern {
    /// Vertical bounce, single shots
    Basic,
    /// Sine sway, three-way vertical spread
    Tentacles,
    /// Circular orbit, spiral shots
    Whirlpool,
    /// Fast bounce, staggered three-shot bursts
    Mechanical,
    /// Lissajous drift, eight-way rings
    Final,
}

impl BossPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            BossPattern::Basic => "basic",
            BossPattern::Tentacles => "tentacles",
            BossPattern::Whirlpool => "whirlpool",
            BossPattern::Mechanical => "mechanical",
            BossPattern::Final => "final",
        }
    }
}

/// Gradient pair (CSS hex colors, consumed by renderers only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: String,
    pub secondary: String,
}

impl ColorPair {
    fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        }
    }
}

/// Difficulty preset for one level of a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub difficulty: String,
    /// Obstacle scroll speed (pixels per tick)
    pub speed: f32,
    /// Vertical opening between barriers
    pub gap_size: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDefinition {
    pub name: String,
    pub max_health: u32,
    pub pattern: BossPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDefinition {
    pub id: u32,
    pub name: String,
    pub theme: String,
    /// Background gradient (top, bottom)
    pub background: ColorPair,
    /// Obstacle colors (fill, stroke)
    pub obstacle: ColorPair,
    pub levels: Vec<LevelDefinition>,
    pub boss: BossDefinition,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self {
            name: "Bubble Dash Reefs".to_string(),
            difficulty: "easy".to_string(),
            speed: 2.0,
            gap_size: 150.0,
            spawn_interval: 90,
        }
    }
}

impl WorldDefinition {
    pub fn level(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }
}

/// Ordered world table
#[derive(Debug, Clone, PartialEq)]
pub struct WorldCatalog {
    worlds: Vec<WorldDefinition>,
}

impl WorldCatalog {
    /// Build a catalog from explicit definitions.
    ///
    /// Worlds without levels are dropped; a catalog always needs a playable world 0.
    pub fn new(worlds: Vec<WorldDefinition>) -> Option<Self> {
        let worlds: Vec<_> = worlds.into_iter().filter(|w| !w.levels.is_empty()).collect();
        if worlds.is_empty() {
            return None;
        }
        Some(Self { worlds })
    }

    /// The five shipped worlds
    pub fn standard() -> Self {
        let world = |id: u32,
                     name: &str,
                     theme: &str,
                     background: (&str, &str),
                     obstacle: (&str, &str),
                     level: (&str, &str, f32, f32, u64),
                     boss: (&str, u32, BossPattern)| WorldDefinition {
            id,
            name: name.to_string(),
            theme: theme.to_string(),
            background: ColorPair::new(background.0, background.1),
            obstacle: ColorPair::new(obstacle.0, obstacle.1),
            levels: vec![LevelDefinition {
                name: level.0.to_string(),
                difficulty: level.1.to_string(),
                speed: level.2,
                gap_size: level.3,
                spawn_interval: level.4,
            }],
            boss: BossDefinition {
                name: boss.0.to_string(),
                max_health: boss.1,
                pattern: boss.2,
            },
        };

        Self {
            worlds: vec![
                world(
                    1,
                    "Coral Gardens",
                    "Colorful reefs",
                    ("#87CEEB", "#E0F6FF"),
                    ("#FF6B9D", "#FF1493"),
                    ("Bubble Dash Reefs", "easy", 2.0, 150.0, 90),
                    ("Mini Pipe", 3, BossPattern::Basic),
                ),
                world(
                    2,
                    "Kelp Forest",
                    "Twisted kelp",
                    ("#2F4F2F", "#90EE90"),
                    ("#228B22", "#006400"),
                    ("Twisty Kelp Trails", "medium", 2.5, 140.0, 85),
                    ("Kelp Kraken", 5, BossPattern::Tentacles),
                ),
                world(
                    3,
                    "Sunken Ruins",
                    "Drowned ruins",
                    ("#1C1C3C", "#4A5568"),
                    ("#708090", "#2F4F4F"),
                    ("Thunder Currents", "hard", 3.0, 130.0, 80),
                    ("Storm Vortex", 7, BossPattern::Whirlpool),
                ),
                world(
                    4,
                    "Abyss Factory",
                    "Deep-sea factories",
                    ("#0A0A0A", "#1A1A2E"),
                    ("#4A4A4A", "#FF4500"),
                    ("Gear Swim", "expert", 3.5, 120.0, 75),
                    ("Mech Pipe", 10, BossPattern::Mechanical),
                ),
                world(
                    5,
                    "Pipe Depths",
                    "Final fortress",
                    ("#8B0000", "#FF4500"),
                    ("#DC143C", "#8B0000"),
                    ("Lava Vents", "extreme", 4.0, 110.0, 70),
                    ("Pipe Lord", 15, BossPattern::Final),
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WorldDefinition> {
        self.worlds.get(index)
    }

    /// Index of the world after `index`, if the catalog has one
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.worlds.len()).then_some(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldDefinition> {
        self.worlds.iter()
    }
}

impl Default for WorldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
