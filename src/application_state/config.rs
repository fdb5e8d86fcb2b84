//! # Game Configuration
//!
//! Settings read from a JSON file at startup. Every field has a default, so a
//! file only needs to name what it changes:
//!
//! ```json
//! {
//!   "dimensions": { "world_size": 4, "world_height": 1 },
//!   "generation": { "kind": "heightmap", "path": "maps/island.csv", "tree_threshold": 0.3 },
//!   "actions": [ { "action": "build", "building": "road", "x": 3, "z": 3 } ]
//! }
//! ```

use std::{fs, path::{Path, PathBuf}};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    voxels::world::{HeightmapParsing, WorldDimensions},
    PlayerAction,
};

/// Widest world, in chunks per side.
pub const MAX_WORLD_SIZE: u32 = 32;
/// Tallest world, in chunks.
pub const MAX_WORLD_HEIGHT: u32 = 8;
/// Shortest allowed time between income payouts.
pub const MIN_INCOME_INTERVAL_SECS: f32 = 0.1;

/// How the world's terrain is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationConfig {
    /// Perlin noise terrain.
    Procedural { seed: u32, tree_threshold: f32 },
    /// A CSV heightmap file.
    Heightmap {
        path: PathBuf,
        tree_threshold: f32,
        #[serde(default)]
        parsing: HeightmapParsing,
    },
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig::Procedural {
            seed: 7867,
            tree_threshold: 0.35,
        }
    }
}

/// Everything the driver needs to build and run a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dimensions: WorldDimensions,
    pub generation: GenerationConfig,
    /// Money the player starts with.
    pub starting_money: i32,
    /// Seconds between passive income payouts.
    pub income_interval_secs: f32,
    /// Frames the driver simulates after the scripted actions.
    pub simulated_frames: u32,
    /// Simulated duration of one frame, in seconds.
    pub frame_secs: f32,
    /// Player actions to replay. Empty means "lay out the demo city".
    pub actions: Vec<PlayerAction>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            dimensions: WorldDimensions::default(),
            generation: GenerationConfig::default(),
            starting_money: 100,
            income_interval_secs: 10.0,
            simulated_frames: 1800,
            frame_secs: 1.0 / 60.0,
            actions: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Parses and validates a configuration from JSON text.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(text).context("Malformed JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the world cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let WorldDimensions {
            world_size,
            world_height,
        } = self.dimensions;
        ensure!(
            (1..=MAX_WORLD_SIZE).contains(&world_size),
            "world_size must be between 1 and {MAX_WORLD_SIZE}, got {world_size}"
        );
        ensure!(
            (1..=MAX_WORLD_HEIGHT).contains(&world_height),
            "world_height must be between 1 and {MAX_WORLD_HEIGHT}, got {world_height}"
        );
        ensure!(
            self.frame_secs.is_finite() && self.frame_secs > 0.0,
            "frame_secs must be positive"
        );
        ensure!(
            self.income_interval_secs.is_finite()
                && self.income_interval_secs >= MIN_INCOME_INTERVAL_SECS,
            "income_interval_secs must be at least {MIN_INCOME_INTERVAL_SECS}"
        );
        Ok(())
    }
}
