//! # Terrain Generation
//!
//! Two ways to fill a world, both of which reset it first and finish with
//! [`World::create`]:
//!
//! - [`World::generate`]: a low, island-like landscape from 2D noise
//! - [`World::generate_from_file`]: a hand-made CSV heightmap
//!
//! Both scatter trees from a second noise sample taken at twice the terrain
//! frequency.

use std::{fs, path::Path};

use anyhow::{bail, Context};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    economy::building::Building,
    voxels::{
        block::block_type::BlockId,
        noise_oracle::{NoiseOracle, PerlinOracle},
    },
};

use super::World;

/// Highest column the procedural generator produces.
const MAX_TERRAIN_HEIGHT: i32 = 7;
/// Noise is remapped to `0..TERRAIN_AMPLITUDE` before flooring.
const TERRAIN_AMPLITUDE: f32 = 6.0;
/// The world width is divided by this to get the noise scale.
const NOISE_SCALE_DIVISOR: f32 = 2.5;

/// How malformed heightmap cells are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightmapParsing {
    /// Any unparsable cell aborts loading.
    #[default]
    Strict,
    /// Unparsable cells read as `0`.
    Lenient,
}

impl World {
    fn noise_scale(&self) -> f32 {
        self.dimensions.width_in_blocks() as f32 / NOISE_SCALE_DIVISOR
    }

    /// Writes a block without dirtying; generation dirties everything anyway.
    fn set_cube(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        if let Some(cube) = self.get_cube_mut(x, y, z) {
            *cube = block;
        }
    }

    /// Generates terrain from Perlin noise seeded with `seed`.
    ///
    /// # Arguments
    /// * `seed` - Seed of both the terrain and the tree noise
    /// * `tree_threshold` - Tree noise samples above this grow a tree
    pub fn generate(&mut self, seed: u32, tree_threshold: f32) {
        let oracle = PerlinOracle::new(seed);
        self.generate_with(&oracle, &oracle, tree_threshold);
        info!(
            "Generated procedural world (seed {seed}, {} trees)",
            self.positions_of(Building::TREE).len()
        );
    }

    /// Generates terrain from arbitrary noise fields.
    ///
    /// For each column, `n = terrain(x / scale, z / scale)` with
    /// `scale = width / 2.5` gives `height = floor((n + 1) / 2 * 6)`. Columns of
    /// height 0 or 1 become sand under a single water block. Taller columns
    /// stack sand, grass up to `y = 2`, then stone. Land columns no higher than
    /// 3 get a tree on top when `trees(2x / scale, 2z / scale)` exceeds
    /// `tree_threshold`.
    pub fn generate_with(
        &mut self,
        terrain: &dyn NoiseOracle,
        trees: &dyn NoiseOracle,
        tree_threshold: f32,
    ) {
        self.reset();

        let width = self.dimensions.width_in_blocks();
        let scale = self.noise_scale();

        for x in 0..width {
            for z in 0..width {
                let (nx, nz) = (x as f32 / scale, z as f32 / scale);
                let noise = terrain.noise2d(nx, nz);
                let height = ((((noise + 1.0) / 2.0) * TERRAIN_AMPLITUDE).floor() as i32)
                    .clamp(0, MAX_TERRAIN_HEIGHT);

                if height <= 1 {
                    self.set_cube(x, 0, z, BlockId::SAND);
                    self.set_cube(x, 1, z, BlockId::WATER);
                    continue;
                }

                for y in 0..height {
                    let block = match y {
                        0 => BlockId::SAND,
                        1 | 2 => BlockId::GRASS,
                        _ => BlockId::STONE,
                    };
                    self.set_cube(x, y, z, block);
                }

                if height <= 3 && trees.noise2d(nx * 2.0, nz * 2.0) > tree_threshold {
                    self.place_building(Building::TREE, x, height, z);
                }
            }
        }

        self.create();
    }

    /// Generates terrain from a CSV heightmap file.
    ///
    /// Each line is a row of constant `z`, each comma-separated cell a column
    /// of increasing `x`. A cell value `1` means open water, `0` a single layer
    /// of land and any other value that many layers. Trees are seeded from the
    /// path and may grow on columns one or two layers high.
    ///
    /// # Returns
    /// An error if the file cannot be read or, with
    /// [`HeightmapParsing::Strict`], if a cell is not an integer. On error the
    /// world is left empty.
    pub fn generate_from_file(
        &mut self,
        path: impl AsRef<Path>,
        tree_threshold: f32,
        parsing: HeightmapParsing,
    ) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.reset();

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read heightmap {}", path.display()))?;
        let heights = parse_heightmap(&text, parsing)
            .with_context(|| format!("Failed to parse heightmap {}", path.display()))?;

        let trees = PerlinOracle::from_text(&path.to_string_lossy());
        self.apply_heightmap(&heights, &trees, tree_threshold);

        info!(
            "Generated world from {} ({} rows, {} trees)",
            path.display(),
            heights.len(),
            self.positions_of(Building::TREE).len()
        );
        Ok(())
    }

    /// Builds terrain from already parsed heightmap rows. The world is reset
    /// first and created afterwards.
    ///
    /// Heights taller than the world are cut off at its top block.
    pub fn generate_from_heights(
        &mut self,
        heights: &[Vec<i32>],
        trees: &dyn NoiseOracle,
        tree_threshold: f32,
    ) {
        self.reset();
        self.apply_heightmap(heights, trees, tree_threshold);
    }

    fn apply_heightmap(
        &mut self,
        heights: &[Vec<i32>],
        trees: &dyn NoiseOracle,
        tree_threshold: f32,
    ) {
        let width = self.dimensions.width_in_blocks();
        let top = self.dimensions.height_in_blocks() - 1;
        let scale = self.noise_scale();
        let mut clipped = 0usize;

        if heights.len() > width as usize || heights.iter().any(|row| row.len() > width as usize) {
            warn!("Heightmap exceeds the {width}x{width} world footprint, extra cells ignored");
        }

        for (z, row) in heights.iter().enumerate().take(width as usize) {
            let z = z as i32;
            for (x, &value) in row.iter().enumerate().take(width as usize) {
                let x = x as i32;
                let height = match value {
                    1 => 0,
                    0 => 1,
                    n if n > top => {
                        clipped += 1;
                        top
                    }
                    n => n,
                };

                self.set_cube(x, 0, z, BlockId::SAND);
                for y in 1..=height {
                    self.set_cube(x, y, z, if y < 3 { BlockId::GRASS } else { BlockId::STONE });
                }

                if height == 0 {
                    self.set_cube(x, 1, z, BlockId::WATER);
                } else if (1..=2).contains(&height)
                    && trees.noise2d(2.0 * x as f32 / scale, 2.0 * z as f32 / scale)
                        > tree_threshold
                {
                    self.place_building(Building::TREE, x, height + 1, z);
                }
            }
        }

        if clipped > 0 {
            warn!("{clipped} heightmap cells exceed the world height of {}, cut off", top + 1);
        }
        self.create();
    }
}

/// Splits heightmap text into rows of integers.
///
/// Blank lines are skipped and cells are trimmed. With
/// [`HeightmapParsing::Lenient`] unparsable cells read as `0`.
pub fn parse_heightmap(text: &str, parsing: HeightmapParsing) -> anyhow::Result<Vec<Vec<i32>>> {
    let mut rows = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for (column, cell) in line.split(',').enumerate() {
            let cell = cell.trim();
            let value = match (cell.parse::<i32>(), parsing) {
                (Ok(value), _) => value,
                (Err(_), HeightmapParsing::Lenient) => 0,
                (Err(e), HeightmapParsing::Strict) => {
                    bail!(
                        "line {}, column {}: invalid height {cell:?} ({e})",
                        line_number + 1,
                        column + 1
                    )
                }
            };
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}
