//! # Engine State Module
//!
//! The core engine module that owns a running city: the voxel world, the
//! player's treasury and block editor, and the render state handed to every
//! draw.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `economy` - Building types, prices and the treasury
//! * `rendering` - Geometry, render passes and the renderer interface
//! * `voxels` - Blocks, chunks, world generation and editing
//!
//! ## Frame Flow
//!
//! Each frame runs one update phase then one draw phase, on one thread:
//! 1. Player actions are applied ([`EngineState::apply`])
//! 2. Time advances and income is paid ([`EngineState::update`])
//! 3. Dirty chunks are remeshed and geometry is submitted ([`EngineState::draw`])

use anyhow::Context;
use cgmath::{Point3, Vector3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use economy::{Building, PlacementError, Treasury};
use rendering::{RenderContext, Renderer, Visibility};
use voxels::{
    block::{block_type::BlockId, BlockTypeSize},
    world::{raycast::is_walkable, BlockEditor, World},
};

use crate::application_state::config::{GameConfig, GenerationConfig};

pub mod economy;
pub mod rendering;
pub mod voxels;

/// How far block picking reaches, in blocks.
pub const PICK_DISTANCE: f32 = 120.0;

/// Something the player asks the engine to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Buy a building and seat it on top of column `(x, z)`.
    Build { building: Building, x: i32, z: i32 },
    /// Pay to demolish the building on column `(x, z)`.
    Demolish { x: i32, z: i32 },
    /// Clear the first block along a ray.
    BreakBlock {
        origin: [f32; 3],
        direction: [f32; 3],
    },
    /// Place the selected block against the first block along a ray.
    PlaceBlock {
        origin: [f32; 3],
        direction: [f32; 3],
    },
    /// Change the block the editor places.
    SelectBlock { block: BlockTypeSize },
}

/// The main state container for a running city.
pub struct EngineState {
    /// The voxel world with its buildings
    pub world: World,
    /// The player's money
    pub treasury: Treasury,
    /// The block placed by `PlaceBlock`
    pub editor: BlockEditor,
    /// Pipeline state for each pass
    pub render_context: RenderContext,
    /// Simulated seconds since creation
    elapsed: f32,
    /// Frames drawn since creation
    frames: u64,
}

impl EngineState {
    /// Builds the world described by `config` and meshes it.
    ///
    /// # Returns
    /// An error if the heightmap named by the configuration cannot be loaded.
    pub fn new(config: &GameConfig) -> anyhow::Result<Self> {
        let mut world = World::new(config.dimensions);
        match &config.generation {
            GenerationConfig::Procedural { seed, tree_threshold } => {
                world.generate(*seed, *tree_threshold);
            }
            GenerationConfig::Heightmap {
                path,
                tree_threshold,
                parsing,
            } => {
                world
                    .generate_from_file(path, *tree_threshold, *parsing)
                    .context("Failed to generate the world")?;
            }
        }

        Ok(EngineState {
            world,
            treasury: Treasury::new(config.starting_money, config.income_interval_secs),
            editor: BlockEditor::default(),
            render_context: RenderContext::default(),
            elapsed: 0.0,
            frames: 0,
        })
    }

    /// Applies one player action.
    ///
    /// # Returns
    /// Why the action had no effect, if it did not.
    pub fn apply(&mut self, action: &PlayerAction) -> anyhow::Result<()> {
        match *action {
            PlayerAction::Build { building, x, z } => {
                let y = self
                    .world
                    .surface_height(x, z)
                    .ok_or(PlacementError::OutOfBounds)?;
                let money = self.treasury.try_place(&mut self.world, building, x, y, z)?;
                debug!("{building:?} at ({x}, {y}, {z}), {money} left");
            }
            PlayerAction::Demolish { x, z } => {
                let position = self
                    .world
                    .building_position(x, z)
                    .ok_or(PlacementError::NothingToDemolish)?;
                self.treasury
                    .try_demolish(&mut self.world, position.x, position.y, position.z)?;
            }
            PlayerAction::BreakBlock { origin, direction } => {
                let (origin, direction) = checked_ray(origin, direction)?;
                let hit = self
                    .world
                    .pick(origin, direction, PICK_DISTANCE)
                    .context("No block to break")?;
                self.editor.break_block(&mut self.world, &hit);
            }
            PlayerAction::PlaceBlock { origin, direction } => {
                let (origin, direction) = checked_ray(origin, direction)?;
                let hit = self
                    .world
                    .pick(origin, direction, PICK_DISTANCE)
                    .context("No block to place against")?;
                anyhow::ensure!(
                    self.editor.place_block(&mut self.world, &hit),
                    "No room to place a block at {:?}",
                    hit.position
                );
            }
            PlayerAction::SelectBlock { block } => {
                let block = BlockId::from_raw(block)
                    .filter(|id| !id.is_empty() && *id != BlockId::COUNT)
                    .with_context(|| format!("Invalid block id {block}"))?;
                self.editor.select(block);
            }
        }
        Ok(())
    }

    /// Advances simulated time by `dt` seconds.
    ///
    /// # Returns
    /// Income paid during this update.
    pub fn update(&mut self, dt: f32) -> i32 {
        self.elapsed += dt;
        self.treasury.tick(&self.world, dt)
    }

    /// Submits one frame of geometry to `renderer`.
    pub fn draw(&mut self, visibility: &dyn Visibility, renderer: &mut dyn Renderer) {
        self.world.draw(&self.render_context, visibility, renderer);
        self.frames += 1;
        if self.frames % 600 == 0 {
            info!(
                "Frame {}: money {}, energy {}, water {}, income {}",
                self.frames,
                self.treasury.money(),
                self.world.energy_delta(),
                self.world.water_delta(),
                self.world.passive_income()
            );
        }
    }

    /// Simulated seconds since creation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn checked_ray(
    origin: [f32; 3],
    direction: [f32; 3],
) -> anyhow::Result<(Point3<f32>, Vector3<f32>)> {
    let (origin, direction) = (Point3::from(origin), Vector3::from(direction));
    anyhow::ensure!(
        is_walkable(origin, direction, PICK_DISTANCE),
        "Ray from {origin:?} along {direction:?} cannot be traced"
    );
    Ok((origin, direction))
}
