//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of a finite
//! voxel world, the 2D building overlay laid over its surface, and the running
//! economy totals of the buildings placed on it.
//!
//! ## Architecture
//!
//! Chunks are stored in a flat arena indexed `x + y * S + z * S * H`, where `S`
//! is the world width and `H` its height, both in chunks. Chunks refer to their
//! neighbours by arena index, wired once in [`World::new`].
//!
//! The world is split across several files:
//! - `generation`: procedural and heightmap terrain
//! - `buildings`: the overlay and its adjacency economy
//! - `raycast`: voxel traversal and block picking
//! - `editor`: break/place operations on picked blocks
//!
//! ## Frame Flow
//!
//! Edits only flip dirty flags. [`World::draw`] remeshes whatever is dirty,
//! then submits both passes and the building instances to the renderer.

use std::collections::HashMap;

use cgmath::Point3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    economy::building::Building,
    rendering::{BuildingModel, RenderContext, Renderer, Visibility},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockId, ShaderPass},
        chunk::{Chunk, CHUNK_SIZE},
    },
};

pub mod buildings;
pub mod editor;
pub mod generation;
pub mod raycast;

pub use editor::BlockEditor;
pub use generation::HeightmapParsing;
pub use raycast::BlockHit;

/// World size in chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDimensions {
    /// Chunks along X and along Z.
    pub world_size: u32,
    /// Chunks along Y.
    pub world_height: u32,
}

impl Default for WorldDimensions {
    fn default() -> Self {
        WorldDimensions {
            world_size: 6,
            world_height: 1,
        }
    }
}

impl WorldDimensions {
    /// Total number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.world_size as usize * self.world_size as usize * self.world_height as usize
    }

    /// Blocks along X and along Z.
    pub fn width_in_blocks(&self) -> i32 {
        i32::try_from(self.world_size).unwrap_or(i32::MAX).saturating_mul(CHUNK_SIZE)
    }

    /// Blocks along Y.
    pub fn height_in_blocks(&self) -> i32 {
        i32::try_from(self.world_height).unwrap_or(i32::MAX).saturating_mul(CHUNK_SIZE)
    }
}

/// Placed instances of one building type.
pub(crate) struct BuildingInstances {
    pub(crate) model: BuildingModel,
    pub(crate) positions: Vec<Point3<i32>>,
}

/// Represents a finite voxel world composed of a fixed grid of chunks.
pub struct World {
    dimensions: WorldDimensions,

    /// The chunk arena.
    chunks: Vec<Chunk>,

    /// The building overlay, one entry per `(x, z)` column.
    buildings: Vec<Building>,

    /// Model and placement list of every placeable type.
    instances: HashMap<Building, BuildingInstances>,

    energy_gain: i32,
    water_gain: i32,
    income: i32,
}

impl World {
    /// Creates an empty world of the given size and links every chunk to its
    /// axis neighbours.
    ///
    /// # Arguments
    /// * `dimensions` - Size of the world in chunks
    ///
    /// # Returns
    /// A world with every block `EMPTY`, no buildings and zeroed totals.
    pub fn new(dimensions: WorldDimensions) -> Self {
        let (size, height) = (dimensions.world_size as i32, dimensions.world_height as i32);
        let width = dimensions.width_in_blocks() as usize;

        let mut chunks = Vec::with_capacity(dimensions.chunk_count());
        for z in 0..size {
            for y in 0..height {
                for x in 0..size {
                    chunks.push(Chunk::new(Point3::new(x, y, z)));
                }
            }
        }

        let mut world = World {
            dimensions,
            chunks,
            buildings: vec![Building::NOTHING; width * width],
            instances: Building::PLACEABLE
                .iter()
                .map(|&building| {
                    let instances = BuildingInstances {
                        model: BuildingModel::new(building.data().model_block),
                        positions: Vec::new(),
                    };
                    (building, instances)
                })
                .collect(),
            energy_gain: 0,
            water_gain: 0,
            income: 0,
        };
        world.link_chunks();
        world
    }

    fn link_chunks(&mut self) {
        for index in 0..self.chunks.len() {
            let position = self.chunks[index].position();
            for side in BlockSide::all() {
                let neighbor = position + side.offset();
                if let Some(neighbor_index) =
                    self.chunk_index_from_coordinates(neighbor.x, neighbor.y, neighbor.z)
                {
                    self.chunks[index].set_neighbor(side, neighbor_index);
                }
            }
        }
    }

    pub fn dimensions(&self) -> WorldDimensions {
        self.dimensions
    }

    /// All chunks, in arena order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Arena index of the chunk at chunk coordinates, `None` outside the world.
    pub fn chunk_index_from_coordinates(&self, cx: i32, cy: i32, cz: i32) -> Option<usize> {
        let (size, height) = (
            self.dimensions.world_size as i32,
            self.dimensions.world_height as i32,
        );
        if !(0..size).contains(&cx) || !(0..height).contains(&cy) || !(0..size).contains(&cz) {
            return None;
        }
        Some((cx + cy * size + cz * size * height) as usize)
    }

    /// The chunk at chunk coordinates.
    pub fn chunk(&self, cx: i32, cy: i32, cz: i32) -> Option<&Chunk> {
        self.chunk_index_from_coordinates(cx, cy, cz)
            .map(|index| &self.chunks[index])
    }

    /// Arena index of the chunk holding the block at global coordinates.
    pub fn chunk_index_of_block(&self, gx: i32, gy: i32, gz: i32) -> Option<usize> {
        if gx < 0 || gy < 0 || gz < 0 {
            return None;
        }
        self.chunk_index_from_coordinates(gx / CHUNK_SIZE, gy / CHUNK_SIZE, gz / CHUNK_SIZE)
    }

    /// Returns the block at global coordinates, `None` outside the world.
    pub fn get_cube(&self, gx: i32, gy: i32, gz: i32) -> Option<BlockId> {
        let index = self.chunk_index_of_block(gx, gy, gz)?;
        self.chunks[index].get_local(
            &self.chunks,
            gx % CHUNK_SIZE,
            gy % CHUNK_SIZE,
            gz % CHUNK_SIZE,
        )
    }

    /// Mutable access to the block at global coordinates.
    ///
    /// Writing through this reference does not dirty any chunk; use
    /// [`World::update_block`] for edits that must show up on screen.
    pub fn get_cube_mut(&mut self, gx: i32, gy: i32, gz: i32) -> Option<&mut BlockId> {
        let index = self.chunk_index_of_block(gx, gy, gz)?;
        self.chunks[index].get_local_mut(gx % CHUNK_SIZE, gy % CHUNK_SIZE, gz % CHUNK_SIZE)
    }

    /// Writes a block and dirties the chunk holding it along with its six
    /// neighbour chunks. Missing neighbours at the world edge are skipped.
    ///
    /// Does nothing if the coordinates are outside the world.
    pub fn update_block(&mut self, gx: i32, gy: i32, gz: i32, block: BlockId) {
        let Some(index) = self.chunk_index_of_block(gx, gy, gz) else {
            return;
        };
        let Some(cube) = self.get_cube_mut(gx, gy, gz) else {
            return;
        };
        *cube = block;

        self.chunks[index].need_regen = true;
        for side in BlockSide::all() {
            if let Some(neighbour) = self.chunks[index].neighbor(side) {
                self.chunks[neighbour].need_regen = true;
            }
        }
    }

    /// Whether one of the four horizontal neighbours, at `gy` or one below,
    /// holds water.
    pub fn is_adjacent_to_water(&self, gx: i32, gy: i32, gz: i32) -> bool {
        BlockSide::all()
            .into_iter()
            .filter(|side| !side.is_horizontal_face())
            .map(|side| side.offset())
            .any(|offset| {
                [gy, gy - 1]
                    .into_iter()
                    .any(|y| self.get_cube(gx + offset.x, y, gz + offset.z) == Some(BlockId::WATER))
            })
    }

    /// The first free cell above the topmost block of column `(x, z)`, or `0`
    /// for an empty column. `None` outside the world.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        self.get_cube(x, 0, z)?;
        let top = (0..self.dimensions.height_in_blocks())
            .rev()
            .find(|&y| self.get_cube(x, y, z).is_some_and(|block| !block.is_empty()));
        Some(top.map_or(0, |y| y + 1))
    }

    /// Number of chunks waiting for a remesh.
    pub fn dirty_chunk_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.need_regen).count()
    }

    /// Empties every chunk, clears the overlay and zeroes the economy.
    pub fn reset(&mut self) {
        self.chunks.iter_mut().for_each(Chunk::reset);
        self.buildings.fill(Building::NOTHING);
        for instances in self.instances.values_mut() {
            instances.positions.clear();
            instances.model.reset_instance_buffer(&[]);
        }
        self.energy_gain = 0;
        self.water_gain = 0;
        self.income = 0;
        info!("World reset ({} chunks)", self.chunks.len());
    }

    /// Meshes every chunk and every building model, dirty or not.
    pub fn create(&mut self) {
        for index in 0..self.chunks.len() {
            Chunk::generate(&mut self.chunks, index);
        }
        for instances in self.instances.values_mut() {
            instances.model.generate();
            instances.model.reset_instance_buffer(&instances.positions);
        }
    }

    /// Remeshes dirty chunks, returning how many were rebuilt.
    pub fn regenerate_dirty(&mut self) -> usize {
        let mut rebuilt = 0;
        for index in 0..self.chunks.len() {
            if self.chunks[index].need_regen {
                Chunk::generate(&mut self.chunks, index);
                rebuilt += 1;
            }
        }
        rebuilt
    }

    /// Submits one frame of geometry.
    ///
    /// Dirty chunks are remeshed first. Then, for each pass in order, the pass
    /// state is bound and every chunk whose bounds pass `visibility` is drawn.
    /// Building instances follow with the building state.
    pub fn draw(
        &mut self,
        context: &RenderContext,
        visibility: &dyn Visibility,
        renderer: &mut dyn Renderer,
    ) {
        self.regenerate_dirty();

        for pass in ShaderPass::all() {
            renderer.bind_pass(context.pass_state(pass));
            for chunk in self.chunks.iter().filter(|chunk| visibility.intersects(chunk.bounds())) {
                chunk.draw(pass, renderer);
            }
        }

        renderer.bind_pass(&context.buildings);
        for building in Building::PLACEABLE {
            let Some(instances) = self.instances.get_mut(&building) else {
                continue;
            };
            if instances.positions.is_empty() {
                continue;
            }
            if instances.model.needs_regen() {
                instances.model.generate();
            }
            renderer.draw_instanced(&instances.model, instances.model.instances());
        }
    }
}
