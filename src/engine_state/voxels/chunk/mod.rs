//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16x16 block of voxel data,
//! the atomic unit of storage and of mesh regeneration.
//!
//! ## Neighbours
//!
//! Chunks live in a flat arena owned by the world. Instead of pointing at each
//! other, a chunk stores the arena *index* of each of its six axis neighbours.
//! Every lookup that may cross a chunk boundary therefore takes the arena as a
//! parameter, and a missing neighbour simply means "edge of the world".
//!
//! ## Meshing
//!
//! A chunk keeps one mesh per render pass and a `need_regen` flag. Meshing is a
//! full rebuild: every non-empty cell emits the faces that survive
//! [`Chunk::should_render_face`]. Rebuilds only happen after edits, so the
//! simplicity is worth more than incremental updates.

use cgmath::{Matrix4, Point3, Vector3};
use log::debug;

use super::block::{
    block_side::BlockSide, block_type::BlockId, BlockData, BlockFlags, ShaderPass,
};
use crate::engine_state::rendering::{
    meshing::{ChunkMesh, Face, PassMesh},
    Aabb, Renderer,
};

pub mod chunk_iteration;

use chunk_iteration::ChunkBlockIterator;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_SIZE²).
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk (CHUNK_SIZE³).
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_SIZE as usize;

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<i32>,

    /// Block ids in `x + y * 16 + z * 256` order.
    blocks: Box<[BlockId; CHUNK_VOLUME]>,

    /// Arena indices of the six neighbours, indexed by `BlockSide as usize`.
    neighbors: [Option<usize>; 6],

    /// Cached geometry, one stream pair per pass.
    mesh: ChunkMesh,

    /// Set when `blocks` changed since the last [`Chunk::generate`].
    pub need_regen: bool,

    /// World-space translation, fixed at construction.
    model: Matrix4<f32>,

    /// World-space bounds, fixed at construction.
    bounds: Aabb,
}

impl Chunk {
    /// Creates an empty chunk at the given chunk coordinates.
    ///
    /// The chunk starts dirty so that its first draw meshes it.
    pub fn new(position: Point3<i32>) -> Self {
        let origin = Vector3::new(position.x, position.y, position.z)
            .map(|c| (c * CHUNK_SIZE) as f32);
        let half = CHUNK_SIZE as f32 / 2.0;
        Chunk {
            position,
            blocks: Box::new([BlockId::EMPTY; CHUNK_VOLUME]),
            neighbors: [None; 6],
            mesh: ChunkMesh::new(),
            need_regen: true,
            model: Matrix4::from_translation(origin),
            bounds: Aabb::new(
                origin + Vector3::new(half - 0.5, half - 0.5, half - 0.5),
                Vector3::new(half, half, half),
            ),
        }
    }

    /// The chunk's grid coordinates.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// World-space translation of the chunk's geometry.
    pub fn model(&self) -> Matrix4<f32> {
        self.model
    }

    /// World-space bounding box, for view culling.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The cached mesh. Stale while `need_regen` is set.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Arena index of the neighbour across `side`.
    pub fn neighbor(&self, side: BlockSide) -> Option<usize> {
        self.neighbors[side as usize]
    }

    /// Links the neighbour across `side`. Only the world wires chunks, once,
    /// right after building its arena.
    pub(crate) fn set_neighbor(&mut self, side: BlockSide, index: usize) {
        self.neighbors[side as usize] = Some(index);
    }

    #[inline]
    fn in_range(c: i32) -> bool {
        (0..CHUNK_SIZE).contains(&c)
    }

    #[inline]
    fn index_of(lx: i32, ly: i32, lz: i32) -> usize {
        (lx + ly * CHUNK_SIZE + lz * CHUNK_SIZE * CHUNK_SIZE) as usize
    }

    /// Returns the block at local coordinates, looking into neighbour chunks
    /// when the coordinate lies one step outside this chunk.
    ///
    /// # Arguments
    /// * `chunks` - The arena this chunk's neighbour indices refer to
    /// * `lx`, `ly`, `lz` - Local coordinates, each in `-1..=16`
    ///
    /// # Returns
    /// `None` if the coordinate crosses into a missing neighbour, which callers
    /// treat as "nothing there".
    pub fn get_local(&self, chunks: &[Chunk], lx: i32, ly: i32, lz: i32) -> Option<BlockId> {
        let last = CHUNK_SIZE - 1;
        let (side, x, y, z) = if lx < 0 {
            (BlockSide::LEFT, last, ly, lz)
        } else if ly < 0 {
            (BlockSide::BOTTOM, lx, last, lz)
        } else if lz < 0 {
            (BlockSide::BACK, lx, ly, last)
        } else if lx > last {
            (BlockSide::RIGHT, 0, ly, lz)
        } else if ly > last {
            (BlockSide::TOP, lx, 0, lz)
        } else if lz > last {
            (BlockSide::FRONT, lx, ly, 0)
        } else {
            return Some(self.blocks[Self::index_of(lx, ly, lz)]);
        };

        let neighbor = self.neighbor(side)?;
        chunks.get(neighbor)?.get_local(chunks, x, y, z)
    }

    /// Returns a mutable reference to a block of this chunk.
    ///
    /// Only in-range coordinates resolve; the world routes cross-chunk writes
    /// to the owning chunk itself.
    pub fn get_local_mut(&mut self, lx: i32, ly: i32, lz: i32) -> Option<&mut BlockId> {
        if Self::in_range(lx) && Self::in_range(ly) && Self::in_range(lz) {
            Some(&mut self.blocks[Self::index_of(lx, ly, lz)])
        } else {
            None
        }
    }

    /// Returns the block at in-range local coordinates.
    ///
    /// # Panics
    /// Panics if a coordinate is outside `0..16`.
    pub fn block_at(&self, lx: usize, ly: usize, lz: usize) -> BlockId {
        self.blocks[lx + ly * CHUNK_SIZE as usize + lz * CHUNK_PLANE_SIZE]
    }

    /// Decides whether the face between the cube at `(lx, ly, lz)` and its
    /// neighbour at `offset` must be drawn.
    ///
    /// Rules, first match wins:
    /// 1. no neighbour cube (world edge): draw
    /// 2. neighbour is a half block: draw
    /// 3. neighbour is cutout: draw unless this cube is cutout too
    /// 4. neighbour is transparent: draw unless this cube is transparent too
    /// 5. otherwise draw only against `EMPTY`
    pub fn should_render_face(
        &self,
        chunks: &[Chunk],
        lx: i32,
        ly: i32,
        lz: i32,
        offset: Vector3<i32>,
    ) -> bool {
        let Some(neighbour) = self.get_local(chunks, lx + offset.x, ly + offset.y, lz + offset.z)
        else {
            return true;
        };
        let Some(myself) = self.get_local(chunks, lx, ly, lz) else {
            return true;
        };

        let my_data = BlockData::get(myself);
        let neigh_data = BlockData::get(neighbour);

        if neigh_data.has(BlockFlags::HALF_BLOCK) {
            return true;
        }

        if neigh_data.has(BlockFlags::CUTOUT) {
            return !my_data.has(BlockFlags::CUTOUT);
        }

        if neigh_data.pass == ShaderPass::TRANSPARENT {
            return my_data.pass != ShaderPass::TRANSPARENT;
        }

        neighbour == BlockId::EMPTY
    }

    /// Appends the visible faces of the cube at `(x, y, z)` to `mesh`.
    fn push_cube(
        &self,
        chunks: &[Chunk],
        mesh: &mut ChunkMesh,
        x: usize,
        y: usize,
        z: usize,
        id: BlockId,
    ) {
        let data = BlockData::get(id);
        let half = data.has(BlockFlags::HALF_BLOCK);
        let scale_y = if half { 0.5 } else { 1.0 };
        let center = Vector3::new(x as f32, y as f32, z as f32);
        let (lx, ly, lz) = (x as i32, y as i32, z as i32);

        for side in BlockSide::all() {
            // a half block never covers its own top
            let forced = half && side == BlockSide::TOP;
            if !forced && !self.should_render_face(chunks, lx, ly, lz, side.offset()) {
                continue;
            }
            let texture_index = match side {
                BlockSide::TOP => data.tex_id_top,
                BlockSide::BOTTOM => data.tex_id_bottom,
                _ => data.tex_id_side,
            };
            mesh.push_face(data.pass, &Face::new(center, side, texture_index, scale_y));
        }
    }

    /// Rebuilds the mesh of the chunk at `index` in `chunks` and clears its
    /// dirty flag.
    ///
    /// This is an associated function because meshing reads neighbour chunks
    /// from the same arena the rebuilt chunk lives in.
    pub fn generate(chunks: &mut [Chunk], index: usize) {
        let mut mesh = std::mem::take(&mut chunks[index].mesh);
        mesh.clear();

        let chunk = &chunks[index];
        let mut iter = ChunkBlockIterator::new(chunk);
        while let Some((pos, id)) = iter.get_next_block() {
            chunk.push_cube(chunks, &mut mesh, pos.x, pos.y, pos.z, id);
        }

        debug!(
            "Meshed chunk {:?}: {} opaque / {} transparent faces",
            chunk.position,
            mesh.pass(ShaderPass::OPAQUE).face_count(),
            mesh.pass(ShaderPass::TRANSPARENT).face_count()
        );

        let chunk = &mut chunks[index];
        chunk.mesh = mesh;
        chunk.need_regen = false;
    }

    /// Hands the geometry of `pass` to the renderer. Does nothing if the pass
    /// is empty.
    pub fn draw(&self, pass: ShaderPass, renderer: &mut dyn Renderer) {
        let pass_mesh: &PassMesh = self.mesh.pass(pass);
        if pass_mesh.is_empty() {
            return;
        }
        renderer.draw_indexed(self.model, &pass_mesh.vertices, &pass_mesh.indices);
    }

    /// Empties every block and marks the chunk dirty.
    pub fn reset(&mut self) {
        self.blocks.fill(BlockId::EMPTY);
        self.need_regen = true;
    }

    /// Number of non-empty cells.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::DrawStats;

    /// Two chunks side by side along X, linked both ways.
    fn pair() -> Vec<Chunk> {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0)), Chunk::new(Point3::new(1, 0, 0))];
        chunks[0].set_neighbor(BlockSide::RIGHT, 1);
        chunks[1].set_neighbor(BlockSide::LEFT, 0);
        chunks
    }

    fn set(chunks: &mut [Chunk], index: usize, x: i32, y: i32, z: i32, id: BlockId) {
        *chunks[index].get_local_mut(x, y, z).unwrap() = id;
    }

    fn faces(chunks: &[Chunk], index: usize) -> usize {
        chunks[index].mesh().face_count()
    }

    #[test]
    fn lone_cube_emits_six_faces() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 4, 4, 4, BlockId::STONE);
        Chunk::generate(&mut chunks, 0);
        assert_eq!(faces(&chunks, 0), 6);
        assert!(!chunks[0].need_regen);
    }

    #[test]
    fn adjacent_stone_hides_shared_faces() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 4, 4, 4, BlockId::STONE);
        set(&mut chunks, 0, 5, 4, 4, BlockId::STONE);
        let c = &chunks[0];
        assert!(!c.should_render_face(&chunks, 4, 4, 4, BlockSide::RIGHT.offset()));
        assert!(!c.should_render_face(&chunks, 5, 4, 4, BlockSide::LEFT.offset()));
        Chunk::generate(&mut chunks, 0);
        assert_eq!(faces(&chunks, 0), 10);
    }

    #[test]
    fn lookups_cross_into_linked_neighbours() {
        let mut chunks = pair();
        set(&mut chunks, 1, 0, 3, 3, BlockId::BRICK);
        assert_eq!(chunks[0].get_local(&chunks, 16, 3, 3), Some(BlockId::BRICK));
        assert_eq!(chunks[1].get_local(&chunks, -1, 3, 3), Some(BlockId::EMPTY));
        assert_eq!(chunks[0].get_local(&chunks, -1, 3, 3), None);
        assert_eq!(chunks[0].get_local(&chunks, 3, 16, 3), None);
    }

    #[test]
    fn culling_sees_across_chunk_seams() {
        let mut chunks = pair();
        set(&mut chunks, 0, 15, 0, 0, BlockId::STONE);
        set(&mut chunks, 1, 0, 0, 0, BlockId::STONE);
        assert!(!chunks[0].should_render_face(&chunks, 15, 0, 0, BlockSide::RIGHT.offset()));
        assert!(!chunks[1].should_render_face(&chunks, 0, 0, 0, BlockSide::LEFT.offset()));
        // unlinked sides are world edges
        assert!(chunks[0].should_render_face(&chunks, 15, 0, 0, BlockSide::BOTTOM.offset()));
    }

    #[test]
    fn cutout_rules() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 1, 1, 1, BlockId::STONE);
        set(&mut chunks, 0, 2, 1, 1, BlockId::GLASS);
        set(&mut chunks, 0, 3, 1, 1, BlockId::GLASS);
        let c = &chunks[0];
        // stone against glass is visible, glass against stone is not
        assert!(c.should_render_face(&chunks, 1, 1, 1, BlockSide::RIGHT.offset()));
        assert!(!c.should_render_face(&chunks, 2, 1, 1, BlockSide::LEFT.offset()));
        // glass against glass renders from neither side
        assert!(!c.should_render_face(&chunks, 2, 1, 1, BlockSide::RIGHT.offset()));
        assert!(!c.should_render_face(&chunks, 3, 1, 1, BlockSide::LEFT.offset()));
    }

    #[test]
    fn water_never_renders_against_water() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 1, 1, 1, BlockId::WATER);
        set(&mut chunks, 0, 2, 1, 1, BlockId::WATER);
        set(&mut chunks, 0, 1, 0, 1, BlockId::SAND);
        let c = &chunks[0];
        assert!(!c.should_render_face(&chunks, 1, 1, 1, BlockSide::RIGHT.offset()));
        assert!(c.should_render_face(&chunks, 1, 0, 1, BlockSide::TOP.offset()));
        assert!(!c.should_render_face(&chunks, 1, 1, 1, BlockSide::BOTTOM.offset()));
        Chunk::generate(&mut chunks, 0);
        assert!(!chunks[0].mesh().pass(ShaderPass::TRANSPARENT).is_empty());
    }

    #[test]
    fn half_slab_keeps_its_top_under_stone() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 2, 2, 2, BlockId::HALF_SLAB);
        set(&mut chunks, 0, 2, 3, 2, BlockId::STONE);
        Chunk::generate(&mut chunks, 0);
        let top_faces = chunks[0]
            .mesh()
            .pass(ShaderPass::OPAQUE)
            .vertices
            .chunks(4)
            .filter(|quad| quad[0].normal == [0.0, 1.0, 0.0] && quad[0].position[1] == 2.0)
            .count();
        assert_eq!(top_faces, 1);
        // the stone keeps its bottom face over the half slab
        assert_eq!(faces(&chunks, 0), 12);
    }

    #[test]
    fn draw_skips_empty_passes() {
        let mut chunks = vec![Chunk::new(Point3::new(0, 0, 0))];
        set(&mut chunks, 0, 0, 0, 0, BlockId::DIRT);
        Chunk::generate(&mut chunks, 0);
        let mut stats = DrawStats::default();
        chunks[0].draw(ShaderPass::OPAQUE, &mut stats);
        chunks[0].draw(ShaderPass::TRANSPARENT, &mut stats);
        assert_eq!(stats.indexed_draws, 1);
        assert_eq!(stats.triangles, 12);
    }

    #[test]
    fn reset_empties_and_dirties() {
        let mut chunks = vec![Chunk::new(Point3::new(2, 0, 1))];
        set(&mut chunks, 0, 0, 0, 0, BlockId::DIRT);
        Chunk::generate(&mut chunks, 0);
        chunks[0].reset();
        assert!(chunks[0].need_regen);
        assert_eq!(chunks[0].solid_count(), 0);
        assert_eq!(chunks[0].bounds().center, Vector3::new(39.5, 7.5, 23.5));
    }
}
