//! Mesh generation for voxel rendering.
//!
//! This module turns block data into GPU-friendly vertex and index streams.
//! Chunks are meshed face by face with neighbour-aware culling (see
//! [`Chunk::generate`](crate::engine_state::voxels::chunk::Chunk::generate));
//! building models are meshed as lone, fully visible cubes.
//!
//! # Architecture
//! - [`Face`]: a single quad with its corners and atlas cell
//! - [`PassMesh`]: vertex/index streams of one render pass
//! - [`ChunkMesh`]: one `PassMesh` per render pass

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;

use cgmath::Vector3;

use crate::engine_state::voxels::block::{block_side::BlockSide, BlockData, BlockFlags};

/// Meshes a single block of type `data` centered at the origin, all six faces
/// included.
pub fn cube_mesh(data: &BlockData) -> PassMesh {
    let scale_y = if data.has(BlockFlags::HALF_BLOCK) { 0.5 } else { 1.0 };
    let mut mesh = PassMesh::new();
    for side in BlockSide::all() {
        let texture_index = match side {
            BlockSide::TOP => data.tex_id_top,
            BlockSide::BOTTOM => data.tex_id_bottom,
            _ => data.tex_id_side,
        };
        mesh.push_face(&Face::new(Vector3::new(0.0, 0.0, 0.0), side, texture_index, scale_y));
    }
    mesh
}
