//! Mesh data structures for voxel rendering.
//!
//! A chunk keeps one [`PassMesh`] per [`ShaderPass`]; faces are appended as
//! four vertices and two triangles each.

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::ShaderPass,
};

use super::face::Face;

/// Vertex and index streams of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassMesh {
    /// The vertex data for this pass
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl PassMesh {
    /// Creates a new, empty `PassMesh`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both streams, keeping their capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Returns `true` if nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of quads pushed so far.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Appends a face: four vertices and two counter-clockwise triangles.
    pub fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(Self::generate_face_vertices(face));
        self.indices.extend(Self::generate_face_indices(base));
    }

    /// Generates vertex data for a single face.
    ///
    /// # Returns
    /// The four corners in `[ll, ul, lr, ur]` order, matching the indices from
    /// [`PassMesh::generate_face_indices`].
    pub fn generate_face_vertices(face: &Face) -> [Vertex; 4] {
        let normal = face.block_side.normal();
        let [uv_ll, uv_ul, uv_lr, uv_ur] = face.tex_coords();
        [
            Vertex::new(face.ll, normal, uv_ll),
            Vertex::new(face.ul, normal, uv_ul),
            Vertex::new(face.lr, normal, uv_lr),
            Vertex::new(face.ur, normal, uv_ur),
        ]
    }

    /// Generates index data for a face whose first vertex is `base`.
    ///
    /// # Returns
    /// Two triangles (6 indices), each wound counter-clockwise when seen from
    /// the side the normal points to.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 2, base + 1, base + 2, base + 3, base + 1]
    }
}

/// Per-pass geometry of a chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Indexed by `ShaderPass as usize`.
    pub passes: [PassMesh; ShaderPass::COUNT],
}

impl ChunkMesh {
    /// Creates a new mesh with both passes empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The streams of `pass`.
    pub fn pass(&self, pass: ShaderPass) -> &PassMesh {
        &self.passes[pass as usize]
    }

    /// Appends a face to the streams of `pass`.
    pub fn push_face(&mut self, pass: ShaderPass, face: &Face) {
        self.passes[pass as usize].push_face(face);
    }

    /// Clears both passes.
    pub fn clear(&mut self) {
        self.passes.iter_mut().for_each(PassMesh::clear);
    }

    /// Total number of quads across passes.
    pub fn face_count(&self) -> usize {
        self.passes.iter().map(PassMesh::face_count).sum()
    }
}
