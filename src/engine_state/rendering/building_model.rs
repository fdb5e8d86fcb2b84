//! Instanced building models.
//!
//! Every building type shares one cube mesh, textured with the type's model
//! block, and draws it once per placed building from a list of instance
//! translations.

use cgmath::Vector3;
use log::debug;

use crate::engine_state::{
    rendering::meshing::{cube_mesh, PassMesh},
    voxels::block::{block_type::BlockId, BlockData},
};

/// One mesh drawn at many positions.
#[derive(Debug, Clone)]
pub struct BuildingModel {
    block: BlockId,
    mesh: PassMesh,
    instances: Vec<Vector3<f32>>,
    need_regen: bool,
}

impl BuildingModel {
    /// Creates a model textured like `block`. Geometry is built lazily by
    /// [`BuildingModel::generate`].
    pub fn new(block: BlockId) -> Self {
        BuildingModel {
            block,
            mesh: PassMesh::new(),
            instances: Vec::new(),
            need_regen: true,
        }
    }

    /// The block whose textures the model uses.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Rebuilds the cube mesh.
    pub fn generate(&mut self) {
        self.mesh = cube_mesh(BlockData::get(self.block));
        self.need_regen = false;
    }

    /// Returns `true` until the mesh has been generated.
    pub fn needs_regen(&self) -> bool {
        self.need_regen
    }

    /// The shared cube mesh.
    pub fn mesh(&self) -> &PassMesh {
        &self.mesh
    }

    /// Replaces the instance buffer with `positions`.
    pub fn reset_instance_buffer(&mut self, positions: &[cgmath::Point3<i32>]) {
        self.instances.clear();
        self.instances.extend(
            positions
                .iter()
                .map(|p| Vector3::new(p.x as f32, p.y as f32, p.z as f32)),
        );
        debug!("{:?} model now has {} instances", self.block, self.instances.len());
    }

    /// Translations of every instance.
    pub fn instances(&self) -> &[Vector3<f32>] {
        &self.instances
    }
}
