//! Rendering surface of the voxel world.
//!
//! The world never talks to a GPU. It produces geometry and hands it to a
//! host-supplied [`Renderer`], together with the pipeline state each pass must
//! be drawn with. That state lives in a [`RenderContext`] passed to every draw.
//!
//! ## Key Components
//! * [`Vertex`] - position/normal/uv vertex layout
//! * [`meshing`] - faces and per-pass mesh streams
//! * [`BuildingModel`] - one cube mesh instanced per placed building
//! * [`culling`] - bounding boxes and the [`Visibility`] test
//! * [`Renderer`] - the trait the host implements to receive draws

use cgmath::{Matrix4, Vector3};

use crate::engine_state::voxels::block::ShaderPass;

pub mod building_model;
pub mod culling;
pub mod meshing;
mod vertex;

pub use building_model::BuildingModel;
pub use culling::{Aabb, AllVisible, Frustum, Visibility};
pub use vertex::Vertex;

/// How fragments of a pass are combined with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Fragments overwrite the target.
    Opaque,
    /// Standard `src_alpha, 1 - src_alpha` blending.
    AlphaBlend,
}

/// How a pass uses the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// Test with `Less` and write.
    ReadWrite,
    /// Test with `Less`, never write.
    ReadOnly,
    /// Test with `Equal`, never write. Used for highlight overlays.
    Equal,
    /// No depth test.
    Disabled,
}

/// Pipeline state to bind before drawing a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassState {
    pub blend: BlendMode,
    pub depth: DepthMode,
}

/// Per-pass pipeline state, handed to every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Indexed by `ShaderPass as usize`.
    pub passes: [PassState; ShaderPass::COUNT],
    /// State used for building instances.
    pub buildings: PassState,
}

impl RenderContext {
    /// The state a pass must be drawn with.
    pub fn pass_state(&self, pass: ShaderPass) -> &PassState {
        &self.passes[pass as usize]
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        let opaque = PassState {
            blend: BlendMode::Opaque,
            depth: DepthMode::ReadWrite,
        };
        RenderContext {
            passes: [
                opaque,
                PassState {
                    blend: BlendMode::AlphaBlend,
                    depth: DepthMode::ReadOnly,
                },
            ],
            buildings: opaque,
        }
    }
}

/// Receives geometry from the world.
///
/// Implemented by the host renderer; the world calls it in draw order.
pub trait Renderer {
    /// Binds the pipeline state for the draws that follow.
    fn bind_pass(&mut self, state: &PassState);

    /// Draws an indexed triangle list with the given model transform.
    fn draw_indexed(&mut self, model: Matrix4<f32>, vertices: &[Vertex], indices: &[u32]);

    /// Draws `model`'s mesh once per instance translation.
    fn draw_instanced(&mut self, model: &BuildingModel, instances: &[Vector3<f32>]);
}

/// A renderer that only counts what it is asked to draw.
///
/// Used by the driver binary and handy in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub passes_bound: usize,
    pub indexed_draws: usize,
    pub triangles: usize,
    pub instanced_draws: usize,
    pub instances: usize,
}

impl Renderer for DrawStats {
    fn bind_pass(&mut self, _state: &PassState) {
        self.passes_bound += 1;
    }

    fn draw_indexed(&mut self, _model: Matrix4<f32>, _vertices: &[Vertex], indices: &[u32]) {
        self.indexed_draws += 1;
        self.triangles += indices.len() / 3;
    }

    fn draw_instanced(&mut self, _model: &BuildingModel, instances: &[Vector3<f32>]) {
        self.instanced_draws += 1;
        self.instances += instances.len();
    }
}
