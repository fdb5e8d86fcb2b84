//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format produced by chunk and building meshing
//! and handed to the external renderer.

use cgmath::{Vector2, Vector3};

/// A vertex of a block face.
///
/// Matches the position/normal/uv layout the block shader consumes.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Atlas texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - The position of the vertex, local to its chunk or model
    /// * `normal` - The normal of the face the vertex belongs to
    /// * `uv` - Atlas texture coordinates
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(pos: Vector3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Vertex {
            position: pos.into(),
            normal: normal.into(),
            tex_coords: uv.into(),
        }
    }

    /// Returns the position as a vector.
    pub fn pos(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }
}
