use cgmath::{Vector2, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, ATLAS_CELLS, BLOCK_TEXSIZE};

/// Represents a single quad face of a voxel.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-right, upper-left) and the atlas cell it samples. The vertical scale
/// is kept so half blocks only sample the lower part of their side texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner
    pub ll: Vector3<f32>,
    /// Lower-right corner
    pub lr: Vector3<f32>,
    /// Upper-left corner
    pub ul: Vector3<f32>,
    /// Upper-right corner
    pub ur: Vector3<f32>,
    /// Atlas index sampled by the face
    pub texture_index: u16,
    /// Fraction of the texture cell covered vertically
    pub scale_y: f32,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for the cell centered at `center`.
    ///
    /// # Arguments
    /// * `center` - The cell center, local to the chunk or model
    /// * `block_side` - Which side of the block this face represents
    /// * `texture_index` - Atlas cell to sample
    /// * `scale_y` - Vertical extent of the block, 1.0 for full blocks and 0.5
    ///   for half blocks
    ///
    /// Side faces are shortened by `scale_y`; the top face is lowered to the
    /// block's actual height; the bottom face never changes.
    pub fn new(
        center: Vector3<f32>,
        block_side: BlockSide,
        texture_index: u16,
        scale_y: f32,
    ) -> Self {
        let mut ll = center + block_side.corner();
        let right = block_side.right();
        let (up, scale_y) = match block_side {
            BlockSide::TOP => {
                ll.y = center.y + scale_y - 0.5;
                (block_side.up(), 1.0)
            }
            BlockSide::BOTTOM => (block_side.up(), 1.0),
            _ => (block_side.up() * scale_y, scale_y),
        };

        Face {
            ll,
            lr: ll + right,
            ul: ll + up,
            ur: ll + up + right,
            texture_index,
            scale_y,
            block_side,
        }
    }

    /// Top-left corner of the face's atlas cell, in normalized coordinates.
    pub fn atlas_origin(&self) -> Vector2<f32> {
        Vector2::new(
            (self.texture_index % ATLAS_CELLS) as f32 * BLOCK_TEXSIZE,
            (self.texture_index / ATLAS_CELLS) as f32 * BLOCK_TEXSIZE,
        )
    }

    /// Texture coordinates for `[ll, ul, lr, ur]`.
    pub fn tex_coords(&self) -> [Vector2<f32>; 4] {
        let uv = self.atlas_origin();
        let v = Vector2::unit_y() * BLOCK_TEXSIZE * self.scale_y;
        let u = Vector2::unit_x() * BLOCK_TEXSIZE;
        [uv + v, uv, uv + u + v, uv + u]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_origin_wraps_every_sixteen_cells() {
        let face = Face::new(Vector3::new(0.0, 0.0, 0.0), BlockSide::FRONT, 205, 1.0);
        let origin = face.atlas_origin();
        assert!((origin.x - 13.0 / 16.0).abs() < 1e-6);
        assert!((origin.y - 12.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn half_block_side_is_half_height() {
        let face = Face::new(Vector3::new(2.0, 3.0, 4.0), BlockSide::LEFT, 5, 0.5);
        assert!((face.ul.y - face.ll.y - 0.5).abs() < 1e-6);
        assert!((face.ll.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn half_block_top_is_lowered() {
        let face = Face::new(Vector3::new(0.0, 3.0, 0.0), BlockSide::TOP, 6, 0.5);
        assert!((face.ll.y - 3.0).abs() < 1e-6);
        assert!((face.ur.y - 3.0).abs() < 1e-6);
        let full = Face::new(Vector3::new(0.0, 3.0, 0.0), BlockSide::TOP, 6, 1.0);
        assert!((full.ll.y - 3.5).abs() < 1e-6);
    }
}
