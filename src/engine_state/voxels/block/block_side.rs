//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the fixed table of
//! unit offsets they correspond to. Everything that has to look at the six
//! axis neighbours of a cell (face emission, neighbour chunk wiring, dirty
//! propagation) iterates this table instead of branching per axis.

use cgmath::{Vector3, Zero};

/// Represents the six possible faces of a voxel block.
///
/// The discriminants are used as indices into per-side arrays, such as a
/// chunk's neighbour links. The order of [`BlockSide::all`] is also the order
/// in which faces of a cube are emitted.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The right face (facing positive X)
    RIGHT = 1,

    /// The back face (facing negative Z)
    BACK = 2,

    /// The left face (facing negative X)
    LEFT = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The bottom face (facing negative Y)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    ///
    /// The order is: [FRONT, RIGHT, BACK, LEFT, TOP, BOTTOM]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::RIGHT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// The unit offset from a cell to the neighbour sharing this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The side facing the other way.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
        }
    }

    /// Returns `true` for the top and bottom faces.
    pub fn is_horizontal_face(self) -> bool {
        matches!(self, BlockSide::TOP | BlockSide::BOTTOM)
    }

    /// The outward normal of the face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or_else(Vector3::zero)
    }

    /// The quad corner the face is built from, relative to the cell center.
    ///
    /// Cells are centered on integer coordinates, so every corner sits on a
    /// half-unit boundary.
    pub fn corner(self) -> Vector3<f32> {
        match self {
            BlockSide::FRONT => Vector3::new(-0.5, -0.5, 0.5),
            BlockSide::RIGHT => Vector3::new(0.5, -0.5, 0.5),
            BlockSide::BACK => Vector3::new(0.5, -0.5, -0.5),
            BlockSide::LEFT => Vector3::new(-0.5, -0.5, -0.5),
            BlockSide::TOP => Vector3::new(-0.5, 0.5, 0.5),
            BlockSide::BOTTOM => Vector3::new(-0.5, -0.5, -0.5),
        }
    }

    /// The quad's "up" edge, from [`BlockSide::corner`] toward the texture top.
    pub fn up(self) -> Vector3<f32> {
        match self {
            BlockSide::TOP => Vector3::new(0.0, 0.0, -1.0),
            BlockSide::BOTTOM => Vector3::new(0.0, 0.0, 1.0),
            _ => Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// The quad's "right" edge. `right × up` points along the normal.
    pub fn right(self) -> Vector3<f32> {
        match self {
            BlockSide::FRONT => Vector3::new(1.0, 0.0, 0.0),
            BlockSide::RIGHT => Vector3::new(0.0, 0.0, -1.0),
            BlockSide::BACK => Vector3::new(-1.0, 0.0, 0.0),
            BlockSide::LEFT => Vector3::new(0.0, 0.0, 1.0),
            BlockSide::TOP | BlockSide::BOTTOM => Vector3::new(1.0, 0.0, 0.0),
        }
    }
}
