//! # Block Picking
//!
//! Voxel traversal (Amanatides & Woo) over the block grid. Blocks are centered
//! on integer coordinates, so the cell containing a point `p` is
//! `floor(p + 0.5)`.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::{block_type::BlockId, BlockData, BlockFlags};

use super::World;

/// Longest ray that is walked, in blocks.
pub const MAX_RAY_LENGTH: f32 = 4096.0;
/// Rays starting farther than this from the origin on any axis visit nothing.
const ORIGIN_LIMIT: f32 = 1.0e9;

/// The first pickable block along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHit {
    /// The cell that was hit.
    pub position: Point3<i32>,
    /// The block in that cell.
    pub block: BlockId,
    /// The cell visited just before, where a placed block would go. `None` if
    /// the ray started inside the hit cell.
    pub previous: Option<Point3<i32>>,
}

/// Distance along the ray to the first boundary crossed on one axis, and the
/// distance between two consecutive crossings.
fn axis_setup(origin: f32, dir: f32, cell: i32, step: i32) -> (f32, f32) {
    if dir.abs() < 1e-6 {
        return (f32::INFINITY, f32::INFINITY);
    }
    let boundary = if step > 0 { cell as f32 + 0.5 } else { cell as f32 - 0.5 };
    (((boundary - origin) / dir).max(0.0), 1.0 / dir.abs())
}

/// Lists the cells a ray passes through, in order, starting with the cell
/// holding `origin`.
///
/// # Arguments
/// * `origin` - Start of the ray
/// * `direction` - Direction of the ray, need not be normalized
/// * `max_dist` - Length of the ray
///
/// # Returns
/// Every visited cell up to `max_dist`, capped at [`MAX_RAY_LENGTH`]. A zero
/// direction visits only the starting cell. Rays with a non-finite component
/// or an origin beyond the addressable grid visit nothing.
pub fn traverse(origin: Point3<f32>, direction: Vector3<f32>, max_dist: f32) -> Vec<Point3<i32>> {
    if !is_walkable(origin, direction, max_dist) {
        return Vec::new();
    }
    let max_dist = max_dist.min(MAX_RAY_LENGTH);

    let start = Point3::new(
        (origin.x + 0.5).floor() as i32,
        (origin.y + 0.5).floor() as i32,
        (origin.z + 0.5).floor() as i32,
    );
    if direction.magnitude2() == 0.0 {
        return vec![start];
    }
    let d = direction.normalize();

    let step = Vector3::new(
        if d.x >= 0.0 { 1 } else { -1 },
        if d.y >= 0.0 { 1 } else { -1 },
        if d.z >= 0.0 { 1 } else { -1 },
    );
    let (mut t_max_x, t_delta_x) = axis_setup(origin.x, d.x, start.x, step.x);
    let (mut t_max_y, t_delta_y) = axis_setup(origin.y, d.y, start.y, step.y);
    let (mut t_max_z, t_delta_z) = axis_setup(origin.z, d.z, start.z, step.z);

    let mut cell = start;
    let mut cells = vec![cell];
    loop {
        let (next, t) = if t_max_x < t_max_y && t_max_x < t_max_z {
            let t = t_max_x;
            t_max_x += t_delta_x;
            (cell.x.checked_add(step.x).map(|x| Point3::new(x, cell.y, cell.z)), t)
        } else if t_max_y < t_max_z {
            let t = t_max_y;
            t_max_y += t_delta_y;
            (cell.y.checked_add(step.y).map(|y| Point3::new(cell.x, y, cell.z)), t)
        } else {
            let t = t_max_z;
            t_max_z += t_delta_z;
            (cell.z.checked_add(step.z).map(|z| Point3::new(cell.x, cell.y, z)), t)
        };
        match next {
            Some(next) if t <= max_dist => cell = next,
            _ => break,
        }
        cells.push(cell);
    }
    cells
}

/// Whether a ray can be walked cell by cell.
pub fn is_walkable(origin: Point3<f32>, direction: Vector3<f32>, max_dist: f32) -> bool {
    let origin_ok = [origin.x, origin.y, origin.z]
        .iter()
        .all(|c| c.is_finite() && c.abs() <= ORIGIN_LIMIT);
    let direction_ok = [direction.x, direction.y, direction.z]
        .iter()
        .all(|c| c.is_finite());
    origin_ok && direction_ok && !max_dist.is_nan()
}

impl World {
    /// Finds the first block along a ray that can be targeted.
    ///
    /// Cells outside the world and blocks flagged `NO_RAYCAST` (empty space,
    /// water) are passed through.
    pub fn pick(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_dist: f32,
    ) -> Option<BlockHit> {
        let cells = traverse(origin, direction, max_dist);
        cells.iter().enumerate().find_map(|(i, &position)| {
            let block = self.get_cube(position.x, position.y, position.z)?;
            if BlockData::get(block).has(BlockFlags::NO_RAYCAST) {
                return None;
            }
            Some(BlockHit {
                position,
                block,
                previous: i.checked_sub(1).map(|prev| cells[prev]),
            })
        })
    }
}
