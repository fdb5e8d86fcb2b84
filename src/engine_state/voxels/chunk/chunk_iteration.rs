//! # Chunk Iteration Module
//!
//! This module provides an iterator over all non-empty blocks of a chunk.
//!
//! ## Order
//!
//! Cells are visited with `x` as the outer loop, `z` in the middle and `y`
//! innermost. Meshing relies on this order so that identical block data always
//! produces identical vertex streams.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockId;

use super::{Chunk, CHUNK_SIZE};

const LAST: usize = CHUNK_SIZE as usize;

/// An iterator over all non-empty blocks in a chunk.
///
/// Empty cells are skipped; each yielded item carries the cell's local
/// position alongside its id.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current X position within the chunk (0..CHUNK_SIZE)
    local_x: usize,
    /// Current Y position within the chunk (0..CHUNK_SIZE)
    local_y: usize,
    /// Current Z position within the chunk (0..CHUNK_SIZE)
    local_z: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    ///
    /// # Arguments
    /// * `chunk_ref` - A reference to the chunk to iterate over
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Gets the next non-empty block in the chunk along with its position.
    ///
    /// # Returns
    /// - `Some((position, block))` if another non-empty block is found
    /// - `None` if there are no more blocks to iterate over
    pub fn get_next_block(&mut self) -> Option<(Point3<usize>, BlockId)> {
        while self.local_x < LAST {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            let block = self.chunk_ref.block_at(position.x, position.y, position.z);

            // advance y, then z, then x
            self.local_y += 1;
            if self.local_y == LAST {
                self.local_y = 0;
                self.local_z += 1;
                if self.local_z == LAST {
                    self.local_z = 0;
                    self.local_x += 1;
                }
            }

            if !block.is_empty() {
                return Some((position, block));
            }
        }
        None
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next_block()
    }
}
