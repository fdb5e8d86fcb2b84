//! Breaking and placing blocks at a picked location.

use log::debug;

use crate::engine_state::voxels::block::{block_type::BlockId, BlockData, BlockFlags};

use super::{BlockHit, World};

/// Applies block edits with a selected block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEditor {
    selected: BlockId,
}

impl Default for BlockEditor {
    fn default() -> Self {
        BlockEditor::new(BlockId::STONE)
    }
}

impl BlockEditor {
    pub fn new(selected: BlockId) -> Self {
        BlockEditor { selected }
    }

    /// The block that [`BlockEditor::place_block`] writes.
    pub fn selected(&self) -> BlockId {
        self.selected
    }

    pub fn select(&mut self, block: BlockId) {
        self.selected = block;
    }

    /// Selects the next real block, wrapping past the last one to `STONE`.
    pub fn select_next(&mut self) {
        self.selected = match self.selected.next() {
            Some(next) if next != BlockId::HIGHLIGHT => next,
            _ => BlockId::STONE,
        };
    }

    /// Clears the hit cell.
    pub fn break_block(&self, world: &mut World, hit: &BlockHit) {
        let p = hit.position;
        world.update_block(p.x, p.y, p.z, BlockId::EMPTY);
    }

    /// Places the selected block against the hit cell.
    ///
    /// A half block hit with the same half block selected merges into the full
    /// block that follows it. Otherwise the selected block fills the cell the
    /// ray crossed before the hit.
    ///
    /// # Returns
    /// `false` when nothing was placed, i.e. the ray started inside the hit
    /// cell.
    pub fn place_block(&self, world: &mut World, hit: &BlockHit) -> bool {
        let p = hit.position;
        if BlockData::get(hit.block).has(BlockFlags::HALF_BLOCK) && hit.block == self.selected {
            if let Some(merged) = self.selected.next() {
                debug!("Merging {:?} into {merged:?} at {p:?}", self.selected);
                world.update_block(p.x, p.y, p.z, merged);
                return true;
            }
        }

        let Some(previous) = hit.previous else {
            return false;
        };
        world.update_block(previous.x, previous.y, previous.z, self.selected);
        true
    }
}
