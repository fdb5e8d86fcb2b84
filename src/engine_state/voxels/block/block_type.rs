//! # Block Type Module
//!
//! This module defines the identifiers of every block that can live in a chunk.
//! Identifiers are one byte wide and double as indices into the block catalog.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all block types of the world.
///
/// The discriminants are stable and contiguous: `EMPTY` is zero and `COUNT`
/// terminates the list. The `FromPrimitive` derive allows conversion from raw
/// bytes, which is how ids read from outside the crate are validated.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
#[allow(non_camel_case_types)]
pub enum BlockId {
    /// Air. Never meshed, never hit by a ray.
    #[default]
    EMPTY = 0,
    STONE,
    DIRT,
    /// Grass on top, dirt underneath.
    GRASS,
    WOOD,
    /// A slab occupying the lower half of its cell.
    HALF_SLAB,
    /// Two stacked half slabs. Must directly follow `HALF_SLAB`.
    SLAB,
    BRICK,
    STONE_BRICK,
    BOOKSHELF,
    DUNGEON_STONE,
    TNT,
    COBBLESTONE,
    BEDROCK,
    SAND,
    GRAVEL,
    LOG,
    SPONGE,
    WOOL,
    GREENWOOL,
    BLACKWOOL,
    COAL,
    IRON_ORE,
    IRON_BLOCK,
    GOLD_ORE,
    GOLD_BLOCK,
    DIAMOND_ORE,
    DIAMOND_BLOCK,
    EMERALD_BLOCK,
    REDSTONE_ORE,
    OBSIDIAN,
    CRAFTING_TABLE,
    FURNACE,
    DISPENSER,
    /// See-through block with opaque texels, rendered in the opaque pass.
    GLASS,
    /// Rendered in the transparent pass, never collides nor stops rays.
    WATER,
    HIGHLIGHT,
    /// Terminator. Not a real block.
    COUNT,
}

impl BlockId {
    /// Number of real block ids, `COUNT` included so the catalog can be indexed
    /// by every discriminant.
    pub const LEN: usize = BlockId::COUNT as usize + 1;

    /// Converts a raw byte to a `BlockId`.
    ///
    /// # Returns
    /// `None` if the byte is past `COUNT`.
    pub fn from_raw(raw: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(raw)
    }

    /// Converts a raw byte to a `BlockId`, treating an invalid byte as a bug.
    ///
    /// # Panics
    /// Panics if the byte does not name a block.
    pub fn from_raw_or_panic(raw: BlockTypeSize) -> Self {
        match Self::from_raw(raw) {
            Some(id) => id,
            None => panic!("invalid block id {raw}"),
        }
    }

    /// Returns the block that follows this one in the enumeration, if any.
    ///
    /// Used to turn a `HALF_SLAB` into a full `SLAB` when two are stacked.
    pub fn next(self) -> Option<Self> {
        Self::from_raw(self as BlockTypeSize + 1).filter(|id| *id != BlockId::COUNT)
    }

    /// Returns `true` for the `EMPTY` sentinel.
    #[inline]
    pub fn is_empty(self) -> bool {
        self == BlockId::EMPTY
    }
}
