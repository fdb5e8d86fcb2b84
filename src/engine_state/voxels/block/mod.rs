//! # Block Module
//!
//! This module provides the block catalog of the voxel world: for every
//! [`BlockId`] an immutable [`BlockData`] describing its atlas textures, its
//! behaviour flags and the render pass its faces belong to.
//!
//! The catalog is a static table built from a declarative list, so lookups are
//! total, pure and allocation free.

use block_type::BlockId;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Number of atlas cells along each side of the texture atlas.
pub const ATLAS_CELLS: u16 = 16;

/// Size of one atlas cell in normalized texture coordinates.
pub const BLOCK_TEXSIZE: f32 = 1.0 / ATLAS_CELLS as f32;

/// The render pass a block's faces are emitted into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderPass {
    /// Depth-written, no blending.
    OPAQUE = 0,
    /// Alpha-blended, depth-read only.
    TRANSPARENT = 1,
}

impl ShaderPass {
    /// Number of passes.
    pub const COUNT: usize = 2;

    /// Both passes in draw order.
    pub fn all() -> [ShaderPass; ShaderPass::COUNT] {
        [ShaderPass::OPAQUE, ShaderPass::TRANSPARENT]
    }
}

/// Behaviour flags attached to a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlockFlags(u8);

impl BlockFlags {
    pub const NONE: BlockFlags = BlockFlags(0);
    /// Texels may be fully transparent; neighbours stay visible through it.
    pub const CUTOUT: BlockFlags = BlockFlags(1 << 1);
    pub const NO_PHYSICS: BlockFlags = BlockFlags(1 << 2);
    pub const GRAVITY_WATER: BlockFlags = BlockFlags(1 << 3);
    /// Rays pass through the block.
    pub const NO_RAYCAST: BlockFlags = BlockFlags(1 << 4);
    /// The block only fills the lower half of its cell.
    pub const HALF_BLOCK: BlockFlags = BlockFlags(1 << 5);

    /// Combines two flag sets. Usable in constant tables.
    pub const fn with(self, other: BlockFlags) -> BlockFlags {
        BlockFlags(self.0 | other.0)
    }

    /// Returns `true` if every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: BlockFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Render and physics metadata of a block type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    pub id: BlockId,
    /// Atlas index of the four side faces.
    pub tex_id_side: u16,
    /// Atlas index of the top face.
    pub tex_id_top: u16,
    /// Atlas index of the bottom face.
    pub tex_id_bottom: u16,
    pub flags: BlockFlags,
    pub pass: ShaderPass,
}

impl BlockData {
    /// A block using the same texture on every face.
    const fn uniform(id: BlockId, tex: u16, flags: BlockFlags, pass: ShaderPass) -> Self {
        BlockData {
            id,
            tex_id_side: tex,
            tex_id_top: tex,
            tex_id_bottom: tex,
            flags,
            pass,
        }
    }

    /// An opaque block with distinct side, top and bottom textures.
    const fn sided(id: BlockId, side: u16, top: u16, bottom: u16, flags: BlockFlags) -> Self {
        BlockData {
            id,
            tex_id_side: side,
            tex_id_top: top,
            tex_id_bottom: bottom,
            flags,
            pass: ShaderPass::OPAQUE,
        }
    }

    /// A plain opaque block with a single texture and no flags.
    const fn solid(id: BlockId, tex: u16) -> Self {
        Self::uniform(id, tex, BlockFlags::NONE, ShaderPass::OPAQUE)
    }

    /// Gets a block's data given its id.
    ///
    /// # Panics
    /// Never for a `BlockId` value; the table has an entry for every variant,
    /// which the catalog tests check.
    #[inline]
    pub fn get(id: BlockId) -> &'static BlockData {
        &BLOCK_CATALOG[id as usize]
    }

    /// Returns `true` if the block has every flag of `flags`.
    #[inline]
    pub fn has(&self, flags: BlockFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// The block catalog, indexed by `BlockId as usize`.
pub static BLOCK_CATALOG: [BlockData; BlockId::LEN] = [
    BlockData::uniform(
        BlockId::EMPTY,
        0,
        BlockFlags::NO_PHYSICS.with(BlockFlags::NO_RAYCAST),
        ShaderPass::OPAQUE,
    ),
    BlockData::solid(BlockId::STONE, 1),
    BlockData::solid(BlockId::DIRT, 2),
    BlockData::sided(BlockId::GRASS, 3, 0, 2, BlockFlags::NONE),
    BlockData::solid(BlockId::WOOD, 4),
    BlockData::sided(BlockId::HALF_SLAB, 5, 6, 6, BlockFlags::HALF_BLOCK),
    BlockData::sided(BlockId::SLAB, 5, 6, 6, BlockFlags::NONE),
    BlockData::solid(BlockId::BRICK, 7),
    BlockData::solid(BlockId::STONE_BRICK, 54),
    BlockData::sided(BlockId::BOOKSHELF, 35, 4, 4, BlockFlags::NONE),
    BlockData::solid(BlockId::DUNGEON_STONE, 36),
    BlockData::sided(BlockId::TNT, 8, 9, 10, BlockFlags::NONE),
    BlockData::solid(BlockId::COBBLESTONE, 16),
    BlockData::solid(BlockId::BEDROCK, 17),
    BlockData::solid(BlockId::SAND, 18),
    BlockData::solid(BlockId::GRAVEL, 19),
    BlockData::sided(BlockId::LOG, 20, 21, 21, BlockFlags::NONE),
    BlockData::solid(BlockId::SPONGE, 48),
    BlockData::solid(BlockId::WOOL, 64),
    BlockData::solid(BlockId::GREENWOOL, 146),
    BlockData::solid(BlockId::BLACKWOOL, 113),
    // ores
    BlockData::solid(BlockId::COAL, 34),
    BlockData::solid(BlockId::IRON_ORE, 33),
    BlockData::solid(BlockId::IRON_BLOCK, 22),
    BlockData::solid(BlockId::GOLD_ORE, 32),
    BlockData::solid(BlockId::GOLD_BLOCK, 23),
    BlockData::solid(BlockId::DIAMOND_ORE, 50),
    BlockData::solid(BlockId::DIAMOND_BLOCK, 24),
    BlockData::solid(BlockId::EMERALD_BLOCK, 25),
    BlockData::solid(BlockId::REDSTONE_ORE, 51),
    BlockData::solid(BlockId::OBSIDIAN, 37),
    // objects
    BlockData::sided(BlockId::CRAFTING_TABLE, 59, 43, 4, BlockFlags::NONE),
    BlockData::sided(BlockId::FURNACE, 44, 62, 62, BlockFlags::NONE),
    BlockData::sided(BlockId::DISPENSER, 46, 62, 62, BlockFlags::NONE),
    // transparent
    BlockData::uniform(BlockId::GLASS, 49, BlockFlags::CUTOUT, ShaderPass::OPAQUE),
    BlockData::uniform(
        BlockId::WATER,
        205,
        BlockFlags::NO_PHYSICS
            .with(BlockFlags::GRAVITY_WATER)
            .with(BlockFlags::NO_RAYCAST),
        ShaderPass::TRANSPARENT,
    ),
    BlockData::solid(BlockId::HIGHLIGHT, 180),
    BlockData::solid(BlockId::COUNT, 0),
];
