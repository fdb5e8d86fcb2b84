//! # Building Types
//!
//! A building occupies one column of the world's 2D overlay and is drawn as an
//! instanced cube. Each type carries constant economy deltas that the world
//! sums over everything currently placed.

use num_derive::FromPrimitive;
use phf::phf_map;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::engine_state::voxels::block::block_type::BlockId;

/// The kinds of building the overlay can hold.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
#[allow(non_camel_case_types)]
pub enum Building {
    /// Empty column.
    #[default]
    NOTHING = 0,
    TREE,
    HOUSE,
    SHOP,
    FACTORY,
    WATERPLANT,
    ENERGYPLANT,
    ROAD,
}

/// Constant per-type data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingData {
    /// Block whose textures the instanced model uses.
    pub model_block: BlockId,
    /// Energy produced (positive) or consumed (negative).
    pub energy: i32,
    /// Water produced (positive) or consumed (negative).
    pub water: i32,
    /// Income granted while connected to a road.
    pub income: i32,
    /// Purchase price, `None` for types the player cannot build.
    pub price: Option<i32>,
}

/// Cost of demolishing any building.
pub const DEMOLISH_PRICE: i32 = 25;

const NOTHING_DATA: BuildingData = BuildingData {
    model_block: BlockId::EMPTY,
    energy: 0,
    water: 0,
    income: 0,
    price: None,
};

/// Indexed by `Building as usize`.
static BUILDING_DATA: [BuildingData; Building::COUNT] = [
    NOTHING_DATA,
    BuildingData {
        model_block: BlockId::LOG,
        energy: 0,
        water: 0,
        income: 0,
        price: None,
    },
    BuildingData {
        model_block: BlockId::WOOD,
        energy: -1,
        water: -1,
        income: 2,
        price: Some(4),
    },
    BuildingData {
        model_block: BlockId::SLAB,
        energy: -1,
        water: -1,
        income: 3,
        price: Some(6),
    },
    BuildingData {
        model_block: BlockId::BRICK,
        energy: -3,
        water: -2,
        income: 6,
        price: Some(10),
    },
    BuildingData {
        model_block: BlockId::DIAMOND_BLOCK,
        energy: -1,
        water: 5,
        income: 0,
        price: Some(15),
    },
    BuildingData {
        model_block: BlockId::GOLD_BLOCK,
        energy: 5,
        water: -1,
        income: 0,
        price: Some(15),
    },
    BuildingData {
        model_block: BlockId::OBSIDIAN,
        energy: 0,
        water: 0,
        income: 0,
        price: Some(2),
    },
];

/// Lower-case names accepted in configuration files.
static BUILDING_NAMES: phf::Map<&'static str, Building> = phf_map! {
    "tree" => Building::TREE,
    "house" => Building::HOUSE,
    "shop" => Building::SHOP,
    "factory" => Building::FACTORY,
    "waterplant" => Building::WATERPLANT,
    "energyplant" => Building::ENERGYPLANT,
    "road" => Building::ROAD,
};

impl Building {
    /// Number of variants, `NOTHING` included.
    pub const COUNT: usize = 8;

    /// Every placeable type, in the order their models are drawn.
    pub const PLACEABLE: [Building; 7] = [
        Building::TREE,
        Building::ROAD,
        Building::HOUSE,
        Building::SHOP,
        Building::FACTORY,
        Building::ENERGYPLANT,
        Building::WATERPLANT,
    ];

    /// Converts a raw overlay value back into a `Building`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        num::FromPrimitive::from_u8(raw)
    }

    /// Looks a type up by its lower-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        BUILDING_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// The lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Building::NOTHING => "nothing",
            Building::TREE => "tree",
            Building::HOUSE => "house",
            Building::SHOP => "shop",
            Building::FACTORY => "factory",
            Building::WATERPLANT => "waterplant",
            Building::ENERGYPLANT => "energyplant",
            Building::ROAD => "road",
        }
    }

    /// The constant data of this type.
    pub fn data(self) -> &'static BuildingData {
        &BUILDING_DATA[self as usize]
    }

    /// Roads carry income to their neighbours but earn nothing themselves.
    pub fn is_road(self) -> bool {
        self == Building::ROAD
    }

    /// Whether the player may buy this type.
    pub fn is_buildable(self) -> bool {
        self.data().price.is_some()
    }
}

impl Serialize for Building {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Building {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Building::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown building {name:?}")))
    }
}
