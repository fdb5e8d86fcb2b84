//! City economy: building types with their constant deltas, and the player's
//! treasury that buys them and collects income.

pub mod building;
pub mod treasury;

pub use building::{Building, BuildingData, DEMOLISH_PRICE};
pub use treasury::{PlacementError, Treasury};
