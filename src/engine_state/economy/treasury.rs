//! # Treasury
//!
//! The player's wallet. Buying goes through here so the world's overlay can
//! stay a plain, trusting data structure: the treasury checks the column is
//! free and the price is affordable, then delegates to the world.
//! It also pays out the world's passive income on a fixed interval.

use std::fmt;

use log::{debug, info};

use super::building::{Building, DEMOLISH_PRICE};
use crate::engine_state::voxels::world::World;

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The type cannot be bought (`NOTHING`, `TREE`).
    NotBuildable(Building),
    /// The column already holds a building.
    Occupied(Building),
    /// The column is empty, so there is nothing to demolish.
    NothingToDemolish,
    /// The wallet holds less than the price.
    InsufficientFunds { price: i32, money: i32 },
    /// The column lies outside the world.
    OutOfBounds,
    /// Water plants must stand next to water.
    NoWaterNearby,
    /// The column's building stands at another height.
    WrongHeight { placed: i32 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NotBuildable(b) => write!(f, "{b:?} cannot be built"),
            PlacementError::Occupied(b) => write!(f, "column already holds a {b:?}"),
            PlacementError::NothingToDemolish => write!(f, "nothing to demolish"),
            PlacementError::InsufficientFunds { price, money } => {
                write!(f, "costs {price} but only {money} available")
            }
            PlacementError::OutOfBounds => write!(f, "outside the world"),
            PlacementError::NoWaterNearby => write!(f, "no water nearby"),
            PlacementError::WrongHeight { placed } => {
                write!(f, "the building on this column stands at height {placed}")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Money and the passive income timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Treasury {
    money: i32,
    income_interval: f32,
    cooldown: f32,
}

impl Treasury {
    /// Creates a wallet holding `starting_money` that is paid every
    /// `income_interval` seconds.
    pub fn new(starting_money: i32, income_interval: f32) -> Self {
        Treasury {
            money: starting_money,
            income_interval,
            cooldown: income_interval,
        }
    }

    pub fn money(&self) -> i32 {
        self.money
    }

    /// Seconds until the next payout.
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn charge(&mut self, price: i32) -> Result<(), PlacementError> {
        if self.money < price {
            return Err(PlacementError::InsufficientFunds {
                price,
                money: self.money,
            });
        }
        self.money -= price;
        Ok(())
    }

    fn in_bounds(world: &World, x: i32, z: i32) -> bool {
        let width = world.dimensions().width_in_blocks();
        (0..width).contains(&x) && (0..width).contains(&z)
    }

    /// Buys and places a building.
    ///
    /// # Returns
    /// The money left, or why nothing was placed. Nothing is charged on error.
    pub fn try_place(
        &mut self,
        world: &mut World,
        building: Building,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<i32, PlacementError> {
        let Some(price) = building.data().price else {
            return Err(PlacementError::NotBuildable(building));
        };
        if !Self::in_bounds(world, x, z) {
            return Err(PlacementError::OutOfBounds);
        }
        let occupant = world.get_building(x, z);
        if occupant != Building::NOTHING {
            return Err(PlacementError::Occupied(occupant));
        }
        if building == Building::WATERPLANT && !world.is_adjacent_to_water(x, y, z) {
            return Err(PlacementError::NoWaterNearby);
        }

        self.charge(price)?;
        world.place_building(building, x, y, z);
        debug!("Bought {building:?} at ({x}, {y}, {z}) for {price}");
        Ok(self.money)
    }

    /// Pays to demolish whatever stands on column `(x, z)`.
    ///
    /// `y` must be the height the building was placed at.
    pub fn try_demolish(
        &mut self,
        world: &mut World,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<i32, PlacementError> {
        if !Self::in_bounds(world, x, z) {
            return Err(PlacementError::OutOfBounds);
        }
        let occupant = world.get_building(x, z);
        if occupant == Building::NOTHING {
            return Err(PlacementError::NothingToDemolish);
        }
        if let Some(placed) = world.building_position(x, z) {
            if placed.y != y {
                return Err(PlacementError::WrongHeight { placed: placed.y });
            }
        }

        self.charge(DEMOLISH_PRICE)?;
        world.remove_building(x, y, z);
        debug!("Demolished {occupant:?} at ({x}, {y}, {z})");
        Ok(self.money)
    }

    /// Advances the income timer by `dt` seconds, paying
    /// [`World::passive_income`] for every interval that elapsed.
    ///
    /// # Returns
    /// The total paid during this tick.
    pub fn tick(&mut self, world: &World, dt: f32) -> i32 {
        if self.income_interval <= 0.0 || !dt.is_finite() {
            return 0;
        }
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return 0;
        }

        let payouts = (-self.cooldown / self.income_interval).floor() + 1.0;
        self.cooldown += payouts * self.income_interval;
        let payouts = payouts.min(i32::MAX as f32) as i32;

        let paid = world.passive_income().saturating_mul(payouts);
        if paid != 0 {
            self.money = self.money.saturating_add(paid);
            info!("Passive income +{paid} over {payouts} payouts, treasury at {}", self.money);
        }
        paid
    }
}
