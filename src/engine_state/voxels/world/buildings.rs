//! # Building Overlay
//!
//! Buildings live on a 2D grid of `(x, z)` columns covering the world's
//! footprint. Every placement and removal keeps three totals up to date so the
//! economy never has to rescan the overlay:
//!
//! - energy and water: plain sums of the per-type constants
//! - income: a non-road building earns only while at least one of its four
//!   horizontal neighbours is a road
//!
//! Road edits therefore toggle the income of the buildings around them, but
//! only on the transitions between "no road" and "one road".

use cgmath::Point3;
use log::debug;

use crate::engine_state::{
    economy::building::Building, rendering::BuildingModel, voxels::block::block_side::BlockSide,
};

use super::World;

impl World {
    #[inline]
    fn overlay_index(&self, x: i32, z: i32) -> Option<usize> {
        let width = self.dimensions.width_in_blocks();
        if !(0..width).contains(&x) || !(0..width).contains(&z) {
            return None;
        }
        Some((x + z * width) as usize)
    }

    /// Offsets of the four horizontal neighbours of a column.
    fn horizontal_neighbours(x: i32, z: i32) -> impl Iterator<Item = (i32, i32)> {
        BlockSide::all()
            .into_iter()
            .filter(|side| !side.is_horizontal_face())
            .map(move |side| {
                let offset = side.offset();
                (x + offset.x, z + offset.z)
            })
    }

    /// The building on column `(x, z)`, `NOTHING` outside the overlay.
    pub fn get_building(&self, x: i32, z: i32) -> Building {
        self.overlay_index(x, z)
            .map_or(Building::NOTHING, |index| self.buildings[index])
    }

    /// Number of roads among the four horizontal neighbours of `(x, z)`.
    pub fn amount_of_adjacent_roads(&self, x: i32, z: i32) -> usize {
        Self::horizontal_neighbours(x, z)
            .filter(|&(nx, nz)| self.get_building(nx, nz).is_road())
            .count()
    }

    /// Places a building of `building` type at `(x, y, z)`.
    ///
    /// The overlay trusts its caller: no price or terrain checks happen here
    /// (see `Treasury::try_place`). An occupied column is replaced, its previous
    /// occupant removed first so the totals stay exact.
    ///
    /// # Arguments
    /// * `building` - The type to place; `NOTHING` is ignored
    /// * `x`, `y`, `z` - Global block coordinates; `y` is only used to position
    ///   the model
    pub fn place_building(&mut self, building: Building, x: i32, y: i32, z: i32) {
        if building == Building::NOTHING {
            debug!("Ignoring placement of NOTHING at ({x}, {y}, {z})");
            return;
        }
        let Some(index) = self.overlay_index(x, z) else {
            debug!("Ignoring {building:?} outside the overlay at ({x}, {z})");
            return;
        };

        let previous = self.buildings[index];
        if previous != Building::NOTHING {
            if let Some(old) = self.building_position(x, z) {
                debug!("Replacing {previous:?} at {old:?} with {building:?}");
                self.remove_building(old.x, old.y, old.z);
            }
        }

        self.buildings[index] = building;
        if let Some(instances) = self.instances.get_mut(&building) {
            instances.positions.push(Point3::new(x, y, z));
        }

        let data = building.data();
        self.energy_gain += data.energy;
        self.water_gain += data.water;

        if building.is_road() {
            for (nx, nz) in Self::horizontal_neighbours(x, z) {
                let neighbour = self.get_building(nx, nz);
                if neighbour != Building::NOTHING
                    && !neighbour.is_road()
                    && self.amount_of_adjacent_roads(nx, nz) == 1
                {
                    self.income += neighbour.data().income;
                    debug!("{neighbour:?} at ({nx}, {nz}) is now connected");
                }
            }
        } else if self.amount_of_adjacent_roads(x, z) > 0 {
            self.income += data.income;
        }

        self.regenerate_buffer_for(building);
    }

    /// Removes the building placed at exactly `(x, y, z)`.
    ///
    /// Does nothing if the column is empty or its occupant was placed at
    /// another height.
    pub fn remove_building(&mut self, x: i32, y: i32, z: i32) {
        let building = self.get_building(x, z);
        if building == Building::NOTHING {
            debug!("No building to remove at ({x}, {z})");
            return;
        }

        let target = Point3::new(x, y, z);
        let Some(instances) = self.instances.get_mut(&building) else {
            return;
        };
        let Some(position) = instances.positions.iter().position(|p| *p == target) else {
            debug!("No {building:?} at {target:?}");
            return;
        };
        instances.positions.remove(position);

        if let Some(index) = self.overlay_index(x, z) {
            self.buildings[index] = Building::NOTHING;
        }

        let data = building.data();
        self.energy_gain -= data.energy;
        self.water_gain -= data.water;

        if building.is_road() {
            for (nx, nz) in Self::horizontal_neighbours(x, z) {
                let neighbour = self.get_building(nx, nz);
                if neighbour != Building::NOTHING
                    && !neighbour.is_road()
                    && self.amount_of_adjacent_roads(nx, nz) == 0
                {
                    self.income -= neighbour.data().income;
                    debug!("{neighbour:?} at ({nx}, {nz}) lost its last road");
                }
            }
        } else if self.amount_of_adjacent_roads(x, z) > 0 {
            self.income -= data.income;
        }

        self.regenerate_buffer_for(building);
    }

    /// Where the building on column `(x, z)` was placed, height included.
    pub fn building_position(&self, x: i32, z: i32) -> Option<Point3<i32>> {
        self.instances
            .get(&self.get_building(x, z))?
            .positions
            .iter()
            .find(|p| p.x == x && p.z == z)
            .copied()
    }

    /// Net energy production of everything placed.
    pub fn energy_delta(&self) -> i32 {
        self.energy_gain
    }

    /// Net water production of everything placed.
    pub fn water_delta(&self) -> i32 {
        self.water_gain
    }

    /// Summed income of every non-road building touching a road, before any
    /// deficit is applied.
    pub fn connected_income(&self) -> i32 {
        self.income
    }

    /// Income per payout: the connected total, halved for an energy deficit,
    /// halved again for a water deficit, plus one.
    pub fn passive_income(&self) -> i32 {
        let mut income = self.income;
        if self.energy_gain < 0 {
            income /= 2;
        }
        if self.water_gain < 0 {
            income /= 2;
        }
        income + 1
    }

    /// Where every building of `building` type stands, in placement order.
    pub fn positions_of(&self, building: Building) -> &[Point3<i32>] {
        self.instances
            .get(&building)
            .map(|instances| instances.positions.as_slice())
            .unwrap_or(&[])
    }

    /// The instanced model of `building`, `None` for `NOTHING`.
    pub fn building_model(&self, building: Building) -> Option<&BuildingModel> {
        self.instances.get(&building).map(|instances| &instances.model)
    }

    /// Rebuilds the instance list of `building` from its positions.
    pub(crate) fn regenerate_buffer_for(&mut self, building: Building) {
        if let Some(instances) = self.instances.get_mut(&building) {
            instances.model.reset_instance_buffer(&instances.positions);
        }
    }
}
