//! # Application State Management
//!
//! This module drives a city without a window:
//! - configuration loading
//! - replaying scripted player actions, or laying out a demo city
//! - simulating frames against an overview camera and a counting renderer

pub mod config;

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};
use log::{info, warn};

use config::GameConfig;

use crate::engine_state::{
    economy::Building,
    rendering::{DrawStats, Frustum},
    voxels::block::block_type::BlockId,
    EngineState, PlayerAction,
};

/// Seed of the demo city's building mix.
const DEMO_CITY_SEED: u64 = 0x5eed;

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Actions that took effect
    pub actions_applied: usize,
    /// Actions refused (no money, occupied column, ...)
    pub actions_rejected: usize,
    /// Frames simulated
    pub frames: u64,
    /// Money at the end of the run
    pub money: i32,
    /// Net energy at the end of the run
    pub energy: i32,
    /// Net water at the end of the run
    pub water: i32,
    /// Income per payout at the end of the run
    pub passive_income: i32,
    /// What the last frame submitted
    pub last_frame: DrawStats,
}

/// The application: a configuration and the engine built from it.
pub struct ApplicationState {
    pub config: GameConfig,
    pub engine_state: EngineState,
}

impl ApplicationState {
    /// Builds the engine described by `config`.
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let engine_state = EngineState::new(&config)?;
        Ok(ApplicationState {
            config,
            engine_state,
        })
    }

    /// The configured actions, or a demo city if none are configured.
    pub fn scripted_actions(&self) -> Vec<PlayerAction> {
        if self.config.actions.is_empty() {
            demo_city(&self.engine_state, DEMO_CITY_SEED)
        } else {
            self.config.actions.clone()
        }
    }

    /// Replays the script, then simulates the configured number of frames.
    pub fn run(&mut self) -> RunSummary {
        let (mut applied, mut rejected) = (0, 0);
        for action in self.scripted_actions() {
            match self.engine_state.apply(&action) {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("{action:?} refused: {e:#}");
                    rejected += 1;
                }
            }
        }
        info!("Script done: {applied} applied, {rejected} refused");

        let frustum = Frustum::from_view_proj(self.overview_camera());
        let mut last_frame = DrawStats::default();
        for _ in 0..self.config.simulated_frames {
            self.engine_state.update(self.config.frame_secs);
            last_frame = DrawStats::default();
            self.engine_state.draw(&frustum, &mut last_frame);
        }

        let world = &self.engine_state.world;
        RunSummary {
            actions_applied: applied,
            actions_rejected: rejected,
            frames: self.engine_state.frames(),
            money: self.engine_state.treasury.money(),
            energy: world.energy_delta(),
            water: world.water_delta(),
            passive_income: world.passive_income(),
            last_frame,
        }
    }

    /// View-projection of a camera hovering south of the world's center and
    /// looking down at it.
    fn overview_camera(&self) -> Matrix4<f32> {
        let dims = self.config.dimensions;
        let half = dims.width_in_blocks() as f32 / 2.0;
        let center = Point3::new(half, 0.0, half);
        let eye = center + Vector3::new(0.0, half + 16.0, half * 1.5);
        let projection = perspective(Deg(75.0), 16.0 / 9.0, 0.1, 1000.0);
        projection * Matrix4::look_at_rh(eye, center, Vector3::unit_y())
    }
}

/// A main street through the world's center lined with a random mix of
/// homes, shops and factories, plus the plants to supply them.
pub fn demo_city(engine: &EngineState, seed: u64) -> Vec<PlayerAction> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let world = &engine.world;
    let width = world.dimensions().width_in_blocks();
    let (cx, cz) = (width / 2, width / 2);
    let street = (cx - 5).max(0)..(cx + 5).min(width);

    let mut actions: Vec<PlayerAction> = street
        .clone()
        .map(|x| PlayerAction::Build {
            building: Building::ROAD,
            x,
            z: cz,
        })
        .collect();

    let mix = [Building::HOUSE, Building::HOUSE, Building::SHOP, Building::FACTORY];
    for x in street.step_by(2) {
        for z in [cz - 1, cz + 1] {
            actions.push(PlayerAction::Build {
                building: mix[rng.usize(..mix.len())],
                x,
                z,
            });
        }
    }

    actions.push(PlayerAction::Build {
        building: Building::ENERGYPLANT,
        x: cx,
        z: (cz + 3).min(width - 1),
    });

    // first land column on a shore
    let shore = (0..width)
        .flat_map(|z| (0..width).map(move |x| (x, z)))
        .find(|&(x, z)| {
            world.surface_height(x, z).is_some_and(|y| {
                y >= 2
                    && world.get_cube(x, y - 1, z) != Some(BlockId::WATER)
                    && world.is_adjacent_to_water(x, y, z)
            })
        });
    if let Some((x, z)) = shore {
        actions.push(PlayerAction::Build {
            building: Building::WATERPLANT,
            x,
            z,
        });
    }

    actions
}
