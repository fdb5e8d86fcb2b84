#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel City
//!
//! A voxel world split into chunks, with procedural and heightmap terrain
//! generation, face-culled chunk meshing, block editing and a building overlay
//! that drives a small city economy.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration and the headless driver
//! * `engine_state` - Blocks, chunks, the world, buildings and rendering
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_city::run();
//! }
//! ```
//!
//! The first command line argument, if any, names a JSON configuration file
//! (see [`application_state::config::GameConfig`]).

use log::{error, info};

pub mod application_state;
pub mod engine_state;

pub use application_state::{config::GameConfig, ApplicationState, RunSummary};
pub use engine_state::{
    economy::{Building, PlacementError, Treasury},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockId},
        chunk::Chunk,
        world::{World, WorldDimensions},
    },
    EngineState, PlayerAction,
};

/// Builds and runs the configured city.
pub fn run_with(config: GameConfig) -> anyhow::Result<RunSummary> {
    let mut state = ApplicationState::new(config)?;
    Ok(state.run())
}

/// Loads the configuration named on the command line, or the defaults, and
/// runs it to completion.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };

    match config.and_then(run_with) {
        Ok(summary) => info!(
            "Finished after {} frames: money {}, energy {}, water {}, income {}",
            summary.frames, summary.money, summary.energy, summary.water, summary.passive_income
        ),
        Err(e) => error!("{e:#}"),
    }
}
