//! # Voxel World
//!
//! The computational core of a voxel game: a finite 3D grid of typed blocks organized into
//! fixed-size chunks, with procedural terrain, block edits, incremental mesh and collision
//! rebuilds, and ray picking.
//!
//! ## Key Modules
//!
//! * `config` - World and terrain settings loaded from JSON
//! * `engine_state` - The world session, voxel data model, meshing and collision
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     if let Err(err) = voxel_world::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```
//!
//! ## Performance Considerations
//!
//! * Dense chunk storage with an occupancy bit mask, so empty space is skipped cheaply
//! * Face culling emits only the faces between solid blocks and open space
//! * Only chunks whose contents changed are rebuilt each tick

use cgmath::Vector3;
use log::info;

use config::WorldConfig;
use engine_state::{
    voxels::{
        block::palette::BlockKind,
        interaction::{MiningOutcome, Tool},
    },
    EngineState,
};
use error::VoxelResult;

pub mod config;
pub mod engine_state;
pub mod error;

pub const APPLICATION_INITIALIZATION_STOPWATCH: &str = "World Initialization";

/// Runs a headless world session.
///
/// Loads the configuration named by the first command line argument (defaults otherwise),
/// builds the world and performs a pick, place and mine cycle from the spawn point,
/// logging each step. Log output goes to stdout and is filtered with `RUST_LOG`.
pub fn run() -> VoxelResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };

    let stopwatch = web_time::Instant::now();
    let mut state = EngineState::new(config)?;
    info!(
        "{} took {:?}",
        APPLICATION_INITIALIZATION_STOPWATCH,
        stopwatch.elapsed()
    );

    let eye = state.spawn_point();
    let down = Vector3::new(0.0, -1.0, 0.0);
    info!("Spawn point: {:?}", eye);

    match state.pick(eye, down) {
        Some(hit) => info!(
            "Looking at {} at {:?} ({:.2} blocks away)",
            hit.block, hit.cell, hit.distance
        ),
        None => info!("Nothing within reach below the spawn point"),
    }

    if let Some(cell) = state.place(eye, down, BlockKind::WOOD.id())? {
        info!("Placed {} at {:?}", BlockKind::WOOD.id(), cell);
    }
    info!("Rebuilt chunks after placing: {:?}", state.update());

    for strike in 1..=8 {
        let outcome = state.mine(eye, down, Tool::Hand);
        info!("Strike {}: {:?}", strike, outcome);
        if !matches!(outcome, MiningOutcome::Damaged { .. }) {
            break;
        }
    }
    info!("Rebuilt chunks after mining: {:?}", state.update());

    Ok(())
}
