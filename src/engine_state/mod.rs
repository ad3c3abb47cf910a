//! # Engine State Module
//!
//! The session layer of the voxel core: it owns the world built from a configuration and
//! drives the maintenance tick that keeps meshes and collision in step with block edits.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world and the player's mining progress
//! * `voxels` - Block types, chunks, the world grid, ray picking and generation
//! * `rendering` - Renderer-facing mesh data, texture atlas and vertex layout
//! * `physics` - Static collision shapes derived from chunk meshes
//!
//! ## Lifecycle
//!
//! 1. `EngineState::new` generates the terrain, builds every chunk once and clears the
//!    dirty flags
//! 2. Gameplay picks, places and mines through the session
//! 3. `EngineState::update` rebuilds whatever those edits dirtied

use cgmath::{Point3, Vector3};
use log::info;
use web_time::Instant;

use voxels::{
    block::BlockId,
    interaction::{place_against, MiningOutcome, MiningProgress, Tool},
    world::{generation::TerrainGenerator, Hit, World},
};

use crate::config::WorldConfig;
use crate::error::VoxelResult;

pub mod physics;
pub mod rendering;
pub mod voxels;

/// A running voxel world session.
///
/// # Examples
///
/// ```
/// use voxel_world::config::{GenerationMethod, WorldConfig};
/// use voxel_world::engine_state::EngineState;
///
/// let mut config = WorldConfig { size_x: 32, size_y: 16, size_z: 32, ..WorldConfig::default() };
/// config.generation.method = GenerationMethod::Flat;
///
/// let mut state = EngineState::new(config).unwrap();
/// assert!(state.world().dirty_chunks().is_empty());
/// assert!(state.update().is_empty());
/// ```
pub struct EngineState {
    config: WorldConfig,
    world: World,
    mining: MiningProgress,
}

impl EngineState {
    /// Creates the world described by `config`, generates its terrain and builds every
    /// chunk's mesh and collision.
    ///
    /// # Errors
    /// Fails if the configuration is invalid.
    pub fn new(config: WorldConfig) -> VoxelResult<Self> {
        let start = Instant::now();
        config.validate()?;

        let mut world = World::from_config(&config)?;
        let generator = TerrainGenerator::new(&config.generation, config.seed)?;
        generator.generate(&mut world)?;

        world.build_all_meshes();
        world.clear_all_dirty_flags();

        info!(
            "World session ready in {:?} ({} chunks)",
            start.elapsed(),
            world.chunks().len()
        );

        Ok(EngineState {
            config,
            world,
            mining: MiningProgress::new(),
        })
    }

    /// Maintenance tick: rebuilds every chunk dirtied since the last tick.
    ///
    /// # Returns
    /// Positions of the rebuilt chunks.
    pub fn update(&mut self) -> Vec<Point3<i32>> {
        self.world.rebuild_dirty_chunks()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Where a player should appear in this world.
    pub fn spawn_point(&self) -> Point3<f32> {
        self.world.recommended_spawn(self.config.ground_height)
    }

    /// The first solid block within reach along a view ray.
    pub fn pick(&self, eye: Point3<f32>, look: Vector3<f32>) -> Option<Hit> {
        self.world.pick_first_solid(eye, look, self.config.reach)
    }

    /// Places `id` against the face the view ray strikes.
    ///
    /// # Returns
    /// The cell that received the block, if any.
    pub fn place(
        &mut self,
        eye: Point3<f32>,
        look: Vector3<f32>,
        id: BlockId,
    ) -> VoxelResult<Option<Point3<i32>>> {
        match self.pick(eye, look) {
            Some(hit) => place_against(&mut self.world, &hit, id),
            None => Ok(None),
        }
    }

    /// Strikes the block the view ray points at.
    pub fn mine(&mut self, eye: Point3<f32>, look: Vector3<f32>, tool: Tool) -> MiningOutcome {
        match self.pick(eye, look) {
            Some(hit) => self.mining.strike(&mut self.world, &hit, tool),
            None => {
                self.mining.reset();
                MiningOutcome::Nothing
            }
        }
    }
}
