//! # Terrain Generation
//!
//! Fills a freshly created world with its initial terrain. Supported methods:
//! - Layers: a 2D OpenSimplex heightmap, surface/filler material over a core, plus trees
//! - Flat: uniform layers up to a fixed height
//! - Empty: nothing
//!
//! Generation is fully determined by the configuration and the seed.

use cgmath::Point3;
use log::info;
use noise::{NoiseFn, OpenSimplex};
use web_time::Instant;

use super::World;
use crate::config::{GenerationConfig, GenerationMethod, TerrainBlocks};
use crate::error::VoxelResult;

/// Logs stacked on top of the surface block.
const TRUNK_HEIGHT: i32 = 4;
/// Free blocks a column needs above its surface to hold a tree.
const TREE_CLEARANCE: i32 = 6;
/// Minimum distance of a tree from the world's X/Z edges.
const TREE_EDGE_MARGIN: i32 = 3;

/// Counters reported by a generation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Non-air cells written, including overwrites
    pub blocks_written: usize,
    pub trees: usize,
}

/// Produces the initial terrain of a world.
pub struct TerrainGenerator {
    config: GenerationConfig,
    blocks: TerrainBlocks,
    seed: u32,
    noise: OpenSimplex,
}

impl TerrainGenerator {
    /// Creates a generator for `config`.
    ///
    /// # Errors
    /// [`crate::error::VoxelError::UnknownBlockName`] if a configured block name does not
    /// resolve.
    pub fn new(config: &GenerationConfig, seed: u32) -> VoxelResult<Self> {
        Ok(TerrainGenerator {
            config: config.clone(),
            blocks: config.blocks()?,
            seed,
            noise: OpenSimplex::new(seed),
        })
    }

    /// Surface height of layered terrain in column `(x, z)`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let frequency = self.config.frequency;
        let sample = self.noise.get([x as f64 * frequency, z as f64 * frequency]);
        (self.config.base_height as f64 + sample * self.config.height_variation) as i32
    }

    /// Writes the configured terrain into `world`.
    ///
    /// Meant for an empty world; dirty flags are left for the caller's bulk build.
    pub fn generate(&self, world: &mut World) -> VoxelResult<GenerationStats> {
        let start = Instant::now();
        let stats = match self.config.method {
            GenerationMethod::Layers => self.generate_layers(world)?,
            GenerationMethod::Flat => self.generate_flat(world)?,
            GenerationMethod::Empty => GenerationStats::default(),
        };
        info!(
            "Generated {:?} terrain in {:?}: {} blocks, {} trees",
            self.config.method,
            start.elapsed(),
            stats.blocks_written,
            stats.trees
        );
        Ok(stats)
    }

    fn generate_layers(&self, world: &mut World) -> VoxelResult<GenerationStats> {
        let size = world.size();
        let mut stats = GenerationStats::default();

        for x in 0..size.x {
            for z in 0..size.z {
                let height = self.height_at(x, z);
                for y in 0..=height.min(size.y - 1) {
                    let id = if y == height {
                        self.blocks.surface
                    } else if y > height - self.config.dirt_depth {
                        self.blocks.filler
                    } else {
                        self.blocks.core
                    };
                    world.set_block(Point3::new(x, y, z), id)?;
                    stats.blocks_written += 1;
                }
            }
        }

        // Trees go in after all columns exist, so later columns can not cut into them.
        let mut rng = fastrand::Rng::with_seed(self.seed as u64);
        for x in 0..size.x {
            for z in 0..size.z {
                let height = self.height_at(x, z);
                let eligible = height < size.y - TREE_CLEARANCE
                    && (TREE_EDGE_MARGIN..size.x - TREE_EDGE_MARGIN + 1).contains(&x)
                    && (TREE_EDGE_MARGIN..size.z - TREE_EDGE_MARGIN + 1).contains(&z);
                if eligible && rng.f64() < self.config.tree_chance {
                    stats.blocks_written += self.grow_tree(world, Point3::new(x, height + 1, z))?;
                    stats.trees += 1;
                }
            }
        }

        Ok(stats)
    }

    fn generate_flat(&self, world: &mut World) -> VoxelResult<GenerationStats> {
        let size = world.size();
        let top = self.config.flat_height.min(size.y) - 1;
        if top < 0 {
            return Ok(GenerationStats::default());
        }
        let filler_from = top - self.config.dirt_depth + 1;

        let mut blocks_written = 0;
        blocks_written += world.fill_region(
            Point3::new(0, 0, 0),
            Point3::new(size.x - 1, filler_from - 1, size.z - 1),
            self.blocks.core,
        )?;
        blocks_written += world.fill_region(
            Point3::new(0, filler_from, 0),
            Point3::new(size.x - 1, top - 1, size.z - 1),
            self.blocks.filler,
        )?;
        blocks_written += world.fill_region(
            Point3::new(0, top, 0),
            Point3::new(size.x - 1, top, size.z - 1),
            self.blocks.surface,
        )?;

        Ok(GenerationStats {
            blocks_written,
            trees: 0,
        })
    }

    /// Grows a tree whose trunk starts at `base`.
    ///
    /// # Returns
    /// Number of blocks written.
    fn grow_tree(&self, world: &mut World, base: Point3<i32>) -> VoxelResult<usize> {
        let mut cells = Vec::new();
        let log = self.blocks.log;
        let leaves = self.blocks.leaves;

        for dy in 0..TRUNK_HEIGHT {
            cells.push((Point3::new(base.x, base.y + dy, base.z), log));
        }

        // Two wide layers around the upper trunk, rounded by skipping the corners.
        let crown = base.y + 2;
        for dx in -2i32..=2 {
            for dz in -2i32..=2 {
                if (dx.abs() == 2 && dz.abs() == 2) || (dx == 0 && dz == 0) {
                    continue;
                }
                for y in crown..crown + 2 {
                    cells.push((Point3::new(base.x + dx, y, base.z + dz), leaves));
                }
            }
        }

        let top = base.y + TRUNK_HEIGHT;
        for (dx, dz) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            cells.push((Point3::new(base.x + dx, top, base.z + dz), leaves));
        }
        cells.push((Point3::new(base.x, top + 1, base.z), leaves));

        let mut written = 0;
        for (position, id) in cells {
            if world.in_bounds(position) {
                world.set_block(position, id)?;
                written += 1;
            }
        }
        Ok(written)
    }
}
