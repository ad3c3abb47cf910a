//! # World Module
//!
//! This module provides the `World` struct, a finite voxel grid made of a dense array of
//! chunks. It is the only writer of block data and the central coordinator for edits,
//! dirty tracking and mesh/collision rebuilds.
//!
//! ## Architecture
//!
//! Every chunk slot of the world exists from construction on; there is no streaming.
//! Chunks live in one flat vector indexed by `cz * countY * countX + cy * countX + cx`,
//! so lookups are O(1) without hashing.
//!
//! ## Coordinates
//!
//! World (block) coordinates are split into a chunk position and a local position with
//! floor division and Euclidean remainder, so negative coordinates map to the chunk below
//! zero instead of being folded onto chunk zero.
//!
//! ## Rebuild Protocol
//!
//! - Edits mark the owning chunk dirty, and also the neighbor chunk across any chunk face
//!   the edited cell touches
//! - `rebuild_dirty_chunks` rebuilds the mesh and collision of every dirty chunk, then
//!   clears its flag
//! - `build_all_meshes` followed by `clear_all_dirty_flags` is the bulk path used after
//!   terrain generation

use cgmath::{Point3, Vector3};
use log::{debug, info};
use web_time::Instant;

use super::block::{registry::BlockRegistry, BlockId};
use super::chunk::{Chunk, CHUNK_DIMENSION};
use crate::config::WorldConfig;
use crate::error::{VoxelError, VoxelResult};

pub mod generation;
pub mod ray;

pub use ray::Hit;

/// Blocks added above the top solid block when computing a spawn point.
const SPAWN_CLEARANCE: f32 = 3.0;

/// A finite voxel world composed of a dense grid of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::rendering::texture::TextureAtlas;
/// use voxel_world::engine_state::voxels::{
///     block::{palette::BlockKind, registry::BlockRegistry, BlockId},
///     world::World,
/// };
///
/// let registry = BlockRegistry::default_palette(TextureAtlas::default()).unwrap();
/// let mut world = World::new(32, 16, 32, registry).unwrap();
///
/// world.set_block(Point3::new(3, 4, 5), BlockKind::STONE.id()).unwrap();
/// assert_eq!(world.get_block(Point3::new(3, 4, 5)), BlockKind::STONE.id());
///
/// // Reads outside the world report air.
/// assert_eq!(world.get_block(Point3::new(-1, 4, 5)), BlockId::AIR);
/// ```
#[derive(Debug)]
pub struct World {
    /// Dimensions of the world in blocks
    size: Vector3<i32>,
    /// Number of chunks along each axis, `ceil(size / CHUNK_DIMENSION)`
    chunk_counts: Vector3<i32>,
    chunks: Vec<Chunk>,
    registry: BlockRegistry,
}

impl World {
    /// Creates an all-air world of the given size in blocks.
    ///
    /// # Arguments
    /// * `size_x`, `size_y`, `size_z` - Dimensions in blocks, each at least 1
    /// * `registry` - Block types that may be written into this world
    ///
    /// # Errors
    /// [`VoxelError::InvalidDimensions`] if any dimension is not positive.
    pub fn new(
        size_x: i32,
        size_y: i32,
        size_z: i32,
        registry: BlockRegistry,
    ) -> VoxelResult<Self> {
        if size_x <= 0 || size_y <= 0 || size_z <= 0 {
            return Err(VoxelError::InvalidDimensions {
                x: size_x,
                y: size_y,
                z: size_z,
            });
        }

        let size = Vector3::new(size_x, size_y, size_z);
        let chunk_counts = size.map(|blocks| (blocks + CHUNK_DIMENSION - 1) / CHUNK_DIMENSION);

        let mut chunks =
            Vec::with_capacity((chunk_counts.x * chunk_counts.y * chunk_counts.z) as usize);
        for cz in 0..chunk_counts.z {
            for cy in 0..chunk_counts.y {
                for cx in 0..chunk_counts.x {
                    chunks.push(Chunk::new(Point3::new(cx, cy, cz)));
                }
            }
        }

        debug!(
            "Created {}x{}x{} world with {} chunks",
            size_x,
            size_y,
            size_z,
            chunks.len()
        );

        Ok(World {
            size,
            chunk_counts,
            chunks,
            registry,
        })
    }

    /// Creates an empty world sized and textured after `config`, with the built-in palette.
    pub fn from_config(config: &WorldConfig) -> VoxelResult<Self> {
        let registry = BlockRegistry::default_palette(config.atlas)?;
        World::new(config.size_x, config.size_y, config.size_z, registry)
    }

    /// Dimensions of the world in blocks.
    pub fn size(&self) -> Vector3<i32> {
        self.size
    }

    /// Number of chunks along each axis.
    pub fn chunk_counts(&self) -> Vector3<i32> {
        self.chunk_counts
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Splits a world coordinate into the chunk holding it and the position inside that chunk.
    pub fn world_to_chunk(position: Point3<i32>) -> (Point3<i32>, Point3<usize>) {
        let chunk = position.map(|v| v.div_euclid(CHUNK_DIMENSION));
        let local = position.map(|v| v.rem_euclid(CHUNK_DIMENSION) as usize);
        (chunk, local)
    }

    /// Inverse of [`World::world_to_chunk`].
    pub fn chunk_to_world(chunk: Point3<i32>, local: Point3<usize>) -> Point3<i32> {
        Point3::new(
            chunk.x * CHUNK_DIMENSION + local.x as i32,
            chunk.y * CHUNK_DIMENSION + local.y as i32,
            chunk.z * CHUNK_DIMENSION + local.z as i32,
        )
    }

    /// Index of the chunk at `chunk` in the chunk array, if it is part of the world.
    fn chunk_index(&self, chunk: Point3<i32>) -> Option<usize> {
        let counts = self.chunk_counts;
        let inside = (0..counts.x).contains(&chunk.x)
            && (0..counts.y).contains(&chunk.y)
            && (0..counts.z).contains(&chunk.z);
        inside.then(|| (chunk.z * counts.y * counts.x + chunk.y * counts.x + chunk.x) as usize)
    }

    /// The chunk at chunk coordinates `chunk`.
    pub fn chunk(&self, chunk: Point3<i32>) -> Option<&Chunk> {
        self.chunk_index(chunk).map(|index| &self.chunks[index])
    }

    /// All chunks, x fastest, then y, then z.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Whether `position` lies inside `[0, size)` on every axis.
    pub fn in_bounds(&self, position: Point3<i32>) -> bool {
        (0..self.size.x).contains(&position.x)
            && (0..self.size.y).contains(&position.y)
            && (0..self.size.z).contains(&position.z)
    }

    /// The block at `position`; air for any coordinate outside the world.
    pub fn get_block(&self, position: Point3<i32>) -> BlockId {
        if !self.in_bounds(position) {
            return BlockId::AIR;
        }
        let (chunk, local) = Self::world_to_chunk(position);
        self.chunk(chunk).map_or(BlockId::AIR, |chunk| chunk.get(local))
    }

    /// Whether the block at `position` is solid. Always `false` outside the world.
    pub fn is_solid(&self, position: Point3<i32>) -> bool {
        self.registry.is_solid(self.get_block(position))
    }

    /// Writes `id` at `position` and marks the affected chunks dirty.
    ///
    /// The owning chunk is always marked. When the cell lies on a chunk face, the chunk
    /// across that face is marked too, since its face culling next to the edit may change.
    /// A corner cell dirties up to three neighbors.
    ///
    /// Writes outside the world are ignored.
    ///
    /// # Errors
    /// [`VoxelError::UnknownBlockType`] if `id` is neither air nor registered. Nothing is
    /// written in that case.
    pub fn set_block(&mut self, position: Point3<i32>, id: BlockId) -> VoxelResult<()> {
        if !self.registry.is_writable(id) {
            return Err(VoxelError::UnknownBlockType(id));
        }
        if !self.in_bounds(position) {
            return Ok(());
        }

        let (chunk_position, local) = Self::world_to_chunk(position);
        if let Some(index) = self.chunk_index(chunk_position) {
            let chunk = &mut self.chunks[index];
            chunk.set(local, id);
            chunk.mark_dirty();
        }

        let last = (CHUNK_DIMENSION - 1) as usize;
        let local = [local.x, local.y, local.z];
        for axis in 0..3 {
            let step = if local[axis] == 0 {
                -1
            } else if local[axis] == last {
                1
            } else {
                continue;
            };
            let mut neighbor = chunk_position;
            neighbor[axis] += step;
            self.mark_chunk_dirty(neighbor);
        }
        Ok(())
    }

    /// Replaces the block at `position` with air.
    ///
    /// Breaking air is allowed and still marks the affected chunks dirty, so repeated
    /// breaks of the same cell all succeed.
    ///
    /// # Returns
    /// `false` only if `position` is outside the world.
    pub fn break_at(&mut self, position: Point3<i32>) -> bool {
        if !self.in_bounds(position) {
            return false;
        }
        self.set_block(position, BlockId::AIR).is_ok()
    }

    /// Writes `id` into every cell of the inclusive box `min..=max`, clipped to the world.
    ///
    /// Chunks are marked once per chunk instead of once per cell: every chunk that
    /// intersects the box grown by one cell ends up dirty.
    ///
    /// # Returns
    /// Number of cells written.
    pub fn fill_region(
        &mut self,
        min: Point3<i32>,
        max: Point3<i32>,
        id: BlockId,
    ) -> VoxelResult<usize> {
        if !self.registry.is_writable(id) {
            return Err(VoxelError::UnknownBlockType(id));
        }

        let low = Point3::new(min.x.max(0), min.y.max(0), min.z.max(0));
        let high = Point3::new(
            max.x.min(self.size.x - 1),
            max.y.min(self.size.y - 1),
            max.z.min(self.size.z - 1),
        );
        if low.x > high.x || low.y > high.y || low.z > high.z {
            return Ok(0);
        }

        let mut written = 0;
        for z in low.z..=high.z {
            for y in low.y..=high.y {
                for x in low.x..=high.x {
                    let (chunk, local) = Self::world_to_chunk(Point3::new(x, y, z));
                    if let Some(index) = self.chunk_index(chunk) {
                        self.chunks[index].set(local, id);
                        written += 1;
                    }
                }
            }
        }

        let (chunk_low, _) = Self::world_to_chunk(low.map(|v| v - 1));
        let (chunk_high, _) = Self::world_to_chunk(high.map(|v| v + 1));
        for cz in chunk_low.z..=chunk_high.z {
            for cy in chunk_low.y..=chunk_high.y {
                for cx in chunk_low.x..=chunk_high.x {
                    self.mark_chunk_dirty(Point3::new(cx, cy, cz));
                }
            }
        }

        Ok(written)
    }

    /// Marks the chunk at `chunk` dirty.
    ///
    /// # Returns
    /// `false` if no such chunk exists.
    pub fn mark_chunk_dirty(&mut self, chunk: Point3<i32>) -> bool {
        match self.chunk_index(chunk) {
            Some(index) => {
                self.chunks[index].mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Positions of all dirty chunks, in chunk array order.
    pub fn dirty_chunks(&self) -> Vec<Point3<i32>> {
        self.chunks
            .iter()
            .filter(|chunk| chunk.is_dirty())
            .map(|chunk| chunk.position())
            .collect()
    }

    /// Rebuilds the mesh and collision of the chunk at `index` from current block data.
    fn rebuild_chunk(&mut self, index: usize) {
        let mesh = self.chunks[index].generate_mesh(&self.registry, |p| self.is_solid(p));
        let chunk = &mut self.chunks[index];
        chunk.replace_mesh(mesh);
        chunk.build_collision();
    }

    /// Rebuilds every chunk's mesh and collision, dirty or not.
    ///
    /// Dirty flags are left alone; the caller clears them with
    /// [`World::clear_all_dirty_flags`] once the bulk build is done.
    pub fn build_all_meshes(&mut self) {
        let start = Instant::now();
        for index in 0..self.chunks.len() {
            self.rebuild_chunk(index);
        }
        info!(
            "Built meshes for {} chunks in {:?}",
            self.chunks.len(),
            start.elapsed()
        );
    }

    pub fn clear_all_dirty_flags(&mut self) {
        for chunk in &mut self.chunks {
            chunk.clear_dirty();
        }
    }

    /// Rebuilds the mesh and collision of every dirty chunk and clears its flag.
    ///
    /// Neighbor solidity is read from block data, never from other chunks' meshes, so the
    /// order chunks are visited in does not affect the result.
    ///
    /// # Returns
    /// Positions of the rebuilt chunks, in chunk array order.
    pub fn rebuild_dirty_chunks(&mut self) -> Vec<Point3<i32>> {
        let start = Instant::now();
        let mut rebuilt = Vec::new();

        for index in 0..self.chunks.len() {
            if !self.chunks[index].is_dirty() {
                continue;
            }
            self.rebuild_chunk(index);
            let chunk = &mut self.chunks[index];
            chunk.clear_dirty();
            rebuilt.push(chunk.position());
        }

        if !rebuilt.is_empty() {
            info!(
                "Rebuilt {} dirty chunks in {:?}",
                rebuilt.len(),
                start.elapsed()
            );
        }
        rebuilt
    }

    /// Height of the highest solid block in column `(x, z)`.
    ///
    /// # Returns
    /// `None` if the column is outside the world or holds no solid block.
    pub fn top_solid_y(&self, x: i32, z: i32) -> Option<i32> {
        if !(0..self.size.x).contains(&x) || !(0..self.size.z).contains(&z) {
            return None;
        }
        (0..self.size.y)
            .rev()
            .find(|y| self.is_solid(Point3::new(x, *y, z)))
    }

    /// A spawn point above the center column of the world.
    ///
    /// # Arguments
    /// * `ground_height` - Height used when the center column has no solid block
    ///
    /// # Returns
    /// The center of the column, a few blocks above its top solid block.
    pub fn recommended_spawn(&self, ground_height: i32) -> Point3<f32> {
        let center_x = self.size.x / 2;
        let center_z = self.size.z / 2;
        let top = self.top_solid_y(center_x, center_z).unwrap_or(ground_height);
        Point3::new(
            center_x as f32 + 0.5,
            top as f32 + SPAWN_CLEARANCE,
            center_z as f32 + 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::texture::TextureAtlas;
    use crate::engine_state::voxels::block::palette::BlockKind;
    use std::sync::Arc;

    fn world(x: i32, y: i32, z: i32) -> World {
        let registry = BlockRegistry::default_palette(TextureAtlas::default()).unwrap();
        World::new(x, y, z, registry).unwrap()
    }

    fn clean_world() -> World {
        let mut world = world(48, 48, 48);
        world.clear_all_dirty_flags();
        world
    }

    fn p(x: i32, y: i32, z: i32) -> Point3<i32> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_invalid_dimensions() {
        let registry = BlockRegistry::default_palette(TextureAtlas::default()).unwrap();
        assert!(matches!(
            World::new(16, 0, 16, registry),
            Err(VoxelError::InvalidDimensions { x: 16, y: 0, z: 16 })
        ));
    }

    #[test]
    fn test_chunk_counts_round_up() {
        let world = world(20, 10, 33);
        assert_eq!(world.chunk_counts(), Vector3::new(2, 1, 3));
        assert_eq!(world.chunks().len(), 6);
        // Chunk array order is x fastest, then y, then z.
        assert_eq!(world.chunks()[1].position(), p(1, 0, 0));
        assert_eq!(world.chunks()[2].position(), p(0, 0, 1));
        assert!(world.chunk(p(1, 0, 2)).is_some());
        assert!(world.chunk(p(2, 0, 0)).is_none());
    }

    #[test]
    fn test_coordinate_conversion() {
        assert_eq!(World::world_to_chunk(p(17, 3, 31)), (p(1, 0, 1), Point3::new(1, 3, 15)));
        assert_eq!(World::world_to_chunk(p(-1, -16, -17)), (p(-1, -1, -2), Point3::new(15, 0, 15)));
        for position in [p(0, 0, 0), p(15, 16, 47), p(-3, 21, -40)] {
            let (chunk, local) = World::world_to_chunk(position);
            assert_eq!(World::chunk_to_world(chunk, local), position);
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut world = world(20, 10, 33);
        let corner = p(19, 9, 32);
        world.set_block(corner, BlockKind::SAND.id()).unwrap();
        assert_eq!(world.get_block(corner), BlockKind::SAND.id());
        assert!(world.is_solid(corner));
        assert_eq!(
            world.chunk(p(1, 0, 2)).unwrap().get(Point3::new(3, 9, 0)),
            BlockKind::SAND.id()
        );
    }

    #[test]
    fn test_out_of_bounds_is_air_and_ignored() {
        let mut world = world(20, 10, 33);
        for position in [p(-1, 0, 0), p(20, 0, 0), p(0, 10, 0), p(0, 0, 33), p(0, -5, 0)] {
            assert_eq!(world.get_block(position), BlockId::AIR);
            assert!(!world.is_solid(position));
            world.set_block(position, BlockKind::STONE.id()).unwrap();
            assert_eq!(world.get_block(position), BlockId::AIR);
        }
        // Cells past the world edge inside an allocated chunk stay unreachable too.
        world.set_block(p(25, 0, 0), BlockKind::STONE.id()).unwrap();
        assert!(world.chunk(p(1, 0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let mut world = clean_world();
        let result = world.set_block(p(1, 1, 1), BlockId(200));
        assert!(matches!(result, Err(VoxelError::UnknownBlockType(BlockId(200)))));
        assert_eq!(world.get_block(p(1, 1, 1)), BlockId::AIR);
        assert!(world.dirty_chunks().is_empty());
    }

    #[test]
    fn test_interior_edit_marks_only_owner() {
        let mut world = clean_world();
        world.set_block(p(21, 22, 23), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.dirty_chunks(), vec![p(1, 1, 1)]);
    }

    #[test]
    fn test_face_edit_marks_neighbor() {
        let mut world = clean_world();
        world.set_block(p(16, 20, 20), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.dirty_chunks(), vec![p(0, 1, 1), p(1, 1, 1)]);

        let mut world = clean_world();
        world.set_block(p(20, 31, 20), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.dirty_chunks(), vec![p(1, 1, 1), p(1, 2, 1)]);

        let mut world = clean_world();
        world.set_block(p(20, 20, 16), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.dirty_chunks(), vec![p(1, 1, 0), p(1, 1, 1)]);
    }

    #[test]
    fn test_corner_edit_marks_three_neighbors() {
        let mut world = clean_world();
        world.set_block(p(31, 31, 31), BlockKind::DIRT.id()).unwrap();
        assert_eq!(
            world.dirty_chunks(),
            vec![p(1, 1, 1), p(2, 1, 1), p(1, 2, 1), p(1, 1, 2)]
        );
    }

    #[test]
    fn test_world_edge_edit_has_no_missing_neighbor() {
        let mut world = clean_world();
        world.set_block(p(0, 20, 20), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.dirty_chunks(), vec![p(0, 1, 1)]);
    }

    #[test]
    fn test_break_at() {
        let mut world = clean_world();
        world.set_block(p(5, 5, 5), BlockKind::LOG.id()).unwrap();
        world.clear_all_dirty_flags();
        assert!(world.break_at(p(5, 5, 5)));
        assert_eq!(world.get_block(p(5, 5, 5)), BlockId::AIR);
        assert_eq!(world.dirty_chunks(), vec![p(0, 0, 0)]);

        assert!(!world.break_at(p(-1, 5, 5)));
        assert!(!world.break_at(p(5, 48, 5)));
    }

    #[test]
    fn test_break_at_is_idempotent() {
        let mut world = clean_world();
        assert!(world.break_at(p(5, 5, 5)));
        assert!(world.break_at(p(5, 5, 5)));
        assert_eq!(world.get_block(p(5, 5, 5)), BlockId::AIR);
        assert_eq!(world.dirty_chunks(), vec![p(0, 0, 0)]);
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut world = world(20, 10, 33);
        let extremes = [
            p(i32::MIN, 0, 0),
            p(i32::MAX, 0, 0),
            p(0, i32::MIN, 0),
            p(0, i32::MAX, 0),
            p(0, 0, i32::MIN),
            p(i32::MAX, i32::MAX, i32::MAX),
            p(i32::MIN, i32::MIN, i32::MIN),
        ];
        world.clear_all_dirty_flags();
        for position in extremes {
            assert_eq!(world.get_block(position), BlockId::AIR);
            assert!(!world.is_solid(position));
            world.set_block(position, BlockKind::STONE.id()).unwrap();
            assert!(!world.break_at(position));
        }
        assert!(world.dirty_chunks().is_empty());
        assert_eq!(world.top_solid_y(i32::MIN, i32::MAX), None);

        let low = p(i32::MIN, i32::MIN, i32::MIN);
        let high = p(i32::MAX, 0, i32::MAX);
        let written = world.fill_region(low, high, BlockKind::DIRT.id()).unwrap();
        assert_eq!(written, 20 * 33);
    }

    #[test]
    fn test_fill_region_clips_and_marks() {
        let mut world = clean_world();
        let written = world
            .fill_region(p(-4, 0, -4), p(3, 1, 3), BlockKind::STONE.id())
            .unwrap();
        assert_eq!(written, 4 * 2 * 4);
        assert_eq!(world.get_block(p(3, 1, 3)), BlockKind::STONE.id());
        assert_eq!(world.get_block(p(4, 1, 3)), BlockId::AIR);
        assert_eq!(world.dirty_chunks(), vec![p(0, 0, 0)]);

        let written = world
            .fill_region(p(15, 0, 0), p(15, 0, 0), BlockKind::STONE.id())
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(world.dirty_chunks(), vec![p(0, 0, 0), p(1, 0, 0)]);

        assert_eq!(
            world.fill_region(p(60, 0, 0), p(70, 5, 5), BlockKind::STONE.id()).unwrap(),
            0
        );
        assert!(world.fill_region(p(0, 0, 0), p(1, 1, 1), BlockId(99)).is_err());
    }

    #[test]
    fn test_new_chunks_start_dirty_and_bulk_build_clears_nothing() {
        let mut world = world(32, 16, 16);
        assert_eq!(world.dirty_chunks().len(), 2);
        world.build_all_meshes();
        assert_eq!(world.dirty_chunks().len(), 2);
        assert!(world.chunks().iter().all(|chunk| chunk.mesh().is_some()));
        world.clear_all_dirty_flags();
        assert!(world.dirty_chunks().is_empty());
    }

    #[test]
    fn test_cross_chunk_faces_are_culled() {
        let mut world = world(32, 16, 16);
        world.set_block(p(15, 5, 5), BlockKind::STONE.id()).unwrap();
        world.set_block(p(16, 5, 5), BlockKind::STONE.id()).unwrap();
        world.rebuild_dirty_chunks();

        for chunk in world.chunks() {
            assert_eq!(chunk.mesh().unwrap().face_count(), 5);
            assert_eq!(chunk.collision().unwrap().triangle_count(), 10);
        }
    }

    #[test]
    fn test_edit_across_boundary_updates_neighbor_mesh() {
        let mut world = world(32, 16, 16);
        world.set_block(p(15, 5, 5), BlockKind::STONE.id()).unwrap();
        world.build_all_meshes();
        world.clear_all_dirty_flags();
        assert_eq!(world.chunks()[0].mesh().unwrap().face_count(), 6);

        world.set_block(p(16, 5, 5), BlockKind::STONE.id()).unwrap();
        assert_eq!(world.rebuild_dirty_chunks(), vec![p(0, 0, 0), p(1, 0, 0)]);
        assert_eq!(world.chunks()[0].mesh().unwrap().face_count(), 5);

        world.break_at(p(16, 5, 5));
        world.rebuild_dirty_chunks();
        assert_eq!(world.chunks()[0].mesh().unwrap().face_count(), 6);
        assert!(world.chunks()[1].mesh().unwrap().is_empty());
        assert!(world.chunks()[1].collision().is_none());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut world = world(32, 32, 16);
        world.fill_region(p(0, 0, 0), p(31, 3, 15), BlockKind::DIRT.id()).unwrap();
        world.set_block(p(7, 4, 7), BlockKind::LEAVES.id()).unwrap();
        assert_eq!(world.rebuild_dirty_chunks().len(), 4);

        let meshes: Vec<_> = world
            .chunks()
            .iter()
            .map(|chunk| Arc::clone(chunk.mesh().unwrap()))
            .collect();
        assert!(world.rebuild_dirty_chunks().is_empty());
        for (chunk, mesh) in world.chunks().iter().zip(&meshes) {
            assert!(Arc::ptr_eq(chunk.mesh().unwrap(), mesh));
            assert_eq!(chunk.generation(), 1);
        }

        // A forced rebuild of unchanged data produces the same geometry.
        for mesh in &meshes {
            assert!(world.mark_chunk_dirty(mesh.position));
        }
        world.rebuild_dirty_chunks();
        for (chunk, mesh) in world.chunks().iter().zip(&meshes) {
            assert_eq!(**chunk.mesh().unwrap(), **mesh);
            assert_eq!(chunk.generation(), 2);
        }
    }

    #[test]
    fn test_top_solid_y() {
        let mut world = world(16, 32, 16);
        assert_eq!(world.top_solid_y(3, 3), None);
        world.set_block(p(3, 4, 3), BlockKind::STONE.id()).unwrap();
        world.set_block(p(3, 20, 3), BlockKind::STONE.id()).unwrap();
        world.set_block(p(3, 25, 3), BlockKind::LEAVES.id()).unwrap();
        // Foliage is not solid.
        assert_eq!(world.top_solid_y(3, 3), Some(20));
        assert_eq!(world.top_solid_y(-1, 3), None);
        assert_eq!(world.top_solid_y(3, 16), None);
    }

    #[test]
    fn test_recommended_spawn() {
        let mut world = world(32, 32, 32);
        assert_eq!(world.recommended_spawn(8), Point3::new(16.5, 11.0, 16.5));
        world.set_block(p(16, 12, 16), BlockKind::DIRT.id()).unwrap();
        assert_eq!(world.recommended_spawn(8), Point3::new(16.5, 15.0, 16.5));
    }
}
