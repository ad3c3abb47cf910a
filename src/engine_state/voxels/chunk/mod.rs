//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data, together with the chunk's dirty flag and its current
//! mesh and collision resources.
//!
//! ## Storage
//!
//! Chunks keep two parallel structures:
//! - `blocks`: a dense array with one [`BlockId`] per cell
//! - `occupied`: a bit vector (1 bit per cell) marking the non-air cells
//!
//! The bit vector lets meshing and iteration skip air quickly, and answers "is this chunk
//! empty?" without touching the block array.
//!
//! ## Rebuild Protocol
//!
//! Writing a block does not mark the chunk dirty; the owning world does that, so bulk
//! generation does not pay for redundant marking. A rebuild produces a brand new
//! [`ChunkMesh`] and swaps it in, then derives a new [`CollisionShape`] from it.

use std::{collections::BTreeMap, sync::Arc};

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};
use log::{trace, warn};
use web_time::Instant;

use chunk_iteration::ChunkBlockIterator;

use super::block::{block_side::BlockSide, registry::BlockRegistry, BlockId};
use crate::engine_state::physics::CollisionShape;
use crate::engine_state::rendering::meshing::{ChunkMesh, Face, MeshBuilder, MeshGroup};

pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are the unit of mesh and collision rebuilds. A chunk exclusively owns its block
/// data and its current mesh/collision handles; handles are replaced on rebuild, never
/// mutated.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<i32>,
    /// One id per cell, stored x fastest, then y, then z.
    blocks: Box<[BlockId]>,
    /// Set bits mark the non-air cells of `blocks`.
    occupied: BitVec,
    /// Whether the mesh and collision no longer match the block data.
    dirty: bool,
    mesh: Option<Arc<ChunkMesh>>,
    collision: Option<Arc<CollisionShape>>,
    /// Number of meshes built for this chunk so far.
    generation: u64,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// New chunks start dirty because they have no mesh yet.
    pub fn new(position: Point3<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![BlockId::AIR; CHUNK_SIZE as usize].into_boxed_slice(),
            occupied: BitVec::repeat(false, CHUNK_SIZE as usize),
            dirty: true,
            mesh: None,
            collision: None,
            generation: 0,
        }
    }

    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// World coordinates of this chunk's local `(0, 0, 0)` cell.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_DIMENSION,
            self.position.y * CHUNK_DIMENSION,
            self.position.z * CHUNK_DIMENSION,
        )
    }

    /// Whether `local` addresses a cell of a chunk.
    pub fn contains_local(local: Point3<usize>) -> bool {
        let dimension = CHUNK_DIMENSION as usize;
        local.x < dimension && local.y < dimension && local.z < dimension
    }

    fn index_of(local: Point3<usize>) -> usize {
        assert!(
            Self::contains_local(local),
            "local chunk coordinate {:?} out of range",
            local
        );
        let dimension = CHUNK_DIMENSION as usize;
        local.x + dimension * local.y + dimension * dimension * local.z
    }

    pub(crate) fn local_from_index(index: usize) -> Point3<usize> {
        let dimension = CHUNK_DIMENSION as usize;
        Point3::new(
            index % dimension,
            (index / dimension) % dimension,
            index / (dimension * dimension),
        )
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of range; the world never produces such coordinates.
    pub fn get(&self, local: Point3<usize>) -> BlockId {
        self.blocks[Self::index_of(local)]
    }

    /// Stores `id` at the specified chunk-relative coordinates.
    ///
    /// This does not mark the chunk dirty.
    ///
    /// # Panics
    /// Panics if the coordinates are out of range.
    pub fn set(&mut self, local: Point3<usize>, id: BlockId) {
        let index = Self::index_of(local);
        self.blocks[index] = id;
        self.occupied.set(index, !id.is_air());
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Whether every cell is air.
    pub fn is_empty(&self) -> bool {
        self.occupied.not_any()
    }

    /// Number of non-air cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }

    /// Iterates over the non-air cells and their block ids.
    pub fn occupied_cells(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The mesh from the last rebuild, if any.
    pub fn mesh(&self) -> Option<&Arc<ChunkMesh>> {
        self.mesh.as_ref()
    }

    /// The collision shape from the last rebuild; `None` when the chunk has no solid surface.
    pub fn collision(&self) -> Option<&Arc<CollisionShape>> {
        self.collision.as_ref()
    }

    /// Number of meshes built for this chunk so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Builds the mesh for the current block data without installing it.
    ///
    /// Every non-air cell emits a quad on each side whose neighbor is not solid. Neighbors
    /// inside this chunk are read from its own storage; neighbors in other chunks are
    /// resolved by `neighbor_solid`, called with world coordinates.
    ///
    /// # Arguments
    /// * `registry` - Block types, for solidity, textures and materials
    /// * `neighbor_solid` - Solidity of a world cell outside this chunk
    pub fn generate_mesh<F>(&self, registry: &BlockRegistry, neighbor_solid: F) -> ChunkMesh
    where
        F: Fn(Point3<i32>) -> bool,
    {
        let start = Instant::now();
        let origin = self.world_origin();
        // Builder plus the world position of the first block of that type.
        let mut builders: BTreeMap<BlockId, (MeshBuilder, Point3<i32>)> = BTreeMap::new();

        for (local, id) in self.occupied_cells() {
            let block_type = match registry.get(id) {
                Ok(block_type) => block_type,
                Err(err) => {
                    warn!("Skipping cell {:?} of chunk {:?}: {}", local, self.position, err);
                    continue;
                }
            };
            let world = origin + Vector3::new(local.x as i32, local.y as i32, local.z as i32);
            let (builder, _) = builders.entry(id).or_insert_with(|| {
                (
                    MeshBuilder::new(*registry.atlas(), block_type.randomize_uv),
                    world,
                )
            });

            for side in BlockSide::all() {
                if !self.is_neighbor_solid(local, side, registry, &neighbor_solid) {
                    builder.add_face(&Face::new(world, side), block_type.texture_index(side));
                }
            }
        }

        let groups: Vec<MeshGroup> = builders
            .into_iter()
            .filter_map(|(id, (builder, first_position))| {
                let block_type = registry.get(id).ok()?;
                let data = builder.build()?;
                Some(MeshGroup {
                    block: id,
                    solid: block_type.solid,
                    material: block_type.material_at(first_position),
                    data,
                })
            })
            .collect();

        trace!(
            "Chunk {:?} mesh built in {:?}, groups: {}",
            self.position,
            start.elapsed(),
            groups.len()
        );

        ChunkMesh {
            position: self.position,
            groups,
        }
    }

    /// Discards the previous mesh and builds a new one from the current block data.
    ///
    /// See [`Chunk::generate_mesh`] for the meaning of the arguments.
    pub fn build_mesh<F>(&mut self, registry: &BlockRegistry, neighbor_solid: F)
    where
        F: Fn(Point3<i32>) -> bool,
    {
        let mesh = self.generate_mesh(registry, neighbor_solid);
        self.replace_mesh(mesh);
    }

    /// Swaps in a freshly generated mesh.
    pub fn replace_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(Arc::new(mesh));
        self.generation += 1;
    }

    /// Replaces the collision shape with one derived from the current mesh.
    ///
    /// Must follow [`Chunk::build_mesh`] of the same rebuild; without a mesh the chunk ends
    /// up with no collision shape.
    pub fn build_collision(&mut self) {
        self.collision = self
            .mesh
            .as_deref()
            .and_then(CollisionShape::from_mesh)
            .map(Arc::new);
    }

    /// Solidity of the cell next to `local` on `side`.
    fn is_neighbor_solid<F>(
        &self,
        local: Point3<usize>,
        side: BlockSide,
        registry: &BlockRegistry,
        neighbor_solid: &F,
    ) -> bool
    where
        F: Fn(Point3<i32>) -> bool,
    {
        let offset = side.offset();
        let neighbor = Point3::new(
            local.x as i32 + offset.x,
            local.y as i32 + offset.y,
            local.z as i32 + offset.z,
        );
        let inside = (0..CHUNK_DIMENSION).contains(&neighbor.x)
            && (0..CHUNK_DIMENSION).contains(&neighbor.y)
            && (0..CHUNK_DIMENSION).contains(&neighbor.z);

        if inside {
            let id = self.get(Point3::new(
                neighbor.x as usize,
                neighbor.y as usize,
                neighbor.z as usize,
            ));
            registry.is_solid(id)
        } else {
            neighbor_solid(self.world_origin() + Vector3::new(neighbor.x, neighbor.y, neighbor.z))
        }
    }
}
