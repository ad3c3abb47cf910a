//! Mesh generation for voxel rendering.
//!
//! This module handles the conversion of chunk voxel data into renderer-ready geometry
//! using face culling: only block faces whose neighbor is not solid are emitted.
//!
//! # Architecture
//! - [`Face`]: a single block face with its four corners and winding
//! - [`MeshBuilder`]: accumulates faces of one block type and emits [`MeshData`]
//! - [`ChunkMesh`]: the immutable result of meshing one chunk, one [`MeshGroup`] per
//!   block type present in the chunk
//!
//! # Performance Considerations
//! - Every cell of a chunk is visited once and every face decision is O(1)
//! - Only exposed faces are rasterized
//! - A chunk mesh is replaced as a whole on rebuild, never patched in place

mod face;
mod mesh_builder;

pub use face::Face;
pub use mesh_builder::{MeshBuilder, MeshData};

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::MaterialDescriptor, BlockId};

/// Geometry of one block type inside one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGroup {
    /// The block type every face of this group belongs to
    pub block: BlockId,
    /// Whether the block type is solid, i.e. whether the group takes part in collision
    pub solid: bool,
    /// Material the renderer should draw this group with
    pub material: MaterialDescriptor,
    /// Vertex, normal, UV and index buffers
    pub data: MeshData,
}

/// The complete, immutable mesh of a chunk.
///
/// Groups are ordered by ascending block id, which makes rebuilding unchanged data produce
/// an identical mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    /// Position of the chunk in chunk coordinates
    pub position: Point3<i32>,
    /// One group per block type with at least one exposed face
    pub groups: Vec<MeshGroup>,
}

impl ChunkMesh {
    /// A mesh without any geometry.
    pub fn empty(position: Point3<i32>) -> Self {
        ChunkMesh {
            position,
            groups: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of quads over all groups.
    pub fn face_count(&self) -> usize {
        self.groups
            .iter()
            .map(|group| group.data.vertex_count() / 4)
            .sum()
    }

    /// The group of `block`, if that block type has visible faces in this chunk.
    pub fn group(&self, block: BlockId) -> Option<&MeshGroup> {
        self.groups.iter().find(|group| group.block == block)
    }
}
