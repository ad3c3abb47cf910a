//! Per block-type geometry accumulation.
//!
//! A [`MeshBuilder`] collects the exposed faces of one block type inside one chunk and
//! turns them into plain vertex/normal/UV/index buffers. Buffers are only ever produced
//! whole; a rebuilt chunk gets fresh buffers rather than patched ones.

use crate::engine_state::rendering::{texture::TextureAtlas, Vertex};

use super::face::Face;

/// Tile-local UVs walking around a quad: ll, lr, ur, ul.
const UV_CYCLE: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Position of each emitted corner (`[ll, lr, ul, ur]`) inside [`UV_CYCLE`].
const CORNER_CYCLE_POSITION: [usize; 4] = [0, 1, 3, 2];

/// Final geometry buffers for one block-type group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in world space
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals, equal to the face normal
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex atlas coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list, counter-clockwise front faces
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Packs the separate attribute buffers into one interleaved vertex buffer.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| Vertex::new(*position, *normal, *uv))
            .collect()
    }
}

/// Accumulates face quads for a single block type.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::rendering::{meshing::{Face, MeshBuilder}, texture::TextureAtlas};
/// use voxel_world::engine_state::voxels::block::block_side::BlockSide;
///
/// let mut builder = MeshBuilder::new(TextureAtlas::default(), false);
/// assert!(builder.is_empty());
/// builder.add_face(&Face::new(Point3::new(0, 0, 0), BlockSide::TOP), 0);
/// let data = builder.build().unwrap();
/// assert_eq!(data.vertex_count(), 4);
/// assert_eq!(data.triangle_count(), 2);
/// ```
#[derive(Debug)]
pub struct MeshBuilder {
    atlas: TextureAtlas,
    randomize_uv: bool,
    data: MeshData,
    face_count: usize,
}

impl MeshBuilder {
    /// Creates an empty builder sampling tiles from `atlas`.
    ///
    /// With `randomize_uv` every face gets a deterministic quarter-turn rotation of its
    /// texture, derived from its block position and side.
    pub fn new(atlas: TextureAtlas, randomize_uv: bool) -> Self {
        MeshBuilder {
            atlas,
            randomize_uv,
            data: MeshData::default(),
            face_count: 0,
        }
    }

    /// Appends one quad textured with atlas tile `texture_index`.
    pub fn add_face(&mut self, face: &Face, texture_index: u32) {
        let region = self.atlas.region(texture_index);
        let base = self.data.positions.len() as u32;
        let normal: [f32; 3] = face.normal().into();
        let rotation = if self.randomize_uv { uv_rotation(face) } else { 0 };

        for (corner_index, corner) in face.corners().iter().enumerate() {
            let cycle_position = (CORNER_CYCLE_POSITION[corner_index] + rotation) % 4;
            self.data
                .positions
                .push([corner.x as f32, corner.y as f32, corner.z as f32]);
            self.data.normals.push(normal);
            self.data.uvs.push(region.map(UV_CYCLE[cycle_position]));
        }
        self.data
            .indices
            .extend(Face::QUAD_INDICES.iter().map(|index| base + index));
        self.face_count += 1;
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn is_empty(&self) -> bool {
        self.face_count == 0
    }

    /// Emits the accumulated buffers.
    ///
    /// # Returns
    /// `None` when no face was added, so empty groups never reach the renderer.
    pub fn build(self) -> Option<MeshData> {
        if self.is_empty() {
            return None;
        }
        Some(self.data)
    }
}

/// Quarter turns applied to a face's texture in randomized mode.
fn uv_rotation(face: &Face) -> usize {
    let p = face.block_position;
    let seed = (p.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (p.y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (p.z as u64).wrapping_mul(0x1656_67B1_9E37_79F9)
        ^ face.block_side as u64;
    fastrand::Rng::with_seed(seed).usize(0..4)
}
