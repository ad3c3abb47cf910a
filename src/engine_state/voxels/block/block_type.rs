//! # Block Type Module
//!
//! This module defines the registry entry describing one kind of block: its physical
//! properties (solidity, hardness, strikes needed to mine it), its texture layout inside
//! the atlas and the procedure producing the material the renderer should use for it.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::{block_side::BlockSide, BlockId};

/// Procedure yielding the material of a block type.
///
/// It receives the world position of a representative block (the first block of that type
/// met while meshing a chunk), so a block type may vary its material across the world.
pub type MaterialFn = fn(Point3<i32>) -> MaterialDescriptor;

/// Renderer-facing description of how a block type's geometry should be shaded.
///
/// The core never interprets these values; it only attaches them to the geometry groups it
/// emits so the rendering collaborator can create or reuse a material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    /// Texture asset backing the block, as a path relative to the asset root.
    pub texture: String,
    /// Diffuse tint, RGBA.
    pub diffuse: [f32; 4],
    /// Specular intensity.
    pub specular: f32,
    /// Specular exponent.
    pub shininess: f32,
    /// Alpha below which fragments are discarded (cut-out foliage).
    pub alpha_discard: Option<f32>,
}

impl MaterialDescriptor {
    /// A white, untinted lit material using `texture`.
    pub fn lit(texture: impl Into<String>, specular: f32, shininess: f32) -> Self {
        MaterialDescriptor {
            texture: texture.into(),
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular,
            shininess,
            alpha_discard: None,
        }
    }

    pub fn with_diffuse(mut self, diffuse: [f32; 4]) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_alpha_discard(mut self, threshold: f32) -> Self {
        self.alpha_discard = Some(threshold);
        self
    }
}

/// An immutable registry entry for one block type.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::voxels::block::{block_type::*, BlockId};
///
/// fn glass(_: cgmath::Point3<i32>) -> MaterialDescriptor {
///     MaterialDescriptor::lit("textures/blocks/glass.png", 0.5, 64.0)
/// }
///
/// let glass = BlockType::new(BlockId(42), "glass", glass)
///     .with_solid(false)
///     .with_hardness(0.3)
///     .with_uniform_texture(7);
/// assert!(!glass.solid);
/// ```
#[derive(Clone, Debug)]
pub struct BlockType {
    /// The id this entry is registered under.
    pub id: BlockId,
    /// Human readable name, used in logs.
    pub name: String,
    /// Whether the block occludes neighbor faces and stops rays and bodies.
    ///
    /// Non-solid blocks (foliage) are still meshed, they just never hide anything.
    pub solid: bool,
    /// Relative resistance to mining. Softer materials stay below 1.0, stone is above 2.0.
    pub hardness: f32,
    /// Strikes needed to mine the block by hand.
    pub required_hits: u32,
    /// Strikes needed with an axe, when an axe mines this block faster.
    pub axe_hits: Option<u32>,
    /// Atlas tile for each face, indexed by [`BlockSide`] discriminant.
    pub texture_indices: [u32; 6],
    /// Whether face UVs get a per-face random rotation to break up visible tiling.
    pub randomize_uv: bool,
    /// Produces the renderer material.
    pub material: MaterialFn,
}

impl BlockType {
    /// Creates a solid block type with hardness 1.0, mined in a single strike, using atlas
    /// tile 0 on every face.
    pub fn new(id: BlockId, name: impl Into<String>, material: MaterialFn) -> Self {
        BlockType {
            id,
            name: name.into(),
            solid: true,
            hardness: 1.0,
            required_hits: 1,
            axe_hits: None,
            texture_indices: [0; 6],
            randomize_uv: false,
            material,
        }
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    pub fn with_required_hits(mut self, required_hits: u32) -> Self {
        self.required_hits = required_hits;
        self
    }

    pub fn with_axe_hits(mut self, axe_hits: u32) -> Self {
        self.axe_hits = Some(axe_hits);
        self
    }

    /// Sets the atlas tile per face, in [`BlockSide`] order.
    pub fn with_texture_indices(mut self, texture_indices: [u32; 6]) -> Self {
        self.texture_indices = texture_indices;
        self
    }

    /// Uses the same atlas tile on all six faces.
    pub fn with_uniform_texture(self, texture_index: u32) -> Self {
        self.with_texture_indices([texture_index; 6])
    }

    pub fn with_randomized_uv(mut self) -> Self {
        self.randomize_uv = true;
        self
    }

    /// The atlas tile used for `side`.
    pub fn texture_index(&self, side: BlockSide) -> u32 {
        self.texture_indices[side as usize]
    }

    /// Evaluates the material procedure for a block at `position`.
    pub fn material_at(&self, position: Point3<i32>) -> MaterialDescriptor {
        (self.material)(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(_: Point3<i32>) -> MaterialDescriptor {
        MaterialDescriptor::lit("plain.png", 0.0, 1.0)
    }

    #[test]
    fn test_defaults_are_solid_and_unit_hard() {
        let block = BlockType::new(BlockId(9), "plain", plain);
        assert!(block.solid);
        assert_eq!(block.hardness, 1.0);
        assert_eq!(block.required_hits, 1);
        assert_eq!(block.axe_hits, None);
        assert!(!block.randomize_uv);
        assert_eq!(block.texture_indices, [0; 6]);
    }

    #[test]
    fn test_texture_index_per_side() {
        let block =
            BlockType::new(BlockId(9), "log", plain).with_texture_indices([4, 4, 5, 5, 4, 4]);
        assert_eq!(block.texture_index(BlockSide::TOP), 5);
        assert_eq!(block.texture_index(BlockSide::BOTTOM), 5);
        assert_eq!(block.texture_index(BlockSide::LEFT), 4);
    }

    #[test]
    fn test_material_descriptor_serializes() {
        let material = plain(Point3::new(0, 0, 0)).with_alpha_discard(0.5);
        let json = serde_json::to_string(&material).unwrap();
        let back: MaterialDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, material);
    }
}
