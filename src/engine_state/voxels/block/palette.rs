//! # Palette Module
//!
//! The built-in set of block types used by the terrain generator and by the default
//! registry: stone, dirt, sand, wood planks, logs and leaves.

use cgmath::Point3;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::engine_state::rendering::texture::TextureAtlas;
use crate::error::VoxelResult;

use super::{
    block_type::{BlockType, MaterialDescriptor},
    registry::BlockRegistry,
    BlockId, BlockTypeSize,
};

/// Enumerates the block types shipped with the engine.
///
/// The discriminant of each variant is its [`BlockId`]. The `FromPrimitive` derive allows
/// conversion back from the raw id stored in chunks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// Empty space. Not registered.
    AIR = 0,
    STONE = 1,
    DIRT = 2,
    SAND = 3,
    /// Wooden planks.
    WOOD = 4,
    LOG = 5,
    /// Foliage: meshed, but neither occluding nor physical.
    LEAVES = 6,
}

/// Compile-time lookup from configuration names to palette entries.
static BLOCK_KINDS_BY_NAME: phf::Map<&'static str, BlockKind> = phf::phf_map! {
    "air" => BlockKind::AIR,
    "stone" => BlockKind::STONE,
    "dirt" => BlockKind::DIRT,
    "sand" => BlockKind::SAND,
    "wood" => BlockKind::WOOD,
    "log" => BlockKind::LOG,
    "leaves" => BlockKind::LEAVES,
};

// Atlas tiles of the default 4x2 block atlas.
const STONE_TILE: u32 = 0;
const DIRT_TILE: u32 = 1;
const SAND_TILE: u32 = 2;
const PLANKS_TILE: u32 = 3;
const LOG_SIDE_TILE: u32 = 4;
const LOG_END_TILE: u32 = 5;
const LEAVES_TILE: u32 = 6;

impl BlockKind {
    /// Every palette entry except air, in id order.
    pub const SOLID_AND_FOLIAGE: [BlockKind; 6] = [
        BlockKind::STONE,
        BlockKind::DIRT,
        BlockKind::SAND,
        BlockKind::WOOD,
        BlockKind::LOG,
        BlockKind::LEAVES,
    ];

    pub fn id(self) -> BlockId {
        BlockId(self as BlockTypeSize)
    }

    /// Converts a stored id back into a palette entry.
    ///
    /// # Returns
    /// `None` for ids outside the built-in palette.
    pub fn from_id(id: BlockId) -> Option<Self> {
        FromPrimitive::from_u8(id.0)
    }

    /// Resolves a lower-case configuration name such as `"stone"`.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_KINDS_BY_NAME.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::AIR => "air",
            BlockKind::STONE => "stone",
            BlockKind::DIRT => "dirt",
            BlockKind::SAND => "sand",
            BlockKind::WOOD => "wood",
            BlockKind::LOG => "log",
            BlockKind::LEAVES => "leaves",
        }
    }

    /// The registry entry for this palette block, or `None` for air.
    pub fn block_type(self) -> Option<BlockType> {
        let block_type = match self {
            BlockKind::AIR => return None,
            BlockKind::STONE => BlockType::new(self.id(), self.name(), stone_material)
                .with_hardness(2.5)
                .with_required_hits(6)
                .with_uniform_texture(STONE_TILE),
            BlockKind::DIRT => BlockType::new(self.id(), self.name(), dirt_material)
                .with_hardness(0.7)
                .with_required_hits(3)
                .with_uniform_texture(DIRT_TILE)
                .with_randomized_uv(),
            BlockKind::SAND => BlockType::new(self.id(), self.name(), sand_material)
                .with_hardness(0.3)
                .with_uniform_texture(SAND_TILE)
                .with_randomized_uv(),
            BlockKind::WOOD => BlockType::new(self.id(), self.name(), wood_material)
                .with_hardness(1.2)
                .with_uniform_texture(PLANKS_TILE),
            // [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
            BlockKind::LOG => BlockType::new(self.id(), self.name(), log_material)
                .with_hardness(2.0)
                .with_required_hits(4)
                .with_axe_hits(2)
                .with_texture_indices([
                    LOG_SIDE_TILE,
                    LOG_SIDE_TILE,
                    LOG_END_TILE,
                    LOG_END_TILE,
                    LOG_SIDE_TILE,
                    LOG_SIDE_TILE,
                ]),
            BlockKind::LEAVES => BlockType::new(self.id(), self.name(), leaves_material)
                .with_solid(false)
                .with_hardness(0.2)
                .with_uniform_texture(LEAVES_TILE),
        };
        Some(block_type)
    }
}

impl BlockRegistry {
    /// A registry holding the whole built-in palette.
    pub fn default_palette(atlas: TextureAtlas) -> VoxelResult<Self> {
        let mut registry = BlockRegistry::new(atlas);
        for kind in BlockKind::SOLID_AND_FOLIAGE {
            if let Some(block_type) = kind.block_type() {
                registry.register(block_type)?;
            }
        }
        Ok(registry)
    }
}

fn stone_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/stone.png", 0.0, 32.0)
}

fn dirt_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/dirt.png", 0.01, 8.0)
}

fn sand_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/sand.png", 0.0, 2.0)
}

fn wood_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/oak_planks.png", 0.02, 16.0)
}

fn log_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/log.png", 0.02, 16.0)
        .with_diffuse([0.6, 0.4, 0.2, 1.0])
}

fn leaves_material(_: Point3<i32>) -> MaterialDescriptor {
    MaterialDescriptor::lit("textures/blocks/leaves.png", 0.02, 16.0).with_alpha_discard(0.5)
}
