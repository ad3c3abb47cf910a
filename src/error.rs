//! # Error Module
//!
//! Error types shared by the block registry, the world and the configuration layer.
//!
//! Out-of-bounds world coordinates are deliberately absent from this list: reads outside
//! the world report air and writes outside the world are ignored.

use crate::engine_state::voxels::block::BlockId;

/// Result alias used throughout the crate.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Every failure the voxel core can report.
#[derive(Debug, thiserror::Error)]
pub enum VoxelError {
    /// A registry lookup for an id that was never registered (or for air).
    #[error("unknown block type {0}")]
    UnknownBlockType(BlockId),

    /// Air is implicit and can not be registered.
    #[error("block id 0 is reserved for air")]
    ReservedAirId,

    #[error("block type {0} is already registered")]
    DuplicateBlockType(BlockId),

    #[error("block type {id} has invalid hardness {hardness}")]
    InvalidHardness { id: BlockId, hardness: f32 },

    #[error("invalid world dimensions {x}x{y}x{z}")]
    InvalidDimensions { x: i32, y: i32, z: i32 },

    /// A block name in the configuration that the built-in palette does not know.
    #[error("unknown block name '{0}'")]
    UnknownBlockName(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}
