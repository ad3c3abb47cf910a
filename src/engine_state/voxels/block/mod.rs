//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block identifiers, block face handling, the block type registry and
//! the built-in palette of block types.

use std::fmt;

pub mod block_side;
pub mod block_type;
pub mod palette;
pub mod registry;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage of block data inside chunks.
pub type BlockTypeSize = u8;

/// Identifies a block type stored in the voxel grid.
///
/// `0` is reserved for air. Every other value written into the world must have a
/// matching entry in the [`registry::BlockRegistry`].
///
/// # Memory Layout
/// The `#[repr(transparent)]` attribute keeps the id as compact as its `BlockTypeSize`,
/// so chunk storage can be handed to the GPU or hashed as plain bytes.
#[repr(transparent)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct BlockId(pub BlockTypeSize);

impl BlockId {
    /// Empty space. Never registered, never solid.
    pub const AIR: BlockId = BlockId(0);

    /// Returns `true` for the reserved air id.
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match palette::BlockKind::from_id(*self) {
            Some(kind) => write!(f, "{}({})", kind.name(), self.0),
            None => write!(f, "block({})", self.0),
        }
    }
}
