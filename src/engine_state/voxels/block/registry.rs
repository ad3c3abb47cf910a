//! # Block Registry Module
//!
//! Append-only lookup table from [`BlockId`] to [`BlockType`]. It is filled once at startup
//! and only read afterwards; a malformed registration is rejected immediately so data
//! errors surface before any gameplay begins.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::engine_state::rendering::texture::TextureAtlas;
use crate::error::{VoxelError, VoxelResult};

use super::{block_type::BlockType, BlockId};

/// Registry that stores all block types known to a world.
///
/// Air is never stored here; callers test for [`BlockId::AIR`] before looking a block up.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    /// Map from id to entry. Ordered, so iteration is deterministic.
    blocks: BTreeMap<BlockId, BlockType>,
    /// The texture atlas every entry's `texture_indices` point into.
    atlas: TextureAtlas,
}

impl BlockRegistry {
    /// Creates an empty registry whose block types sample from `atlas`.
    pub fn new(atlas: TextureAtlas) -> Self {
        BlockRegistry {
            blocks: BTreeMap::new(),
            atlas,
        }
    }

    /// Registers a new block type.
    ///
    /// # Errors
    /// - [`VoxelError::ReservedAirId`] when `block_type.id` is air
    /// - [`VoxelError::DuplicateBlockType`] when the id is already taken
    /// - [`VoxelError::InvalidHardness`] for negative or non-finite hardness
    pub fn register(&mut self, block_type: BlockType) -> VoxelResult<()> {
        let id = block_type.id;
        if id.is_air() {
            return Err(VoxelError::ReservedAirId);
        }
        if self.blocks.contains_key(&id) {
            return Err(VoxelError::DuplicateBlockType(id));
        }
        if !block_type.hardness.is_finite() || block_type.hardness < 0.0 {
            return Err(VoxelError::InvalidHardness {
                id,
                hardness: block_type.hardness,
            });
        }

        debug!(
            "Registered block '{}' with id {} (solid: {}, hardness: {})",
            block_type.name, id.0, block_type.solid, block_type.hardness
        );
        self.blocks.insert(id, block_type);
        Ok(())
    }

    /// Looks up a registered block type.
    ///
    /// # Errors
    /// [`VoxelError::UnknownBlockType`] for air or for an id that was never registered.
    pub fn get(&self, id: BlockId) -> VoxelResult<&BlockType> {
        self.blocks.get(&id).ok_or(VoxelError::UnknownBlockType(id))
    }

    /// Whether `id` can be written into the world: air or a registered type.
    pub fn is_writable(&self, id: BlockId) -> bool {
        id.is_air() || self.blocks.contains_key(&id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    /// Solidity of `id`. Air is never solid.
    ///
    /// An unregistered id is a data error; it is logged and read as air instead of
    /// failing, so mesh and ray queries can never be brought down by it.
    pub fn is_solid(&self, id: BlockId) -> bool {
        if id.is_air() {
            return false;
        }
        match self.blocks.get(&id) {
            Some(block_type) => block_type.solid,
            None => {
                warn!("Solidity query for unregistered block {}, treating it as air", id);
                false
            }
        }
    }

    /// Hardness of a registered block type.
    pub fn hardness(&self, id: BlockId) -> Option<f32> {
        self.blocks.get(&id).map(|block_type| block_type.hardness)
    }

    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    /// Number of registered block types (air excluded).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.values()
    }
}
