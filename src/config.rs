//! # Configuration Module
//!
//! World and terrain settings, loaded from JSON. Every field has a default, so a config
//! file only needs to name the values it changes:
//!
//! ```json
//! { "size_x": 64, "size_z": 64, "generation": { "method": "flat", "flat_height": 6 } }
//! ```
//!
//! Configurations are validated before any world is built from them.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine_state::rendering::texture::TextureAtlas;
use crate::engine_state::voxels::block::{palette::BlockKind, BlockId};
use crate::error::{VoxelError, VoxelResult};

/// How the initial terrain of a world is produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Noise heightmap with dirt over stone, plus trees
    #[default]
    Layers,
    /// Flat layers up to `flat_height`
    Flat,
    /// All air
    Empty,
}

/// Terrain generator settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub method: GenerationMethod,
    /// Average surface height of layered terrain
    pub base_height: i32,
    /// Largest deviation of the surface from `base_height`
    pub height_variation: f64,
    /// Noise frequency in cycles per block
    pub frequency: f64,
    /// Layers of filler/surface material above the core
    pub dirt_depth: i32,
    /// Chance per eligible column of growing a tree
    pub tree_chance: f64,
    /// Number of filled layers of flat terrain
    pub flat_height: i32,
    pub surface_block: String,
    pub filler_block: String,
    pub core_block: String,
    pub log_block: String,
    pub leaves_block: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            method: GenerationMethod::Layers,
            base_height: 16,
            height_variation: 8.0,
            frequency: 0.01,
            dirt_depth: 3,
            tree_chance: 0.01,
            flat_height: 4,
            surface_block: "dirt".to_string(),
            filler_block: "dirt".to_string(),
            core_block: "stone".to_string(),
            log_block: "log".to_string(),
            leaves_block: "leaves".to_string(),
        }
    }
}

/// The block ids named by a [`GenerationConfig`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TerrainBlocks {
    pub surface: BlockId,
    pub filler: BlockId,
    pub core: BlockId,
    pub log: BlockId,
    pub leaves: BlockId,
}

impl GenerationConfig {
    /// Resolves the configured block names through the built-in palette.
    ///
    /// # Errors
    /// [`VoxelError::UnknownBlockName`] for a name the palette does not know.
    pub fn blocks(&self) -> VoxelResult<TerrainBlocks> {
        Ok(TerrainBlocks {
            surface: resolve_block(&self.surface_block)?,
            filler: resolve_block(&self.filler_block)?,
            core: resolve_block(&self.core_block)?,
            log: resolve_block(&self.log_block)?,
            leaves: resolve_block(&self.leaves_block)?,
        })
    }
}

fn resolve_block(name: &str) -> VoxelResult<BlockId> {
    BlockKind::from_name(name)
        .map(BlockKind::id)
        .ok_or_else(|| VoxelError::UnknownBlockName(name.to_string()))
}

/// Settings for one voxel world session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in blocks
    pub size_x: i32,
    /// World height in blocks
    pub size_y: i32,
    /// World depth in blocks
    pub size_z: i32,
    /// Seed for terrain noise and tree placement
    pub seed: u32,
    /// Spawn height used when the spawn column is empty
    pub ground_height: i32,
    /// Maximum picking distance in blocks
    pub reach: f32,
    pub atlas: TextureAtlas,
    pub generation: GenerationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            size_x: 320,
            size_y: 32,
            size_z: 320,
            seed: 123456,
            ground_height: 8,
            reach: 6.0,
            atlas: TextureAtlas::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> VoxelResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let path = path.as_ref();
        debug!("Loading world configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that a world can be built from this configuration.
    ///
    /// # Errors
    /// - [`VoxelError::InvalidDimensions`] for a non-positive world size
    /// - [`VoxelError::UnknownBlockName`] for a generator block the palette does not know
    /// - [`VoxelError::InvalidConfig`] for any other out-of-range value
    pub fn validate(&self) -> VoxelResult<()> {
        if self.size_x <= 0 || self.size_y <= 0 || self.size_z <= 0 {
            return Err(VoxelError::InvalidDimensions {
                x: self.size_x,
                y: self.size_y,
                z: self.size_z,
            });
        }
        if !self.reach.is_finite() || self.reach < 0.0 {
            return Err(VoxelError::InvalidConfig(format!(
                "reach must be a non-negative number, got {}",
                self.reach
            )));
        }
        if self.atlas.columns == 0 || self.atlas.rows == 0 {
            return Err(VoxelError::InvalidConfig(
                "texture atlas needs at least one tile".to_string(),
            ));
        }

        let generation = &self.generation;
        if !(0.0..=1.0).contains(&generation.tree_chance) {
            return Err(VoxelError::InvalidConfig(format!(
                "tree_chance must lie in [0, 1], got {}",
                generation.tree_chance
            )));
        }
        if !generation.frequency.is_finite() || !generation.height_variation.is_finite() {
            return Err(VoxelError::InvalidConfig(
                "noise settings must be finite".to_string(),
            ));
        }
        if generation.dirt_depth < 0 || generation.flat_height < 0 {
            return Err(VoxelError::InvalidConfig(
                "dirt_depth and flat_height must not be negative".to_string(),
            ));
        }
        generation.blocks()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!((config.size_x, config.size_y, config.size_z), (320, 32, 320));
        assert_eq!(config.seed, 123456);
        assert_eq!(config.generation.method, GenerationMethod::Layers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "size_x": 64, "generation": { "method": "flat", "flat_height": 6 } }"#,
        )
        .unwrap();
        assert_eq!(config.size_x, 64);
        assert_eq!(config.size_z, 320);
        assert_eq!(config.generation.method, GenerationMethod::Flat);
        assert_eq!(config.generation.flat_height, 6);
        assert_eq!(config.generation.base_height, 16);
    }

    #[test]
    fn test_block_names_resolve() {
        let blocks = GenerationConfig::default().blocks().unwrap();
        assert_eq!(blocks.surface, BlockKind::DIRT.id());
        assert_eq!(blocks.core, BlockKind::STONE.id());
        assert_eq!(blocks.leaves, BlockKind::LEAVES.id());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "size_y": 0 }"#),
            Err(VoxelError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "generation": { "core_block": "obsidian" } }"#),
            Err(VoxelError::UnknownBlockName(name)) if name == "obsidian"
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "generation": { "tree_chance": 2.0 } }"#),
            Err(VoxelError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "reach": -1.0 }"#),
            Err(VoxelError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str("{ not json"),
            Err(VoxelError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 7, "generation": {{ "method": "empty" }} }}"#).unwrap();
        let config = WorldConfig::from_path(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.generation.method, GenerationMethod::Empty);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WorldConfig::from_path(dir.path().join("missing.json")),
            Err(VoxelError::ConfigIo(_))
        ));
    }
}
