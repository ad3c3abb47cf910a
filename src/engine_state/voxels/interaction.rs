//! # Interaction Module
//!
//! Gameplay edits driven by ray picks: placing a block against the struck face and
//! mining a block over several strikes. Both only edit block data; the affected chunks
//! are picked up by the next dirty rebuild.

use cgmath::{Point3, Vector3};
use log::debug;

use super::block::{block_type::BlockType, BlockId};
use super::world::{Hit, World};
use crate::error::VoxelResult;

/// Places `id` in the cell in front of the face struck by `hit`.
///
/// Nothing is placed when the hit has no face (the ray started inside a block), when the
/// target cell is outside the world or not air, or when `id` is air.
///
/// # Returns
/// The cell that received the block, if any.
///
/// # Errors
/// [`crate::error::VoxelError::UnknownBlockType`] if `id` is not registered.
pub fn place_against(
    world: &mut World,
    hit: &Hit,
    id: BlockId,
) -> VoxelResult<Option<Point3<i32>>> {
    if id.is_air() || hit.face_normal == Vector3::new(0, 0, 0) {
        return Ok(None);
    }
    let target = hit.adjacent_cell();
    if !world.in_bounds(target) || !world.get_block(target).is_air() {
        return Ok(None);
    }
    world.set_block(target, id)?;
    debug!("Placed {} at {:?}", id, target);
    Ok(Some(target))
}

/// What a mining strike is dealt with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Hand,
    /// Uses a block type's `axe_hits` when it has one
    Axe,
}

/// Result of a single mining strike.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MiningOutcome {
    /// The block took damage; `remaining` more strikes break it
    Damaged { remaining: u32 },
    /// The block was removed
    Broken(BlockId),
    /// The struck cell held nothing breakable
    Nothing,
}

/// Strike counter for the block currently being mined.
///
/// Strikes accumulate while they keep landing on the same cell; striking another cell
/// starts over.
#[derive(Clone, Debug, Default)]
pub struct MiningProgress {
    target: Option<Point3<i32>>,
    strikes: u32,
}

impl MiningProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell currently being mined.
    pub fn target(&self) -> Option<Point3<i32>> {
        self.target
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    /// Strikes needed to break `block_type` with `tool`. Never less than one.
    pub fn required_strikes(block_type: &BlockType, tool: Tool) -> u32 {
        let hits = match tool {
            Tool::Axe => block_type.axe_hits.unwrap_or(block_type.required_hits),
            Tool::Hand => block_type.required_hits,
        };
        hits.max(1)
    }

    /// Lands one strike on the cell struck by `hit`, breaking it once enough strikes
    /// have accumulated.
    pub fn strike(&mut self, world: &mut World, hit: &Hit, tool: Tool) -> MiningOutcome {
        let block = world.get_block(hit.cell);
        let required = match world.registry().get(block) {
            Ok(block_type) => Self::required_strikes(block_type, tool),
            Err(_) => {
                self.reset();
                return MiningOutcome::Nothing;
            }
        };

        if self.target != Some(hit.cell) {
            self.target = Some(hit.cell);
            self.strikes = 0;
        }
        self.strikes += 1;

        if self.strikes < required {
            return MiningOutcome::Damaged {
                remaining: required - self.strikes,
            };
        }

        self.reset();
        if world.break_at(hit.cell) {
            debug!("Broke {} at {:?}", block, hit.cell);
            MiningOutcome::Broken(block)
        } else {
            MiningOutcome::Nothing
        }
    }

    pub fn reset(&mut self) {
        self.target = None;
        self.strikes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::texture::TextureAtlas;
    use crate::engine_state::voxels::block::{
        block_type::MaterialDescriptor, palette::BlockKind, registry::BlockRegistry,
    };

    fn world_with_floor() -> World {
        let registry = BlockRegistry::default_palette(TextureAtlas::default()).unwrap();
        let mut world = World::new(16, 16, 16, registry).unwrap();
        world
            .fill_region(Point3::new(0, 0, 0), Point3::new(15, 0, 15), BlockKind::STONE.id())
            .unwrap();
        world
    }

    fn pick_down(world: &World, x: f32, z: f32) -> Hit {
        world
            .pick_first_solid(Point3::new(x, 2.0, z), Vector3::new(0.0, -1.0, 0.0), 6.0)
            .unwrap()
    }

    #[test]
    fn test_place_against_floor() {
        let mut world = world_with_floor();
        let hit = pick_down(&world, 0.5, 0.5);

        let placed = place_against(&mut world, &hit, BlockKind::WOOD.id()).unwrap();
        assert_eq!(placed, Some(Point3::new(0, 1, 0)));
        assert_eq!(world.get_block(Point3::new(0, 1, 0)), BlockKind::WOOD.id());
        assert_eq!(world.get_block(Point3::new(0, 0, 0)), BlockKind::STONE.id());

        // The target is no longer air.
        assert_eq!(place_against(&mut world, &hit, BlockKind::DIRT.id()).unwrap(), None);
        assert_eq!(world.get_block(Point3::new(0, 1, 0)), BlockKind::WOOD.id());
    }

    #[test]
    fn test_place_requires_face_and_known_block() {
        let mut world = world_with_floor();
        let embedded = Hit {
            cell: Point3::new(3, 0, 3),
            face_normal: Vector3::new(0, 0, 0),
            distance: 0.0,
            block: BlockKind::STONE.id(),
        };
        assert_eq!(place_against(&mut world, &embedded, BlockKind::DIRT.id()).unwrap(), None);

        let hit = pick_down(&world, 3.5, 3.5);
        assert_eq!(place_against(&mut world, &hit, BlockId::AIR).unwrap(), None);
        assert!(place_against(&mut world, &hit, BlockId(77)).is_err());
        assert_eq!(world.get_block(Point3::new(3, 1, 3)), BlockId::AIR);
    }

    #[test]
    fn test_place_outside_world() {
        let mut world = world_with_floor();
        let hit = Hit {
            cell: Point3::new(15, 0, 4),
            face_normal: Vector3::new(1, 0, 0),
            distance: 1.0,
            block: BlockKind::STONE.id(),
        };
        assert_eq!(place_against(&mut world, &hit, BlockKind::DIRT.id()).unwrap(), None);
    }

    #[test]
    fn test_required_strikes() {
        let registry = BlockRegistry::default_palette(TextureAtlas::default()).unwrap();
        let strikes = |kind: BlockKind, tool: Tool| {
            MiningProgress::required_strikes(registry.get(kind.id()).unwrap(), tool)
        };
        assert_eq!(strikes(BlockKind::STONE, Tool::Hand), 6);
        assert_eq!(strikes(BlockKind::DIRT, Tool::Hand), 3);
        assert_eq!(strikes(BlockKind::LOG, Tool::Hand), 4);
        assert_eq!(strikes(BlockKind::LOG, Tool::Axe), 2);
        assert_eq!(strikes(BlockKind::LEAVES, Tool::Hand), 1);
        assert_eq!(strikes(BlockKind::SAND, Tool::Hand), 1);
        // An axe only helps where the block type says so.
        assert_eq!(strikes(BlockKind::STONE, Tool::Axe), 6);
    }

    #[test]
    fn test_zero_hits_still_takes_a_strike() {
        fn plain(_: Point3<i32>) -> MaterialDescriptor {
            MaterialDescriptor::lit("plain.png", 0.0, 1.0)
        }
        let block_type = BlockType::new(BlockId(9), "glass", plain).with_required_hits(0);
        assert_eq!(MiningProgress::required_strikes(&block_type, Tool::Hand), 1);
        assert_eq!(MiningProgress::required_strikes(&block_type, Tool::Axe), 1);
    }

    #[test]
    fn test_axe_fells_log_faster() {
        let mut world = world_with_floor();
        world.set_block(Point3::new(6, 1, 6), BlockKind::LOG.id()).unwrap();
        let hit = pick_down(&world, 6.5, 6.5);
        assert_eq!(hit.cell, Point3::new(6, 1, 6));

        let mut mining = MiningProgress::new();
        assert_eq!(
            mining.strike(&mut world, &hit, Tool::Axe),
            MiningOutcome::Damaged { remaining: 1 }
        );
        assert_eq!(
            mining.strike(&mut world, &hit, Tool::Axe),
            MiningOutcome::Broken(BlockKind::LOG.id())
        );
        assert_eq!(world.get_block(Point3::new(6, 1, 6)), BlockId::AIR);
    }

    #[test]
    fn test_mining_breaks_after_enough_strikes() {
        let mut world = world_with_floor();
        let hit = pick_down(&world, 4.5, 4.5);
        let mut mining = MiningProgress::new();

        for remaining in (1..6).rev() {
            assert_eq!(
                mining.strike(&mut world, &hit, Tool::Hand),
                MiningOutcome::Damaged { remaining }
            );
        }
        assert_eq!(
            mining.strike(&mut world, &hit, Tool::Hand),
            MiningOutcome::Broken(BlockKind::STONE.id())
        );
        assert_eq!(world.get_block(Point3::new(4, 0, 4)), BlockId::AIR);
        assert_eq!(mining.target(), None);
        assert_eq!(mining.strike(&mut world, &hit, Tool::Hand), MiningOutcome::Nothing);
    }

    #[test]
    fn test_switching_target_resets_progress() {
        let mut world = world_with_floor();
        let first = pick_down(&world, 1.5, 1.5);
        let second = pick_down(&world, 2.5, 1.5);
        let mut mining = MiningProgress::new();

        mining.strike(&mut world, &first, Tool::Hand);
        mining.strike(&mut world, &first, Tool::Hand);
        assert_eq!(mining.strikes(), 2);

        mining.strike(&mut world, &second, Tool::Hand);
        assert_eq!(mining.target(), Some(Point3::new(2, 0, 1)));
        assert_eq!(mining.strikes(), 1);
        assert_eq!(world.get_block(Point3::new(1, 0, 1)), BlockKind::STONE.id());
    }
}
