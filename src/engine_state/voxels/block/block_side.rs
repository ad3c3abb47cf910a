//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! It provides the axis normals and neighbor offsets used by face culling
//! and by the ray traversal when it reports which face was struck.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant corresponds to a specific face and is assigned a unique integer value
/// so it can index per-face tables such as a block type's texture indices.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// This is useful for iterating over all possible faces of a block.
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The integer step from a block to the neighbor that shares this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// The face on the other side of the block.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }

    /// Maps an axis-aligned unit normal back to its face.
    ///
    /// # Returns
    /// `None` for the zero vector or anything that is not exactly one of the six offsets.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all().into_iter().find(|side| side.offset() == normal)
    }
}
