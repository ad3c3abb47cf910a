use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-left, upper-right)
/// in world coordinates. Corners are chosen so that `(lr - ll) × (ul - ll)` points along the
/// face's outward normal; the triangles `(ll, lr, ur)` and `(ll, ur, ul)` are therefore
/// counter-clockwise when seen from outside the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in world coordinates
    pub ll: Point3<i32>,
    /// Lower-right corner of the face in world coordinates
    pub lr: Point3<i32>,
    /// Upper-left corner of the face in world coordinates
    pub ul: Point3<i32>,
    /// Upper-right corner of the face in world coordinates
    pub ur: Point3<i32>,
    /// The block this face belongs to
    pub block_position: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Index pattern of one quad, relative to its first vertex.
    ///
    /// Vertices are emitted as `[ll, lr, ul, ur]`.
    pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 0, 3, 2];

    /// Creates the face of the unit block at `position` on `block_side`.
    pub fn new(position: Point3<i32>, block_side: BlockSide) -> Self {
        let Point3 { x, y, z } = position;
        let (ll, lr, ul) = match block_side {
            BlockSide::FRONT => (
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
                Point3::new(x, y + 1, z + 1),
            ),
            BlockSide::BACK => (
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z),
                Point3::new(x + 1, y + 1, z),
            ),
            BlockSide::BOTTOM => (
                Point3::new(x, y, z),
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z + 1),
            ),
            BlockSide::TOP => (
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x, y + 1, z),
            ),
            BlockSide::LEFT => (
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x, y + 1, z),
            ),
            BlockSide::RIGHT => (
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y + 1, z + 1),
            ),
        };
        let ur = lr + (ul - ll);

        Face {
            ll,
            lr,
            ul,
            ur,
            block_position: position,
            block_side,
        }
    }

    /// The corners in vertex emission order.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.block_side.normal()
    }
}
