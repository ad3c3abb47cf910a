//! Ray picking against the voxel grid.
//!
//! Rays are walked cell by cell with a 3D DDA: the ray parameter of the next boundary
//! crossing is tracked per axis and the axis with the nearest crossing advances. Every
//! cell the ray passes through is visited, in order of increasing distance, so thin walls
//! can not be skipped.

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};

use super::World;
use crate::engine_state::voxels::block::{block_side::BlockSide, BlockId};

/// The first solid cell struck by a ray.
///
/// A plain value: it stays valid after the world changes, though it may then be stale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// The struck cell in world coordinates
    pub cell: Point3<i32>,
    /// Outward normal of the struck face, facing back toward the ray origin.
    /// Zero when the ray started inside a solid cell.
    pub face_normal: Vector3<i32>,
    /// Distance from the ray origin to the center of the struck cell.
    ///
    /// The range limit applies to where the ray enters a cell, so a hit near the end of
    /// the range can report a distance up to about 0.87 (half a cell diagonal) beyond
    /// the `max_distance` it was picked with.
    pub distance: f32,
    /// The block found in the struck cell
    pub block: BlockId,
}

impl Hit {
    /// The struck face, if the ray entered the cell through one.
    pub fn face(&self) -> Option<BlockSide> {
        BlockSide::from_normal(self.face_normal)
    }

    /// The cell in front of the struck face, where a placed block goes.
    pub fn adjacent_cell(&self) -> Point3<i32> {
        self.cell + self.face_normal
    }
}

impl World {
    /// Finds the first solid cell along a ray.
    ///
    /// # Arguments
    /// * `origin` - Ray origin in world coordinates
    /// * `direction` - Ray direction; normalized internally. A zero direction only tests
    ///   the cell containing `origin`.
    /// * `max_distance` - Cells entered farther along the ray than this are not tested
    ///
    /// # Returns
    /// The hit, or `None` if no solid cell is entered within `max_distance`. A solid cell
    /// containing the origin is a hit with a zero normal and zero distance.
    ///
    /// Only cells inside the world can be solid, so the ray is first clipped to the
    /// world's box. The walk starts where the ray enters the box and ends where it leaves,
    /// which bounds it by the world's dimensions whatever the origin or `max_distance`.
    pub fn pick_first_solid(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<Hit> {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return None;
        }
        if !(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite()) {
            return None;
        }

        let size = self.size.map(|v| v as f64);
        let start = origin.map(|v| v as f64);
        let origin_inside = (0..3).all(|axis| start[axis] >= 0.0 && start[axis] < size[axis]);

        let hit = |cell: Point3<i32>, face_normal: Vector3<i32>| Hit {
            cell,
            face_normal,
            distance: start.distance(cell.map(|v| v as f64 + 0.5)) as f32,
            block: self.get_block(cell),
        };

        if origin_inside {
            let cell = start.map(|v| v.floor() as i32);
            if self.is_solid(cell) {
                return Some(Hit {
                    distance: 0.0,
                    ..hit(cell, Vector3::new(0, 0, 0))
                });
            }
        }

        let magnitude = direction.magnitude();
        if !magnitude.is_finite() || magnitude == 0.0 {
            return None;
        }
        let direction = (direction / magnitude).map(|v| v as f64);
        let max_distance = max_distance as f64;

        // Slab test against the world box [0, size).
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        let mut enter_axis = 0;
        for axis in 0..3 {
            let d = direction[axis];
            if d == 0.0 {
                if start[axis] < 0.0 || start[axis] >= size[axis] {
                    return None;
                }
                continue;
            }
            let a = (0.0 - start[axis]) / d;
            let b = (size[axis] - start[axis]) / d;
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            if near > t_enter {
                t_enter = near;
                enter_axis = axis;
            }
            t_exit = t_exit.min(far);
        }
        if t_exit < t_enter.max(0.0) {
            return None;
        }

        let mut step = [0i32; 3];
        for axis in 0..3 {
            if direction[axis] > 0.0 {
                step[axis] = 1;
            } else if direction[axis] < 0.0 {
                step[axis] = -1;
            }
        }

        let mut cell = if origin_inside {
            start.map(|v| v.floor() as i32)
        } else {
            if t_enter > max_distance {
                return None;
            }
            let entry = start + direction * t_enter;
            let mut cell = Point3::new(0, 0, 0);
            for axis in 0..3 {
                let last = self.size[axis] - 1;
                cell[axis] = if axis == enter_axis {
                    if step[axis] > 0 {
                        0
                    } else {
                        last
                    }
                } else {
                    (entry[axis].floor() as i32).clamp(0, last)
                };
            }
            cell
        };

        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];
        for axis in 0..3 {
            let d = direction[axis];
            if d > 0.0 {
                t_max[axis] = ((cell[axis] + 1) as f64 - start[axis]) / d;
                t_delta[axis] = 1.0 / d;
            } else if d < 0.0 {
                t_max[axis] = (cell[axis] as f64 - start[axis]) / d;
                t_delta[axis] = -1.0 / d;
            }
        }

        if !origin_inside && self.is_solid(cell) {
            let mut face_normal = Vector3::new(0, 0, 0);
            face_normal[enter_axis] = -step[enter_axis];
            return Some(hit(cell, face_normal));
        }

        loop {
            // Fixed priority on ties: x, then y, then z.
            let axis = if t_max[0] < t_max[1] && t_max[0] < t_max[2] {
                0
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            if t_max[axis] > max_distance {
                return None;
            }
            cell[axis] += step[axis];
            if !self.in_bounds(cell) {
                return None;
            }
            t_max[axis] += t_delta[axis];

            if self.is_solid(cell) {
                let mut face_normal = Vector3::new(0, 0, 0);
                face_normal[axis] = -step[axis];
                return Some(hit(cell, face_normal));
            }
        }
    }
}
