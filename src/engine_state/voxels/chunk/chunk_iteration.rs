//! # Chunk Iteration Module
//!
//! This module provides an iterator for efficiently traversing all non-air blocks
//! in a chunk.
//!
//! ## Memory-Aware Iteration
//!
//! The `ChunkBlockIterator` uses the chunk's `occupied` bit vector to jump straight from
//! one non-air cell to the next, so sparse chunks (mostly air) cost little more than a
//! scan of their bit mask.

use cgmath::Point3;

use crate::engine_state::voxels::block::BlockId;

use super::Chunk;

/// An iterator over all non-air blocks in a chunk, in storage order
/// (x fastest, then y, then z).
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next storage index to inspect
    next_index: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first cell of `chunk_ref`.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            next_index: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    /// The local position of the cell and the block stored there.
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.chunk_ref.occupied.get(self.next_index..)?;
        let index = self.next_index + remaining.first_one()?;
        self.next_index = index + 1;
        Some((Chunk::local_from_index(index), self.chunk_ref.blocks[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;

    #[test]
    fn test_empty_chunk_yields_nothing() {
        let chunk = Chunk::new(Point3::new(0, 0, 0));
        assert_eq!(chunk.occupied_cells().count(), 0);
    }

    #[test]
    fn test_yields_cells_in_storage_order() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0));
        let last = (CHUNK_DIMENSION - 1) as usize;
        chunk.set(Point3::new(last, last, last), BlockId(2));
        chunk.set(Point3::new(0, 0, 0), BlockId(1));
        chunk.set(Point3::new(3, 1, 0), BlockId(4));

        let cells: Vec<_> = chunk.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                (Point3::new(0, 0, 0), BlockId(1)),
                (Point3::new(3, 1, 0), BlockId(4)),
                (Point3::new(last, last, last), BlockId(2)),
            ]
        );
    }

    #[test]
    fn test_cleared_cells_are_skipped() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0));
        chunk.set(Point3::new(1, 1, 1), BlockId(1));
        chunk.set(Point3::new(1, 1, 1), BlockId::AIR);
        assert_eq!(chunk.occupied_cells().count(), 0);
    }
}
