//! Texture atlas layout for block faces.
//!
//! Block textures are packed into one atlas image laid out as a uniform grid of tiles,
//! numbered row-major from the top-left corner. This module turns a tile index plus a
//! tile-local coordinate into the normalized UV the renderer samples.

use serde::{Deserialize, Serialize};

/// A uniform grid of square-ish tiles inside one texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAtlas {
    /// Tiles per row.
    pub columns: u32,
    /// Tiles per column.
    pub rows: u32,
}

/// The normalized rectangle a tile occupies in the atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasRegion {
    /// Left edge (U of the top-left corner)
    pub u0: f32,
    /// Top edge (V of the top-left corner)
    pub v0: f32,
    /// Right edge
    pub u1: f32,
    /// Bottom edge
    pub v1: f32,
}

impl Default for TextureAtlas {
    /// The 4x2 atlas used by the built-in palette.
    fn default() -> Self {
        TextureAtlas { columns: 4, rows: 2 }
    }
}

impl TextureAtlas {
    pub fn new(columns: u32, rows: u32) -> Self {
        TextureAtlas { columns, rows }
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Returns the region of tile `index`.
    ///
    /// Indices past the last tile wrap around, so a misconfigured block type samples a
    /// wrong tile rather than reading outside the atlas.
    pub fn region(&self, index: u32) -> AtlasRegion {
        let columns = self.columns.max(1);
        let rows = self.rows.max(1);
        let index = index % (columns * rows);
        let tile_w = 1.0 / columns as f32;
        let tile_h = 1.0 / rows as f32;
        let column = (index % columns) as f32;
        let row = (index / columns) as f32;
        AtlasRegion {
            u0: column * tile_w,
            v0: row * tile_h,
            u1: (column + 1.0) * tile_w,
            v1: (row + 1.0) * tile_h,
        }
    }
}

impl AtlasRegion {
    /// Maps a tile-local coordinate in `[0, 1]²` into the atlas.
    pub fn map(&self, local: [f32; 2]) -> [f32; 2] {
        [
            self.u0 + (self.u1 - self.u0) * local[0],
            self.v0 + (self.v1 - self.v0) * local[1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_region_of_first_and_last_tile() {
        let atlas = TextureAtlas::new(4, 2);
        let first = atlas.region(0);
        assert!(close(first.u0, 0.0) && close(first.v0, 0.0));
        assert!(close(first.u1, 0.25) && close(first.v1, 0.5));

        let last = atlas.region(7);
        assert!(close(last.u0, 0.75) && close(last.v0, 0.5));
        assert!(close(last.u1, 1.0) && close(last.v1, 1.0));
    }

    #[test]
    fn test_out_of_range_index_wraps() {
        let atlas = TextureAtlas::new(4, 2);
        assert_eq!(atlas.region(9), atlas.region(1));
    }

    #[test]
    fn test_map_corners() {
        let region = TextureAtlas::new(2, 2).region(3);
        assert_eq!(region.map([0.0, 0.0]), [0.5, 0.5]);
        assert_eq!(region.map([1.0, 1.0]), [1.0, 1.0]);
        assert_eq!(region.map([0.5, 0.5]), [0.75, 0.75]);
    }
}
