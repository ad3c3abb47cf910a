//! Vertex data structures for voxel rendering.
//!
//! This module defines the interleaved vertex format handed to the rendering collaborator.
//! Mesh groups keep their attributes in separate buffers; [`Vertex`] is the packed form
//! for renderers that want a single vertex buffer.

/// A vertex in the voxel rendering pipeline.
///
/// Represents a single corner of a block face with its shading normal and atlas UV.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Normal: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Face normal, axis aligned
    pub normal: [f32; 3],
    /// UV texture coordinates inside the block atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with the given attributes.
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Vertex {
            position,
            normal,
            tex_coords,
        }
    }

    /// Size in bytes of one vertex, the stride of an interleaved buffer.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_has_no_padding() {
        assert_eq!(Vertex::STRIDE, 32);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [
            Vertex::new([0.0, 1.0, 2.0], [0.0, 1.0, 0.0], [0.25, 0.5]),
            Vertex::new([1.0, 1.0, 2.0], [0.0, 1.0, 0.0], [0.5, 0.5]),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * Vertex::STRIDE);
        let back: &[Vertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back, &vertices);
    }
}
