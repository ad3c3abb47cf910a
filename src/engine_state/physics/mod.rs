//! # Physics Module
//!
//! Static collision geometry handed to the physics collaborator. Each chunk owns at most
//! one [`CollisionShape`], derived from its freshly built mesh and replaced whenever the
//! chunk is rebuilt.

use cgmath::Point3;

use crate::engine_state::rendering::meshing::ChunkMesh;

/// A triangle soup describing the solid surface of one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionShape {
    /// Chunk this shape belongs to, in chunk coordinates
    pub chunk: Point3<i32>,
    /// Vertex positions in world space
    pub vertices: Vec<[f32; 3]>,
    /// Triangle list into `vertices`
    pub indices: Vec<u32>,
}

impl CollisionShape {
    /// Builds the collision surface from the solid groups of `mesh`.
    ///
    /// Non-solid groups (foliage) are skipped: they are drawn but do not block bodies.
    ///
    /// # Returns
    /// `None` when the mesh has no solid geometry at all, so nothing has to be registered.
    pub fn from_mesh(mesh: &ChunkMesh) -> Option<Self> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for group in mesh.groups.iter().filter(|group| group.solid) {
            let base = vertices.len() as u32;
            vertices.extend_from_slice(&group.data.positions);
            indices.extend(group.data.indices.iter().map(|index| base + index));
        }

        if indices.is_empty() {
            return None;
        }

        Some(CollisionShape {
            chunk: mesh.position,
            vertices,
            indices,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles as corner triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |triangle| {
            [
                self.vertices[triangle[0] as usize],
                self.vertices[triangle[1] as usize],
                self.vertices[triangle[2] as usize],
            ]
        })
    }
}
