//! Renderer-facing data for the voxel world.
//!
//! The core does not draw anything itself. It produces chunk meshes grouped by block
//! type, each with the material the renderer should use, in a layout that uploads
//! directly into GPU buffers.

pub mod meshing;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
