//! # Voxel Engine Core
//!
//! This module contains the voxel data model: block types, chunk storage, the world grid
//! and the gameplay edits built on ray picking.
//!
//! ## Architecture
//!
//! * **Block**: Block ids, faces, the block type registry and the built-in palette
//! * **Chunk**: Fixed-size 3D arrays of blocks, each owning its dirty flag and its
//!   current mesh and collision shape
//! * **World**: The dense chunk grid with the world-level block API, dirty propagation,
//!   rebuilds, ray picking and terrain generation
//! * **Interaction**: Placing and mining blocks against picked faces
//!
//! ## Data Flow
//!
//! 1. The generator or a gameplay edit calls `World::set_block`
//! 2. The world writes to the owning chunk and marks it, and any chunk sharing the edited
//!    boundary, dirty
//! 3. On the next maintenance tick every dirty chunk rebuilds its mesh and collision
//! 4. Picking, mining and placement query the world with rays
//!
//! ## Thread Safety
//!
//! Everything here is single-threaded. Rebuilds need exclusive access to the world;
//! finished meshes and collision shapes are shared immutably through `Arc`.

pub mod block;
pub mod chunk;
pub mod interaction;
pub mod world;
