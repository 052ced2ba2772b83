//! # Voxels Meshing
//!
//! Turns a 3x3x3 [`Neighborhood`](voxels_core::Neighborhood) into render
//! and collision data for its center chunk.
//!
//! ## Pipeline
//!
//! ```text
//!                  ┌────────────┐   ChunkMesh { opaque, transparent }
//!              ┌──>│ FaceMesher │──────────────────────────────────> renderer
//! Neighborhood │   └────────────┘
//!              │   ┌────────────────┐  Vec<ColliderBox>  ┌────────────────┐
//!              └──>│ ColliderMerger │───────────────────>│ ChunkColliders │──> PhysicsBackend
//!                  └────────────────┘                    └────────────────┘
//! ```
//!
//! ## Face Record Layout
//!
//! Every visible face is one [`FaceInstance`] of 8 `f32`:
//!
//! ```text
//! [center_x, center_y, center_z, layer * 6 + face, ao0, ao1, ao2, ao3]
//! ```
//!
//! AO values are occlusion, not brightness: shade with `1.0 - ao`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buffer;
pub mod collider;
pub mod materials;
pub mod mesher;
pub mod physics;

pub use buffer::{Aabb, ChunkMesh, FaceBuffer, FaceInstance, FACE_STRIDE};
pub use collider::{merge_colliders, ColliderBox, ColliderMerger};
pub use materials::{DefaultMaterials, FnMaterials, VoxelMaterials};
pub use mesher::{FaceMesher, AO_LEVELS};
pub use physics::{ChunkColliders, ColliderSyncStats, PhysicsBackend};
