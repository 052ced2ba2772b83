//! # Voxels
//!
//! A chunked voxel engine: sparse storage, streaming, face meshing with
//! ambient occlusion and greedy collider boxes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          voxels (facade)                         │
//! │                                                                  │
//! │  ┌─────────────────┐   Neighborhood   ┌──────────────────────┐   │
//! │  │  voxels_world   │─────────────────>│   voxels_meshing     │   │
//! │  │                 │                  │                      │   │
//! │  │  • ChunkStore   │                  │  • FaceMesher (AO)   │   │
//! │  │  • Streaming    │                  │  • ColliderMerger    │   │
//! │  │  • WorldConfig  │                  │  • ChunkColliders    │   │
//! │  └────────┬────────┘                  └──────────┬───────────┘   │
//! │           │                                      │               │
//! │           └──────────────┐      ┌────────────────┘               │
//! │                          ▼      ▼                                │
//! │                   ┌──────────────────────┐                       │
//! │                   │     voxels_core      │                       │
//! │                   │  chunks • Signal •   │                       │
//! │                   │  EventBus • errors   │                       │
//! │                   └──────────────────────┘                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use voxels::{ChunkCoord, ChunkPipeline, ChunkStore};
//!
//! let store = ChunkStore::with_generator(|_x: i32, y: i32, _z: i32| u8::from(y < 3));
//! let mut pipeline = ChunkPipeline::default();
//!
//! let output = pipeline.process(&store, ChunkCoord::ORIGIN);
//! assert_eq!(output.mesh.opaque.face_count(), 16 * 16);
//! assert_eq!(output.colliders.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod pipeline;

pub use voxels_core as core;
pub use voxels_meshing as meshing;
pub use voxels_world as world;

pub use pipeline::{affected_chunks, ChunkOutput, ChunkPipeline};
pub use voxels_core::{
    ChunkCoord, ChunkData, Face, Neighborhood, Signal, VoxelChange, VoxelError, VoxelResult,
    CHUNK_SIZE,
};
pub use voxels_meshing::{
    ChunkColliders, ChunkMesh, ColliderBox, DefaultMaterials, FaceMesher, FnMaterials,
    PhysicsBackend, VoxelMaterials,
};
pub use voxels_world::{ChunkBounds, ChunkStore, StreamingConfig, VoxelGenerator, WorldConfig};
