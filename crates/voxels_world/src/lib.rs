//! # Voxels World
//!
//! The chunk store and everything that decides which chunks exist.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐ generate  ┌────────────────────────────────────┐
//! │ VoxelGenerator │──────────>│ ChunkStore                         │
//! └────────────────┘           │  HashMap<ChunkCoord, ChunkHandle>  │
//!                              │  Signal<VoxelChange> + EventBus    │
//!                              │  StreamingWindow ──> LoadedChunks  │
//!                              └────────────────────────────────────┘
//! ```
//!
//! Chunks are created the first time anything touches them (read or write)
//! and live until [`ChunkStore::clear_chunks`].
//!
//! ## Example
//!
//! ```rust
//! use voxels_world::ChunkStore;
//!
//! let store = ChunkStore::with_generator(|_x: i32, y: i32, _z: i32| u8::from(y < 4));
//! assert_eq!(store.get_voxel([3, 2, -7]), 1);
//!
//! store.set_voxel([3, 2, -7], 0);
//! assert_eq!(store.export_chunks().len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod generator;
pub mod store;
pub mod streaming;

pub use config::{ChunkBounds, StreamingConfig, WorldConfig};
pub use generator::{EmptyGenerator, VoxelGenerator};
pub use store::{ChunkHandle, ChunkStore};
pub use streaming::{LoadedChunks, StreamingWindow};
