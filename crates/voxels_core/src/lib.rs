//! # Voxels Core
//!
//! Shared building blocks for the chunked voxel engine.
//!
//! ## Design Principles
//!
//! 1. **Fixed chunks**: every chunk is a 16x16x16 cube of `u8` voxel ids
//! 2. **Air is zero**: voxel id `0` is empty, every other id is opaque to the core
//! 3. **Snapshots**: chunk data is shared as `Arc<ChunkData>` and replaced on write
//! 4. **Synchronous notification**: `Signal` delivers changes before `set` returns
//!
//! ## Core Components
//!
//! - `ChunkCoord` / `ChunkData`: chunk addressing and storage
//! - `Face`: the six face directions and their tangent frames
//! - `Neighborhood`: the 3x3x3 chunk block used by meshing and collider merging
//! - `Signal`: single-value observable
//! - `EventBus`: channel-based change feed
//!
//! ## Example
//!
//! ```rust
//! use voxels_core::{ChunkCoord, ChunkData};
//!
//! let coord: ChunkCoord = "1:-2:3".parse().unwrap();
//! let mut chunk = ChunkData::new(coord);
//! chunk.set(0, 0, 0, 7);
//! assert_eq!(chunk.get(0, 0, 0), 7);
//! assert_eq!(chunk.position(), [16, -32, 48]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod error;
pub mod events;
pub mod face;
pub mod neighborhood;
pub mod sync;

pub use chunk::{
    local_index, ChunkCoord, ChunkData, VoxelId, AIR, CHUNK_AREA, CHUNK_SIZE, CHUNK_VOLUME,
    KEY_DELIMITER,
};
pub use error::{VoxelError, VoxelResult};
pub use events::{EventBus, EventReceiver, VoxelChange};
pub use face::Face;
pub use neighborhood::{Neighborhood, NEIGHBORHOOD_LEN};
pub use sync::{Signal, SubscriptionId};
