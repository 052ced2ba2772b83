//! The 3x3x3 block of chunks around a center chunk.
//!
//! Meshing and collider merging look one voxel past the chunk edge. Rather
//! than reaching back into the store (which would create chunks mid-mesh),
//! callers gather all 27 snapshots up front.
//!
//! Chunk `i` sits at offset `(i % 3 - 1, (i / 3) % 3 - 1, i / 9 - 1)` from the
//! center, i.e. `index = cz * 9 + cy * 3 + cx` with each component in `0..3`.

use std::sync::Arc;

use crate::chunk::{ChunkCoord, ChunkData, VoxelId, AIR, CHUNK_SIZE};
use crate::error::{VoxelError, VoxelResult};

/// Number of chunks in a neighborhood.
pub const NEIGHBORHOOD_LEN: usize = 27;

/// Index of the center chunk.
const CENTER: usize = 13;

const SIZE: i32 = CHUNK_SIZE as i32;

/// Read-only view of a chunk and its 26 neighbors.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    chunks: Box<[Arc<ChunkData>; NEIGHBORHOOD_LEN]>,
}

impl Neighborhood {
    /// Builds a neighborhood from 27 snapshots in `cz * 9 + cy * 3 + cx` order.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::IncompleteNeighborhood`] if `chunks` does not hold
    /// exactly 27 entries.
    pub fn from_chunks(chunks: Vec<Arc<ChunkData>>) -> VoxelResult<Self> {
        let len = chunks.len();
        let chunks: Box<[Arc<ChunkData>; NEIGHBORHOOD_LEN]> = chunks
            .into_boxed_slice()
            .try_into()
            .map_err(|_| VoxelError::IncompleteNeighborhood(len))?;
        Ok(Self { chunks })
    }

    /// Builds a neighborhood around `center` by calling `fetch` for each of
    /// the 27 coordinates, in index order.
    pub fn gather<F>(center: ChunkCoord, mut fetch: F) -> Self
    where
        F: FnMut(ChunkCoord) -> Arc<ChunkData>,
    {
        let chunks: [Arc<ChunkData>; NEIGHBORHOOD_LEN] = std::array::from_fn(|i| {
            let (dx, dy, dz) = Self::offset_of(i);
            fetch(center.offset(dx, dy, dz))
        });
        Self {
            chunks: Box::new(chunks),
        }
    }

    /// Surrounds `center` with all-air chunks.
    #[must_use]
    pub fn isolated(center: Arc<ChunkData>) -> Self {
        let coord = center.coord();
        let mut center = Some(center);
        Self::gather(coord, |c| {
            if c == coord {
                if let Some(chunk) = center.take() {
                    return chunk;
                }
            }
            Arc::new(ChunkData::new(c))
        })
    }

    /// Chunk offset of index `i`.
    #[inline]
    #[must_use]
    pub const fn offset_of(i: usize) -> (i32, i32, i32) {
        (
            (i % 3) as i32 - 1,
            ((i / 3) % 3) as i32 - 1,
            (i / 9) as i32 - 1,
        )
    }

    /// The center chunk.
    #[inline]
    #[must_use]
    pub fn center(&self) -> &ChunkData {
        &self.chunks[CENTER]
    }

    /// The center chunk's snapshot.
    #[must_use]
    pub fn center_snapshot(&self) -> Arc<ChunkData> {
        Arc::clone(&self.chunks[CENTER])
    }

    /// All 27 chunks in index order.
    #[must_use]
    pub fn chunks(&self) -> &[Arc<ChunkData>] {
        &self.chunks[..]
    }

    /// Voxel at a position relative to the center chunk's origin.
    ///
    /// Valid for each component in `-16..32`; positions outside the block
    /// read as air.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> VoxelId {
        let range = -SIZE..SIZE * 2;
        if !range.contains(&x) || !range.contains(&y) || !range.contains(&z) {
            return AIR;
        }
        let (cx, lx) = ((x + SIZE) / SIZE, (x + SIZE) % SIZE);
        let (cy, ly) = ((y + SIZE) / SIZE, (y + SIZE) % SIZE);
        let (cz, lz) = ((z + SIZE) / SIZE, (z + SIZE) % SIZE);
        let index = (cz * 9 + cy * 3 + cx) as usize;
        self.chunks[index].get(lx as usize, ly as usize, lz as usize)
    }

    /// True if the voxel at the relative position is not air.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z) != AIR
    }
}
