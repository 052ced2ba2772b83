//! Chunk data structures.
//!
//! Chunks are 16x16x16 voxels, one byte per voxel.

use std::fmt;
use std::str::FromStr;

use crate::error::VoxelError;

/// Chunk dimension - 16 voxels per axis.
pub const CHUNK_SIZE: usize = 16;

/// Voxels in one z-slice of a chunk.
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Total voxels per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE;

/// Separator between the coordinate components of a chunk key.
pub const KEY_DELIMITER: char = ':';

/// A voxel id. `0` is air, everything else is interpreted by callers.
pub type VoxelId = u8;

/// The empty voxel.
pub const AIR: VoxelId = 0;

/// Linear index of a local voxel position.
///
/// Layout: `z * CHUNK_SIZE * CHUNK_SIZE + y * CHUNK_SIZE + x`.
#[inline]
#[must_use]
pub const fn local_index(x: usize, y: usize, z: usize) -> usize {
    debug_assert!(x < CHUNK_SIZE);
    debug_assert!(y < CHUNK_SIZE);
    debug_assert!(z < CHUNK_SIZE);
    z * CHUNK_AREA + y * CHUNK_SIZE + x
}

/// Chunk coordinate in chunk space (not voxel space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// The chunk at the world origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Converts a world voxel position to the chunk containing it.
    #[inline]
    #[must_use]
    pub const fn from_world_pos(position: [i32; 3]) -> Self {
        Self::new(
            position[0].div_euclid(CHUNK_SIZE as i32),
            position[1].div_euclid(CHUNK_SIZE as i32),
            position[2].div_euclid(CHUNK_SIZE as i32),
        )
    }

    /// Splits a world voxel position into its chunk and the local position inside it.
    #[inline]
    #[must_use]
    pub const fn split_world_pos(position: [i32; 3]) -> (Self, [usize; 3]) {
        let size = CHUNK_SIZE as i32;
        (
            Self::from_world_pos(position),
            [
                position[0].rem_euclid(size) as usize,
                position[1].rem_euclid(size) as usize,
                position[2].rem_euclid(size) as usize,
            ],
        )
    }

    /// Returns the world position of this chunk's origin corner.
    ///
    /// Chunks past the `i32` voxel range (beyond `i32::MAX / 16`) clamp to
    /// the edge of that range.
    #[inline]
    #[must_use]
    pub const fn world_origin(self) -> [i32; 3] {
        let size = CHUNK_SIZE as i32;
        [
            self.x.saturating_mul(size),
            self.y.saturating_mul(size),
            self.z.saturating_mul(size),
        ]
    }

    /// Returns this coordinate translated by the given chunk offset.
    ///
    /// Chunk space wraps at the `i32` limits, so distinct offsets always
    /// give distinct chunks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// Returns the string key used for export and import (`"x:y:z"`).
    #[must_use]
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}", self.x, self.y, self.z)
    }
}

impl FromStr for ChunkCoord {
    type Err = VoxelError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut parts = key.split(KEY_DELIMITER).map(|part| part.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(Self::new(x, y, z)),
            _ => Err(VoxelError::InvalidChunkKey(key.to_string())),
        }
    }
}

impl From<[i32; 3]> for ChunkCoord {
    fn from(value: [i32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// A chunk of voxels - 16x16x16 = 4096 bytes.
///
/// Chunks are shared as `Arc<ChunkData>` snapshots. Writers clone-on-write
/// through `Arc::make_mut`, so a snapshot handed to a subscriber never changes.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkData {
    /// The coordinate of this chunk in chunk space.
    coord: ChunkCoord,
    /// Voxel ids, layout `voxels[z * 256 + y * 16 + x]`.
    voxels: Box<[VoxelId; CHUNK_VOLUME]>,
    /// Set once the chunk has diverged from its generated contents.
    pub modified: bool,
}

impl ChunkData {
    /// Creates a new all-air chunk.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            voxels: Box::new([AIR; CHUNK_VOLUME]),
            modified: false,
        }
    }

    /// Creates a chunk filled by `fill(world_x, world_y, world_z)`.
    ///
    /// Voxels are visited z outer, y middle, x inner, so `fill` is called in
    /// storage order exactly once per voxel. World coordinates saturate at the
    /// `i32` limits.
    #[must_use]
    pub fn generate<F>(coord: ChunkCoord, mut fill: F) -> Self
    where
        F: FnMut(i32, i32, i32) -> VoxelId,
    {
        let mut chunk = Self::new(coord);
        let [ox, oy, oz] = coord.world_origin();
        let mut i = 0;
        for z in 0..CHUNK_SIZE as i32 {
            for y in 0..CHUNK_SIZE as i32 {
                for x in 0..CHUNK_SIZE as i32 {
                    chunk.voxels[i] =
                        fill(ox.saturating_add(x), oy.saturating_add(y), oz.saturating_add(z));
                    i += 1;
                }
            }
        }
        chunk
    }

    /// Builds a modified chunk from raw voxel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidChunkLength`] unless `bytes` holds exactly
    /// `CHUNK_VOLUME` voxels.
    pub fn from_bytes(coord: ChunkCoord, bytes: &[u8]) -> Result<Self, VoxelError> {
        let voxels: [VoxelId; CHUNK_VOLUME] =
            bytes.try_into().map_err(|_| VoxelError::InvalidChunkLength {
                expected: CHUNK_VOLUME,
                actual: bytes.len(),
            })?;
        Ok(Self {
            coord,
            voxels: Box::new(voxels),
            modified: true,
        })
    }

    /// Returns the chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the world position of the chunk origin.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> [i32; 3] {
        self.coord.world_origin()
    }

    /// Gets a voxel at the given local position.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> VoxelId {
        self.voxels[local_index(x, y, z)]
    }

    /// Sets a voxel at the given local position.
    ///
    /// Does not touch `modified`; the store decides what counts as a modification.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, voxel: VoxelId) {
        self.voxels[local_index(x, y, z)] = voxel;
    }

    /// Returns the raw voxel bytes in storage order.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.voxels[..]
    }

    /// Returns true if every voxel is air.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(|&v| v == AIR)
    }

    /// Number of non-air voxels.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v != AIR).count()
    }
}

impl fmt::Debug for ChunkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkData")
            .field("coord", &self.coord)
            .field("modified", &self.modified)
            .field("solid", &self.solid_count())
            .finish()
    }
}
