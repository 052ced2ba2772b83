//! Voxel fill strategies.

use voxels_core::{VoxelId, AIR};

/// Decides the initial value of every voxel in a freshly created chunk.
///
/// Called once per voxel with world coordinates. Implementations must be
/// deterministic: the store may discard and regenerate chunks.
pub trait VoxelGenerator: Send + Sync {
    /// Voxel id at the given world position.
    fn generate(&self, x: i32, y: i32, z: i32) -> VoxelId;
}

impl<F> VoxelGenerator for F
where
    F: Fn(i32, i32, i32) -> VoxelId + Send + Sync,
{
    #[inline]
    fn generate(&self, x: i32, y: i32, z: i32) -> VoxelId {
        self(x, y, z)
    }
}

/// Fills every chunk with air.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGenerator;

impl VoxelGenerator for EmptyGenerator {
    #[inline]
    fn generate(&self, _x: i32, _y: i32, _z: i32) -> VoxelId {
        AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkStore;

    #[test]
    fn test_closure_generator() {
        let generator = |x: i32, y: i32, _z: i32| u8::from(x == y);
        assert_eq!(generator.generate(3, 3, 9), 1);
        assert_eq!(generator.generate(3, 4, 9), 0);
    }

    #[test]
    fn test_empty_generator_matches_default_store() {
        let store = ChunkStore::with_generator(EmptyGenerator);
        assert_eq!(store.get_voxel([7, -3, 40]), AIR);
        assert!(store.snapshot(voxels_core::ChunkCoord::ORIGIN).is_empty());
    }
}
