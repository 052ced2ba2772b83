//! Per-chunk processing.
//!
//! Glues the store to the mesher and the collider merger: gather the 3x3x3
//! neighborhood once, then derive everything the renderer and the physics
//! layer need for the center chunk.

use tracing::trace;
use voxels_core::{ChunkCoord, VoxelChange, CHUNK_SIZE};
use voxels_meshing::{ChunkMesh, ColliderBox, ColliderMerger, DefaultMaterials, FaceMesher, VoxelMaterials};
use voxels_world::ChunkStore;

/// Render and collision data for one chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkOutput {
    /// The chunk this output belongs to.
    pub coord: ChunkCoord,
    /// Face buffers.
    pub mesh: ChunkMesh,
    /// Merged collider boxes, chunk-local.
    pub colliders: Vec<ColliderBox>,
}

/// Mesher and collider merger for one worker.
pub struct ChunkPipeline<M = DefaultMaterials> {
    mesher: FaceMesher<M>,
    merger: ColliderMerger,
}

impl<M: VoxelMaterials> ChunkPipeline<M> {
    /// Creates a pipeline with the given materials.
    #[must_use]
    pub fn new(materials: M) -> Self {
        Self {
            mesher: FaceMesher::new(materials),
            merger: ColliderMerger::new(),
        }
    }

    /// The face mesher.
    #[must_use]
    pub fn mesher(&self) -> &FaceMesher<M> {
        &self.mesher
    }

    /// Meshes `coord`, generating it and its neighbors as needed.
    pub fn mesh_chunk(&self, store: &ChunkStore, coord: ChunkCoord) -> ChunkMesh {
        self.mesher.mesh(&store.neighborhood(coord))
    }

    /// Merges colliders for `coord`, generating it and its neighbors as needed.
    pub fn colliders_for(&mut self, store: &ChunkStore, coord: ChunkCoord) -> Vec<ColliderBox> {
        self.merger.merge(&store.neighborhood(coord))
    }

    /// Meshes and merges `coord` from a single neighborhood snapshot.
    pub fn process(&mut self, store: &ChunkStore, coord: ChunkCoord) -> ChunkOutput {
        let neighborhood = store.neighborhood(coord);
        let output = ChunkOutput {
            coord,
            mesh: self.mesher.mesh(&neighborhood),
            colliders: self.merger.merge(&neighborhood),
        };
        trace!(
            chunk = %coord,
            faces = output.mesh.face_count(),
            colliders = output.colliders.len(),
            "processed chunk"
        );
        output
    }
}

impl Default for ChunkPipeline {
    fn default() -> Self {
        Self::new(DefaultMaterials)
    }
}

/// Chunks whose mesh can change after `change`.
///
/// Meshing reads one voxel past every chunk face, edge and corner, so a write
/// on a chunk border also dirties the chunks across that border. The changed
/// chunk is always first.
#[must_use]
pub fn affected_chunks(change: &VoxelChange) -> Vec<ChunkCoord> {
    let (coord, local) = ChunkCoord::split_world_pos(change.position);
    let offsets = local.map(|l| match l {
        0 => [0, -1],
        l if l == CHUNK_SIZE - 1 => [0, 1],
        _ => [0, 0],
    });

    let mut chunks = Vec::with_capacity(8);
    for dz in offsets[2] {
        for dy in offsets[1] {
            for dx in offsets[0] {
                let neighbor = coord.offset(dx, dy, dz);
                if !chunks.contains(&neighbor) {
                    chunks.push(neighbor);
                }
            }
        }
    }
    chunks
}
