//! Face mesher with per-corner ambient occlusion.
//!
//! Emits one [`FaceInstance`] per visible face instead of merged quads, so
//! every face carries its own AO and can be textured independently.
//!
//! ## Corner Layout
//!
//! For a face with tangents `(u, v)` the four corners are, in order:
//!
//! ```text
//!   0 (-u,+v) ───── 1 (+u,+v)
//!       │               │
//!   2 (-u,-v) ───── 3 (+u,-v)
//! ```
//!
//! The shader indexes the AO array by this order.

use tracing::trace;
use voxels_core::{Face, Neighborhood, AIR, CHUNK_SIZE};

use crate::buffer::{ChunkMesh, FaceInstance};
use crate::materials::{DefaultMaterials, VoxelMaterials};

/// Occlusion per number of occluding neighbors.
pub const AO_LEVELS: [f32; 4] = [0.0, 0.2, 0.4, 0.6];

/// Corner signs along `(u, v)`.
const CORNERS: [(i32, i32); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

const SIZE: i32 = CHUNK_SIZE as i32;

/// Converts chunk neighborhoods into face instances.
#[derive(Debug, Clone)]
pub struct FaceMesher<M = DefaultMaterials> {
    materials: M,
}

impl<M: VoxelMaterials> FaceMesher<M> {
    /// Creates a mesher using `materials` for layers and transparency.
    #[must_use]
    pub const fn new(materials: M) -> Self {
        Self { materials }
    }

    /// The material strategy.
    #[must_use]
    pub fn materials(&self) -> &M {
        &self.materials
    }

    /// Meshes the center chunk of `chunks`.
    ///
    /// Voxels are visited z, y, x; faces in [`Face::ALL`] order. A face is
    /// visible when its neighbor is air or differs in transparency, and it
    /// lands in the buffer matching the current voxel's transparency.
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn mesh(&self, chunks: &Neighborhood) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();

        for z in 0..SIZE {
            for y in 0..SIZE {
                for x in 0..SIZE {
                    let voxel = chunks.get(x, y, z);
                    if voxel == AIR {
                        continue;
                    }
                    let transparent = self.materials.is_transparent(voxel);
                    let above = chunks.get(x, y + 1, z);
                    let is_top = above == AIR || self.materials.is_transparent(above) != transparent;

                    let buffer = if transparent {
                        &mut mesh.transparent
                    } else {
                        &mut mesh.opaque
                    };

                    let mut visible = false;
                    for face in Face::ALL {
                        let [nx, ny, nz] = face.normal();
                        let p = [x + nx, y + ny, z + nz];
                        let neighbor = chunks.get(p[0], p[1], p[2]);
                        if neighbor != AIR && self.materials.is_transparent(neighbor) == transparent {
                            continue;
                        }
                        visible = true;
                        let layer = self.materials.texture(voxel, face, is_top);
                        buffer.faces.push(FaceInstance {
                            center: [x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5],
                            packed_face: (layer * 6 + face.index()) as f32,
                            ao: ambient_occlusion(chunks, p, face),
                        });
                    }

                    if visible {
                        buffer.bounds.expand_by_voxel([x as usize, y as usize, z as usize]);
                    }
                }
            }
        }

        trace!(
            chunk = %chunks.center().coord(),
            opaque = mesh.opaque.face_count(),
            transparent = mesh.transparent.face_count(),
            "meshed chunk"
        );
        mesh
    }
}

impl Default for FaceMesher {
    fn default() -> Self {
        Self::new(DefaultMaterials)
    }
}

/// AO for the four corners of `face`, sampled around `p`, the cell the face
/// looks into.
///
/// The diagonal only counts when at least one edge neighbor is open; two
/// solid edges already fully shade the corner.
fn ambient_occlusion(chunks: &Neighborhood, p: [i32; 3], face: Face) -> [f32; 4] {
    let (u, v) = face.tangents();
    CORNERS.map(|(cu, cv)| {
        let du = u.map(|c| c * cu);
        let dv = v.map(|c| c * cv);
        let n1 = chunks.is_solid(p[0] + du[0], p[1] + du[1], p[2] + du[2]);
        let n2 = chunks.is_solid(p[0] + dv[0], p[1] + dv[1], p[2] + dv[2]);
        let n3 = chunks.is_solid(
            p[0] + du[0] + dv[0],
            p[1] + du[1] + dv[1],
            p[2] + du[2] + dv[2],
        );
        let occluders = usize::from(n1) + usize::from(n2) + usize::from(n3 && !(n1 && n2));
        AO_LEVELS[occluders]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use voxels_core::{ChunkCoord, ChunkData};

    fn isolated(voxels: &[([usize; 3], u8)]) -> Neighborhood {
        let mut chunk = ChunkData::new(ChunkCoord::ORIGIN);
        for &([x, y, z], v) in voxels {
            chunk.set(x, y, z, v);
        }
        Neighborhood::isolated(Arc::new(chunk))
    }

    #[test]
    fn test_single_voxel_face_order() {
        let mesh = FaceMesher::default().mesh(&isolated(&[([4, 5, 6], 3)]));
        assert!(mesh.transparent.is_empty());
        let faces = &mesh.opaque.faces;
        assert_eq!(faces.len(), 6);
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.center, [4.5, 5.5, 6.5]);
            assert_eq!(face.packed_face, (2 * 6 + i) as f32);
            assert_eq!(face.ao, [0.0; 4]);
        }
        assert_eq!(
            mesh.opaque.bounds,
            crate::buffer::Aabb::new([4.0, 5.0, 6.0], [5.0, 6.0, 7.0])
        );
    }

    #[test]
    fn test_shared_face_hidden() {
        let mesh = FaceMesher::default().mesh(&isolated(&[([1, 1, 1], 1), ([2, 1, 1], 1)]));
        assert_eq!(mesh.opaque.face_count(), 10);
        assert!(mesh
            .opaque
            .faces
            .iter()
            .all(|f| !(f.voxel() == [1, 1, 1] && f.face_index() == Face::East.index())));
    }

    #[test]
    fn test_top_flag() {
        let materials = crate::materials::FnMaterials::new(|_: u8, _: Face, is_top: bool| u32::from(is_top));
        let mesher = FaceMesher::new(materials);
        let mesh = mesher.mesh(&isolated(&[([3, 3, 3], 1), ([3, 4, 3], 1)]));
        let lower: Vec<_> = mesh.opaque.faces.iter().filter(|f| f.voxel() == [3, 3, 3]).collect();
        let upper: Vec<_> = mesh.opaque.faces.iter().filter(|f| f.voxel() == [3, 4, 3]).collect();
        assert!(lower.iter().all(|f| f.layer() == 0));
        assert!(upper.iter().all(|f| f.layer() == 1));
    }

    #[test]
    fn test_edge_and_corner_occlusion() {
        // Floor voxel at (5,5,5); its top face looks into (5,6,5).
        // Top tangents: u = +x, v = -z.
        let n = isolated(&[([5, 5, 5], 1), ([4, 6, 5], 1)]);
        let mesh = FaceMesher::default().mesh(&n);
        let top = mesh
            .opaque
            .faces
            .iter()
            .find(|f| f.voxel() == [5, 5, 5] && f.face_index() == Face::Top.index())
            .copied()
            .unwrap();
        // The -x edge is solid: corners 0 and 2 (both -u) get 0.2.
        assert_eq!(top.ao, [0.2, 0.0, 0.2, 0.0]);

        let n = isolated(&[([5, 5, 5], 1), ([6, 6, 4], 1)]);
        let top = FaceMesher::default()
            .mesh(&n)
            .opaque
            .faces
            .into_iter()
            .find(|f| f.voxel() == [5, 5, 5] && f.face_index() == Face::Top.index())
            .unwrap();
        // Only the (+x, -z) diagonal is solid: that is corner (+u, +v) = 1.
        assert_eq!(top.ao, [0.0, 0.2, 0.0, 0.0]);
    }
}
