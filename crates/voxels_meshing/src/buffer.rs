//! Mesh output types.

use bytemuck::{Pod, Zeroable};

/// Floats per face record.
pub const FACE_STRIDE: usize = 8;

// =============================================================================
// FACE INSTANCE - One visible voxel face, uploaded as instance data
// =============================================================================

/// One visible face, laid out as 8 consecutive `f32`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FaceInstance {
    /// Voxel center in chunk-local space (`x + 0.5`, `y + 0.5`, `z + 0.5`).
    pub center: [f32; 3],
    /// `layer * 6 + face`.
    pub packed_face: f32,
    /// Occlusion per corner, in corner order `(-u,+v) (+u,+v) (-u,-v) (+u,-v)`.
    pub ao: [f32; 4],
}

impl FaceInstance {
    /// Face index (0..6).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn face_index(&self) -> u32 {
        (self.packed_face as u32) % 6
    }

    /// Atlas layer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn layer(&self) -> u32 {
        (self.packed_face as u32) / 6
    }

    /// Local voxel position of the face's voxel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn voxel(&self) -> [i32; 3] {
        self.center.map(|c| c.floor() as i32)
    }
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned bounding box in chunk-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box (x, y, z).
    pub min: [f32; 3],
    /// Maximum corner of the box (x, y, z).
    pub max: [f32; 3],
}

impl Aabb {
    /// Box containing nothing; expanding it by a point yields that point.
    pub const EMPTY: Self = Self {
        min: [f32::INFINITY; 3],
        max: [f32::NEG_INFINITY; 3],
    };

    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// True until the first expansion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grows the box to contain `point`.
    pub fn expand_by_point(&mut self, point: [f32; 3]) {
        for ((min, max), p) in self.min.iter_mut().zip(&mut self.max).zip(point) {
            *min = min.min(p);
            *max = max.max(p);
        }
    }

    /// Grows the box to contain the unit cube of the voxel at `position`.
    #[allow(clippy::cast_precision_loss)]
    pub fn expand_by_voxel(&mut self, position: [usize; 3]) {
        let min = position.map(|p| p as f32);
        self.expand_by_point(min);
        self.expand_by_point(min.map(|p| p + 1.0));
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> [f32; 3] {
        [0usize, 1, 2].map(|i| (self.min[i] + self.max[i]) * 0.5)
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> [f32; 3] {
        [0usize, 1, 2].map(|i| self.max[i] - self.min[i])
    }

    /// Smallest sphere around the box as `(center, radius)`, `None` when empty.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<([f32; 3], f32)> {
        if self.is_empty() {
            return None;
        }
        let [sx, sy, sz] = self.size();
        Some((self.center(), (sx * sx + sy * sy + sz * sz).sqrt() * 0.5))
    }

    /// Moves the box by `delta`.
    #[must_use]
    pub fn translate(&self, delta: [f32; 3]) -> Self {
        Self {
            min: [0usize, 1, 2].map(|i| self.min[i] + delta[i]),
            max: [0usize, 1, 2].map(|i| self.max[i] + delta[i]),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

// =============================================================================
// BUFFERS
// =============================================================================

/// Faces for one render pass plus the bounds of the voxels that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceBuffer {
    /// Union of the unit cubes of every voxel with a face in this buffer.
    pub bounds: Aabb,
    /// Face records in emission order.
    pub faces: Vec<FaceInstance>,
}

impl FaceBuffer {
    /// Number of face records (instance count).
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the buffer holds no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Interleaved stride-8 float view.
    #[must_use]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Raw bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Culling sphere around the bounds.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<([f32; 3], f32)> {
        self.bounds.bounding_sphere()
    }
}

/// Meshing result for one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Faces of opaque voxels.
    pub opaque: FaceBuffer,
    /// Faces of transparent voxels.
    pub transparent: FaceBuffer,
}

impl ChunkMesh {
    /// Total faces across both buffers.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.opaque.face_count() + self.transparent.face_count()
    }

    /// Check if mesh is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }
}
