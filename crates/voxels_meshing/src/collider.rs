//! Greedy collider merging.
//!
//! Covers every solid voxel of a chunk with axis-aligned boxes, growing each
//! box along z first, then y, then x. Not minimal, but deterministic: the
//! same chunk always yields the same boxes in the same order.

use tracing::trace;
use voxels_core::{local_index, ChunkData, Neighborhood, AIR, CHUNK_SIZE, CHUNK_VOLUME};

/// A merged box in chunk-local voxel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderBox {
    /// Minimum corner.
    pub position: [u32; 3],
    /// Extent along x, y, z.
    pub size: [u32; 3],
}

impl ColliderBox {
    /// Number of voxels covered.
    #[must_use]
    pub const fn volume(&self) -> u32 {
        self.size[0] * self.size[1] * self.size[2]
    }

    /// Checks whether the local voxel lies inside the box.
    #[must_use]
    pub fn contains(&self, voxel: [u32; 3]) -> bool {
        (0..3).all(|i| voxel[i] >= self.position[i] && voxel[i] < self.position[i] + self.size[i])
    }

    /// Stable identity used for collider diffing: `"x:y:z:w:h:d"`.
    #[must_use]
    pub fn key(&self) -> String {
        let [x, y, z] = self.position;
        let [w, h, d] = self.size;
        format!("{x}:{y}:{z}:{w}:{h}:{d}")
    }
}

/// Greedy box merger.
///
/// Owns its visited bitmap; reuse one merger per thread to avoid
/// reallocating it.
pub struct ColliderMerger {
    visited: Box<[bool; CHUNK_VOLUME]>,
}

impl ColliderMerger {
    /// Creates a merger with a cleared bitmap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visited: Box::new([false; CHUNK_VOLUME]),
        }
    }

    /// Merges the solid voxels of the center chunk into boxes.
    ///
    /// Only solidity matters; transparency is ignored.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, chunks: &Neighborhood) -> Vec<ColliderBox> {
        self.visited.fill(false);
        let chunk = chunks.center();
        let open = |visited: &[bool], x: usize, y: usize, z: usize| is_open(chunk, visited, x, y, z);

        let mut boxes = Vec::new();
        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    if !open(&self.visited[..], x, y, z) {
                        continue;
                    }

                    let mut depth = CHUNK_SIZE - z;
                    for i in z + 1..CHUNK_SIZE {
                        if !open(&self.visited[..], x, y, i) {
                            depth = i - z;
                            break;
                        }
                    }

                    let mut height = CHUNK_SIZE - y;
                    for i in z..z + depth {
                        for j in y + 1..y + height {
                            if !open(&self.visited[..], x, j, i) {
                                height = j - y;
                                break;
                            }
                        }
                    }

                    let mut width = CHUNK_SIZE - x;
                    for i in z..z + depth {
                        for j in y..y + height {
                            for k in x + 1..x + width {
                                if !open(&self.visited[..], k, j, i) {
                                    width = k - x;
                                    break;
                                }
                            }
                        }
                    }

                    for i in z..z + depth {
                        for j in y..y + height {
                            for k in x..x + width {
                                self.visited[local_index(k, j, i)] = true;
                            }
                        }
                    }

                    boxes.push(ColliderBox {
                        position: [x as u32, y as u32, z as u32],
                        size: [width as u32, height as u32, depth as u32],
                    });
                }
            }
        }

        trace!(chunk = %chunk.coord(), boxes = boxes.len(), "merged colliders");
        boxes
    }
}

impl Default for ColliderMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Solid and not yet claimed by a box.
#[inline]
fn is_open(chunk: &ChunkData, visited: &[bool], x: usize, y: usize, z: usize) -> bool {
    chunk.get(x, y, z) != AIR && !visited[local_index(x, y, z)]
}

/// Merges with a fresh merger.
#[must_use]
pub fn merge_colliders(chunks: &Neighborhood) -> Vec<ColliderBox> {
    ColliderMerger::new().merge(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use voxels_core::{ChunkCoord, ChunkData};

    fn isolated(fill: impl FnMut(i32, i32, i32) -> u8) -> Neighborhood {
        Neighborhood::isolated(Arc::new(ChunkData::generate(ChunkCoord::ORIGIN, fill)))
    }

    #[test]
    fn test_full_chunk_is_one_box() {
        let boxes = merge_colliders(&isolated(|_, _, _| 1));
        assert_eq!(
            boxes,
            vec![ColliderBox {
                position: [0, 0, 0],
                size: [16, 16, 16]
            }]
        );
    }

    #[test]
    fn test_empty_chunk_has_no_boxes() {
        assert!(merge_colliders(&isolated(|_, _, _| 0)).is_empty());
    }

    #[test]
    fn test_depth_before_height_before_width() {
        // An L in the x/y plane, one voxel deep: the vertical bar wins height,
        // the remaining arm becomes its own box.
        let n = isolated(|x, y, z| u8::from(z == 0 && ((x == 0 && y < 3) || (y == 0 && x < 3))));
        let boxes = merge_colliders(&n);
        assert_eq!(
            boxes,
            vec![
                ColliderBox { position: [0, 0, 0], size: [1, 3, 1] },
                ColliderBox { position: [1, 0, 0], size: [2, 1, 1] },
            ]
        );
    }

    #[test]
    fn test_height_shrinks_across_depth() {
        // Column x=0: z=0 has y 0..4, z=1 has y 0..2. Depth 2 forces height 2.
        let n = isolated(|x, y, z| u8::from(x == 0 && ((z == 0 && y < 4) || (z == 1 && y < 2))));
        let boxes = merge_colliders(&n);
        assert_eq!(boxes[0], ColliderBox { position: [0, 0, 0], size: [1, 2, 2] });
        assert_eq!(boxes[1], ColliderBox { position: [0, 2, 0], size: [1, 2, 1] });
        assert_eq!(boxes.len(), 2);
    }

    #[test]
    fn test_merger_reuse_resets_visited() {
        let mut merger = ColliderMerger::new();
        let full = isolated(|_, _, _| 1);
        assert_eq!(merger.merge(&full).len(), 1);
        assert_eq!(merger.merge(&full).len(), 1);
    }

    #[test]
    fn test_key() {
        let b = ColliderBox { position: [1, 2, 3], size: [4, 5, 6] };
        assert_eq!(b.key(), "1:2:3:4:5:6");
        assert_eq!(b.volume(), 120);
        assert!(b.contains([4, 6, 8]));
        assert!(!b.contains([5, 2, 3]));
    }
}
