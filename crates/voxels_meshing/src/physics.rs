//! Collider synchronization.
//!
//! The merger is stateless across calls. [`ChunkColliders`] remembers which
//! colliders were created for a chunk and reconciles them with each new set
//! of boxes, touching the physics backend only for boxes that changed.

use std::collections::HashMap;

use tracing::trace;

use crate::collider::ColliderBox;

/// Physics engine seam: creates and destroys static cuboid colliders.
pub trait PhysicsBackend {
    /// Backend-specific collider handle.
    type Handle;

    /// Creates a fixed cuboid centered at `translation` (world space).
    fn create_cuboid(&mut self, half_extents: [f32; 3], translation: [f32; 3]) -> Self::Handle;

    /// Destroys a collider created by [`PhysicsBackend::create_cuboid`].
    fn remove_collider(&mut self, handle: Self::Handle);
}

/// Outcome of one [`ChunkColliders::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColliderSyncStats {
    /// Colliders created.
    pub created: usize,
    /// Colliders left in place.
    pub kept: usize,
    /// Colliders removed.
    pub removed: usize,
}

/// Colliders currently alive for one chunk, keyed by box identity.
pub struct ChunkColliders<H> {
    colliders: HashMap<String, H>,
}

impl<H> ChunkColliders<H> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colliders: HashMap::new(),
        }
    }

    /// Number of live colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True if no colliders are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Checks whether a collider for `collider` is alive.
    #[must_use]
    pub fn contains(&self, collider: &ColliderBox) -> bool {
        self.colliders.contains_key(&collider.key())
    }

    /// Reconciles the live colliders with `boxes`.
    ///
    /// `chunk_position` is the chunk's world origin. New boxes are created,
    /// identical boxes kept, and boxes no longer present removed.
    #[allow(clippy::cast_precision_loss)]
    pub fn sync<B>(
        &mut self,
        backend: &mut B,
        chunk_position: [i32; 3],
        boxes: &[ColliderBox],
    ) -> ColliderSyncStats
    where
        B: PhysicsBackend<Handle = H>,
    {
        let mut stats = ColliderSyncStats::default();
        let mut next = HashMap::with_capacity(boxes.len());

        for collider in boxes {
            let key = collider.key();
            if next.contains_key(&key) {
                continue;
            }
            let handle = match self.colliders.remove(&key) {
                Some(handle) => {
                    stats.kept += 1;
                    handle
                }
                None => {
                    stats.created += 1;
                    let half_extents = collider.size.map(|s| s as f32 * 0.5);
                    let translation = [0usize, 1, 2].map(|i| {
                        chunk_position[i] as f32 + collider.position[i] as f32 + half_extents[i]
                    });
                    backend.create_cuboid(half_extents, translation)
                }
            };
            next.insert(key, handle);
        }

        for (_, stale) in std::mem::replace(&mut self.colliders, next) {
            backend.remove_collider(stale);
            stats.removed += 1;
        }

        trace!(
            created = stats.created,
            kept = stats.kept,
            removed = stats.removed,
            "synced colliders"
        );
        stats
    }

    /// Removes every live collider. Returns how many were removed.
    pub fn clear<B>(&mut self, backend: &mut B) -> usize
    where
        B: PhysicsBackend<Handle = H>,
    {
        let removed = self.colliders.len();
        for (_, handle) in self.colliders.drain() {
            backend.remove_collider(handle);
        }
        removed
    }
}

impl<H> Default for ChunkColliders<H> {
    fn default() -> Self {
        Self::new()
    }
}
