//! # Streaming Window
//!
//! Keeps the set of chunks that should be resident around a moving origin.
//!
//! ```text
//!   origin + bounds.min*2 ┌───────────────────────────┐
//!                         │  retained (hysteresis)    │
//!                         │   ┌───────────────────┐   │
//!                         │   │  loaded: origin + │   │
//!                         │   │  [min, max)       │   │
//!                         │   └───────────────────┘   │
//!                         └───────────────────────────┘ origin + bounds.max*2
//! ```
//!
//! Chunks that leave the inner box stay loaded until they also leave the
//! doubled box, so walking back and forth over a chunk border does not
//! thrash the loaded set.

use std::sync::Arc;

use tracing::debug;
use voxels_core::{ChunkCoord, Signal, SubscriptionId, CHUNK_SIZE};

use crate::config::{ChunkBounds, StreamingConfig};

/// The currently loaded chunk set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedChunks {
    /// Loaded chunks: the inner box in z, y, x order, then retained chunks
    /// in their previous order.
    pub chunks: Vec<ChunkCoord>,
    /// Origin of the last load, `None` before the first load and after a clear.
    pub origin: Option<ChunkCoord>,
}

impl LoadedChunks {
    /// Checks whether `coord` is loaded.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Observable loaded-chunk set.
pub struct StreamingWindow {
    loaded: Signal<Arc<LoadedChunks>>,
    config: StreamingConfig,
}

impl StreamingWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new(config: StreamingConfig) -> Self {
        Self {
            loaded: Signal::new(Arc::new(LoadedChunks::default())),
            config,
        }
    }

    /// The window's configuration.
    #[must_use]
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Current loaded set.
    #[must_use]
    pub fn loaded(&self) -> Arc<LoadedChunks> {
        self.loaded.get()
    }

    /// Subscribes to loaded-set changes.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Arc<LoadedChunks>) + Send + Sync + 'static,
    {
        self.loaded.subscribe(listener)
    }

    /// Removes a loaded-set listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.loaded.unsubscribe(id)
    }

    /// Recomputes the loaded set for `origin`.
    ///
    /// Notifies subscribers exactly once, even when the set is unchanged.
    pub fn load_chunks(&self, origin: ChunkCoord, bounds: ChunkBounds) {
        self.loaded.update(|loaded| {
            let chunks = next_loaded(&loaded.chunks, origin, bounds);
            debug!(
                origin = %origin,
                loaded = chunks.len(),
                previous = loaded.chunks.len(),
                "streaming window reloaded"
            );
            *loaded = Arc::new(LoadedChunks {
                chunks,
                origin: Some(origin),
            });
        });
    }

    /// Per-frame driver: reloads with the configured bounds when the
    /// viewpoint's origin chunk changed.
    ///
    /// With `follow_viewpoint` off the origin is pinned to `(0, 0, 0)`, so
    /// only the first call loads. Returns whether a reload happened.
    pub fn track(&self, viewpoint: [f32; 3]) -> bool {
        let origin = self.origin_for(viewpoint);
        if self.loaded.with(|loaded| loaded.origin == Some(origin)) {
            return false;
        }
        self.load_chunks(origin, self.config.bounds);
        true
    }

    /// Origin chunk for a viewpoint under the current configuration.
    ///
    /// Viewpoints beyond the chunk range clamp to its edge; NaN maps to 0.
    #[must_use]
    pub fn origin_for(&self, viewpoint: [f32; 3]) -> ChunkCoord {
        if !self.config.follow_viewpoint {
            return ChunkCoord::ORIGIN;
        }
        let size = CHUNK_SIZE as f32;
        #[allow(clippy::cast_possible_truncation)]
        let to_chunk = |v: f32| (v / size).floor() as i32;
        ChunkCoord::new(to_chunk(viewpoint[0]), 0, to_chunk(viewpoint[2]))
    }

    /// Empties the loaded set and forgets the origin.
    pub fn reset(&self) {
        self.loaded.set(Arc::new(LoadedChunks::default()));
    }
}

impl Default for StreamingWindow {
    fn default() -> Self {
        Self::new(StreamingConfig::default())
    }
}

/// Inner box in z, y, x order followed by retained previous chunks.
fn next_loaded(current: &[ChunkCoord], origin: ChunkCoord, bounds: ChunkBounds) -> Vec<ChunkCoord> {
    let ChunkBounds { min, max } = bounds;
    let mut next = Vec::with_capacity(bounds.volume() + current.len());
    for z in min[2]..max[2] {
        for y in min[1]..max[1] {
            for x in min[0]..max[0] {
                next.push(origin.offset(x, y, z));
            }
        }
    }
    let fresh = next.len();
    for &coord in current {
        if next[..fresh].contains(&coord) || !in_hysteresis(coord, origin, bounds) {
            continue;
        }
        next.push(coord);
    }
    next
}

/// Hysteresis test against the doubled bounds.
///
/// Both z comparisons read the chunk's y component: z is never checked for
/// retention, and y is clamped against both the y and the z limits.
/// Limits are computed in `i64`, so they never overflow.
fn in_hysteresis(coord: ChunkCoord, origin: ChunkCoord, bounds: ChunkBounds) -> bool {
    let ChunkBounds { min, max } = bounds;
    let edge = |o: i32, b: i32| i64::from(o) + i64::from(b) * 2;
    let (x, y) = (i64::from(coord.x), i64::from(coord.y));
    !(x < edge(origin.x, min[0])
        || y < edge(origin.y, min[1])
        || y < edge(origin.z, min[2])
        || x >= edge(origin.x, max[0])
        || y >= edge(origin.y, max[1])
        || y >= edge(origin.z, max[2]))
}
