//! Chunk store.
//!
//! Owns every chunk that has been touched, keyed by coordinate. Each chunk
//! lives in its own [`Signal`] so renderers can subscribe per chunk.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};
use voxels_core::{
    ChunkCoord, ChunkData, EventBus, EventReceiver, Neighborhood, Signal, SubscriptionId,
    VoxelChange, VoxelId, VoxelResult,
};

use crate::config::WorldConfig;
use crate::generator::VoxelGenerator;
use crate::streaming::StreamingWindow;

/// Expected number of resident chunks; pre-sizes the chunk map.
const INITIAL_CAPACITY: usize = 1024;

/// Shared, observable handle to one chunk's current snapshot.
pub type ChunkHandle = Arc<Signal<Arc<ChunkData>>>;

/// The voxel world.
///
/// Every integer coordinate is valid; chunks are generated on first access.
pub struct ChunkStore {
    /// Chunks indexed by coordinate.
    chunks: RwLock<HashMap<ChunkCoord, ChunkHandle>>,
    /// Fill strategy for new chunks. `None` means all air.
    generator: Option<Box<dyn VoxelGenerator>>,
    /// Last voxel write; listeners are the synchronous change listeners.
    changes: Signal<VoxelChange>,
    /// Channel feed of voxel writes.
    feed: EventBus<VoxelChange>,
    /// Loaded chunk set.
    streaming: StreamingWindow,
}

impl ChunkStore {
    /// Creates a store whose chunks start as air.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None, &WorldConfig::default())
    }

    /// Creates a store that fills new chunks from `generator`.
    #[must_use]
    pub fn with_generator<G>(generator: G) -> Self
    where
        G: VoxelGenerator + 'static,
    {
        Self::build(Some(Box::new(generator)), &WorldConfig::default())
    }

    /// Creates a store from a generator and configuration.
    #[must_use]
    pub fn with_config<G>(generator: G, config: &WorldConfig) -> Self
    where
        G: VoxelGenerator + 'static,
    {
        Self::build(Some(Box::new(generator)), config)
    }

    fn build(generator: Option<Box<dyn VoxelGenerator>>, config: &WorldConfig) -> Self {
        Self {
            chunks: RwLock::new(HashMap::with_capacity(INITIAL_CAPACITY)),
            generator,
            changes: Signal::new(VoxelChange::default()),
            feed: EventBus::new(config.change_feed_capacity),
            streaming: StreamingWindow::new(config.streaming),
        }
    }

    /// Returns the chunk at `coord`, generating it if needed.
    pub fn chunk(&self, coord: ChunkCoord) -> ChunkHandle {
        if let Some(handle) = self.chunks.read().get(&coord) {
            return Arc::clone(handle);
        }

        // Generate outside the lock; a racing creator wins and ours is dropped.
        let data = Arc::new(self.generate(coord));
        let mut chunks = self.chunks.write();
        Arc::clone(
            chunks
                .entry(coord)
                .or_insert_with(|| Arc::new(Signal::new(data))),
        )
    }

    /// Current snapshot of the chunk at `coord`, generating it if needed.
    pub fn snapshot(&self, coord: ChunkCoord) -> Arc<ChunkData> {
        self.chunk(coord).get()
    }

    fn generate(&self, coord: ChunkCoord) -> ChunkData {
        let chunk = match &self.generator {
            Some(generator) => ChunkData::generate(coord, |x, y, z| generator.generate(x, y, z)),
            None => ChunkData::new(coord),
        };
        debug!(chunk = %coord, solid = chunk.solid_count(), "generated chunk");
        chunk
    }

    /// Gets a voxel at world coordinates.
    pub fn get_voxel(&self, position: [i32; 3]) -> VoxelId {
        let (coord, [x, y, z]) = ChunkCoord::split_world_pos(position);
        self.chunk(coord).with(|chunk| chunk.get(x, y, z))
    }

    /// Sets a voxel at world coordinates.
    ///
    /// Marks the chunk modified, replaces its snapshot (one chunk
    /// notification) and then reports one [`VoxelChange`] to change listeners
    /// and the change feed, all before returning.
    pub fn set_voxel(&self, position: [i32; 3], value: VoxelId) {
        let (coord, [x, y, z]) = ChunkCoord::split_world_pos(position);
        self.chunk(coord).update(|chunk| {
            let chunk = Arc::make_mut(chunk);
            chunk.modified = true;
            chunk.set(x, y, z, value);
        });

        let change = VoxelChange { position, value };
        self.changes.set(change);
        self.feed.publish(&change);
    }

    /// Raw voxels of every modified chunk, keyed `"x:y:z"`.
    #[must_use]
    pub fn export_chunks(&self) -> HashMap<String, Vec<u8>> {
        self.chunks
            .read()
            .iter()
            .filter_map(|(coord, handle)| {
                handle.with(|chunk| chunk.modified.then(|| (coord.key(), chunk.as_bytes().to_vec())))
            })
            .collect()
    }

    /// Imports one exported chunk, overwriting any existing one.
    ///
    /// Existing chunk subscribers are notified once.
    ///
    /// # Errors
    ///
    /// Returns [`voxels_core::VoxelError::InvalidChunkKey`] or
    /// [`voxels_core::VoxelError::InvalidChunkLength`]; the store is left
    /// untouched in either case.
    pub fn import_chunk(&self, key: &str, bytes: &[u8]) -> VoxelResult<()> {
        let coord: ChunkCoord = key.parse()?;
        let data = Arc::new(ChunkData::from_bytes(coord, bytes)?);

        let existing = match self.chunks.write().entry(coord) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Signal::new(Arc::clone(&data))));
                None
            }
        };
        // Notify with the map lock released.
        if let Some(handle) = existing {
            handle.set(data);
        }
        Ok(())
    }

    /// Imports exported chunks. Malformed entries are skipped with a warning.
    ///
    /// Returns the number of chunks imported.
    pub fn import_chunks<I, K, V>(&self, chunks: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[u8]>,
    {
        let mut imported = 0;
        let mut skipped = 0;
        for (key, bytes) in chunks {
            match self.import_chunk(key.as_ref(), bytes.as_ref()) {
                Ok(()) => imported += 1,
                Err(error) => {
                    skipped += 1;
                    warn!(key = key.as_ref(), %error, "skipping chunk import");
                }
            }
        }
        debug!(imported, skipped, "imported chunks");
        imported
    }

    /// Drops every chunk and empties the loaded set.
    pub fn clear_chunks(&self) {
        let dropped = {
            let mut chunks = self.chunks.write();
            let dropped = chunks.len();
            chunks.clear();
            dropped
        };
        self.streaming.reset();
        debug!(dropped, "cleared chunks");
    }

    /// Registers a synchronous voxel change listener.
    pub fn add_change_listener<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&VoxelChange) + Send + Sync + 'static,
    {
        self.changes.subscribe(listener)
    }

    /// Removes a voxel change listener. Returns false if it was not registered.
    pub fn remove_change_listener(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    /// Opens a channel receiving every subsequent voxel change.
    #[must_use]
    pub fn change_feed(&self) -> EventReceiver<VoxelChange> {
        self.feed.subscribe()
    }

    /// Gathers the 3x3x3 block around `coord`, generating missing chunks.
    pub fn neighborhood(&self, coord: ChunkCoord) -> Neighborhood {
        Neighborhood::gather(coord, |c| self.snapshot(c))
    }

    /// The streaming window.
    #[must_use]
    pub fn streaming(&self) -> &StreamingWindow {
        &self.streaming
    }

    /// Number of resident chunks.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.read().len()
    }

    /// Checks whether `coord` is resident without creating it.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.read().contains_key(&coord)
    }

    /// Coordinates of all resident chunks.
    #[must_use]
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        self.chunks.read().keys().copied().collect()
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}
