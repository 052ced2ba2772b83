//! # Voxels Demo
//!
//! Headless walkthrough of the engine:
//!
//! 1. Load an optional TOML config (first argument)
//! 2. Stream chunks around a viewpoint walking east
//! 3. Mesh and merge every loaded chunk, feeding colliders to a counting backend
//! 4. Dig a tunnel and remesh the affected chunks
//! 5. Export the edits and import them into a fresh store
//!
//! Run with: cargo run --bin voxels_demo [-- path/to/voxels.toml]

use std::collections::{HashMap, HashSet};
use std::process::ExitCode;
use std::time::Instant;

use voxels::{
    affected_chunks, ChunkColliders, ChunkCoord, ChunkPipeline, ChunkStore, PhysicsBackend,
    WorldConfig,
};

/// Rolling hills with stone under a layer of dirt and grass.
fn hills(x: i32, y: i32, z: i32) -> u8 {
    let wave = |v: i32, period: i32| (v.rem_euclid(period) - period / 2).abs();
    let height = 12 + wave(x, 24) / 3 - wave(z, 18) / 3;
    match y {
        y if y >= height => 0,
        y if y == height - 1 => 3,
        y if y >= height - 3 => 2,
        _ => 1,
    }
}

/// Physics stand-in: hands out ids and tracks which are alive.
#[derive(Default)]
struct CountingPhysics {
    next: u64,
    live: HashSet<u64>,
}

impl PhysicsBackend for CountingPhysics {
    type Handle = u64;

    fn create_cuboid(&mut self, _half_extents: [f32; 3], _translation: [f32; 3]) -> u64 {
        self.next += 1;
        self.live.insert(self.next);
        self.next
    }

    fn remove_collider(&mut self, handle: u64) {
        self.live.remove(&handle);
    }
}

fn load_config() -> Result<WorldConfig, voxels::VoxelError> {
    match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(path),
        None => {
            let mut config = WorldConfig::default();
            config.streaming.follow_viewpoint = true;
            Ok(config)
        }
    }
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[VOXELS] {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                       VOXELS DEMO                            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!(
        "[VOXELS] Bounds {:?}..{:?}, follow viewpoint: {}",
        config.streaming.bounds.min, config.streaming.bounds.max, config.streaming.follow_viewpoint
    );

    let store = ChunkStore::with_config(hills, &config);
    let feed = store.change_feed();
    let mut pipeline = ChunkPipeline::default();
    let mut physics = CountingPhysics::default();
    let mut colliders: HashMap<ChunkCoord, ChunkColliders<u64>> = HashMap::new();

    // Walk east for a few chunks.
    let start = Instant::now();
    let mut reloads = 0;
    let mut faces = 0;
    for step in 0..64 {
        #[allow(clippy::cast_precision_loss)]
        let viewpoint = [step as f32 * 2.0, 20.0, 8.0];
        if !store.streaming().track(viewpoint) {
            continue;
        }
        reloads += 1;
        let loaded = store.streaming().loaded();
        for &coord in &loaded.chunks {
            if colliders.contains_key(&coord) {
                continue;
            }
            let output = pipeline.process(&store, coord);
            faces += output.mesh.face_count();
            colliders
                .entry(coord)
                .or_default()
                .sync(&mut physics, coord.world_origin(), &output.colliders);
        }
        // Drop colliders for chunks that left the window.
        colliders.retain(|coord, set| {
            let keep = loaded.contains(*coord);
            if !keep {
                set.clear(&mut physics);
            }
            keep
        });
    }
    println!(
        "[VOXELS] Streaming: {reloads} reloads, {} chunks resident, {faces} faces, {} colliders in {:?}",
        store.chunk_count(),
        physics.live.len(),
        start.elapsed()
    );

    // Dig a tunnel along x through the hills.
    for x in 0..48 {
        for y in 4..7 {
            store.set_voxel([x, y, 8], 0);
        }
    }
    let mut dirty = HashSet::new();
    for change in feed.drain() {
        dirty.extend(affected_chunks(&change));
    }
    let mut synced = voxels::meshing::ColliderSyncStats::default();
    for &coord in &dirty {
        let output = pipeline.process(&store, coord);
        if let Some(set) = colliders.get_mut(&coord) {
            let stats = set.sync(&mut physics, coord.world_origin(), &output.colliders);
            synced.created += stats.created;
            synced.kept += stats.kept;
            synced.removed += stats.removed;
        }
    }
    println!(
        "[VOXELS] Tunnel: {} chunks remeshed, colliders +{} ={} -{}",
        dirty.len(),
        synced.created,
        synced.kept,
        synced.removed
    );

    // Round-trip the edits.
    let exported = store.export_chunks();
    let restored = ChunkStore::with_generator(hills);
    let imported = restored.import_chunks(&exported);
    let matches = (0..48).all(|x| restored.get_voxel([x, 5, 8]) == store.get_voxel([x, 5, 8]));
    println!(
        "[VOXELS] Export: {} chunks, imported {imported}, tunnel preserved: {matches}",
        exported.len()
    );

    if matches {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
