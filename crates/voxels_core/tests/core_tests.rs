//! Integration tests for the shared voxel types.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use voxels_core::{ChunkCoord, ChunkData, Neighborhood, Signal, CHUNK_SIZE};

#[test]
fn test_snapshot_is_unchanged_by_later_writes() {
    let signal = Signal::new(Arc::new(ChunkData::new(ChunkCoord::ORIGIN)));
    let before = signal.get();

    signal.update(|chunk| Arc::make_mut(chunk).set(1, 1, 1, 3));

    assert_eq!(before.get(1, 1, 1), 0);
    assert_eq!(signal.get().get(1, 1, 1), 3);
}

#[test]
fn test_signal_notifies_with_new_snapshot() {
    let signal = Signal::new(Arc::new(ChunkData::new(ChunkCoord::ORIGIN)));
    let calls = Arc::new(AtomicUsize::new(0));
    {
        let calls = Arc::clone(&calls);
        signal.subscribe(move |chunk: &Arc<ChunkData>| {
            assert_eq!(chunk.get(0, 0, 0), 9);
            calls.fetch_add(1, Ordering::SeqCst);
        });
    }
    signal.update(|chunk| Arc::make_mut(chunk).set(0, 0, 0, 9));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_neighborhood_edges_match_world_positions() {
    let fill = |x: i32, y: i32, z: i32| ((x * 7 + y * 13 + z * 31).rem_euclid(5)) as u8;
    let center = ChunkCoord::new(2, -1, 0);
    let n = Neighborhood::gather(center, |c| Arc::new(ChunkData::generate(c, fill)));
    let [ox, oy, oz] = center.world_origin();
    let size = CHUNK_SIZE as i32;

    for &(x, y, z) in &[(-1, 0, 0), (size, 5, 5), (3, -1, size), (-16, -16, -16), (31, 31, 31)] {
        assert_eq!(n.get(x, y, z), fill(ox + x, oy + y, oz + z), "at {x},{y},{z}");
    }
}
