//! Integration tests for face meshing and collider merging.

use std::collections::HashSet;
use std::sync::Arc;

use voxels_core::{ChunkCoord, ChunkData, Face, Neighborhood, CHUNK_SIZE};
use voxels_meshing::{
    merge_colliders, ChunkColliders, ColliderMerger, DefaultMaterials, FaceMesher, FnMaterials,
    PhysicsBackend, AO_LEVELS,
};

const WATER: u8 = 9;

fn neighborhood(fill: impl Fn(i32, i32, i32) -> u8 + Copy) -> Neighborhood {
    Neighborhood::gather(ChunkCoord::ORIGIN, |c| Arc::new(ChunkData::generate(c, fill)))
}

fn hills(x: i32, y: i32, z: i32) -> u8 {
    let height = 6 + (x.rem_euclid(5) + z.rem_euclid(3)) - 3;
    if y < height {
        1 + (y.rem_euclid(3)) as u8
    } else if y < 5 {
        WATER
    } else {
        0
    }
}

fn water_materials() -> FnMaterials<impl Fn(u8, Face, bool) -> u32, impl Fn(u8) -> bool> {
    FnMaterials::new(|voxel: u8, _: Face, _: bool| u32::from(voxel))
        .with_transparency(|voxel: u8| voxel == WATER)
}

#[test]
fn test_enclosed_voxel_emits_nothing() {
    let n = neighborhood(|x, y, z| u8::from((7..=9).contains(&x) && (7..=9).contains(&y) && (7..=9).contains(&z)));
    let mesh = FaceMesher::default().mesh(&n);
    assert!(mesh.opaque.faces.iter().all(|f| f.voxel() != [8, 8, 8]));
    // 3x3x3 cube: 9 faces per side.
    assert_eq!(mesh.opaque.face_count(), 54);
}

#[test]
fn test_isolated_voxel_emits_six_faces() {
    let n = neighborhood(|x, y, z| u8::from([x, y, z] == [0, 15, 0]));
    let mesh = FaceMesher::default().mesh(&n);
    assert_eq!(mesh.opaque.face_count(), 6);
    let faces: Vec<u32> = mesh.opaque.faces.iter().map(|f| f.face_index()).collect();
    assert_eq!(faces, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_neighbor_chunks_hide_boundary_faces() {
    // Solid everywhere below y = 8, across all 27 chunks.
    let n = neighborhood(|_, y, _| u8::from(y < 8));
    let mesh = FaceMesher::default().mesh(&n);
    // Only the top faces of the y = 7 layer are visible.
    assert_eq!(mesh.opaque.face_count(), CHUNK_SIZE * CHUNK_SIZE);
    assert!(mesh.opaque.faces.iter().all(|f| f.face_index() == Face::Top.index()));
    assert!(mesh.opaque.faces.iter().all(|f| f.ao == [0.0; 4]));
}

#[test]
fn test_ao_values_are_bounded() {
    let mesh = FaceMesher::default().mesh(&neighborhood(hills));
    assert!(!mesh.is_empty());
    for face in mesh.opaque.faces.iter().chain(&mesh.transparent.faces) {
        for ao in face.ao {
            assert!(AO_LEVELS.contains(&ao), "unexpected AO {ao}");
        }
    }
}

#[test]
fn test_transparent_faces_split_by_buffer() {
    let mesh = FaceMesher::new(water_materials()).mesh(&neighborhood(hills));
    assert!(!mesh.transparent.is_empty());
    assert!(mesh.transparent.faces.iter().all(|f| f.layer() == u32::from(WATER)));
    assert!(mesh.opaque.faces.iter().all(|f| f.layer() != u32::from(WATER)));

    // Water against water never produces a face.
    for face in &mesh.transparent.faces {
        let [x, y, z] = face.voxel();
        let n = Face::ALL[face.face_index() as usize].normal();
        assert_ne!(hills(x + n[0], y + n[1], z + n[2]), WATER);
    }

    // Solid faces under water are visible: transparency differs.
    let opaque_under_water = mesh.opaque.faces.iter().any(|f| {
        let [x, y, z] = f.voxel();
        f.face_index() == Face::Top.index() && hills(x, y + 1, z) == WATER
    });
    assert!(opaque_under_water);
}

#[test]
fn test_top_flag_under_transparent_voxel() {
    const STONE: u8 = 1;
    let mut chunk = ChunkData::new(ChunkCoord::ORIGIN);
    chunk.set(4, 4, 4, STONE);
    chunk.set(4, 5, 4, WATER);
    chunk.set(6, 4, 4, STONE);
    chunk.set(6, 5, 4, STONE);
    let n = Neighborhood::isolated(Arc::new(chunk));

    let materials = FnMaterials::new(|voxel: u8, _: Face, is_top: bool| u32::from(is_top) * 16 + u32::from(voxel))
        .with_transparency(|voxel: u8| voxel == WATER);
    let mesh = FaceMesher::new(materials).mesh(&n);

    let layers = |faces: &[voxels_meshing::FaceInstance], voxel: [i32; 3]| -> HashSet<u32> {
        faces.iter().filter(|f| f.voxel() == voxel).map(|f| f.layer()).collect()
    };
    // Stone under water and water under air are tops; stone under stone is not.
    assert_eq!(layers(&mesh.opaque.faces, [4, 4, 4]), HashSet::from([16 + u32::from(STONE)]));
    assert_eq!(layers(&mesh.transparent.faces, [4, 5, 4]), HashSet::from([16 + u32::from(WATER)]));
    assert_eq!(layers(&mesh.opaque.faces, [6, 4, 4]), HashSet::from([u32::from(STONE)]));
}

#[test]
fn test_texture_never_requested_for_air() {
    let requests = std::cell::Cell::new(0usize);
    let air_requests = std::cell::Cell::new(0usize);
    let materials = FnMaterials::new(|voxel: u8, _: Face, _: bool| {
        requests.set(requests.get() + 1);
        if voxel == 0 {
            air_requests.set(air_requests.get() + 1);
        }
        u32::from(voxel)
    })
    .with_transparency(|voxel: u8| voxel == WATER);

    let mesh = FaceMesher::new(materials).mesh(&neighborhood(hills));
    assert!(mesh.face_count() > 0);
    assert_eq!(air_requests.get(), 0);
    assert_eq!(requests.get(), mesh.face_count());
}

#[test]
fn test_bounds_cover_visible_voxels() {
    let mesh = FaceMesher::new(DefaultMaterials).mesh(&neighborhood(hills));
    let bounds = mesh.opaque.bounds;
    for face in &mesh.opaque.faces {
        let [x, y, z] = face.voxel();
        assert!(bounds.min[0] <= x as f32 && bounds.max[0] >= (x + 1) as f32);
        assert!(bounds.min[1] <= y as f32 && bounds.max[1] >= (y + 1) as f32);
        assert!(bounds.min[2] <= z as f32 && bounds.max[2] >= (z + 1) as f32);
    }
    assert!(mesh.opaque.bounding_sphere().is_some());
}

#[test]
fn test_colliders_cover_each_solid_voxel_once() {
    let n = neighborhood(hills);
    let boxes = ColliderMerger::new().merge(&n);
    let mut covered = 0u32;
    for z in 0..CHUNK_SIZE as u32 {
        for y in 0..CHUNK_SIZE as u32 {
            for x in 0..CHUNK_SIZE as u32 {
                let hits = boxes.iter().filter(|b| b.contains([x, y, z])).count();
                let solid = hills(x as i32, y as i32, z as i32) != 0;
                assert_eq!(hits, usize::from(solid), "voxel {x},{y},{z}");
                covered += u32::from(solid);
            }
        }
    }
    assert_eq!(boxes.iter().map(|b| b.volume()).sum::<u32>(), covered);
    assert_eq!(merge_colliders(&n), boxes);
}

struct CountingBackend {
    live: HashSet<u64>,
    next: u64,
}

impl PhysicsBackend for CountingBackend {
    type Handle = u64;

    fn create_cuboid(&mut self, _half_extents: [f32; 3], _translation: [f32; 3]) -> u64 {
        self.next += 1;
        self.live.insert(self.next);
        self.next
    }

    fn remove_collider(&mut self, handle: u64) {
        assert!(self.live.remove(&handle));
    }
}

#[test]
fn test_collider_sync_after_edit() {
    let mut chunk = ChunkData::generate(ChunkCoord::ORIGIN, |_, y, _| u8::from(y < 2));
    let mut backend = CountingBackend { live: HashSet::new(), next: 0 };
    let mut colliders = ChunkColliders::new();

    let boxes = merge_colliders(&Neighborhood::isolated(Arc::new(chunk.clone())));
    assert_eq!(boxes.len(), 1);
    colliders.sync(&mut backend, chunk.position(), &boxes);

    chunk.set(0, 0, 0, 0);
    let boxes = merge_colliders(&Neighborhood::isolated(Arc::new(chunk.clone())));
    let stats = colliders.sync(&mut backend, chunk.position(), &boxes);
    assert_eq!(stats.removed, 1);
    assert_eq!(stats.created, boxes.len());
    assert_eq!(backend.live.len(), boxes.len());
    assert_eq!(colliders.len(), boxes.len());
}
