use cubed_geom::Vec3;
use cubed_world::{CHUNK_SIZE, ChunkCoord, MAX_BLOCK_COORD, floor_div};
use proptest::prelude::*;

#[test]
fn negative_points_floor_to_minus_one() {
    for v in [-0.001f32, -1.0, -8.5, -15.999] {
        let c = ChunkCoord::containing_point(Vec3::new(v, v, v));
        assert_eq!(c, ChunkCoord::new(-1, -1, -1), "v = {v}");
    }
    assert_eq!(ChunkCoord::containing_point(Vec3::new(-16.0, 0.0, 15.9)), ChunkCoord::new(-1, 0, 0));
    assert_eq!(ChunkCoord::containing_point(Vec3::new(-16.5, 16.0, 0.0)), ChunkCoord::new(-2, 1, 0));
}

#[test]
fn block_coordinates_map_to_their_chunk() {
    assert_eq!(ChunkCoord::containing_block(0, 15, 16), ChunkCoord::new(0, 0, 1));
    assert_eq!(ChunkCoord::containing_block(-1, -16, -17), ChunkCoord::new(-1, -1, -2));
    assert_eq!(ChunkCoord::new(-2, 0, 3).origin(), (-32, 0, 48));
}

#[test]
fn extreme_inputs_do_not_overflow() {
    assert_eq!(floor_div(i32::MIN, CHUNK_SIZE), i32::MIN / CHUNK_SIZE);
    assert_eq!(floor_div(i32::MAX, CHUNK_SIZE), i32::MAX / CHUNK_SIZE);
    assert_eq!(floor_div(i32::MIN + 1, CHUNK_SIZE), i32::MIN / CHUNK_SIZE);

    let edge = MAX_BLOCK_COORD / CHUNK_SIZE;
    let far = ChunkCoord::containing_point(Vec3::new(-3.0e9, 3.0e9, f32::MAX));
    assert_eq!(far, ChunkCoord::new(-edge, edge, edge));
    let c = ChunkCoord::containing_point(Vec3::new(f32::MIN, f32::NEG_INFINITY, f32::INFINITY));
    assert_eq!(c, ChunkCoord::new(-edge, -edge, edge));
    // window offsets and origins around the clamped chunk stay in range
    let (ox, _, _) = far.offset(-64, 0, 0).origin();
    assert!(ox < -MAX_BLOCK_COORD);
}

#[test]
fn within_is_an_inclusive_cube() {
    let c = ChunkCoord::new(4, -2, 0);
    assert!(c.offset(1, -1, 1).within(c, 1));
    assert!(!c.offset(2, 0, 0).within(c, 1));
    assert!(!c.offset(0, 0, -2).within(c, 1));
    assert_eq!(c.face_neighbors().len(), 6);
    assert!(c.face_neighbors().iter().all(|n| n.distance_sq(c) == 1));
}

proptest! {
    // floor_div agrees with Euclidean division for positive divisors
    #[test]
    fn floor_div_matches_div_euclid(v in -1_000_000i32..=1_000_000, size in 1i32..=64) {
        prop_assert_eq!(floor_div(v, size), v.div_euclid(size));
    }

    // every block lies inside the chunk reported for it
    #[test]
    fn containing_block_contains_block(wx in -100_000i32..100_000, wy in -100_000i32..100_000, wz in -100_000i32..100_000) {
        let c = ChunkCoord::containing_block(wx, wy, wz);
        let (ox, oy, oz) = c.origin();
        prop_assert!(wx >= ox && wx < ox + CHUNK_SIZE);
        prop_assert!(wy >= oy && wy < oy + CHUNK_SIZE);
        prop_assert!(wz >= oz && wz < oz + CHUNK_SIZE);
    }
}
