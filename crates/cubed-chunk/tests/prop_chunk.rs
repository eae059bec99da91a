use std::sync::Arc;

use cubed_blocks::BlockType;
use cubed_chunk::{BlockArray, Chunk};
use cubed_world::{CHUNK_NUM_BLOCKS, CHUNK_SIZE, ChunkCoord};
use proptest::prelude::*;

fn local() -> impl Strategy<Value = usize> {
    0usize..CHUNK_SIZE as usize
}

fn solid_block() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::Grass),
        Just(BlockType::Dirt),
        Just(BlockType::Stone)
    ]
}

#[test]
fn idx_is_unique_and_in_range() {
    let s = CHUNK_SIZE as usize;
    let mut seen = vec![false; CHUNK_NUM_BLOCKS];
    for y in 0..s {
        for z in 0..s {
            for x in 0..s {
                let i = BlockArray::idx(x, y, z);
                assert!(i < CHUNK_NUM_BLOCKS);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}

#[test]
fn new_chunk_is_unfilled_and_needs_a_fill() {
    let c = Chunk::new(ChunkCoord::new(1, -2, 3), 9);
    assert_eq!(c.id(), 9);
    assert!(!c.filled());
    assert!(!c.up_to_date());
    assert!(!c.update_queued());
    assert!(c.low_priority_update());
    assert!(c.needs_update());
    assert!(!c.renderable());
    assert!(!c.blocks().has_non_air());
}

#[test]
fn queued_chunk_does_not_need_another_update() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0);
    c.set_update_queued(true);
    assert!(!c.needs_update());
    c.set_update_queued(false);
    c.set_filled(true);
    c.set_up_to_date(true);
    assert!(!c.needs_update());
    assert!(c.renderable());
}

#[test]
fn edit_copies_the_array_while_a_job_holds_it() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0);
    c.set_filled(true);
    c.set_up_to_date(true);
    let snapshot = Arc::clone(c.blocks());
    assert!(c.set_block_local(1, 2, 3, BlockType::Stone));
    assert_eq!(snapshot.get_local(1, 2, 3), BlockType::Air);
    assert_eq!(c.block_local(1, 2, 3), BlockType::Stone);
    assert_eq!(c.rev(), 1);
    assert!(!c.up_to_date());
    // same value is a no-op
    assert!(!c.set_block_local(1, 2, 3, BlockType::Stone));
    assert_eq!(c.rev(), 1);
}

proptest! {
    // set_local/get_local agree and only touch one cell
    #[test]
    fn set_then_get(x in local(), y in local(), z in local(), b in solid_block()) {
        let mut a = BlockArray::new();
        a.set_local(x, y, z, b);
        prop_assert_eq!(a.get_local(x, y, z), b);
        prop_assert_eq!(a.as_slice().iter().filter(|v| !v.is_air()).count(), 1);
        prop_assert_eq!(a.get_checked(x as i32, y as i32, z as i32), Some(b));
    }

    // get_checked rejects anything outside [0, CHUNK_SIZE)
    #[test]
    fn get_checked_bounds(x in -40i32..40, y in -40i32..40, z in -40i32..40) {
        let a = BlockArray::new();
        let inside = [x, y, z].iter().all(|v| (0..CHUNK_SIZE).contains(v));
        prop_assert_eq!(a.get_checked(x, y, z).is_some(), inside);
    }
}

#[test]
fn invalidate_bumps_revision() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0);
    c.set_up_to_date(true);
    let before = c.rev();
    c.invalidate_mesh();
    assert_eq!(c.rev(), before + 1);
    assert!(!c.up_to_date());
}
