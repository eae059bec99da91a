use cubed_blocks::BlockType;
use cubed_world::{CHUNK_SIZE, ChunkCoord};
use hashbrown::HashMap;

use crate::chunk::Chunk;

/// Sparse owner of every loaded chunk, keyed by chunk coordinate.
#[derive(Debug, Default)]
pub struct WorldGrid {
    chunks: HashMap<ChunkCoord, Chunk>,
    next_id: u64,
}

impl WorldGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Inserts an empty chunk at `coord` unless one is already present.
    /// Returns true when a chunk was created.
    pub fn insert_empty(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.chunks.insert(coord, Chunk::new(coord, id));
        true
    }

    /// Drops every chunk outside the cube `[center - r, center + r]`; returns how many were evicted.
    pub fn retain_within(&mut self, center: ChunkCoord, r: i32) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| coord.within(center, r));
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            log::trace!(target: "grid", "evicted {} chunks outside r={} of {:?}", evicted, r, center);
        }
        evicted
    }

    /// Invalidates the mesh of every loaded face neighbour of `coord`, filled or not.
    /// An unfilled neighbour with a fill job in flight then re-meshes against `coord`.
    pub fn mark_neighbors_stale(&mut self, coord: ChunkCoord) {
        for n in coord.face_neighbors() {
            if let Some(chunk) = self.chunks.get_mut(&n) {
                chunk.invalidate_mesh();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Block at a world-space position; air when the owning chunk is not loaded.
    pub fn block_type_at(&self, wx: i32, wy: i32, wz: i32) -> BlockType {
        let coord = ChunkCoord::containing_block(wx, wy, wz);
        let Some(chunk) = self.chunks.get(&coord) else {
            return BlockType::Air;
        };
        let (ox, oy, oz) = coord.origin();
        debug_assert!((0..CHUNK_SIZE).contains(&(wx - ox)));
        chunk.block_local((wx - ox) as usize, (wy - oy) as usize, (wz - oz) as usize)
    }
}
