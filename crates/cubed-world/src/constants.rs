//! Compile-time world sizing shared by storage and meshing.

/// Edge length of a cubic chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_NUM_BLOCKS: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

// One quad (4 vertices, 2 triangles) per face, 6 faces per block.
pub const VERTICES_PER_BLOCK: usize = 24;
pub const INDICES_PER_BLOCK: usize = 36;

/// Upper bounds for a single chunk's mesh (every face of every block visible).
pub const MAX_CHUNK_VERTICES: usize = CHUNK_NUM_BLOCKS * VERTICES_PER_BLOCK;
pub const MAX_CHUNK_INDICES: usize = CHUNK_NUM_BLOCKS * INDICES_PER_BLOCK;
