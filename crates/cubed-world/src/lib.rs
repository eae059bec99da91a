//! World constants, chunk addressing, and the default terrain generator.
#![forbid(unsafe_code)]

pub mod constants;
pub mod coord;
pub mod terrain;
pub mod worldgen;

pub use constants::{
    CHUNK_NUM_BLOCKS, CHUNK_SIZE, INDICES_PER_BLOCK, MAX_CHUNK_INDICES, MAX_CHUNK_VERTICES,
    VERTICES_PER_BLOCK,
};
pub use coord::{ChunkCoord, MAX_BLOCK_COORD, floor_div};
pub use terrain::Terrain;
pub use worldgen::WorldGenParams;
