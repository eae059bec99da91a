//! Chunk storage: block arrays, per-chunk state, terrain filling, and the sparse world grid.
#![forbid(unsafe_code)]

mod blocks;
mod chunk;
mod generate;
mod grid;
mod mesh;

pub use blocks::BlockArray;
pub use chunk::Chunk;
pub use generate::{TerrainGenerator, generate_blocks};
pub use grid::WorldGrid;
pub use mesh::{ChunkMesh, Vertex};
