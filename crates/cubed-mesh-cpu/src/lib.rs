//! CPU meshing: per-block face culling and the job type the background worker runs.
#![forbid(unsafe_code)]

mod face;
mod job;
mod mesh_build;
mod neighbors;

pub use face::Face;
pub use job::{JobKind, MeshJob, MeshOutput, mesh_blocks};
pub use mesh_build::MeshBuild;
pub use neighbors::NeighborBlocks;
