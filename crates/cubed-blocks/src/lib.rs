//! Block types and the per-face texture table.
#![forbid(unsafe_code)]

pub mod info;
pub mod types;

pub use info::{BlockInfo, BlockProperties, TileUv};
pub use types::{BlockType, FaceRole};
