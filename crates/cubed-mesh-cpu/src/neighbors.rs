use std::sync::Arc;

use cubed_chunk::BlockArray;

use crate::face::Face;

/// Read-only snapshots of the six face-adjacent chunks, indexed by [`Face`].
/// A missing entry reads as air.
#[derive(Clone, Debug, Default)]
pub struct NeighborBlocks {
    sides: [Option<Arc<BlockArray>>; 6],
}

impl NeighborBlocks {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set(&mut self, face: Face, blocks: Arc<BlockArray>) {
        self.sides[face.index()] = Some(blocks);
    }

    #[inline]
    pub fn get(&self, face: Face) -> Option<&BlockArray> {
        self.sides[face.index()].as_deref()
    }

    pub fn loaded_count(&self) -> usize {
        self.sides.iter().filter(|s| s.is_some()).count()
    }
}
