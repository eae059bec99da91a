use cubed_blocks::BlockType;
use cubed_world::{CHUNK_NUM_BLOCKS, CHUNK_SIZE};

const S: usize = CHUNK_SIZE as usize;

/// Dense `CHUNK_SIZE^3` block storage, fixed in size at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockArray {
    blocks: Box<[BlockType]>,
}

impl Default for BlockArray {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockArray {
    /// An all-air array.
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockType::Air; CHUNK_NUM_BLOCKS].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < S && y < S && z < S);
        (y * S + z) * S + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: BlockType) {
        self.blocks[Self::idx(x, y, z)] = block;
    }

    /// Signed lookup; `None` when the position falls outside this chunk.
    #[inline]
    pub fn get_checked(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        let inside = |v: i32| (0..CHUNK_SIZE).contains(&v);
        if inside(x) && inside(y) && inside(z) {
            Some(self.get_local(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[BlockType] {
        &self.blocks
    }

    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }
}
