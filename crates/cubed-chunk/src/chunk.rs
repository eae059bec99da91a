use std::sync::Arc;

use cubed_blocks::BlockType;
use cubed_world::ChunkCoord;

use crate::blocks::BlockArray;
use crate::mesh::ChunkMesh;

/// One cubic region of the world: its blocks, its current mesh, and its scheduling flags.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    id: u64,
    blocks: Arc<BlockArray>,
    mesh: ChunkMesh,
    rev: u64,
    filled: bool,
    up_to_date: bool,
    update_queued: bool,
    low_priority_update: bool,
}

impl Chunk {
    /// An empty, unfilled chunk. `id` distinguishes successive chunks at the same coordinate.
    pub fn new(coord: ChunkCoord, id: u64) -> Self {
        Self {
            coord,
            id,
            blocks: Arc::new(BlockArray::new()),
            mesh: ChunkMesh::default(),
            rev: 0,
            filled: false,
            up_to_date: false,
            update_queued: false,
            low_priority_update: true,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Shared handle to the block array; jobs hold a clone while they run.
    #[inline]
    pub fn blocks(&self) -> &Arc<BlockArray> {
        &self.blocks
    }

    #[inline]
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Bumped whenever the mesh inputs change: an edit to this chunk's blocks or to a
    /// face neighbour's. A job issued at an older revision cannot make the chunk current.
    #[inline]
    pub fn rev(&self) -> u64 {
        self.rev
    }

    #[inline]
    pub fn filled(&self) -> bool {
        self.filled
    }

    #[inline]
    pub fn up_to_date(&self) -> bool {
        self.up_to_date
    }

    #[inline]
    pub fn update_queued(&self) -> bool {
        self.update_queued
    }

    #[inline]
    pub fn low_priority_update(&self) -> bool {
        self.low_priority_update
    }

    /// Filled but with a mesh that no longer matches the blocks, or never filled at all.
    #[inline]
    pub fn needs_update(&self) -> bool {
        !self.update_queued && (!self.filled || !self.up_to_date)
    }

    /// Drawable: filled with a current mesh.
    #[inline]
    pub fn renderable(&self) -> bool {
        self.filled && self.up_to_date
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn set_up_to_date(&mut self, up_to_date: bool) {
        self.up_to_date = up_to_date;
    }

    pub fn set_update_queued(&mut self, queued: bool) {
        self.update_queued = queued;
    }

    pub fn set_low_priority_update(&mut self, low: bool) {
        self.low_priority_update = low;
    }

    #[inline]
    pub fn block_local(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks.get_local(x, y, z)
    }

    /// Replaces the block array wholesale (terrain fill results).
    pub fn install_blocks(&mut self, blocks: Arc<BlockArray>) {
        self.blocks = blocks;
    }

    /// Edits one block. A job still reading the old array keeps its own copy.
    /// Returns false when the block already had that type.
    pub fn set_block_local(&mut self, x: usize, y: usize, z: usize, block: BlockType) -> bool {
        if self.blocks.get_local(x, y, z) == block {
            return false;
        }
        Arc::make_mut(&mut self.blocks).set_local(x, y, z, block);
        self.invalidate_mesh();
        true
    }

    /// Marks the mesh stale and bumps the revision so an in-flight job's result stays stale.
    pub fn invalidate_mesh(&mut self) {
        self.rev += 1;
        self.up_to_date = false;
    }

    pub fn update_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
    }
}
