use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use cubed_blocks::{BlockInfo, BlockType};
use cubed_chunk::{BlockArray, ChunkMesh, TerrainGenerator, generate_blocks};
use cubed_world::{CHUNK_SIZE, ChunkCoord, MAX_CHUNK_INDICES, MAX_CHUNK_VERTICES};

use crate::face::Face;
use crate::mesh_build::MeshBuild;
use crate::neighbors::NeighborBlocks;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    /// Generate terrain for an unfilled chunk, then mesh it.
    Fill,
    /// Re-mesh a filled chunk whose mesh went stale.
    Remesh,
}

/// What a job meshes: a chunk's existing blocks, or blocks still to be generated.
enum JobInput {
    Remesh(Arc<BlockArray>),
    Fill(Arc<dyn TerrainGenerator>),
}

/// Result handed back to the main thread.
#[derive(Debug)]
pub struct MeshOutput {
    pub mesh: ChunkMesh,
    /// Newly generated blocks for `Fill` jobs.
    pub blocks: Option<Arc<BlockArray>>,
    pub t_fill_ms: u32,
    pub t_mesh_ms: u32,
}

/// One unit of meshing work bound to a single chunk.
///
/// The worker calls [`MeshJob::run`] exactly once; the main thread may only read the
/// output after [`MeshJob::finished`] returns true.
pub struct MeshJob {
    coord: ChunkCoord,
    chunk_id: u64,
    rev: u64,
    input: JobInput,
    neighbors: NeighborBlocks,
    info: Arc<BlockInfo>,
    output: Mutex<Option<MeshOutput>>,
    finished: AtomicBool,
}

impl MeshJob {
    /// Re-mesh job over `blocks`, the current array of the chunk identified by `chunk_id`.
    pub fn remesh(
        coord: ChunkCoord,
        chunk_id: u64,
        rev: u64,
        blocks: Arc<BlockArray>,
        neighbors: NeighborBlocks,
        info: Arc<BlockInfo>,
    ) -> Self {
        Self::new(coord, chunk_id, rev, JobInput::Remesh(blocks), neighbors, info)
    }

    /// Fill job: terrain is generated on the worker before meshing.
    pub fn fill(
        coord: ChunkCoord,
        chunk_id: u64,
        rev: u64,
        neighbors: NeighborBlocks,
        info: Arc<BlockInfo>,
        generator: Arc<dyn TerrainGenerator>,
    ) -> Self {
        Self::new(coord, chunk_id, rev, JobInput::Fill(generator), neighbors, info)
    }

    fn new(
        coord: ChunkCoord,
        chunk_id: u64,
        rev: u64,
        input: JobInput,
        neighbors: NeighborBlocks,
        info: Arc<BlockInfo>,
    ) -> Self {
        Self {
            coord,
            chunk_id,
            rev,
            input,
            neighbors,
            info,
            output: Mutex::new(None),
            finished: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn chunk_id(&self) -> u64 {
        self.chunk_id
    }

    /// Block revision of the chunk when the job was issued.
    #[inline]
    pub fn rev(&self) -> u64 {
        self.rev
    }

    #[inline]
    pub fn kind(&self) -> JobKind {
        match self.input {
            JobInput::Remesh(_) => JobKind::Remesh,
            JobInput::Fill(_) => JobKind::Fill,
        }
    }

    /// Acquire load; pairs with the release store at the end of [`MeshJob::run`].
    #[inline]
    pub fn finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Builds the mesh and publishes it. Runs at most once; later calls are no-ops.
    pub fn run(&self) {
        if self.finished() {
            log::warn!(target: "mesh", "mesh job for {:?} ran twice", self.coord);
            return;
        }
        let mut t_fill_ms = 0;
        let (blocks, generated) = match &self.input {
            JobInput::Fill(generator) => {
                let t0 = Instant::now();
                let filled = Arc::new(generate_blocks(generator.as_ref(), self.coord));
                t_fill_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                (Arc::clone(&filled), Some(filled))
            }
            JobInput::Remesh(blocks) => (Arc::clone(blocks), None),
        };

        let t0 = Instant::now();
        let mesh = mesh_blocks(&blocks, &self.neighbors, &self.info);
        let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        log::trace!(
            target: "mesh",
            "{:?} {:?}: {} vertices, {} indices (fill {}ms, mesh {}ms)",
            self.kind(),
            self.coord,
            mesh.num_vertices,
            mesh.num_indices,
            t_fill_ms,
            t_mesh_ms
        );

        *self.output.lock().unwrap_or_else(PoisonError::into_inner) = Some(MeshOutput {
            mesh,
            blocks: generated,
            t_fill_ms,
            t_mesh_ms,
        });
        self.finished.store(true, Ordering::Release);
    }

    /// Moves the result out. `None` until finished, and after the first take.
    pub fn take_output(&self) -> Option<MeshOutput> {
        if !self.finished() {
            return None;
        }
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl std::fmt::Debug for MeshJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshJob")
            .field("coord", &self.coord)
            .field("chunk_id", &self.chunk_id)
            .field("kind", &self.kind())
            .field("finished", &self.finished())
            .finish()
    }
}

/// Emits one quad per solid-block face whose neighbour cell is not solid.
/// Cells beyond the chunk edge come from `neighbors`, or read as air when absent.
pub fn mesh_blocks(blocks: &BlockArray, neighbors: &NeighborBlocks, info: &BlockInfo) -> ChunkMesh {
    let s = CHUNK_SIZE;
    let mut build = MeshBuild::default();
    let neighbor_block = |x: i32, y: i32, z: i32, face: Face| -> BlockType {
        if let Some(b) = blocks.get_checked(x, y, z) {
            return b;
        }
        match neighbors.get(face) {
            Some(n) => n
                .get_checked(x.rem_euclid(s), y.rem_euclid(s), z.rem_euclid(s))
                .unwrap_or(BlockType::Air),
            None => BlockType::Air,
        }
    };

    for y in 0..s {
        for z in 0..s {
            for x in 0..s {
                let block = blocks.get_local(x as usize, y as usize, z as usize);
                if !info.is_solid(block) {
                    continue;
                }
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    if info.is_solid(neighbor_block(x + dx, y + dy, z + dz, face)) {
                        continue;
                    }
                    let tile = info.tile_uv(block, face.role());
                    build.add_face(face, x as usize, y as usize, z as usize, tile);
                }
            }
        }
    }

    let mesh = build.into_mesh();
    debug_assert!(mesh.num_vertices <= MAX_CHUNK_VERTICES);
    debug_assert!(mesh.num_indices <= MAX_CHUNK_INDICES);
    mesh
}
