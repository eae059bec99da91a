use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cubed_blocks::{BlockInfo, BlockProperties, BlockType};
use cubed_chunk::{BlockArray, Chunk, ChunkMesh, TerrainGenerator, WorldGrid, generate_blocks};
use cubed_geom::Vec3;
use cubed_mesh_cpu::{Face, MeshJob, NeighborBlocks, mesh_blocks};
use cubed_world::{CHUNK_SIZE, ChunkCoord, Terrain};
use rayon::prelude::*;

use crate::config::StreamingConfig;
use crate::pool::{JobSlotPool, Tier};
use crate::stats::{StreamingStats, TickReport};
use crate::worker::Worker;

/// Every coordinate of the cube `[center - r, center + r]` on all three axes.
fn window(center: ChunkCoord, r: i32) -> impl Iterator<Item = ChunkCoord> {
    (-r..=r).flat_map(move |dx| {
        (-r..=r).flat_map(move |dy| (-r..=r).map(move |dz| center.offset(dx, dy, dz)))
    })
}

/// Shares the block arrays of the filled face neighbours of `coord`.
fn neighbor_snapshot(grid: &WorldGrid, coord: ChunkCoord) -> NeighborBlocks {
    let mut neighbors = NeighborBlocks::empty();
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        if let Some(chunk) = grid.get(coord.offset(dx, dy, dz)) {
            if chunk.filled() {
                neighbors.set(face, Arc::clone(chunk.blocks()));
            }
        }
    }
    neighbors
}

/// Keeps the chunks around a moving viewpoint loaded, filled and meshed.
///
/// All state lives on the calling thread except the job slots, which are shared with one
/// background [`Worker`]. Dropping the manager stops and joins the worker.
pub struct StreamingManager {
    cfg: StreamingConfig,
    render_distance: i32,
    grid: WorldGrid,
    pool: Arc<JobSlotPool>,
    worker: Option<Worker>,
    info: Arc<BlockInfo>,
    generator: Arc<dyn TerrainGenerator>,
    center: Option<ChunkCoord>,
    applied_total: u64,
    discarded_total: u64,
    ticks: u64,
}

impl StreamingManager {
    /// Builds the block table and terrain described by `cfg` and starts the worker.
    pub fn from_config(cfg: StreamingConfig) -> Result<Self, Box<dyn Error>> {
        let info = match cfg.blocks_path.as_ref() {
            Some(path) => BlockInfo::load_from_path(path)
                .map_err(|e| format!("loading blocks from {}: {}", path.display(), e))?,
            None => BlockInfo::default(),
        };
        let terrain = Terrain::new(cfg.worldgen.clone());
        Self::new(cfg, Arc::new(info), Arc::new(terrain))
    }

    /// Manager with a running background worker.
    pub fn new(
        cfg: StreamingConfig,
        info: Arc<BlockInfo>,
        generator: Arc<dyn TerrainGenerator>,
    ) -> Result<Self, Box<dyn Error>> {
        let mut mgr = Self::without_worker(cfg, info, generator)?;
        let idle = Duration::from_millis(mgr.cfg.worker_idle_ms);
        mgr.worker = Some(Worker::spawn(Arc::clone(&mgr.pool), idle)?);
        Ok(mgr)
    }

    /// Manager whose jobs only run when something calls [`JobSlotPool::run_next`].
    pub fn without_worker(
        cfg: StreamingConfig,
        info: Arc<BlockInfo>,
        generator: Arc<dyn TerrainGenerator>,
    ) -> Result<Self, Box<dyn Error>> {
        cfg.validate()?;
        let mut mgr = Self {
            render_distance: cfg.render_distance,
            pool: Arc::new(JobSlotPool::new(cfg.slots_per_tier)),
            cfg,
            grid: WorldGrid::new(),
            worker: None,
            info,
            generator,
            center: None,
            applied_total: 0,
            discarded_total: 0,
            ticks: 0,
        };
        if mgr.cfg.prefill_spawn {
            let spawn = ChunkCoord::containing_point(mgr.generator.spawn_position());
            mgr.prefill(spawn);
        }
        Ok(mgr)
    }

    /// Loads, fills and meshes the whole window around `center` before returning.
    fn prefill(&mut self, center: ChunkCoord) {
        let t0 = Instant::now();
        let coords: Vec<ChunkCoord> = window(center, self.render_distance).collect();
        for &coord in &coords {
            self.grid.insert_empty(coord);
        }

        let generator = &*self.generator;
        let generated: Vec<(ChunkCoord, BlockArray)> = coords
            .par_iter()
            .map(|&coord| (coord, generate_blocks(generator, coord)))
            .collect();
        for (coord, blocks) in generated {
            if let Some(chunk) = self.grid.get_mut(coord) {
                chunk.install_blocks(Arc::new(blocks));
                chunk.set_filled(true);
            }
        }

        let inputs: Vec<(ChunkCoord, Arc<BlockArray>, NeighborBlocks)> = coords
            .iter()
            .filter_map(|&coord| {
                let chunk = self.grid.get(coord)?;
                Some((coord, Arc::clone(chunk.blocks()), neighbor_snapshot(&self.grid, coord)))
            })
            .collect();
        let info = &*self.info;
        let meshes: Vec<(ChunkCoord, ChunkMesh)> = inputs
            .into_par_iter()
            .map(|(coord, blocks, neighbors)| (coord, mesh_blocks(&blocks, &neighbors, info)))
            .collect();
        let mut vertices = 0usize;
        for (coord, mesh) in meshes {
            if let Some(chunk) = self.grid.get_mut(coord) {
                vertices += mesh.num_vertices;
                chunk.update_mesh(mesh);
                chunk.set_up_to_date(true);
                chunk.set_low_priority_update(false);
            }
        }
        self.center = Some(center);
        let ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        log::info!(
            target: "stream",
            "prefilled {} chunks around {:?} ({} vertices) in {}ms",
            coords.len(),
            center,
            vertices,
            ms
        );
    }

    /// One streaming step for a viewer at `viewpoint`: load and evict around it, hand
    /// stale chunks to the worker, and apply a bounded number of finished jobs.
    pub fn update(&mut self, viewpoint: Vec3) -> TickReport {
        let mut report = TickReport::default();
        let center = ChunkCoord::containing_point(viewpoint);
        let r = self.render_distance;
        self.ticks += 1;

        for coord in window(center, r) {
            if self.grid.insert_empty(coord) {
                self.grid.mark_neighbors_stale(coord);
                report.inserted += 1;
            }
        }
        report.evicted = self.grid.retain_within(center, r);
        if self.center != Some(center) || report.inserted > 0 || report.evicted > 0 {
            log::debug!(
                target: "stream",
                "center {:?}: +{} -{} chunks ({} loaded)",
                center,
                report.inserted,
                report.evicted,
                self.grid.len()
            );
        }
        self.center = Some(center);

        self.schedule(center, &mut report);
        self.drain(&mut report);
        report
    }

    fn schedule(&mut self, center: ChunkCoord, report: &mut TickReport) {
        let mut stale: Vec<(i64, ChunkCoord)> = self
            .grid
            .iter()
            .filter(|c| c.needs_update())
            .map(|c| (c.coord().distance_sq(center), c.coord()))
            .collect();
        stale.sort_unstable();

        for (_, coord) in stale {
            let Some(chunk) = self.grid.get(coord) else {
                continue;
            };
            let tier = if chunk.low_priority_update() { Tier::Low } else { Tier::Normal };
            let Some(slot) = self.pool.acquire(tier) else {
                log::trace!(target: "stream", "{:?} tier full at {:?}; deferring", tier, coord);
                report.exhausted = true;
                break;
            };
            let neighbors = neighbor_snapshot(&self.grid, coord);
            let job = if chunk.filled() {
                MeshJob::remesh(
                    coord,
                    chunk.id(),
                    chunk.rev(),
                    Arc::clone(chunk.blocks()),
                    neighbors,
                    Arc::clone(&self.info),
                )
            } else {
                MeshJob::fill(
                    coord,
                    chunk.id(),
                    chunk.rev(),
                    neighbors,
                    Arc::clone(&self.info),
                    Arc::clone(&self.generator),
                )
            };
            self.pool.install(slot, Arc::new(job));
            if let Some(chunk) = self.grid.get_mut(coord) {
                chunk.set_update_queued(true);
            }
            report.scheduled += 1;
        }
    }

    fn drain(&mut self, report: &mut TickReport) {
        let pool = Arc::clone(&self.pool);
        'tiers: for tier in Tier::ALL {
            for slot in pool.slot_ids(tier) {
                if report.drained() >= self.cfg.drain_budget {
                    break 'tiers;
                }
                let Some(job) = pool.finished_job(slot) else {
                    continue;
                };
                let output = job.take_output();
                pool.clear(slot);

                let coord = job.coord();
                let (Some(chunk), Some(out)) = (self.grid.get_mut(coord), output) else {
                    log::trace!(target: "stream", "discarding job for evicted chunk {:?}", coord);
                    report.discarded += 1;
                    continue;
                };
                if chunk.id() != job.chunk_id() {
                    log::trace!(target: "stream", "discarding job for replaced chunk {:?}", coord);
                    report.discarded += 1;
                    continue;
                }
                let was_fill = out.blocks.is_some();
                if let Some(blocks) = out.blocks {
                    chunk.install_blocks(blocks);
                }
                chunk.update_mesh(out.mesh);
                chunk.set_filled(true);
                chunk.set_up_to_date(chunk.rev() == job.rev());
                chunk.set_update_queued(false);
                chunk.set_low_priority_update(false);
                log::trace!(
                    target: "stream",
                    "applied {:?} job for {:?} (fill {}ms, mesh {}ms)",
                    job.kind(),
                    coord,
                    out.t_fill_ms,
                    out.t_mesh_ms
                );
                if was_fill {
                    self.grid.mark_neighbors_stale(coord);
                }
                report.applied += 1;
            }
        }
        self.applied_total += report.applied as u64;
        self.discarded_total += report.discarded as u64;
    }

    /// Visits every filled chunk, including those whose mesh is waiting to be rebuilt.
    pub fn render(&self, mut visit: impl FnMut(&Chunk)) {
        for chunk in self.grid.iter().filter(|c| c.filled()) {
            visit(chunk);
        }
    }

    /// Block at a world position; air when its chunk is not loaded or not filled yet.
    pub fn block_type_at(&self, wx: i32, wy: i32, wz: i32) -> BlockType {
        self.grid.block_type_at(wx, wy, wz)
    }

    pub fn is_block_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        !self.block_type_at(wx, wy, wz).is_air()
    }

    pub fn block_properties(&self, block: BlockType) -> &BlockProperties {
        self.info.properties(block)
    }

    /// Replaces one block in a filled chunk. Returns true when something changed.
    ///
    /// A block on a chunk boundary also invalidates the chunk across that boundary.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, block: BlockType) -> bool {
        let coord = ChunkCoord::containing_block(wx, wy, wz);
        let Some(chunk) = self.grid.get_mut(coord) else {
            return false;
        };
        if !chunk.filled() {
            return false;
        }
        let (ox, oy, oz) = coord.origin();
        let (lx, ly, lz) = (wx - ox, wy - oy, wz - oz);
        if !chunk.set_block_local(lx as usize, ly as usize, lz as usize, block) {
            return false;
        }
        let edge = CHUNK_SIZE - 1;
        for (local, axis) in [(lx, 0), (ly, 1), (lz, 2)] {
            let step = match local {
                0 => -1,
                l if l == edge => 1,
                _ => continue,
            };
            let mut d = [0; 3];
            d[axis] = step;
            if let Some(n) = self.grid.get_mut(coord.offset(d[0], d[1], d[2])) {
                n.invalidate_mesh();
            }
        }
        true
    }

    #[inline]
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Takes effect on the next [`StreamingManager::update`]. Clamped to at least 1.
    pub fn set_render_distance(&mut self, r: i32) {
        let r = r.max(1);
        if r != self.render_distance {
            log::info!(target: "stream", "render distance {} -> {}", self.render_distance, r);
            self.render_distance = r;
        }
    }

    #[inline]
    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    #[inline]
    pub fn pool(&self) -> &Arc<JobSlotPool> {
        &self.pool
    }

    #[inline]
    pub fn config(&self) -> &StreamingConfig {
        &self.cfg
    }

    /// Chunk the last `update` (or the spawn prefill) was centred on.
    #[inline]
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.generator.spawn_position()
    }

    pub fn stats(&self) -> StreamingStats {
        let mut stats = StreamingStats {
            loaded: self.grid.len(),
            queued_normal: self.pool.occupied(Tier::Normal),
            queued_low: self.pool.occupied(Tier::Low),
            applied_total: self.applied_total,
            discarded_total: self.discarded_total,
            ticks: self.ticks,
            ..StreamingStats::default()
        };
        for chunk in self.grid.iter() {
            stats.filled += usize::from(chunk.filled());
            stats.renderable += usize::from(chunk.renderable());
        }
        stats
    }

    /// Stops and joins the worker. Queued jobs stay in their slots.
    pub fn shutdown(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}
