use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use cubed_world::WorldGenParams;
use serde::Deserialize;

pub const DEFAULT_SLOTS_PER_TIER: usize = 10;
pub const DEFAULT_DRAIN_BUDGET: usize = 2;
/// Longest idle wait the worker may use between polls.
pub const MAX_WORKER_IDLE_MS: u64 = 100;

/// Chunk radius of the loaded window: small in debug builds, wider in release.
pub fn default_render_distance() -> i32 {
    if cfg!(debug_assertions) { 2 } else { 5 }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamingConfig {
    /// Radius, in chunks, of the cube kept loaded around the viewpoint.
    pub render_distance: i32,
    /// Job slots in each of the normal and low-priority tiers.
    pub slots_per_tier: usize,
    /// Finished jobs applied per `update` call at most.
    pub drain_budget: usize,
    /// Upper bound on how long the idle worker waits before polling again.
    pub worker_idle_ms: u64,
    /// Fill the window around the spawn point synchronously at startup.
    pub prefill_spawn: bool,
    /// Optional TOML texture table; the built-in table is used when absent.
    pub blocks_path: Option<PathBuf>,
    pub worldgen: WorldGenParams,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            slots_per_tier: DEFAULT_SLOTS_PER_TIER,
            drain_budget: DEFAULT_DRAIN_BUDGET,
            worker_idle_ms: 1,
            prefill_spawn: true,
            blocks_path: None,
            worldgen: WorldGenParams::default(),
        }
    }
}

impl StreamingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: StreamingConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads and validates a config file. A relative `blocks_path` is resolved
    /// against the config file's directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("reading {}: {}", path.display(), e))?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let (Some(blocks), Some(dir)) = (cfg.blocks_path.as_ref(), path.parent()) {
            if blocks.is_relative() {
                cfg.blocks_path = Some(dir.join(blocks));
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.render_distance < 1 {
            return Err(format!("render_distance must be at least 1, got {}", self.render_distance).into());
        }
        if self.slots_per_tier == 0 {
            return Err("slots_per_tier must be at least 1".into());
        }
        if self.drain_budget == 0 {
            return Err("drain_budget must be at least 1".into());
        }
        if !(1..=MAX_WORKER_IDLE_MS).contains(&self.worker_idle_ms) {
            return Err(format!(
                "worker_idle_ms must be between 1 and {}, got {}",
                MAX_WORKER_IDLE_MS, self.worker_idle_ms
            )
            .into());
        }
        self.worldgen.validate()
    }
}
