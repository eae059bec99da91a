//! Streaming runtime: job slots, the background mesh worker, and the per-tick driver.
#![forbid(unsafe_code)]

mod config;
mod pool;
mod stats;
mod streaming;
mod worker;

pub use config::{
    DEFAULT_DRAIN_BUDGET, DEFAULT_SLOTS_PER_TIER, MAX_WORKER_IDLE_MS, StreamingConfig,
    default_render_distance,
};
pub use pool::{JobSlotPool, SlotId, Tier};
pub use stats::{StreamingStats, TickReport};
pub use streaming::StreamingManager;
pub use worker::Worker;
