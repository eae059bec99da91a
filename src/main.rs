use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use cubed_geom::Vec3;
use cubed_runtime::{StreamingConfig, StreamingManager};

const TICK_RATE: u32 = if cfg!(debug_assertions) { 30 } else { 60 };

#[derive(Parser, Debug)]
#[command(name = "cubed", about = "Headless chunk streaming driver")]
struct Args {
    /// TOML streaming config; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of fixed-rate ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Overrides `render_distance` from the config.
    #[arg(long)]
    render_distance: Option<i32>,
    /// Viewpoint speed along +x, in blocks per second.
    #[arg(long, default_value_t = 8.0)]
    speed: f32,
    /// Log a stats line every N ticks (0 disables).
    #[arg(long, default_value_t = 60)]
    stats_every: u64,
    /// Run ticks back to back instead of pacing them to the tick rate.
    #[arg(long)]
    unpaced: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => StreamingConfig::load_from_path(path)?,
        None => StreamingConfig::default(),
    };
    if let Some(r) = args.render_distance {
        cfg.render_distance = r;
    }
    log::info!(
        "render distance {}, {} slots per tier, drain budget {}, {} Hz",
        cfg.render_distance,
        cfg.slots_per_tier,
        cfg.drain_budget,
        TICK_RATE
    );
    let mut mgr = StreamingManager::from_config(cfg)?;

    let spawn = mgr.spawn_position();
    let dt = 1.0 / TICK_RATE as f32;
    let step = Duration::from_secs_f32(dt);
    let mut viewpoint = spawn;
    let t0 = Instant::now();
    let mut next_tick = t0;
    let mut exhausted_ticks = 0u64;

    for tick in 1..=args.ticks {
        viewpoint += Vec3::UNIT_X * (args.speed * dt);
        let report = mgr.update(viewpoint);
        exhausted_ticks += u64::from(report.exhausted);

        if args.stats_every > 0 && tick % args.stats_every == 0 {
            let stats = mgr.stats();
            let mut vertices = 0usize;
            let mut indices = 0usize;
            mgr.render(|chunk| {
                vertices += chunk.mesh().num_vertices;
                indices += chunk.mesh().num_indices;
            });
            log::info!(
                "tick {} ({:.1} blocks from spawn): {} loaded, {} filled, {} renderable, queued {}+{}, {} verts / {} idx",
                tick,
                (viewpoint - spawn).length(),
                stats.loaded,
                stats.filled,
                stats.renderable,
                stats.queued_normal,
                stats.queued_low,
                vertices,
                indices
            );
        }

        if !args.unpaced {
            next_tick += step;
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            } else {
                next_tick = now;
            }
        }
    }

    mgr.shutdown();
    let stats = mgr.stats();
    let ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        "{} ticks in {}ms: {} jobs applied, {} discarded, slots exhausted on {} ticks",
        stats.ticks,
        ms,
        stats.applied_total,
        stats.discarded_total,
        exhausted_ticks
    );
    Ok(())
}
