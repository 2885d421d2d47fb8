//! shuttle: a runnable demo for the railtick train-motion simulator.
//!
//! Runs a handful of trains on a three-station shuttle line for half an
//! hour of simulated time and writes predicted arrivals, train snapshots and
//! tick summaries as CSV.
//!
//! ```text
//! cargo run -p shuttle --release [-- config.json]
//! RUST_LOG=rt_motion=debug cargo run -p shuttle
//! ```

mod layout;

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rt_core::{RouteId, SimConfig, Tick};
use rt_dispatch::{IntervalDispatch, NoRiders};
use rt_motion::CarSpec;
use rt_output::{CsvWriter, WorldOutputObserver};
use rt_schedule::{RouteLabelPolicy, load_directory_readers};
use rt_sim::WorldBuilder;

use layout::{DEPOT, DEPOT_LENGTH, PLATFORMS_CSV, ROUTES_CSV, shuttle_path};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Demo settings.  Every field is optional in the JSON file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:           SimConfig,
    train_count:   usize,
    car_count:     u32,
    /// Ticks between depot departures.
    headway_ticks: u64,
    output_dir:    PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                start_unix_millis:     1_700_000_000_000, // fixed reference Tuesday 22:13 UTC
                total_ticks:           36_000,            // 30 min at 50 ms
                output_interval_ticks: 200,               // every 10 s
                ..SimConfig::default()
            },
            train_count:   3,
            car_count:     4,
            headway_ticks: 6_000, // 5 min
            output_dir:    PathBuf::from("output/shuttle"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let demo = load_config(config_path.as_deref())?;

    if let Some(threads) = demo.sim.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    // 1. Line layout and route directory.
    let path = shuttle_path()?;
    let directory = load_directory_readers(Cursor::new(PLATFORMS_CSV), Cursor::new(ROUTES_CSV))?;
    info!(
        segments = path.len(),
        length = path.total_length(),
        routes = directory.route_count(),
        stations = directory.station_count(),
        "layout loaded"
    );

    // 2. World: every train waits in the depot for its departure slot.  Trains
    //    queue on their first tick, so the first slot is tick 1.
    let dispatch = IntervalDispatch::new(demo.headway_ticks, Tick(1))?;
    let mut builder = WorldBuilder::new(
        demo.sim.clone(),
        dispatch,
        NoRiders,
        directory,
        RouteLabelPolicy::default(),
    );
    for _ in 0..demo.train_count {
        builder.spawn(
            DEPOT,
            DEPOT_LENGTH,
            CarSpec::new("emu", demo.car_count, 20.0, 3.0),
            path.clone(),
            vec![RouteId(1), RouteId(2)],
        )?;
    }
    let mut world = builder.build()?;

    // 3. Output.
    std::fs::create_dir_all(&demo.output_dir)
        .with_context(|| format!("creating {}", demo.output_dir.display()))?;
    let writer = CsvWriter::new(&demo.output_dir)?;
    let mut obs = WorldOutputObserver::new(writer, &demo.sim);

    // 4. Run.
    let t0 = Instant::now();
    world.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output incomplete");
    }

    // 5. Summary.
    info!(
        seconds = elapsed.as_secs_f64(),
        ticks = demo.sim.total_ticks,
        output = %demo.output_dir.display(),
        "simulation complete"
    );

    println!("{:<8} {:<14} {:>10} {:>8} {:>6}", "Train", "State", "Progress", "Speed", "Stop");
    println!("{}", "-".repeat(50));
    for train in &world.trains {
        println!(
            "{:<8} {:<14} {:>10.1} {:>8.3} {:>6}",
            train.id.0,
            train.state().as_str(),
            train.progress(),
            train.speed(),
            train.next_stop_index(),
        );
    }

    Ok(())
}
