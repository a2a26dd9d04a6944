//! Headless run: scatter a seeded cloud of bodies around the surface, step it
//! for a fixed number of frames, and report timing and conservation numbers.

use anyhow::{Context, Result};
use clap::Parser;
use glam::{Mat4, Quat};
use metharizon_core::SimConfig;
use metharizon_physics::forces::GravityParams;
use metharizon_physics::scenario::{self, ScatterParams};
use metharizon_physics::{diagnostics, Simulation};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Run the physics core without a window")]
struct Args {
    /// Bodies to scatter around the surface
    #[arg(long, default_value_t = 200)]
    bodies: usize,
    /// Frames to advance
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Scenario seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Substeps per frame (overrides the config)
    #[arg(long)]
    substeps: Option<u32>,
    /// JSON file with a full or partial SimConfig
    #[arg(long)]
    config: Option<PathBuf>,
    /// Surface spin about world Y, rad/s
    #[arg(long, default_value_t = 0.0)]
    spin: f32,
    /// Log progress every N frames (0 = only the summary)
    #[arg(long, default_value_t = 120)]
    report_every: u64,
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(substeps) = args.substeps {
        config.substeps = substeps;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let gravity = GravityParams::from_config(&config);

    log::info!(
        "surface: {} | bodies: {} | frames: {} | dt: {:.4}s | substeps: {} | seed: {}",
        config.surface.name(),
        args.bodies,
        args.frames,
        args.dt,
        config.substeps,
        config.seed
    );

    let mut sim = Simulation::new(config)?;
    let mut rng = scenario::seeded_rng(sim.config().seed);
    let config = sim.config().clone();
    scenario::scatter_shell(sim.bodies_mut(), &config, &ScatterParams::default(), args.bodies, &mut rng)?;

    let momentum_start = diagnostics::total_momentum(sim.bodies());
    let energy_start = diagnostics::kinetic_energy(sim.bodies()) + diagnostics::potential_energy(sim.bodies(), &gravity);

    let mut pair_contacts = 0u64;
    let mut surface_contacts = 0u64;
    let mut clamped_frames = 0u64;

    let start = Instant::now();
    for _ in 0..args.frames {
        let angle = args.spin * sim.elapsed() as f32;
        let transform = Mat4::from_quat(Quat::from_rotation_y(angle));
        let report = sim.advance(args.dt, &transform);

        pair_contacts += u64::from(report.pair_contacts);
        surface_contacts += u64::from(report.surface_contacts);
        if report.clamped {
            clamped_frames += 1;
        }

        if args.report_every > 0 && report.frame % args.report_every == 0 {
            log::info!(
                "frame {:>6} | t = {:>7.2}s | contacts {} pair, {} surface",
                report.frame,
                sim.elapsed(),
                report.pair_contacts,
                report.surface_contacts
            );
        }
    }
    let wall = start.elapsed();

    let momentum_drift = (diagnostics::total_momentum(sim.bodies()) - momentum_start).length();
    let energy_end = diagnostics::kinetic_energy(sim.bodies()) + diagnostics::potential_energy(sim.bodies(), &gravity);
    let ms_per_frame = if args.frames > 0 {
        wall.as_secs_f64() * 1000.0 / args.frames as f64
    } else {
        0.0
    };

    log::info!("=== Summary ===");
    log::info!("wall time:         {:.3}s ({:.3} ms/frame)", wall.as_secs_f64(), ms_per_frame);
    log::info!("simulated:         {:.3}s over {} frames ({} clamped)", sim.elapsed(), sim.frame(), clamped_frames);
    log::info!("bodies:            {}", sim.count());
    log::info!("momentum drift:    {:.3e}", momentum_drift);
    log::info!("energy:            {:.4} -> {:.4} ({:+.4})", energy_start, energy_end, energy_end - energy_start);
    log::info!("orientation error: {:.3e}", diagnostics::max_orientation_error(sim.bodies()));
    log::info!("contacts:          {} pair, {} surface", pair_contacts, surface_contacts);

    Ok(())
}
