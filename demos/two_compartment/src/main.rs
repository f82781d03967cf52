//! two_compartment — Heart ⇄ Lung exchange, stochastic vs deterministic.
//!
//! Runs one Gillespie trajectory, streams it to `output/two_compartment/`,
//! then integrates the equivalent ODE model and prints both side by side.
//!
//! ```text
//! cargo run -p two_compartment                      # built-in defaults
//! cargo run -p two_compartment -- demos/two_compartment/config.json
//! RUST_LOG=debug cargo run -p two_compartment       # solver and stepper logs
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use pk_core::SimConfig;
use pk_network::presets;
use pk_ode::{analytic, peak_concentrations, TwoCompartmentModel, DEFAULT_NUM_POINTS};
use pk_output::{CsvWriter, TrajectoryOutputObserver};
use pk_ssa::stats::{fraction_time_average, sample_on_grid};
use pk_ssa::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const DOSE:    u64 = 100;
const HORIZON: f64 = 20.0;
const SEED:    u64 = 42;

/// Lung → Heart.
const K1: f64 = 0.5;
/// Heart → Lung.
const K2: f64 = 0.5;

/// Both compartments have unit volume, so counts and concentrations share a
/// scale.
const VOLUME: f64 = 1.0;

const REPORT_TIMES: [f64; 6] = [0.0, 0.5, 1.0, 2.0, 5.0, 20.0];

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::new(DOSE, presets::HEART, HORIZON, SEED));
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {path}"))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {path}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    println!("=== two_compartment — rust_pk ===");
    println!(
        "Dose: {}  |  Horizon: {}  |  Seed: {}  |  k(Heart→Lung) = {K2}, k(Lung→Heart) = {K1}",
        config.dose, config.horizon, config.seed
    );
    println!();

    // 1. Stochastic run, streamed to CSV.
    let network = presets::two_compartment(K2, K1)?;
    let heart = network.require(presets::HEART)?;
    let lung = network.require("Lung")?;

    let out_dir = Path::new("output/two_compartment");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = TrajectoryOutputObserver::new(CsvWriter::new(out_dir)?, 0);

    let mut sim = SimBuilder::new(&network, config.clone()).build()?;
    let mut trajectory = sim.new_trajectory();
    let t0 = Instant::now();
    let summary = sim.run(&mut trajectory, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!(
        "SSA: {} events in {:.3} s, stopped at t = {:.3} ({})",
        summary.events,
        elapsed.as_secs_f64(),
        summary.final_time,
        summary.reason
    );
    if let Some(share) = fraction_time_average(&trajectory, heart, 0.0, config.horizon) {
        println!("Time-averaged Heart share: {:.1} %", share * 100.0);
    }
    println!("  {}/trajectory.csv, run_summaries.csv written", out_dir.display());
    println!();

    // 2. Deterministic reference.
    let model = TwoCompartmentModel::new(config.dose as f64, VOLUME, VOLUME, K1, K2);
    let curve = pk_ode::simulate(&model, config.horizon, DEFAULT_NUM_POINTS)?;
    let (peak_heart, peak_lung) = peak_concentrations(&curve);
    println!("Maximum concentration in Heart: {peak_heart:.2}");
    println!("Maximum concentration in Lung: {peak_lung:.2}");
    println!();

    // 3. Side-by-side table.
    let grid: Vec<f64> = REPORT_TIMES.iter().copied().filter(|&t| t <= config.horizon).collect();
    let ssa_heart = sample_on_grid(&trajectory, heart, &grid);
    let ssa_lung = sample_on_grid(&trajectory, lung, &grid);

    println!("{:>8} {:>10} {:>10} {:>10} {:>10}", "t", "SSA Heart", "ODE C1", "SSA Lung", "ODE C2");
    println!("{}", "-".repeat(52));
    for (i, &t) in grid.iter().enumerate() {
        let exact = analytic(&model, t);
        println!(
            "{:>8.2} {:>10} {:>10.2} {:>10} {:>10.2}",
            t,
            ssa_heart[i].map_or_else(|| "-".into(), |n| n.to_string()),
            exact.c1,
            ssa_lung[i].map_or_else(|| "-".into(), |n| n.to_string()),
            exact.c2,
        );
    }

    Ok(())
}
