//! vital_organs — five-compartment hub model, run as a seeded ensemble.
//!
//! The Heart receives the whole dose and exchanges with Brain, Kidneys,
//! Liver and Lungs.  The network is embedded as CSV to exercise the loader;
//! it is the same network as `pk_network::presets::vital_organs()`.
//!
//! ```text
//! cargo run -p vital_organs --release [-- config.json]
//! cargo run -p vital_organs --release --features parallel,sqlite
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use pk_core::{CompartmentId, SimConfig};
use pk_network::load_network_reader;
use pk_output::{write_trajectory, CsvWriter, OutputWriter, RunSummaryRow};
use pk_ssa::stats::mean_final_counts;
use pk_ssa::{Ensemble, EnsembleRun};

// ── Constants ─────────────────────────────────────────────────────────────────

const DOSE:    u64   = 1_000;
const HORIZON: f64   = 50.0;
const SEED:    u64   = 42;
const RUNS:    usize = 20;

// ── Network CSV ───────────────────────────────────────────────────────────────

const NETWORK_CSV: &str = "\
source,destination,rate\n\
Heart,Brain,0.1\n\
Brain,Heart,0.05\n\
Heart,Kidneys,0.2\n\
Kidneys,Heart,0.1\n\
Heart,Liver,0.15\n\
Liver,Heart,0.1\n\
Heart,Lungs,0.25\n\
Lungs,Heart,0.25\n\
";

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::new(DOSE, "Heart", HORIZON, SEED));
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn dump<W: OutputWriter>(writer: &mut W, runs: &[EnsembleRun]) -> Result<()> {
    for r in runs {
        let run = u32::try_from(r.run)?;
        write_trajectory(writer, run, &r.trajectory)?;
        writer.write_run_summary(&RunSummaryRow::new(run, &r.summary))?;
    }
    writer.finish()?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    println!("=== vital_organs — rust_pk ===");
    println!(
        "Dose: {}  |  Horizon: {}  |  Runs: {RUNS}  |  Seed: {}",
        config.dose, config.horizon, config.seed
    );
    println!();

    // 1. Network from the embedded CSV.
    let network = load_network_reader(Cursor::new(NETWORK_CSV))?;
    println!(
        "Network: {} compartments, {} reactions",
        network.compartment_count(),
        network.reaction_count()
    );

    // 2. Ensemble.
    let t0 = Instant::now();
    let runs = Ensemble::new(&network, config.clone()).runs(RUNS).run()?;
    let elapsed = t0.elapsed();
    let events: u64 = runs.iter().map(|r| r.summary.events).sum();
    println!("Ensemble complete in {:.3} s ({events} events)", elapsed.as_secs_f64());

    // 3. Output.
    let out_dir = Path::new("output/vital_organs");
    std::fs::create_dir_all(out_dir)?;
    dump(&mut CsvWriter::new(out_dir)?, &runs)?;
    #[cfg(feature = "sqlite")]
    dump(&mut pk_output::SqliteWriter::new(out_dir)?, &runs)?;
    println!("  output written to {}", out_dir.display());
    println!();

    // 4. Final molecule counts: first run, and the ensemble mean.
    let first = runs.first().and_then(|r| r.trajectory.final_state());
    let means = mean_final_counts(&runs);

    println!("{:<10} {:>10} {:>12}", "Organ", "Run 0", "Mean final");
    println!("{}", "-".repeat(34));
    for (c, mean) in means.iter().enumerate() {
        let id = CompartmentId(c as u32);
        println!(
            "{:<10} {:>10} {:>12.1}",
            network.compartment_name(id),
            first.map_or(0, |counts| counts[c]),
            mean,
        );
    }

    let total: f64 = means.iter().sum();
    if (total - config.dose as f64).abs() > 1e-6 {
        log::warn!("mean final total {total} differs from dose {}", config.dose);
    }

    Ok(())
}
