//! Independent replicate runs of one network/config pair.
//!
//! Per-run RNG streams are derived sequentially from the master seed before
//! any run starts, so the results are identical with and without the
//! `parallel` feature and are always returned in run order.

use pk_core::{SimConfig, SimRng};
use pk_network::ReactionNetwork;

use crate::{NoopObserver, RunSummary, SimBuilder, SimResult, Trajectory};

/// Trajectory and summary of one ensemble member.
#[derive(Clone, Debug)]
pub struct EnsembleRun {
    pub run:        usize,
    pub trajectory: Trajectory,
    pub summary:    RunSummary,
}

/// Fluent runner for `n` replicate simulations.
///
/// ```rust,ignore
/// let runs = Ensemble::new(&network, config).runs(200).run()?;
/// ```
pub struct Ensemble<'n> {
    network: &'n ReactionNetwork,
    config:  SimConfig,
    runs:    usize,
}

impl<'n> Ensemble<'n> {
    /// One run by default.
    pub fn new(network: &'n ReactionNetwork, config: SimConfig) -> Self {
        Self { network, config, runs: 1 }
    }

    /// Number of replicate runs.
    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Derive one child stream per run from `config.seed`.
    fn streams(&self) -> Vec<SimRng> {
        let mut master = SimRng::new(self.config.seed);
        (0..self.runs).map(|i| master.child(i as u64)).collect()
    }

    /// Execute all runs.  Fails fast on the first configuration error.
    pub fn run(&self) -> SimResult<Vec<EnsembleRun>> {
        let streams = self.streams();
        log::debug!("ensemble: {} runs, master seed {}", self.runs, self.config.seed);

        #[cfg(not(feature = "parallel"))]
        {
            streams
                .into_iter()
                .enumerate()
                .map(|(run, rng)| self.run_one(run, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            streams
                .into_par_iter()
                .enumerate()
                .map(|(run, rng)| self.run_one(run, rng))
                .collect()
        }
    }

    fn run_one(&self, run: usize, rng: SimRng) -> SimResult<EnsembleRun> {
        let mut sim = SimBuilder::new(self.network, self.config.clone())
            .rng(rng)
            .build()?;
        let mut trajectory = sim.new_trajectory();
        let summary = sim.run(&mut trajectory, &mut NoopObserver)?;
        Ok(EnsembleRun { run, trajectory, summary })
    }
}
