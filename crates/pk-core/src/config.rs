//! Simulation run configuration.

use crate::{PkError, PkResult};

/// Top-level configuration for one stochastic run.
///
/// Typically built in code or loaded from a JSON/TOML file by the
/// application crate (enable the `serde` feature) and handed to the
/// simulation builder together with a reaction network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Initial molecule count.  Placed entirely in `source`; every other
    /// compartment starts empty.  Must be > 0.
    pub dose: u64,

    /// Name of the compartment that receives the dose.
    pub source: String,

    /// Simulation time horizon.  The run stops after the first event whose
    /// time is >= `horizon`.  Must be finite and > 0.
    pub horizon: f64,

    /// Master RNG seed.  The same seed and network always produce identical
    /// trajectories.
    pub seed: u64,

    /// Optional cap on the number of events per run.  `None` runs until the
    /// propensity vanishes or the horizon is reached.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_events: Option<u64>,
}

impl SimConfig {
    /// Configuration with no event cap.
    pub fn new(dose: u64, source: impl Into<String>, horizon: f64, seed: u64) -> Self {
        Self {
            dose,
            source: source.into(),
            horizon,
            seed,
            max_events: None,
        }
    }

    /// Set the per-run event cap.
    pub fn with_max_events(mut self, max_events: u64) -> Self {
        self.max_events = Some(max_events);
        self
    }

    /// Check the scalar fields.  Whether `source` names a real compartment
    /// can only be checked against a network, which the builder does.
    pub fn validate(&self) -> PkResult<()> {
        if self.dose == 0 {
            return Err(PkError::Config("dose must be a positive molecule count".into()));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(PkError::Config(format!(
                "time horizon must be finite and > 0, got {}",
                self.horizon
            )));
        }
        if self.source.trim().is_empty() {
            return Err(PkError::Config("source compartment name is empty".into()));
        }
        Ok(())
    }
}
