//! Propensity calculator.
//!
//! `propensity[i] = rate[i] * count(source of reaction i)`, in declaration
//! order, plus the total `a0`.  Pure: it reads the network and state and
//! writes only into the caller's buffer.  Propensities depend on counts, so
//! the stepper recomputes them after every event.

use pk_core::ReactionId;

use crate::{ReactionNetwork, SystemState};

/// Per-reaction propensities and their sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Propensities {
    pub values: Vec<f64>,
    pub total:  f64,
}

impl Propensities {
    /// Buffer sized for `network`, all zero.
    pub fn for_network(network: &ReactionNetwork) -> Self {
        Self {
            values: vec![0.0; network.reaction_count()],
            total:  0.0,
        }
    }

    /// Pick the reaction for a selection draw `r2` in [0, 1).
    ///
    /// Scans reactions in declaration order, accumulating propensities, and
    /// returns the first whose cumulative sum strictly exceeds `r2 * total`.
    /// If rounding leaves no cumulative sum above the threshold, the last
    /// reaction with positive propensity is returned.  Returns `None` only
    /// when every propensity is zero.
    pub fn select(&self, r2: f64) -> Option<ReactionId> {
        let threshold = r2 * self.total;
        let mut cumulative = 0.0;
        let mut last_positive = None;
        for (i, &a) in self.values.iter().enumerate() {
            cumulative += a;
            if a > 0.0 {
                if cumulative > threshold {
                    return Some(ReactionId(i as u32));
                }
                last_positive = Some(ReactionId(i as u32));
            }
        }
        last_positive
    }
}

/// Recompute propensities for `state` into `out`, reusing its allocation.
pub fn compute_into(network: &ReactionNetwork, state: &SystemState, out: &mut Propensities) {
    out.values.clear();
    out.values.extend(
        network
            .reactions()
            .iter()
            .map(|r| r.rate * state.get(r.source) as f64),
    );
    out.total = out.values.iter().sum();
}

/// Allocating variant of [`compute_into`].
pub fn compute(network: &ReactionNetwork, state: &SystemState) -> Propensities {
    let mut out = Propensities::for_network(network);
    compute_into(network, state, &mut out);
    out
}
