//! Per-compartment molecule counts at one instant.

use pk_core::CompartmentId;

use crate::{Reaction, ReactionNetwork};

/// Molecule count of every compartment, indexed by `CompartmentId`.
///
/// Counts are unsigned, so non-negativity holds by construction; the only
/// mutation is [`apply`][Self::apply], which moves exactly one molecule and
/// therefore conserves the total.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemState {
    counts: Vec<u64>,
}

impl SystemState {
    /// All compartments empty.
    pub fn empty(network: &ReactionNetwork) -> Self {
        Self { counts: vec![0; network.compartment_count()] }
    }

    /// `dose` molecules in `source`, every other compartment empty.
    pub fn with_dose(network: &ReactionNetwork, source: CompartmentId, dose: u64) -> Self {
        let mut state = Self::empty(network);
        state.counts[source.index()] = dose;
        state
    }

    /// Build directly from a count vector (one entry per compartment).
    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn get(&self, id: CompartmentId) -> u64 {
        self.counts[id.index()]
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all compartments.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Move one molecule along `reaction`.
    ///
    /// The source decrement is clamped at zero: if the source is already
    /// empty nothing moves and `false` is returned.  A correctly computed
    /// propensity never selects such a reaction.
    pub fn apply(&mut self, reaction: &Reaction) -> bool {
        let src = reaction.source.index();
        match self.counts[src].checked_sub(1) {
            Some(left) => {
                self.counts[src] = left;
                self.counts[reaction.destination.index()] += 1;
                true
            }
            None => false,
        }
    }

    /// `(name, count)` pairs in compartment order.
    pub fn named<'a>(
        &'a self,
        network: &'a ReactionNetwork,
    ) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        network
            .compartments()
            .iter()
            .map(move |c| (c.name.as_str(), self.counts[c.id.index()]))
    }
}
