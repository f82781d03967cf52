//! Reaction network representation and builder.
//!
//! # Data layout
//!
//! Compartments and reactions are stored in declaration order and addressed
//! by `CompartmentId` / `ReactionId`.  Reactions are additionally indexed by
//! source compartment in **Compressed Sparse Row (CSR)** form, so the
//! reactions draining compartment `c` occupy:
//!
//! ```text
//! out_reactions[ out_start[c] .. out_start[c+1] ]
//! ```
//!
//! The CSR index is only used for structural queries; the propensity scan
//! always walks `reactions` in declaration order.

use std::collections::HashMap;

use pk_core::{CompartmentId, PkError, PkResult, ReactionId};

// ── Compartment / Reaction ────────────────────────────────────────────────────

/// A named reservoir holding an integer molecule count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compartment {
    pub id:   CompartmentId,
    pub name: String,
}

/// A first-order transfer of one molecule from `source` to `destination`.
///
/// The reaction fires with propensity `rate * count(source)`.  A rate of
/// exactly 0 keeps the reaction in the network but it never fires.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reaction {
    pub id:          ReactionId,
    pub source:      CompartmentId,
    pub destination: CompartmentId,
    pub rate:        f64,
}

// ── ReactionNetwork ───────────────────────────────────────────────────────────

/// Immutable directed graph of compartments connected by unimolecular
/// transfer reactions.
///
/// Do not construct directly; use [`ReactionNetworkBuilder`], which performs
/// all validation.
#[derive(Clone, Debug)]
pub struct ReactionNetwork {
    compartments: Vec<Compartment>,
    reactions:    Vec<Reaction>,
    by_name:      HashMap<String, CompartmentId>,

    // ── CSR index of reactions by source ──────────────────────────────────
    out_start:     Vec<u32>,
    out_reactions: Vec<ReactionId>,
}

impl ReactionNetwork {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn compartment_count(&self) -> usize {
        self.compartments.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    /// All reactions in declaration (= propensity scan) order.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn compartment(&self, id: CompartmentId) -> Option<&Compartment> {
        self.compartments.get(id.index())
    }

    pub fn reaction(&self, id: ReactionId) -> Option<&Reaction> {
        self.reactions.get(id.index())
    }

    /// Resolve a compartment name to its ID.
    pub fn compartment_id(&self, name: &str) -> Option<CompartmentId> {
        self.by_name.get(name).copied()
    }

    /// Like [`compartment_id`][Self::compartment_id] but returns
    /// [`PkError::UnknownCompartment`] when the name is not declared.
    pub fn require(&self, name: &str) -> PkResult<CompartmentId> {
        self.compartment_id(name)
            .ok_or_else(|| PkError::UnknownCompartment(name.to_owned()))
    }

    /// Name of compartment `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a compartment of this network.
    pub fn compartment_name(&self, id: CompartmentId) -> &str {
        &self.compartments[id.index()].name
    }

    // ── Graph structure ───────────────────────────────────────────────────

    /// Reactions whose source is `id`, in declaration order.
    pub fn outgoing(&self, id: CompartmentId) -> impl Iterator<Item = &Reaction> + '_ {
        let start = self.out_start[id.index()] as usize;
        let end   = self.out_start[id.index() + 1] as usize;
        self.out_reactions[start..end]
            .iter()
            .map(|r| &self.reactions[r.index()])
    }

    /// `true` if no reaction with a positive rate drains `id`.  Such a
    /// compartment's count can only grow during a run.
    pub fn is_absorbing(&self, id: CompartmentId) -> bool {
        self.outgoing(id).all(|r| r.rate == 0.0)
    }
}

// ── ReactionNetworkBuilder ────────────────────────────────────────────────────

/// Fluent builder for [`ReactionNetwork`].
///
/// Compartments may be declared explicitly with
/// [`add_compartment`][Self::add_compartment]; reactions reference them by
/// name.  Nothing is validated until [`build`][Self::build], so the builder
/// methods never fail.
///
/// ```rust,ignore
/// let mut b = ReactionNetworkBuilder::new();
/// b.add_compartment("Heart");
/// b.add_compartment("Lung");
/// b.add_reaction("Heart", "Lung", 0.5);
/// b.add_reaction("Lung", "Heart", 0.5);
/// let network = b.build()?;
/// ```
#[derive(Default)]
pub struct ReactionNetworkBuilder {
    names:     Vec<String>,
    reactions: Vec<(String, String, f64)>,
}

impl ReactionNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a compartment.  Returns the ID it will have in the built
    /// network (its declaration index).
    pub fn add_compartment(&mut self, name: impl Into<String>) -> CompartmentId {
        let id = CompartmentId(self.names.len() as u32);
        self.names.push(name.into());
        id
    }

    /// Declare a transfer reaction `source → destination` with `rate`.
    /// Returns the ID it will have in the built network.
    pub fn add_reaction(
        &mut self,
        source:      impl Into<String>,
        destination: impl Into<String>,
        rate:        f64,
    ) -> ReactionId {
        let id = ReactionId(self.reactions.len() as u32);
        self.reactions.push((source.into(), destination.into(), rate));
        id
    }

    /// `true` if `name` has already been declared.
    pub fn has_compartment(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Validate and freeze the network.
    ///
    /// # Errors
    /// - [`PkError::Config`] if there are no compartments, a name is blank,
    ///   or a reaction is a self-loop.
    /// - [`PkError::DuplicateCompartment`] for a repeated name.
    /// - [`PkError::UnknownCompartment`] if a reaction names an undeclared
    ///   compartment.
    /// - [`PkError::InvalidRate`] for a negative or non-finite rate.
    pub fn build(self) -> PkResult<ReactionNetwork> {
        if self.names.is_empty() {
            return Err(PkError::Config("network has no compartments".into()));
        }

        // ── Compartments ──────────────────────────────────────────────────
        let mut by_name: HashMap<String, CompartmentId> =
            HashMap::with_capacity(self.names.len());
        let mut compartments = Vec::with_capacity(self.names.len());
        for (i, name) in self.names.into_iter().enumerate() {
            if name.trim().is_empty() {
                return Err(PkError::Config(format!("compartment {i} has an empty name")));
            }
            let id = CompartmentId(i as u32);
            if by_name.insert(name.clone(), id).is_some() {
                return Err(PkError::DuplicateCompartment(name));
            }
            compartments.push(Compartment { id, name });
        }

        // ── Reactions ─────────────────────────────────────────────────────
        let resolve = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| PkError::UnknownCompartment(name.to_owned()))
        };

        let mut reactions = Vec::with_capacity(self.reactions.len());
        for (i, (src, dst, rate)) in self.reactions.iter().enumerate() {
            let source = resolve(src)?;
            let destination = resolve(dst)?;
            if !rate.is_finite() || *rate < 0.0 {
                return Err(PkError::InvalidRate {
                    reaction: format!("{src} -> {dst}"),
                    rate:     *rate,
                });
            }
            if source == destination {
                return Err(PkError::Config(format!(
                    "reaction {src} -> {dst} is a self-loop"
                )));
            }
            reactions.push(Reaction {
                id: ReactionId(i as u32),
                source,
                destination,
                rate: *rate,
            });
        }

        // ── CSR index by source ───────────────────────────────────────────
        let n = compartments.len();
        let mut out_start = vec![0u32; n + 1];
        for r in &reactions {
            out_start[r.source.index() + 1] += 1;
        }
        for c in 0..n {
            out_start[c + 1] += out_start[c];
        }
        let mut cursor: Vec<u32> = out_start[..n].to_vec();
        let mut out_reactions = vec![ReactionId(0); reactions.len()];
        for r in &reactions {
            let slot = &mut cursor[r.source.index()];
            out_reactions[*slot as usize] = r.id;
            *slot += 1;
        }

        log::debug!(
            "built reaction network: {} compartments, {} reactions",
            compartments.len(),
            reactions.len()
        );

        Ok(ReactionNetwork {
            compartments,
            reactions,
            by_name,
            out_start,
            out_reactions,
        })
    }
}
