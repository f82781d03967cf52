//! `pk-network` — compartment reaction networks for the rust_pk simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`network`]     | `Compartment`, `Reaction`, `ReactionNetwork`, builder    |
//! | [`state`]       | `SystemState` (dense per-compartment counts)             |
//! | [`propensity`]  | `Propensities`, `compute`, `compute_into`                |
//! | [`loader`]      | `load_network_csv`, `load_network_reader`                |
//! | [`presets`]     | `two_compartment`, `vital_organs`                        |
//!
//! # Model (summary)
//!
//! Every reaction is unimolecular: it moves one molecule from its source to
//! its destination with propensity `rate * count(source)`.  The network is
//! therefore a birth–death process on a directed graph, and the same
//! stepper handles two compartments or twenty.

pub mod loader;
pub mod network;
pub mod presets;
pub mod propensity;
pub mod state;

#[cfg(test)]
mod tests;

pub use loader::{load_network_csv, load_network_reader};
pub use network::{Compartment, Reaction, ReactionNetwork, ReactionNetworkBuilder};
pub use propensity::Propensities;
pub use state::SystemState;
