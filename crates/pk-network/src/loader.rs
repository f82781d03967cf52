//! CSV network loader.
//!
//! # CSV format
//!
//! One row per reaction.  Compartments are declared implicitly, in order of
//! first appearance (source before destination).
//!
//! ```csv
//! source,destination,rate
//! Heart,Brain,0.1
//! Brain,Heart,0.05
//! Heart,Kidneys,0.2
//! Kidneys,Heart,0.1
//! ```
//!
//! A row with empty `destination` and `rate` declares an isolated
//! compartment (one no reaction touches yet):
//!
//! ```csv
//! source,destination,rate
//! Depot,,
//! ```
//!
//! Validation (unknown names cannot occur here, but negative rates and
//! self-loops can) is delegated to [`ReactionNetworkBuilder::build`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use pk_core::{PkError, PkResult};

use crate::{ReactionNetwork, ReactionNetworkBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NetworkRecord {
    source:      String,
    destination: Option<String>,
    rate:        Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`ReactionNetwork`] from a CSV file.
pub fn load_network_csv(path: &Path) -> PkResult<ReactionNetwork> {
    let file = std::fs::File::open(path)
        .map_err(PkError::Io)?;
    load_network_reader(file)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for networks embedded in
/// a binary as a string constant.
pub fn load_network_reader<R: Read>(reader: R) -> PkResult<ReactionNetwork> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut builder = ReactionNetworkBuilder::new();

    for (line, result) in csv_reader.deserialize::<NetworkRecord>().enumerate() {
        let row = result.map_err(|e| PkError::Parse(e.to_string()))?;
        declare(&mut builder, &row.source);

        match (row.destination, row.rate) {
            (None, None) => {}
            (Some(dst), Some(rate)) => {
                declare(&mut builder, &dst);
                builder.add_reaction(row.source, dst, rate);
            }
            _ => {
                return Err(PkError::Parse(format!(
                    "row {}: destination and rate must both be set or both be empty",
                    line + 1
                )));
            }
        }
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn declare(builder: &mut ReactionNetworkBuilder, name: &str) {
    if !builder.has_compartment(name) {
        builder.add_compartment(name);
    }
}
