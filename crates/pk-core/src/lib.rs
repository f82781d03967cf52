//! `pk-core` — foundational types for the `rust_pk` compartment simulator.
//!
//! This crate is a dependency of every other `pk-*` crate.  It intentionally
//! has no `pk-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CompartmentId`, `ReactionId`                         |
//! | [`config`]      | `SimConfig` (dose, source, horizon, seed, limits)     |
//! | [`rng`]         | `SimRng` (one stream per run)                         |
//! | [`error`]       | `PkError`, `PkResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{PkError, PkResult};
pub use ids::{CompartmentId, ReactionId};
pub use rng::SimRng;
