//! `pk-ssa` — Gillespie stochastic simulation for the rust_pk framework.
//!
//! # Event loop
//!
//! ```text
//! Idle ──start──▶ Advancing ──(a0 == 0 | t >= horizon | event cap)──▶ Terminated
//!                   │    ▲
//!                   └────┘  one event per step:
//!   ① propensities a_i = k_i · n_source(i),  a0 = Σ a_i
//!   ② a0 == 0                → Terminated(NoPropensity), nothing recorded
//!   ③ r1 ∈ (0,1), r2 ∈ [0,1)
//!   ④ t += -ln(r1) / a0
//!   ⑤ first i with Σ_{j≤i} a_j > r2 · a0
//!   ⑥ n_source -= 1, n_dest += 1  (source clamped at 0)
//!   ⑦ record (t, state)
//!   ⑧ t >= horizon           → Terminated(HorizonReached)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`Ensemble`] members on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pk_core::SimConfig;
//! use pk_network::presets;
//! use pk_ssa::{NoopObserver, SimBuilder};
//!
//! let network = presets::two_compartment(0.5, 0.5)?;
//! let mut sim = SimBuilder::new(&network, SimConfig::new(100, "Heart", 20.0, 42))
//!     .build()?;
//! let mut trajectory = sim.new_trajectory();
//! sim.run(&mut trajectory, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod ensemble;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod trajectory;


pub use builder::SimBuilder;
pub use ensemble::{Ensemble, EnsembleRun};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{simulate, RunSummary, Simulation, Step, StepperState, TerminationReason};
pub use trajectory::Trajectory;
