//! `pk-ode` — deterministic two-compartment reference model.
//!
//! Concentrations in two well-mixed compartments exchanging drug by
//! first-order transfer:
//!
//! ```text
//! dC1/dt = (k1·C2·V2 − k2·C1·V1) / V1
//! dC2/dt = (k2·C1·V1 − k1·C2·V2) / V2
//! C1(0)  = D / V1,   C2(0) = 0
//! ```
//!
//! `k2` moves drug from compartment 1 to 2, `k1` from 2 back to 1.  The
//! stochastic engine's counts divided by volume converge to these curves as
//! the dose grows; this crate has no dependency on it.
//!
//! | Item                     | Contents                                        |
//! |--------------------------|-------------------------------------------------|
//! | [`TwoCompartmentModel`]  | Parameters and validation                       |
//! | [`simulate`]             | Dopri5 integration onto a uniform time grid     |
//! | [`analytic`]             | Closed-form solution                            |
//! | [`peak_concentrations`]  | Per-compartment maxima of a sampled curve       |

pub mod error;
pub mod model;
pub mod solve;


pub use error::{OdeError, OdeResult};
pub use model::{ConcentrationSample, TwoCompartmentModel};
pub use solve::{
    analytic, peak_concentrations, simulate, simulate_with, OdeOptions, DEFAULT_NUM_POINTS,
};
