//! Ready-made networks.
//!
//! Rate constants are illustrative, not pharmacologically calibrated.

use pk_core::PkResult;

use crate::{ReactionNetwork, ReactionNetworkBuilder};

/// Name of the dosing compartment in both presets.
pub const HEART: &str = "Heart";

/// Heart ⇄ Lung exchange.
///
/// `k_forward` is the Heart → Lung rate and `k_backward` the Lung → Heart
/// rate.  Reaction 0 is Heart → Lung, reaction 1 is Lung → Heart.
pub fn two_compartment(k_forward: f64, k_backward: f64) -> PkResult<ReactionNetwork> {
    let mut b = ReactionNetworkBuilder::new();
    b.add_compartment(HEART);
    b.add_compartment("Lung");
    b.add_reaction(HEART, "Lung", k_forward);
    b.add_reaction("Lung", HEART, k_backward);
    b.build()
}

/// Rate table for [`vital_organs`]: `(organ, heart → organ, organ → heart)`.
pub const VITAL_ORGAN_RATES: [(&str, f64, f64); 4] = [
    ("Brain",   0.1,  0.05),
    ("Kidneys", 0.2,  0.1),
    ("Liver",   0.15, 0.1),
    ("Lungs",   0.25, 0.25),
];

/// Five-compartment hub: the Heart exchanges with Brain, Kidneys, Liver and
/// Lungs.  Compartments are declared Heart first, then organs in
/// [`VITAL_ORGAN_RATES`] order; each organ contributes its outbound then
/// return reaction.
pub fn vital_organs() -> PkResult<ReactionNetwork> {
    let mut b = ReactionNetworkBuilder::new();
    b.add_compartment(HEART);
    for (organ, _, _) in VITAL_ORGAN_RATES {
        b.add_compartment(organ);
    }
    for (organ, out_rate, back_rate) in VITAL_ORGAN_RATES {
        b.add_reaction(HEART, organ, out_rate);
        b.add_reaction(organ, HEART, back_rate);
    }
    b.build()
}
