//! Model parameters and the right-hand side of the ODE pair.

use ode_solvers::{System, Vector2};

use crate::{OdeError, OdeResult};

/// `[C1, C2]`.
pub(crate) type State = Vector2<f64>;

/// Parameters of the two-compartment exchange.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoCompartmentModel {
    /// Initial amount, placed entirely in compartment 1.
    pub dose: f64,
    pub v1:   f64,
    pub v2:   f64,
    /// Transfer rate 2 → 1.
    pub k1:   f64,
    /// Transfer rate 1 → 2.
    pub k2:   f64,
}

impl Default for TwoCompartmentModel {
    /// Dose 100, unit volumes, symmetric rates of 0.5.
    fn default() -> Self {
        Self { dose: 100.0, v1: 1.0, v2: 1.0, k1: 0.5, k2: 0.5 }
    }
}

impl TwoCompartmentModel {
    pub fn new(dose: f64, v1: f64, v2: f64, k1: f64, k2: f64) -> Self {
        Self { dose, v1, v2, k1, k2 }
    }

    /// Positive finite dose and volumes; non-negative finite rates.
    pub fn validate(&self) -> OdeResult<()> {
        for (name, value) in [("dose", self.dose), ("v1", self.v1), ("v2", self.v2)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OdeError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [("k1", self.k1), ("k2", self.k2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(OdeError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn initial_state(&self) -> State {
        State::new(self.dose / self.v1, 0.0)
    }
}

impl System<f64, State> for TwoCompartmentModel {
    fn system(&self, _t: f64, y: &State, dy: &mut State) {
        // Net amount per unit time moving 1 → 2.
        let flux = self.k2 * y[0] * self.v1 - self.k1 * y[1] * self.v2;
        dy[0] = -flux / self.v1;
        dy[1] = flux / self.v2;
    }
}

/// Concentrations at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConcentrationSample {
    pub time: f64,
    pub c1:   f64,
    pub c2:   f64,
}

impl ConcentrationSample {
    /// Amounts `(C1·V1, C2·V2)` under `model`'s volumes.
    pub fn amounts(&self, model: &TwoCompartmentModel) -> (f64, f64) {
        (self.c1 * model.v1, self.c2 * model.v2)
    }
}
