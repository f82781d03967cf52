use pk_core::PkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("trajectory width {got} does not match compartment count {expected}")]
    TrajectoryWidth {
        expected: usize,
        got:      usize,
    },

    #[error("time step underflow at t = {time}: total propensity {total_propensity} is too large to advance the clock")]
    TimeResolution {
        time:             f64,
        total_propensity: f64,
    },

    #[error("network error: {0}")]
    Network(#[from] PkError),
}

impl SimError {
    /// `true` for errors raised while assembling a run rather than during it.
    pub fn is_config(&self) -> bool {
        match self {
            SimError::Config(_) | SimError::TrajectoryWidth { .. } => true,
            SimError::Network(e) => e.is_config(),
            SimError::TimeResolution { .. } => false,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
