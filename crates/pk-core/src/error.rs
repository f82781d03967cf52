//! Framework error type.
//!
//! The first four variants form the configuration-error family: they are
//! raised while a network or simulation is being assembled and are never
//! recoverable at run time.  Sub-crates wrap `PkError` as one variant of
//! their own error enums.

use thiserror::Error;

/// The top-level error type for `pk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PkError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown compartment {0:?}")]
    UnknownCompartment(String),

    #[error("duplicate compartment {0:?}")]
    DuplicateCompartment(String),

    #[error("reaction {reaction} has invalid rate {rate}: must be finite and >= 0")]
    InvalidRate { reaction: String, rate: f64 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PkError {
    /// `true` for the variants raised by configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PkError::Config(_)
                | PkError::UnknownCompartment(_)
                | PkError::DuplicateCompartment(_)
                | PkError::InvalidRate { .. }
        )
    }
}

/// Shorthand result type for all `pk-*` crates.
pub type PkResult<T> = Result<T, PkError>;
