use thiserror::Error;

#[derive(Debug, Error)]
pub enum OdeError {
    #[error("ode model configuration error: {0}")]
    Config(String),

    #[error("ode integration failed: {0}")]
    Integration(String),
}

pub type OdeResult<T> = Result<T, OdeError>;
