//! Engine error taxonomy.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Input rejected before any per-task work began.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("duplicate task key '{0}' in catalog")]
    DuplicateKey(String),

    #[error("no task matches '{0}'")]
    UnknownTask(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
