use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in followup-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from a single chat turn.
///
/// Storage failures may leave the session row created without a new
/// exchange; a model failure never persists anything.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("model invocation failed: {0}")]
    ModelInvocation(#[from] LlmError),
}
