//! Core error types for the DeFi overview engine.
//!
//! Collaborator failures (task manager, protocol adapters) are converted into
//! these types at the trait boundary so the engine never depends on the
//! transport or storage a collaborator uses.

use thiserror::Error;

use crate::protocols::DefiProtocol;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Task failed: {0}")]
    Task(#[from] TaskError),

    #[error("{protocol} adapter failed: {message}")]
    Adapter {
        protocol: DefiProtocol,
        message: String,
    },
}

impl Error {
    /// Creates an adapter error for the given protocol.
    pub fn adapter(protocol: DefiProtocol, message: impl Into<String>) -> Self {
        Error::Adapter {
            protocol,
            message: message.into(),
        }
    }
}

/// Errors reported by the background task manager.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task ran and reported a failure.
    #[error("Task {task_id} ({kind}) failed: {message}")]
    Failed {
        task_id: u64,
        kind: String,
        message: String,
    },

    /// The task finished without a result payload.
    #[error("Task {task_id} ({kind}) returned no result")]
    MissingResult { task_id: u64, kind: String },
}

/// Validation errors for payloads received from collaborators.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::Payload(err))
    }
}
