use std::fmt;

/// Unified error type for the homedeck crate.
#[derive(Debug, Clone)]
pub enum CoreError {
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// A referenced entity does not exist.
    NotFound(String),
    /// An upstream service call failed (network, decode, bad status).
    Upstream(String),
    /// A dashboard invariant was violated.
    InvariantViolation(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CoreError::NotFound(msg) => write!(f, "not found: {msg}"),
            CoreError::Upstream(msg) => write!(f, "upstream error: {msg}"),
            CoreError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            CoreError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
