use thiserror::Error;

/// Error raised while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CircuitError {
    message: String,
}

impl CircuitError {
    /// Make a new error with the given message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn msg(&self) -> &str {
        &self.message
    }
}

/// Result type for circuit construction and simulation.
pub type CircuitResult<T> = Result<T, CircuitError>;
