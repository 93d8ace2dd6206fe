//! Error types for circuit construction and simulation.

use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that abort a simulation run.
///
/// Only structural problems are errors. Numerical edge cases in the
/// diagnostics degrade to default values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A qubit index is outside `[0, num_qubits)`.
    #[error("qubit index {qubit} is out of range (num_qubits = {num_qubits})")]
    QubitOutOfRange {
        /// Offending index.
        qubit: usize,
        /// Register size.
        num_qubits: usize,
    },

    /// An operation that is structurally meaningless, e.g. CNOT with control == target.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A register needs at least one qubit.
    #[error("invalid qubit count {0}: at least one qubit is required")]
    InvalidQubitCount(usize),

    /// The requested register exceeds the configured qubit cap.
    #[error("{requested} qubits requested, but the simulator is capped at {max}")]
    TooManyQubits {
        /// Requested register size.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Measurement needs at least one shot.
    #[error("invalid shot count {0}: must be greater than zero")]
    InvalidShots(usize),

    /// No template with this name in the catalogue.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Malformed program or result JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

impl SimError {
    /// Create a qubit range error.
    pub fn out_of_range(qubit: usize, num_qubits: usize) -> Self {
        Self::QubitOutOfRange { qubit, num_qubits }
    }

    /// Create an invalid operation error.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
