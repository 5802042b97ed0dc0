//! Error handling logic

use thiserror::Error;

/// Errors raised while building, evolving, sampling or comparing circuits.
///
/// All errors are reported synchronously to the immediate caller. Nothing is
/// retried internally and no partial results are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QlabError {
    /// Malformed circuit, out-of-range qubit or classical bit, empty
    /// measurement set, or an unrecognized Pauli / Bell label.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the offending argument
        message: String,
    },

    /// Amplitude access beyond the bounds of the state vector.
    #[error("Index {index} out of range for state vector of length {len}")]
    OutOfRange {
        /// Requested amplitude index
        index: usize,
        /// Length of the amplitude vector (2^n)
        len: usize,
    },

    /// Unrecognized gate label or a target count that does not match the
    /// gate's arity.
    #[error("Invalid gate: {message}")]
    InvalidGate {
        /// Description of the gate failure
        message: String,
    },

    /// The normalization invariant was violated after applying a unitary.
    /// This signals a bug in the engine and is never silently corrected.
    #[error("Numerical instability: state norm {norm} deviates from 1 by more than {tolerance}")]
    NumericalInstability {
        /// Observed sum of squared magnitudes
        norm: f64,
        /// Tolerance that was exceeded
        tolerance: f64,
    },
}

impl QlabError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        QlabError::InvalidArgument { message: message.into() }
    }

    pub(crate) fn invalid_gate(message: impl Into<String>) -> Self {
        QlabError::InvalidGate { message: message.into() }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, QlabError>;
