// src/validation/mod.rs

//! Consistency checks on `StateVector`.
//!
//! Unitary gates preserve the norm, so a failed check here points at a bug in
//! a kernel rather than something a caller can fix. States are never
//! renormalized to hide it.

use crate::core::{QlabError, Result, StateVector, NORM_TOLERANCE};
use tracing::warn;

/// Checks that Σ|a_i|² is 1 within `tolerance` (default `NORM_TOLERANCE`).
/// A NaN or infinite norm always fails.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QlabError::NumericalInstability)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm = state.norm_squared_sum();
    if !norm.is_finite() || (norm - 1.0).abs() > tolerance {
        warn!(norm, tolerance, num_qubits = state.num_qubits(), "state vector lost normalization");
        Err(QlabError::NumericalInstability { norm, tolerance })
    } else {
        Ok(())
    }
}

/// Checks that a list of qubit indices is non-empty, in range for a
/// `num_qubits` register and free of duplicates.
pub fn check_qubit_list(qubits: &[usize], num_qubits: usize) -> Result<()> {
    if qubits.is_empty() {
        return Err(QlabError::invalid_argument("qubit list is empty"));
    }
    let mut seen = vec![false; num_qubits];
    for &q in qubits {
        if q >= num_qubits {
            return Err(QlabError::invalid_argument(format!(
                "qubit {} out of range for {} qubits",
                q, num_qubits
            )));
        }
        if seen[q] {
            return Err(QlabError::invalid_argument(format!("qubit {} listed more than once", q)));
        }
        seen[q] = true;
    }
    Ok(())
}
