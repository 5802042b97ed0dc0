// src/core/state.rs

use super::constants::qlab_constants::{DISPLAY_THRESHOLD, MAX_QUBITS, NORM_TOLERANCE};
use super::error::{QlabError, Result};
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The joint state of `n` qubits as a vector of 2^n complex amplitudes.
///
/// Qubit `q` corresponds to bit `q` of the amplitude index, so qubit 0 is the
/// least significant bit. Basis labels are written with qubit 0 rightmost:
/// in a 2-qubit register index 1 is `|01⟩` (qubit 0 set) and index 2 is `|10⟩`.
///
/// The vector is normalized whenever it is observable from outside the crate.
/// Only the gate application engine mutates it.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates the all-zero basis state |0…0⟩ for `num_qubits` qubits.
    ///
    /// # Errors
    /// `InvalidArgument` if `num_qubits` is 0 or larger than `MAX_QUBITS`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dim = dimension_for(num_qubits)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self { num_qubits, amplitudes })
    }

    /// Builds a state from explicit amplitudes.
    ///
    /// The length must be a power of two (at least 2) and the vector must be
    /// normalized within `NORM_TOLERANCE`.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QlabError::invalid_argument(format!(
                "amplitude vector length {} is not a power of two >= 2",
                len
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        dimension_for(num_qubits)?;

        let state = Self { num_qubits, amplitudes };
        let norm = state.norm_squared_sum();
        if !norm.is_finite() || (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(QlabError::invalid_argument(format!(
                "amplitudes are not normalized: sum |a_i|^2 = {}",
                norm
            )));
        }
        Ok(state)
    }

    /// Number of qubits represented.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of all amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Returns the amplitude of basis state `index`.
    ///
    /// # Errors
    /// `OutOfRange` if `index >= 2^n`.
    pub fn amplitude_at(&self, index: usize) -> Result<Complex<f64>> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(QlabError::OutOfRange { index, len: self.amplitudes.len() })
    }

    /// Total probability Σ|a_i|².
    pub fn norm_squared_sum(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of every basis state, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Probability of a single basis state.
    pub fn probability_of(&self, index: usize) -> Result<f64> {
        Ok(self.amplitude_at(index)?.norm_sqr())
    }

    /// Inner product ⟨self|other⟩.
    ///
    /// # Errors
    /// `InvalidArgument` if the two states have different qubit counts.
    pub fn inner_product(&self, other: &StateVector) -> Result<Complex<f64>> {
        if self.num_qubits != other.num_qubits {
            return Err(QlabError::invalid_argument(format!(
                "cannot take inner product of {}-qubit and {}-qubit states",
                self.num_qubits, other.num_qubits
            )));
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Formats `index` as a basis label such as `|011⟩`.
    pub fn basis_label(&self, index: usize) -> String {
        format!("|{:0width$b}⟩", index, width = self.num_qubits)
    }
}

fn dimension_for(num_qubits: usize) -> Result<usize> {
    if num_qubits < 1 {
        return Err(QlabError::invalid_argument("a state vector needs at least one qubit"));
    }
    if num_qubits > MAX_QUBITS {
        return Err(QlabError::invalid_argument(format!(
            "{} qubits exceeds the supported maximum of {}",
            num_qubits, MAX_QUBITS
        )));
    }
    1usize
        .checked_shl(num_qubits as u32)
        .ok_or_else(|| QlabError::invalid_argument("state vector dimension overflows usize"))
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statevector ({} qubits):", self.num_qubits)?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let magnitude = amp.norm();
            if magnitude <= DISPLAY_THRESHOLD {
                continue;
            }
            let phase = amp.arg();
            if phase.abs() < DISPLAY_THRESHOLD {
                writeln!(f, "  {}: {:.4}", self.basis_label(i), magnitude)?;
            } else {
                writeln!(f, "  {}: {:.4} * e^(i*{:.4})", self.basis_label(i), magnitude, phase)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_initial_state_is_all_zero() -> Result<()> {
        let state = StateVector::new(3)?;
        assert_eq!(state.dim(), 8);
        assert_eq!(state.amplitude_at(0)?, Complex::new(1.0, 0.0));
        for i in 1..8 {
            assert_eq!(state.amplitude_at(i)?, Complex::zero());
        }
        assert_abs_diff_eq!(state.norm_squared_sum(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(StateVector::new(0), Err(QlabError::InvalidArgument { .. })));
        assert!(matches!(StateVector::new(MAX_QUBITS + 1), Err(QlabError::InvalidArgument { .. })));
    }

    #[test]
    fn test_amplitude_out_of_range() -> Result<()> {
        let state = StateVector::new(2)?;
        assert_eq!(state.amplitude_at(4), Err(QlabError::OutOfRange { index: 4, len: 4 }));
        Ok(())
    }

    #[test]
    fn test_from_amplitudes_validation() {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        assert!(StateVector::from_amplitudes(vec![h, h]).is_ok());
        assert!(StateVector::from_amplitudes(vec![h, h, h]).is_err());
        assert!(StateVector::from_amplitudes(vec![Complex::new(1.0, 0.0)]).is_err());
        assert!(StateVector::from_amplitudes(vec![h, Complex::zero()]).is_err());
        let nan = Complex::new(f64::NAN, 0.0);
        assert!(matches!(
            StateVector::from_amplitudes(vec![nan, Complex::zero()]),
            Err(QlabError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_inner_product_orthogonal() -> Result<()> {
        let zero = StateVector::new(1)?;
        let one = StateVector::from_amplitudes(vec![Complex::zero(), Complex::new(1.0, 0.0)])?;
        assert_abs_diff_eq!(zero.inner_product(&one)?.norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(one.inner_product(&one)?.re, 1.0, epsilon = 1e-12);
        assert!(zero.inner_product(&StateVector::new(2)?).is_err());
        Ok(())
    }

    #[test]
    fn test_display_lists_nonzero_amplitudes() -> Result<()> {
        let state = StateVector::from_amplitudes(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::zero(),
            Complex::zero(),
            Complex::new(-FRAC_1_SQRT_2, 0.0),
        ])?;
        let text = state.to_string();
        assert!(text.contains("|00⟩: 0.7071"));
        assert!(text.contains("|11⟩: 0.7071 * e^(i*3.1416)"));
        assert!(!text.contains("|01⟩"));
        Ok(())
    }
}
