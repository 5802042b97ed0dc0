// src/states/mod.rs

//! Ready-made state preparation circuits: Bell pairs, GHZ, W and uniform
//! superpositions.
//!
//! Each function returns a `CircuitBuilder` so callers can keep appending
//! gates or measurements before building.

use crate::circuits::CircuitBuilder;
use crate::core::{QlabError, Result};
use std::fmt;
use std::str::FromStr;

/// The four maximally entangled two-qubit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BellVariant {
    /// |Φ+⟩ = (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// |Φ-⟩ = (|00⟩ - |11⟩)/√2
    PhiMinus,
    /// |Ψ+⟩ = (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// |Ψ-⟩ = (|01⟩ - |10⟩)/√2, up to global phase
    PsiMinus,
}

impl FromStr for BellVariant {
    type Err = QlabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "phi_plus" => Ok(BellVariant::PhiPlus),
            "phi_minus" => Ok(BellVariant::PhiMinus),
            "psi_plus" => Ok(BellVariant::PsiPlus),
            "psi_minus" => Ok(BellVariant::PsiMinus),
            _ => Err(QlabError::invalid_argument(format!("unknown Bell state variant: {}", s))),
        }
    }
}

impl fmt::Display for BellVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BellVariant::PhiPlus => "phi_plus",
            BellVariant::PhiMinus => "phi_minus",
            BellVariant::PsiPlus => "psi_plus",
            BellVariant::PsiMinus => "psi_minus",
        };
        write!(f, "{}", name)
    }
}

/// Two-qubit circuit preparing the given Bell state from |00⟩.
pub fn bell_state(variant: BellVariant) -> Result<CircuitBuilder> {
    let builder = CircuitBuilder::new(2)?.h(0)?;
    match variant {
        BellVariant::PhiPlus => builder.cx(0, 1),
        BellVariant::PhiMinus => builder.z(0)?.cx(0, 1),
        BellVariant::PsiPlus => builder.cx(0, 1)?.x(1),
        BellVariant::PsiMinus => builder.z(0)?.cx(0, 1)?.x(1),
    }
}

/// (|0…0⟩ + |1…1⟩)/√2 on `num_qubits` qubits: H on qubit 0 then a CNOT
/// fan-out from qubit 0.
pub fn ghz_state(num_qubits: usize) -> Result<CircuitBuilder> {
    if num_qubits < 2 {
        return Err(QlabError::invalid_argument("GHZ state requires at least 2 qubits"));
    }
    let mut builder = CircuitBuilder::new(num_qubits)?.h(0)?;
    for target in 1..num_qubits {
        builder = builder.cx(0, target)?;
    }
    Ok(builder)
}

/// Equal superposition of the `num_qubits` single-excitation basis states.
///
/// The excitation starts on qubit 0 and is handed down the chain: at step
/// `k` a CRy keeps it on qubit `k` with amplitude √(1/(n-k)) and moves the
/// rest to qubit `k+1`, after which a CNOT clears qubit `k`.
pub fn w_state(num_qubits: usize) -> Result<CircuitBuilder> {
    if num_qubits < 2 {
        return Err(QlabError::invalid_argument("W state requires at least 2 qubits"));
    }
    let mut builder = CircuitBuilder::new(num_qubits)?.x(0)?;
    for k in 0..num_qubits - 1 {
        let remaining = (num_qubits - k) as f64;
        let theta = 2.0 * (1.0 / remaining).sqrt().acos();
        builder = builder.cry(theta, k, k + 1)?.cx(k + 1, k)?;
    }
    Ok(builder)
}

/// H on every qubit: the uniform superposition over all 2^n basis states.
pub fn superposition_state(num_qubits: usize) -> Result<CircuitBuilder> {
    let qubits: Vec<usize> = (0..num_qubits).collect();
    CircuitBuilder::new(num_qubits)?.h_all(&qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bell_variants_amplitudes() -> Result<()> {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let cases = [
            (BellVariant::PhiPlus, [s, 0.0, 0.0, s]),
            (BellVariant::PhiMinus, [s, 0.0, 0.0, -s]),
            (BellVariant::PsiPlus, [0.0, s, s, 0.0]),
            // (|10> - |01>)/√2 in index order |q1 q0>
            (BellVariant::PsiMinus, [0.0, -s, s, 0.0]),
        ];
        let simulator = Simulator::new();
        for (variant, expected) in cases {
            let state = simulator.evolve(&bell_state(variant)?.build())?;
            for (i, e) in expected.iter().enumerate() {
                let amp = state.amplitude_at(i)?;
                assert_abs_diff_eq!(amp.re, *e, epsilon = 1e-12);
                assert_abs_diff_eq!(amp.im, 0.0, epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_parse_bell_variant() {
        assert_eq!("psi_minus".parse::<BellVariant>(), Ok(BellVariant::PsiMinus));
        assert!(matches!("phi".parse::<BellVariant>(), Err(QlabError::InvalidArgument { .. })));
        assert_eq!(BellVariant::PhiPlus.to_string(), "phi_plus");
    }

    #[test]
    fn test_w_state_has_uniform_single_excitations() -> Result<()> {
        for n in 2..=5 {
            let state = Simulator::new().evolve(&w_state(n)?.build())?;
            for index in 0..state.dim() {
                let p = state.probability_of(index)?;
                if index.count_ones() == 1 {
                    assert_abs_diff_eq!(p, 1.0 / n as f64, epsilon = 1e-9);
                } else {
                    assert_abs_diff_eq!(p, 0.0, epsilon = 1e-9);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_superposition_is_uniform() -> Result<()> {
        let state = Simulator::new().evolve(&superposition_state(3)?.build())?;
        for p in state.probabilities() {
            assert_abs_diff_eq!(p, 0.125, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_size_checks() {
        assert!(ghz_state(1).is_err());
        assert!(w_state(1).is_err());
        assert!(superposition_state(0).is_err());
    }
}
