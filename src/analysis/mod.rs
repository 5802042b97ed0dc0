// src/analysis/mod.rs

//! State comparison and observable helpers.
//!
//! `compare_circuits` decides whether two circuits prepare the same state up
//! to global phase. `pauli_expectation` computes ⟨ψ|P|ψ⟩ for a Pauli string
//! by reusing the engine's X and Z kernels on a scratch copy of the state.

use crate::circuits::Circuit;
use crate::core::{QlabError, Result, StateVector, FIDELITY_TOLERANCE, NORM_TOLERANCE};
use crate::operations::GateKind;
use crate::simulation::{engine, Simulator};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Outcome of comparing two circuits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// `true` when `fidelity >= 1 - tolerance`.
    pub equivalent: bool,
    /// |⟨ψa|ψb⟩|², in [0, 1].
    pub fidelity: f64,
}

/// Fidelity |⟨a|b⟩|² between two states of the same size.
pub fn state_fidelity(a: &StateVector, b: &StateVector) -> Result<f64> {
    Ok(a.inner_product(b)?.norm_sqr().min(1.0))
}

/// Evolves both circuits with measurements stripped and compares the
/// resulting states.
///
/// `tolerance` defaults to `FIDELITY_TOLERANCE` (1e-6).
///
/// ```
/// use qlab::{CircuitBuilder, analysis::compare_circuits};
///
/// // H Z H is X
/// let hzh = CircuitBuilder::new(1)?.h(0)?.z(0)?.h(0)?.build();
/// let x = CircuitBuilder::new(1)?.x(0)?.build();
/// let cmp = compare_circuits(&hzh, &x, None)?;
/// assert!(cmp.equivalent);
/// # Ok::<(), qlab::QlabError>(())
/// ```
///
/// # Errors
/// `InvalidArgument` if the circuits act on different numbers of qubits.
pub fn compare_circuits(a: &Circuit, b: &Circuit, tolerance: Option<f64>) -> Result<Comparison> {
    compare_circuits_with(&Simulator::new(), a, b, tolerance)
}

/// `compare_circuits` using a caller-supplied simulator configuration.
pub fn compare_circuits_with(
    simulator: &Simulator,
    a: &Circuit,
    b: &Circuit,
    tolerance: Option<f64>,
) -> Result<Comparison> {
    if a.num_qubits() != b.num_qubits() {
        return Err(QlabError::invalid_argument(format!(
            "cannot compare a {}-qubit circuit with a {}-qubit circuit",
            a.num_qubits(),
            b.num_qubits()
        )));
    }
    let tolerance = tolerance.unwrap_or(FIDELITY_TOLERANCE);
    let state_a = simulator.evolve(&a.without_measurements())?;
    let state_b = simulator.evolve(&b.without_measurements())?;
    let fidelity = state_fidelity(&state_a, &state_b)?;
    debug!(fidelity, tolerance, "compared circuits");
    Ok(Comparison {
        equivalent: fidelity >= 1.0 - tolerance,
        fidelity,
    })
}

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Parses one of `I`, `X`, `Y`, `Z` (case-insensitive).
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(QlabError::invalid_argument(format!("'{}' is not a Pauli label", c))),
        }
    }

    /// Single-character label.
    pub fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// A tensor product of single-qubit Paulis. Position `i` acts on qubit `i`,
/// so `"XZ"` means X on qubit 0 and Z on qubit 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// Builds a string from per-qubit operators, qubit 0 first.
    pub fn new(paulis: Vec<Pauli>) -> Self {
        Self { paulis }
    }

    /// Number of qubits the string covers.
    pub fn len(&self) -> usize {
        self.paulis.len()
    }

    /// `true` if the string covers no qubits.
    pub fn is_empty(&self) -> bool {
        self.paulis.is_empty()
    }

    /// Operator acting on `qubit`.
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    /// The operators in qubit order.
    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }
}

impl FromStr for PauliString {
    type Err = QlabError;

    fn from_str(s: &str) -> Result<Self> {
        let paulis = s.chars().map(Pauli::from_char).collect::<Result<Vec<_>>>()?;
        Ok(Self { paulis })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.paulis {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

/// Expectation value ⟨ψ|P|ψ⟩ of a Pauli string.
///
/// X and Z are applied with the engine's gate kernels. Y is built as
/// Y = i·X·Z: apply Z, then X, then multiply the scratch state by i.
/// The inner product must be real with |value| ≤ 1 up to `NORM_TOLERANCE`;
/// the remaining rounding is clamped off so the result lies in [-1, 1].
///
/// # Errors
/// * `InvalidArgument` if the string length differs from the qubit count.
/// * `NumericalInstability` if the value has an imaginary part, falls
///   outside [-1, 1] beyond tolerance, or is NaN.
pub fn pauli_expectation(state: &StateVector, pauli: &PauliString) -> Result<f64> {
    if pauli.len() != state.num_qubits() {
        return Err(QlabError::invalid_argument(format!(
            "Pauli string '{}' has {} labels but the state has {} qubits",
            pauli,
            pauli.len(),
            state.num_qubits()
        )));
    }

    let mut scratch = state.clone();
    let mut y_count = 0usize;
    for (qubit, p) in pauli.paulis().iter().enumerate() {
        let amps = scratch.amplitudes_mut();
        match p {
            Pauli::I => {}
            Pauli::X => engine::apply_kind(amps, GateKind::X, &[qubit], false)?,
            Pauli::Z => engine::apply_kind(amps, GateKind::Z, &[qubit], false)?,
            Pauli::Y => {
                engine::apply_kind(amps, GateKind::Z, &[qubit], false)?;
                engine::apply_kind(amps, GateKind::X, &[qubit], false)?;
                y_count += 1;
            }
        }
    }
    // i^k for the k Y factors, applied once to the whole scratch state
    let factor = Complex::i().powu(y_count as u32);

    let value = state.inner_product(&scratch)? * factor;
    if !value.is_finite() || value.im.abs() > NORM_TOLERANCE || value.re.abs() - 1.0 > NORM_TOLERANCE {
        warn!(re = value.re, im = value.im, %pauli, "Pauli expectation is not a valid real value");
        return Err(QlabError::NumericalInstability {
            norm: value.norm(),
            tolerance: NORM_TOLERANCE,
        });
    }
    Ok(value.re.clamp(-1.0, 1.0))
}

/// Parses `pauli` and evaluates `pauli_expectation`.
pub fn pauli_expectation_str(state: &StateVector, pauli: &str) -> Result<f64> {
    pauli_expectation(state, &pauli.parse()?)
}
