// src/operations/mod.rs

//! Defines the closed set of gates the engine knows how to apply.
//!
//! A gate is a `GateKind` (what unitary) plus the ordered qubit indices it
//! acts on. Controlled kinds list the control first and the target second.

use crate::core::{QlabError, Result};
use num_complex::Complex;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

/// A 2×2 complex matrix in row-major order.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// The gate kinds supported by the simulator.
///
/// Parameterized kinds carry their angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard.
    H,
    /// Pauli X (bit flip).
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (phase flip).
    Z,
    /// Phase π/2.
    S,
    /// Phase -π/2.
    Sdg,
    /// Phase π/4.
    T,
    /// Phase -π/4.
    Tdg,
    /// Multiplies the |1⟩ amplitude by e^(iθ).
    Phase(f64),
    /// Rotation about X by θ.
    Rx(f64),
    /// Rotation about Y by θ.
    Ry(f64),
    /// Rotation about Z by θ.
    Rz(f64),
    /// Controlled X.
    CNOT,
    /// Controlled Z.
    CZ,
    /// Controlled Hadamard.
    CH,
    /// Controlled Ry(θ).
    CRy(f64),
}

impl GateKind {
    /// Number of qubits the gate acts on.
    pub fn arity(&self) -> usize {
        if self.is_controlled() { 2 } else { 1 }
    }

    /// `true` for the two-qubit controlled kinds.
    pub fn is_controlled(&self) -> bool {
        matches!(self, GateKind::CNOT | GateKind::CZ | GateKind::CH | GateKind::CRy(_))
    }

    /// For controlled kinds, the single-qubit kind applied to the target.
    pub fn target_kind(&self) -> Option<GateKind> {
        match self {
            GateKind::CNOT => Some(GateKind::X),
            GateKind::CZ => Some(GateKind::Z),
            GateKind::CH => Some(GateKind::H),
            GateKind::CRy(theta) => Some(GateKind::Ry(*theta)),
            _ => None,
        }
    }

    /// Short display symbol used by circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::Sdg => "S†",
            GateKind::T => "T",
            GateKind::Tdg => "T†",
            GateKind::Phase(_) => "P",
            GateKind::Rx(_) => "Rx",
            GateKind::Ry(_) => "Ry",
            GateKind::Rz(_) => "Rz",
            GateKind::CNOT => "X",
            GateKind::CZ => "Z",
            GateKind::CH => "H",
            GateKind::CRy(_) => "Ry",
        }
    }

    /// Rotation or phase angle of parameterized kinds.
    pub fn angle(&self) -> Option<f64> {
        match self {
            GateKind::Phase(t) | GateKind::Rx(t) | GateKind::Ry(t) | GateKind::Rz(t) | GateKind::CRy(t) => {
                Some(*t)
            }
            _ => None,
        }
    }

    /// If the single-qubit kind only rescales the |1⟩ amplitude, the factor
    /// applied to it.
    pub(crate) fn diagonal_phase(&self) -> Option<Complex<f64>> {
        let i = Complex::i();
        match self {
            GateKind::Z => Some(Complex::new(-1.0, 0.0)),
            GateKind::S => Some(i),
            GateKind::Sdg => Some(-i),
            GateKind::T => Some(Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
            GateKind::Tdg => Some(Complex::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
            GateKind::Phase(theta) => Some(Complex::from_polar(1.0, *theta)),
            _ => None,
        }
    }

    /// The 2×2 unitary of a single-qubit kind. Controlled kinds yield `None`.
    pub fn matrix(&self) -> Option<Matrix2> {
        let one = Complex::one();
        let zero = Complex::zero();
        let i = Complex::i();
        if let Some(phase) = self.diagonal_phase() {
            return Some([[one, zero], [zero, phase]]);
        }
        match self {
            GateKind::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                Some([[h, h], [h, -h]])
            }
            GateKind::X => Some([[zero, one], [one, zero]]),
            GateKind::Y => Some([[zero, -i], [i, zero]]),
            GateKind::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Some([[Complex::new(c, 0.0), -i * s], [-i * s, Complex::new(c, 0.0)]])
            }
            GateKind::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Some([
                    [Complex::new(c, 0.0), Complex::new(-s, 0.0)],
                    [Complex::new(s, 0.0), Complex::new(c, 0.0)],
                ])
            }
            GateKind::Rz(theta) => Some([
                [Complex::from_polar(1.0, -theta / 2.0), zero],
                [zero, Complex::from_polar(1.0, theta / 2.0)],
            ]),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Phase(t) => write!(f, "Phase({:.4})", t),
            GateKind::Rx(t) => write!(f, "Rx({:.4})", t),
            GateKind::Ry(t) => write!(f, "Ry({:.4})", t),
            GateKind::Rz(t) => write!(f, "Rz({:.4})", t),
            GateKind::CRy(t) => write!(f, "CRy({:.4})", t),
            GateKind::CNOT => write!(f, "CNOT"),
            GateKind::CZ => write!(f, "CZ"),
            GateKind::CH => write!(f, "CH"),
            other => write!(f, "{}", other.symbol()),
        }
    }
}

/// Parses the parameterless gate labels (case-insensitive), e.g. `h`, `cx`.
impl FromStr for GateKind {
    type Err = QlabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "s" => Ok(GateKind::S),
            "sdg" => Ok(GateKind::Sdg),
            "t" => Ok(GateKind::T),
            "tdg" => Ok(GateKind::Tdg),
            "cx" | "cnot" => Ok(GateKind::CNOT),
            "cz" => Ok(GateKind::CZ),
            "ch" => Ok(GateKind::CH),
            _ => Err(QlabError::invalid_gate(format!("gate label '{}' is not recognized", s))),
        }
    }
}

/// A gate bound to the qubits it acts on. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    kind: GateKind,
    qubits: Vec<usize>,
}

impl Gate {
    /// Creates a gate, checking the qubit count against the kind's arity.
    ///
    /// # Errors
    /// `InvalidGate` on an arity mismatch, a NaN or infinite angle, or when a
    /// controlled gate uses the same qubit as control and target.
    pub fn new(kind: GateKind, qubits: Vec<usize>) -> Result<Self> {
        if qubits.len() != kind.arity() {
            return Err(QlabError::invalid_gate(format!(
                "{} expects {} qubit(s), got {}",
                kind,
                kind.arity(),
                qubits.len()
            )));
        }
        if let Some(theta) = kind.angle().filter(|t| !t.is_finite()) {
            return Err(QlabError::invalid_gate(format!("{} has a non-finite angle {}", kind.symbol(), theta)));
        }
        if kind.is_controlled() && qubits[0] == qubits[1] {
            return Err(QlabError::invalid_gate(format!(
                "{} control and target must differ (both are {})",
                kind, qubits[0]
            )));
        }
        Ok(Self { kind, qubits })
    }

    /// Single-qubit gate on `target`.
    pub fn single(kind: GateKind, target: usize) -> Result<Self> {
        Self::new(kind, vec![target])
    }

    /// Controlled gate with `control` and `target`.
    pub fn controlled(kind: GateKind, control: usize, target: usize) -> Result<Self> {
        Self::new(kind, vec![control, target])
    }

    /// The gate kind.
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// The qubit indices, control first for controlled kinds.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Highest qubit index referenced.
    pub fn max_qubit(&self) -> usize {
        self.qubits.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(|q| q.to_string()).collect();
        write!(f, "{}({})", self.kind, qubits.join(", "))
    }
}
