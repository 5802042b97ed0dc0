// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gates plus the measurement directives that map qubits to classical bits.
//!
//! Circuits are built incrementally through `CircuitBuilder`, which validates
//! every index at append time, and are immutable once built.

use crate::core::{QlabError, Result, MAX_QUBITS};
use crate::operations::{Gate, GateKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maps one measured qubit to the classical bit that records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub qubit: usize,
    pub clbit: usize,
}

/// An ordered sequence of gates on a fixed-size register, plus a measurement
/// map.
///
/// Measurements are recorded separately from the gate list. Evolution
/// ignores them; only sampling reads them.
#[derive(Clone, PartialEq, Serialize)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    gates: Vec<Gate>,
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Size of the classical register measurements may write to.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// The gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Measurement directives in the order they were added.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Measured qubits ordered by their classical bit index. Position `i` of
    /// the returned list is bit `i` of each sampled outcome (rightmost first).
    pub fn measured_qubits(&self) -> Vec<usize> {
        let mut sorted = self.measurements.clone();
        sorted.sort_by_key(|m| m.clbit);
        sorted.into_iter().map(|m| m.qubit).collect()
    }

    /// `true` if the circuit carries at least one measurement.
    pub fn has_measurements(&self) -> bool {
        !self.measurements.is_empty()
    }

    /// A copy of this circuit with all measurement directives removed.
    pub fn without_measurements(&self) -> Circuit {
        Circuit { measurements: Vec::new(), ..self.clone() }
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds `Circuit` instances by method chaining.
///
/// Every append checks its indices immediately and fails with
/// `InvalidArgument` rather than deferring the error to execution:
///
/// ```
/// use qlab::CircuitBuilder;
///
/// let circuit = CircuitBuilder::new(2)?
///     .h(0)?
///     .cx(0, 1)?
///     .measure_all()?
///     .build();
/// assert_eq!(circuit.len(), 2);
/// assert_eq!(circuit.measured_qubits(), vec![0, 1]);
/// # Ok::<(), qlab::QlabError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Starts a circuit on `num_qubits` qubits with a classical register of
    /// the same size.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_clbits(num_qubits, num_qubits)
    }

    /// Starts a circuit with an explicit classical register size.
    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Result<Self> {
        if num_qubits < 1 {
            return Err(QlabError::invalid_argument("a circuit needs at least one qubit"));
        }
        if num_qubits > MAX_QUBITS {
            return Err(QlabError::invalid_argument(format!(
                "{} qubits exceeds the supported maximum of {}",
                num_qubits, MAX_QUBITS
            )));
        }
        Ok(Self {
            circuit: Circuit {
                num_qubits,
                num_clbits,
                gates: Vec::new(),
                measurements: Vec::new(),
            },
        })
    }

    /// Number of qubits in the register being built.
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits
    }

    /// Appends a gate after checking its qubits against the register.
    pub fn add_gate(mut self, gate: Gate) -> Result<Self> {
        if gate.max_qubit() >= self.circuit.num_qubits {
            return Err(QlabError::invalid_argument(format!(
                "{} references qubit {} but the circuit has {} qubits",
                gate,
                gate.max_qubit(),
                self.circuit.num_qubits
            )));
        }
        self.circuit.gates.push(gate);
        Ok(self)
    }

    /// Appends several gates, stopping at the first invalid one.
    pub fn add_gates<I>(mut self, gates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self = self.add_gate(gate)?;
        }
        Ok(self)
    }

    fn single(self, kind: GateKind, target: usize) -> Result<Self> {
        self.add_gate(Gate::single(kind, target)?)
    }

    fn controlled(self, kind: GateKind, control: usize, target: usize) -> Result<Self> {
        self.add_gate(Gate::controlled(kind, control, target)?)
    }

    /// Appends a Hadamard on `q`.
    pub fn h(self, q: usize) -> Result<Self> {
        self.single(GateKind::H, q)
    }

    /// Hadamard on every listed qubit, in order.
    pub fn h_all(mut self, qubits: &[usize]) -> Result<Self> {
        for &q in qubits {
            self = self.h(q)?;
        }
        Ok(self)
    }

    /// Appends a Pauli X on `q`.
    pub fn x(self, q: usize) -> Result<Self> {
        self.single(GateKind::X, q)
    }

    /// Appends a Pauli Y on `q`.
    pub fn y(self, q: usize) -> Result<Self> {
        self.single(GateKind::Y, q)
    }

    /// Appends a Pauli Z on `q`.
    pub fn z(self, q: usize) -> Result<Self> {
        self.single(GateKind::Z, q)
    }

    /// Appends an S (phase π/2) on `q`.
    pub fn s(self, q: usize) -> Result<Self> {
        self.single(GateKind::S, q)
    }

    /// Appends an S† on `q`.
    pub fn sdg(self, q: usize) -> Result<Self> {
        self.single(GateKind::Sdg, q)
    }

    /// Appends a T (phase π/4) on `q`.
    pub fn t(self, q: usize) -> Result<Self> {
        self.single(GateKind::T, q)
    }

    /// Appends a phase rotation by `theta` on `q`.
    pub fn phase(self, theta: f64, q: usize) -> Result<Self> {
        self.single(GateKind::Phase(theta), q)
    }

    /// Appends an X rotation by `theta` on `q`.
    pub fn rx(self, theta: f64, q: usize) -> Result<Self> {
        self.single(GateKind::Rx(theta), q)
    }

    /// Appends a Y rotation by `theta` on `q`.
    pub fn ry(self, theta: f64, q: usize) -> Result<Self> {
        self.single(GateKind::Ry(theta), q)
    }

    /// Appends a Z rotation by `theta` on `q`.
    pub fn rz(self, theta: f64, q: usize) -> Result<Self> {
        self.single(GateKind::Rz(theta), q)
    }

    /// Appends a CNOT from `control` to `target`.
    pub fn cx(self, control: usize, target: usize) -> Result<Self> {
        self.controlled(GateKind::CNOT, control, target)
    }

    /// Appends a controlled Z.
    pub fn cz(self, control: usize, target: usize) -> Result<Self> {
        self.controlled(GateKind::CZ, control, target)
    }

    /// Appends a controlled Hadamard.
    pub fn ch(self, control: usize, target: usize) -> Result<Self> {
        self.controlled(GateKind::CH, control, target)
    }

    /// Appends a controlled Y rotation by `theta`.
    pub fn cry(self, theta: f64, control: usize, target: usize) -> Result<Self> {
        self.controlled(GateKind::CRy(theta), control, target)
    }

    /// Records that `qubit` is measured into classical bit `clbit`.
    ///
    /// # Errors
    /// `InvalidArgument` if either index is out of range, the qubit is
    /// already measured, or the classical bit is already written.
    pub fn measure(mut self, qubit: usize, clbit: usize) -> Result<Self> {
        let c = &self.circuit;
        if qubit >= c.num_qubits {
            return Err(QlabError::invalid_argument(format!(
                "cannot measure qubit {}: circuit has {} qubits",
                qubit, c.num_qubits
            )));
        }
        if clbit >= c.num_clbits {
            return Err(QlabError::invalid_argument(format!(
                "classical bit {} out of range for {} classical bits",
                clbit, c.num_clbits
            )));
        }
        if c.measurements.iter().any(|m| m.qubit == qubit) {
            return Err(QlabError::invalid_argument(format!("qubit {} is already measured", qubit)));
        }
        if c.measurements.iter().any(|m| m.clbit == clbit) {
            return Err(QlabError::invalid_argument(format!(
                "classical bit {} is already assigned",
                clbit
            )));
        }
        self.circuit.measurements.push(Measurement { qubit, clbit });
        Ok(self)
    }

    /// Measures qubit `i` into classical bit `i` for every qubit, growing the
    /// classical register if needed.
    pub fn measure_all(mut self) -> Result<Self> {
        let n = self.circuit.num_qubits;
        self.circuit.num_clbits = self.circuit.num_clbits.max(n);
        for q in 0..n {
            self = self.measure(q, q)?;
        }
        Ok(self)
    }

    /// Discards everything appended so far, keeping the register sizes.
    pub fn reset(mut self) -> Self {
        self.circuit.gates.clear();
        self.circuit.measurements.clear();
        self
    }

    /// Finalizes construction and returns the immutable `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_qubits = self.num_qubits;
        let has_meas = !self.measurements.is_empty();
        let num_cols = self.gates.len() + usize::from(has_meas);

        writeln!(
            f,
            "qlab::Circuit[{} gates on {} qubits, {} measured]",
            self.gates.len(),
            num_qubits,
            self.measurements.len()
        )?;
        if num_cols == 0 {
            return Ok(());
        }

        let max_label_width = format!("q{}", num_qubits - 1).len();
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // v_connect[r][t] is drawn between rows r and r + 1
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_cols]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_cols]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, gate) in self.gates.iter().enumerate() {
            let qubits = gate.qubits();
            if gate.kind().is_controlled() {
                let (ctrl, tgt) = (qubits[0], qubits[1]);
                op_grid[ctrl][t] = format_gate("@");
                op_grid[tgt][t] = format_gate(gate.kind().symbol());
                let r_min = ctrl.min(tgt);
                let r_max = ctrl.max(tgt);
                for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                    row_vec[t] = V_WIRE;
                }
            } else {
                op_grid[qubits[0]][t] = format_gate(gate.kind().symbol());
            }
        }
        if has_meas {
            let t = num_cols - 1;
            for m in &self.measurements {
                op_grid[m.qubit][t] = format_gate(&format!("M{}", m.clbit));
            }
        }

        for r in 0..num_qubits {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_cols {
                    let padding_needed = GATE_WIDTH - 1;
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
