// src/simulation/engine.rs

//! Gate application kernels.
//!
//! Every kernel works in place on the amplitude slice and touches each
//! amplitude pair exactly once. Nothing here ever materializes a 2^n × 2^n
//! matrix: a single-qubit gate costs O(2^n).

use crate::core::{QlabError, Result, StateVector};
use crate::operations::{Gate, GateKind, Matrix2};
use num_complex::Complex;
use rayon::prelude::*;

/// Applies `gate` to `state`.
///
/// `parallel` selects the rayon kernels; both paths produce identical
/// amplitudes. Qubit indices are checked against the state here since a
/// `Gate` on its own does not know the register size.
pub(crate) fn apply_gate(state: &mut StateVector, gate: &Gate, parallel: bool) -> Result<()> {
    let num_qubits = state.num_qubits();
    if let Some(&q) = gate.qubits().iter().find(|&&q| q >= num_qubits) {
        return Err(QlabError::invalid_argument(format!(
            "{} references qubit {} but the state has {} qubits",
            gate, q, num_qubits
        )));
    }
    apply_kind(state.amplitudes_mut(), gate.kind(), gate.qubits(), parallel)
}

/// Dispatches on the closed gate set. Shared with the Pauli expectation
/// helper, which reuses the X and Z kernels on a scratch state.
pub(crate) fn apply_kind(
    amps: &mut [Complex<f64>],
    kind: GateKind,
    qubits: &[usize],
    parallel: bool,
) -> Result<()> {
    if qubits.len() != kind.arity() {
        return Err(QlabError::invalid_gate(format!(
            "{} expects {} qubit(s), got {}",
            kind,
            kind.arity(),
            qubits.len()
        )));
    }

    if let Some(target_kind) = kind.target_kind() {
        let (control, target) = (qubits[0], qubits[1]);
        if control == target {
            return Err(QlabError::invalid_gate(format!(
                "{} control and target must differ (both are {})",
                kind, control
            )));
        }
        let matrix = single_qubit_matrix(target_kind)?;
        apply_controlled(amps, control, target, &matrix, parallel);
        return Ok(());
    }

    let target = qubits[0];
    if let Some(phase) = kind.diagonal_phase() {
        apply_phase(amps, target, phase, parallel);
    } else {
        let matrix = single_qubit_matrix(kind)?;
        apply_single(amps, target, &matrix, parallel);
    }
    Ok(())
}

fn single_qubit_matrix(kind: GateKind) -> Result<Matrix2> {
    kind.matrix()
        .ok_or_else(|| QlabError::invalid_gate(format!("{} has no single-qubit matrix", kind)))
}

/// Applies a 2×2 matrix to every pair of amplitudes differing only in bit
/// `target`. Pairs live inside aligned blocks of `2 * stride` amplitudes, so
/// blocks are disjoint and can be handed to separate threads.
pub(crate) fn apply_single(amps: &mut [Complex<f64>], target: usize, matrix: &Matrix2, parallel: bool) {
    let stride = 1usize << target;
    let block = stride * 2;

    let kernel = |chunk: &mut [Complex<f64>]| {
        for j in 0..stride {
            let a = chunk[j];
            let b = chunk[j + stride];
            chunk[j] = matrix[0][0] * a + matrix[0][1] * b;
            chunk[j + stride] = matrix[1][0] * a + matrix[1][1] * b;
        }
    };

    if parallel {
        amps.par_chunks_mut(block).for_each(kernel);
    } else {
        amps.chunks_mut(block).for_each(kernel);
    }
}

/// Same pairing as `apply_single`, restricted to pairs whose control bit is 1.
/// Pairs with the control bit 0 are left untouched.
pub(crate) fn apply_controlled(
    amps: &mut [Complex<f64>],
    control: usize,
    target: usize,
    matrix: &Matrix2,
    parallel: bool,
) {
    let control_mask = 1usize << control;
    let stride = 1usize << target;
    let block = stride * 2;

    let kernel = |(chunk_idx, chunk): (usize, &mut [Complex<f64>])| {
        let base = chunk_idx * block;
        for j in 0..stride {
            if (base + j) & control_mask == 0 {
                continue;
            }
            let a = chunk[j];
            let b = chunk[j + stride];
            chunk[j] = matrix[0][0] * a + matrix[0][1] * b;
            chunk[j + stride] = matrix[1][0] * a + matrix[1][1] * b;
        }
    };

    if parallel {
        amps.par_chunks_mut(block).enumerate().for_each(kernel);
    } else {
        amps.chunks_mut(block).enumerate().for_each(kernel);
    }
}

/// Multiplies every amplitude whose `target` bit is 1 by `phase`.
pub(crate) fn apply_phase(amps: &mut [Complex<f64>], target: usize, phase: Complex<f64>, parallel: bool) {
    let mask = 1usize << target;
    let kernel = |(i, amp): (usize, &mut Complex<f64>)| {
        if i & mask != 0 {
            *amp *= phase;
        }
    };

    if parallel {
        amps.par_iter_mut().enumerate().for_each(kernel);
    } else {
        amps.iter_mut().enumerate().for_each(kernel);
    }
}
