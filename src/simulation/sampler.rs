// src/simulation/sampler.rs

//! Computational-basis sampling of a final state.
//!
//! The random source is injectable so tests can fix outcomes. The convenience
//! entry point creates a fresh `StdRng` per call: seeded when a seed is
//! given, from the OS otherwise. No generator is shared between calls.

use super::results::MeasurementResult;
use crate::core::{Result, StateVector};
use crate::validation::check_qubit_list;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Probability of each outcome over `qubits`, marginalizing all others.
///
/// The returned vector has 2^k entries for k measured qubits. Bit `i` of an
/// entry's index is the value of `qubits[i]`.
pub fn marginal_probabilities(state: &StateVector, qubits: &[usize]) -> Result<Vec<f64>> {
    check_qubit_list(qubits, state.num_qubits())?;

    let mut probs = vec![0.0; 1usize << qubits.len()];
    for (index, amp) in state.amplitudes().iter().enumerate() {
        let p = amp.norm_sqr();
        if p == 0.0 {
            continue;
        }
        probs[pack_outcome(index, qubits)] += p;
    }
    Ok(probs)
}

/// Extracts the bits of `index` selected by `qubits` into a packed outcome.
fn pack_outcome(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (bit, &q)| acc | (((index >> q) & 1) << bit))
}

/// Draws `shots` samples over `qubits` using the supplied generator.
///
/// Sampling inverts the cumulative distribution: one uniform draw per shot
/// is located in the running sum of outcome probabilities. Outcomes with
/// zero probability are never produced.
///
/// # Errors
/// `InvalidArgument` if `qubits` is empty, out of range or has duplicates.
pub fn sample_with_rng<R: Rng + ?Sized>(
    state: &StateVector,
    qubits: &[usize],
    shots: usize,
    rng: &mut R,
) -> Result<MeasurementResult> {
    let probs = marginal_probabilities(state, qubits)?;
    let mut result = MeasurementResult::new(qubits.len());
    if shots == 0 {
        return Ok(result);
    }

    let mut cumulative = Vec::with_capacity(probs.len());
    let mut running = 0.0;
    for p in &probs {
        running += p;
        cumulative.push(running);
    }
    let total = running;
    // Index of the last outcome that can actually occur, used when rounding
    // pushes a draw past the final bucket.
    let last_possible = probs.iter().rposition(|&p| p > 0.0).unwrap_or(0);

    for _ in 0..shots {
        let u = rng.random::<f64>() * total;
        let idx = cumulative.partition_point(|&c| c <= u).min(last_possible);
        result.record(idx);
    }

    debug!(shots, num_bits = qubits.len(), outcomes = result.counts().len(), "sampled state");
    Ok(result)
}

/// Draws `shots` samples over `qubits` with a per-call generator.
///
/// With `Some(seed)` the result is reproducible; with `None` the generator
/// is seeded from the operating system.
pub fn sample(
    state: &StateVector,
    qubits: &[usize],
    shots: usize,
    seed: Option<u64>,
) -> Result<MeasurementResult> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    sample_with_rng(state, qubits, shots, &mut rng)
}
