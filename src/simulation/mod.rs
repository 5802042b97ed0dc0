// src/simulation/mod.rs

//! Evolves `Circuit`s on a dense state vector and samples the result.
//!
//! `Simulator` is the entry point. The gate kernels live in `engine` and the
//! sampling logic in `sampler`.

mod results;
pub(crate) mod engine;
pub mod sampler;

pub use results::MeasurementResult;
pub use sampler::{marginal_probabilities, sample, sample_with_rng};

use crate::circuits::Circuit;
use crate::core::constants::qlab_constants::PARALLEL_THRESHOLD;
use crate::core::{QlabError, Result, StateVector, NORM_TOLERANCE};
use crate::validation::check_normalization;
use tracing::{debug, trace};

/// Simulator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Allowed deviation of the state norm from 1 after each gate.
    ///
    /// Default: `NORM_TOLERANCE` (1e-9)
    pub norm_tolerance: f64,

    /// Qubit count at which gate kernels run on the rayon thread pool.
    ///
    /// Default: 14
    pub parallel_threshold: usize,

    /// Seed for `Simulator::run`. `None` seeds from the OS on every run.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Check the normalization invariant after every gate instead of only
    /// once at the end of evolution.
    ///
    /// Default: true
    pub validate_each_gate: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            norm_tolerance: NORM_TOLERANCE,
            parallel_threshold: PARALLEL_THRESHOLD,
            seed: None,
            validate_each_gate: true,
        }
    }
}

impl SimulatorConfig {
    /// Sets the sampling seed used by `Simulator::run`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the allowed norm deviation.
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Sets the qubit count at which kernels go parallel.
    pub fn with_parallel_threshold(mut self, qubits: usize) -> Self {
        self.parallel_threshold = qubits;
        self
    }

    /// Turns the per-gate norm check on or off.
    pub fn with_validate_each_gate(mut self, validate: bool) -> Self {
        self.validate_each_gate = validate;
        self
    }
}

/// Runs circuits. Holds configuration only, so one simulator can evolve
/// any number of circuits, including concurrently from several threads.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Simulator with the given settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// The active settings.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Applies every gate of `circuit` in order to a fresh |0…0⟩ state and
    /// returns the final state. Measurement directives are ignored.
    ///
    /// # Errors
    /// * `InvalidArgument` / `InvalidGate` for malformed gates.
    /// * `NumericalInstability` if the norm drifts beyond tolerance. No state
    ///   is returned in that case.
    pub fn evolve(&self, circuit: &Circuit) -> Result<StateVector> {
        let mut state = StateVector::new(circuit.num_qubits())?;
        let parallel = circuit.num_qubits() >= self.config.parallel_threshold;
        debug!(
            num_qubits = circuit.num_qubits(),
            gates = circuit.len(),
            parallel,
            "evolving circuit"
        );

        for (step, gate) in circuit.gates().iter().enumerate() {
            trace!(step, %gate, "applying gate");
            engine::apply_gate(&mut state, gate, parallel)?;
            if self.config.validate_each_gate {
                check_normalization(&state, Some(self.config.norm_tolerance))?;
            }
        }
        check_normalization(&state, Some(self.config.norm_tolerance))?;

        debug!(norm = state.norm_squared_sum(), "evolution finished");
        Ok(state)
    }

    /// Evolves `circuit` and samples its measured qubits `shots` times using
    /// the configured seed.
    ///
    /// # Errors
    /// `InvalidArgument` if the circuit has no measurements, plus anything
    /// `evolve` can return.
    pub fn run(&self, circuit: &Circuit, shots: usize) -> Result<MeasurementResult> {
        if !circuit.has_measurements() {
            return Err(QlabError::invalid_argument("circuit has no measurements to sample"));
        }
        let state = self.evolve(circuit)?;
        sample(&state, &circuit.measured_qubits(), shots, self.config.seed)
    }
}
