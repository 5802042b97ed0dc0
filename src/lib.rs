// src/lib.rs

//! `qlab` - a small statevector quantum circuit simulator
//!
//! Circuits are built with `CircuitBuilder`, evolved on an explicit vector of
//! 2^n complex amplitudes by `Simulator`, and sampled in the computational
//! basis. `analysis` compares circuits by state fidelity and evaluates Pauli
//! string expectation values; `states` prepares Bell, GHZ and W states.
//!
//! Bit ordering: qubit `q` is bit `q` of the amplitude index, and outcome
//! strings are written with qubit (classical bit) 0 rightmost.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod analysis;
pub mod states;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use self::core::{QlabError, Result, StateVector};
pub use operations::{Gate, GateKind};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{sample, sample_with_rng, MeasurementResult, Simulator, SimulatorConfig};
pub use analysis::{compare_circuits, pauli_expectation, Comparison, Pauli, PauliString};
pub use states::{bell_state, ghz_state, superposition_state, w_state, BellVariant};
pub use validation::check_normalization;

// Example 1: Hadamard measurement
// A single H gate followed by a measurement gives roughly even counts.
/// ```
/// use qlab::{CircuitBuilder, Simulator, SimulatorConfig, QlabError};
///
/// let circuit = CircuitBuilder::new(1)?
///     .h(0)?
///     .measure(0, 0)?
///     .build();
///
/// let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(1234));
/// let result = simulator.run(&circuit, 1000)?;
/// println!("{}", circuit);
/// println!("{}", result);
///
/// assert_eq!(result.shots(), 1000);
/// assert!(result.get("0") > 400 && result.get("0") < 600);
/// # Ok::<(), QlabError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Bell pair
// H then CNOT entangles the two qubits; only matching outcomes appear.
/// ```
/// use qlab::{bell_state, BellVariant, Simulator, QlabError, pauli_expectation};
///
/// let circuit = bell_state(BellVariant::PhiPlus)?.measure_all()?.build();
/// let simulator = Simulator::new();
///
/// let result = simulator.run(&circuit, 1000)?;
/// assert_eq!(result.get("01") + result.get("10"), 0);
/// assert_eq!(result.get("00") + result.get("11"), 1000);
///
/// let state = simulator.evolve(&circuit)?;
/// println!("{}", state);
/// let zz = pauli_expectation(&state, &"ZZ".parse()?)?;
/// assert!((zz - 1.0).abs() < 1e-9);
/// # Ok::<(), QlabError>(())
/// ```
#[doc(hidden)]
const _: () = ();
