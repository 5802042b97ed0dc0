// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{QlabError, Result};
pub use state::StateVector;

pub mod constants;
pub use constants::qlab_constants::{FIDELITY_TOLERANCE, MAX_QUBITS, NORM_TOLERANCE};
