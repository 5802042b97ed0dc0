//! Numerical constants shared by the engine, sampler and analysis helpers.

/// Tolerances and limits used across the simulator
pub mod qlab_constants {
    /// Allowed deviation of Σ|a_i|² from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Default fidelity tolerance when deciding circuit equivalence.
    pub const FIDELITY_TOLERANCE: f64 = 1e-6;
    /// Amplitudes with magnitude at or below this are hidden when printing.
    pub const DISPLAY_THRESHOLD: f64 = 1e-10;
    /// Largest register the dense state vector will allocate (2^30 amplitudes).
    pub const MAX_QUBITS: usize = 30;
    /// Qubit count at which gate kernels switch to rayon.
    pub const PARALLEL_THRESHOLD: usize = 14;
}
