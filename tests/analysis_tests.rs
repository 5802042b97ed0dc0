// tests/analysis_tests.rs

use qlab::analysis::{compare_circuits_with, pauli_expectation_str, state_fidelity};
use qlab::{
    compare_circuits, ghz_state, w_state, CircuitBuilder, QlabError, Simulator, SimulatorConfig,
};

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

#[test]
fn test_identical_circuits_are_equivalent() -> Result<(), QlabError> {
    let a = CircuitBuilder::new(3)?.h(0)?.cx(0, 1)?.t(2)?.build();
    let cmp = compare_circuits(&a, &a.clone(), None)?;
    assert!(cmp.equivalent);
    assert_abs_diff_eq!(cmp.fidelity, 1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_gate_identities() -> Result<(), QlabError> {
    // S S = Z
    let ss = CircuitBuilder::new(1)?.h(0)?.s(0)?.s(0)?.build();
    let z = CircuitBuilder::new(1)?.h(0)?.z(0)?.build();
    assert!(compare_circuits(&ss, &z, None)?.equivalent);

    // T T = S
    let tt = CircuitBuilder::new(1)?.h(0)?.t(0)?.t(0)?.build();
    let s = CircuitBuilder::new(1)?.h(0)?.s(0)?.build();
    assert!(compare_circuits(&tt, &s, None)?.equivalent);

    // CZ = (I ⊗ H) CNOT (I ⊗ H)
    let cz = CircuitBuilder::new(2)?.h_all(&[0, 1])?.cz(0, 1)?.build();
    let via_cx = CircuitBuilder::new(2)?.h_all(&[0, 1])?.h(1)?.cx(0, 1)?.h(1)?.build();
    assert!(compare_circuits(&cz, &via_cx, None)?.equivalent);

    // Rz(θ) equals Phase(θ) up to global phase
    let rz = CircuitBuilder::new(1)?.h(0)?.rz(0.7, 0)?.build();
    let p = CircuitBuilder::new(1)?.h(0)?.phase(0.7, 0)?.build();
    assert!(compare_circuits(&rz, &p, None)?.equivalent);
    Ok(())
}

#[test]
fn test_orthogonal_states() -> Result<(), QlabError> {
    let zero = CircuitBuilder::new(1)?.build();
    let one = CircuitBuilder::new(1)?.x(0)?.build();
    let cmp = compare_circuits(&zero, &one, None)?;
    assert!(!cmp.equivalent);
    assert_abs_diff_eq!(cmp.fidelity, 0.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_partial_overlap_fidelity() -> Result<(), QlabError> {
    // |<0|Ry(θ)|0>|² = cos²(θ/2)
    let theta = PI / 3.0;
    let zero = CircuitBuilder::new(1)?.build();
    let rotated = CircuitBuilder::new(1)?.ry(theta, 0)?.build();
    let cmp = compare_circuits(&zero, &rotated, None)?;
    assert_abs_diff_eq!(cmp.fidelity, (theta / 2.0).cos().powi(2), epsilon = 1e-12);
    assert!(!cmp.equivalent);

    // A loose enough tolerance accepts it
    let loose = compare_circuits(&zero, &rotated, Some(0.5))?;
    assert!(loose.equivalent);
    Ok(())
}

#[test]
fn test_comparison_ignores_measurements() -> Result<(), QlabError> {
    let measured = CircuitBuilder::new(2)?.h(0)?.cx(0, 1)?.measure_all()?.build();
    let bare = CircuitBuilder::new(2)?.h(0)?.cx(0, 1)?.build();
    assert!(compare_circuits(&measured, &bare, None)?.equivalent);
    Ok(())
}

#[test]
fn test_compare_with_configured_simulator() -> Result<(), QlabError> {
    let sim = Simulator::with_config(
        SimulatorConfig::default()
            .with_parallel_threshold(1)
            .with_validate_each_gate(false),
    );
    let a = ghz_state(4)?.build();
    let b = ghz_state(4)?.build();
    assert!(compare_circuits_with(&sim, &a, &b, None)?.equivalent);
    Ok(())
}

#[test]
fn test_ghz_and_w_are_distinguishable() -> Result<(), QlabError> {
    let sim = Simulator::new();
    let ghz = sim.evolve(&ghz_state(3)?.build())?;
    let w = sim.evolve(&w_state(3)?.build())?;
    assert_abs_diff_eq!(state_fidelity(&ghz, &w)?, 0.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_ghz_stabilizers() -> Result<(), QlabError> {
    let ghz = Simulator::new().evolve(&ghz_state(3)?.build())?;
    assert_abs_diff_eq!(pauli_expectation_str(&ghz, "XXX")?, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pauli_expectation_str(&ghz, "ZZI")?, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pauli_expectation_str(&ghz, "IZZ")?, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pauli_expectation_str(&ghz, "ZII")?, 0.0, epsilon = 1e-12);
    // Two Y factors contribute i² = -1
    assert_abs_diff_eq!(pauli_expectation_str(&ghz, "XYY")?, -1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_w_state_single_qubit_z() -> Result<(), QlabError> {
    // Each qubit is excited with probability 1/3: <Z> = 1 - 2/3
    let w = Simulator::new().evolve(&w_state(3)?.build())?;
    for label in ["ZII", "IZI", "IIZ"] {
        assert_abs_diff_eq!(pauli_expectation_str(&w, label)?, 1.0 / 3.0, epsilon = 1e-9);
    }
    Ok(())
}
