// tests/property_tests.rs

use num_complex::Complex;
use proptest::prelude::*;
use qlab::analysis::pauli_expectation;
use qlab::{sample, CircuitBuilder, Gate, GateKind, Pauli, PauliString, Simulator, StateVector};

const NUM_QUBITS: usize = 4;

fn gate_kind() -> impl Strategy<Value = GateKind> {
    let angle = -10.0f64..10.0;
    prop_oneof![
        Just(GateKind::H),
        Just(GateKind::X),
        Just(GateKind::Y),
        Just(GateKind::Z),
        Just(GateKind::S),
        Just(GateKind::Sdg),
        Just(GateKind::T),
        Just(GateKind::Tdg),
        Just(GateKind::CNOT),
        Just(GateKind::CZ),
        Just(GateKind::CH),
        angle.clone().prop_map(GateKind::Phase),
        angle.clone().prop_map(GateKind::Rx),
        angle.clone().prop_map(GateKind::Ry),
        angle.clone().prop_map(GateKind::Rz),
        angle.prop_map(GateKind::CRy),
    ]
}

fn gate() -> impl Strategy<Value = Gate> {
    (gate_kind(), 0..NUM_QUBITS, 1..NUM_QUBITS).prop_filter_map(
        "control and target coincide",
        |(kind, a, offset)| {
            if kind.is_controlled() {
                Gate::controlled(kind, a, (a + offset) % NUM_QUBITS).ok()
            } else {
                Gate::single(kind, a).ok()
            }
        },
    )
}

fn pauli_string() -> impl Strategy<Value = PauliString> {
    prop::collection::vec(
        prop_oneof![Just(Pauli::I), Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)],
        NUM_QUBITS,
    )
    .prop_map(PauliString::new)
}

/// ⟨ψ|P|ψ⟩ summed directly over basis states: P|i⟩ = c_i |i ^ flips⟩.
fn direct_expectation(state: &StateVector, pauli: &PauliString) -> Complex<f64> {
    let amps = state.amplitudes();
    let mut total = Complex::new(0.0, 0.0);
    for (i, a) in amps.iter().enumerate() {
        let mut j = i;
        let mut coeff = Complex::new(1.0, 0.0);
        for (q, p) in pauli.paulis().iter().enumerate() {
            let bit = (i >> q) & 1;
            match p {
                Pauli::I => {}
                Pauli::X => j ^= 1 << q,
                Pauli::Z if bit == 1 => coeff = -coeff,
                Pauli::Z => {}
                Pauli::Y => {
                    j ^= 1 << q;
                    // Y|0> = i|1>, Y|1> = -i|0>
                    coeff *= if bit == 0 { Complex::i() } else { -Complex::i() };
                }
            }
        }
        total += amps[j].conj() * coeff * a;
    }
    total
}

proptest! {
    #[test]
    fn random_circuits_preserve_norm(gates in prop::collection::vec(gate(), 0..40)) {
        let circuit = CircuitBuilder::new(NUM_QUBITS).unwrap().add_gates(gates).unwrap().build();
        let state = Simulator::new().evolve(&circuit).unwrap();
        prop_assert!((state.norm_squared_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pauli_expectation_is_bounded(
        gates in prop::collection::vec(gate(), 0..30),
        pauli in pauli_string(),
    ) {
        let circuit = CircuitBuilder::new(NUM_QUBITS).unwrap().add_gates(gates).unwrap().build();
        let state = Simulator::new().evolve(&circuit).unwrap();
        let direct = direct_expectation(&state, &pauli);
        prop_assert!(direct.im.abs() < 1e-9, "<{}> has imaginary part {}", pauli, direct.im);
        prop_assert!(direct.re.abs() <= 1.0 + 1e-9, "<{}> = {}", pauli, direct.re);

        let value = pauli_expectation(&state, &pauli).unwrap();
        prop_assert!((value - direct.re).abs() < 1e-9, "<{}>: {} vs {}", pauli, value, direct.re);
        prop_assert!((-1.0..=1.0).contains(&value));
    }

    #[test]
    fn sample_counts_sum_to_shots(
        gates in prop::collection::vec(gate(), 0..20),
        shots in 0usize..500,
        seed in any::<u64>(),
    ) {
        let circuit = CircuitBuilder::new(NUM_QUBITS).unwrap().add_gates(gates).unwrap().build();
        let state = Simulator::new().evolve(&circuit).unwrap();
        let result = sample(&state, &[0, 1, 2, 3], shots, Some(seed)).unwrap();
        prop_assert_eq!(result.counts().values().sum::<usize>(), shots);
        for outcome in result.counts().keys() {
            prop_assert_eq!(outcome.len(), NUM_QUBITS);
            // Never sample an outcome with zero probability
            let index = usize::from_str_radix(outcome, 2).unwrap();
            prop_assert!(state.probability_of(index).unwrap() > 0.0);
        }
    }
}
