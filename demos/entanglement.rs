//! Bell pairs, GHZ correlations in the Z and X bases, and a W state.

use qlab::analysis::pauli_expectation_str;
use qlab::{bell_state, ghz_state, w_state, BellVariant, QlabError, Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

const SHOTS: usize = 2048;

fn main() -> Result<(), QlabError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(11));

    println!("=== Bell states ===");
    for variant in [
        BellVariant::PhiPlus,
        BellVariant::PhiMinus,
        BellVariant::PsiPlus,
        BellVariant::PsiMinus,
    ] {
        let circuit = bell_state(variant)?.build();
        let state = simulator.evolve(&circuit)?;
        let measured = bell_state(variant)?.measure_all()?.build();
        let result = simulator.run(&measured, SHOTS)?;
        println!(
            "{}: <ZZ> = {:+.3}, <XX> = {:+.3}",
            variant,
            pauli_expectation_str(&state, "ZZ")?,
            pauli_expectation_str(&state, "XX")?
        );
        println!("{}", result);
    }

    println!("=== GHZ (3 qubits) ===");
    let z_basis = ghz_state(3)?.measure_all()?.build();
    println!("{}", z_basis);
    println!("Z basis: {}", simulator.run(&z_basis, SHOTS)?);

    // X basis: every outcome has even parity
    let x_basis = ghz_state(3)?.h_all(&[0, 1, 2])?.measure_all()?.build();
    println!("X basis: {}", simulator.run(&x_basis, SHOTS)?);

    println!("=== W (3 qubits) ===");
    let w = w_state(3)?.build();
    println!("{}", w);
    println!("{}", simulator.evolve(&w)?);
    let w_measured = w_state(3)?.measure_all()?.build();
    println!("{}", simulator.run(&w_measured, SHOTS)?);
    Ok(())
}
