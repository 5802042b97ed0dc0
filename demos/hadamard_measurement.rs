//! Single-qubit superposition: H then measure, sampled many times.
//!
//! Run with `RUST_LOG=qlab=debug` to see the simulator's tracing output.

use qlab::{CircuitBuilder, QlabError, Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QlabError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let circuit = CircuitBuilder::new(1)?.h(0)?.measure(0, 0)?.build();
    println!("{}", circuit);

    let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(7));
    let state = simulator.evolve(&circuit)?;
    println!("Final state:\n{}", state);

    let result = simulator.run(&circuit, 1000)?;
    println!("{}", result);
    for (outcome, count) in result.sorted_outcomes() {
        println!("  {} x{} (p ~ {:.3})", outcome, count, result.probability(outcome));
    }
    Ok(())
}
