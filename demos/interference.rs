//! Interference patterns: HH returns to |0>, phases steer the outcome, and
//! CNOT acts only when its control is set.

use qlab::{CircuitBuilder, Circuit, QlabError, Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

const SHOTS: usize = 1024;

fn show(simulator: &Simulator, title: &str, circuit: &Circuit) -> Result<(), QlabError> {
    println!("--- {} ---", title);
    println!("{}", circuit);
    println!("{}", simulator.run(circuit, SHOTS)?);
    Ok(())
}

fn main() -> Result<(), QlabError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(3));

    let hh = CircuitBuilder::new(1)?.h(0)?.h(0)?.measure(0, 0)?.build();
    show(&simulator, "H H", &hh)?;

    let hzh = CircuitBuilder::new(1)?.h(0)?.z(0)?.h(0)?.measure(0, 0)?.build();
    show(&simulator, "H Z H", &hzh)?;

    let cz = CircuitBuilder::new(2)?
        .h_all(&[0, 1])?
        .cz(0, 1)?
        .h_all(&[0, 1])?
        .measure_all()?
        .build();
    show(&simulator, "H H CZ H H", &cz)?;

    let cnot = CircuitBuilder::new(2)?
        .cx(0, 1)?
        .x(0)?
        .cx(0, 1)?
        .measure_all()?
        .build();
    show(&simulator, "CNOT with control 0, then 1", &cnot)?;
    Ok(())
}
