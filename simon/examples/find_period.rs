//! Recover a hidden period and print what the simulator saw
//!
//! ```text
//! RUST_LOG=simon=debug cargo run --example find_period -- 1111 8
//! ```

use simon::{describe, simulate_simon_with, SimonError, SimulatorConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let period = args.next().unwrap_or_else(|| "111".to_string());
    let num_qubits = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2 * period.len());

    let info = describe();
    println!("{} ({}, {})", info.name, info.inventor, info.year);
    println!("  {}", info.complexity);
    println!();

    match simulate_simon_with(&period, num_qubits, SimulatorConfig::default()) {
        Ok(outcome) => {
            println!("Hidden period:    {}", outcome.hidden_period);
            println!("Recovered period: {}", outcome.recovered_period);
            println!("Circuit depth:    {}", outcome.circuit.depth);
            println!("Equations:");
            for eq in &outcome.equations {
                println!("  {}", eq);
            }
            println!("Counts:");
            for (bits, count) in &outcome.measurement_counts {
                println!("  |{}⟩: {}", bits, count);
            }
            if outcome.degraded {
                println!("WARNING: degraded simulation ({:?})", outcome.degradation);
            }
        }
        Err(SimonError::DegenerateOracle(report)) => {
            println!("No unique period: {}", report);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
