//! Run command implementation.

use anyhow::{Context, Result};
use console::style;

use dsgwalk_adapter_sim::Simulator;
use dsgwalk_synth::{DsgGraph, NodeBasis, build_circuit};

use super::common::{print_counts, print_distribution};
use crate::args::WalkArgs;

/// Execute the run command.
pub fn execute(walk: &WalkArgs, shots: u32, seed: Option<u64>) -> Result<()> {
    let config = walk.resolve()?;

    println!(
        "{} Running {} walk ({} model, t = {}, {} layers)",
        style("→").cyan().bold(),
        style(config.encoding).green(),
        style(config.model).yellow(),
        config.time,
        config.layers
    );

    let circuit = build_circuit(&config).context("Circuit synthesis failed")?;
    println!(
        "  Circuit: {} qubits, depth {}",
        circuit.num_qubits(),
        circuit.depth()
    );

    let graph = DsgGraph::new(config.size_degree)?;
    let basis = NodeBasis::new(&graph, config.encoding);
    let sim = Simulator::new();

    let exact = sim
        .probabilities(&circuit)
        .context("Statevector simulation failed")?;
    print_distribution("Exact node distribution", &basis, &basis.node_probabilities(&exact));

    let counts = sim
        .run(&circuit, shots, seed)
        .context("Sampling failed")?;
    print_counts(&counts);

    let valid = basis.valid_shots(counts.iter());
    print_distribution(
        &format!("Sampled node distribution ({valid} valid shots)"),
        &basis,
        &basis.node_distribution(counts.iter()),
    );

    Ok(())
}
