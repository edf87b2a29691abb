//! Build command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use dsgwalk_ir::Circuit;
use dsgwalk_synth::build_circuit;

use crate::args::{Format, WalkArgs};

/// Execute the build command.
pub fn execute(walk: &WalkArgs, format: Format, output: Option<&str>) -> Result<()> {
    let config = walk.resolve()?;
    debug!(?config, "resolved walk configuration");

    let circuit = build_circuit(&config).context("Circuit synthesis failed")?;
    let content = render(&circuit, format)?;

    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
            println!(
                "{} Built {} ({} encoding, {} model)",
                style("✓").green().bold(),
                style(circuit.name()).cyan(),
                config.encoding,
                config.model
            );
            println!(
                "  {} qubits, {} ops, depth {}",
                circuit.num_qubits(),
                circuit.num_ops(),
                circuit.depth()
            );
            println!("  Output: {}", style(path).green());
        }
        None => print!("{content}"),
    }

    Ok(())
}

fn render(circuit: &Circuit, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(circuit.to_string()),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")?;
            json.push('\n');
            Ok(json)
        }
    }
}
