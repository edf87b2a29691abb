//! Layer assembly: the synthesis entry point.

use tracing::{debug, info, instrument};

use dsgwalk_ir::{Circuit, QubitId};

use crate::config::{Encoding, WalkConfig};
use crate::error::SynthResult;
use crate::params::WalkParameters;
use crate::tessellation::unary::PairOperation;
use crate::tessellation::{Tessellation, compact, unary};

/// Synthesize the full walk circuit for `config`.
///
/// The result has one classical bit per qubit and ends with `measure(i, i)`
/// on every qubit. Nothing is returned unless the whole circuit could be
/// built.
#[instrument(skip_all, fields(encoding = %config.encoding, model = %config.model, layers = config.layers))]
pub fn build_circuit(config: &WalkConfig) -> SynthResult<Circuit> {
    config.validate()?;
    let params = WalkParameters::derive(config.time, config.layers)?;
    debug!(theta = params.theta, "derived layer parameters");

    let circuit = match config.encoding {
        Encoding::Unary => build_unary(config, &params)?,
        Encoding::Compact => build_compact(config, &params)?,
    };

    info!(
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        depth = circuit.depth(),
        "assembled walk circuit"
    );
    Ok(circuit)
}

fn circuit_name(config: &WalkConfig) -> String {
    format!("staggered_dsg{}_3t_{}", config.size_degree, config.encoding)
}

fn compose(circuit: Circuit, part: &Circuit, wrap: bool) -> SynthResult<Circuit> {
    let qubits: Vec<QubitId> = part.qubits().collect();
    if wrap {
        Ok(circuit.compose_wrapped(part, &qubits)?)
    } else {
        Ok(circuit.compose(part, &qubits)?)
    }
}

fn build_unary(config: &WalkConfig, params: &WalkParameters) -> SynthResult<Circuit> {
    let opts = config.options;
    let n = config.num_qubits();
    let operation = PairOperation::new(config.model, params, opts.decompose)?;

    // The interaction is the same in every layer, so the tessellations are
    // built once.
    let tessellations = Tessellation::ALL
        .iter()
        .map(|&t| unary::tessellation_circuit(config.size_degree, t, &operation, opts.barriers))
        .collect::<SynthResult<Vec<_>>>()?;

    let mut circuit = Circuit::with_size(circuit_name(config), n, n).x(QubitId(0))?;
    for _ in 0..config.layers {
        circuit = circuit.barrier_all()?;
        for part in &tessellations {
            circuit = compose(circuit, part, opts.wrap)?;
        }
    }
    if !opts.barriers {
        circuit = circuit.barrier_all()?;
    }
    Ok(circuit.measure_all()?)
}

fn build_compact(config: &WalkConfig, params: &WalkParameters) -> SynthResult<Circuit> {
    let opts = config.options;
    let n = config.num_qubits();
    let gate = config.model.controlled_gate(params)?;
    let parts = compact::layer_circuits(&gate)?;

    let mut circuit = Circuit::with_size(circuit_name(config), n, n);
    for _ in 0..config.layers {
        for (i, part) in parts.iter().enumerate() {
            circuit = compose(circuit, part, opts.wrap)?;
            let last = i + 1 == parts.len();
            if opts.barriers || last {
                circuit = circuit.barrier_all()?;
            }
        }
    }
    Ok(circuit.measure_all()?)
}
