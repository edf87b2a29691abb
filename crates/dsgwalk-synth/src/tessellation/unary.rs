//! Tessellations in the unary encoding (one qubit per node).
//!
//! Nodes are grouped into triples `{j, j+1, j+2}` for `j ≡ 0 (mod 3)`. Each
//! tessellation takes one edge inside every triple, rotating which edge as
//! the triple index grows, plus one bridging edge per block of nine nodes.

use dsgwalk_compile::{BasisGates, PassManagerBuilder};
use dsgwalk_ir::{Circuit, CustomGate, QubitId};
use rustc_hash::FxHashSet;
use tracing::debug;

use super::Tessellation;
use crate::error::{SynthError, SynthResult};
use crate::interaction::InteractionModel;
use crate::params::WalkParameters;

/// Recursion degrees whose pair pattern is known.
pub const SUPPORTED_DEGREES: std::ops::RangeInclusive<u32> = 1..=2;

/// Nodes in a DSG of the given degree.
pub fn node_count(size_degree: u32) -> usize {
    3usize.pow(size_degree)
}

pub(crate) fn check_degree(size_degree: u32) -> SynthResult<()> {
    if SUPPORTED_DEGREES.contains(&size_degree) {
        Ok(())
    } else {
        Err(SynthError::UnsupportedDegree {
            degree: size_degree,
            encoding: "unary",
        })
    }
}

/// The node pairs coupled by `tessellation`, intra-triple pairs first.
///
/// # Panics
///
/// Panics if a node appears in two pairs. That cannot happen for supported
/// degrees.
pub fn node_pairs(size_degree: u32, tessellation: Tessellation) -> SynthResult<Vec<(usize, usize)>> {
    check_degree(size_degree)?;
    let n = node_count(size_degree);

    let (c1, c2, bridge) = match tessellation {
        Tessellation::First => (0, 1, 7),
        Tessellation::Second => (2, 0, 1),
        Tessellation::Third => (1, 2, 4),
    };

    let mut pairs: Vec<(usize, usize)> = (0..n)
        .step_by(3)
        .map(|j| (j + (j / 3 + c1) % 3, j + (j / 3 + c2) % 3))
        .collect();

    // Bridges join neighbouring triples; a lone triple has none.
    if n >= 9 {
        pairs.extend((bridge..n).step_by(9).map(|j| (j, (j + n - 5) % n)));
    }

    let mut seen = FxHashSet::default();
    for &(a, b) in &pairs {
        assert!(
            seen.insert(a) && seen.insert(b),
            "{tessellation} couples node {a} or {b} twice"
        );
    }
    Ok(pairs)
}

/// The gate sequence applied to each node pair.
#[derive(Debug, Clone)]
pub enum PairOperation {
    /// The 4x4 interaction matrix as one gate.
    Matrix(CustomGate),
    /// The interaction lowered to `u` and `cx` on a two-qubit scratch circuit.
    Lowered(Circuit),
}

impl PairOperation {
    /// Build the pair operation for one layer.
    pub fn new(model: InteractionModel, params: &WalkParameters, decompose: bool) -> SynthResult<Self> {
        if !decompose {
            return Ok(Self::Matrix(model.two_node_gate(params)?));
        }

        let (xx, yy, zz) = model.exchange_angles(params);
        let (a, b) = (QubitId(0), QubitId(1));
        let mut pair = Circuit::with_size("interaction", 2, 0);
        if xx != 0.0 {
            pair = pair.rxx(xx, a, b)?;
        }
        if yy != 0.0 {
            pair = pair.ryy(yy, a, b)?;
        }
        if zz != 0.0 {
            pair = pair.rzz(zz, a, b)?;
        }

        let (pm, mut props) = PassManagerBuilder::new()
            .with_basis(BasisGates::u_cx())
            .build();
        let lowered = pm.run(pair, &mut props)?;
        debug!(ops = lowered.num_ops(), "lowered pair interaction");
        Ok(Self::Lowered(lowered))
    }

    fn apply(&self, circuit: Circuit, tessellation: Tessellation, a: usize, b: usize) -> SynthResult<Circuit> {
        let qubits = [QubitId::from(a), QubitId::from(b)];
        match self {
            Self::Matrix(gate) => Ok(circuit.append(gate.renamed(tessellation.label()), qubits)?),
            Self::Lowered(pair) => Ok(circuit.compose(pair, &qubits)?),
        }
    }
}

/// One tessellation over the full `N`-qubit register, named after it.
///
/// With `barriers`, a register-wide barrier follows every pair. These
/// barriers belong to the tessellation body, so when the tessellation is
/// later wrapped into one composite gate they sit inside it and only the
/// layer barriers remain visible in the outer circuit.
pub fn tessellation_circuit(
    size_degree: u32,
    tessellation: Tessellation,
    operation: &PairOperation,
    barriers: bool,
) -> SynthResult<Circuit> {
    let n = node_count(size_degree) as u32;
    let mut circuit = Circuit::with_size(tessellation.label(), n, 0);
    for (a, b) in node_pairs(size_degree, tessellation)? {
        circuit = operation.apply(circuit, tessellation, a, b)?;
        if barriers {
            circuit = circuit.barrier_all()?;
        }
    }
    Ok(circuit)
}
