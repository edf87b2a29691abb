//! Single-qubit gate merging.

use rustc_hash::FxHashMap;
use tracing::debug;

use dsgwalk_ir::{Circuit, Instruction, QubitId, StandardGate};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::Unitary2x2;

/// Merges consecutive single-qubit gates on the same qubit into one `u`
/// gate, dropping runs that multiply to the identity.
///
/// Any multi-qubit gate, barrier or measurement touching the qubit ends the
/// run.
pub struct Optimize1qGates {
    /// Runs whose product is identity within this tolerance are removed.
    tolerance: f64,
}

impl Default for Optimize1qGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimize1qGates {
    /// Create a new optimizer with the default tolerance.
    pub fn new() -> Self {
        Self { tolerance: 1e-10 }
    }

    fn flush(
        &self,
        qubit: QubitId,
        pending: &mut FxHashMap<QubitId, (Unitary2x2, usize)>,
        out: &mut Vec<Instruction>,
        merged: &mut usize,
    ) {
        let Some((unitary, run_len)) = pending.remove(&qubit) else {
            return;
        };
        let [a, b, c, d] = unitary.data;
        let is_identity =
            b.norm() < self.tolerance && c.norm() < self.tolerance && (a - d).norm() < self.tolerance;
        if is_identity {
            *merged += run_len;
            return;
        }
        let (theta, phi, lambda) = unitary.u_angles();
        out.push(Instruction::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ));
        *merged += run_len - 1;
    }
}

impl Pass for Optimize1qGates {
    fn name(&self) -> &'static str {
        "Optimize1qGates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        let mut pending: FxHashMap<QubitId, (Unitary2x2, usize)> = FxHashMap::default();
        let mut out = Vec::with_capacity(circuit.instructions().len());
        let mut merged = 0usize;

        for inst in circuit.instructions() {
            let single = inst
                .as_standard()
                .filter(|g| g.num_qubits() == 1)
                .and_then(Unitary2x2::from_standard);

            if let Some(matrix) = single {
                let entry = pending
                    .entry(inst.qubits[0])
                    .or_insert((Unitary2x2::identity(), 0));
                // Later gates multiply from the left.
                entry.0 = matrix * entry.0;
                entry.1 += 1;
                continue;
            }

            for &q in &inst.qubits {
                self.flush(q, &mut pending, &mut out, &mut merged);
            }
            out.push(inst.clone());
        }

        for q in circuit.qubits() {
            self.flush(q, &mut pending, &mut out, &mut merged);
        }

        debug!(merged, "merged single-qubit gates");
        properties.merged_gates += merged;
        Ok(circuit.rebuilt(out)?)
    }
}
