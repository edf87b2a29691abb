//! High-level circuit builder.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: an ordered instruction list over a fixed-width
/// quantum register and classical register.
///
/// Builder methods consume the circuit and return the extended value, so a
/// circuit is never shared while it is being assembled:
///
/// ```rust
/// use dsgwalk_ir::{Circuit, QubitId};
///
/// let circuit = Circuit::with_size("bell", 2, 2)
///     .h(QubitId(0))?
///     .cx(QubitId(0), QubitId(1))?
///     .measure_all()?;
/// assert_eq!(circuit.num_ops(), 4);
/// # Ok::<(), dsgwalk_ir::IrError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with the given register widths.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// All qubits of the register in index order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        (0..self.num_qubits).map(QubitId)
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the circuit and return its instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Number of operations, barriers excluded.
    pub fn num_ops(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_barrier()).count()
    }

    /// Occurrences of each operation name, barriers included.
    pub fn count_ops(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Iterate over gate instructions only.
    pub fn gates(&self) -> impl Iterator<Item = (&Gate, &[QubitId])> {
        self.instructions
            .iter()
            .filter_map(|inst| inst.as_gate().map(|g| (g, inst.qubits.as_slice())))
    }

    /// Circuit depth: the longest chain of operations sharing a wire.
    ///
    /// Barriers do not add a layer but synchronize the wires they span.
    pub fn depth(&self) -> usize {
        let mut qfront = vec![0usize; self.num_qubits()];
        let mut cfront = vec![0usize; self.num_clbits()];
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qfront[q.index()])
                .chain(inst.clbits.iter().map(|c| cfront[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let next = if inst.is_barrier() { level } else { level + 1 };
            for q in &inst.qubits {
                qfront[q.index()] = next;
            }
            for c in &inst.clbits {
                cfront[c.0 as usize] = next;
            }
        }
        qfront.into_iter().chain(cfront).max().unwrap_or(0)
    }

    /// Append an instruction after validating its operands.
    pub fn apply(mut self, instruction: Instruction) -> IrResult<Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append an arbitrary gate on the given qubits.
    pub fn append(
        self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.as_gate().map(|g| g.name().to_string());

        if let Some(gate) = instruction.as_gate() {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound { clbit });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Standard gates
    // =========================================================================

    /// Apply an X gate.
    pub fn x(self, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply a Hadamard gate.
    pub fn h(self, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply an S gate.
    pub fn s(self, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply an S-dagger gate.
    pub fn sdg(self, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply an Rx rotation.
    pub fn rx(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply an Ry rotation.
    pub fn ry(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply an Rz rotation.
    pub fn rz(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply a phase gate.
    pub fn p(self, lambda: f64, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(lambda), qubit))
    }

    /// Apply a U(θ, φ, λ) gate.
    pub fn u(self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))
    }

    /// Apply a CNOT gate.
    pub fn cx(self, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply a controlled Rx rotation.
    pub fn crx(self, theta: f64, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRx(theta),
            control,
            target,
        ))
    }

    /// Apply an XX rotation.
    pub fn rxx(self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::RXX(theta), q1, q2))
    }

    /// Apply a YY rotation.
    pub fn ryy(self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::RYY(theta), q1, q2))
    }

    /// Apply a ZZ rotation.
    pub fn rzz(self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::RZZ(theta), q1, q2))
    }

    /// Apply a Toffoli gate.
    pub fn ccx(self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply an X on `target` controlled by every qubit in `controls`.
    ///
    /// One control emits `cx`, two emit `ccx`, more emit `mcx`.
    pub fn mcx(self, controls: &[QubitId], target: QubitId) -> IrResult<Self> {
        match controls {
            [] => self.x(target),
            [c] => self.cx(*c, target),
            [c1, c2] => self.ccx(*c1, *c2, target),
            _ => {
                let num_controls = controls.len() as u32;
                let operands = controls.iter().copied().chain(std::iter::once(target));
                self.apply(Instruction::gate(StandardGate::Mcx { num_controls }, operands))
            }
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Barrier over the given qubits.
    pub fn barrier(self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Barrier over the whole register.
    pub fn barrier_all(self) -> IrResult<Self> {
        let qubits: Vec<_> = self.qubits().collect();
        self.barrier(qubits)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(self, qubit: QubitId, clbit: ClbitId) -> IrResult<Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit `i` into classical bit `i`.
    pub fn measure_all(self) -> IrResult<Self> {
        (0..self.num_qubits).try_fold(self, |circuit, i| {
            circuit.measure(QubitId(i), ClbitId(i))
        })
    }

    /// Inline another circuit's instructions, mapping its qubit `i` onto
    /// `qubits[i]`.
    pub fn compose(self, other: &Circuit, qubits: &[QubitId]) -> IrResult<Self> {
        check_width(other, qubits)?;
        other
            .instructions
            .iter()
            .try_fold(self, |circuit, inst| circuit.apply(inst.remapped(qubits)))
    }

    /// Append another circuit as a single opaque gate named after it.
    pub fn compose_wrapped(self, other: &Circuit, qubits: &[QubitId]) -> IrResult<Self> {
        check_width(other, qubits)?;
        self.append(other.to_gate()?, qubits.iter().copied())
    }

    /// Convert a measurement-free circuit into a composite gate.
    pub fn to_gate(&self) -> IrResult<CompositeGate> {
        if self.instructions.iter().any(Instruction::is_measure) {
            return Err(IrError::NonUnitaryBody(self.name.clone()));
        }
        Ok(CompositeGate {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            body: self.instructions.clone(),
        })
    }

    /// Rebuild with the same registers and a new instruction list.
    ///
    /// Used by transformation passes; every instruction is re-validated.
    pub fn rebuilt(&self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<Self> {
        instructions
            .into_iter()
            .try_fold(Self::with_size(self.name.clone(), self.num_qubits, self.num_clbits), Circuit::apply)
    }
}

fn check_width(other: &Circuit, qubits: &[QubitId]) -> IrResult<()> {
    if qubits.len() != other.num_qubits() {
        return Err(IrError::QubitCountMismatch {
            gate_name: other.name.clone(),
            expected: other.num_qubits,
            got: qubits.len() as u32,
        });
    }
    Ok(())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} qubits, {} clbits, depth {})",
            self.name,
            self.num_qubits,
            self.num_clbits,
            self.depth()
        )?;
        for inst in &self.instructions {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if let Some(label) = &gate.label {
                    writeln!(f, "  {inst}  // {label}")?;
                    continue;
                }
            }
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_by_value() {
        let base = Circuit::with_size("base", 2, 2).h(QubitId(0)).unwrap();
        let extended = base.clone().cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(base.num_ops(), 1);
        assert_eq!(extended.num_ops(), 2);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let err = Circuit::with_size("c", 2, 0).x(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let err = Circuit::with_size("c", 2, 0)
            .cx(QubitId(1), QubitId(1))
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_measure_requires_clbit() {
        let err = Circuit::with_size("c", 2, 1).measure_all().unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { clbit: ClbitId(1) }));
    }

    #[test]
    fn test_mcx_dispatch() {
        let c = Circuit::with_size("c", 4, 0)
            .mcx(&[QubitId(0)], QubitId(1))
            .unwrap()
            .mcx(&[QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3))
            .unwrap();
        let names: Vec<_> = c.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["cx", "ccx", "mcx"]);
        assert_eq!(c.instructions()[2].qubits.last(), Some(&QubitId(3)));
    }

    #[test]
    fn test_depth_ignores_barriers() {
        let c = Circuit::with_size("c", 2, 0)
            .h(QubitId(0))
            .unwrap()
            .barrier_all()
            .unwrap()
            .h(QubitId(1))
            .unwrap();
        // The barrier pushes h(q1) after h(q0).
        assert_eq!(c.depth(), 2);
        assert_eq!(c.num_ops(), 2);
    }

    #[test]
    fn test_compose_remaps() {
        let sub = Circuit::with_size("sub", 2, 0)
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let c = Circuit::with_size("c", 3, 0)
            .compose(&sub, &[QubitId(2), QubitId(0)])
            .unwrap();
        assert_eq!(c.instructions()[0].qubits, vec![QubitId(2), QubitId(0)]);
    }

    #[test]
    fn test_compose_wrapped_is_one_gate() {
        let sub = Circuit::with_size("Tessel-1", 2, 0)
            .x(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let c = Circuit::with_size("c", 2, 0)
            .compose_wrapped(&sub, &[QubitId(0), QubitId(1)])
            .unwrap();
        assert_eq!(c.num_ops(), 1);
        assert_eq!(c.instructions()[0].name(), "Tessel-1");
    }

    #[test]
    fn test_compose_width_mismatch() {
        let sub = Circuit::with_size("sub", 2, 0);
        let err = Circuit::with_size("c", 3, 0)
            .compose(&sub, &[QubitId(0)])
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_wrapping_measured_circuit_fails() {
        let sub = Circuit::with_size("m", 1, 1).measure_all().unwrap();
        assert!(matches!(sub.to_gate(), Err(IrError::NonUnitaryBody(_))));
    }

    #[test]
    fn test_count_ops() {
        let c = Circuit::with_size("c", 2, 2)
            .x(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();
        let ops = c.count_ops();
        assert_eq!(ops["x"], 2);
        assert_eq!(ops["measure"], 2);
    }
}
