//! Inline wrapped sub-circuits.

use dsgwalk_ir::{Circuit, GateKind, Instruction, InstructionKind};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Replaces every composite gate by its body, recursively, remapped onto
/// the composite's operands.
pub struct UnrollComposites;

impl Pass for UnrollComposites {
    fn name(&self) -> &'static str {
        "UnrollComposites"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: Circuit, _properties: &mut PropertySet) -> CompileResult<Circuit> {
        let mut flat = Vec::with_capacity(circuit.instructions().len());
        for inst in circuit.instructions() {
            unroll_into(inst, &mut flat);
        }
        Ok(circuit.rebuilt(flat)?)
    }

    fn should_run(&self, circuit: &Circuit, _properties: &PropertySet) -> bool {
        circuit.instructions().iter().any(is_composite)
    }
}

fn is_composite(inst: &Instruction) -> bool {
    matches!(
        inst.as_gate().map(|g| &g.kind),
        Some(GateKind::Composite(_))
    )
}

fn unroll_into(inst: &Instruction, out: &mut Vec<Instruction>) {
    match &inst.kind {
        InstructionKind::Gate(gate) => match &gate.kind {
            GateKind::Composite(composite) => {
                for inner in &composite.body {
                    unroll_into(&inner.remapped(&inst.qubits), out);
                }
            }
            _ => out.push(inst.clone()),
        },
        _ => out.push(inst.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsgwalk_ir::QubitId;

    #[test]
    fn test_skipped_without_composites() {
        let pair = Circuit::with_size("pair", 2, 0)
            .rxx(0.3, QubitId(0), QubitId(1))
            .unwrap()
            .rzz(0.3, QubitId(0), QubitId(1))
            .unwrap();
        assert!(!UnrollComposites.should_run(&pair, &PropertySet::new()));
    }

    #[test]
    fn test_nested_composites_are_flattened() {
        let inner = Circuit::with_size("inner", 2, 0)
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let outer = Circuit::with_size("outer", 3, 0)
            .x(QubitId(2))
            .unwrap()
            .compose_wrapped(&inner, &[QubitId(2), QubitId(0)])
            .unwrap();
        let circuit = Circuit::with_size("top", 3, 0)
            .compose_wrapped(&outer, &[QubitId(1), QubitId(2), QubitId(0)])
            .unwrap();

        let mut props = PropertySet::new();
        assert!(UnrollComposites.should_run(&circuit, &props));
        let flat = UnrollComposites.run(circuit, &mut props).unwrap();

        let ops: Vec<_> = flat
            .instructions()
            .iter()
            .map(|i| (i.name().to_string(), i.qubits.clone()))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("x".to_string(), vec![QubitId(0)]),
                ("cx".to_string(), vec![QubitId(0), QubitId(1)]),
            ]
        );
    }
}
