//! Basis translation to `u` + `cx`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use dsgwalk_ir::{Circuit, GateKind, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Basis translation pass.
///
/// Lowers every standard gate into `u` and `cx`. Equalities hold up to a
/// global phase. Matrix gates, controlled matrix gates and multi-controlled
/// X have no lowering and are rejected.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        let mut out = Vec::with_capacity(circuit.instructions().len() * 3);
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) if !basis.contains(gate.name()) => {
                    out.extend(translate_gate(inst, basis)?);
                }
                _ => out.push(inst.clone()),
            }
        }
        Ok(circuit.rebuilt(out)?)
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}

fn translate_gate(instruction: &Instruction, basis: &BasisGates) -> CompileResult<Vec<Instruction>> {
    let InstructionKind::Gate(gate) = &instruction.kind else {
        return Ok(vec![instruction.clone()]);
    };
    if !(basis.contains("u") && basis.contains("cx")) {
        return Err(CompileError::GateNotInBasis(gate.name().to_string()));
    }
    match &gate.kind {
        GateKind::Standard(std_gate) => translate_to_u_cx(std_gate, &instruction.qubits),
        _ => Err(CompileError::GateNotInBasis(gate.name().to_string())),
    }
}

fn u(theta: f64, phi: f64, lambda: f64, q: QubitId) -> Instruction {
    Instruction::single_qubit_gate(StandardGate::U(theta, phi, lambda), q)
}

fn cx(control: QubitId, target: QubitId) -> Instruction {
    Instruction::two_qubit_gate(StandardGate::CX, control, target)
}

fn rzz(theta: f64, a: QubitId, b: QubitId) -> Vec<Instruction> {
    vec![cx(a, b), u(0.0, 0.0, theta, b), cx(a, b)]
}

/// Lower a standard gate. `rxx` and `ryy` are `rzz` in a rotated frame.
fn translate_to_u_cx(gate: &StandardGate, qubits: &[QubitId]) -> CompileResult<Vec<Instruction>> {
    let q0 = qubits[0];
    let ops = match gate {
        StandardGate::I => vec![],
        StandardGate::X => vec![u(PI, 0.0, PI, q0)],
        StandardGate::H => vec![u(FRAC_PI_2, 0.0, PI, q0)],
        StandardGate::S => vec![u(0.0, 0.0, FRAC_PI_2, q0)],
        StandardGate::Sdg => vec![u(0.0, 0.0, -FRAC_PI_2, q0)],
        StandardGate::Rx(t) => vec![u(*t, -FRAC_PI_2, FRAC_PI_2, q0)],
        StandardGate::Ry(t) => vec![u(*t, 0.0, 0.0, q0)],
        StandardGate::Rz(t) | StandardGate::P(t) => vec![u(0.0, 0.0, *t, q0)],
        StandardGate::U(t, p, l) => vec![u(*t, *p, *l, q0)],
        StandardGate::CX => vec![cx(q0, qubits[1])],
        StandardGate::CRx(t) => {
            let tgt = qubits[1];
            vec![
                u(0.0, 0.0, FRAC_PI_2, tgt),
                cx(q0, tgt),
                u(-t / 2.0, 0.0, 0.0, tgt),
                cx(q0, tgt),
                u(t / 2.0, -FRAC_PI_2, 0.0, tgt),
            ]
        }
        StandardGate::RZZ(t) => rzz(*t, q0, qubits[1]),
        StandardGate::RXX(t) => {
            let q1 = qubits[1];
            let mut ops = vec![u(FRAC_PI_2, 0.0, PI, q0), u(FRAC_PI_2, 0.0, PI, q1)];
            ops.extend(rzz(*t, q0, q1));
            ops.extend([u(FRAC_PI_2, 0.0, PI, q0), u(FRAC_PI_2, 0.0, PI, q1)]);
            ops
        }
        StandardGate::RYY(t) => {
            let q1 = qubits[1];
            let into = |q| u(FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, q);
            let back = |q| u(-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, q);
            let mut ops = vec![into(q0), into(q1)];
            ops.extend(rzz(*t, q0, q1));
            ops.extend([back(q0), back(q1)]);
            ops
        }
        StandardGate::CCX => {
            let (c1, c2, t) = (q0, qubits[1], qubits[2]);
            let h = |q| u(FRAC_PI_2, 0.0, PI, q);
            let tg = |q| u(0.0, 0.0, FRAC_PI_4, q);
            let tdg = |q| u(0.0, 0.0, -FRAC_PI_4, q);
            vec![
                h(t),
                cx(c2, t),
                tdg(t),
                cx(c1, t),
                tg(t),
                cx(c2, t),
                tdg(t),
                cx(c1, t),
                tg(c2),
                tg(t),
                h(t),
                cx(c1, c2),
                tg(c1),
                tdg(c2),
                cx(c1, c2),
            ]
        }
        StandardGate::Mcx { .. } => {
            return Err(CompileError::GateNotInBasis(gate.name().to_string()));
        }
    };
    Ok(ops)
}
