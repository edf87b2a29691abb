//! End-to-end pipeline tests: lowered circuits must implement the same
//! unitary as their source, up to global phase.

use std::f64::consts::PI;

use dsgwalk_adapter_sim::{circuit_unitary, equal_up_to_global_phase};
use dsgwalk_compile::{BasisGates, CompileError, PassManagerBuilder, PropertySet};
use dsgwalk_ir::{Circuit, CustomGate, QubitId};
use num_complex::Complex64;
use proptest::prelude::*;

fn lower(circuit: Circuit) -> Result<Circuit, CompileError> {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_basis(BasisGates::u_cx())
        .build();
    pm.run(circuit, &mut props)
}

fn assert_equivalent(source: &Circuit) {
    let lowered = lower(source.clone()).unwrap();
    for inst in lowered.instructions() {
        assert!(
            matches!(inst.name(), "u" | "cx" | "barrier" | "measure"),
            "unexpected {} after lowering",
            inst.name()
        );
    }
    let a = circuit_unitary(source).unwrap();
    let b = circuit_unitary(&lowered).unwrap();
    assert!(
        equal_up_to_global_phase(&a, &b, 1e-9),
        "lowering changed the unitary of:\n{source}"
    );
}

fn q(i: u32) -> QubitId {
    QubitId(i)
}

#[test]
fn test_single_qubit_gates() {
    let circuit = Circuit::with_size("1q", 1, 0)
        .x(q(0))
        .unwrap()
        .h(q(0))
        .unwrap()
        .s(q(0))
        .unwrap()
        .rx(0.3, q(0))
        .unwrap()
        .sdg(q(0))
        .unwrap()
        .ry(-1.1, q(0))
        .unwrap()
        .rz(2.5, q(0))
        .unwrap()
        .p(0.7, q(0))
        .unwrap();
    assert_equivalent(&circuit);
}

#[test]
fn test_exchange_rotations() {
    for theta in [0.0, 0.4, -PI / 3.0, PI, 2.9] {
        let circuit = Circuit::with_size("xyz", 3, 0)
            .h(q(1))
            .unwrap()
            .rxx(theta, q(0), q(2))
            .unwrap()
            .ryy(theta, q(2), q(1))
            .unwrap()
            .rzz(theta, q(1), q(0))
            .unwrap();
        assert_equivalent(&circuit);
    }
}

#[test]
fn test_controlled_gates() {
    let circuit = Circuit::with_size("ctrl", 3, 0)
        .h(q(0))
        .unwrap()
        .h(q(1))
        .unwrap()
        .crx(1.3, q(0), q(2))
        .unwrap()
        .crx(-0.4, q(2), q(1))
        .unwrap()
        .ccx(q(2), q(0), q(1))
        .unwrap()
        .cx(q(1), q(0))
        .unwrap();
    assert_equivalent(&circuit);
}

#[test]
fn test_wrapped_subcircuit_is_unrolled() {
    let inner = Circuit::with_size("inner", 2, 0)
        .rxx(0.5, q(0), q(1))
        .unwrap()
        .crx(0.9, q(1), q(0))
        .unwrap();
    let middle = Circuit::with_size("middle", 3, 0)
        .compose_wrapped(&inner, &[q(2), q(0)])
        .unwrap()
        .ccx(q(0), q(1), q(2))
        .unwrap();
    let outer = Circuit::with_size("outer", 3, 0)
        .h(q(2))
        .unwrap()
        .compose_wrapped(&middle, &[q(1), q(2), q(0)])
        .unwrap()
        .compose_wrapped(&inner, &[q(1), q(2)])
        .unwrap();
    assert_equivalent(&outer);
}

#[test]
fn test_barriers_and_measurements_pass_through() {
    let circuit = Circuit::with_size("m", 2, 2)
        .h(q(0))
        .unwrap()
        .barrier_all()
        .unwrap()
        .cx(q(0), q(1))
        .unwrap()
        .measure_all()
        .unwrap();
    let lowered = lower(circuit).unwrap();
    let counts = lowered.count_ops();
    assert_eq!(counts.get("barrier"), Some(&1));
    assert_eq!(counts.get("measure"), Some(&2));
}

#[test]
fn test_matrix_gates_have_no_lowering() {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let gate = CustomGate::new("blk", 1, vec![zero, one, one, zero]).unwrap();
    let circuit = Circuit::with_size("m", 1, 0).append(gate, [q(0)]).unwrap();
    let err = lower(circuit).unwrap_err();
    assert!(matches!(err, CompileError::GateNotInBasis(name) if name == "blk"));
}

#[test]
fn test_mcx_has_no_lowering() {
    let circuit = Circuit::with_size("m", 4, 0)
        .mcx(&[q(0), q(1), q(2)], q(3))
        .unwrap();
    let err = lower(circuit).unwrap_err();
    assert!(matches!(err, CompileError::GateNotInBasis(name) if name == "mcx"));
}

#[test]
fn test_translation_without_basis_is_skipped() {
    let circuit = Circuit::with_size("h", 1, 0).h(q(0)).unwrap();
    let (pm, _) = PassManagerBuilder::new().build();
    let out = pm.run(circuit, &mut PropertySet::new()).unwrap();
    // Only the merge pass runs: the lone h becomes a u.
    assert_eq!(out.instructions()[0].name(), "u");
}

proptest! {
    #[test]
    fn prop_random_rotation_chains_preserved(
        angles in prop::collection::vec(-6.3f64..6.3, 1..10)
    ) {
        let mut circuit = Circuit::with_size("chain", 2, 0);
        for (i, &a) in angles.iter().enumerate() {
            let (x, y) = if i % 2 == 0 { (q(0), q(1)) } else { (q(1), q(0)) };
            circuit = match i % 4 {
                0 => circuit.rxx(a, x, y),
                1 => circuit.ryy(a, x, y),
                2 => circuit.rzz(a, x, y),
                _ => circuit.crx(a, x, y),
            }
            .unwrap();
            circuit = circuit.ry(a / 2.0, x).unwrap();
        }
        let lowered = lower(circuit.clone()).unwrap();
        let a = circuit_unitary(&circuit).unwrap();
        let b = circuit_unitary(&lowered).unwrap();
        prop_assert!(equal_up_to_global_phase(&a, &b, 1e-8));
    }
}
