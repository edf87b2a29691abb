//! Integration tests for the statevector simulator.

use dsgwalk_adapter_sim::{Simulator, circuit_unitary};
use dsgwalk_ir::{Circuit, CustomGate, QubitId};
use num_complex::Complex64;
use proptest::prelude::*;

fn random_circuit(angles: &[(f64, f64, f64)]) -> Circuit {
    let mut circuit = Circuit::with_size("random", 3, 3);
    for (i, &(a, b, c)) in angles.iter().enumerate() {
        let q = QubitId((i % 3) as u32);
        let next = QubitId(((i + 1) % 3) as u32);
        circuit = circuit
            .u(a, b, c, q)
            .unwrap()
            .rxx(b, q, next)
            .unwrap()
            .cx(next, q)
            .unwrap();
    }
    circuit.measure_all().unwrap()
}

proptest! {
    #[test]
    fn prop_probabilities_normalized(
        angles in prop::collection::vec((-3.2f64..3.2, -3.2f64..3.2, -3.2f64..3.2), 1..8)
    ) {
        let probs = Simulator::new().probabilities(&random_circuit(&angles)).unwrap();
        let total: f64 = probs.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn prop_unitary_columns_orthonormal(
        angles in prop::collection::vec((-3.2f64..3.2, -3.2f64..3.2, -3.2f64..3.2), 1..5)
    ) {
        let u = circuit_unitary(&random_circuit(&angles)).unwrap();
        let gram = u.t().mapv(|z| z.conj()).dot(&u);
        for ((r, c), v) in gram.indexed_iter() {
            let expected = if r == c { 1.0 } else { 0.0 };
            prop_assert!((v - Complex64::new(expected, 0.0)).norm() < 1e-9);
        }
    }
}

#[test]
fn test_custom_gate_unitary_is_its_matrix() {
    let (c, s) = (0.6_f64, 0.8_f64);
    let matrix = vec![
        Complex64::new(c, 0.0),
        Complex64::new(0.0, -s),
        Complex64::new(0.0, -s),
        Complex64::new(c, 0.0),
    ];
    let gate = CustomGate::new("blk", 1, matrix.clone()).unwrap();
    let circuit = Circuit::with_size("one", 1, 0)
        .append(gate, [QubitId(0)])
        .unwrap();
    let u = circuit_unitary(&circuit).unwrap();
    for r in 0..2 {
        for col in 0..2 {
            assert!((u[[r, col]] - matrix[r * 2 + col]).norm() < 1e-12);
        }
    }
}

#[test]
fn test_histogram_close_to_exact() {
    let circuit = Circuit::with_size("skew", 1, 1)
        .ry(1.0, QubitId(0))
        .unwrap()
        .measure_all()
        .unwrap();
    let sim = Simulator::new();
    let p1 = sim.probabilities(&circuit).unwrap()[1];
    let counts = sim.run(&circuit, 20_000, Some(2024)).unwrap();
    let observed = counts.get("1") as f64 / 20_000.0;
    assert!((observed - p1).abs() < 0.02);
}
