//! End-to-end tests: assembled walk circuits executed on the statevector
//! simulator.

use dsgwalk_adapter_sim::{Simulator, Statevector, circuit_unitary, equal_up_to_global_phase};
use dsgwalk_ir::{Circuit, QubitId};
use dsgwalk_synth::tessellation::compact;
use dsgwalk_synth::{
    DsgGraph, Encoding, InteractionModel, NodeBasis, StructureOptions, SynthError, WalkConfig,
    WalkParameters, build_circuit,
};

const MODELS: [InteractionModel; 2] = [InteractionModel::Heisenberg, InteractionModel::Xy];

fn node_probabilities(config: &WalkConfig) -> Vec<f64> {
    let circuit = build_circuit(config).unwrap();
    let probs = Simulator::new().probabilities(&circuit).unwrap();
    let graph = DsgGraph::new(config.size_degree).unwrap();
    NodeBasis::new(&graph, config.encoding).node_probabilities(&probs)
}

fn assert_close(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() < tol, "node {i}: {x} vs {y}");
    }
}

// ---------------------------------------------------------------------------
// Circuit structure
// ---------------------------------------------------------------------------

#[test]
fn unary_end_to_end_shape() {
    let config = WalkConfig::new(Encoding::Unary, InteractionModel::Heisenberg);
    let circuit = build_circuit(&config).unwrap();
    assert_eq!(circuit.num_qubits(), 9);
    assert_eq!(circuit.num_clbits(), 9);

    let ops = circuit.count_ops();
    assert_eq!(ops.get("x"), Some(&1));
    let interactions: usize = ["Tessel-1", "Tessel-2", "Tessel-3"]
        .iter()
        .map(|name| ops.get(*name).copied().unwrap_or(0))
        .sum();
    assert_eq!(interactions, 12);
    assert_eq!(ops.get("measure"), Some(&9));

    for inst in circuit.instructions().iter().filter(|i| i.is_measure()) {
        assert_eq!(inst.qubits[0].0, inst.clbits[0].0);
    }
}

#[test]
fn compact_end_to_end_shape() {
    let config = WalkConfig::new(Encoding::Compact, InteractionModel::Heisenberg).with_options(
        StructureOptions {
            wrap: true,
            ..StructureOptions::default()
        },
    );
    let circuit = build_circuit(&config).unwrap();
    assert_eq!(circuit.num_qubits(), 4);
    assert_eq!(circuit.num_clbits(), 4);

    let ops = circuit.count_ops();
    for name in ["Tessel-1", "Tessel-2", "Tessel-3", "Permute-back"] {
        assert_eq!(ops.get(name), Some(&1), "{name}");
    }
    assert_eq!(ops.get("measure"), Some(&4));

    let inline = build_circuit(&WalkConfig::new(Encoding::Compact, InteractionModel::Heisenberg)).unwrap();
    // 11 + 13 + 19 + 14 gates, one barrier, four measurements.
    assert_eq!(inline.num_ops(), 57 + 4);
}

#[test]
fn unsupported_model_builds_nothing() {
    assert!(matches!(
        "Ising".parse::<InteractionModel>(),
        Err(SynthError::UnsupportedModel(_))
    ));
}

#[test]
fn compact_decompose_rejected() {
    let config = WalkConfig::new(Encoding::Compact, InteractionModel::Xy).with_options(StructureOptions {
        decompose: true,
        ..StructureOptions::default()
    });
    assert!(matches!(
        build_circuit(&config),
        Err(SynthError::UnsupportedOption { .. })
    ));
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

#[test]
fn full_period_returns_to_start() {
    for model in MODELS {
        for encoding in [Encoding::Unary, Encoding::Compact] {
            let probs = node_probabilities(&WalkConfig::new(encoding, model));
            assert!((probs[0] - 1.0).abs() < 1e-9, "{encoding} {model}");
        }
    }
}

#[test]
fn heisenberg_reference_distribution() {
    let config = WalkConfig::new(Encoding::Unary, InteractionModel::Heisenberg)
        .with_time(0.3)
        .with_layers(2);
    let expected = [0.0918, 0.344, 0.3014, 0.0883, 0.0056, 0.1363, 0.0055, 0.0213, 0.0058];
    assert_close(&node_probabilities(&config), &expected, 1e-3);
}

#[test]
fn encodings_agree() {
    for model in MODELS {
        for (time, layers) in [(0.3, 2), (0.77, 3), (1.4, 4)] {
            let unary = WalkConfig::new(Encoding::Unary, model)
                .with_time(time)
                .with_layers(layers);
            let compact = WalkConfig::new(Encoding::Compact, model)
                .with_time(time)
                .with_layers(layers);
            assert_close(&node_probabilities(&unary), &node_probabilities(&compact), 1e-9);
        }
    }
}

#[test]
fn probability_stays_on_node_states() {
    for model in MODELS {
        let probs = node_probabilities(
            &WalkConfig::new(Encoding::Compact, model)
                .with_time(2.3)
                .with_layers(5),
        );
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn sampled_counts_agree_across_encodings() {
    let shots = 20_000;
    let sim = Simulator::new();
    let graph = DsgGraph::new(2).unwrap();
    let mut dists = vec![];
    for encoding in [Encoding::Unary, Encoding::Compact] {
        let config = WalkConfig::new(encoding, InteractionModel::Heisenberg)
            .with_time(0.3)
            .with_layers(2);
        let counts = sim.run(&build_circuit(&config).unwrap(), shots, Some(99)).unwrap();
        let basis = NodeBasis::new(&graph, encoding);
        assert_eq!(basis.valid_shots(counts.iter()), u64::from(shots));
        dists.push(basis.node_distribution(counts.iter()));
    }
    assert_close(&dists[0], &dists[1], 0.03);
}

// ---------------------------------------------------------------------------
// Compact permutation network
// ---------------------------------------------------------------------------

fn compact_layer(theta: f64, model: InteractionModel) -> Circuit {
    let gate = model.controlled_gate(&WalkParameters::from_theta(theta)).unwrap();
    let qubits: Vec<QubitId> = (0..compact::COMPACT_QUBITS).map(QubitId).collect();
    compact::layer_circuits(&gate)
        .unwrap()
        .iter()
        .try_fold(Circuit::with_size("layer", compact::COMPACT_QUBITS, 0), |c, part| {
            c.compose(part, &qubits)
        })
        .unwrap()
}

#[test]
fn zero_angle_layer_is_identity_on_all_states() {
    for model in MODELS {
        let layer = compact_layer(0.0, model);
        for index in 0..16 {
            let mut sv = Statevector::basis(4, index);
            for inst in layer.instructions() {
                sv.apply(inst);
            }
            let probs = sv.probabilities();
            assert!((probs[index] - 1.0).abs() < 1e-12, "state {index} moved");
        }
    }
}

#[test]
fn scratch_states_empty_after_each_layer() {
    for model in MODELS {
        let layer = compact_layer(0.41, model);
        for node in 0..9 {
            let mut sv = Statevector::basis(4, node);
            for _ in 0..3 {
                for inst in layer.instructions() {
                    sv.apply(inst);
                }
                let leaked: f64 = sv.probabilities()[9..].iter().sum();
                assert!(leaked < 1e-12, "node {node} leaked {leaked}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

#[test]
fn decomposed_unary_matches_matrix_form() {
    for model in MODELS {
        let base = WalkConfig::new(Encoding::Unary, model)
            .with_size_degree(1)
            .with_time(0.6)
            .with_layers(2);
        let lowered = base.clone().with_options(StructureOptions {
            decompose: true,
            ..StructureOptions::default()
        });

        let a = build_circuit(&base).unwrap();
        let b = build_circuit(&lowered).unwrap();
        assert!(b.instructions().iter().all(|i| matches!(i.name(), "u" | "cx" | "x" | "barrier" | "measure")));
        assert!(equal_up_to_global_phase(
            &circuit_unitary(&a).unwrap(),
            &circuit_unitary(&b).unwrap(),
            1e-9
        ));
    }
}

#[test]
fn decomposed_unary_matches_matrix_form_over_time_sweep() {
    let lowered_options = StructureOptions {
        decompose: true,
        ..StructureOptions::default()
    };
    let mut mismatches = vec![];
    for model in MODELS {
        for step in -100..=100 {
            let time = f64::from(step) * 0.03;
            let base = WalkConfig::new(Encoding::Unary, model)
                .with_size_degree(1)
                .with_time(time);
            let lowered = base.clone().with_options(lowered_options);
            let a = circuit_unitary(&build_circuit(&base).unwrap()).unwrap();
            let b = circuit_unitary(&build_circuit(&lowered).unwrap()).unwrap();
            if !equal_up_to_global_phase(&a, &b, 1e-8) {
                mismatches.push((model, time));
            }
        }
    }
    assert!(mismatches.is_empty(), "mismatched at {mismatches:?}");
}

#[test]
fn decomposed_unary_degree_two_distribution() {
    for model in MODELS {
        let base = WalkConfig::new(Encoding::Unary, model).with_time(0.45).with_layers(2);
        let lowered = base.clone().with_options(StructureOptions {
            decompose: true,
            barriers: true,
            ..StructureOptions::default()
        });
        assert_close(&node_probabilities(&base), &node_probabilities(&lowered), 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Serialization and concurrency
// ---------------------------------------------------------------------------

#[test]
fn circuit_json_roundtrip_keeps_control_roles() {
    let config = WalkConfig::new(Encoding::Compact, InteractionModel::Heisenberg);
    let circuit = build_circuit(&config).unwrap();
    let json = serde_json::to_string(&circuit).unwrap();
    let back: Circuit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, circuit);

    let controlled = back.instructions().iter().find(|i| i.name() == "cU").unwrap();
    assert_eq!(controlled.qubits[0], QubitId(3));
}

#[test]
fn parallel_construction_is_deterministic() {
    let config = WalkConfig::new(Encoding::Unary, InteractionModel::Xy)
        .with_time(0.8)
        .with_layers(3);
    let reference = build_circuit(&config).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || build_circuit(&config).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}
