//! Circuit execution on the statevector engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Instant;
use tracing::{debug, instrument};

use dsgwalk_ir::{Circuit, InstructionKind, QubitId};

use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Local statevector simulator.
///
/// Supports circuits up to ~20 qubits (limited by memory). Measurements must
/// be terminal: once a qubit is measured no further gate may touch it.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Maximum number of qubits supported.
    max_qubits: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a simulator with the default qubit limit.
    pub fn new() -> Self {
        Self { max_qubits: 20 }
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    /// The largest circuit this simulator accepts.
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Evolve `|0…0⟩` through every gate of `circuit`.
    #[instrument(skip_all, fields(circuit = circuit.name()))]
    pub fn run_exact(&self, circuit: &Circuit) -> SimResult<Statevector> {
        if circuit.num_qubits() > self.max_qubits {
            return Err(SimError::CircuitTooLarge {
                got: circuit.num_qubits(),
                max: self.max_qubits,
            });
        }

        let mut sv = Statevector::new(circuit.num_qubits());
        let mut measured: FxHashSet<QubitId> = FxHashSet::default();

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
                InstructionKind::Barrier => {}
                InstructionKind::Gate(_) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured.contains(q)) {
                        return Err(SimError::MidCircuitMeasurement(q.0));
                    }
                    sv.apply(inst);
                }
            }
        }

        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            "statevector evolved"
        );
        Ok(sv)
    }

    /// Exact outcome probabilities indexed by computational basis state.
    pub fn probabilities(&self, circuit: &Circuit) -> SimResult<Vec<f64>> {
        Ok(self.run_exact(circuit)?.probabilities())
    }

    /// Sample `shots` measurement outcomes using `rng`.
    ///
    /// Bitstrings range over the classical register with clbit 0 rightmost.
    /// A circuit without classical bits is read out over all qubits.
    pub fn sample_counts<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<Counts> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }
        let start = Instant::now();
        let sv = self.run_exact(circuit)?;
        let readout = Readout::of(circuit);

        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for shot in 0..shots {
            *tally.entry(sv.sample(rng)).or_insert(0) += 1;
            if shot > 0 && shot % 10_000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let counts = tally
            .into_iter()
            .map(|(outcome, n)| (readout.bitstring(outcome), n))
            .collect();
        debug!("Sampling completed in {:?}", start.elapsed());
        Ok(counts)
    }

    /// Sample with a fresh generator, seeded when `seed` is given.
    pub fn run(&self, circuit: &Circuit, shots: u32, seed: Option<u64>) -> SimResult<Counts> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.sample_counts(circuit, shots, &mut rng)
    }
}

/// Which qubit feeds each classical bit.
struct Readout {
    /// `sources[c]` is the qubit measured into clbit `c`, if any.
    sources: Vec<Option<usize>>,
}

impl Readout {
    fn of(circuit: &Circuit) -> Self {
        if circuit.num_clbits() == 0 {
            return Self {
                sources: (0..circuit.num_qubits()).map(Some).collect(),
            };
        }
        let mut sources = vec![None; circuit.num_clbits()];
        for inst in circuit.instructions().iter().filter(|i| i.is_measure()) {
            for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                sources[c.0 as usize] = Some(q.index());
            }
        }
        Self { sources }
    }

    fn bitstring(&self, outcome: usize) -> String {
        self.sources
            .iter()
            .rev()
            .map(|src| match src {
                Some(q) if (outcome >> q) & 1 == 1 => '1',
                _ => '0',
            })
            .collect()
    }
}
