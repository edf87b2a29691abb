//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use dsgwalk_ir::{GateKind, Instruction, InstructionKind, QubitId, StandardGate};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A pure state over `n` qubits. Amplitude index bit `q` is qubit `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[index] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Outcome probabilities in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction. Measurements and barriers leave the state
    /// untouched; sampling happens separately.
    pub fn apply(&mut self, instruction: &Instruction) {
        if let InstructionKind::Gate(gate) = &instruction.kind {
            self.apply_gate(&gate.kind, &instruction.qubits);
        }
    }

    fn apply_gate(&mut self, gate: &GateKind, qubits: &[QubitId]) {
        let q: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
        match gate {
            GateKind::Standard(std_gate) => self.apply_standard_gate(std_gate, &q),
            GateKind::Custom(custom) => self.apply_matrix(&q, &custom.matrix, 0),
            GateKind::Controlled(controlled) => {
                self.apply_matrix(&q[1..], &controlled.base.matrix, 1 << q[0]);
            }
            GateKind::Composite(composite) => {
                for inner in &composite.body {
                    self.apply(&inner.remapped(qubits));
                }
            }
        }
    }

    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_mcx(0, qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::Rx(t) => self.apply_rx(qubits[0], *t, 0),
            StandardGate::Ry(t) => self.apply_ry(qubits[0], *t),
            StandardGate::Rz(t) => self.apply_rz(qubits[0], *t),
            StandardGate::P(t) => self.apply_phase(qubits[0], *t),
            StandardGate::U(t, p, l) => self.apply_u(qubits[0], *t, *p, *l),
            StandardGate::CX => self.apply_mcx(1 << qubits[0], qubits[1]),
            StandardGate::CRx(t) => self.apply_rx(qubits[1], *t, 1 << qubits[0]),
            StandardGate::RXX(t) => self.apply_matrix(&qubits[..2], &pauli_rotation(*t, Pauli2::XX), 0),
            StandardGate::RYY(t) => self.apply_matrix(&qubits[..2], &pauli_rotation(*t, Pauli2::YY), 0),
            StandardGate::RZZ(t) => self.apply_matrix(&qubits[..2], &pauli_rotation(*t, Pauli2::ZZ), 0),
            StandardGate::CCX | StandardGate::Mcx { .. } => {
                let (target, controls) = qubits.split_last().unwrap_or((&0, &[]));
                let mask = controls.iter().fold(0, |m, c| m | (1 << c));
                self.apply_mcx(mask, *target);
            }
        }
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    /// X on `target` where every bit of `control_mask` is set.
    fn apply_mcx(&mut self, control_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & control_mask == control_mask && i & tgt_mask == 0 {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64, control_mask: usize) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & control_mask == control_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    fn apply_u(&mut self, qubit: usize, theta: f64, phi: f64, lambda: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let e_il = Complex64::from_polar(1.0, lambda);
        let e_ip = Complex64::from_polar(1.0, phi);
        let e_ipl = Complex64::from_polar(1.0, phi + lambda);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - e_il * s * b;
                self.amplitudes[j] = e_ip * s * a + e_ipl * c * b;
            }
        }
    }

    /// Apply a row-major `2^k × 2^k` matrix to `targets` (first target is the
    /// least-significant sub-index bit), on the subspace where every bit of
    /// `control_mask` is set.
    fn apply_matrix(&mut self, targets: &[usize], matrix: &[Complex64], control_mask: usize) {
        let dim = 1usize << targets.len();
        let target_mask = targets.iter().fold(0, |m, t| m | (1 << t));
        let offsets: Vec<usize> = (0..dim)
            .map(|k| {
                targets
                    .iter()
                    .enumerate()
                    .fold(0, |acc, (j, t)| acc | (((k >> j) & 1) << t))
            })
            .collect();
        let mut sub = vec![ZERO; dim];

        for base in 0..self.amplitudes.len() {
            if base & target_mask != 0 || base & control_mask != control_mask {
                continue;
            }
            for (k, off) in offsets.iter().enumerate() {
                sub[k] = self.amplitudes[base | off];
            }
            for (r, off) in offsets.iter().enumerate() {
                let row = &matrix[r * dim..(r + 1) * dim];
                self.amplitudes[base | off] =
                    row.iter().zip(sub.iter()).map(|(m, a)| m * a).sum();
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample a basis index according to the Born rule.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy)]
enum Pauli2 {
    XX,
    YY,
    ZZ,
}

/// `exp(-i θ/2 P⊗P)` as a row-major 4x4 matrix.
fn pauli_rotation(theta: f64, pauli: Pauli2) -> Vec<Complex64> {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    let mut m = vec![ZERO; 16];
    for col in 0..4usize {
        match pauli {
            Pauli2::XX => {
                m[col * 4 + col] = c;
                m[(col ^ 3) * 4 + col] = neg_i_s;
            }
            Pauli2::YY => {
                // Y⊗Y flips both bits; |00⟩,|11⟩ pick up -1, |01⟩,|10⟩ +1.
                let sign = if col == 0 || col == 3 { -1.0 } else { 1.0 };
                m[col * 4 + col] = c;
                m[(col ^ 3) * 4 + col] = neg_i_s * sign;
            }
            Pauli2::ZZ => {
                let parity = (col & 1) ^ (col >> 1);
                let angle = if parity == 0 { -theta / 2.0 } else { theta / 2.0 };
                m[col * 4 + col] = Complex64::from_polar(1.0, angle);
            }
        }
    }
    m
}
