//! Full unitary extraction for equivalence checks.

use ndarray::Array2;
use num_complex::Complex64;

use dsgwalk_ir::Circuit;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Widest circuit whose unitary is materialized.
pub const MAX_UNITARY_QUBITS: usize = 10;

/// The unitary implemented by the gates of `circuit`.
///
/// Entry `(r, c)` is `⟨r|U|c⟩`, with basis indices in the same little-endian
/// order as [`Statevector`]. Measurements and barriers are ignored.
pub fn circuit_unitary(circuit: &Circuit) -> SimResult<Array2<Complex64>> {
    let n = circuit.num_qubits();
    if n > MAX_UNITARY_QUBITS {
        return Err(SimError::CircuitTooLarge {
            got: n,
            max: MAX_UNITARY_QUBITS,
        });
    }
    let dim = 1usize << n;
    let mut unitary = Array2::zeros((dim, dim));

    for col in 0..dim {
        let mut sv = Statevector::basis(n, col);
        for inst in circuit.instructions().iter().filter(|i| i.is_gate()) {
            sv.apply(inst);
        }
        for (row, amp) in sv.amplitudes().iter().enumerate() {
            unitary[[row, col]] = *amp;
        }
    }
    Ok(unitary)
}

/// Whether `a = e^{iφ} b` for some global phase `φ`, entrywise within `tol`.
pub fn equal_up_to_global_phase(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    // Fix the phase on the largest entry of `b`.
    let Some((idx, pivot)) = b
        .indexed_iter()
        .max_by(|(_, x), (_, y)| x.norm_sqr().total_cmp(&y.norm_sqr()))
    else {
        return true;
    };
    if pivot.norm() < tol {
        return a.iter().all(|x| x.norm() < tol);
    }
    let phase = a[idx] / pivot;
    if (phase.norm() - 1.0).abs() > tol {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - phase * y).norm() < tol)
}
