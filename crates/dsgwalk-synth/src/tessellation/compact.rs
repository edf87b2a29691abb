//! Tessellations in the compact encoding (nine nodes on four qubits).
//!
//! Node `i` is the basis state `|i⟩`, so states `9..16` are scratch and must
//! be empty between layers. Each tessellation permutes basis states with a
//! ladder of multi-controlled X gates until every coupled node pair differs
//! only in one target qubit, then applies the interaction controlled on
//! qubit 3 being `|0⟩`. The permutations are not undone per tessellation:
//! [`permute_back`] restores node order once per layer.

use dsgwalk_ir::{Circuit, Gate, QubitId};

use super::Tessellation;
use crate::error::{SynthError, SynthResult};

/// Register width of the compact encoding.
pub const COMPACT_QUBITS: u32 = 4;

/// The only recursion degree with a compact permutation network.
pub const COMPACT_DEGREE: u32 = 2;

/// Name of the layer-closing permutation.
pub const PERMUTE_BACK: &str = "Permute-back";

pub(crate) fn check_degree(size_degree: u32) -> SynthResult<()> {
    if size_degree == COMPACT_DEGREE {
        Ok(())
    } else {
        Err(SynthError::UnsupportedDegree {
            degree: size_degree,
            encoding: "compact",
        })
    }
}

fn q(i: u32) -> QubitId {
    QubitId(i)
}

/// Cyclic increment of the 4-bit basis index.
fn shift_up(c: Circuit) -> SynthResult<Circuit> {
    Ok(c.mcx(&[q(0), q(1), q(2)], q(3))?
        .mcx(&[q(0), q(1)], q(2))?
        .cx(q(0), q(1))?)
}

/// Inverse of [`shift_up`] on the even-indexed states it produced.
fn shift_down(c: Circuit) -> SynthResult<Circuit> {
    Ok(c.cx(q(0), q(1))?
        .mcx(&[q(0), q(1)], q(2))?
        .mcx(&[q(0), q(1), q(2)], q(3))?)
}

/// Toggle qubit 1 when qubit 0 is set and qubits 2, 3 are clear.
fn flip_low(c: Circuit) -> SynthResult<Circuit> {
    Ok(c.x(q(2))?
        .x(q(3))?
        .mcx(&[q(0), q(2), q(3)], q(1))?
        .x(q(2))?
        .x(q(3))?)
}

/// The coupling between the pair that differs in `target`, gated on the
/// flag qubit being clear.
fn interact(c: Circuit, gate: &Gate, target: u32) -> SynthResult<Circuit> {
    Ok(c.x(q(3))?
        .append(gate.clone(), [q(3), q(target)])?
        .x(q(3))?)
}

fn tessellation_1(gate: &Gate) -> SynthResult<Circuit> {
    let c = Circuit::with_size(Tessellation::First.label(), COMPACT_QUBITS, 0);
    let c = c.mcx(&[q(0), q(1)], q(2))?;
    let c = shift_up(c)?;
    let c = c.cx(q(3), q(0))?;
    let c = shift_down(c)?;
    interact(c, gate, 0)
}

fn tessellation_2(gate: &Gate) -> SynthResult<Circuit> {
    let c = Circuit::with_size(Tessellation::Second.label(), COMPACT_QUBITS, 0);
    let c = c.x(q(0))?.mcx(&[q(0), q(1)], q(2))?;
    let c = flip_low(c)?;
    let c = shift_down(c)?;
    interact(c, gate, 2)
}

fn tessellation_3(gate: &Gate) -> SynthResult<Circuit> {
    let c = Circuit::with_size(Tessellation::Third.label(), COMPACT_QUBITS, 0);
    let c = shift_up(c)?;
    let c = flip_low(c)?;
    let c = c.mcx(&[q(0), q(1)], q(2))?.x(q(0))?;
    let c = c.mcx(&[q(0), q(1)], q(2))?;
    let c = c.mcx(&[q(0), q(2)], q(1))?;
    let c = c.x(q(0))?;
    let c = shift_down(c)?;
    interact(c, gate, 0)
}

/// The permutation and coupling of one tessellation.
///
/// `gate` is the controlled interaction, operands `[control, target]`.
pub fn tessellation_circuit(tessellation: Tessellation, gate: &Gate) -> SynthResult<Circuit> {
    match tessellation {
        Tessellation::First => tessellation_1(gate),
        Tessellation::Second => tessellation_2(gate),
        Tessellation::Third => tessellation_3(gate),
    }
}

/// Restores the node order left behind by the three tessellations.
pub fn permute_back() -> SynthResult<Circuit> {
    let c = Circuit::with_size(PERMUTE_BACK, COMPACT_QUBITS, 0);
    let c = shift_up(c)?;
    let c = c.x(q(0))?;
    let c = c.mcx(&[q(0), q(2)], q(1))?;
    let c = c.mcx(&[q(0), q(1)], q(2))?;
    let c = shift_up(c)?;
    let c = c.cx(q(3), q(0))?;
    let c = shift_down(c)?;
    Ok(c.mcx(&[q(0), q(1)], q(2))?)
}

/// The four sub-circuits of one layer, in application order.
pub fn layer_circuits(gate: &Gate) -> SynthResult<[Circuit; 4]> {
    Ok([
        tessellation_1(gate)?,
        tessellation_2(gate)?,
        tessellation_3(gate)?,
        permute_back()?,
    ])
}
