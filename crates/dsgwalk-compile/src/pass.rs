//! Pass trait and types for compilation passes.

use dsgwalk_ir::Circuit;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the circuit.
    Analysis,
    /// Transformation pass that produces a new circuit.
    Transformation,
}

/// A compilation pass over a circuit.
///
/// Passes take the circuit by value and return the transformed one, matching
/// the by-value circuit builder. Analysis passes return their input unchanged.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    fn run(&self, circuit: Circuit, properties: &mut PropertySet) -> CompileResult<Circuit>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _circuit: &Circuit, _properties: &PropertySet) -> bool {
        true
    }
}
