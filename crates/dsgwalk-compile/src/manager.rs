//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use dsgwalk_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, Optimize1qGates, UnrollComposites};
use crate::property::{BasisGates, PropertySet};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        info!(
            passes = self.passes.len(),
            qubits = circuit.num_qubits(),
            "lowering circuit"
        );

        let mut circuit = circuit;
        for pass in &self.passes {
            if pass.should_run(&circuit, properties) {
                circuit = pass.run(circuit, properties)?;
                debug!(pass = pass.name(), ops = circuit.num_ops(), "pass done");
            } else {
                debug!(pass = pass.name(), "pass skipped");
            }
        }

        info!(depth = circuit.depth(), ops = circuit.num_ops(), "lowering done");

        Ok(circuit)
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-2).
    optimization_level: u8,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 2,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: unroll and translate only
    /// - Level 1 and above: also merge single-qubit runs
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(2);
        self
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.properties.basis_gates = Some(basis_gates);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        pm.add_pass(UnrollComposites);

        if self.properties.basis_gates.is_some() {
            pm.add_pass(BasisTranslation);
        }

        if self.optimization_level >= 1 {
            pm.add_pass(Optimize1qGates::new());
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsgwalk_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run_keeps_circuit() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();
        let circuit = Circuit::with_size("test", 2, 0)
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let out = pm.run(circuit, &mut props).unwrap();
        assert_eq!(out.num_ops(), 2);
    }

    #[test]
    fn test_pass_manager_builder() {
        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(2)
            .with_basis(BasisGates::u_cx())
            .build();
        assert_eq!(pm.len(), 3);
        assert!(props.basis_gates.is_some());

        let (pm0, _) = PassManagerBuilder::new().with_optimization_level(0).build();
        assert_eq!(pm0.len(), 1);
    }
}
