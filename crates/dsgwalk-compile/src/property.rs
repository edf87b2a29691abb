//! Properties shared between compilation passes.

/// Native gate set of a compilation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(std::convert::Into::into).collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// Generic `u` + `cx` basis.
    pub fn u_cx() -> Self {
        Self::new(["u", "cx", "measure", "barrier"])
    }
}

/// Properties shared between compilation passes.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Target basis gates for gate decomposition.
    ///
    /// Should be set before running translation passes.
    pub basis_gates: Option<BasisGates>,

    /// Number of gates removed by single-qubit merging, for reporting.
    pub merged_gates: usize,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }
}
