//! Walk configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SynthError, SynthResult};
use crate::interaction::InteractionModel;
use crate::tessellation::{compact, unary};

/// How graph nodes map onto qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One qubit per node; node `i` is the single excitation on qubit `i`.
    #[default]
    Unary,
    /// `⌈log2 N⌉` qubits; node `i` is basis state `|i⟩`.
    Compact,
}

impl Encoding {
    /// Canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unary => "unary",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unary" | "un" => Ok(Self::Unary),
            "compact" | "binary" | "bin" => Ok(Self::Compact),
            _ => Err(SynthError::UnknownTag {
                kind: "encoding",
                tag: s.to_string(),
            }),
        }
    }
}

/// Structural switches that do not change the implemented evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureOptions {
    /// Strictly sequential layout: barriers between operations.
    pub barriers: bool,
    /// Keep each tessellation as one opaque composite gate. Per-pair
    /// barriers then live inside the composite body.
    pub wrap: bool,
    /// Emit interactions as `u` + `cx` gates.
    pub decompose: bool,
}

/// Everything needed to synthesize one walk circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// DSG recursion degree; the graph has `3^size_degree` nodes.
    pub size_degree: u32,
    /// Total simulated time.
    pub time: f64,
    /// Discretization layers.
    pub layers: u32,
    /// Node-to-qubit encoding.
    pub encoding: Encoding,
    /// Edge Hamiltonian.
    pub model: InteractionModel,
    /// Layout switches.
    pub options: StructureOptions,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            size_degree: 2,
            time: 1.0,
            layers: 1,
            encoding: Encoding::Unary,
            model: InteractionModel::Heisenberg,
            options: StructureOptions::default(),
        }
    }
}

impl WalkConfig {
    /// A degree-2 walk for time 1 over one layer.
    pub fn new(encoding: Encoding, model: InteractionModel) -> Self {
        Self {
            encoding,
            model,
            ..Self::default()
        }
    }

    /// Set the total simulated time.
    #[must_use]
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the number of layers.
    #[must_use]
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    /// Set the DSG recursion degree.
    #[must_use]
    pub fn with_size_degree(mut self, size_degree: u32) -> Self {
        self.size_degree = size_degree;
        self
    }

    /// Set the layout switches.
    #[must_use]
    pub fn with_options(mut self, options: StructureOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the combination can be synthesized.
    pub fn validate(&self) -> SynthResult<()> {
        if self.layers == 0 {
            return Err(SynthError::InvalidLayers(self.layers));
        }
        if !self.time.is_finite() {
            return Err(SynthError::InvalidTime(self.time));
        }
        match self.encoding {
            Encoding::Unary => unary::check_degree(self.size_degree),
            Encoding::Compact => {
                compact::check_degree(self.size_degree)?;
                if self.options.decompose {
                    // The multi-controlled ladder has no u + cx lowering.
                    return Err(SynthError::UnsupportedOption {
                        option: "decompose",
                        encoding: "compact",
                    });
                }
                Ok(())
            }
        }
    }

    /// Number of graph nodes.
    pub fn node_count(&self) -> usize {
        unary::node_count(self.size_degree)
    }

    /// Register width for this encoding.
    pub fn num_qubits(&self) -> u32 {
        match self.encoding {
            Encoding::Unary => self.node_count() as u32,
            Encoding::Compact => compact_width(self.node_count()),
        }
    }
}

/// `⌈log2 n⌉` for `n ≥ 1`.
pub(crate) fn compact_width(n: usize) -> u32 {
    usize::BITS - n.saturating_sub(1).leading_zeros()
}
