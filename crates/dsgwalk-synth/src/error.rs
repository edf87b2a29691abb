//! Error types for walk synthesis.

use thiserror::Error;

/// Errors produced while synthesizing walk circuits or naming experiments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// The interaction model tag is not recognized.
    #[error("Unsupported interaction model '{0}', expected 'Heisenberg' or 'XY'")]
    UnsupportedModel(String),

    /// layers must be ≥ 1.
    #[error("layers must be at least 1, got {0}")]
    InvalidLayers(u32),

    /// Simulated time must be a finite number.
    #[error("time must be finite, got {0}")]
    InvalidTime(f64),

    /// The requested graph size has no tessellation.
    #[error("DSG size degree {degree} is not supported by the {encoding} encoding")]
    UnsupportedDegree {
        /// Requested recursion degree.
        degree: u32,
        /// Encoding that rejected it.
        encoding: &'static str,
    },

    /// A structural option cannot be honoured for this encoding.
    #[error("Option '{option}' is not supported for the {encoding} encoding")]
    UnsupportedOption {
        /// The rejected option.
        option: &'static str,
        /// Encoding that rejected it.
        encoding: &'static str,
    },

    /// An experiment identifier is missing a required part.
    #[error("Experiment key is incomplete: missing {0}")]
    IncompleteExperimentKey(&'static str),

    /// An experiment tag does not name a known value.
    #[error("Unknown {kind} tag '{tag}'")]
    UnknownTag {
        /// What the tag was meant to name.
        kind: &'static str,
        /// The rejected tag.
        tag: String,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] dsgwalk_ir::IrError),

    /// Gate decomposition failed.
    #[error("Decomposition failed: {0}")]
    Compile(#[from] dsgwalk_compile::CompileError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
