//! Error types for the compile crate.

use thiserror::Error;

/// Errors produced by compilation passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A gate has no translation into the target basis.
    #[error("Gate '{0}' cannot be translated to the target basis")]
    GateNotInBasis(String),

    /// A translation pass ran without a target basis.
    #[error("No basis gates configured for translation")]
    MissingBasisGates,

    /// Rebuilding the circuit failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] dsgwalk_ir::IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
