//! Error types for the simulator.

use thiserror::Error;

/// Errors raised while executing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than the simulator allows.
    #[error("Circuit has {got} qubits but simulator only supports {max}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        got: usize,
        /// Simulator limit.
        max: usize,
    },

    /// A gate is applied to a qubit after it was measured.
    #[error("Qubit {0} is used after measurement; only terminal measurements are supported")]
    MidCircuitMeasurement(u32),

    /// Shot count must be positive.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
