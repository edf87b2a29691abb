//! DSG-walk circuit intermediate representation
//!
//! Core data structures shared by the synthesis, compilation and simulation
//! crates of the workspace.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]. Qubit 0 is the
//!   least-significant bit of every basis-state index.
//! - **Gates**: [`StandardGate`] for built-in gates, [`CustomGate`] for
//!   matrix-defined operations, [`ControlledGate`] for a singly-controlled
//!   matrix gate and [`CompositeGate`] for wrapped sub-circuits
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`], an immutable by-value builder
//!
//! # Example
//!
//! ```rust
//! use dsgwalk_ir::{Circuit, QubitId};
//!
//! let ladder = Circuit::with_size("ladder", 4, 4)
//!     .mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3))?
//!     .mcx(&[QubitId(0), QubitId(1)], QubitId(2))?
//!     .cx(QubitId(0), QubitId(1))?
//!     .measure_all()?;
//!
//! assert_eq!(ladder.num_qubits(), 4);
//! assert_eq!(ladder.count_ops()["measure"], 4);
//! # Ok::<(), dsgwalk_ir::IrError>(())
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `H`, `S`, `Sdg` | 1 | Fixed single-qubit gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CRx` | 2 | Controlled gates, control first |
//! | `RXX`, `RYY`, `RZZ` | 2 | Two-qubit Pauli rotations |
//! | `CCX` | 3 | Toffoli gate |
//! | `Mcx` | n+1 | Multi-controlled X, controls first |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, ControlledGate, CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
