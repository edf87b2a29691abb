//! Gate decomposition for DSG-walk circuits
//!
//! A small pass pipeline that lowers assembled walk circuits to a fixed
//! hardware-style basis (`u` + `cx`). Decomposition runs after assembly as a
//! side-effect-free transformation: every pass consumes a circuit and returns
//! a new one.
//!
//! ```text
//! Assembled Circuit
//!       │
//!       ├── UnrollComposites   (inline wrapped sub-circuits)
//!       ├── BasisTranslation   (standard gates → u + cx)
//!       └── Optimize1qGates    (merge single-qubit runs)
//!       │
//!       ▼
//! Decomposed Circuit
//! ```
//!
//! # Example
//!
//! ```rust
//! use dsgwalk_compile::{BasisGates, PassManagerBuilder};
//! use dsgwalk_ir::{Circuit, QubitId};
//!
//! let circuit = Circuit::with_size("pair", 2, 0)
//!     .rxx(0.4, QubitId(0), QubitId(1))?
//!     .ryy(0.4, QubitId(0), QubitId(1))?;
//!
//! let (pm, mut props) = PassManagerBuilder::new()
//!     .with_basis(BasisGates::u_cx())
//!     .build();
//! let lowered = pm.run(circuit, &mut props)?;
//! assert!(lowered.instructions().iter().all(|i| matches!(i.name(), "u" | "cx")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod unitary;

pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{BasisTranslation, Optimize1qGates, UnrollComposites};
pub use property::{BasisGates, PropertySet};
pub use unitary::Unitary2x2;
