//! Local Statevector Simulator
//!
//! Executes DSG-walk circuits exactly. Used to read out node distributions
//! without sampling noise, to produce seeded shot histograms, and to check
//! that decomposed circuits implement the same unitary as their source.
//!
//! # Conventions
//!
//! Qubit `q` is bit `q` of the basis index, so `|0…01⟩` (index 1) has qubit 0
//! set. Bitstrings print classical bit 0 as the rightmost character.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 4 | 256 B | Instant |
//! | 9 | ~8 KB | Instant |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use dsgwalk_adapter_sim::Simulator;
//! use dsgwalk_ir::{Circuit, QubitId};
//!
//! let bell = Circuit::with_size("bell", 2, 2)
//!     .h(QubitId(0))?
//!     .cx(QubitId(0), QubitId(1))?
//!     .measure_all()?;
//!
//! let sim = Simulator::new();
//! let probs = sim.probabilities(&bell)?;
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//!
//! let counts = sim.run(&bell, 1000, Some(7))?;
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod counts;
mod error;
mod simulator;
mod statevector;
mod unitary;

pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use simulator::Simulator;
pub use statevector::Statevector;
pub use unitary::{MAX_UNITARY_QUBITS, circuit_unitary, equal_up_to_global_phase};
