//! `dsgwalk-synth`: staggered quantum-walk circuits on the Dual Sierpinski
//! Gasket.
//!
//! A walk of total time `t` is cut into `layers` identical layers. Each layer
//! applies the three tessellations of the graph in order, coupling every
//! node pair of a tessellation with the same two-node interaction
//! (`Heisenberg` or `XY`) at angle `θ = π·t/layers`.
//!
//! Two encodings are supported:
//!
//! | Encoding | Qubits (degree 2) | Interaction | Extra |
//! |----------|-------------------|-------------|-------|
//! | unary    | 9 | 4x4 matrix gate per pair | optional `u` + `cx` lowering |
//! | compact  | 4 | controlled 1-qubit gate | MCX permutation ladder per tessellation |
//!
//! Both produce the same node distribution: compact basis index `i`
//! corresponds to the unary state with only qubit `i` excited.
//!
//! # Quick start
//!
//! ```rust
//! use dsgwalk_synth::{Encoding, InteractionModel, WalkConfig, build_circuit};
//!
//! let config = WalkConfig::new(Encoding::Compact, InteractionModel::Heisenberg)
//!     .with_time(0.3)
//!     .with_layers(2);
//! let circuit = build_circuit(&config)?;
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.num_clbits(), 4);
//! # Ok::<(), dsgwalk_synth::SynthError>(())
//! ```

pub mod assemble;
pub mod basis;
pub mod config;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod interaction;
pub mod params;
pub mod tessellation;

pub use assemble::build_circuit;
pub use basis::NodeBasis;
pub use config::{Encoding, StructureOptions, WalkConfig};
pub use error::{SynthError, SynthResult};
pub use experiment::{DataSource, EncodingTag, ExperimentKey, Extent, Network, System, WalkType};
pub use graph::DsgGraph;
pub use interaction::InteractionModel;
pub use params::WalkParameters;
pub use tessellation::Tessellation;
