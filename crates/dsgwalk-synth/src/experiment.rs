//! Experiment identifiers.
//!
//! Walk runs are filed under a name built from where the data came from and
//! how the walk was set up:
//!
//! ```text
//! {system}_{network}_{walktype}_{encoding}_{extent}_{time}s_{layers}
//! ibm_hanoi_dsg_3tqw_un_o2_3.0s_5ly
//! ```
//!
//! Only names are produced here; reading and writing the files is left to
//! the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Encoding;
use crate::error::{SynthError, SynthResult};

/// Time step of stored walk trajectories.
pub const DT: f64 = 0.01;

/// Steps in an exact (reference) trajectory.
pub const EXACT_STEPS: u32 = 1500;

/// Steps in a simulator or hardware trajectory.
pub const SAMPLED_STEPS: u32 = 300;

/// Default fractal order.
pub const DEFAULT_ORDER: u32 = 2;

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $tag)] $variant, )+
        }

        impl $name {
            /// Tag used in identifiers.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SynthError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag $(| $alias)* => Ok(Self::$variant), )+
                    _ => Err(SynthError::UnknownTag {
                        kind: $kind,
                        tag: s.to_string(),
                    }),
                }
            }
        }
    };
}

tag_enum! {
    /// Where the data was produced.
    DataSource, "source" {
        /// Exact numerical evolution.
        Exact => "ex",
        /// Sampled simulator runs.
        Simulator => "sim",
        /// Quantum hardware runs.
        Qpu => "qpu",
    }
}

tag_enum! {
    /// The machine that produced the data.
    System, "system" {
        /// Exact numerical evolution.
        Exact => "exact" | "ex",
        /// IBM QASM simulator.
        IbmqQasmSimulator => "ibmq_qasm_simulator" | "qasm",
        /// IBM Montreal.
        IbmqMontreal => "ibmq_montreal" | "montreal",
        /// IBM Mumbai.
        IbmqMumbai => "ibmq_mumbai" | "mumbai",
        /// IBM Auckland.
        IbmAuckland => "ibm_auckland" | "auckland",
        /// IBM Hanoi.
        IbmHanoi => "ibm_hanoi" | "hanoi",
        /// IonQ simulator.
        IonqSimulator => "ionq_simulator" | "ionq_sim",
    }
}

tag_enum! {
    /// Graph family.
    Network, "network" {
        /// Triangular lattice.
        Triangular => "tri",
        /// Sierpinski gasket.
        SierpinskiGasket => "sg",
        /// Dual Sierpinski gasket.
        DualSierpinskiGasket => "dsg",
    }
}

tag_enum! {
    /// Walk process.
    WalkType, "walk type" {
        /// Classical random walk.
        Random => "rw",
        /// Continuous-time quantum walk.
        Quantum => "qw",
        /// Three-tessellation staggered quantum walk.
        Staggered => "3tqw",
    }
}

tag_enum! {
    /// Encoding as written in identifiers.
    EncodingTag, "encoding" {
        /// Exact evolution, no qubit encoding.
        Exact => "ex",
        /// Unary encoding.
        Unary => "un",
        /// Compact (binary) encoding.
        Binary => "bin",
    }
}

impl From<Encoding> for EncodingTag {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Unary => Self::Unary,
            Encoding::Compact => Self::Binary,
        }
    }
}

impl DataSource {
    /// Directory holding this source's files.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Exact => "data/exact/",
            Self::Simulator => "data/simulator/",
            Self::Qpu => "data/qpu/",
        }
    }
}

/// Size of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extent {
    /// Recursion order of a fractal.
    Order(u32),
    /// Side length of a triangular lattice.
    Length(u32),
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order(n) => write!(f, "o{n}"),
            Self::Length(n) => write!(f, "l{n}"),
        }
    }
}

/// The parts of an experiment identifier.
///
/// Unset parts fall back to the conventions of the data source: exact data
/// is a `qw` walk with `ex` encoding on the `exact` system, everything else
/// a `3tqw` walk in `un` encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentKey {
    source: DataSource,
    system: Option<System>,
    network: Option<Network>,
    walk_type: WalkType,
    encoding: EncodingTag,
    order: Option<u32>,
    length: Option<u32>,
    layers: Option<u32>,
    name: Option<String>,
}

impl ExperimentKey {
    /// A key with the defaults of `source`.
    pub fn new(source: DataSource) -> Self {
        let exact = source == DataSource::Exact;
        Self {
            source,
            system: exact.then_some(System::Exact),
            network: None,
            walk_type: if exact { WalkType::Quantum } else { WalkType::Staggered },
            encoding: if exact { EncodingTag::Exact } else { EncodingTag::Unary },
            order: None,
            length: None,
            layers: None,
            name: None,
        }
    }

    /// Set the producing system.
    #[must_use]
    pub fn with_system(mut self, system: System) -> Self {
        self.system = Some(system);
        self
    }

    /// Set the graph family.
    #[must_use]
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Override the walk type.
    #[must_use]
    pub fn with_walk_type(mut self, walk_type: WalkType) -> Self {
        self.walk_type = walk_type;
        self
    }

    /// Override the encoding tag.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<EncodingTag>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Fractal order. Ignored for triangular networks.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Lattice length. Only used for triangular networks.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Layer count. Exact data always uses a variable layer tag instead.
    #[must_use]
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Use `name` verbatim instead of composing one.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Data source.
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Trajectory length in steps.
    pub fn steps(&self) -> u32 {
        match self.source {
            DataSource::Exact => EXACT_STEPS,
            _ => SAMPLED_STEPS,
        }
    }

    /// Total simulated time, `steps · DT`.
    pub fn time(&self) -> f64 {
        f64::from(self.steps()) * DT
    }

    /// Network size part, if it can be determined.
    pub fn extent(&self) -> Option<Extent> {
        match self.network {
            Some(Network::Triangular) => self.length.map(Extent::Length),
            _ => Some(Extent::Order(self.order.unwrap_or(DEFAULT_ORDER))),
        }
    }

    /// Layer part, if it can be determined.
    pub fn layer_tag(&self) -> Option<String> {
        match self.source {
            DataSource::Exact => Some(format!("{EXACT_STEPS}vly")),
            _ => self.layers.map(|n| format!("{n}ly")),
        }
    }

    /// The full identifier.
    pub fn identifier(&self) -> SynthResult<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        let system = self
            .system
            .ok_or(SynthError::IncompleteExperimentKey("system"))?;
        let network = self
            .network
            .ok_or(SynthError::IncompleteExperimentKey("network"))?;
        let extent = self.extent().ok_or(SynthError::IncompleteExperimentKey(
            "length (triangular network)",
        ))?;
        let layers = self
            .layer_tag()
            .ok_or(SynthError::IncompleteExperimentKey("layers"))?;
        Ok(format!(
            "{system}_{network}_{}_{}_{extent}_{:.1}s_{layers}",
            self.walk_type,
            self.encoding,
            self.time()
        ))
    }

    /// Path of the mean-squared-displacement table.
    pub fn msd_file(&self) -> SynthResult<PathBuf> {
        self.file("msd_list.csv")
    }

    /// Path of the per-step counts list.
    pub fn counts_file(&self) -> SynthResult<PathBuf> {
        self.file("counts_list.json")
    }

    fn file(&self, suffix: &str) -> SynthResult<PathBuf> {
        let stem = self.identifier()?;
        Ok(PathBuf::from(self.source.folder()).join(format!("{stem}_{suffix}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_defaults() {
        let key = ExperimentKey::new(DataSource::Exact).with_network(Network::DualSierpinskiGasket);
        assert_eq!(key.identifier().unwrap(), "exact_dsg_qw_ex_o2_15.0s_1500vly");
    }

    #[test]
    fn test_hardware_run() {
        let key = ExperimentKey::new(DataSource::Qpu)
            .with_system("hanoi".parse().unwrap())
            .with_network(Network::DualSierpinskiGasket)
            .with_layers(5);
        assert_eq!(key.identifier().unwrap(), "ibm_hanoi_dsg_3tqw_un_o2_3.0s_5ly");
        assert_eq!(
            key.counts_file().unwrap(),
            PathBuf::from("data/qpu/ibm_hanoi_dsg_3tqw_un_o2_3.0s_5ly_counts_list.json")
        );
    }

    #[test]
    fn test_exact_ignores_layers() {
        let key = ExperimentKey::new(DataSource::Exact)
            .with_network(Network::SierpinskiGasket)
            .with_order(3)
            .with_layers(7);
        assert_eq!(key.identifier().unwrap(), "exact_sg_qw_ex_o3_15.0s_1500vly");
    }

    #[test]
    fn test_triangular_uses_length() {
        let key = ExperimentKey::new(DataSource::Simulator)
            .with_system(System::IbmqQasmSimulator)
            .with_network(Network::Triangular)
            .with_encoding(Encoding::Compact)
            .with_order(4)
            .with_layers(2);
        assert!(matches!(
            key.identifier(),
            Err(SynthError::IncompleteExperimentKey(_))
        ));
        let key = key.with_length(4);
        assert_eq!(
            key.identifier().unwrap(),
            "ibmq_qasm_simulator_tri_3tqw_bin_l4_3.0s_2ly"
        );
        assert_eq!(
            key.msd_file().unwrap(),
            PathBuf::from("data/simulator/ibmq_qasm_simulator_tri_3tqw_bin_l4_3.0s_2ly_msd_list.csv")
        );
    }

    #[test]
    fn test_missing_parts() {
        let key = ExperimentKey::new(DataSource::Simulator).with_network(Network::DualSierpinskiGasket);
        assert!(matches!(
            key.identifier(),
            Err(SynthError::IncompleteExperimentKey("system"))
        ));
        let key = key.with_system(System::IonqSimulator);
        assert!(matches!(
            key.identifier(),
            Err(SynthError::IncompleteExperimentKey("layers"))
        ));
    }

    #[test]
    fn test_explicit_name_wins() {
        let key = ExperimentKey::new(DataSource::Qpu).with_name("custom_run");
        assert_eq!(key.identifier().unwrap(), "custom_run");
    }

    #[test]
    fn test_unknown_tags() {
        assert!(matches!(
            "ibm_osaka".parse::<System>(),
            Err(SynthError::UnknownTag { kind: "system", .. })
        ));
        assert!(matches!(
            "hex".parse::<Network>(),
            Err(SynthError::UnknownTag { kind: "network", .. })
        ));
        assert_eq!("3tqw".parse::<WalkType>().unwrap(), WalkType::Staggered);
        assert_eq!("ionq_sim".parse::<System>().unwrap(), System::IonqSimulator);
        assert_eq!(System::IonqSimulator.to_string(), "ionq_simulator");
    }
}
