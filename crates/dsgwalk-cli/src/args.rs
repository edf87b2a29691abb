//! Argument groups shared by several commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use dsgwalk_synth::{
    DataSource, Encoding, EncodingTag, ExperimentKey, InteractionModel, Network, System, WalkConfig,
    WalkType,
};

/// Walk parameters. Values given on the command line override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct WalkArgs {
    /// JSON file holding a walk configuration
    #[arg(short, long, env = "DSGWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// DSG recursion degree (3^d nodes)
    #[arg(short = 'd', long, env = "DSGWALK_SIZE_DEGREE")]
    pub size_degree: Option<u32>,

    /// Total walk time
    #[arg(short, long, env = "DSGWALK_TIME", allow_negative_numbers = true)]
    pub time: Option<f64>,

    /// Number of layers the time is split into
    #[arg(short, long, env = "DSGWALK_LAYERS")]
    pub layers: Option<u32>,

    /// Node encoding (unary, compact)
    #[arg(short, long, env = "DSGWALK_ENCODING")]
    pub encoding: Option<Encoding>,

    /// Interaction model (Heisenberg, XY)
    #[arg(short, long, env = "DSGWALK_MODEL")]
    pub model: Option<InteractionModel>,

    /// Separate every operation with a barrier
    #[arg(long)]
    pub barriers: bool,

    /// Keep each tessellation as one composite gate
    #[arg(long)]
    pub wrap: bool,

    /// Lower unary interactions to u + cx
    #[arg(long)]
    pub decompose: bool,
}

impl WalkArgs {
    /// Merge the config file and the command line into a validated config.
    pub fn resolve(&self) -> Result<WalkConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => WalkConfig::default(),
        };

        if let Some(size_degree) = self.size_degree {
            config.size_degree = size_degree;
        }
        if let Some(time) = self.time {
            config.time = time;
        }
        if let Some(layers) = self.layers {
            config.layers = layers;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        config.options.barriers |= self.barriers;
        config.options.wrap |= self.wrap;
        config.options.decompose |= self.decompose;

        config.validate().context("Invalid walk configuration")?;
        Ok(config)
    }
}

/// Read a walk configuration from a JSON file. Missing fields take defaults.
pub fn load_config(path: &Path) -> Result<WalkConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Output format of a built circuit.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One instruction per line
    #[default]
    Text,
    /// Serialized circuit
    Json,
}

/// Parts of an experiment identifier.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Data source (ex, sim, qpu)
    #[arg(short, long, default_value = "sim")]
    pub source: DataSource,

    /// Producing system (e.g. hanoi, qasm, exact)
    #[arg(long)]
    pub system: Option<System>,

    /// Graph family (tri, sg, dsg)
    #[arg(short, long, default_value = "dsg")]
    pub network: Network,

    /// Walk type (rw, qw, 3tqw)
    #[arg(short, long)]
    pub walk_type: Option<WalkType>,

    /// Encoding tag (ex, un, bin)
    #[arg(short, long)]
    pub encoding: Option<EncodingTag>,

    /// Fractal order
    #[arg(short, long)]
    pub order: Option<u32>,

    /// Triangular lattice length
    #[arg(long)]
    pub length: Option<u32>,

    /// Layer count
    #[arg(short, long)]
    pub layers: Option<u32>,

    /// Use this name instead of composing one
    #[arg(long)]
    pub name: Option<String>,
}

impl KeyArgs {
    /// Build the experiment key.
    pub fn key(&self) -> ExperimentKey {
        let mut key = ExperimentKey::new(self.source).with_network(self.network);
        if let Some(system) = self.system {
            key = key.with_system(system);
        }
        if let Some(walk_type) = self.walk_type {
            key = key.with_walk_type(walk_type);
        }
        if let Some(encoding) = self.encoding {
            key = key.with_encoding(encoding);
        }
        if let Some(order) = self.order {
            key = key.with_order(order);
        }
        if let Some(length) = self.length {
            key = key.with_length(length);
        }
        if let Some(layers) = self.layers {
            key = key.with_layers(layers);
        }
        if let Some(name) = &self.name {
            key = key.with_name(name.clone());
        }
        key
    }
}
