//! Mapping measurement outcomes back to graph nodes.
//!
//! Bitstrings follow the readout convention of the simulator: classical bit
//! 0, which holds qubit 0, is the rightmost character.

use crate::config::{Encoding, compact_width};
use crate::graph::DsgGraph;

/// Node readout for one encoding of one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBasis {
    encoding: Encoding,
    nodes: usize,
    width: usize,
}

impl NodeBasis {
    /// Readout for `graph` under `encoding`.
    pub fn new(graph: &DsgGraph, encoding: Encoding) -> Self {
        let nodes = graph.node_count();
        let width = match encoding {
            Encoding::Unary => nodes,
            Encoding::Compact => compact_width(nodes) as usize,
        };
        Self {
            encoding,
            nodes,
            width,
        }
    }

    /// Number of graph nodes.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Bitstring length.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Basis index of node `node`.
    pub fn index_of(&self, node: usize) -> usize {
        match self.encoding {
            Encoding::Unary => 1 << node,
            Encoding::Compact => node,
        }
    }

    /// The bitstring that reads out as `node`.
    pub fn bitstring_of(&self, node: usize) -> String {
        format!("{:0width$b}", self.index_of(node), width = self.width)
    }

    /// The node a bitstring denotes, or `None` for multi-hot, empty or
    /// scratch outcomes.
    pub fn node_of(&self, bitstring: &str) -> Option<usize> {
        if bitstring.len() != self.width || !bitstring.bytes().all(|c| c == b'0' || c == b'1') {
            return None;
        }
        let index = usize::from_str_radix(bitstring, 2).ok()?;
        match self.encoding {
            Encoding::Unary if index.is_power_of_two() => Some(index.trailing_zeros() as usize),
            Encoding::Unary => None,
            Encoding::Compact => (index < self.nodes).then_some(index),
        }
    }

    /// Shots landing on a valid node state.
    pub fn valid_shots<'a>(&self, counts: impl IntoIterator<Item = (&'a str, u64)>) -> u64 {
        counts
            .into_iter()
            .filter(|(bits, _)| self.node_of(bits).is_some())
            .map(|(_, n)| n)
            .sum()
    }

    /// Normalized node distribution over valid shots. All zeros when no
    /// shot is valid.
    pub fn node_distribution<'a>(&self, counts: impl IntoIterator<Item = (&'a str, u64)>) -> Vec<f64> {
        let mut tally = vec![0u64; self.nodes];
        for (bits, n) in counts {
            if let Some(node) = self.node_of(bits) {
                tally[node] += n;
            }
        }
        let total: u64 = tally.iter().sum();
        if total == 0 {
            return vec![0.0; self.nodes];
        }
        tally.into_iter().map(|n| n as f64 / total as f64).collect()
    }

    /// Node distribution from exact basis-state probabilities.
    ///
    /// Unlike [`node_distribution`](Self::node_distribution) this does not
    /// renormalize, so leaked weight shows up as a deficit.
    pub fn node_probabilities(&self, probabilities: &[f64]) -> Vec<f64> {
        (0..self.nodes)
            .map(|node| probabilities.get(self.index_of(node)).copied().unwrap_or(0.0))
            .collect()
    }
}
