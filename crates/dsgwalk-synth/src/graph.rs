//! The DSG graph the walk runs on.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::config::compact_width;
use crate::error::SynthResult;
use crate::tessellation::{Tessellation, unary};

/// A Dual Sierpinski Gasket of a given recursion degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsgGraph {
    size_degree: u32,
}

impl DsgGraph {
    /// Create the graph, rejecting degrees without a known tessellation.
    pub fn new(size_degree: u32) -> SynthResult<Self> {
        unary::check_degree(size_degree)?;
        Ok(Self { size_degree })
    }

    /// Recursion degree.
    pub fn size_degree(&self) -> u32 {
        self.size_degree
    }

    /// `N = 3^size_degree`.
    pub fn node_count(&self) -> usize {
        unary::node_count(self.size_degree)
    }

    /// `⌈log2 N⌉`, the compact register width.
    pub fn compact_qubits(&self) -> u32 {
        compact_width(self.node_count())
    }

    /// Edges of one tessellation.
    pub fn tessellation_pairs(&self, tessellation: Tessellation) -> SynthResult<Vec<(usize, usize)>> {
        unary::node_pairs(self.size_degree, tessellation)
    }

    /// The union of all tessellations. Node weights are node indices and
    /// edge weights the tessellation owning the edge.
    pub fn adjacency(&self) -> SynthResult<UnGraph<usize, Tessellation>> {
        let n = self.node_count();
        let mut graph = UnGraph::with_capacity(n, n * 3 / 2);
        let nodes: Vec<NodeIndex> = (0..n).map(|i| graph.add_node(i)).collect();
        for tessellation in Tessellation::ALL {
            for (a, b) in self.tessellation_pairs(tessellation)? {
                graph.add_edge(nodes[a], nodes[b], tessellation);
            }
        }
        Ok(graph)
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> SynthResult<bool> {
        Ok(connected_components(&self.adjacency()?) == 1)
    }
}
