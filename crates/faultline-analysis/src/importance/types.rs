//! Importance types: metric rows, engine selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural metrics of one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub label: String,
    /// Sink labels reachable from this label.
    #[serde(rename = "I1")]
    pub i1: usize,
    /// All labels reachable from this label.
    #[serde(rename = "I2")]
    pub i2: usize,
    /// Out-degree plus in-degree.
    pub centrality: usize,
}

/// Which reachability engine computed a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReachabilityEngine {
    /// OR of boolean matrix powers `M^1..M^N`, stopping at saturation.
    MatrixPower,
    /// Breadth-first search from every label over a petgraph graph.
    Bfs,
}

impl ReachabilityEngine {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MatrixPower => "matrix_power",
            Self::Bfs => "bfs",
        }
    }
}

impl fmt::Display for ReachabilityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
