//! Layered tree types.

use std::fmt;

use faultline_core::errors::TreeVariant;
use faultline_core::types::collections::BTreeMap;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::model::NodeKind;

/// Categorical tag a renderer maps to a colour and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Synthetic FTA root.
    System,
    /// FTA node with no incoming edge in the input graph.
    Root,
    /// RCA node with no outgoing edge in the input graph (a root cause).
    Leaf,
    /// Synthetic RCA marker attached to a non-leaf node.
    Annotation,
    Other,
}

impl NodeCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Root => "root",
            Self::Leaf => "leaf",
            Self::Annotation => "annotation",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Planar position of a node; `y = -level * row_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node of a layered tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    /// Kind of diagram node behind the label; `None` for synthetic nodes
    /// and labels the lookup does not know.
    pub kind: Option<NodeKind>,
    pub synthetic: bool,
}

/// A fully levelled and positioned FTA or RCA tree.
#[derive(Debug, Clone)]
pub struct LayeredTree {
    pub variant: TreeVariant,
    /// Input edges plus synthetic `System` / annotation edges.
    pub graph: DiGraph<TreeNode, ()>,
    pub levels: BTreeMap<String, usize>,
    pub positions: BTreeMap<String, Position>,
    pub categories: BTreeMap<String, NodeCategory>,
}

impl LayeredTree {
    pub fn level(&self, label: &str) -> Option<usize> {
        self.levels.get(label).copied()
    }

    pub fn position(&self, label: &str) -> Option<Position> {
        self.positions.get(label).copied()
    }

    pub fn category(&self, label: &str) -> Option<NodeCategory> {
        self.categories.get(label).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Deepest level in the tree.
    pub fn depth(&self) -> usize {
        self.levels.values().copied().max().unwrap_or(0)
    }

    /// Labels of nodes tagged `category`, in label order.
    pub fn labels_in(&self, category: NodeCategory) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|&(_, &c)| c == category)
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Edges as `(from, to)` label pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].label.as_str(),
                self.graph[e.target()].label.as_str(),
            )
        })
    }

    /// Labels sharing `level`, ordered left to right.
    pub fn row(&self, level: usize) -> Vec<&str> {
        let mut row: Vec<(&str, f64)> = self
            .levels
            .iter()
            .filter(|&(_, &l)| l == level)
            .filter_map(|(label, _)| Some((label.as_str(), self.positions.get(label)?.x)))
            .collect();
        row.sort_by(|a, b| a.1.total_cmp(&b.1));
        row.into_iter().map(|(label, _)| label).collect()
    }
}
