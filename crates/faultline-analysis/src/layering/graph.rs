//! Directed label graph with O(1) label lookup.

use faultline_core::types::collections::FxHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::model::registry::LabelLookup;

use super::types::TreeNode;

/// Label graph under construction.
pub struct LabelGraph {
    pub graph: DiGraph<TreeNode, ()>,
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl LabelGraph {
    /// Build from `(from, to)` label edges. Nodes keep first-appearance
    /// order and duplicate edges collapse into one.
    pub fn from_edges<S, L>(edges: &[(S, S)], lookup: &L) -> Self
    where
        S: AsRef<str>,
        L: LabelLookup + ?Sized,
    {
        let mut g = Self {
            graph: DiGraph::new(),
            node_index: FxHashMap::default(),
        };
        for (from, to) in edges {
            let a = g.ensure_node(from.as_ref(), lookup);
            let b = g.ensure_node(to.as_ref(), lookup);
            g.graph.update_edge(a, b, ());
        }
        g
    }

    fn ensure_node<L: LabelLookup + ?Sized>(&mut self, label: &str, lookup: &L) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(TreeNode {
            label: label.to_string(),
            kind: lookup.kind_of(label),
            synthetic: false,
        });
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Add a synthetic node. `base` gets `'` suffixes until it no longer
    /// collides with an existing label.
    pub fn add_synthetic(&mut self, base: &str) -> NodeIndex {
        let mut label = base.to_string();
        while self.node_index.contains_key(&label) {
            label.push('\'');
        }
        let idx = self.graph.add_node(TreeNode {
            label: label.clone(),
            kind: None,
            synthetic: true,
        });
        self.node_index.insert(label, idx);
        idx
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Outgoing).count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
