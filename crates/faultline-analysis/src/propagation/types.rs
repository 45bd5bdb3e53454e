//! Failure propagation result.

use faultline_core::types::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::model::{Connection, Node, NodeId, NodeRegistry, PointId};

/// Elements flagged failed during one propagation run.
///
/// Sets only grow during a run. Nothing carries over between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMark {
    /// Failed points, the trigger included when it resolves to a live node.
    pub points: BTreeSet<PointId>,
    /// Failed connections, internal and external.
    pub connections: BTreeSet<Connection>,
    /// Nodes whose body is marked failed.
    pub nodes: BTreeSet<NodeId>,
}

impl FailureMark {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.connections.is_empty() && self.nodes.is_empty()
    }

    pub fn is_point_failed(&self, point: PointId) -> bool {
        self.points.contains(&point)
    }

    pub fn is_connection_failed(&self, connection: &Connection) -> bool {
        self.connections.contains(connection)
    }

    pub fn is_node_failed(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Every port of `node` when its body is marked failed, none otherwise.
    ///
    /// For renderers that grey out a failed node's whole footprint rather
    /// than only the points the walk reached.
    pub fn node_ports<'a>(&self, node: &'a Node) -> impl Iterator<Item = PointId> + 'a {
        let failed = self.is_node_failed(node.id);
        node.ports().filter(move |_| failed)
    }

    /// Reached points plus every port of every failed live node.
    pub fn footprint(&self, registry: &NodeRegistry) -> BTreeSet<PointId> {
        let mut points = self.points.clone();
        for node in self.nodes.iter().filter_map(|&id| registry.node(id)) {
            points.extend(self.node_ports(node));
        }
        points
    }

    /// Forget every mark.
    pub fn clear(&mut self) {
        self.points.clear();
        self.connections.clear();
        self.nodes.clear();
    }
}
