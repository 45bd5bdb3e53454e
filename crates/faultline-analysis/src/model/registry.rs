//! Node registry: the snapshot every analysis reads.
//!
//! Owns nodes, connections, and the labels propagated onto input points.
//! Sequence numbers come from the registry's own contents, so two registries
//! never share counters.

use faultline_core::errors::ModelError;
use faultline_core::types::collections::{BTreeSet, FxHashMap};

use super::types::{Connection, ConnectionKind, Node, NodeId, NodeKind, PointId, Role};

/// Resolves an analysis label back to the kind of node that produced it.
pub trait LabelLookup {
    fn kind_of(&self, label: &str) -> Option<NodeKind>;
}

impl<F> LabelLookup for F
where
    F: Fn(&str) -> Option<NodeKind>,
{
    fn kind_of(&self, label: &str) -> Option<NodeKind> {
        self(label)
    }
}

/// Nodes, connections, and input-point labels of one diagram.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Sorted by id.
    nodes: Vec<Node>,
    /// Slot of each node in `nodes`. Ids need not be dense.
    slots: FxHashMap<NodeId, usize>,
    connections: Vec<Connection>,
    /// Label of each connected input point: the token of the output feeding it.
    labels: FxHashMap<PointId, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an editor snapshot.
    ///
    /// Nodes may arrive in any order and their ids may have gaps. A repeated
    /// id keeps the first node carrying it. Input labels are re-derived from
    /// the external connections whose source is still live. Stale
    /// connections are kept as given; every query filters them out.
    pub fn from_snapshot(mut nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        nodes.sort_by_key(|n| n.id);
        let before = nodes.len();
        nodes.dedup_by_key(|n| n.id);
        if nodes.len() != before {
            tracing::warn!(dropped = before - nodes.len(), "snapshot repeats node ids");
        }
        let slots = nodes.iter().enumerate().map(|(slot, n)| (n.id, slot)).collect();
        let mut registry = Self {
            nodes,
            slots,
            connections,
            labels: FxHashMap::default(),
        };
        let derived: Vec<(PointId, String)> = registry
            .connections
            .iter()
            .filter(|c| c.kind == ConnectionKind::External)
            .filter_map(|c| {
                let source = registry.resolve_node(c.from)?;
                Some((c.to, source.port_token(c.from)))
            })
            .collect();
        registry.labels.extend(derived);
        registry
    }

    /// Register a new node of `kind` and return its id.
    ///
    /// The id is one past the largest id ever held; the sequence number is
    /// one past the largest of its kind. Deleted nodes keep theirs.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.last().map_or(0, |n| n.id.0 + 1));
        let type_id = self
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.type_id)
            .max()
            .unwrap_or(0)
            + 1;
        self.slots.insert(id, self.nodes.len());
        self.nodes.push(Node::new(id, kind, type_id));
        tracing::trace!(%id, %kind, type_id, "node added");
        id
    }

    /// Live node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.stored(id).filter(|n| !n.deleted)
    }

    /// All live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| !n.deleted)
    }

    /// Every stored connection, stale ones included.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Owning live node of `point`, or `None` if the point is unknown or its
    /// node was soft-deleted.
    pub fn resolve_node(&self, point: PointId) -> Option<&Node> {
        self.node(point.node).filter(|n| n.owns(point))
    }

    /// Display label of a point.
    ///
    /// An output point is labelled by its own token; an input point by the
    /// token of the output that feeds it, and has no label while unconnected.
    pub fn point_label(&self, point: PointId) -> Option<String> {
        let node = self.resolve_node(point)?;
        match point.role {
            Role::Out => Some(node.port_token(point)),
            Role::In => self.labels.get(&point).cloned(),
        }
    }

    /// Live node whose output point carries `label`.
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes()
            .find(|n| n.output_ports.iter().any(|&p| n.port_token(p) == label))
    }

    /// Connections whose endpoints both belong to live nodes.
    pub fn live_connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .iter()
            .filter(|c| self.resolve_node(c.from).is_some() && self.resolve_node(c.to).is_some())
    }

    /// Wire two points together, in either order.
    ///
    /// The output point becomes `from`. Points on the same aggregate form an
    /// internal connection; points on different nodes form an external one,
    /// which labels its input point with the output's token. An input point
    /// accepts at most one external connection. Re-adding an existing
    /// connection returns it unchanged.
    pub fn connect(&mut self, a: PointId, b: PointId) -> Result<Connection, ModelError> {
        let node_a = self.live_owner(a)?;
        let node_b = self.live_owner(b)?;

        if a.role == b.role {
            return Err(ModelError::RoleMismatch {
                first: a.to_string(),
                second: b.to_string(),
                role: a.role.name(),
            });
        }
        let (from, to) = if a.role == Role::Out { (a, b) } else { (b, a) };

        let kind = if node_a.id == node_b.id {
            if !node_a.is_aggregate() {
                return Err(ModelError::InternalOutsideAggregate { node_id: node_a.id.0 });
            }
            ConnectionKind::Internal
        } else {
            ConnectionKind::External
        };

        let connection = Connection { from, to, kind };
        if self.live_connections().any(|c| *c == connection) {
            return Ok(connection);
        }
        if kind == ConnectionKind::External
            && self
                .live_connections()
                .any(|c| c.kind == ConnectionKind::External && c.to == to)
        {
            return Err(ModelError::InputAlreadyConnected { point: to.to_string() });
        }

        if kind == ConnectionKind::External {
            let token = self.live_owner(from)?.port_token(from);
            self.labels.insert(to, token);
        }
        self.connections.push(connection);
        tracing::trace!(%connection, "connection added");
        Ok(connection)
    }

    /// Remove one connection. Removing an external connection clears the
    /// label of the input point it fed.
    pub fn disconnect(&mut self, connection: &Connection) -> Result<(), ModelError> {
        let position = self
            .connections
            .iter()
            .position(|c| c == connection)
            .ok_or_else(|| ModelError::UnknownConnection {
                from: connection.from.to_string(),
                to: connection.to.to_string(),
            })?;
        let removed = self.connections.remove(position);
        if removed.kind == ConnectionKind::External {
            self.labels.remove(&removed.to);
        }
        Ok(())
    }

    /// Soft-delete a node and drop every connection touching its ports.
    ///
    /// Returns the number of connections removed.
    pub fn delete_node(&mut self, id: NodeId) -> Result<usize, ModelError> {
        let slot = *self
            .slots
            .get(&id)
            .ok_or(ModelError::UnknownNode { node_id: id.0 })?;
        let node = &mut self.nodes[slot];
        if node.deleted {
            return Err(ModelError::DeletedNode { node_id: id.0 });
        }
        node.deleted = true;

        let before = self.connections.len();
        let mut orphaned_inputs = Vec::new();
        self.connections.retain(|c| {
            let touches = c.from.node == id || c.to.node == id;
            if touches && c.kind == ConnectionKind::External {
                orphaned_inputs.push(c.to);
            }
            !touches
        });
        for point in orphaned_inputs {
            self.labels.remove(&point);
        }
        let removed = before - self.connections.len();
        tracing::debug!(%id, removed, "node deleted");
        Ok(removed)
    }

    /// Drop every node and connection; sequence numbers restart at 1.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.slots.clear();
        self.connections.clear();
        self.labels.clear();
    }

    /// `(outLabel, inLabel)` pairs of all live internal connections.
    ///
    /// Internal wiring whose input point has no label yet (nothing feeds the
    /// aggregate input) has no counterpart in the label graph and is skipped.
    pub fn internal_label_pairs(&self) -> Vec<(String, String)> {
        self.live_connections()
            .filter(|c| c.is_internal())
            .filter_map(|c| {
                let out_label = self.point_label(c.from)?;
                match self.point_label(c.to) {
                    Some(in_label) => Some((out_label, in_label)),
                    None => {
                        tracing::warn!(connection = %c, "skipping internal wiring with unlabelled input");
                        None
                    }
                }
            })
            .collect()
    }

    /// Labels of the input points of live `Output` nodes.
    pub fn sink_labels(&self) -> BTreeSet<String> {
        self.nodes()
            .filter(|n| n.kind == NodeKind::Output)
            .flat_map(|n| n.input_ports.iter().copied())
            .filter_map(|p| self.point_label(p))
            .collect()
    }

    /// Node by id, deleted or not.
    fn stored(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    fn live_owner(&self, point: PointId) -> Result<&Node, ModelError> {
        match self.stored(point.node) {
            None => Err(ModelError::UnknownPoint { point: point.to_string() }),
            Some(n) if n.deleted => Err(ModelError::DeletedNode { node_id: n.id.0 }),
            Some(n) if !n.owns(point) => Err(ModelError::UnknownPoint { point: point.to_string() }),
            Some(n) => Ok(n),
        }
    }
}

impl LabelLookup for NodeRegistry {
    fn kind_of(&self, label: &str) -> Option<NodeKind> {
        self.node_by_label(label).map(|n| n.kind)
    }
}
