//! Model types: node kinds, structured point ids, connections.

use std::fmt;

use faultline_core::types::collections::SmallVec6;
use serde::{Deserialize, Serialize};

/// Input and output port count of an aggregate node.
pub const AGGREGATE_PORTS: u8 = 6;

/// Offset added to an aggregate input port index in its display token.
///
/// Outputs are numbered `1..=6` and inputs `7..=12` within the aggregate's
/// sequence number, so the two sides never share a token.
pub const AGGREGATE_INPUT_TOKEN_BASE: u8 = 7;

/// Identifier of a node in a [`NodeRegistry`](super::NodeRegistry).
///
/// Ids are unique within a registry but need not be dense or ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The three kinds of diagram element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A system input: one output port.
    Input,
    /// A system output: one input port.
    Output,
    /// An information service: paired input/output ports with internal wiring.
    Aggregate,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Aggregate => "aggregate",
        }
    }

    /// Number of (input, output) ports a node of this kind carries.
    pub fn port_counts(&self) -> (u8, u8) {
        match self {
            Self::Input => (0, 1),
            Self::Output => (1, 0),
            Self::Aggregate => (AGGREGATE_PORTS, AGGREGATE_PORTS),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a point relative to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    In,
    Out,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Structured point identifier: owning node, port index, role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId {
    pub node: NodeId,
    pub port: u8,
    pub role: Role,
}

impl PointId {
    pub fn input(node: NodeId, port: u8) -> Self {
        Self { node, port, role: Role::In }
    }

    pub fn output(node: NodeId, port: u8) -> Self {
        Self { node, port, role: Role::Out }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.node, self.role.name(), self.port)
    }
}

/// A diagram element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Sequence number within `kind`, starting at 1.
    pub type_id: u32,
    pub input_ports: SmallVec6<PointId>,
    pub output_ports: SmallVec6<PointId>,
    /// Soft-delete flag. Deleted nodes are absent from every graph query.
    pub deleted: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, type_id: u32) -> Self {
        let (inputs, outputs) = kind.port_counts();
        Self {
            id,
            kind,
            type_id,
            input_ports: (0..inputs).map(|p| PointId::input(id, p)).collect(),
            output_ports: (0..outputs).map(|p| PointId::output(id, p)).collect(),
            deleted: false,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind == NodeKind::Aggregate
    }

    /// Whether `point` is one of this node's ports.
    pub fn owns(&self, point: PointId) -> bool {
        let ports = match point.role {
            Role::In => &self.input_ports,
            Role::Out => &self.output_ports,
        };
        ports.contains(&point)
    }

    pub fn ports(&self) -> impl Iterator<Item = PointId> + '_ {
        self.input_ports.iter().chain(self.output_ports.iter()).copied()
    }

    /// Display token of one of this node's ports.
    ///
    /// Input node output: `0{t}`. Output node input: `{t}0`.
    /// Aggregate output *i*: `{t}{i+1}`; aggregate input *i*: `{t}{i+7}`.
    pub fn port_token(&self, point: PointId) -> String {
        let t = self.type_id;
        match (self.kind, point.role) {
            (NodeKind::Input, _) => format!("0{t}"),
            (NodeKind::Output, _) => format!("{t}0"),
            (NodeKind::Aggregate, Role::Out) => format!("{t}{}", u32::from(point.port) + 1),
            (NodeKind::Aggregate, Role::In) => {
                format!("{t}{}", u32::from(point.port) + u32::from(AGGREGATE_INPUT_TOKEN_BASE))
            }
        }
    }
}

/// Scope of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Output of one node to an input of a different node.
    External,
    /// Output to input within the same aggregate (pass-through wiring).
    Internal,
}

/// Directed wiring edge; `from` is always an `Out` point, `to` an `In` point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: PointId,
    pub to: PointId,
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn is_internal(&self) -> bool {
        self.kind == ConnectionKind::Internal
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            ConnectionKind::External => "conn",
            ConnectionKind::Internal => "internal",
        };
        write!(f, "{tag}({} -> {})", self.from, self.to)
    }
}
