//! Worklist-driven failure propagation.

use faultline_core::types::collections::{FxHashMap, FxHashSet};

use crate::model::{Connection, NodeRegistry, PointId, Role};

use super::types::FailureMark;

/// Live connections grouped by endpoint.
struct ConnectionIndex {
    /// Incoming connections per input point, internal wiring first.
    incoming: FxHashMap<PointId, Vec<Connection>>,
    outgoing: FxHashMap<PointId, Vec<Connection>>,
}

impl ConnectionIndex {
    fn build(registry: &NodeRegistry) -> Self {
        let mut incoming: FxHashMap<PointId, Vec<Connection>> = FxHashMap::default();
        let mut outgoing: FxHashMap<PointId, Vec<Connection>> = FxHashMap::default();
        for connection in registry.live_connections() {
            incoming.entry(connection.to).or_default().push(*connection);
            outgoing.entry(connection.from).or_default().push(*connection);
        }
        for list in incoming.values_mut() {
            list.sort_by_key(|c| !c.is_internal());
        }
        Self { incoming, outgoing }
    }

    fn incoming(&self, point: PointId) -> &[Connection] {
        self.incoming.get(&point).map(Vec::as_slice).unwrap_or(&[])
    }

    fn outgoing(&self, point: PointId) -> &[Connection] {
        self.outgoing.get(&point).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Mark everything that fails when `trigger` fails.
///
/// - An input point fails whatever feeds it: each incoming connection and
///   its source output point, then continues from that output.
/// - An aggregate's output point fails its outgoing *external* connections
///   and their destination inputs. Internal wiring is not followed forward;
///   failure reaches an aggregate output only from its input side.
/// - Any other output point fails every outgoing connection and destination.
///
/// Each point is expanded once, so cycles terminate. A trigger that does not
/// resolve to a live node yields an empty mark.
#[tracing::instrument(skip(registry))]
pub fn propagate(registry: &NodeRegistry, trigger: PointId) -> FailureMark {
    let index = ConnectionIndex::build(registry);
    let mut mark = FailureMark::default();
    let mut visited: FxHashSet<PointId> = FxHashSet::default();
    let mut stack = vec![trigger];

    while let Some(point) = stack.pop() {
        if !visited.insert(point) {
            continue;
        }
        let Some(node) = registry.resolve_node(point) else {
            tracing::trace!(%point, "point has no live owner, stopping here");
            continue;
        };
        mark.points.insert(point);
        mark.nodes.insert(node.id);

        let mut next = Vec::new();
        match point.role {
            Role::In => {
                for connection in index.incoming(point) {
                    mark.connections.insert(*connection);
                    mark.points.insert(connection.from);
                    next.push(connection.from);
                }
            }
            Role::Out => {
                let forward_internal = !node.is_aggregate();
                for connection in index.outgoing(point) {
                    if connection.is_internal() && !forward_internal {
                        continue;
                    }
                    mark.connections.insert(*connection);
                    mark.points.insert(connection.to);
                    next.push(connection.to);
                }
            }
        }
        // Reverse so the first connection is expanded first.
        stack.extend(next.into_iter().rev());
    }

    tracing::debug!(
        %trigger,
        points = mark.points.len(),
        connections = mark.connections.len(),
        nodes = mark.nodes.len(),
        "failure propagated"
    );
    mark
}
