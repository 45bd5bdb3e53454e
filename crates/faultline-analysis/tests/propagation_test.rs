//! T3-PRP-01 through T3-PRP-10: Failure propagation tests.

use faultline_analysis::model::{
    Connection, ConnectionKind, Node, NodeId, NodeKind, NodeRegistry, PointId,
};
use faultline_analysis::propagation::propagate;
use proptest::prelude::*;

struct Chain {
    reg: NodeRegistry,
    input: NodeId,
    agg: NodeId,
    output: NodeId,
}

/// Input → Aggregate (internal out0←in0) → Output
fn build_chain() -> Chain {
    let mut reg = NodeRegistry::new();
    let input = reg.add_node(NodeKind::Input);
    let agg = reg.add_node(NodeKind::Aggregate);
    let output = reg.add_node(NodeKind::Output);
    reg.connect(PointId::output(input, 0), PointId::input(agg, 0)).unwrap();
    reg.connect(PointId::output(agg, 0), PointId::input(agg, 0)).unwrap();
    reg.connect(PointId::output(agg, 0), PointId::input(output, 0)).unwrap();
    Chain {
        reg,
        input,
        agg,
        output,
    }
}

/// T3-PRP-01: an input node's failure reaches everything downstream
#[test]
fn test_input_node_fails_everything() {
    let c = build_chain();
    let mark = propagate(&c.reg, PointId::output(c.input, 0));

    assert_eq!(mark.connections.len(), 3);
    assert!(mark.is_node_failed(c.input));
    assert!(mark.is_node_failed(c.agg));
    assert!(mark.is_node_failed(c.output));
    assert!(mark.is_point_failed(PointId::input(c.agg, 0)));
    assert!(mark.is_point_failed(PointId::output(c.agg, 0)));
    assert!(mark.is_point_failed(PointId::input(c.output, 0)));
}

/// T3-PRP-02: an aggregate output does not walk its internal wiring forward
#[test]
fn test_aggregate_output_skips_internal_wiring() {
    let c = build_chain();
    let mark = propagate(&c.reg, PointId::output(c.agg, 0));

    let internal = c
        .reg
        .connections()
        .iter()
        .find(|conn| conn.is_internal())
        .copied()
        .unwrap();
    assert!(!mark.is_connection_failed(&internal));
    assert!(!mark.is_point_failed(PointId::input(c.agg, 0)));
    assert!(!mark.is_node_failed(c.input));
    assert!(mark.is_point_failed(PointId::input(c.output, 0)));
    assert_eq!(mark.connections.len(), 1);
}

/// T3-PRP-03: an input point walks backward through internal then external
/// wiring
#[test]
fn test_input_point_walks_backward() {
    let c = build_chain();
    let mark = propagate(&c.reg, PointId::input(c.agg, 0));

    assert!(mark.is_point_failed(PointId::output(c.input, 0)));
    assert!(mark.is_point_failed(PointId::output(c.agg, 0)));
    assert!(mark.is_node_failed(c.input));
    assert_eq!(mark.connections.len(), 3);
}

/// T3-PRP-04: output sink input walks back to its feeder only
#[test]
fn test_sink_input() {
    let c = build_chain();
    let mark = propagate(&c.reg, PointId::input(c.output, 0));
    assert_eq!(
        mark.points.iter().copied().collect::<Vec<_>>(),
        vec![PointId::output(c.agg, 0), PointId::input(c.output, 0)]
    );
    assert_eq!(
        mark.nodes.iter().copied().collect::<Vec<_>>(),
        vec![c.agg, c.output]
    );
}

/// T3-PRP-05: cycles terminate
#[test]
fn test_cycle_terminates() {
    let mut reg = NodeRegistry::new();
    let a = reg.add_node(NodeKind::Aggregate);
    let b = reg.add_node(NodeKind::Aggregate);
    reg.connect(PointId::output(a, 0), PointId::input(b, 0)).unwrap();
    reg.connect(PointId::output(b, 0), PointId::input(a, 0)).unwrap();
    reg.connect(PointId::output(a, 0), PointId::input(a, 0)).unwrap();
    reg.connect(PointId::output(b, 0), PointId::input(b, 0)).unwrap();

    let mark = propagate(&reg, PointId::input(a, 0));
    assert_eq!(mark.connections.len(), 4);
    assert_eq!(mark.nodes.len(), 2);
    assert_eq!(mark, propagate(&reg, PointId::input(a, 0)));
}

/// T3-PRP-06: unknown or deleted triggers yield an empty mark
#[test]
fn test_dead_trigger() {
    let mut c = build_chain();
    assert!(propagate(&c.reg, PointId::output(NodeId(77), 0)).is_empty());

    c.reg.delete_node(c.input).unwrap();
    assert!(propagate(&c.reg, PointId::output(c.input, 0)).is_empty());
}

/// T3-PRP-07: stale connections to deleted nodes are not followed
#[test]
fn test_stale_connection_ignored() {
    let input = Node::new(NodeId(0), NodeKind::Input, 1);
    let mut agg = Node::new(NodeId(1), NodeKind::Aggregate, 1);
    agg.deleted = true;
    let stale = Connection {
        from: PointId::output(NodeId(0), 0),
        to: PointId::input(NodeId(1), 0),
        kind: ConnectionKind::External,
    };
    let reg = NodeRegistry::from_snapshot(vec![input, agg], vec![stale]);

    let mut mark = propagate(&reg, PointId::output(NodeId(0), 0));
    assert!(mark.connections.is_empty());
    assert_eq!(mark.nodes.len(), 1);
    assert!(!mark.is_node_failed(NodeId(1)));

    mark.clear();
    assert!(mark.is_empty());
}

/// T3-PRP-09: propagation over a snapshot listed out of id order
#[test]
fn test_snapshot_order_does_not_matter() {
    let output = Node::new(NodeId(1), NodeKind::Output, 1);
    let input = Node::new(NodeId(0), NodeKind::Input, 1);
    let wire = Connection {
        from: PointId::output(NodeId(0), 0),
        to: PointId::input(NodeId(1), 0),
        kind: ConnectionKind::External,
    };
    let reg = NodeRegistry::from_snapshot(vec![output, input], vec![wire]);

    let mark = propagate(&reg, PointId::output(NodeId(0), 0));
    assert_eq!(mark.points.len(), 2);
    assert!(mark.is_connection_failed(&wire));
    assert!(mark.is_node_failed(NodeId(1)));
}

/// T3-PRP-10: a failed node's footprint covers all of its ports
#[test]
fn test_failed_node_footprint() {
    let c = build_chain();
    let mark = propagate(&c.reg, PointId::input(c.output, 0));

    let agg = c.reg.node(c.agg).unwrap();
    assert_eq!(mark.node_ports(agg).count(), 12);
    let input = c.reg.node(c.input).unwrap();
    assert_eq!(mark.node_ports(input).count(), 0);

    let footprint = mark.footprint(&c.reg);
    // Six inputs and six outputs of the aggregate, plus the sink input.
    assert_eq!(footprint.len(), 13);
    assert!(footprint.contains(&PointId::input(c.agg, 3)));
    assert!(!footprint.contains(&PointId::output(c.input, 0)));
}

fn random_diagram(aggregates: usize, wires: &[(usize, u8, usize, u8)]) -> NodeRegistry {
    let mut reg = NodeRegistry::new();
    let input = reg.add_node(NodeKind::Input);
    let ids: Vec<NodeId> = (0..aggregates).map(|_| reg.add_node(NodeKind::Aggregate)).collect();
    let _ = reg.connect(PointId::output(input, 0), PointId::input(ids[0], 0));
    for &(from, out_port, to, in_port) in wires {
        let from = ids[from % aggregates];
        let to = ids[to % aggregates];
        // Rejected wiring (an input already fed) is fine to skip.
        let _ = reg.connect(
            PointId::output(from, out_port % 6),
            PointId::input(to, in_port % 6),
        );
    }
    reg
}

proptest! {
    /// T3-PRP-08: determinism and closure of the mark sets
    #[test]
    fn propagation_is_deterministic_and_closed(
        aggregates in 1usize..6,
        wires in prop::collection::vec((0usize..6, 0u8..6, 0usize..6, 0u8..6), 0..24),
        trigger_node in 0usize..6,
        trigger_port in 0u8..6,
        trigger_out in any::<bool>(),
    ) {
        let reg = random_diagram(aggregates, &wires);
        let node = NodeId((1 + trigger_node % aggregates) as u32);
        let trigger = if trigger_out {
            PointId::output(node, trigger_port)
        } else {
            PointId::input(node, trigger_port)
        };

        let first = propagate(&reg, trigger);
        let second = propagate(&reg, trigger);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.is_point_failed(trigger));
        for conn in &first.connections {
            prop_assert!(first.is_point_failed(conn.from));
            prop_assert!(first.is_point_failed(conn.to));
        }
        for point in &first.points {
            prop_assert!(first.is_node_failed(point.node));
        }
    }
}
