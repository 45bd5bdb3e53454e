//! Level-by-level placement with a barycenter ordering.

use faultline_core::config::LayoutConfig;
use faultline_core::types::collections::BTreeMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::types::{Position, TreeNode};

/// Place every node in `order`.
///
/// Within a level, regular nodes are spaced evenly and centred on `x = 0`.
/// On levels below the top with more than one regular node, nodes are first
/// ordered by the mean `x` of their already-placed predecessors. Annotation
/// nodes (those with an entry in `annotation_parent`) sit beside their
/// parent, shifted right by the annotation offset.
pub fn assign_positions(
    graph: &DiGraph<TreeNode, ()>,
    levels: &[usize],
    order: &[NodeIndex],
    annotation_parent: &[Option<NodeIndex>],
    config: &LayoutConfig,
) -> Vec<Option<Position>> {
    let spacing = config.effective_column_spacing();
    let row_height = config.effective_row_height();
    let offset = config.effective_annotation_offset();

    let mut by_level: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
    for &node in order {
        by_level.entry(levels[node.index()]).or_default().push(node);
    }

    let mut positions: Vec<Option<Position>> = vec![None; graph.node_count()];
    for (&level, nodes) in &by_level {
        let y = -(level as f64) * row_height;
        let (annotations, mut regular): (Vec<NodeIndex>, Vec<NodeIndex>) = nodes
            .iter()
            .copied()
            .partition(|node| annotation_parent[node.index()].is_some());

        if level > 0 && regular.len() > 1 {
            let mut keyed: Vec<(NodeIndex, f64)> = regular
                .iter()
                .map(|&node| (node, barycenter(graph, node, &positions)))
                .collect();
            keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
            regular = keyed.into_iter().map(|(node, _)| node).collect();
        }

        let centre = (regular.len() as f64 - 1.0) / 2.0;
        for (i, node) in regular.iter().enumerate() {
            positions[node.index()] = Some(Position {
                x: (i as f64 - centre) * spacing,
                y,
            });
        }

        for node in annotations {
            let parent_x = annotation_parent[node.index()]
                .and_then(|parent| positions[parent.index()])
                .map_or(0.0, |p| p.x);
            positions[node.index()] = Some(Position {
                x: parent_x + offset,
                y,
            });
        }
    }
    positions
}

/// Mean `x` of the placed predecessors of `node`, or 0 if none are placed.
fn barycenter(
    graph: &DiGraph<TreeNode, ()>,
    node: NodeIndex,
    positions: &[Option<Position>],
) -> f64 {
    let placed: Vec<f64> = graph
        .neighbors_directed(node, Direction::Incoming)
        .filter_map(|p| positions[p.index()].map(|pos| pos.x))
        .collect();
    if placed.is_empty() {
        0.0
    } else {
        placed.iter().sum::<f64>() / placed.len() as f64
    }
}
