//! Level assignment and iterative longest-path fixup.
//!
//! Levels are indexed by `NodeIndex::index()`; `DiGraph` indices are dense.

use std::collections::VecDeque;

use faultline_core::errors::{LayoutError, LayoutResult, TreeVariant};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::types::TreeNode;

/// BFS depth from `source`, first visit wins.
///
/// Returns the levels and the visit order. Nodes not reachable from
/// `source` stay `None`.
pub fn bfs_levels(
    graph: &DiGraph<TreeNode, ()>,
    source: NodeIndex,
) -> (Vec<Option<usize>>, Vec<NodeIndex>) {
    let mut levels = vec![None; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());
    extend_bfs(graph, source, 0, &mut levels, &mut order);
    (levels, order)
}

/// Continue a BFS from `start` at `start_level` over nodes not yet levelled.
pub fn extend_bfs(
    graph: &DiGraph<TreeNode, ()>,
    start: NodeIndex,
    start_level: usize,
    levels: &mut [Option<usize>],
    order: &mut Vec<NodeIndex>,
) {
    if levels[start.index()].is_some() {
        return;
    }
    levels[start.index()] = Some(start_level);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        let next_level = levels[node.index()].unwrap_or(0) + 1;
        // Visit successors in node creation order.
        let mut successors: Vec<NodeIndex> =
            graph.neighbors_directed(node, Direction::Outgoing).collect();
        successors.sort_unstable();
        for successor in successors {
            if levels[successor.index()].is_none() {
                levels[successor.index()] = Some(next_level);
                queue.push_back(successor);
            }
        }
    }
}

/// For each node, the longest of its shortest-path distances to any leaf.
///
/// Unreachable leaves are skipped; a node that reaches no leaf gets 0.
/// Nodes flagged in `skip` get 0 without a search.
pub fn leaf_distances(
    graph: &DiGraph<TreeNode, ()>,
    leaves: &[NodeIndex],
    skip: &[bool],
) -> Vec<usize> {
    graph
        .node_indices()
        .map(|node| {
            if skip[node.index()] {
                return 0;
            }
            let distances = bfs_distances(graph, node);
            leaves
                .iter()
                .filter_map(|leaf| distances[leaf.index()])
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Unit-weight shortest-path lengths from `start`.
fn bfs_distances(graph: &DiGraph<TreeNode, ()>, start: NodeIndex) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count()];
    distances[start.index()] = Some(0);
    let mut queue = VecDeque::new();
    queue.push_back((start, 0usize));

    while let Some((node, distance)) = queue.pop_front() {
        for successor in graph.neighbors_directed(node, Direction::Outgoing) {
            if distances[successor.index()].is_none() {
                distances[successor.index()] = Some(distance + 1);
                queue.push_back((successor, distance + 1));
            }
        }
    }
    distances
}

/// Relax edges until levels are consistent.
///
/// - FTA: every edge `u -> v` ends strictly below its source
///   (`level[v] > level[u]`).
/// - RCA (before reversal): every edge `u -> v` whose target is not an
///   annotation starts strictly above its target (`level[u] > level[v]`).
///
/// Runs at most `max_passes` full passes; a pass that still changes a level
/// at the cap means the edges contain a cycle.
pub fn settle_levels(
    graph: &DiGraph<TreeNode, ()>,
    levels: &mut [usize],
    variant: TreeVariant,
    is_annotation: &[bool],
    max_passes: usize,
) -> LayoutResult<usize> {
    for pass in 1..=max_passes {
        let mut changed = false;
        for edge in graph.edge_references() {
            let (u, v) = (edge.source().index(), edge.target().index());
            match variant {
                TreeVariant::Fta => {
                    if levels[u] >= levels[v] {
                        levels[v] = levels[u] + 1;
                        changed = true;
                    }
                }
                TreeVariant::Rca => {
                    if !is_annotation[v] && levels[u] <= levels[v] {
                        levels[u] = levels[v] + 1;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            tracing::trace!(%variant, passes = pass, "levels settled");
            return Ok(pass);
        }
    }
    Err(LayoutError::DidNotConverge {
        variant,
        iterations: max_passes,
    })
}
