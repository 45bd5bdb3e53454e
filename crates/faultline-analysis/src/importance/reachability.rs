//! Transitive reachability over an adjacency matrix.
//!
//! - small label sets → boolean matrix powers
//! - larger ones → per-label BFS
//!
//! A label reaches itself only through a cycle.

use std::collections::VecDeque;

use faultline_core::config::{AnalysisConfig, EngineChoice};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::connectivity::AdjacencyMatrix;

use super::types::ReachabilityEngine;

/// `sets[i][j]` is true iff label `j` is reachable from label `i` by a path
/// of length 1 or more.
pub type ReachabilitySets = Vec<Vec<bool>>;

/// Pick the engine for `label_count` labels under `config`.
pub fn select_engine(label_count: usize, config: &AnalysisConfig) -> ReachabilityEngine {
    match config.effective_engine() {
        EngineChoice::Matrix => ReachabilityEngine::MatrixPower,
        EngineChoice::Bfs => ReachabilityEngine::Bfs,
        EngineChoice::Auto => {
            if label_count < config.effective_matrix_engine_limit() {
                ReachabilityEngine::MatrixPower
            } else {
                ReachabilityEngine::Bfs
            }
        }
    }
}

/// Compute reachability sets with the given engine.
pub fn reachability(matrix: &AdjacencyMatrix, engine: ReachabilityEngine) -> ReachabilitySets {
    match engine {
        ReachabilityEngine::MatrixPower => matrix_power_closure(matrix),
        ReachabilityEngine::Bfs => bfs_closure(matrix),
    }
}

/// `reach = M^1 | M^2 | ... | M^N`.
///
/// No simple path is longer than `N`, so `N` powers suffice. Once a power
/// adds nothing new, later powers cannot either, and the loop stops early.
fn matrix_power_closure(matrix: &AdjacencyMatrix) -> ReachabilitySets {
    let n = matrix.len();
    let base: Vec<Vec<bool>> = matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|&cell| cell != 0).collect())
        .collect();

    let mut reach = base.clone();
    let mut power = base.clone();
    for k in 2..=n {
        power = boolean_product(&power, &base);
        let mut changed = false;
        for (reach_row, power_row) in reach.iter_mut().zip(&power) {
            for (r, &p) in reach_row.iter_mut().zip(power_row) {
                if p && !*r {
                    *r = true;
                    changed = true;
                }
            }
        }
        if !changed {
            tracing::trace!(power = k, "reachability saturated");
            break;
        }
    }
    reach
}

fn boolean_product(a: &[Vec<bool>], b: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let n = a.len();
    let mut out = vec![vec![false; n]; n];
    for (i, a_row) in a.iter().enumerate() {
        for (k, &a_ik) in a_row.iter().enumerate() {
            if !a_ik {
                continue;
            }
            for (o, &b_kj) in out[i].iter_mut().zip(&b[k]) {
                *o |= b_kj;
            }
        }
    }
    out
}

fn bfs_closure(matrix: &AdjacencyMatrix) -> ReachabilitySets {
    let n = matrix.len();
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(n, matrix.edge_count());
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
    for (from, to) in matrix.edges() {
        graph.add_edge(nodes[from], nodes[to], ());
    }

    nodes.iter().map(|&start| bfs_from(&graph, start)).collect()
}

/// BFS from `start`. The start is not pre-marked, so it only shows up as
/// reached when a cycle leads back to it.
fn bfs_from(graph: &DiGraph<(), ()>, start: NodeIndex) -> Vec<bool> {
    let mut reached = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for neighbor in graph.neighbors_directed(node, Direction::Outgoing) {
            if !reached[neighbor.index()] {
                reached[neighbor.index()] = true;
                queue.push_back(neighbor);
            }
        }
    }
    reached
}
