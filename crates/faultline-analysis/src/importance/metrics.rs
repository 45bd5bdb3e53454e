//! I1 / I2 / centrality table.
//!
//! - I1: number of sink labels reachable from the label.
//! - I2: number of labels reachable from the label.
//! - centrality: out-degree + in-degree in the adjacency matrix.

use faultline_core::config::AnalysisConfig;

use crate::connectivity::AdjacencyMatrix;

use super::reachability::{reachability, select_engine};
use super::types::{MetricRow, ReachabilityEngine};

/// Compute one metric row per label, in label order, with the engine chosen
/// by `config`. Sink labels absent from the matrix are ignored.
pub fn analyze_importance<I, S>(
    matrix: &AdjacencyMatrix,
    sink_labels: I,
    config: &AnalysisConfig,
) -> Vec<MetricRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let engine = select_engine(matrix.len(), config);
    analyze_importance_with(matrix, sink_labels, engine)
}

/// Same as [`analyze_importance`] with an explicit engine.
pub fn analyze_importance_with<I, S>(
    matrix: &AdjacencyMatrix,
    sink_labels: I,
    engine: ReachabilityEngine,
) -> Vec<MetricRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if matrix.is_empty() {
        return Vec::new();
    }

    let mut is_sink = vec![false; matrix.len()];
    for label in sink_labels {
        if let Some(i) = matrix.index_of(label.as_ref()) {
            is_sink[i] = true;
        }
    }

    let reach = reachability(matrix, engine);
    let rows: Vec<MetricRow> = matrix
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let reachable = &reach[i];
            let i1 = reachable
                .iter()
                .zip(&is_sink)
                .filter(|&(&r, &sink)| r && sink)
                .count();
            let i2 = reachable.iter().filter(|&&r| r).count();
            MetricRow {
                label: label.clone(),
                i1,
                i2,
                centrality: matrix.out_degree(i) + matrix.in_degree(i),
            }
        })
        .collect();

    tracing::debug!(%engine, rows = rows.len(), "importance table computed");
    rows
}
