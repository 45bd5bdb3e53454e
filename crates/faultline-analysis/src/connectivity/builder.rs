//! Builds the label adjacency matrix from internal-connection label pairs.

use faultline_core::types::collections::BTreeSet;

use super::matrix::AdjacencyMatrix;

/// Build the adjacency matrix for `(outLabel, inLabel)` pairs.
///
/// Labels are collected from both ends of every pair and sorted
/// lexicographically; that order fixes every row/column index. The result
/// keeps edges in their given direction (`M[from][to] = 1`). An empty pair
/// list yields a 0×0 matrix.
pub fn build_adjacency<S: AsRef<str>>(pairs: &[(S, S)]) -> AdjacencyMatrix {
    let labels: BTreeSet<&str> = pairs
        .iter()
        .flat_map(|(from, to)| [from.as_ref(), to.as_ref()])
        .collect();

    let mut matrix = AdjacencyMatrix::zeroed(labels.into_iter().map(str::to_owned).collect());
    for (from, to) in pairs {
        if let (Some(i), Some(j)) = (matrix.index_of(from.as_ref()), matrix.index_of(to.as_ref())) {
            matrix.set(i, j);
        }
    }

    tracing::debug!(
        labels = matrix.len(),
        edges = matrix.edge_count(),
        "adjacency matrix built"
    );
    matrix
}
