//! Square 0/1 adjacency matrix indexed by sorted labels.
//!
//! Orientation: `cell(i, j) == 1` iff there is an edge from label `i` to
//! label `j`. Rows are outgoing edges. `transposed()` yields the
//! incoming-per-row view when a consumer wants it.

use std::fmt;

/// Adjacency matrix over a lexicographically sorted, deduplicated label set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// All-zero matrix over `labels`, which are sorted and deduplicated.
    pub fn zeroed(mut labels: Vec<String>) -> Self {
        labels.sort();
        labels.dedup();
        let n = labels.len();
        Self {
            labels,
            cells: vec![vec![0; n]; n],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Row/column index of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    pub fn get(&self, from: usize, to: usize) -> u8 {
        self.cells
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Set the edge `from -> to`. Out-of-range indices are ignored.
    pub fn set(&mut self, from: usize, to: usize) {
        if let Some(cell) = self.cells.get_mut(from).and_then(|row| row.get_mut(to)) {
            *cell = 1;
        }
    }

    pub fn row(&self, index: usize) -> &[u8] {
        self.cells.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(index)
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(|(j, _)| j)
    }

    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.get(index).is_some_and(|&cell| cell != 0))
            .map(|(i, _)| i)
    }

    pub fn out_degree(&self, index: usize) -> usize {
        self.successors(index).count()
    }

    pub fn in_degree(&self, index: usize) -> usize {
        self.predecessors(index).count()
    }

    /// All edges as `(from, to)` index pairs, row-major.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).flat_map(move |i| self.successors(i).map(move |j| (i, j)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Same labels, every edge reversed.
    pub fn transposed(&self) -> Self {
        let n = self.len();
        let mut cells = vec![vec![0; n]; n];
        for (i, j) in self.edges() {
            cells[j][i] = 1;
        }
        Self {
            labels: self.labels.clone(),
            cells,
        }
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(1);
        write!(f, "{:width$}", "")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        for (label, row) in self.labels.iter().zip(&self.cells) {
            writeln!(f)?;
            write!(f, "{label:>width$}")?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
        }
        Ok(())
    }
}
