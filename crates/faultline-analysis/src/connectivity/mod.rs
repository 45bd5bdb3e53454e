//! Connectivity: label adjacency matrix over a stable, sorted label set.

pub mod builder;
pub mod matrix;

pub use builder::build_adjacency;
pub use matrix::AdjacencyMatrix;
