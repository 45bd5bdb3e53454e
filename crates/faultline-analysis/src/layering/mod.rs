//! Layered trees: FTA and RCA views of the label dependency graph.
//!
//! Both variants share one pipeline: build the directed label graph, add
//! synthetic nodes, assign levels, settle them with iterative longest-path
//! fixup, then place nodes level by level with a barycenter ordering.

pub mod builder;
pub mod graph;
pub mod levels;
pub mod positions;
pub mod types;

pub use builder::{build_fault_tree, build_layered_tree, build_root_cause_tree};
pub use types::{LayeredTree, NodeCategory, Position, TreeNode};
