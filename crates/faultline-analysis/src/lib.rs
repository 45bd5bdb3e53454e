//! # faultline-analysis
//!
//! Structural analysis of coupling diagrams: input, output and aggregate
//! nodes joined by point-to-point connections.
//!
//! - **Model**: typed nodes, points, connections and the node registry
//! - **Connectivity**: label adjacency matrix over a sorted label set
//! - **Propagation**: mixed-direction failure marking from one trigger
//! - **Importance**: reachability-based I1/I2/centrality metrics
//! - **Layering**: FTA/RCA leveled trees with barycenter positions
//! - **Report**: every view of one diagram from a single snapshot
//!
//! Every operation is a pure function over a snapshot; nothing is cached
//! between calls.

pub mod connectivity;
pub mod importance;
pub mod layering;
pub mod model;
pub mod propagation;
pub mod report;
