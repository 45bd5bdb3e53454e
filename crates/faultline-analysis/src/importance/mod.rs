//! Reachability & importance: per-label I1, I2 and degree centrality.
//!
//! Two interchangeable reachability engines with identical results:
//! boolean matrix powers for small label sets, per-label BFS otherwise.

pub mod metrics;
pub mod reachability;
pub mod types;

pub use metrics::{analyze_importance, analyze_importance_with};
pub use reachability::{reachability, select_engine, ReachabilitySets};
pub use types::{MetricRow, ReachabilityEngine};
