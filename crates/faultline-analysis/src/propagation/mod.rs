//! Failure propagation: which points, connections and nodes fail when one
//! point fails.
//!
//! Input points propagate backward to whatever feeds them; output points
//! propagate forward to their consumers.

pub mod engine;
pub mod types;

pub use engine::propagate;
pub use types::FailureMark;
