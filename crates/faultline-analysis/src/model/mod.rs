//! Diagram model: nodes, points, connections, and the registry that owns them.

pub mod registry;
pub mod types;

pub use registry::NodeRegistry;
pub use types::*;
