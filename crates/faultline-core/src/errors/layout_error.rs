//! Layered tree construction errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error_code::{self, FaultlineErrorCode};

/// Which of the two layered trees is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeVariant {
    /// Fault tree: consequences traced up to a synthetic `System` root.
    Fta,
    /// Root-cause tree: effects traced down to leaf causes.
    Rca,
}

impl TreeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fta => "fta",
            Self::Rca => "rca",
        }
    }
}

impl fmt::Display for TreeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conditions reported to the caller instead of a layered tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// FTA over a graph with no in-degree-0 node (includes the empty graph).
    #[error("No root nodes found to build the fault tree")]
    NoRoots,

    /// Level fixup still changed levels after the pass cap; the edge set
    /// contains a cycle that admits no consistent layering.
    #[error("{variant} level assignment did not converge after {iterations} passes")]
    DidNotConverge { variant: TreeVariant, iterations: usize },
}

impl FaultlineErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRoots => error_code::NO_ROOTS,
            Self::DidNotConverge { .. } => error_code::LAYOUT_ERROR,
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;
