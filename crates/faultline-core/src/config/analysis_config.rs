//! Reachability/importance analysis configuration.

use serde::{Deserialize, Serialize};

/// Label count below which `auto` selects the matrix-power engine.
pub const DEFAULT_MATRIX_ENGINE_LIMIT: usize = 128;

/// Which reachability engine the importance analyzer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineChoice {
    /// Pick by label count against `matrix_engine_limit`.
    Auto,
    /// Boolean matrix powers.
    Matrix,
    /// Breadth-first search per label.
    Bfs,
}

impl EngineChoice {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Matrix => "matrix",
            Self::Bfs => "bfs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "matrix" => Some(Self::Matrix),
            "bfs" => Some(Self::Bfs),
            _ => None,
        }
    }
}

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Reachability engine. Default: auto.
    pub reachability_engine: Option<EngineChoice>,
    /// Label count below which `auto` uses matrix powers. Default: 128.
    pub matrix_engine_limit: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective engine choice, defaulting to `Auto`.
    pub fn effective_engine(&self) -> EngineChoice {
        self.reachability_engine.unwrap_or(EngineChoice::Auto)
    }

    /// Returns the effective matrix engine limit, defaulting to 128.
    pub fn effective_matrix_engine_limit(&self) -> usize {
        self.matrix_engine_limit.unwrap_or(DEFAULT_MATRIX_ENGINE_LIMIT)
    }
}
