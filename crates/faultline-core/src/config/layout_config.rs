//! Layered tree layout configuration.

use serde::{Deserialize, Serialize};

/// Configuration for FTA/RCA tree construction and positioning.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between neighbours on a level. Default: 3.0.
    pub column_spacing: Option<f64>,
    /// Vertical distance between levels. Default: 2.0.
    pub row_height: Option<f64>,
    /// Horizontal offset of an annotation node from its parent. Default: 0.8.
    pub annotation_offset: Option<f64>,
    /// Label of the synthetic FTA root. Default: "System".
    pub system_label: Option<String>,
    /// Prefix of synthetic RCA annotation labels. Default: "VLK".
    pub annotation_prefix: Option<String>,
    /// Explicit cap on level-fixup passes. Never exceeds `node_count + 1`.
    pub max_fixup_passes: Option<usize>,
}

impl LayoutConfig {
    pub fn effective_column_spacing(&self) -> f64 {
        self.column_spacing.unwrap_or(3.0)
    }

    pub fn effective_row_height(&self) -> f64 {
        self.row_height.unwrap_or(2.0)
    }

    pub fn effective_annotation_offset(&self) -> f64 {
        self.annotation_offset.unwrap_or(0.8)
    }

    pub fn effective_system_label(&self) -> &str {
        self.system_label.as_deref().unwrap_or("System")
    }

    pub fn effective_annotation_prefix(&self) -> &str {
        self.annotation_prefix.as_deref().unwrap_or("VLK")
    }

    /// Pass cap for a graph of `node_count` nodes.
    ///
    /// Longest-path relaxation settles a DAG in at most `node_count` passes,
    /// so one extra pass that still changes something proves a cycle.
    pub fn effective_fixup_passes(&self, node_count: usize) -> usize {
        let bound = node_count + 1;
        match self.max_fixup_passes {
            Some(cap) => cap.min(bound),
            None => bound,
        }
    }
}
