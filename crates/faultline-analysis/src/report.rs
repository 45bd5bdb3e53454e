//! One-shot analysis of a diagram snapshot.

use faultline_core::config::FaultlineConfig;
use faultline_core::errors::LayoutResult;
use serde::Serialize;

use crate::connectivity::{build_adjacency, AdjacencyMatrix};
use crate::importance::{analyze_importance, MetricRow};
use crate::layering::{build_fault_tree, build_root_cause_tree, LayeredTree};
use crate::model::NodeRegistry;

/// Every structural view of one diagram.
#[derive(Debug, Clone)]
pub struct DiagramReport {
    pub matrix: AdjacencyMatrix,
    pub metrics: Vec<MetricRow>,
    pub fta: LayoutResult<LayeredTree>,
    pub rca: LayoutResult<LayeredTree>,
}

/// Counts-only view of a report, for logs and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub labels: usize,
    pub edges: usize,
    pub fta_depth: Option<usize>,
    pub rca_depth: Option<usize>,
}

impl DiagramReport {
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            labels: self.matrix.len(),
            edges: self.matrix.edge_count(),
            fta_depth: self.fta.as_ref().ok().map(LayeredTree::depth),
            rca_depth: self.rca.as_ref().ok().map(LayeredTree::depth),
        }
    }
}

/// Run connectivity, importance and both tree layouts over `registry`.
///
/// All views derive from the same internal-wiring label pairs. A layout
/// failure is reported in its own slot and does not abort the others.
#[tracing::instrument(skip_all)]
pub fn analyze_diagram(registry: &NodeRegistry, config: &FaultlineConfig) -> DiagramReport {
    let pairs = registry.internal_label_pairs();
    let matrix = build_adjacency(&pairs);
    let metrics = analyze_importance(&matrix, registry.sink_labels(), &config.analysis);
    let fta = build_fault_tree(&pairs, registry, &config.layout);
    let rca = build_root_cause_tree(&pairs, registry, &config.layout);

    let report = DiagramReport {
        matrix,
        metrics,
        fta,
        rca,
    };
    let summary = report.summary();
    tracing::debug!(
        labels = summary.labels,
        edges = summary.edges,
        fta_ok = report.fta.is_ok(),
        rca_ok = report.rca.is_ok(),
        "diagram analyzed"
    );
    report
}
