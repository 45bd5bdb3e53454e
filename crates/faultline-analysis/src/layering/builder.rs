//! FTA / RCA tree construction.

use faultline_core::config::LayoutConfig;
use faultline_core::errors::{LayoutError, LayoutResult, TreeVariant};
use faultline_core::types::collections::BTreeMap;
use petgraph::graph::NodeIndex;

use crate::model::registry::LabelLookup;

use super::graph::LabelGraph;
use super::levels::{bfs_levels, extend_bfs, leaf_distances, settle_levels};
use super::positions::assign_positions;
use super::types::{LayeredTree, NodeCategory, Position};

/// Build the fault tree for `edges`. See [`build_layered_tree`].
pub fn build_fault_tree<S, L>(
    edges: &[(S, S)],
    lookup: &L,
    config: &LayoutConfig,
) -> LayoutResult<LayeredTree>
where
    S: AsRef<str>,
    L: LabelLookup + ?Sized,
{
    build_layered_tree(edges, TreeVariant::Fta, lookup, config)
}

/// Build the root-cause tree for `edges`. See [`build_layered_tree`].
pub fn build_root_cause_tree<S, L>(
    edges: &[(S, S)],
    lookup: &L,
    config: &LayoutConfig,
) -> LayoutResult<LayeredTree>
where
    S: AsRef<str>,
    L: LabelLookup + ?Sized,
{
    build_layered_tree(edges, TreeVariant::Rca, lookup, config)
}

/// Build a levelled, positioned tree over `(from, to)` label edges.
///
/// **FTA**: nodes without incoming edges are roots; a synthetic `System`
/// node points at every root and sits at level 0, roots at level 1. Levels
/// start as BFS depth from `System` and are pushed down until every child is
/// strictly below its parent. Fails with [`LayoutError::NoRoots`] when no
/// root exists, which includes an empty edge list.
///
/// **RCA**: nodes without outgoing edges are leaves (root causes). Every
/// other node gets one annotation node (`VLK_1`, `VLK_2`, ...). A node's
/// level starts as its farthest shortest-path distance to a leaf, is pushed
/// up until every node is strictly above its non-annotation successors, and
/// is then reversed so leaves sit at the bottom. Annotations land one level
/// below their parent.
///
/// Either variant fails with [`LayoutError::DidNotConverge`] when the edges
/// contain a cycle that admits no consistent layering.
pub fn build_layered_tree<S, L>(
    edges: &[(S, S)],
    variant: TreeVariant,
    lookup: &L,
    config: &LayoutConfig,
) -> LayoutResult<LayeredTree>
where
    S: AsRef<str>,
    L: LabelLookup + ?Sized,
{
    let mut g = LabelGraph::from_edges(edges, lookup);
    let tree = match variant {
        TreeVariant::Fta => layout_fta(&mut g, config)?,
        TreeVariant::Rca => layout_rca(&mut g, config)?,
    };
    tracing::debug!(
        %variant,
        nodes = tree.node_count(),
        depth = tree.depth(),
        "layered tree built"
    );
    Ok(tree)
}

fn layout_fta(g: &mut LabelGraph, config: &LayoutConfig) -> LayoutResult<LayeredTree> {
    let roots: Vec<NodeIndex> = g
        .graph
        .node_indices()
        .filter(|&n| g.in_degree(n) == 0)
        .collect();
    if roots.is_empty() {
        tracing::debug!(nodes = g.node_count(), "no roots for fault tree");
        return Err(LayoutError::NoRoots);
    }

    let system = g.add_synthetic(config.effective_system_label());
    for &root in &roots {
        g.graph.add_edge(system, root, ());
    }

    let (mut bfs, mut order) = bfs_levels(&g.graph, system);
    // Closed cycles have no root; give each one an entry from System so
    // every node is levelled before the fixup reports the cycle.
    loop {
        let Some(orphan) = g.graph.node_indices().find(|n| bfs[n.index()].is_none()) else {
            break;
        };
        tracing::debug!(label = %g.graph[orphan].label, "cycle unreachable from roots");
        g.graph.add_edge(system, orphan, ());
        extend_bfs(&g.graph, orphan, 1, &mut bfs, &mut order);
    }
    let mut levels: Vec<usize> = bfs.into_iter().map(|l| l.unwrap_or(0)).collect();

    let no_annotations = vec![false; g.node_count()];
    let passes = config.effective_fixup_passes(g.node_count());
    settle_levels(&g.graph, &mut levels, TreeVariant::Fta, &no_annotations, passes)?;

    let no_parents = vec![None; g.node_count()];
    let positions = assign_positions(&g.graph, &levels, &order, &no_parents, config);

    let categories: Vec<NodeCategory> = g
        .graph
        .node_indices()
        .map(|n| {
            if n == system {
                NodeCategory::System
            } else if roots.contains(&n) {
                NodeCategory::Root
            } else {
                NodeCategory::Other
            }
        })
        .collect();

    Ok(assemble(g, TreeVariant::Fta, &levels, &positions, &categories))
}

fn layout_rca(g: &mut LabelGraph, config: &LayoutConfig) -> LayoutResult<LayeredTree> {
    let input_nodes: Vec<NodeIndex> = g.graph.node_indices().collect();
    let leaves: Vec<NodeIndex> = input_nodes
        .iter()
        .copied()
        .filter(|&n| g.out_degree(n) == 0)
        .collect();

    let prefix = config.effective_annotation_prefix().to_string();
    let mut annotation_parent: Vec<Option<NodeIndex>> = vec![None; g.node_count()];
    let non_leaves: Vec<NodeIndex> = input_nodes
        .iter()
        .copied()
        .filter(|n| !leaves.contains(n))
        .collect();
    for (seq, &parent) in non_leaves.iter().enumerate() {
        let annotation = g.add_synthetic(&format!("{prefix}_{}", seq + 1));
        g.graph.add_edge(parent, annotation, ());
        annotation_parent.push(Some(parent));
        debug_assert_eq!(annotation_parent.len(), annotation.index() + 1);
    }
    let is_annotation: Vec<bool> = annotation_parent.iter().map(Option::is_some).collect();

    let mut levels = leaf_distances(&g.graph, &leaves, &is_annotation);
    let passes = config.effective_fixup_passes(g.node_count());
    settle_levels(&g.graph, &mut levels, TreeVariant::Rca, &is_annotation, passes)?;

    let max_level = levels.iter().copied().max().unwrap_or(0);
    for level in levels.iter_mut() {
        *level = max_level - *level;
    }
    for (i, parent) in annotation_parent.iter().enumerate() {
        if let Some(parent) = parent {
            levels[i] = levels[parent.index()] + 1;
        }
    }

    let order: Vec<NodeIndex> = g.graph.node_indices().collect();
    let positions = assign_positions(&g.graph, &levels, &order, &annotation_parent, config);

    let categories: Vec<NodeCategory> = g
        .graph
        .node_indices()
        .map(|n| {
            if is_annotation[n.index()] {
                NodeCategory::Annotation
            } else if leaves.contains(&n) {
                NodeCategory::Leaf
            } else {
                NodeCategory::Other
            }
        })
        .collect();

    Ok(assemble(g, TreeVariant::Rca, &levels, &positions, &categories))
}

fn assemble(
    g: &LabelGraph,
    variant: TreeVariant,
    levels: &[usize],
    positions: &[Option<Position>],
    categories: &[NodeCategory],
) -> LayeredTree {
    let mut level_map = BTreeMap::new();
    let mut position_map = BTreeMap::new();
    let mut category_map = BTreeMap::new();
    for n in g.graph.node_indices() {
        let label = g.graph[n].label.clone();
        let i = n.index();
        if let Some(position) = positions[i] {
            position_map.insert(label.clone(), position);
        }
        level_map.insert(label.clone(), levels[i]);
        category_map.insert(label, categories[i]);
    }
    LayeredTree {
        variant,
        graph: g.graph.clone(),
        levels: level_map,
        positions: position_map,
        categories: category_map,
    }
}
