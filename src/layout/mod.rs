//! Hierarchical auto-layout.
//!
//! Nodes are leveled breadth-first from the roots, grouped into rows per
//! level, each row ordered under its parents and centered on the canvas
//! midpoint. Positions are written back to the graph in one batch.

mod ranking;

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, debug_span};

use crate::config::LayoutConfig;
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};

use ranking::{Adjacency, assign_levels, find_roots, group_rows, order_row};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    pub levels: BTreeMap<NodeId, usize>,
    /// Final left-to-right order of each row, top row first.
    pub rows: Vec<Vec<NodeId>>,
    /// Nodes no root reaches. Their positions are left as they were.
    pub unplaced: Vec<NodeId>,
}

impl LayoutReport {
    pub fn level_of(&self, id: NodeId) -> Option<usize> {
        self.levels.get(&id).copied()
    }
}

/// Computes positions for every reachable node without touching the graph.
pub fn compute_layout(
    graph: &Graph,
    config: &LayoutConfig,
) -> (LayoutReport, Vec<(NodeId, Point)>) {
    if graph.is_empty() {
        return (LayoutReport::default(), Vec::new());
    }

    let adjacency = Adjacency::build(graph);
    let roots = find_roots(graph, &adjacency);
    let levels = assign_levels(&roots, &adjacency);
    let mut rows = group_rows(graph, &levels);

    let mut placed_x: HashMap<NodeId, f32> = HashMap::new();
    let mut positions = Vec::with_capacity(levels.len());
    for (level, row) in rows.iter_mut().enumerate() {
        if level > 0 {
            order_row(row, &adjacency, &placed_x);
        }
        let count = row.len() as f32;
        let row_width = count * config.node_width + (count - 1.0).max(0.0) * config.horizontal_gap;
        let start_x = config.center_x() - row_width / 2.0;
        let y = config.top_margin + level as f32 * config.row_height();
        for (idx, id) in row.iter().enumerate() {
            let x = start_x + idx as f32 * (config.node_width + config.horizontal_gap);
            placed_x.insert(*id, x);
            positions.push((*id, Point::new(x, y)));
        }
    }

    let unplaced: Vec<NodeId> = graph
        .nodes()
        .iter()
        .map(|node| node.id)
        .filter(|id| !levels.contains_key(id))
        .collect();

    let report = LayoutReport {
        levels: levels.into_iter().collect(),
        rows,
        unplaced,
    };
    (report, positions)
}

/// Re-levels the whole graph and overwrites node positions. Unreachable
/// nodes keep their current position.
pub fn auto_layout(graph: &mut Graph, config: &LayoutConfig) -> LayoutReport {
    let span = debug_span!(
        "auto_layout",
        nodes = graph.nodes().len(),
        edges = graph.edges().len()
    );
    let _guard = span.enter();

    let (report, positions) = compute_layout(graph, config);
    graph.apply_positions(positions);
    debug!(
        rows = report.rows.len(),
        placed = report.levels.len(),
        unplaced = report.unplaced.len(),
        "layout applied"
    );
    report
}
