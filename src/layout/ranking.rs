use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use crate::graph::{Graph, NodeId};

#[derive(Debug, Default)]
pub(super) struct Adjacency {
    pub(super) children: HashMap<NodeId, Vec<NodeId>>,
    pub(super) parents: HashMap<NodeId, Vec<NodeId>>,
}

impl Adjacency {
    pub(super) fn build(graph: &Graph) -> Self {
        let mut adjacency = Adjacency::default();
        for edge in graph.edges() {
            adjacency
                .children
                .entry(edge.source)
                .or_default()
                .push(edge.target);
            adjacency
                .parents
                .entry(edge.target)
                .or_default()
                .push(edge.source);
        }
        adjacency
    }

    fn has_parents(&self, id: NodeId) -> bool {
        self.parents.get(&id).is_some_and(|list| !list.is_empty())
    }
}

/// Nodes without incoming edges, in model order. A non-empty graph where
/// every node has a parent falls back to its first node.
pub(super) fn find_roots(graph: &Graph, adjacency: &Adjacency) -> Vec<NodeId> {
    let roots: Vec<NodeId> = graph
        .nodes()
        .iter()
        .map(|node| node.id)
        .filter(|id| !adjacency.has_parents(*id))
        .collect();
    if roots.is_empty() {
        return graph.nodes().first().map(|node| node.id).into_iter().collect();
    }
    roots
}

/// Breadth-first levels from all roots at once. The first time a node is
/// dequeued-into decides its level; later paths never revisit it.
pub(super) fn assign_levels(roots: &[NodeId], adjacency: &Adjacency) -> HashMap<NodeId, usize> {
    let mut levels: HashMap<NodeId, usize> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    for root in roots {
        if !levels.contains_key(root) {
            levels.insert(*root, 0);
            queue.push_back(*root);
        }
    }

    while let Some(id) = queue.pop_front() {
        let level = levels.get(&id).copied().unwrap_or(0);
        let Some(children) = adjacency.children.get(&id) else {
            continue;
        };
        for child in children {
            if levels.contains_key(child) {
                continue;
            }
            levels.insert(*child, level + 1);
            queue.push_back(*child);
        }
    }

    levels
}

/// Rows `0..=max_level`, each in model order.
pub(super) fn group_rows(graph: &Graph, levels: &HashMap<NodeId, usize>) -> Vec<Vec<NodeId>> {
    let depth = levels.values().copied().max().map_or(0, |max| max + 1);
    let mut rows: Vec<Vec<NodeId>> = vec![Vec::new(); depth];
    for node in graph.nodes() {
        if let Some(level) = levels.get(&node.id) {
            rows[*level].push(node.id);
        }
    }
    rows
}

/// Average finalized x of the parents already placed, if any.
pub(super) fn parent_average(
    id: NodeId,
    adjacency: &Adjacency,
    placed_x: &HashMap<NodeId, f32>,
) -> Option<f32> {
    let parents = adjacency.parents.get(&id)?;
    let xs: Vec<f32> = parents
        .iter()
        .filter_map(|parent| placed_x.get(parent).copied())
        .collect();
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f32>() / xs.len() as f32)
}

/// Stable sort by average parent x; nodes with no placed parent go last.
pub(super) fn order_row(
    row: &mut [NodeId],
    adjacency: &Adjacency,
    placed_x: &HashMap<NodeId, f32>,
) {
    if row.len() <= 1 {
        return;
    }
    let keys: HashMap<NodeId, Option<f32>> = row
        .iter()
        .map(|id| (*id, parent_average(*id, adjacency, placed_x)))
        .collect();
    row.sort_by(|a, b| {
        let a_key = keys.get(a).copied().flatten();
        let b_key = keys.get(b).copied().flatten();
        match (a_key, b_key) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
