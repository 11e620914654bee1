use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::Point;

/// Opaque node identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

/// Opaque edge identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Process,
    Decision,
    End,
}

impl NodeKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "process" => Some(Self::Process),
            "decision" => Some(Self::Decision),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Process => "Process",
            Self::Decision => "Decision",
            Self::End => "End",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner in canvas coordinates.
    pub x: f32,
    pub y: f32,
    pub label: String,
}

impl Node {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
}

/// Node and edge collections for one editing session.
///
/// Nodes keep insertion order, which is the "model ordering" auto-layout
/// falls back on. Every operation is total: unknown ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node: u64,
    next_edge: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> &Node {
        self.next_node += 1;
        let id = NodeId(self.next_node);
        debug!(%id, ?kind, x = position.x, y = position.y, "node added");
        let index = self.nodes.len();
        self.nodes.push(Node {
            id,
            kind,
            x: position.x,
            y: position.y,
            label: kind.default_label().to_string(),
        });
        &self.nodes[index]
    }

    /// Adds `source -> target`. Self-loops, duplicates of an existing ordered
    /// pair and edges touching unknown nodes are ignored and return `None`.
    ///
    /// Edges leaving a decision node are labelled once, here: "Yes" when the
    /// target sits at or right of the source, "No" otherwise.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<&Edge> {
        if source == target {
            debug!(%source, "self-loop ignored");
            return None;
        }
        if self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
        {
            debug!(%source, %target, "duplicate edge ignored");
            return None;
        }
        let (Some(from), Some(to)) = (self.node(source), self.node(target)) else {
            debug!(%source, %target, "edge endpoint missing");
            return None;
        };
        let label = match from.kind {
            NodeKind::Decision if to.x >= from.x => Some("Yes".to_string()),
            NodeKind::Decision => Some("No".to_string()),
            _ => None,
        };

        self.next_edge += 1;
        let id = EdgeId(self.next_edge);
        debug!(%id, %source, %target, label = label.as_deref(), "edge added");
        let index = self.edges.len();
        self.edges.push(Edge {
            id,
            source,
            target,
            label,
        });
        Some(&self.edges[index])
    }

    pub fn move_node(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_mut(id) {
            node.x = position.x;
            node.y = position.y;
        }
    }

    pub fn relabel_node(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.label = text.to_string();
        }
    }

    /// Removes the node and every edge referencing it in one step.
    /// Returns whether the node existed.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        if self.nodes.len() == before {
            trace!(%id, "delete of unknown node ignored");
            return false;
        }
        let edges_before = self.edges.len();
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        debug!(%id, cascaded = edges_before - self.edges.len(), "node deleted");
        true
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.id != id);
        let removed = self.edges.len() != before;
        if removed {
            debug!(%id, "edge deleted");
        }
        removed
    }

    /// Drops all nodes and edges. Id counters keep running so ids are never
    /// handed out twice.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "graph cleared"
        );
        self.nodes.clear();
        self.edges.clear();
    }

    /// Writes a batch of positions. Nodes absent from `positions` are left
    /// untouched.
    pub fn apply_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (NodeId, Point)>,
    {
        for (id, point) in positions {
            self.move_node(id, point);
        }
    }
}
