use serde::Serialize;
use tracing::trace;

use crate::graph::{EdgeId, NodeId};

/// What the user currently has selected. A single optional tagged reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Node(NodeId),
    Edge(EdgeId),
}

/// Selection and inline-edit state.
///
/// `Editing` carries the node being edited and implies that node is also the
/// selected one, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    NodeSelected(NodeId),
    EdgeSelected(EdgeId),
    Editing(NodeId),
}

impl SelectionState {
    pub fn selection(&self) -> Option<Selection> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::NodeSelected(id) | SelectionState::Editing(id) => {
                Some(Selection::Node(id))
            }
            SelectionState::EdgeSelected(id) => Some(Selection::Edge(id)),
        }
    }

    pub fn editing(&self) -> Option<NodeId> {
        match *self {
            SelectionState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    pub fn is_editing_node(&self, id: NodeId) -> bool {
        self.editing() == Some(id)
    }

    /// Press on empty canvas. Ends any edit session.
    pub fn press_canvas(&mut self) {
        self.set(SelectionState::Idle);
    }

    /// Press on a node body. An edit session survives only if it is on the
    /// same node.
    pub fn press_node(&mut self, id: NodeId) {
        if self.is_editing_node(id) {
            return;
        }
        self.set(SelectionState::NodeSelected(id));
    }

    pub fn press_edge(&mut self, id: EdgeId) {
        self.set(SelectionState::EdgeSelected(id));
    }

    pub fn begin_edit(&mut self, id: NodeId) {
        self.set(SelectionState::Editing(id));
    }

    /// Leaves edit mode, keeping the node selected. No-op outside edit mode.
    pub fn commit_edit(&mut self) {
        if let SelectionState::Editing(id) = *self {
            self.set(SelectionState::NodeSelected(id));
        }
    }

    pub fn select_node(&mut self, id: NodeId) {
        self.set(SelectionState::NodeSelected(id));
    }

    /// Drops the selection if it refers to the removed node.
    pub fn forget_node(&mut self, id: NodeId) {
        if self.selection() == Some(Selection::Node(id)) {
            self.set(SelectionState::Idle);
        }
    }

    /// Drops the selection if it refers to the removed edge.
    pub fn forget_edge(&mut self, id: EdgeId) {
        if self.selection() == Some(Selection::Edge(id)) {
            self.set(SelectionState::Idle);
        }
    }

    pub fn reset(&mut self) {
        self.set(SelectionState::Idle);
    }

    fn set(&mut self, next: SelectionState) {
        if *self != next {
            trace!(from = ?*self, to = ?next, "selection transition");
            *self = next;
        }
    }
}
