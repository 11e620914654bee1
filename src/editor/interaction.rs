use serde::Serialize;

use crate::geometry::Point;
use crate::graph::NodeId;

/// Exclusive pointer gesture modes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// `grab` is the pointer position minus the node's top-left, captured
    /// at press time and held for the whole gesture.
    Dragging { node: NodeId, grab: Point },
    Connecting { source: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Idle,
    Dragging,
    Connecting,
}

impl Interaction {
    pub fn mode(&self) -> InteractionMode {
        match self {
            Interaction::Idle => InteractionMode::Idle,
            Interaction::Dragging { .. } => InteractionMode::Dragging,
            Interaction::Connecting { .. } => InteractionMode::Connecting,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        match *self {
            Interaction::Idle => false,
            Interaction::Dragging { node, .. } => node == id,
            Interaction::Connecting { source } => source == id,
        }
    }
}

/// Pointer controller state: the active gesture plus the last pointer
/// position seen, which the connection preview follows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub interaction: Interaction,
    pub pointer: Point,
}

impl PointerState {
    /// Candidate top-left for the dragged node at `pointer`, snapped to `grid`.
    pub fn drag_target(grab: Point, pointer: Point, grid: f32) -> Point {
        (pointer - grab).snapped(grid)
    }
}
