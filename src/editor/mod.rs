//! The editing session: graph, selection and pointer gesture state owned by
//! one value and changed only through [`Editor::dispatch`] or the named
//! commands it forwards to.
//!
//! Every event is handled synchronously and to completion. Actions that
//! reference ids which no longer exist are absorbed as no-ops.

mod interaction;
mod selection;

pub use interaction::{Interaction, InteractionMode, PointerState};
pub use selection::{Selection, SelectionState};

use tracing::{debug, trace};

use crate::config::Config;
use crate::geometry::{CubicCurve, Point, Rect, RouteEnd, route};
use crate::graph::{Edge, EdgeId, Graph, Node, NodeId, NodeKind};
use crate::layout::{LayoutReport, auto_layout};

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Connection handle on a node's mid-right edge.
    Handle(NodeId),
    Node(NodeId),
    Edge(EdgeId),
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Delete,
    Backspace,
}

impl Key {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "escape" | "esc" => Some(Self::Escape),
            "delete" | "del" => Some(Self::Delete),
            "backspace" => Some(Self::Backspace),
            _ => None,
        }
    }
}

/// Input delivered by the surrounding shell. Move and release events must be
/// delivered wherever the pointer is, not only over the pressed element.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, hit: Hit },
    PointerMove { pos: Point },
    PointerUp { pos: Point, hit: Hit },
    DoubleClick { pos: Point, hit: Hit },
    Drop { kind: NodeKind, pos: Point },
    Key(Key),
    /// New draft text for the label being edited.
    TextInput(String),
    /// The inline label editor lost focus.
    Blur,
    SetLabel { node: NodeId, text: String },
    DeleteSelected,
    ClearCanvas,
    AutoLayout,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    graph: Graph,
    selection: SelectionState,
    pointer: PointerState,
    config: Config,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.selection()
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.selection.editing()
    }

    pub fn interaction(&self) -> Interaction {
        self.pointer.interaction
    }

    pub fn pointer(&self) -> Point {
        self.pointer.pointer
    }

    pub fn node_rect(&self, node: &Node) -> Rect {
        Rect::new(node.x, node.y, self.config.node.width, self.config.node.height)
    }

    pub fn handle_rect(&self, node: &Node) -> Rect {
        Rect::centered_on(self.node_rect(node).mid_right(), self.config.canvas.handle_size)
    }

    /// Routed curve for a committed edge, center to center.
    pub fn edge_curve(&self, edge: &Edge) -> Option<CubicCurve> {
        let source = self.graph.node(edge.source)?;
        let target = self.graph.node(edge.target)?;
        Some(route(
            RouteEnd::Node(self.node_rect(source)),
            RouteEnd::Node(self.node_rect(target)),
            self.config.routing.tangent,
        ))
    }

    /// Preview from the connection source to the live pointer, while a
    /// connection is being drawn.
    pub fn preview_curve(&self) -> Option<CubicCurve> {
        let Interaction::Connecting { source } = self.pointer.interaction else {
            return None;
        };
        let node = self.graph.node(source)?;
        Some(route(
            RouteEnd::Node(self.node_rect(node)),
            RouteEnd::Free(self.pointer.pointer),
            self.config.routing.tangent,
        ))
    }

    /// Topmost element under `point`: later nodes over earlier ones, a
    /// node's handle over its body, nodes over edges.
    pub fn hit_test(&self, point: Point) -> Hit {
        for node in self.graph.nodes().iter().rev() {
            if self.handle_rect(node).contains(point) {
                return Hit::Handle(node.id);
            }
            if self.node_rect(node).contains(point) {
                return Hit::Node(node.id);
            }
        }
        let reach = self.config.canvas.edge_hit_width / 2.0;
        for edge in self.graph.edges().iter().rev() {
            let Some(curve) = self.edge_curve(edge) else {
                continue;
            };
            if curve.distance_to(point, self.config.routing.hit_samples) <= reach {
                return Hit::Edge(edge.id);
            }
        }
        Hit::Canvas
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        trace!(?event, "dispatch");
        match event {
            InputEvent::PointerDown { pos, hit } => self.pointer_down(pos, hit),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { pos, hit } => self.pointer_up(pos, hit),
            InputEvent::DoubleClick { pos, hit } => self.double_click(pos, hit),
            InputEvent::Drop { kind, pos } => {
                self.drop_node(kind, pos);
            }
            InputEvent::Key(key) => self.key(key),
            InputEvent::TextInput(text) => self.text_input(&text),
            InputEvent::Blur => self.commit_edit(),
            InputEvent::SetLabel { node, text } => self.set_label(node, &text),
            InputEvent::DeleteSelected => self.delete_selected(),
            InputEvent::ClearCanvas => self.clear(),
            InputEvent::AutoLayout => {
                self.auto_layout();
            }
        }
    }

    pub fn pointer_down(&mut self, pos: Point, hit: Hit) {
        self.pointer.pointer = pos;
        if !self.pointer.interaction.is_idle() {
            debug!(interaction = ?self.pointer.interaction, "press during gesture, ending it");
            self.pointer.interaction = Interaction::Idle;
        }

        match hit {
            Hit::Canvas => self.selection.press_canvas(),
            Hit::Edge(id) => {
                if self.graph.contains_edge(id) {
                    self.selection.press_edge(id);
                }
            }
            Hit::Node(id) => {
                let Some(origin) = self.graph.node(id).map(Node::position) else {
                    return;
                };
                self.selection.press_node(id);
                if self.selection.is_editing_node(id) {
                    return;
                }
                let grab = pos - origin;
                debug!(%id, grab_x = grab.x, grab_y = grab.y, "drag started");
                self.pointer.interaction = Interaction::Dragging { node: id, grab };
            }
            Hit::Handle(id) => {
                if !self.graph.contains_node(id) || self.selection.is_editing_node(id) {
                    return;
                }
                debug!(source = %id, "connection started");
                self.pointer.interaction = Interaction::Connecting { source: id };
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Point) {
        self.pointer.pointer = pos;
        if let Interaction::Dragging { node, grab } = self.pointer.interaction {
            if !self.graph.contains_node(node) {
                self.pointer.interaction = Interaction::Idle;
                return;
            }
            let target = PointerState::drag_target(grab, pos, self.config.canvas.grid);
            self.graph.move_node(node, target);
        }
    }

    /// Ends whatever gesture is active, wherever the release happens.
    pub fn pointer_up(&mut self, pos: Point, hit: Hit) {
        self.pointer.pointer = pos;
        let finished = std::mem::take(&mut self.pointer.interaction);
        match finished {
            Interaction::Connecting { source } => {
                let target = match hit {
                    Hit::Node(id) | Hit::Handle(id) if id != source => Some(id),
                    _ => None,
                };
                match target {
                    Some(target) => {
                        self.graph.add_edge(source, target);
                    }
                    None => debug!(%source, "connection discarded"),
                }
            }
            Interaction::Dragging { node, .. } => debug!(%node, "drag finished"),
            Interaction::Idle => {}
        }
    }

    pub fn double_click(&mut self, pos: Point, hit: Hit) {
        self.pointer.pointer = pos;
        if let Hit::Node(id) = hit {
            if self.graph.contains_node(id) {
                self.pointer.interaction = Interaction::Idle;
                self.selection.begin_edit(id);
                debug!(%id, "label edit started");
            }
        }
    }

    /// Places a new node with its top-left at `pos` and selects it.
    pub fn drop_node(&mut self, kind: NodeKind, pos: Point) -> NodeId {
        let id = self.graph.add_node(kind, pos).id;
        self.selection.select_node(id);
        id
    }

    pub fn key(&mut self, key: Key) {
        match key {
            Key::Enter | Key::Escape => self.commit_edit(),
            Key::Delete | Key::Backspace => self.delete_selected(),
        }
    }

    pub fn text_input(&mut self, text: &str) {
        if let Some(id) = self.selection.editing() {
            self.graph.relabel_node(id, text);
        }
    }

    /// Leaves label edit mode; the text was already applied as typed.
    pub fn commit_edit(&mut self) {
        if let Some(id) = self.selection.editing() {
            debug!(%id, "label edit committed");
            self.selection.commit_edit();
        }
    }

    pub fn set_label(&mut self, node: NodeId, text: &str) {
        self.graph.relabel_node(node, text);
    }

    /// Deletes the selected node (with its edges) or edge. Ignored while a
    /// label is being edited.
    pub fn delete_selected(&mut self) {
        if self.selection.is_editing() {
            trace!("delete suppressed while editing");
            return;
        }
        match self.selection.selection() {
            Some(Selection::Node(id)) => self.delete_node(id),
            Some(Selection::Edge(id)) => {
                self.graph.delete_edge(id);
                self.selection.forget_edge(id);
            }
            None => {}
        }
    }

    pub fn delete_node(&mut self, id: NodeId) {
        self.graph.delete_node(id);
        self.selection.forget_node(id);
        if self.pointer.interaction.touches(id) {
            self.pointer.interaction = Interaction::Idle;
        }
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.selection.reset();
        self.pointer.interaction = Interaction::Idle;
    }

    pub fn auto_layout(&mut self) -> LayoutReport {
        auto_layout(&mut self.graph, &self.config.layout_config())
    }
}
