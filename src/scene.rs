use crate::editor::{Editor, InteractionMode, Selection};
use crate::geometry::Point;
use crate::graph::{EdgeId, NodeId, NodeKind};
use serde::Serialize;
use std::io::Write;

/// Everything a shell needs to draw one frame of the editor.
#[derive(Debug, Serialize)]
pub struct Scene {
    pub nodes: Vec<NodeScene>,
    pub edges: Vec<EdgeScene>,
    pub selection: Option<Selection>,
    pub editing: Option<NodeId>,
    pub mode: InteractionMode,
    pub pointer: Point,
    pub preview: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeScene {
    pub id: NodeId,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub selected: bool,
    pub editing: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeScene {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
    pub path: String,
    pub selected: bool,
}

impl Scene {
    pub fn from_editor(editor: &Editor) -> Self {
        let selection = editor.selection();
        let editing = editor.editing();

        let nodes = editor
            .graph()
            .nodes()
            .iter()
            .map(|node| {
                let rect = editor.node_rect(node);
                NodeScene {
                    id: node.id,
                    kind: node.kind,
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    label: node.label.clone(),
                    selected: selection == Some(Selection::Node(node.id)),
                    editing: editing == Some(node.id),
                }
            })
            .collect();

        let edges = editor
            .graph()
            .edges()
            .iter()
            .filter_map(|edge| {
                let curve = editor.edge_curve(edge)?;
                Some(EdgeScene {
                    id: edge.id,
                    source: edge.source,
                    target: edge.target,
                    label: edge.label.clone(),
                    path: curve.to_path_data(),
                    selected: selection == Some(Selection::Edge(edge.id)),
                })
            })
            .collect();

        Scene {
            nodes,
            edges,
            selection,
            editing,
            mode: editor.interaction().mode(),
            pointer: editor.pointer(),
            preview: editor.preview_curve().map(|curve| curve.to_path_data()),
        }
    }
}

pub fn write_scene<W: Write>(writer: W, editor: &Editor) -> anyhow::Result<()> {
    let scene = Scene::from_editor(editor);
    serde_json::to_writer_pretty(writer, &scene)?;
    Ok(())
}
