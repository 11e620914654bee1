//! Property-based invariant tests for the editor core.
//!
//! 1. Deleting a node never leaves an edge that references it.
//! 2. Edges are unique per ordered pair and never self-loops.
//! 3. Dragged node positions always land on the grid.
//! 4. Routing is pure and picks tangents by the dominant axis.
//! 5. Auto-layout is stable when run twice.

use flowchart_editor::{Editor, Graph, Hit, NodeId, NodeKind, Point, RouteEnd, route};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    AddNode(f32, f32),
    AddEdge(usize, usize),
    DeleteNode(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-500.0f32..1500.0, -500.0f32..1500.0).prop_map(|(x, y)| Op::AddNode(x, y)),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Op::AddEdge(a, b)),
        (0usize..16).prop_map(Op::DeleteNode),
    ]
}

fn kind_for(i: usize) -> NodeKind {
    match i % 4 {
        0 => NodeKind::Start,
        1 => NodeKind::Process,
        2 => NodeKind::Decision,
        _ => NodeKind::End,
    }
}

fn apply_ops(ops: &[Op]) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let mut created: Vec<NodeId> = Vec::new();
    for op in ops {
        match *op {
            Op::AddNode(x, y) => {
                let id = graph.add_node(kind_for(created.len()), Point::new(x, y)).id;
                created.push(id);
            }
            Op::AddEdge(a, b) => {
                if let (Some(a), Some(b)) = (created.get(a), created.get(b)) {
                    graph.add_edge(*a, *b);
                }
            }
            Op::DeleteNode(a) => {
                if let Some(id) = created.get(a) {
                    graph.delete_node(*id);
                }
            }
        }
    }
    (graph, created)
}

fn coord() -> impl Strategy<Value = f32> {
    -2000.0f32..2000.0
}

// ═════════════════════════════════════════════════════════════════════════
// 1. No dangling edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_edge_references_a_deleted_node(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let (graph, _) = apply_ops(&ops);
        for edge in graph.edges() {
            prop_assert!(graph.contains_node(edge.source), "dangling source in {:?}", edge);
            prop_assert!(graph.contains_node(edge.target), "dangling target in {:?}", edge);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Unique ordered pairs, no self-loops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edges_are_unique_and_never_loops(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let (graph, _) = apply_ops(&ops);
        let edges = graph.edges();
        for (i, edge) in edges.iter().enumerate() {
            prop_assert_ne!(edge.source, edge.target);
            for other in &edges[i + 1..] {
                prop_assert!(
                    !(edge.source == other.source && edge.target == other.target),
                    "duplicate pair {:?} / {:?}", edge, other
                );
                prop_assert_ne!(edge.id, other.id);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Drag positions snap to the grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dragged_positions_are_grid_multiples(
        origin in (0.0f32..800.0, 0.0f32..800.0),
        grab in (0.0f32..160.0, 0.0f32..80.0),
        moves in proptest::collection::vec((coord(), coord()), 1..12),
    ) {
        let mut editor = Editor::default();
        let id = editor.drop_node(NodeKind::Process, Point::new(origin.0, origin.1));
        let press = Point::new(origin.0 + grab.0, origin.1 + grab.1);
        editor.pointer_down(press, Hit::Node(id));
        for (x, y) in moves {
            editor.pointer_move(Point::new(x, y));
            let node = editor.graph().node(id).unwrap();
            prop_assert_eq!((node.x / 20.0).fract(), 0.0, "x={} off grid", node.x);
            prop_assert_eq!((node.y / 20.0).fract(), 0.0, "y={} off grid", node.y);
        }
        editor.pointer_up(Point::new(0.0, 0.0), Hit::Canvas);
        prop_assert!(editor.interaction().is_idle());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Routing determinism and orientation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn routing_is_pure_and_axis_biased(
        a in (coord(), coord()),
        b in (coord(), coord()),
    ) {
        let from = RouteEnd::Free(Point::new(a.0, a.1));
        let to = RouteEnd::Free(Point::new(b.0, b.1));
        let first = route(from, to, 60.0);
        let second = route(from, to, 60.0);
        prop_assert_eq!(first, second);

        let dx = (b.0 - a.0).abs();
        let dy = (b.1 - a.1).abs();
        if dy > dx {
            prop_assert_eq!(first.c1.x, first.start.x);
            prop_assert_eq!(first.c2.x, first.end.x);
            prop_assert!(((first.c1.y - first.start.y).abs() - 60.0).abs() < 1e-3);
        } else {
            prop_assert_eq!(first.c1.y, first.start.y);
            prop_assert_eq!(first.c2.y, first.end.y);
            prop_assert!(((first.c1.x - first.start.x).abs() - 60.0).abs() < 1e-3);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Layout is stable
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_twice_yields_same_positions(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let (mut graph, _) = apply_ops(&ops);
        let config = flowchart_editor::LayoutConfig::default();
        flowchart_editor::auto_layout(&mut graph, &config);
        let first: Vec<(f32, f32)> = graph.nodes().iter().map(|n| (n.x, n.y)).collect();
        let report = flowchart_editor::auto_layout(&mut graph, &config);
        let second: Vec<(f32, f32)> = graph.nodes().iter().map(|n| (n.x, n.y)).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(report.levels.len() + report.unplaced.len(), graph.nodes().len());
    }
}
