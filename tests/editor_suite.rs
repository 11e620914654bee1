use flowchart_editor::editor::SelectionState;
use flowchart_editor::{
    Config, Editor, Hit, InputEvent, Key, NodeId, NodeKind, Point, Selection, parse_script,
    run_script,
};

fn center(editor: &Editor, id: NodeId) -> Point {
    let node = editor.graph().node(id).expect("node present");
    editor.node_rect(node).center()
}

fn handle(editor: &Editor, id: NodeId) -> Point {
    let node = editor.graph().node(id).expect("node present");
    editor.handle_rect(node).center()
}

fn connect(editor: &mut Editor, from: NodeId, to: NodeId) {
    let start = handle(editor, from);
    let end = center(editor, to);
    editor.dispatch(InputEvent::PointerDown {
        pos: start,
        hit: editor.hit_test(start),
    });
    editor.dispatch(InputEvent::PointerMove { pos: end });
    editor.dispatch(InputEvent::PointerUp {
        pos: end,
        hit: editor.hit_test(end),
    });
}

fn label_between(editor: &Editor, from: NodeId, to: NodeId) -> Option<String> {
    editor
        .graph()
        .edges()
        .iter()
        .find(|edge| edge.source == from && edge.target == to)
        .and_then(|edge| edge.label.clone())
}

#[test]
fn decision_branches_are_labelled_yes_and_no() {
    let mut editor = Editor::new(Config::default());
    let a = editor.drop_node(NodeKind::Start, Point::new(400.0, 0.0));
    let b = editor.drop_node(NodeKind::Decision, Point::new(400.0, 200.0));
    let c = editor.drop_node(NodeKind::End, Point::new(100.0, 420.0));
    let d = editor.drop_node(NodeKind::End, Point::new(700.0, 420.0));

    connect(&mut editor, a, b);
    connect(&mut editor, b, c);
    connect(&mut editor, b, d);

    assert_eq!(editor.graph().edges().len(), 3);
    assert_eq!(label_between(&editor, a, b), None);
    assert_eq!(label_between(&editor, b, c).as_deref(), Some("No"));
    assert_eq!(label_between(&editor, b, d).as_deref(), Some("Yes"));
}

#[test]
fn repeated_and_self_connections_are_ignored() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Start, Point::new(0.0, 0.0));
    let b = editor.drop_node(NodeKind::End, Point::new(0.0, 300.0));
    connect(&mut editor, a, b);
    connect(&mut editor, a, b);
    connect(&mut editor, a, a);
    assert_eq!(editor.graph().edges().len(), 1);
}

#[test]
fn three_unconnected_nodes_share_the_top_row() {
    let mut editor = Editor::default();
    let ids: Vec<NodeId> = [(50.0, 500.0), (900.0, 20.0), (10.0, 10.0)]
        .iter()
        .map(|(x, y)| editor.drop_node(NodeKind::Process, Point::new(*x, *y)))
        .collect();

    let report = editor.auto_layout();
    assert_eq!(report.rows, vec![ids.clone()]);

    let xs: Vec<f32> = ids
        .iter()
        .map(|id| editor.graph().node(*id).unwrap().x)
        .collect();
    let ys: Vec<f32> = ids
        .iter()
        .map(|id| editor.graph().node(*id).unwrap().y)
        .collect();
    assert_eq!(xs, vec![300.0, 520.0, 740.0]);
    assert!(ys.iter().all(|y| *y == 100.0));
    // Centered: left margin equals right margin on a 1200 wide canvas.
    assert_eq!(xs[0], 1200.0 - (xs[2] + 160.0));
}

#[test]
fn diamond_levels_and_merge_position() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Start, Point::new(0.0, 0.0));
    let b = editor.drop_node(NodeKind::Process, Point::new(0.0, 200.0));
    let c = editor.drop_node(NodeKind::Process, Point::new(300.0, 200.0));
    let d = editor.drop_node(NodeKind::End, Point::new(0.0, 400.0));
    for (from, to) in [(a, b), (a, c), (b, d), (c, d)] {
        connect(&mut editor, from, to);
    }
    assert_eq!(editor.graph().edges().len(), 4);

    let report = editor.auto_layout();
    assert_eq!(report.level_of(a), Some(0));
    assert_eq!(report.level_of(b), Some(1));
    assert_eq!(report.level_of(c), Some(1));
    assert_eq!(report.level_of(d), Some(2));

    let node = |id| editor.graph().node(id).unwrap().clone();
    assert_eq!((node(b).x, node(c).x), (410.0, 630.0));
    assert_eq!(node(d).x, (node(b).x + node(c).x) / 2.0);
    assert_eq!(node(d).y, 500.0);
}

#[test]
fn layout_twice_is_stable() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Start, Point::new(0.0, 0.0));
    let b = editor.drop_node(NodeKind::Decision, Point::new(0.0, 300.0));
    let c = editor.drop_node(NodeKind::End, Point::new(300.0, 600.0));
    let d = editor.drop_node(NodeKind::End, Point::new(600.0, 600.0));
    connect(&mut editor, a, b);
    connect(&mut editor, b, d);
    connect(&mut editor, b, c);

    editor.auto_layout();
    let first: Vec<(f32, f32)> = editor.graph().nodes().iter().map(|n| (n.x, n.y)).collect();
    editor.auto_layout();
    let second: Vec<(f32, f32)> = editor.graph().nodes().iter().map(|n| (n.x, n.y)).collect();
    assert_eq!(first, second);
}

#[test]
fn selecting_and_deleting_an_edge_keeps_nodes() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Start, Point::new(0.0, 0.0));
    let b = editor.drop_node(NodeKind::End, Point::new(400.0, 0.0));
    connect(&mut editor, a, b);
    let edge = editor.graph().edges()[0].id;

    let on_edge = Point::new(280.0, 40.0);
    assert_eq!(editor.hit_test(on_edge), Hit::Edge(edge));
    editor.dispatch(InputEvent::PointerDown {
        pos: on_edge,
        hit: Hit::Edge(edge),
    });
    editor.dispatch(InputEvent::PointerUp {
        pos: on_edge,
        hit: Hit::Edge(edge),
    });
    assert_eq!(editor.selection(), Some(Selection::Edge(edge)));

    editor.dispatch(InputEvent::Key(Key::Delete));
    assert!(editor.graph().edges().is_empty());
    assert!(editor.graph().contains_node(a));
    assert!(editor.graph().contains_node(b));
    assert_eq!(editor.selection(), None);
}

#[test]
fn double_click_edit_and_enter_commits() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Process, Point::new(100.0, 100.0));
    let pos = center(&editor, a);

    editor.dispatch(InputEvent::DoubleClick {
        pos,
        hit: editor.hit_test(pos),
    });
    assert_eq!(editor.selection_state(), SelectionState::Editing(a));

    editor.dispatch(InputEvent::TextInput("Ship order".to_string()));
    editor.dispatch(InputEvent::Key(Key::Backspace));
    assert!(editor.graph().contains_node(a));

    editor.dispatch(InputEvent::Key(Key::Enter));
    assert_eq!(editor.graph().node(a).unwrap().label, "Ship order");
    assert_eq!(editor.editing(), None);
    assert_eq!(editor.selection(), Some(Selection::Node(a)));
}

#[test]
fn deleting_a_node_cascades_to_its_edges() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Start, Point::new(0.0, 0.0));
    let b = editor.drop_node(NodeKind::Process, Point::new(0.0, 300.0));
    let c = editor.drop_node(NodeKind::End, Point::new(0.0, 600.0));
    connect(&mut editor, a, b);
    connect(&mut editor, b, c);
    connect(&mut editor, a, c);

    let pos = center(&editor, b);
    editor.dispatch(InputEvent::PointerDown {
        pos,
        hit: editor.hit_test(pos),
    });
    editor.dispatch(InputEvent::PointerUp {
        pos,
        hit: editor.hit_test(pos),
    });
    editor.dispatch(InputEvent::DeleteSelected);

    assert!(!editor.graph().contains_node(b));
    assert_eq!(editor.graph().edges().len(), 1);
    assert!(
        editor
            .graph()
            .edges()
            .iter()
            .all(|edge| edge.source != b && edge.target != b)
    );
    assert_eq!(editor.selection(), None);
}

#[test]
fn drag_that_leaves_the_node_still_ends_on_release() {
    let mut editor = Editor::default();
    let a = editor.drop_node(NodeKind::Process, Point::new(0.0, 0.0));
    editor.dispatch(InputEvent::PointerDown {
        pos: Point::new(10.0, 10.0),
        hit: Hit::Node(a),
    });
    editor.dispatch(InputEvent::PointerMove {
        pos: Point::new(733.0, 519.0),
    });
    editor.dispatch(InputEvent::PointerUp {
        pos: Point::new(2000.0, 2000.0),
        hit: Hit::Canvas,
    });
    let node = editor.graph().node(a).unwrap();
    assert_eq!((node.x, node.y), (720.0, 500.0));
    assert!(editor.interaction().is_idle());

    editor.dispatch(InputEvent::PointerMove {
        pos: Point::new(0.0, 0.0),
    });
    let node = editor.graph().node(a).unwrap();
    assert_eq!((node.x, node.y), (720.0, 500.0));
}

#[test]
fn script_builds_and_lays_out_a_flow() {
    let script = r#"
# start node, decision below it, two outcomes
drop start 520 0
drop decision 520 200
drop end 200 400
drop end 800 400

# start -> decision via the handle on the start node's right edge
press 680 40
move 600 240
release 600 240

press 680 240
release 280 440
press 680 240
release 880 440

dblclick 600 240
type In stock?
key enter
layout
"#;
    let commands = parse_script(script).expect("script parses");
    let mut editor = Editor::default();
    run_script(&mut editor, &commands);

    let nodes = editor.graph().nodes();
    assert_eq!(nodes.len(), 4);
    assert_eq!(editor.graph().edges().len(), 3);
    assert_eq!(nodes[1].label, "In stock?");

    let labels: Vec<Option<&str>> = editor
        .graph()
        .edges()
        .iter()
        .map(|edge| edge.label.as_deref())
        .collect();
    assert_eq!(labels, vec![None, Some("No"), Some("Yes")]);

    // start and decision stacked, outcomes side by side under the decision
    assert_eq!((nodes[0].x, nodes[0].y), (520.0, 100.0));
    assert_eq!((nodes[1].x, nodes[1].y), (520.0, 300.0));
    assert_eq!((nodes[2].x, nodes[2].y), (410.0, 500.0));
    assert_eq!((nodes[3].x, nodes[3].y), (630.0, 500.0));
    assert_eq!(editor.selection(), Some(Selection::Node(nodes[1].id)));
}
