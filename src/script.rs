//! Line-oriented event scripts for driving an [`Editor`] without a UI.
//!
//! ```text
//! drop start 100 40
//! drop process 100 240
//! press 260 80        # handle of the first node
//! release 180 280
//! layout
//! ```
//!
//! Pointer commands only carry coordinates; what they hit is decided when the
//! command is applied, against the editor state at that moment.

use crate::editor::{Editor, InputEvent, Key, Selection};
use crate::error::ScriptError;
use crate::geometry::Point;
use crate::graph::NodeKind;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<cmd>[a-z]+)(?:\s+(?P<rest>.*))?$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Press(Point),
    Move(Point),
    Release(Point),
    Click(Point),
    DoubleClick(Point),
    Drop(NodeKind, Point),
    Type(String),
    Blur,
    Key(Key),
    Label(String),
    Delete,
    Clear,
    Layout,
}

/// Parses a whole script. `#` starts a comment, except inside the free text
/// of `type` and `label`, which runs to the end of the line.
pub fn parse_script(input: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = if takes_text(line) {
            line
        } else {
            strip_comment(line).trim()
        };
        commands.push(parse_line(line, line_no)?);
    }
    Ok(commands)
}

fn takes_text(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some("type" | "label"))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<ScriptCommand, ScriptError> {
    let Some(caps) = COMMAND_RE.captures(line) else {
        return Err(ScriptError::UnknownCommand {
            line: line_no,
            command: line.to_string(),
        });
    };
    let cmd = caps.name("cmd").map_or("", |m| m.as_str());
    let rest = caps.name("rest").map_or("", |m| m.as_str().trim());

    let command = match cmd {
        "press" => ScriptCommand::Press(parse_point(rest, line_no)?),
        "move" => ScriptCommand::Move(parse_point(rest, line_no)?),
        "release" => ScriptCommand::Release(parse_point(rest, line_no)?),
        "click" => ScriptCommand::Click(parse_point(rest, line_no)?),
        "dblclick" => ScriptCommand::DoubleClick(parse_point(rest, line_no)?),
        "drop" => parse_drop(rest, line_no)?,
        "type" => ScriptCommand::Type(rest.to_string()),
        "label" => ScriptCommand::Label(rest.to_string()),
        "blur" => no_args(ScriptCommand::Blur, rest, line_no)?,
        "delete" => no_args(ScriptCommand::Delete, rest, line_no)?,
        "clear" => no_args(ScriptCommand::Clear, rest, line_no)?,
        "layout" | "save" => no_args(ScriptCommand::Layout, rest, line_no)?,
        "key" => {
            let key = Key::from_token(rest).ok_or_else(|| ScriptError::UnknownKey {
                line: line_no,
                key: rest.to_string(),
            })?;
            ScriptCommand::Key(key)
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: other.to_string(),
            });
        }
    };
    Ok(command)
}

fn no_args(
    command: ScriptCommand,
    rest: &str,
    line_no: usize,
) -> Result<ScriptCommand, ScriptError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ScriptError::BadArguments {
            line: line_no,
            expected: "no arguments",
            found: rest.to_string(),
        })
    }
}

fn parse_coord(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|value| value.is_finite())
}

fn parse_point(rest: &str, line_no: usize) -> Result<Point, ScriptError> {
    let bad = || ScriptError::BadArguments {
        line: line_no,
        expected: "<x> <y>",
        found: rest.to_string(),
    };
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [x, y] = tokens[..] else {
        return Err(bad());
    };
    let x = parse_coord(x).ok_or_else(bad)?;
    let y = parse_coord(y).ok_or_else(bad)?;
    Ok(Point::new(x, y))
}

fn parse_drop(rest: &str, line_no: usize) -> Result<ScriptCommand, ScriptError> {
    let bad = || ScriptError::BadArguments {
        line: line_no,
        expected: "<kind> <x> <y>",
        found: rest.to_string(),
    };
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [kind, x, y] = tokens[..] else {
        return Err(bad());
    };
    let kind = NodeKind::from_token(kind).ok_or_else(|| ScriptError::UnknownKind {
        line: line_no,
        kind: kind.to_string(),
    })?;
    let x = parse_coord(x).ok_or_else(bad)?;
    let y = parse_coord(y).ok_or_else(bad)?;
    Ok(ScriptCommand::Drop(kind, Point::new(x, y)))
}

/// Applies one command, resolving pointer targets against the current state.
pub fn apply_command(editor: &mut Editor, command: &ScriptCommand) {
    match command {
        ScriptCommand::Press(pos) => {
            let pos = *pos;
            let hit = editor.hit_test(pos);
            editor.dispatch(InputEvent::PointerDown { pos, hit });
        }
        ScriptCommand::Move(pos) => editor.dispatch(InputEvent::PointerMove { pos: *pos }),
        ScriptCommand::Release(pos) => {
            let pos = *pos;
            let hit = editor.hit_test(pos);
            editor.dispatch(InputEvent::PointerUp { pos, hit });
        }
        ScriptCommand::Click(pos) => {
            let pos = *pos;
            let hit = editor.hit_test(pos);
            editor.dispatch(InputEvent::PointerDown { pos, hit });
            editor.dispatch(InputEvent::PointerUp { pos, hit });
        }
        ScriptCommand::DoubleClick(pos) => {
            let pos = *pos;
            let hit = editor.hit_test(pos);
            editor.dispatch(InputEvent::DoubleClick { pos, hit });
        }
        ScriptCommand::Drop(kind, pos) => editor.dispatch(InputEvent::Drop {
            kind: *kind,
            pos: *pos,
        }),
        ScriptCommand::Type(text) => editor.dispatch(InputEvent::TextInput(text.clone())),
        ScriptCommand::Blur => editor.dispatch(InputEvent::Blur),
        ScriptCommand::Key(key) => editor.dispatch(InputEvent::Key(*key)),
        ScriptCommand::Label(text) => {
            if let Some(Selection::Node(node)) = editor.selection() {
                editor.dispatch(InputEvent::SetLabel {
                    node,
                    text: text.clone(),
                });
            }
        }
        ScriptCommand::Delete => editor.dispatch(InputEvent::DeleteSelected),
        ScriptCommand::Clear => editor.dispatch(InputEvent::ClearCanvas),
        ScriptCommand::Layout => editor.dispatch(InputEvent::AutoLayout),
    }
}

pub fn run_script(editor: &mut Editor, commands: &[ScriptCommand]) {
    for command in commands {
        apply_command(editor, command);
    }
    debug!(
        commands = commands.len(),
        nodes = editor.graph().nodes().len(),
        edges = editor.graph().edges().len(),
        "script finished"
    );
}
