//! Headless core of an interactive flowchart editor: the graph model, the
//! selection and pointer state machine that mutates it, and a hierarchical
//! auto-layout that arranges it into a top-down tree.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod scene;
pub mod script;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use editor::{Editor, Hit, InputEvent, Key, Selection};
pub use geometry::{CubicCurve, Point, Rect, RouteEnd, route};
pub use graph::{Edge, EdgeId, Graph, Node, NodeId, NodeKind};
pub use layout::{LayoutReport, auto_layout, compute_layout};
pub use scene::Scene;
pub use script::{ScriptCommand, parse_script, run_script};
