//! Yarnloom is the conversion and validation core of a branching-dialogue
//! authoring tool.
//!
//! A dialogue lives in three representations:
//!
//! - a persisted linear [`Script`] (flat JSON array of records),
//! - an editable [`DialogueGraph`] of nodes and labeled edges,
//! - a line-oriented yarn-style text dialect.
//!
//! [`expand()`] and [`collapse()`] convert between script and graph;
//! [`parse_dialect`] and [`serialize_dialect`] convert between script and
//! dialect text; [`is_reachable`] answers whether a dialogue can end. All
//! five are pure functions of their inputs: the crate holds no state between
//! calls and never mutates a caller's graph.
#![forbid(unsafe_code)]

pub mod collapse;
pub mod dialect;
pub mod error;
pub mod expand;
pub mod graph;
pub mod reach;
pub mod script;

pub use collapse::collapse;
pub use dialect::{parse_dialect, serialize_dialect};
pub use error::{YarnloomError, YarnloomResult};
pub use expand::expand;
pub use graph::{DialogueGraph, GraphEdge, GraphNode, NodeData, Position};
pub use reach::is_reachable;
pub use script::{Choice, Continuation, Script, ScriptNode};
