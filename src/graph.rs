use std::collections::BTreeSet;

use crate::error::{YarnloomError, YarnloomResult};

/// Editor-only canvas placement; carries no dialogue meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeData {
    pub speaker: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

/// A directed, optionally-labeled edge. An empty label is a plain `next`
/// continuation; a non-empty label is a choice's display text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// The caller-owned interactive representation of a dialogue: one node per
/// script record plus the directed edges between them. The core never holds
/// one of these between calls; the editor owns and mutates it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DialogueGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DialogueGraph {
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Outgoing edges of `source`, in insertion order.
    pub fn outgoing<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// Checks the relationship invariants: unique node ids, unique edge ids,
    /// and no edge endpoint referencing a missing node.
    pub fn validate(&self) -> YarnloomResult<()> {
        let mut node_ids = BTreeSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(YarnloomError::structural(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        let mut edge_ids = BTreeSet::new();
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(YarnloomError::structural(format!(
                    "duplicate edge id '{}'",
                    edge.id
                )));
            }
            if !node_ids.contains(edge.source.as_str()) {
                return Err(YarnloomError::structural(format!(
                    "edge '{}' has dangling source '{}'",
                    edge.id, edge.source
                )));
            }
            if !node_ids.contains(edge.target.as_str()) {
                return Err(YarnloomError::structural(format!(
                    "edge '{}' has dangling target '{}'",
                    edge.id, edge.target
                )));
            }
        }
        Ok(())
    }
}
