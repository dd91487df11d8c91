use std::collections::BTreeSet;

use crate::error::{YarnloomError, YarnloomResult};

/// An ordered sequence of dialogue records, the persisted linear form.
///
/// Serializes as a bare JSON array so the on-disk file stays
/// `[{"id": ...}, ...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub nodes: Vec<ScriptNode>,
}

/// One record of the persisted linear dialogue format.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct ScriptNode {
    pub id: String,
    pub speaker: String,
    pub text: String,
    pub continuation: Continuation,
}

/// How a node continues, chosen at construction and never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// No successor; an ending point of the dialogue.
    Terminal,
    /// Exactly one unconditional successor.
    Linear { next: String },
    /// Player-selectable branches, in display order.
    Branching { choices: Vec<Choice> },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Choice {
    pub text: String,
    pub next: String,
}

/// The flat record shape used on disk: `next` and `choices` are optional
/// fields rather than a tagged variant.
#[derive(serde::Serialize, serde::Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    speaker: String,
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<Choice>>,
}

impl From<RawNode> for ScriptNode {
    fn from(raw: RawNode) -> Self {
        // A record carrying both shapes resolves in favour of choices.
        let continuation = match (raw.choices, raw.next) {
            (Some(choices), _) if !choices.is_empty() => Continuation::Branching { choices },
            (_, Some(next)) => Continuation::Linear { next },
            _ => Continuation::Terminal,
        };
        Self {
            id: raw.id,
            speaker: raw.speaker,
            text: raw.text,
            continuation,
        }
    }
}

impl From<ScriptNode> for RawNode {
    fn from(node: ScriptNode) -> Self {
        let (next, choices) = match node.continuation {
            Continuation::Terminal => (None, None),
            Continuation::Linear { next } => (Some(next), None),
            Continuation::Branching { choices } => (None, Some(choices)),
        };
        Self {
            id: node.id,
            speaker: node.speaker,
            text: node.text,
            next,
            choices,
        }
    }
}

impl ScriptNode {
    pub fn terminal(id: impl Into<String>, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            text: text.into(),
            continuation: Continuation::Terminal,
        }
    }

    pub fn linear(
        id: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            text: text.into(),
            continuation: Continuation::Linear { next: next.into() },
        }
    }

    pub fn branching(
        id: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            text: text.into(),
            continuation: Continuation::Branching { choices },
        }
    }
}

impl Script {
    pub fn validate(&self) -> YarnloomResult<()> {
        let mut seen = BTreeSet::new();
        for node in &self.nodes {
            if node.id.trim().is_empty() {
                return Err(YarnloomError::structural("node id must be non-empty"));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(YarnloomError::structural(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(input: &str) -> YarnloomResult<Self> {
        serde_json::from_str(input).map_err(|e| YarnloomError::serde(e.to_string()))
    }

    /// Pretty-prints with serde_json's default 2-space indent.
    pub fn to_json(&self) -> YarnloomResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| YarnloomError::serde(e.to_string()))
    }
}
