//! Line-oriented "yarn" dialect codec.
//!
//! A script serializes to one block per node:
//!
//! ```text
//! title: start
//! ---
//! Hero: Hello there
//! <<choice "Leave" goto:end>>
//! ===
//! ```
//!
//! The body holds speech lines and double-angle-bracketed commands. The first
//! speech line may carry a `name:` speaker prefix; further speech lines are
//! folded into the text with newline separators, so multi-line text
//! round-trips. The prefix is positional: a speakerless node whose text opens
//! with a colon-bearing line (`Note: hello`) serializes bare and re-parses
//! with that prefix as its speaker, so such text does not round-trip.
//! Recognized commands are `jump <id>` (last one wins) and
//! `choice "<text>" goto:<id>` (a choice without a `goto:` parameter is
//! dropped). Collected choices discard any `jump`. Malformed input fails the
//! whole parse with the offending zero-based block index.

use crate::{
    error::{YarnloomError, YarnloomResult},
    script::{Choice, Continuation, Script, ScriptNode},
};

const TITLE_PREFIX: &str = "title:";
const BLOCK_OPEN: &str = "---";
const BLOCK_CLOSE: &str = "===";
const CMD_OPEN: &str = "<<";
const CMD_CLOSE: &str = ">>";
const GOTO_PREFIX: &str = "goto:";

/// Serializes the script as dialect text, one block per node in order.
pub fn serialize_dialect(script: &Script) -> String {
    let mut out = String::new();
    for node in &script.nodes {
        out.push_str(TITLE_PREFIX);
        out.push(' ');
        out.push_str(&node.id);
        out.push('\n');
        out.push_str(BLOCK_OPEN);
        out.push('\n');

        if node.speaker.is_empty() {
            out.push_str(&node.text);
        } else {
            out.push_str(&node.speaker);
            out.push_str(": ");
            out.push_str(&node.text);
        }
        out.push('\n');

        match &node.continuation {
            Continuation::Terminal => {}
            Continuation::Linear { next } => {
                out.push_str(&format!("{CMD_OPEN}jump {next}{CMD_CLOSE}\n"));
            }
            Continuation::Branching { choices } => {
                for choice in choices {
                    out.push_str(&format!(
                        "{CMD_OPEN}choice \"{}\" {GOTO_PREFIX}{}{CMD_CLOSE}\n",
                        choice.text, choice.next
                    ));
                }
            }
        }

        out.push_str(BLOCK_CLOSE);
        out.push_str("\n\n");
    }
    out
}

/// Parses dialect text into the linear script form. Fails whole: on any
/// malformed block no partial script is returned.
#[tracing::instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_dialect(input: &str) -> YarnloomResult<Script> {
    let lines: Vec<&str> = input.lines().collect();
    let mut nodes = Vec::new();
    let mut i = 0usize;
    let mut block = 0usize;

    loop {
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }

        let title_line = lines[i].trim();
        let id = title_line
            .strip_prefix(TITLE_PREFIX)
            .ok_or_else(|| {
                YarnloomError::parse(
                    block,
                    format!("expected title declaration, found '{title_line}'"),
                )
            })?
            .trim();
        if id.is_empty() {
            return Err(YarnloomError::parse(block, "title must name a node id"));
        }
        i += 1;

        if i >= lines.len() || lines[i].trim() != BLOCK_OPEN {
            return Err(YarnloomError::parse(
                block,
                format!("expected '{BLOCK_OPEN}' after title"),
            ));
        }
        i += 1;

        let mut body = BlockBody::default();
        let mut closed = false;
        while i < lines.len() {
            let line = lines[i];
            i += 1;
            if line.trim() == BLOCK_CLOSE {
                closed = true;
                break;
            }
            body.push_line(line, block)?;
        }
        if !closed {
            return Err(YarnloomError::parse(
                block,
                format!("unterminated block (missing '{BLOCK_CLOSE}')"),
            ));
        }

        nodes.push(body.into_node(id));
        block += 1;
    }

    Ok(Script { nodes })
}

/// Accumulates one block's body while it is being scanned.
#[derive(Default)]
struct BlockBody {
    speaker: String,
    text_lines: Vec<String>,
    next: Option<String>,
    choices: Vec<Choice>,
}

impl BlockBody {
    fn push_line(&mut self, line: &str, block: usize) -> YarnloomResult<()> {
        let trimmed = line.trim();
        if let Some(cmd) = trimmed
            .strip_prefix(CMD_OPEN)
            .and_then(|rest| rest.strip_suffix(CMD_CLOSE))
        {
            return self.apply_command(cmd.trim(), block);
        }

        // Speech line. Only the very first one may carry a speaker prefix.
        if self.text_lines.is_empty() && self.speaker.is_empty() {
            if let Some((name, rest)) = line.split_once(':') {
                self.speaker = name.trim().to_string();
                self.text_lines
                    .push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
                return Ok(());
            }
        }
        self.text_lines.push(line.to_string());
        Ok(())
    }

    fn apply_command(&mut self, cmd: &str, block: usize) -> YarnloomResult<()> {
        let (name, rest) = match cmd.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd, ""),
        };
        match name {
            "jump" => {
                let mut args = rest.split_whitespace();
                let target = args.next().ok_or_else(|| {
                    YarnloomError::parse(block, "jump command requires a target id")
                })?;
                if args.next().is_some() {
                    return Err(YarnloomError::parse(
                        block,
                        format!("jump command takes a single target id, got '{rest}'"),
                    ));
                }
                // Last jump wins.
                self.next = Some(target.to_string());
                Ok(())
            }
            "choice" => {
                let rest = rest.strip_prefix('"').ok_or_else(|| {
                    YarnloomError::parse(block, "choice command requires a quoted display text")
                })?;
                let (text, params) = rest.split_once('"').ok_or_else(|| {
                    YarnloomError::parse(block, "unterminated quote in choice command")
                })?;
                // A choice without a goto: parameter contributes nothing.
                if let Some(target) = params
                    .split_whitespace()
                    .find_map(|p| p.strip_prefix(GOTO_PREFIX))
                {
                    self.choices.push(Choice {
                        text: text.to_string(),
                        next: target.to_string(),
                    });
                }
                Ok(())
            }
            other => Err(YarnloomError::parse(
                block,
                format!("unknown command '{other}'"),
            )),
        }
    }

    fn into_node(self, id: &str) -> ScriptNode {
        // Choices collected in the block discard any jump target.
        let continuation = if !self.choices.is_empty() {
            Continuation::Branching {
                choices: self.choices,
            }
        } else if let Some(next) = self.next {
            Continuation::Linear { next }
        } else {
            Continuation::Terminal
        };
        ScriptNode {
            id: id.to_string(),
            speaker: self.speaker,
            text: self.text_lines.join("\n"),
            continuation,
        }
    }
}
