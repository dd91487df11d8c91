use crate::{
    error::YarnloomResult,
    graph::DialogueGraph,
    script::{Choice, Continuation, Script, ScriptNode},
};

/// Collapses the editable graph back to the linear script form.
///
/// A node's outgoing edges determine its persisted shape: any labeled edges
/// present make it a branching node built from the labeled edges only, in
/// insertion order, with unlabeled siblings dropped; otherwise exactly one
/// unlabeled edge makes it linear; otherwise it is emitted terminal and any
/// extra unlabeled edges are dropped. The input graph is validated up front
/// so a half-converted script is never returned.
#[tracing::instrument(skip(graph), fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn collapse(graph: &DialogueGraph) -> YarnloomResult<Script> {
    graph.validate()?;

    let mut nodes = Vec::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        let outs: Vec<_> = graph.outgoing(&node.id).collect();
        let labeled: Vec<_> = outs.iter().filter(|e| !e.label.is_empty()).collect();

        let continuation = if !labeled.is_empty() {
            Continuation::Branching {
                choices: labeled
                    .iter()
                    .map(|e| Choice {
                        text: e.label.clone(),
                        next: e.target.clone(),
                    })
                    .collect(),
            }
        } else if outs.len() == 1 {
            Continuation::Linear {
                next: outs[0].target.clone(),
            }
        } else {
            Continuation::Terminal
        };

        nodes.push(ScriptNode {
            id: node.id.clone(),
            speaker: node.data.speaker.clone(),
            text: node.data.text.clone(),
            continuation,
        });
    }

    Ok(Script { nodes })
}
