use crate::{
    error::YarnloomResult,
    graph::{DialogueGraph, GraphEdge, GraphNode, NodeData, Position},
    script::{Continuation, Script},
};

/// Expands the linear script into the editable node+edge graph.
///
/// Placement is a deterministic diagonal stagger by ordinal position; the
/// coordinates are cosmetic. Linear continuations become unlabeled edges with
/// id `{source}-next`; each choice becomes an edge `{source}-c{i}` labeled
/// with its display text. The suffix alone discriminates, so derived ids stay
/// unique even for hyphenated node ids (`a` -> `b-c` and `a-b` -> `c` must not
/// share an id). The produced graph carries exactly the input's node ids and
/// is structurally validated before being returned.
#[tracing::instrument(skip(script), fields(nodes = script.nodes.len()))]
pub fn expand(script: &Script) -> YarnloomResult<DialogueGraph> {
    script.validate()?;

    let mut nodes = Vec::with_capacity(script.nodes.len());
    let mut edges = Vec::new();

    for (idx, record) in script.nodes.iter().enumerate() {
        nodes.push(GraphNode {
            id: record.id.clone(),
            position: Position {
                x: idx as f64 * 200.0,
                y: idx as f64 * 80.0,
            },
            data: NodeData {
                speaker: record.speaker.clone(),
                text: record.text.clone(),
            },
        });

        match &record.continuation {
            Continuation::Terminal => {}
            Continuation::Linear { next } => edges.push(GraphEdge {
                id: format!("{}-next", record.id),
                source: record.id.clone(),
                target: next.clone(),
                label: String::new(),
            }),
            Continuation::Branching { choices } => {
                for (i, choice) in choices.iter().enumerate() {
                    edges.push(GraphEdge {
                        id: format!("{}-c{}", record.id, i),
                        source: record.id.clone(),
                        target: choice.next.clone(),
                        label: choice.text.clone(),
                    });
                }
            }
        }
    }

    let graph = DialogueGraph { nodes, edges };
    graph.validate()?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Choice, ScriptNode};

    fn sample() -> Script {
        Script {
            nodes: vec![
                ScriptNode::branching(
                    "start",
                    "Hero",
                    "Which way?",
                    vec![
                        Choice {
                            text: "Left".to_string(),
                            next: "cave".to_string(),
                        },
                        Choice {
                            text: "Right".to_string(),
                            next: "end".to_string(),
                        },
                    ],
                ),
                ScriptNode::linear("cave", "", "Dark.", "end"),
                ScriptNode::terminal("end", "", "Bye."),
            ],
        }
    }

    #[test]
    fn node_id_set_matches_input() {
        let graph = expand(&sample()).unwrap();
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["start", "cave", "end"]);
    }

    #[test]
    fn linear_edge_is_unlabeled() {
        let graph = expand(&sample()).unwrap();
        let e = graph.outgoing("cave").next().unwrap();
        assert_eq!(e.id, "cave-next");
        assert_eq!(e.target, "end");
        assert_eq!(e.label, "");
    }

    #[test]
    fn choice_edges_carry_labels_in_order() {
        let graph = expand(&sample()).unwrap();
        let outs: Vec<&GraphEdge> = graph.outgoing("start").collect();
        assert_eq!(outs.len(), 2);
        assert_eq!(outs[0].id, "start-c0");
        assert_eq!(outs[0].label, "Left");
        assert_eq!(outs[0].target, "cave");
        assert_eq!(outs[1].id, "start-c1");
        assert_eq!(outs[1].label, "Right");
    }

    #[test]
    fn placement_is_deterministic() {
        let a = expand(&sample()).unwrap();
        let b = expand(&sample()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.nodes[0].position, a.nodes[1].position);
    }

    #[test]
    fn hyphenated_ids_do_not_collide() {
        // `a` -> `b-c` and `a-b` -> `c` would both derive `a-b-c` under a
        // source-target scheme; the source-suffix scheme keeps them apart.
        let script = Script {
            nodes: vec![
                ScriptNode::linear("a", "", "", "b-c"),
                ScriptNode::linear("a-b", "", "", "c"),
                ScriptNode::terminal("b-c", "", ""),
                ScriptNode::terminal("c", "", ""),
            ],
        };
        let graph = expand(&script).unwrap();
        let ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a-next", "a-b-next"]);
    }

    #[test]
    fn duplicate_script_ids_are_rejected() {
        let script = Script {
            nodes: vec![
                ScriptNode::terminal("a", "", ""),
                ScriptNode::terminal("a", "", ""),
            ],
        };
        assert!(expand(&script).is_err());
    }

    #[test]
    fn reference_to_missing_node_is_structural_error() {
        let script = Script {
            nodes: vec![ScriptNode::linear("a", "", "", "nowhere")],
        };
        let err = expand(&script).unwrap_err();
        assert!(err.to_string().contains("dangling target 'nowhere'"));
    }
}
