use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::DialogueGraph;

/// True when some forward path from `start` reaches a terminal node (a node
/// with zero outgoing edges), i.e. the dialogue has at least one way to end.
///
/// Breadth-first over the edge relation with a visited set, so cycles
/// terminate. Never fails: a `start` id missing from the node set is simply
/// not reachable, and a dangling edge target is a dead end rather than a
/// terminal.
pub fn is_reachable(graph: &DialogueGraph, start: &str) -> bool {
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    if !node_ids.contains(start) {
        return false;
    }

    let mut by_source: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        by_source
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::from([start]);
    let mut queue: VecDeque<&str> = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        if !node_ids.contains(id) {
            continue;
        }
        match by_source.get(id) {
            None => return true,
            Some(targets) => {
                for &target in targets {
                    if visited.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode, NodeData, Position};

    fn graph(node_ids: &[&str], edges: &[(&str, &str, &str)]) -> DialogueGraph {
        DialogueGraph {
            nodes: node_ids
                .iter()
                .map(|id| GraphNode {
                    id: id.to_string(),
                    position: Position::default(),
                    data: NodeData::default(),
                })
                .collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, (source, target, label))| GraphEdge {
                    id: format!("e{i}"),
                    source: source.to_string(),
                    target: target.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn terminal_successor_is_reachable() {
        let g = graph(&["A", "B"], &[("A", "B", "")]);
        assert!(is_reachable(&g, "A"));
    }

    #[test]
    fn pure_cycle_has_no_ending() {
        let g = graph(&["A", "B"], &[("A", "B", ""), ("B", "A", "")]);
        assert!(!is_reachable(&g, "A"));
    }

    #[test]
    fn branch_with_one_dead_end_succeeds() {
        let g = graph(
            &["A", "B", "C"],
            &[("A", "B", "go"), ("A", "C", "stop"), ("B", "A", "")],
        );
        assert!(is_reachable(&g, "A"));
    }

    #[test]
    fn missing_start_is_not_reachable() {
        let g = graph(&["A"], &[]);
        assert!(!is_reachable(&g, "nope"));
    }

    #[test]
    fn isolated_start_is_its_own_terminal() {
        let g = graph(&["A"], &[]);
        assert!(is_reachable(&g, "A"));
    }

    #[test]
    fn dangling_target_is_not_a_terminal() {
        // Edit-time state: A's only edge points at a node that does not exist.
        let g = graph(&["A"], &[("A", "ghost", "")]);
        assert!(!is_reachable(&g, "A"));
    }

    #[test]
    fn cycle_with_escape_hatch_succeeds() {
        let g = graph(
            &["hub", "loop", "exit"],
            &[
                ("hub", "loop", "chat"),
                ("loop", "hub", ""),
                ("hub", "exit", "leave"),
            ],
        );
        assert!(is_reachable(&g, "hub"));
    }
}
