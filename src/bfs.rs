use std::collections::VecDeque;

use ahash::AHashSet;

use crate::{graph::OboGraph, term::NodeId, term::Term};

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn neighbors<'g>(
    graph: &'g OboGraph,
    id: &'g NodeId,
    direction: Direction,
) -> Box<dyn Iterator<Item = &'g NodeId> + 'g> {
    match direction {
        Direction::Up => Box::new(graph.parent_ids(id.as_str())),
        Direction::Down => Box::new(graph.child_ids(id.as_str())),
    }
}

fn closure_bfs<'g>(graph: &'g OboGraph, start: &str, direction: Direction) -> Vec<&'g Term> {
    let Some(root) = graph.get_term(start) else {
        return Vec::new();
    };
    let mut found = Vec::new();
    let mut seen: AHashSet<&NodeId> = AHashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(root.id());
    queue.push_back(root.id());
    while let Some(node) = queue.pop_front() {
        for next in neighbors(graph, node, direction) {
            if seen.insert(next) {
                if let Some(term) = graph.get_term(next.as_str()) {
                    found.push(term);
                }
                queue.push_back(next);
            }
        }
    }
    found
}

/// All transitively reachable parents in breadth-first order. The start term
/// is never part of the result, even on cycles.
pub fn ancestors<'g>(graph: &'g OboGraph, id: &str) -> Vec<&'g Term> {
    closure_bfs(graph, id, Direction::Up)
}

/// All transitively reachable children in breadth-first order.
pub fn descendents<'g>(graph: &'g OboGraph, id: &str) -> Vec<&'g Term> {
    closure_bfs(graph, id, Direction::Down)
}

/// Same node set as [`descendents`], walked depth-first with an explicit stack.
pub fn descendents_dfs<'g>(graph: &'g OboGraph, id: &str) -> Vec<&'g Term> {
    let Some(root) = graph.get_term(id) else {
        return Vec::new();
    };
    let mut found = Vec::new();
    let mut seen: AHashSet<&NodeId> = AHashSet::new();
    let mut stack = vec![root.id()];
    seen.insert(root.id());
    while let Some(node) = stack.pop() {
        for next in neighbors(graph, node, Direction::Down) {
            if seen.insert(next) {
                if let Some(term) = graph.get_term(next.as_str()) {
                    found.push(term);
                }
                stack.push(next);
            }
        }
    }
    found
}
