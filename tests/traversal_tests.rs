use std::collections::{BTreeSet, VecDeque};

use obograph::{Meta, OboGraph, RdfType, Term, extract_id};
use rand::{Rng, SeedableRng, rngs::StdRng};

const NODES: usize = 40;

fn random_graph(seed: u64, edges: usize) -> (OboGraph, Vec<(usize, usize)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = OboGraph::new("rand.owl", "http://x/rand.owl", Meta::default());
    graph.add_term(Term::new("is_a".into(), RdfType::Property, "subClassOf", ""));
    for idx in 0..NODES {
        graph.add_term(Term::new(
            format!("N{idx}").into(),
            RdfType::Class,
            "",
            format!("http://x/N{idx}"),
        ));
    }
    let mut pairs = Vec::with_capacity(edges);
    for _ in 0..edges {
        let parent = rng.gen_range(0..NODES);
        let child = rng.gen_range(0..NODES);
        graph
            .add_relationship_with_id(&format!("N{parent}"), &format!("N{child}"), "is_a")
            .expect("link");
        pairs.push((parent, child));
    }
    (graph, pairs)
}

/// Nodes reachable from `start` through one or more parent-to-child steps.
fn reachable(pairs: &[(usize, usize)], start: usize) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    let mut expanded = vec![false; NODES];
    while let Some(node) = queue.pop_front() {
        if std::mem::replace(&mut expanded[node], true) {
            continue;
        }
        for &(parent, child) in pairs {
            if parent == node {
                seen.insert(format!("N{child}"));
                queue.push_back(child);
            }
        }
    }
    seen
}

fn ids(terms: Vec<&Term>) -> BTreeSet<String> {
    terms.iter().map(|t| t.id().to_string()).collect()
}

#[test]
fn test_bfs_and_dfs_yield_same_set() {
    for seed in 0..8 {
        let (graph, _) = random_graph(seed, 60);
        for idx in 0..NODES {
            let id = format!("N{idx}");
            let bfs = graph.descendents(&id);
            let dfs = graph.descendents_dfs(&id);
            assert_eq!(bfs.len(), dfs.len(), "seed {seed} node {id}");
            assert_eq!(ids(bfs), ids(dfs), "seed {seed} node {id}");
        }
    }
}

#[test]
fn test_descendents_match_reachability() {
    for seed in 0..8 {
        let (graph, pairs) = random_graph(seed, 50);
        for idx in 0..NODES {
            let mut expected = reachable(&pairs, idx);
            expected.remove(&format!("N{idx}"));
            assert_eq!(ids(graph.descendents(&format!("N{idx}"))), expected);
        }
    }
}

#[test]
fn test_no_self_inclusion_on_cycles() {
    for seed in 0..8 {
        let (graph, _) = random_graph(seed, 120);
        for idx in 0..NODES {
            let id = format!("N{idx}");
            assert!(!ids(graph.ancestors(&id)).contains(&id));
            assert!(!ids(graph.descendents(&id)).contains(&id));
            assert!(!ids(graph.descendents_dfs(&id)).contains(&id));
        }
    }
}

#[test]
fn test_ancestors_mirror_descendents() {
    let (graph, _) = random_graph(42, 70);
    for idx in 0..NODES {
        let id = format!("N{idx}");
        for ancestor in graph.ancestors(&id) {
            assert!(ids(graph.descendents(ancestor.id().as_str())).contains(&id));
        }
    }
}

#[test]
fn test_unknown_start_is_empty() {
    let (graph, _) = random_graph(1, 10);
    assert!(graph.ancestors("missing").is_empty());
    assert!(graph.descendents("missing").is_empty());
    assert!(graph.descendents_dfs("missing").is_empty());
}

#[test]
fn test_extract_id_is_idempotent() {
    let iris = [
        "http://purl.obolibrary.org/obo/SO_0000110",
        "http://purl.obolibrary.org/obo/so#part_of",
        "http://www.w3.org/2000/01/rdf-schema#subClassOf",
        "is_a",
        "",
        "http://x/",
        "a#b/c#d",
    ];
    for iri in iris {
        let once = extract_id(iri);
        assert_eq!(extract_id(once), once, "{iri}");
    }
}
