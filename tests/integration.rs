//! End-to-end integration tests for the cardgraph triple graph.
//!
//! These tests exercise the full public surface from node registration
//! through triple insertion, queries, and removal cascades, validating
//! that the adjacency, flat-set, and predicate-lookup views stay in
//! agreement across interleaved mutations.

use std::sync::Arc;

use cardgraph::error::{GraphError, TripleRole};
use cardgraph::graph::{Node, NodeKind, Triple, TripleGraph};

fn entity(id: &str) -> Arc<Node> {
    Arc::new(Node::new(id, format!("{id}-label")))
}

fn predicate(id: &str) -> Arc<Node> {
    Arc::new(Node::with_kind(id, format!("{id}-label"), NodeKind::Predicate))
}

/// n1 --p1--> n2 --p1--> n4 <--p1-- n3, with p1 registered as a node.
fn sample_graph() -> (TripleGraph, Vec<Arc<Node>>, Arc<Node>) {
    let nodes: Vec<Arc<Node>> = ["n1", "n2", "n3", "n4"].iter().map(|id| entity(id)).collect();
    let p1 = predicate("p1");

    let mut graph = TripleGraph::new();
    graph.add_nodes(nodes.iter().cloned());
    graph.add_node(p1.clone());
    graph
        .add_triples([
            Triple::new(nodes[0].clone(), p1.clone(), nodes[1].clone()),
            Triple::new(nodes[1].clone(), p1.clone(), nodes[3].clone()),
            Triple::new(nodes[2].clone(), p1.clone(), nodes[3].clone()),
        ])
        .unwrap();
    (graph, nodes, p1)
}

#[test]
fn end_to_end_build_query_remove() {
    let (mut graph, nodes, p1) = sample_graph();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.triple_count(), 3);

    // Root detection: entity-kind nodes with no incoming edges.
    let roots = graph.root_nodes();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0], nodes[0]);
    assert_eq!(roots[1], nodes[2]);

    // Every view agrees on the n2 -> n4 edge.
    let t = graph.get_triple(&nodes[1], &nodes[3]).unwrap();
    assert!(graph.contains_triple(&t));
    assert!(graph.outgoing_triples_of(&nodes[1]).contains(&t));
    assert!(graph.incoming_triples_of(&nodes[3]).contains(&t));
    assert_eq!(graph.get_predicate("n2", "n4"), Some(p1.clone()));

    // Removing n4 cascades to both triples into it.
    assert!(graph.remove_node(&nodes[3]));
    assert_eq!(graph.triple_count(), 1);
    assert_eq!(graph.get_predicate("n2", "n4"), None);
    assert_eq!(graph.get_predicate("n3", "n4"), None);
    assert_eq!(graph.out_degree_of(&nodes[1]), 0);
    assert_eq!(graph.out_degree_of(&nodes[2]), 0);

    // n2 still has its incoming edge from n1.
    assert_eq!(graph.in_degree_of(&nodes[1]), 1);
    assert_eq!(graph.get_predicate("n1", "n2"), Some(p1));

    // n2, n3 are now roots alongside... n2 has in-degree 1, so just n3 joins.
    let roots = graph.root_nodes();
    assert_eq!(roots, vec![nodes[0].clone(), nodes[2].clone()]);
}

#[test]
fn triples_by_id_and_node_lookup() {
    let (mut graph, nodes, _) = sample_graph();

    assert_eq!(graph.get_node("n2"), Some(nodes[1].clone()));
    assert_eq!(graph.get_node("n3").unwrap().label(), "n3-label");
    assert_eq!(graph.get_node("unknown"), None);

    // Insert by ids, then verify through the regular views.
    assert!(graph.add_triple_by_ids("n4", "p1", "n1").unwrap());
    let t = graph.get_triple(&nodes[3], &nodes[0]).unwrap();
    assert_eq!(t.predicate().id(), "p1");

    // Unknown object id names the failing role.
    let err = graph.add_triple_by_ids("n1", "p1", "unknown").unwrap_err();
    assert!(matches!(
        err,
        GraphError::UndefinedEndpoint {
            role: TripleRole::Object,
            ..
        }
    ));
}

#[test]
fn duplicate_and_reversed_triples() {
    let (mut graph, nodes, p1) = sample_graph();

    // A key-equal triple does not change the graph.
    let duplicate = Triple::new(nodes[0].clone(), p1.clone(), nodes[1].clone());
    assert!(!graph.add_triple(duplicate).unwrap());
    assert_eq!(graph.triple_count(), 3);

    // Its reverse is a different edge and inserts fine.
    let reversed = Triple::new(nodes[0].clone(), p1, nodes[1].clone()).reverse();
    assert!(graph.add_triple(reversed).unwrap());
    assert_eq!(graph.triple_count(), 4);
    assert_eq!(graph.in_degree_of(&nodes[0]), 1);
    assert_eq!(graph.get_predicate("n2", "n1").unwrap().id(), "p1");
}

#[test]
fn weighted_parallel_edges_survive_round_trips() {
    let mut graph = TripleGraph::new();
    let (a, b) = (entity("a"), entity("b"));
    let knows = predicate("knows");
    let likes = predicate("likes");
    graph.add_nodes([a.clone(), b.clone(), knows.clone(), likes.clone()]);

    let strong = Triple::new(a.clone(), knows.clone(), b.clone()).with_weight(0.9);
    let weak = Triple::new(a.clone(), likes.clone(), b.clone()).with_weight(0.1);
    graph.add_triples([strong.clone(), weak.clone()]).unwrap();

    assert_eq!(graph.out_degree_of(&a), 2);
    let all = graph.get_all_triples(&a, &b).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&strong));
    assert!(all.contains(&weak));

    // Positional removal takes one of the pair; the other remains visible
    // in all three views.
    assert!(graph.remove_triple(&strong));
    assert_eq!(graph.out_degree_of(&a), 1);
    let remaining = graph.get_triple(&a, &b).unwrap();
    assert_eq!(graph.get_predicate("a", "b").unwrap().id(), remaining.predicate().id());

    let drained = graph.remove_all_triples_between(&a, &b).unwrap();
    assert_eq!(drained.len(), 1);
    assert_eq!(graph.triple_count(), 0);
    assert_eq!(graph.get_predicate("a", "b"), None);
}

#[test]
fn clear_then_rebuild() {
    let (mut graph, _, _) = sample_graph();
    graph.clear();

    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.triple_count(), 0);
    assert_eq!(graph.get_predicate("n1", "n2"), None);

    // Clearing twice leaves an empty graph both times.
    graph.clear();
    assert!(graph.is_empty());

    // The graph is fully reusable after clear.
    let (sun, star) = (entity("sun"), entity("star"));
    let is_a = predicate("is-a");
    graph.add_nodes([sun.clone(), star.clone(), is_a.clone()]);
    graph
        .add_triple(Triple::new(sun.clone(), is_a, star.clone()))
        .unwrap();
    assert_eq!(graph.root_nodes(), vec![sun]);
    assert_eq!(graph.in_degree_of(&star), 1);
}

#[test]
fn opposite_node_walk() {
    let (graph, nodes, _) = sample_graph();

    // Walk n1 -> n2 -> n4 using opposite_of.
    let first = graph.get_triple(&nodes[0], &nodes[1]).unwrap();
    let next = first.opposite_of(&nodes[0]).unwrap();
    assert_eq!(next, &nodes[1]);

    let second = graph.get_triple(next, &nodes[3]).unwrap();
    assert_eq!(second.opposite_of(next).unwrap(), &nodes[3]);

    // A node foreign to the triple is rejected.
    assert!(matches!(
        first.opposite_of(&nodes[2]),
        Err(GraphError::InvalidEndpoint { .. })
    ));
}
