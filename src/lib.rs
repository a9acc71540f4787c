//! # cardgraph
//!
//! An in-memory directed graph specialized for triples — subject,
//! predicate, object statements — layered on hash-keyed collections.
//!
//! ## Architecture
//!
//! - **Hash collections** (`hash`): set/map containers keyed by a
//!   caller-derived string key ([`hash::HashKey`]) instead of `Eq`/`Hash`,
//!   with insertion-order iteration
//! - **Triple graph** (`graph`): [`graph::Node`] and [`graph::Triple`]
//!   entities plus [`graph::TripleGraph`], which keeps three synchronized
//!   views (adjacency, flat triple set, subject→object→predicate lookup)
//!   consistent across every mutation
//!
//! ## Library usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use cardgraph::graph::{Node, NodeKind, Triple, TripleGraph};
//!
//! let sun = Arc::new(Node::new("sun", "Sun"));
//! let star = Arc::new(Node::new("star", "Star"));
//! let is_a = Arc::new(Node::with_kind("is-a", "is a", NodeKind::Predicate));
//!
//! let mut graph = TripleGraph::new();
//! graph.add_nodes([sun.clone(), is_a.clone(), star.clone()]);
//! graph.add_triple(Triple::new(sun.clone(), is_a, star.clone())).unwrap();
//!
//! assert_eq!(graph.out_degree_of(&sun), 1);
//! assert_eq!(graph.get_predicate("sun", "star").unwrap().id(), "is-a");
//! assert_eq!(graph.root_nodes(), vec![sun]);
//! ```

pub mod error;
pub mod graph;
pub mod hash;
