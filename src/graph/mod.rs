//! Triple graph: nodes, predicate-labeled edges, and the indexed graph.
//!
//! The graph stores triples (subject, predicate, object) whose endpoints
//! are [`Node`]s registered with a [`TripleGraph`].
//!
//! - **Entities** (this module): [`Node`] and [`Triple`], identity defined
//!   by their [`HashKey`] implementations
//! - **Index** ([`index`]): [`TripleGraph`], three synchronized views over
//!   the hash collections

pub mod index;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::hash::HashKey;

pub use index::TripleGraph;

/// Classification of a node in the triple graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// An ordinary graph vertex.
    #[default]
    Entity,
    /// A node used purely as a predicate label.
    Predicate,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Entity => write!(f, "entity"),
            NodeKind::Predicate => write!(f, "predicate"),
        }
    }
}

/// An identity-bearing vertex of the triple graph.
///
/// Immutable after construction. Equality and the hash key derive solely
/// from `id`; the label carries no identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: String,
    label: String,
    kind: NodeKind,
}

impl Node {
    /// Create an entity node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(id, label, NodeKind::Entity)
    }

    /// Create a node with an explicit kind.
    pub fn with_kind(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    /// The externally-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The descriptive label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The node's classification.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

impl HashKey for Node {
    fn hash_key(&self) -> String {
        format!("node:{}", self.id)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.label)
    }
}

/// A directed, predicate-labeled edge between two nodes.
///
/// A triple refers to nodes owned elsewhere (the graph); it never
/// deep-copies its endpoints. The endpoints are fixed at construction,
/// the weight is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triple {
    subject: Arc<Node>,
    predicate: Arc<Node>,
    object: Arc<Node>,
    weight: f64,
}

impl Triple {
    /// Create a triple with the default weight of 1.
    pub fn new(subject: Arc<Node>, predicate: Arc<Node>, object: Arc<Node>) -> Self {
        Self {
            subject,
            predicate,
            object,
            weight: 1.0,
        }
    }

    /// Set the weight at construction time.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The subject endpoint.
    pub fn subject(&self) -> &Arc<Node> {
        &self.subject
    }

    /// The predicate label.
    pub fn predicate(&self) -> &Arc<Node> {
        &self.predicate
    }

    /// The object endpoint.
    pub fn object(&self) -> &Arc<Node> {
        &self.object
    }

    /// The edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Update the edge weight.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// A new triple with subject and object swapped, same predicate and
    /// weight.
    pub fn reverse(&self) -> Triple {
        Triple {
            subject: Arc::clone(&self.object),
            predicate: Arc::clone(&self.predicate),
            object: Arc::clone(&self.subject),
            weight: self.weight,
        }
    }

    /// Whichever of subject/object is not `node`.
    ///
    /// Fails with [`GraphError::InvalidEndpoint`] if `node` is neither.
    pub fn opposite_of(&self, node: &Node) -> GraphResult<&Arc<Node>> {
        if self.subject.as_ref() == node {
            Ok(&self.object)
        } else if self.object.as_ref() == node {
            Ok(&self.subject)
        } else {
            Err(GraphError::InvalidEndpoint {
                id: node.id().to_owned(),
            })
        }
    }
}

impl HashKey for Triple {
    fn hash_key(&self) -> String {
        format!(
            "triple:({},{},{},{})",
            self.subject.hash_key(),
            self.predicate.hash_key(),
            self.object.hash_key(),
            self.weight
        )
    }
}

/// Equality covers subject, predicate, object, and weight — the same
/// fields the hash key covers, so parallel edges that differ only in
/// predicate are distinct triples.
impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
            && self.weight == other.weight
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} --[{}]--> {}",
            self.subject.id(),
            self.predicate.id(),
            self.object.id()
        )
    }
}
