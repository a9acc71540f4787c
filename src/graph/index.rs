//! The triple graph index: three synchronized views over hash collections.
//!
//! A [`TripleGraph`] owns an adjacency map (node → outgoing triples, which
//! doubles as the node registry), a flat set of every triple, and a dense
//! subject→object→predicate lookup table. Every mutation updates all three
//! views before returning.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GraphError, GraphResult, TripleRole};
use crate::hash::{KeyedMap, KeyedSet};

use super::{Node, NodeKind, Triple};

/// In-memory directed graph of predicate-labeled triples.
///
/// Invariants:
/// - a triple appears in its subject's outgoing set iff it appears in the
///   flat triple set iff the lookup table has a slot for its
///   (subject, object) pair;
/// - a triple may only reference nodes already registered in the graph;
/// - removing a node removes every triple touching it first.
///
/// Parallel triples between the same ordered node pair (differing in
/// predicate or weight) coexist as distinct edges. The lookup table keeps
/// one slot per pair, holding the predicate of the first triple currently
/// stored for that pair; the slot is recomputed after every removal.
#[derive(Clone)]
pub struct TripleGraph {
    /// Node → outgoing triples. A node is registered iff it is a key here.
    adjacency: KeyedMap<Arc<Node>, KeyedSet<Triple>>,
    /// Flat set of every triple in the graph.
    triples: KeyedSet<Triple>,
    /// Subject id → object id → predicate, for O(1) predicate retrieval.
    lookup: IndexMap<String, IndexMap<String, Arc<Node>>>,
}

impl TripleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: KeyedMap::new(),
            triples: KeyedSet::new(),
            lookup: IndexMap::new(),
        }
    }

    // -----------------------------------------------------------------
    // Node registration
    // -----------------------------------------------------------------

    /// Register a node. Returns `true` iff no registered node shared its key.
    pub fn add_node(&mut self, node: Arc<Node>) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        debug!(id = %node.id(), kind = %node.kind(), "add node");
        self.adjacency.insert(node, KeyedSet::new());
        true
    }

    /// Register multiple nodes. Returns `true` iff any was newly inserted.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Arc<Node>>) -> bool {
        let mut modified = false;
        for node in nodes {
            modified = self.add_node(node) || modified;
        }
        modified
    }

    /// Whether a registered node shares the given node's key.
    pub fn contains_node(&self, node: &Node) -> bool {
        self.adjacency.contains_key(node)
    }

    /// The first registered node whose id equals `id`, in registration
    /// order.
    pub fn get_node(&self, id: &str) -> Option<Arc<Node>> {
        self.adjacency
            .keys()
            .find(|node| node.id() == id)
            .map(Arc::clone)
    }

    // -----------------------------------------------------------------
    // Triple insertion
    // -----------------------------------------------------------------

    /// Insert a triple.
    ///
    /// Fails with [`GraphError::UndefinedEndpoint`] if the subject,
    /// predicate, or object is not a registered node (checked in that
    /// order). Otherwise inserts into all three views if not already
    /// present and returns whether the graph changed.
    pub fn add_triple(&mut self, triple: Triple) -> GraphResult<bool> {
        for (role, node) in [
            (TripleRole::Subject, triple.subject()),
            (TripleRole::Predicate, triple.predicate()),
            (TripleRole::Object, triple.object()),
        ] {
            if !self.adjacency.contains_key(node) {
                return Err(GraphError::UndefinedEndpoint {
                    role,
                    id: node.id().to_owned(),
                });
            }
        }

        if self.triples.contains(&triple) {
            return Ok(false);
        }

        debug!(triple = %triple, weight = triple.weight(), "add triple");
        self.lookup
            .entry(triple.subject().id().to_owned())
            .or_default()
            .entry(triple.object().id().to_owned())
            .or_insert_with(|| Arc::clone(triple.predicate()));
        if let Some(outgoing) = self.adjacency.get_mut(triple.subject()) {
            outgoing.insert(triple.clone());
        }
        self.triples.insert(triple);
        Ok(true)
    }

    /// Insert multiple triples. Returns `true` iff any was newly inserted.
    pub fn add_triples(&mut self, triples: impl IntoIterator<Item = Triple>) -> GraphResult<bool> {
        let mut modified = false;
        for triple in triples {
            modified = self.add_triple(triple)? || modified;
        }
        Ok(modified)
    }

    /// Resolve three node ids and insert the triple connecting them.
    ///
    /// Each id must name a registered node; a missing id fails with
    /// [`GraphError::UndefinedEndpoint`] for the corresponding role.
    pub fn add_triple_by_ids(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> GraphResult<bool> {
        let resolve = |graph: &Self, role: TripleRole, id: &str| {
            graph
                .get_node(id)
                .ok_or_else(|| GraphError::UndefinedEndpoint {
                    role,
                    id: id.to_owned(),
                })
        };
        let subject = resolve(self, TripleRole::Subject, subject)?;
        let predicate = resolve(self, TripleRole::Predicate, predicate)?;
        let object = resolve(self, TripleRole::Object, object)?;
        self.add_triple(Triple::new(subject, predicate, object))
    }

    /// Whether a stored triple shares the given triple's key.
    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// The first outgoing triple of `subject` whose object matches,
    /// regardless of predicate.
    pub fn get_triple(&self, subject: &Node, object: &Node) -> Option<Triple> {
        self.adjacency
            .get(subject)?
            .iter()
            .find(|triple| triple.object().as_ref() == object)
            .cloned()
    }

    /// Every triple connecting `subject` to `object`.
    ///
    /// Returns `None` if either node is unregistered, distinguishing
    /// "no such nodes" from "nodes exist, zero matches" (empty set).
    pub fn get_all_triples(&self, subject: &Node, object: &Node) -> Option<KeyedSet<Triple>> {
        if !self.contains_node(subject) || !self.contains_node(object) {
            return None;
        }
        let matches = self
            .adjacency
            .get(subject)
            .into_iter()
            .flat_map(|outgoing| outgoing.iter())
            .filter(|triple| triple.object().as_ref() == object)
            .cloned()
            .collect();
        Some(matches)
    }

    /// The recorded predicate for the (subject, object) pair, if any edge
    /// currently connects them.
    ///
    /// With parallel edges this is the predicate of the first triple
    /// currently stored for the pair.
    pub fn get_predicate(&self, subject_id: &str, object_id: &str) -> Option<Arc<Node>> {
        self.lookup
            .get(subject_id)
            .and_then(|row| row.get(object_id))
            .map(Arc::clone)
    }

    /// Every triple touching `node` as subject or object.
    pub fn triples_of(&self, node: &Node) -> KeyedSet<Triple> {
        self.adjacency
            .values()
            .flat_map(|outgoing| outgoing.iter())
            .filter(|triple| {
                triple.subject().as_ref() == node || triple.object().as_ref() == node
            })
            .cloned()
            .collect()
    }

    /// Every triple whose object is `node`.
    pub fn incoming_triples_of(&self, node: &Node) -> KeyedSet<Triple> {
        self.adjacency
            .values()
            .flat_map(|outgoing| outgoing.iter())
            .filter(|triple| triple.object().as_ref() == node)
            .cloned()
            .collect()
    }

    /// Every triple whose subject is `node` (empty if unregistered).
    pub fn outgoing_triples_of(&self, node: &Node) -> KeyedSet<Triple> {
        self.adjacency.get(node).cloned().unwrap_or_default()
    }

    /// Number of triples touching `node`.
    pub fn degree_of(&self, node: &Node) -> usize {
        self.triples_of(node).len()
    }

    /// Number of triples into `node`.
    pub fn in_degree_of(&self, node: &Node) -> usize {
        self.incoming_triples_of(node).len()
    }

    /// Number of triples out of `node`.
    pub fn out_degree_of(&self, node: &Node) -> usize {
        self.adjacency.get(node).map_or(0, KeyedSet::len)
    }

    /// Every entity-kind node with in-degree zero, in registration order.
    pub fn root_nodes(&self) -> Vec<Arc<Node>> {
        self.adjacency
            .keys()
            .filter(|node| {
                node.kind() == NodeKind::Entity && self.in_degree_of(node.as_ref()) == 0
            })
            .map(Arc::clone)
            .collect()
    }

    // -----------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------

    /// Remove and return the first triple going from `subject` to
    /// `object`, maintaining all three views.
    pub fn remove_triple_between(&mut self, subject: &Node, object: &Node) -> Option<Triple> {
        let target = self
            .adjacency
            .get(subject)?
            .iter()
            .find(|triple| triple.object().as_ref() == object)
            .cloned()?;
        if let Some(outgoing) = self.adjacency.get_mut(subject) {
            outgoing.remove(&target);
        }
        self.triples.remove(&target);
        self.resync_lookup(subject, object.id());
        debug!(triple = %target, "remove triple");
        Some(target)
    }

    /// Remove a triple by its endpoint pair.
    ///
    /// Positional removal: with parallel edges between the pair this
    /// removes *some* triple between them, not necessarily one equal to
    /// `triple`. Callers needing exact-triple removal must disambiguate
    /// via [`TripleGraph::get_all_triples`] first.
    pub fn remove_triple(&mut self, triple: &Triple) -> bool {
        self.remove_triple_between(triple.subject(), triple.object())
            .is_some()
    }

    /// Drain every triple going from `subject` to `object` into a set.
    ///
    /// Returns `None` if either node is unregistered, otherwise the
    /// (possibly empty) set of removed triples.
    pub fn remove_all_triples_between(
        &mut self,
        subject: &Node,
        object: &Node,
    ) -> Option<KeyedSet<Triple>> {
        if !self.contains_node(subject) || !self.contains_node(object) {
            return None;
        }
        let mut removed = KeyedSet::new();
        while let Some(triple) = self.remove_triple_between(subject, object) {
            removed.insert(triple);
        }
        Some(removed)
    }

    /// Remove each listed triple. Returns `true` iff any removal occurred.
    pub fn remove_all_triples(&mut self, triples: &[Triple]) -> bool {
        let mut changed = false;
        for triple in triples {
            changed = self.remove_triple(triple) || changed;
        }
        changed
    }

    /// Remove a node and every triple touching it.
    ///
    /// Returns whether the node was registered. Each touching edge goes
    /// through the synchronized single-edge removal path; iteration works
    /// on snapshots so no collection is mutated while being walked.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        if !self.contains_node(node) {
            return false;
        }
        debug!(id = %node.id(), "remove node");

        // Incoming edges, including self-loops: snapshot the subject list
        // and drain every triple into `node`.
        let subjects: Vec<Arc<Node>> = self.adjacency.keys().map(Arc::clone).collect();
        for subject in &subjects {
            while self.remove_triple_between(subject, node).is_some() {}
        }

        // Outgoing edges: snapshot the remaining targets and drain them.
        let objects: Vec<Arc<Node>> = self
            .adjacency
            .get(node)
            .into_iter()
            .flat_map(|outgoing| outgoing.iter())
            .map(|triple| Arc::clone(triple.object()))
            .collect();
        for object in &objects {
            while self.remove_triple_between(node, object).is_some() {}
        }

        self.adjacency.remove(node);
        true
    }

    /// Remove each listed node (with its triples). Returns `true` iff any
    /// removal occurred.
    pub fn remove_all_nodes(&mut self, nodes: &[Arc<Node>]) -> bool {
        let mut changed = false;
        for node in nodes {
            changed = self.remove_node(node) || changed;
        }
        changed
    }

    /// Drop all nodes and triples. All three views are reset together.
    pub fn clear(&mut self) {
        debug!("clear graph");
        self.adjacency.clear();
        self.triples.clear();
        self.lookup.clear();
    }

    // -----------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------

    /// A fresh set of every registered node.
    pub fn node_set(&self) -> KeyedSet<Arc<Node>> {
        self.adjacency.keys().map(Arc::clone).collect()
    }

    /// A fresh set of every triple.
    pub fn triple_set(&self) -> KeyedSet<Triple> {
        self.triples.iter().cloned().collect()
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of triples.
    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    // -----------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------

    /// Recompute the lookup slot for (subject, object) from the triples
    /// still stored between the pair: first remaining predicate, or no
    /// slot at all.
    fn resync_lookup(&mut self, subject: &Node, object_id: &str) {
        let remaining = self.adjacency.get(subject).and_then(|outgoing| {
            outgoing
                .iter()
                .find(|triple| triple.object().id() == object_id)
                .map(|triple| Arc::clone(triple.predicate()))
        });
        match remaining {
            Some(predicate) => {
                if let Some(row) = self.lookup.get_mut(subject.id()) {
                    row.insert(object_id.to_owned(), predicate);
                }
            }
            None => {
                let row_empty = match self.lookup.get_mut(subject.id()) {
                    Some(row) => {
                        row.shift_remove(object_id);
                        row.is_empty()
                    }
                    None => false,
                };
                if row_empty {
                    self.lookup.shift_remove(subject.id());
                }
            }
        }
    }
}

impl Default for TripleGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TripleGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleGraph")
            .field("nodes", &self.node_count())
            .field("triples", &self.triple_count())
            .finish()
    }
}
