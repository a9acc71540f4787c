//! Rich diagnostic error types for cardgraph.
//!
//! The graph layer has exactly two hard-failure conditions, both caused by
//! structural misuse. Each variant carries a miette `#[diagnostic]` derive
//! with an error code and help text so callers know exactly what went wrong
//! and how to fix it. Lookups that legitimately find nothing return
//! `Option`, never an error.

use miette::Diagnostic;
use thiserror::Error;

/// The position a node occupies in a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleRole {
    Subject,
    Predicate,
    Object,
}

impl std::fmt::Display for TripleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripleRole::Subject => write!(f, "subject"),
            TripleRole::Predicate => write!(f, "predicate"),
            TripleRole::Object => write!(f, "object"),
        }
    }
}

/// Errors raised by the triple graph.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("{role} of triple not found in graph: {id}")]
    #[diagnostic(
        code(cardgraph::graph::undefined_endpoint),
        help(
            "A triple may only reference nodes already registered in the graph. \
             Register the missing node with `add_node` before retrying."
        )
    )]
    UndefinedEndpoint { role: TripleRole, id: String },

    #[error("neither subject nor object of triple: {id}")]
    #[diagnostic(
        code(cardgraph::graph::invalid_endpoint),
        help(
            "`opposite_of` only accepts the triple's own subject or object node. \
             Check which triple the node came from."
        )
    )]
    InvalidEndpoint { id: String },
}

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
