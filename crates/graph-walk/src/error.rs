use std::fmt;
use thiserror::Error;

/// Errors raised when a traversal cannot be started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError<N>
where
    N: fmt::Debug,
{
    /// The start node is not part of the graph
    #[error("node {0:?} is not in the graph")]
    UnknownNode(N),

    /// An argument is outside its accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur during hierarchical layout computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError<N>
where
    N: fmt::Debug,
{
    /// The graph is empty, cyclic, disconnected, or has a node with several parents
    ///
    /// Directed graphs must be arborescences: acyclic and weakly connected is
    /// not enough, every node also needs at most one incoming edge.
    #[error("graph must be a tree to compute a hierarchical layout")]
    NotATree,

    /// The requested root is not part of the graph
    #[error("root {0:?} is not in the graph")]
    UnknownNode(N),
}
