use crate::TraversalError;
use petgraph::visit::{IntoNodeIdentifiers, NodeCount};
use std::fmt;
use std::iter::FusedIterator;

/// An edge discovered during a traversal: `(parent, child)`
pub type Edge<N> = (N, N);

/// Pull-based access to the edges of a lazy traversal
///
/// A cursor owns its visited set and frontier, so a consumer can pull one edge,
/// pause, and resume without redoing work. Dropping a cursor part-way is always
/// valid. Once `try_next` returns an error the cursor is finished and every
/// later pull yields `Ok(None)`: start a fresh traversal to retry.
pub trait EdgeCursor {
    /// Node identifier type
    type Node;

    /// Error raised by the neighbor strategy
    type Error;

    /// Pull the next discovered edge
    ///
    /// # Errors
    /// Returns the neighbor strategy's error when it fails for a node this pull
    /// needed to expand
    fn try_next(&mut self) -> Result<Option<Edge<Self::Node>>, Self::Error>;

    /// Number of edges produced so far
    fn discovered(&self) -> usize;

    /// Adapt the cursor into an iterator of `Result`s
    fn try_edges(self) -> TryEdges<Self>
    where
        Self: Sized,
    {
        TryEdges { cursor: self }
    }
}

/// Iterator over the edges of a cursor whose neighbor strategy can fail
#[derive(Debug)]
pub struct TryEdges<C> {
    cursor: C,
}

impl<C> TryEdges<C> {
    /// Get back the underlying cursor
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: EdgeCursor> Iterator for TryEdges<C> {
    type Item = Result<Edge<C::Node>, C::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.try_next().transpose()
    }
}

impl<C: EdgeCursor> FusedIterator for TryEdges<C> {}

/// Convert a signed depth limit into the unsigned limit the sequencers take
///
/// # Errors
/// Returns [`TraversalError::InvalidArgument`] for negative values
pub fn checked_depth_limit<N>(limit: i64) -> Result<usize, TraversalError<N>>
where
    N: fmt::Debug,
{
    usize::try_from(limit).map_err(|_| {
        TraversalError::InvalidArgument(format!("depth limit must be >= 0, got {limit}"))
    })
}

/// Resolve an optional depth limit, defaulting to the number of nodes
pub(crate) fn resolve_depth_limit<G: NodeCount>(graph: G, limit: Option<usize>) -> usize {
    limit.unwrap_or_else(|| graph.node_count())
}

pub(crate) fn ensure_contains<G>(graph: G, node: G::NodeId) -> Result<(), TraversalError<G::NodeId>>
where
    G: IntoNodeIdentifiers,
    G::NodeId: fmt::Debug,
{
    if graph.node_identifiers().any(|n| n == node) {
        Ok(())
    } else {
        Err(TraversalError::UnknownNode(node))
    }
}
