use crate::Point;
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G`, allowing layout engines to
/// state their own graph requirements (e.g. the hierarchical layout only
/// accepts trees).
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Eq + Hash;

    /// The error returned when the graph does not fit the layout
    type Error;

    /// Compute node positions for the given graph
    ///
    /// # Errors
    /// Returns an error if the graph violates the layout's constraints
    fn layout(&self, graph: G) -> Result<HashMap<Self::NodeId, Point>, Self::Error>;
}
