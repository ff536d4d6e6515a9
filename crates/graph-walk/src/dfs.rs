use crate::cursor::{ensure_contains, resolve_depth_limit, Edge, EdgeCursor};
use crate::neighbors::{GraphNeighbors, NeighborFn, Ordered};
use crate::TraversalError;
use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::vec;
use tracing::{debug, trace};

/// Lazy sequence of the edges discovered by a depth-first search
///
/// Without an explicit start node every node of the graph is tried as a root
/// in identifier order, so the sequence covers each connected component once.
///
/// The depth limit bounds the stack: a node discovered while the stack is
/// already `depth_limit` frames deep is yielded but never expanded, so it
/// produces no edges of its own.
pub struct DfsEdges<N, S>
where
    S: NeighborFn<N>,
{
    neighbor_fn: S,
    roots: vec::IntoIter<N>,
    visited: HashSet<N>,
    stack: Vec<(N, S::Iter)>,
    depth_limit: usize,
    /// Node yielded by the last pull that still has to be pushed
    pending: Option<N>,
    discovered: usize,
    finished: bool,
}

impl<N, S> DfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N>,
{
    /// Start a depth-first search from `start`, or from every node in turn
    ///
    /// `depth_limit` defaults to the number of nodes in the graph; a limit of
    /// 0 yields nothing.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] if `start` is given and not in the graph
    pub fn new<G>(
        graph: G,
        start: Option<N>,
        neighbor_fn: S,
        depth_limit: Option<usize>,
    ) -> Result<Self, TraversalError<N>>
    where
        G: IntoNodeIdentifiers<NodeId = N> + NodeCount,
    {
        let roots = match start {
            Some(start) => {
                ensure_contains(graph, start)?;
                vec![start]
            }
            None => graph.node_identifiers().collect(),
        };
        let depth_limit = resolve_depth_limit(graph, depth_limit);

        Ok(Self {
            neighbor_fn,
            roots: roots.into_iter(),
            visited: HashSet::new(),
            stack: Vec::new(),
            depth_limit,
            pending: None,
            discovered: 0,
            finished: depth_limit == 0,
        })
    }

    /// Nodes reached so far, roots included
    pub fn visited(&self) -> &HashSet<N> {
        &self.visited
    }

    fn finish(&mut self) {
        if !self.finished {
            debug!(
                discovered = self.discovered,
                roots = self.visited.len() - self.discovered,
                "depth-first traversal finished"
            );
        }
        self.finished = true;
        self.stack.clear();
        self.pending = None;
    }

    fn push(&mut self, node: N) -> Result<(), S::Error> {
        match self.neighbor_fn.neighbors(node) {
            Ok(neighbors) => {
                self.stack.push((node, neighbors));
                Ok(())
            }
            Err(err) => {
                self.finish();
                Err(err)
            }
        }
    }
}

impl<N, S> EdgeCursor for DfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N>,
{
    type Node = N;
    type Error = S::Error;

    fn try_next(&mut self) -> Result<Option<Edge<N>>, S::Error> {
        if self.finished {
            return Ok(None);
        }

        if let Some(node) = self.pending.take() {
            self.push(node)?;
        }

        while !self.finished {
            let Some((parent, neighbors)) = self.stack.last_mut() else {
                let Some(root) = self.roots.next() else {
                    self.finish();
                    continue;
                };
                if self.visited.insert(root) {
                    self.push(root)?;
                }
                continue;
            };

            let parent = *parent;
            let visited = &mut self.visited;
            match neighbors.find(|&node| visited.insert(node)) {
                Some(child) => {
                    // The stack height is the depth of the parent frame
                    if self.stack.len() < self.depth_limit {
                        self.pending = Some(child);
                    }
                    self.discovered += 1;
                    trace!(?parent, ?child, depth = self.stack.len(), "dfs edge");
                    return Ok(Some((parent, child)));
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        Ok(None)
    }

    fn discovered(&self) -> usize {
        self.discovered
    }
}

impl<N, S> Iterator for DfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N, Error = Infallible>,
{
    type Item = Edge<N>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.try_next() {
            Ok(edge) => edge,
            Err(never) => match never {},
        }
    }
}

impl<N, S> FusedIterator for DfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N, Error = Infallible>,
{
}

/// Depth-first edges of `graph`, exploring neighbors in the graph's order
///
/// # Errors
/// Returns [`TraversalError::UnknownNode`] if `start` is given and not in the graph
pub fn dfs_edges<G>(
    graph: G,
    start: Option<G::NodeId>,
    depth_limit: Option<usize>,
) -> Result<DfsEdges<G::NodeId, GraphNeighbors<G>>, TraversalError<G::NodeId>>
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + fmt::Debug,
{
    DfsEdges::new(graph, start, GraphNeighbors(graph), depth_limit)
}

/// Depth-first edges of `graph`, exploring neighbors in the order returned by `order`
///
/// `order` receives the graph's neighbor iterator of a node and returns the
/// neighbors in exploration order.
///
/// # Errors
/// Returns [`TraversalError::UnknownNode`] if `start` is given and not in the graph
pub fn dfs_edges_ordered<G, F, I>(
    graph: G,
    start: Option<G::NodeId>,
    depth_limit: Option<usize>,
    order: F,
) -> Result<DfsEdges<G::NodeId, Ordered<G, F>>, TraversalError<G::NodeId>>
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + fmt::Debug,
    F: FnMut(G::Neighbors) -> I,
    I: IntoIterator<Item = G::NodeId>,
{
    DfsEdges::new(graph, start, Ordered::new(graph, order), depth_limit)
}
