use crate::cursor::{ensure_contains, resolve_depth_limit, Edge, EdgeCursor};
use crate::neighbors::{GraphNeighbors, Infallibly, NeighborFn};
use crate::TraversalError;
use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};
use std::collections::{HashSet, VecDeque};
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Lazy sequence of the edges discovered by a breadth-first search
///
/// Edges come out level by level: every edge reaching a node at depth `d`
/// precedes every edge reaching depth `d + 1`. Within a level, parents are
/// expanded in the order they were discovered.
pub struct BfsEdges<N, S>
where
    S: NeighborFn<N>,
{
    neighbor_fn: S,
    visited: HashSet<N>,
    total_nodes: usize,
    depth_limit: usize,
    depth: usize,
    /// Start node whose neighbors have not been requested yet
    start: Option<N>,
    level: VecDeque<(N, S::Iter)>,
    next_level: VecDeque<(N, S::Iter)>,
    discovered: usize,
    finished: bool,
}

impl<N, S> BfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N>,
{
    /// Start a breadth-first search from `start`
    ///
    /// `depth_limit` caps the number of levels explored and defaults to the
    /// number of nodes in the graph; a limit of 0 yields nothing.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] if `start` is not in the graph
    pub fn new<G>(
        graph: G,
        start: N,
        neighbor_fn: S,
        depth_limit: Option<usize>,
    ) -> Result<Self, TraversalError<N>>
    where
        G: IntoNodeIdentifiers<NodeId = N> + NodeCount,
    {
        ensure_contains(graph, start)?;
        let depth_limit = resolve_depth_limit(graph, depth_limit);

        Ok(Self {
            neighbor_fn,
            visited: HashSet::from([start]),
            total_nodes: graph.node_count(),
            depth_limit,
            depth: 0,
            start: Some(start),
            level: VecDeque::new(),
            next_level: VecDeque::new(),
            discovered: 0,
            finished: depth_limit == 0,
        })
    }

    /// Nodes reached so far, the start node included
    pub fn visited(&self) -> &HashSet<N> {
        &self.visited
    }

    fn finish(&mut self) {
        if !self.finished {
            debug!(
                discovered = self.discovered,
                depth = self.depth,
                "breadth-first traversal finished"
            );
        }
        self.finished = true;
        self.level.clear();
        self.next_level.clear();
    }

    fn expand(&mut self, node: N) -> Result<S::Iter, S::Error> {
        self.neighbor_fn.neighbors(node).inspect_err(|_| self.finish())
    }
}

impl<N, S> EdgeCursor for BfsEdges<N, S>
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

        if let Some(start) = self.start.take() {
            let neighbors = self.expand(start)?;
            self.level.push_back((start, neighbors));
        }

        while !self.finished {
            let Some((parent, neighbors)) = self.level.front_mut() else {
                // Level exhausted, move one level deeper
                self.depth += 1;
                if self.next_level.is_empty() || self.depth >= self.depth_limit {
                    self.finish();
                } else {
                    std::mem::swap(&mut self.level, &mut self.next_level);
                }
                continue;
            };

            let parent = *parent;
            let visited = &mut self.visited;
            if let Some(child) = neighbors.find(|&node| visited.insert(node)) {
                let child_neighbors = self.expand(child)?;
                self.next_level.push_back((child, child_neighbors));
                self.discovered += 1;
                trace!(?parent, ?child, depth = self.depth + 1, "bfs edge");
                return Ok(Some((parent, child)));
            }

            self.level.pop_front();
            if self.visited.len() == self.total_nodes {
                // Every node of the graph has been reached
                self.finish();
            }
        }

        Ok(None)
    }

    fn discovered(&self) -> usize {
        self.discovered
    }
}

impl<N, S> Iterator for BfsEdges<N, S>
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

impl<N, S> FusedIterator for BfsEdges<N, S>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: NeighborFn<N, Error = Infallible>,
{
}

/// Breadth-first edges of `graph` from `start`, following the graph's own neighbors
///
/// # Errors
/// Returns [`TraversalError::UnknownNode`] if `start` is not in the graph
pub fn bfs_edges<G>(
    graph: G,
    start: G::NodeId,
    depth_limit: Option<usize>,
) -> Result<BfsEdges<G::NodeId, GraphNeighbors<G>>, TraversalError<G::NodeId>>
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + fmt::Debug,
{
    BfsEdges::new(graph, start, GraphNeighbors(graph), depth_limit)
}

/// Breadth-first edges of `graph` from `start`, with neighbors supplied by `neighbors`
///
/// The graph is only used for the membership check of `start` and for the
/// node count (default depth limit and early termination).
///
/// # Errors
/// Returns [`TraversalError::UnknownNode`] if `start` is not in the graph
pub fn bfs_edges_with<G, F, I>(
    graph: G,
    start: G::NodeId,
    neighbors: F,
    depth_limit: Option<usize>,
) -> Result<BfsEdges<G::NodeId, Infallibly<F>>, TraversalError<G::NodeId>>
where
    G: IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + fmt::Debug,
    F: FnMut(G::NodeId) -> I,
    I: IntoIterator<Item = G::NodeId>,
{
    BfsEdges::new(graph, start, Infallibly(neighbors), depth_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::Fallibly;
    use petgraph::graphmap::{DiGraphMap, UnGraphMap};
    use std::collections::HashMap;
    use test_log::test;

    /// A -> B, C; B -> D, E; C -> F; E -> G
    fn family() -> DiGraphMap<char, ()> {
        DiGraphMap::from_edges([
            ('A', 'B'),
            ('A', 'C'),
            ('B', 'D'),
            ('B', 'E'),
            ('C', 'F'),
            ('E', 'G'),
        ])
    }

    #[test]
    fn edges_come_level_by_level() {
        let graph = family();
        let edges: Vec<_> = bfs_edges(&graph, 'A', None).unwrap().collect();
        assert_eq!(
            edges,
            vec![
                ('A', 'B'),
                ('A', 'C'),
                ('B', 'D'),
                ('B', 'E'),
                ('C', 'F'),
                ('E', 'G'),
            ]
        );
    }

    #[test]
    fn depth_limit_cuts_levels() {
        let graph = family();
        let one: Vec<_> = bfs_edges(&graph, 'A', Some(1)).unwrap().collect();
        assert_eq!(one, vec![('A', 'B'), ('A', 'C')]);

        let two: Vec<_> = bfs_edges(&graph, 'A', Some(2)).unwrap().collect();
        assert_eq!(two.len(), 5);
        assert!(!two.contains(&('E', 'G')));
    }

    #[test]
    fn zero_depth_limit_yields_nothing() {
        let graph = family();
        assert_eq!(bfs_edges(&graph, 'A', Some(0)).unwrap().count(), 0);
    }

    #[test]
    fn visited_tracks_partial_consumption() {
        let graph = family();
        let mut edges = bfs_edges(&graph, 'A', None).unwrap();
        assert_eq!(edges.visited(), &HashSet::from(['A']));

        assert_eq!(edges.next(), Some(('A', 'B')));
        assert_eq!(edges.next(), Some(('A', 'C')));
        assert_eq!(edges.visited(), &HashSet::from(['A', 'B', 'C']));
        assert_eq!(edges.discovered(), 2);
    }

    #[test]
    fn unknown_start_is_rejected() {
        let graph = family();
        assert_eq!(
            bfs_edges(&graph, 'Z', None).err(),
            Some(TraversalError::UnknownNode('Z'))
        );
    }

    #[test]
    fn undirected_cycle_is_not_revisited() {
        let graph = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
        let edges: Vec<_> = bfs_edges(&graph, 0, None).unwrap().collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn only_reachable_nodes_are_discovered() {
        let graph = family();
        let edges: Vec<_> = bfs_edges(&graph, 'B', None).unwrap().collect();
        assert_eq!(edges, vec![('B', 'D'), ('B', 'E'), ('E', 'G')]);
    }

    #[test]
    fn custom_neighbors_override_the_graph() {
        let graph = family();
        let reversed: HashMap<char, Vec<char>> = graph
            .all_edges()
            .fold(HashMap::new(), |mut acc, (parent, child, _)| {
                acc.entry(child).or_default().push(parent);
                acc
            });
        let edges: Vec<_> = bfs_edges_with(
            &graph,
            'G',
            |node| reversed.get(&node).cloned().unwrap_or_default(),
            None,
        )
        .unwrap()
        .collect();
        assert_eq!(edges, vec![('G', 'E'), ('E', 'B'), ('B', 'A')]);
    }

    #[test]
    fn neighbors_are_requested_lazily() {
        let graph = family();
        let mut calls = Vec::new();
        let mut edges = bfs_edges_with(
            &graph,
            'A',
            |node| {
                calls.push(node);
                graph.neighbors(node).collect::<Vec<_>>()
            },
            None,
        )
        .unwrap();

        assert_eq!(edges.next(), Some(('A', 'B')));
        drop(edges);
        assert_eq!(calls, vec!['A', 'B']);
    }

    #[test]
    fn neighbor_error_ends_the_traversal() {
        let graph = family();
        let mut edges = BfsEdges::new(
            &graph,
            'A',
            Fallibly(|node: char| {
                if node == 'C' {
                    Err(format!("cannot expand {node}"))
                } else {
                    Ok(graph.neighbors(node).collect::<Vec<_>>())
                }
            }),
            None,
        )
        .unwrap()
        .try_edges();

        assert_eq!(edges.next(), Some(Ok(('A', 'B'))));
        assert_eq!(edges.next(), Some(Err("cannot expand C".to_string())));
        assert_eq!(edges.next(), None);
        assert_eq!(edges.into_inner().discovered(), 1);
    }
}
