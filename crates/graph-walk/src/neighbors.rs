use petgraph::visit::IntoNeighbors;
use std::convert::Infallible;

/// Strategy providing the neighbor sequence of a node during a traversal
///
/// The sequencers call this once per discovered node and keep the returned
/// iterator as that node's pending neighbors. Implementations:
/// - [`GraphNeighbors`]: the graph's own adjacency (the default)
/// - [`Infallibly`]: a user closure returning any iterable of nodes
/// - [`Fallibly`]: a user closure that may fail; the error reaches the
///   consumer at the pull that needed the neighbors
/// - [`Ordered`]: the graph's adjacency passed through a reordering closure
pub trait NeighborFn<N> {
    /// Iterator over the neighbors of one node
    type Iter: Iterator<Item = N>;

    /// Error raised when the neighbors cannot be produced
    type Error;

    /// Get the neighbors of a node
    fn neighbors(&mut self, node: N) -> Result<Self::Iter, Self::Error>;
}

/// Neighbors as enumerated by the graph
#[derive(Debug, Clone, Copy)]
pub struct GraphNeighbors<G>(pub G);

impl<G> NeighborFn<G::NodeId> for GraphNeighbors<G>
where
    G: IntoNeighbors,
{
    type Iter = G::Neighbors;
    type Error = Infallible;

    fn neighbors(&mut self, node: G::NodeId) -> Result<Self::Iter, Self::Error> {
        Ok(self.0.neighbors(node))
    }
}

/// Neighbors produced by a closure that cannot fail
#[derive(Debug, Clone, Copy)]
pub struct Infallibly<F>(pub F);

impl<N, F, I> NeighborFn<N> for Infallibly<F>
where
    F: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
{
    type Iter = I::IntoIter;
    type Error = Infallible;

    fn neighbors(&mut self, node: N) -> Result<Self::Iter, Self::Error> {
        Ok((self.0)(node).into_iter())
    }
}

/// Neighbors produced by a closure that may fail
#[derive(Debug, Clone, Copy)]
pub struct Fallibly<F>(pub F);

impl<N, F, I, E> NeighborFn<N> for Fallibly<F>
where
    F: FnMut(N) -> Result<I, E>,
    I: IntoIterator<Item = N>,
{
    type Iter = I::IntoIter;
    type Error = E;

    fn neighbors(&mut self, node: N) -> Result<Self::Iter, Self::Error> {
        (self.0)(node).map(IntoIterator::into_iter)
    }
}

/// Graph neighbors reordered by a closure before exploration
///
/// The closure receives the raw neighbor iterator of a node and returns the
/// neighbors in the order they should be explored.
#[derive(Debug, Clone, Copy)]
pub struct Ordered<G, F> {
    graph: G,
    order: F,
}

impl<G, F> Ordered<G, F> {
    /// Explore the neighbors of `graph` in the order returned by `order`
    pub fn new<I>(graph: G, order: F) -> Self
    where
        G: IntoNeighbors,
        F: FnMut(G::Neighbors) -> I,
        I: IntoIterator<Item = G::NodeId>,
    {
        Self { graph, order }
    }
}

impl<G, F, I> NeighborFn<G::NodeId> for Ordered<G, F>
where
    G: IntoNeighbors,
    F: FnMut(G::Neighbors) -> I,
    I: IntoIterator<Item = G::NodeId>,
{
    type Iter = I::IntoIter;
    type Error = Infallible;

    fn neighbors(&mut self, node: G::NodeId) -> Result<Self::Iter, Self::Error> {
        Ok((self.order)(self.graph.neighbors(node)).into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graphmap::DiGraphMap;
    use test_log::test;

    fn graph() -> DiGraphMap<u32, ()> {
        DiGraphMap::from_edges([(1, 2), (1, 3), (1, 4)])
    }

    #[test]
    fn graph_neighbors_follow_insertion_order() {
        let graph = graph();
        let mut source = GraphNeighbors(&graph);
        let neighbors: Vec<_> = source.neighbors(1).unwrap().collect();
        assert_eq!(neighbors, vec![2, 3, 4]);
    }

    #[test]
    fn ordered_applies_the_closure() {
        let graph = graph();
        let mut source = Ordered::new(&graph, |neighbors| {
            let mut neighbors: Vec<_> = neighbors.collect();
            neighbors.reverse();
            neighbors
        });
        let neighbors: Vec<_> = source.neighbors(1).unwrap().collect();
        assert_eq!(neighbors, vec![4, 3, 2]);
    }

    #[test]
    fn fallibly_forwards_errors() {
        let mut source = Fallibly(|node: u32| {
            if node == 0 {
                Err("no neighbors for 0")
            } else {
                Ok(vec![node - 1])
            }
        });
        assert_eq!(source.neighbors(0).err(), Some("no neighbors for 0"));
        assert_eq!(
            source.neighbors(3).map(|it| it.collect::<Vec<_>>()),
            Ok(vec![2])
        );
    }
}
