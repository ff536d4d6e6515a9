use petgraph::algo::toposort;
use petgraph::unionfind::UnionFind;
use petgraph::visit::{
    EdgeRef, GraphProp, IntoEdgeReferences, IntoNeighborsDirected, IntoNodeIdentifiers,
    NodeCount, NodeIndexable, Visitable,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Graph capabilities needed to check tree-ness and lay out a tree
pub trait TreeGraph:
    IntoNeighborsDirected
    + IntoNodeIdentifiers
    + IntoEdgeReferences
    + NodeIndexable
    + NodeCount
    + GraphProp
    + Visitable
{
}

impl<G> TreeGraph for G where
    G: IntoNeighborsDirected
        + IntoNodeIdentifiers
        + IntoEdgeReferences
        + NodeIndexable
        + NodeCount
        + GraphProp
        + Visitable
{
}

/// Check whether the graph is a tree
///
/// A tree is non-empty, has exactly one edge less than it has nodes and no
/// cycle once edge directions are ignored. A directed graph must in addition
/// give every node at most one parent, so that all nodes hang off one root.
pub fn is_tree<G>(graph: G) -> bool
where
    G: IntoEdgeReferences + NodeIndexable + NodeCount + GraphProp,
{
    let node_count = graph.node_count();
    if node_count == 0 {
        return false;
    }

    let directed = graph.is_directed();
    let mut components = UnionFind::new(graph.node_bound());
    let mut has_parent = vec![false; graph.node_bound()];
    let mut edge_count = 0;

    for edge in graph.edge_references() {
        edge_count += 1;
        let source = graph.to_index(edge.source());
        let target = graph.to_index(edge.target());

        // Joining two nodes already connected closes a cycle
        if edge_count >= node_count || !components.union(source, target) {
            return false;
        }

        if directed {
            if has_parent[target] {
                return false;
            }
            has_parent[target] = true;
        }
    }

    edge_count == node_count - 1
}

/// First node of a topological order, `None` for an empty or cyclic graph
pub fn topological_root<G>(graph: G) -> Option<G::NodeId>
where
    G: IntoNeighborsDirected + IntoNodeIdentifiers + Visitable,
{
    toposort(graph, None).ok()?.first().copied()
}

/// How the layout picks a root when none is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootSelection {
    /// Topological root for directed trees, first node otherwise
    #[default]
    Auto,

    /// First node in identifier order
    First,

    /// Uniformly random node drawn from a seeded generator
    Seeded(u64),

    /// Uniformly random node drawn from the thread-local generator
    Random,
}

impl RootSelection {
    /// Pick a root node, `None` when the graph has no node
    pub fn select<G>(self, graph: G) -> Option<G::NodeId>
    where
        G: IntoNeighborsDirected + IntoNodeIdentifiers + Visitable + GraphProp,
    {
        match self {
            Self::Auto if graph.is_directed() => topological_root(graph),
            Self::Auto | Self::First => graph.node_identifiers().next(),
            Self::Seeded(seed) => {
                let nodes: Vec<_> = graph.node_identifiers().collect();
                nodes.choose(&mut StdRng::seed_from_u64(seed)).copied()
            }
            Self::Random => {
                let nodes: Vec<_> = graph.node_identifiers().collect();
                nodes.choose(&mut rand::thread_rng()).copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graphmap::{DiGraphMap, UnGraphMap};
    use petgraph::Graph;
    use test_log::test;

    #[test]
    fn paths_and_stars_are_trees() {
        let path = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (2, 3)]);
        assert!(is_tree(&path));

        let star = DiGraphMap::<u32, ()>::from_edges([(0, 1), (0, 2), (0, 3)]);
        assert!(is_tree(&star));

        let mut single = UnGraphMap::<u32, ()>::new();
        single.add_node(7);
        assert!(is_tree(&single));
    }

    #[test]
    fn cycles_forests_and_empty_graphs_are_not_trees() {
        let cycle = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        assert!(!is_tree(&cycle));

        let mut forest = UnGraphMap::<u32, ()>::from_edges([(0, 1)]);
        forest.add_node(2);
        assert!(!is_tree(&forest));

        let self_loop = DiGraphMap::<u32, ()>::from_edges([(0, 0)]);
        assert!(!is_tree(&self_loop));

        assert!(!is_tree(&UnGraphMap::<u32, ()>::new()));
    }

    #[test]
    fn directed_tree_needs_a_single_parent_per_node() {
        let two_parents = DiGraphMap::<u32, ()>::from_edges([(0, 2), (1, 2)]);
        assert!(!is_tree(&two_parents));
    }

    #[test]
    fn works_with_index_graphs() {
        let mut graph = Graph::<&str, ()>::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.extend_with_edges([(a, b), (a, c)]);
        assert!(is_tree(&graph));

        graph.add_edge(c, a, ());
        assert!(!is_tree(&graph));
    }

    #[test]
    fn directed_root_is_topological() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(3, 4), (1, 3), (1, 2)]);
        assert_eq!(RootSelection::Auto.select(&graph), Some(1));
        assert_eq!(RootSelection::First.select(&graph), Some(3));
    }

    #[test]
    fn random_selection_picks_a_graph_node() {
        let graph = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (1, 3), (3, 4)]);
        for _ in 0..20 {
            let root = RootSelection::Random.select(&graph).unwrap();
            assert!(graph.contains_node(root));
        }
        assert_eq!(RootSelection::Random.select(&UnGraphMap::<u32, ()>::new()), None);
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let graph = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 4)]);
        let first = RootSelection::Seeded(42).select(&graph);
        assert!(first.is_some());
        assert_eq!(RootSelection::Seeded(42).select(&graph), first);
        assert_eq!(RootSelection::Auto.select(&graph), Some(0));
    }
}
