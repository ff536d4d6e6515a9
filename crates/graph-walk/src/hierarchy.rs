use crate::tree::{is_tree, RootSelection, TreeGraph};
use crate::{LayoutEngine, LayoutError, Point};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Configuration for the hierarchical tree layout
///
/// The root sits at `(start_x, start_y)`. Each node splits its horizontal band
/// into equal slots, one per child, and centers each child in its slot one
/// `level_gap` below itself. Sibling subtrees therefore never overlap.
#[derive(Debug, Clone)]
pub struct HierarchicalLayout {
    /// Width of the band shared by the root's subtrees
    pub total_width: f64,

    /// Vertical distance between a node and its children
    pub level_gap: f64,

    /// Horizontal coordinate of the root
    pub start_x: f64,

    /// Vertical coordinate of the root
    pub start_y: f64,

    /// Root choice when none is passed explicitly
    pub root_selection: RootSelection,
}

impl Default for HierarchicalLayout {
    fn default() -> Self {
        Self {
            total_width: 1.0,
            level_gap: 0.2,
            start_x: 0.5,
            start_y: 0.0,
            root_selection: RootSelection::default(),
        }
    }
}

/// Horizontal band assigned to a node awaiting placement
struct Band<N> {
    node: N,
    parent: Option<N>,
    center: f64,
    y: f64,
    width: f64,
}

impl HierarchicalLayout {
    /// Create a new hierarchical layout with the given width and level gap
    pub fn new(total_width: f64, level_gap: f64) -> Self {
        Self {
            total_width,
            level_gap,
            ..Default::default()
        }
    }

    /// Place the root at `(x, y)`
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    /// Choose how the root is picked when none is given
    pub fn with_root_selection(mut self, root_selection: RootSelection) -> Self {
        self.root_selection = root_selection;
        self
    }

    /// Compute positions for every node reachable from `root`
    ///
    /// Without a root, one is picked according to `root_selection`.
    ///
    /// # Errors
    /// Returns [`LayoutError::NotATree`] if the graph is not a tree, before any
    /// position is computed, and [`LayoutError::UnknownNode`] if `root` is not
    /// in the graph
    pub fn compute_positions<G>(
        &self,
        tree: G,
        root: Option<G::NodeId>,
    ) -> Result<HashMap<G::NodeId, Point>, LayoutError<G::NodeId>>
    where
        G: TreeGraph,
        G::NodeId: Eq + Hash + fmt::Debug,
    {
        if !is_tree(tree) {
            return Err(LayoutError::NotATree);
        }

        let root = match root {
            Some(root) if tree.node_identifiers().any(|node| node == root) => root,
            Some(root) => return Err(LayoutError::UnknownNode(root)),
            None => self
                .root_selection
                .select(tree)
                .ok_or(LayoutError::NotATree)?,
        };
        debug!(?root, selection = ?self.root_selection, "hierarchical layout root");

        let directed = tree.is_directed();
        let mut positions = HashMap::with_capacity(tree.node_count());
        let mut pending = vec![Band {
            node: root,
            parent: None,
            center: self.start_x,
            y: self.start_y,
            width: self.total_width,
        }];

        while let Some(band) = pending.pop() {
            positions.insert(band.node, Point::new(band.center, band.y));

            // Undirected edges lead back up to the parent
            let children: Vec<_> = tree
                .neighbors(band.node)
                .filter(|&child| directed || Some(child) != band.parent)
                .collect();
            if children.is_empty() {
                continue;
            }

            let child_width = band.width / children.len() as f64;
            let mut center = band.center - band.width / 2.0 - child_width / 2.0;
            let bands: Vec<_> = children
                .into_iter()
                .map(|child| {
                    center += child_width;
                    Band {
                        node: child,
                        parent: Some(band.node),
                        center,
                        y: band.y - self.level_gap,
                        width: child_width,
                    }
                })
                .collect();

            // Leftmost child on top so subtrees are placed left to right
            pending.extend(bands.into_iter().rev());
        }

        Ok(positions)
    }
}

impl<G> LayoutEngine<G> for HierarchicalLayout
where
    G: TreeGraph,
    G::NodeId: Eq + Hash + fmt::Debug,
{
    type NodeId = G::NodeId;
    type Error = LayoutError<G::NodeId>;

    fn layout(&self, graph: G) -> Result<HashMap<Self::NodeId, Point>, Self::Error> {
        self.compute_positions(graph, None)
    }
}

/// Lay out a tree with the default width (1.0), level gap (0.2) and origin (0.5, 0.0)
///
/// # Errors
/// See [`HierarchicalLayout::compute_positions`]
pub fn hierarchical_positions<G>(
    tree: G,
    root: Option<G::NodeId>,
) -> Result<HashMap<G::NodeId, Point>, LayoutError<G::NodeId>>
where
    G: TreeGraph,
    G::NodeId: Eq + Hash + fmt::Debug,
{
    HierarchicalLayout::default().compute_positions(tree, root)
}
