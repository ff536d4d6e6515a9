//! Lazy graph traversals and hierarchical tree layout
//!
//! This crate provides breadth-first and depth-first edge sequencers and a
//! hierarchical layout for trees. It works with any graph data structure
//! through petgraph's visitor traits.
//!
//! # Traversals
//!
//! - [`bfs_edges`]: edges in breadth-first discovery order, level by level
//! - [`dfs_edges`]: edges in depth-first discovery order, optionally over
//!   every connected component
//!
//! Both return cursors that own their visited set and frontier: edges are
//! produced one pull at a time, and a consumer may stop at any point. The
//! neighbor enumeration is pluggable through [`NeighborFn`].
//!
//! # Layout
//!
//! - [`HierarchicalLayout`]: recursive space partition of a tree, each level
//!   one gap below its parent
//!
//! # Example
//!
//! ```
//! use graph_walk::{bfs_edges, dfs_edges, hierarchical_positions};
//! use petgraph::graphmap::DiGraphMap;
//!
//! let mut graph = DiGraphMap::new();
//! graph.add_edge("A", "B", ());
//! graph.add_edge("A", "C", ());
//! graph.add_edge("B", "D", ());
//!
//! let bfs: Vec<_> = bfs_edges(&graph, "A", None).unwrap().collect();
//! assert_eq!(bfs, [("A", "B"), ("A", "C"), ("B", "D")]);
//!
//! let dfs: Vec<_> = dfs_edges(&graph, Some("A"), None).unwrap().collect();
//! assert_eq!(dfs, [("A", "B"), ("B", "D"), ("A", "C")]);
//!
//! let positions = hierarchical_positions(&graph, None).unwrap();
//! assert_eq!(positions["B"].x, 0.25);
//! ```

mod cursor;
mod engine;
mod error;
mod geometry;
mod neighbors;

pub mod bfs;
pub mod dfs;
pub mod hierarchy;
pub mod tree;

// Re-export core types and traits
pub use cursor::{checked_depth_limit, Edge, EdgeCursor, TryEdges};
pub use engine::LayoutEngine;
pub use error::{LayoutError, TraversalError};
pub use geometry::Point;
pub use neighbors::{Fallibly, GraphNeighbors, Infallibly, NeighborFn, Ordered};

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};

// Re-export algorithms
pub use bfs::{bfs_edges, bfs_edges_with, BfsEdges};
pub use dfs::{dfs_edges, dfs_edges_ordered, DfsEdges};
pub use hierarchy::{hierarchical_positions, HierarchicalLayout};
pub use tree::{is_tree, topological_root, RootSelection, TreeGraph};
