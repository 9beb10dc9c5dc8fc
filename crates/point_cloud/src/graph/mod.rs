//! Neighbourhood graphs over a k-d tree's element buffer.
//!
//! Vertices are positions in [`KdTree::elements`], so a graph stays valid for
//! as long as the tree (and its reordered buffer) does.
//!
//! # Module Structure
//!
//! - [`knn`]: `knn_graph` - undirected k-nearest-neighbour adjacency
//! - [`mst`]: `minimum_spanning_tree` - Kruskal over a `KnnGraph`

pub mod knn;
pub mod mst;

pub use knn::{knn_graph, Edge, KnnGraph};
pub use mst::minimum_spanning_tree;
