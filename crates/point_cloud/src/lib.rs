//! point_cloud - spatial indices and simplification for point clouds
//!
//! This crate provides the spatial partitioning structures used to query
//! unorganized point clouds, plus the PCA-driven clustering that downsamples
//! them. Every structure is generic over a caller element type and a
//! [`PointMap`] projecting that element to 3D coordinates.
//!
//! # Features
//!
//! - **K-d tree**: balanced, built in place over the caller's buffer, with
//!   exact k-nearest-neighbour and box range queries
//! - **Linked octree**: incremental inserts with lazy subdivision, post-order
//!   traversal through an explicit frame stack
//! - **Flat octree**: bulk-built fixed-depth cells addressed by packed octant
//!   codes, O(depth) lookups
//! - **Covariance / PCA**: centroid, scatter matrix and ascending
//!   eigendecomposition
//! - **Hierarchy simplification**: FIFO recursive PCA splitting that keeps one
//!   representative element per cluster
//! - **Normals, graphs, OBJ**: k-NN PCA normals, k-NN graph with minimum
//!   spanning forest, plain-text point/normal files
//!
//! # Example
//!
//! ```ignore
//! use point_cloud::{IdentityMap, KdTree, KdTreeParams};
//! use glam::DVec3;
//!
//! let mut points = vec![DVec3::ZERO, DVec3::ONE, DVec3::splat(2.0)];
//! let tree = KdTree::build(&mut points, IdentityMap, &KdTreeParams::default());
//!
//! let nearest = tree.nearest_neighbours(DVec3::splat(0.9), 2);
//! assert_eq!(nearest.len(), 2);
//! ```

pub mod bounds;
pub mod covariance;
pub mod error;
pub mod partition;
pub mod point;

// Re-export commonly used items
pub use bounds::Aabb3;
pub use covariance::{
  covariance, covariance_par, eigen_sorted, pca, sort_eigen, Covariance, Pca, SortedEigen,
};
pub use error::{ObjError, OctreeError};
pub use point::{points_equal, IdentityMap, Point, PointMap, EPSILON};

// K-d tree with in-place construction
pub mod kdtree;
pub use kdtree::{Construction, KdTree, KdTreeParams, Neighbour};

// Linked and flat octrees
pub mod octree;
pub use octree::{FlatOctree, FlatOctreeParams, LinkedOctree, LinkedOctreeParams, PostOrderIter};

// Algorithms consuming the indices
pub mod algorithm;
pub use algorithm::normals::estimate_normals;
pub use algorithm::simplification::{hierarchy_simplification, simplify_into, SimplificationParams};

// k-NN graph and spanning tree built on the k-d tree
pub mod graph;
pub use graph::{knn_graph, minimum_spanning_tree, Edge, KnnGraph};

// Plain-text point/normal import and export
pub mod io;
pub use io::ObjCloud;
