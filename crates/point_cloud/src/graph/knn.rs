//! KnnGraph - undirected weighted adjacency built from k-NN queries.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::kdtree::KdTree;
use crate::point::PointMap;

/// Undirected edge with `a < b`, weighted by Euclidean distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
  pub a: usize,
  pub b: usize,
  pub weight: f64,
}

impl Edge {
  /// Edge between `u` and `v` in canonical (`a < b`) order.
  pub fn new(u: usize, v: usize, weight: f64) -> Self {
    let (a, b) = if u < v { (u, v) } else { (v, u) };
    Self { a, b, weight }
  }
}

/// Undirected graph with adjacency lists and a deduplicated edge list.
#[derive(Clone, Debug, Default)]
pub struct KnnGraph {
  adjacency: Vec<Vec<(usize, f64)>>,
  edges: Vec<Edge>,
}

impl KnnGraph {
  /// Graph over `vertex_count` vertices. Self-loops are dropped and
  /// repeated vertex pairs keep their first weight.
  pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = Edge>) -> Self {
    let mut seen = HashSet::new();
    let mut graph = Self {
      adjacency: vec![Vec::new(); vertex_count],
      edges: Vec::new(),
    };
    for edge in edges {
      let edge = Edge::new(edge.a, edge.b, edge.weight);
      if edge.a == edge.b || !seen.insert((edge.a, edge.b)) {
        continue;
      }
      graph.adjacency[edge.a].push((edge.b, edge.weight));
      graph.adjacency[edge.b].push((edge.a, edge.weight));
      graph.edges.push(edge);
    }
    graph
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.adjacency.len()
  }

  #[inline]
  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  #[inline]
  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// Adjacent vertices of `vertex` with edge weights.
  #[inline]
  pub fn neighbours(&self, vertex: usize) -> &[(usize, f64)] {
    &self.adjacency[vertex]
  }

  #[inline]
  pub fn degree(&self, vertex: usize) -> usize {
    self.adjacency[vertex].len()
  }
}

/// Connect every element of `tree` to its `k` nearest neighbours.
///
/// Edges are symmetric: `u` in the k-NN of `v` or `v` in the k-NN of `u`
/// yields one edge. Coordinate-equal elements are never connected.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "knn_graph"))]
pub fn knn_graph<E: Sync, M: PointMap<E>>(tree: &KdTree<'_, E, M>, k: usize) -> KnnGraph {
  let elements = tree.elements();
  let map = tree.point_map();

  let directed: Vec<Vec<Edge>> = (0..elements.len())
    .into_par_iter()
    .map(|u| {
      tree
        .nearest_neighbours_with_distance(map.point(&elements[u]), k)
        .into_iter()
        .map(|n| Edge::new(u, n.index, n.distance_squared.sqrt()))
        .collect()
    })
    .collect();

  KnnGraph::from_edges(elements.len(), directed.into_iter().flatten())
}
