//! Minimum spanning forest by Kruskal's algorithm.

use ordered_float::OrderedFloat;

use super::knn::{Edge, KnnGraph};

/// Disjoint sets with path halving and union by rank.
struct UnionFind {
  parent: Vec<usize>,
  rank: Vec<u8>,
}

impl UnionFind {
  fn new(count: usize) -> Self {
    Self {
      parent: (0..count).collect(),
      rank: vec![0; count],
    }
  }

  fn find(&mut self, mut x: usize) -> usize {
    while self.parent[x] != x {
      self.parent[x] = self.parent[self.parent[x]];
      x = self.parent[x];
    }
    x
  }

  /// Merge the sets of `a` and `b`. False if already merged.
  fn union(&mut self, a: usize, b: usize) -> bool {
    let (ra, rb) = (self.find(a), self.find(b));
    if ra == rb {
      return false;
    }
    match self.rank[ra].cmp(&self.rank[rb]) {
      std::cmp::Ordering::Less => self.parent[ra] = rb,
      std::cmp::Ordering::Greater => self.parent[rb] = ra,
      std::cmp::Ordering::Equal => {
        self.parent[rb] = ra;
        self.rank[ra] += 1;
      }
    }
    true
  }
}

/// Edges of a minimum spanning forest of `graph`, ascending by weight.
///
/// One tree per connected component: the result has
/// `vertex_count - components` edges. Equal weights break on `(a, b)`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "minimum_spanning_tree"))]
pub fn minimum_spanning_tree(graph: &KnnGraph) -> Vec<Edge> {
  let mut edges = graph.edges().to_vec();
  edges.sort_by_key(|e| (OrderedFloat(e.weight), e.a, e.b));

  let mut sets = UnionFind::new(graph.vertex_count());
  let mut forest = Vec::with_capacity(graph.vertex_count().saturating_sub(1));
  for edge in edges {
    if sets.union(edge.a, edge.b) {
      forest.push(edge);
      if forest.len() + 1 == graph.vertex_count() {
        break;
      }
    }
  }
  forest
}

#[cfg(test)]
#[path = "mst_test.rs"]
mod mst_test;
