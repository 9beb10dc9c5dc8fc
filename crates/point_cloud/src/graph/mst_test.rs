use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::graph::knn_graph;
use crate::kdtree::{KdTree, KdTreeParams};
use crate::point::IdentityMap;

fn total(edges: &[Edge]) -> f64 {
  edges.iter().map(|e| e.weight).sum()
}

/// Prim's algorithm over the complete Euclidean graph.
fn prim_weight(points: &[DVec3]) -> f64 {
  let n = points.len();
  let mut in_tree = vec![false; n];
  let mut best = vec![f64::INFINITY; n];
  best[0] = 0.0;
  let mut sum = 0.0;
  for _ in 0..n {
    let u = (0..n)
      .filter(|&v| !in_tree[v])
      .min_by(|&a, &b| best[a].total_cmp(&best[b]))
      .unwrap();
    in_tree[u] = true;
    sum += best[u];
    for v in 0..n {
      if !in_tree[v] {
        best[v] = best[v].min(points[u].distance(points[v]));
      }
    }
  }
  sum
}

#[test]
fn test_empty_graph() {
  assert!(minimum_spanning_tree(&KnnGraph::default()).is_empty());
  assert!(minimum_spanning_tree(&KnnGraph::from_edges(1, [])).is_empty());
}

/// Unit square with both diagonals: three unit sides win.
#[test]
fn test_square_with_diagonals() {
  let d = 2f64.sqrt();
  let graph = KnnGraph::from_edges(
    4,
    [
      Edge::new(0, 1, 1.0),
      Edge::new(1, 2, 1.0),
      Edge::new(2, 3, 1.0),
      Edge::new(3, 0, 1.0),
      Edge::new(0, 2, d),
      Edge::new(1, 3, d),
    ],
  );
  let tree = minimum_spanning_tree(&graph);

  assert_eq!(tree.len(), 3);
  assert_eq!(total(&tree), 3.0);
  assert!(tree.windows(2).all(|w| w[0].weight <= w[1].weight));
}

#[test]
fn test_forest_per_component() {
  let graph = KnnGraph::from_edges(
    6,
    [
      Edge::new(0, 1, 2.0),
      Edge::new(1, 2, 1.0),
      Edge::new(0, 2, 5.0),
      Edge::new(3, 4, 1.0),
    ],
  );
  let forest = minimum_spanning_tree(&graph);

  // {0,1,2}, {3,4}, {5}
  assert_eq!(forest.len(), 6 - 3);
  assert_eq!(total(&forest), 4.0);
}

/// On a complete k-NN graph the forest matches Prim's weight.
#[test]
fn test_matches_prim_on_complete_graph() {
  let mut rng = StdRng::seed_from_u64(12);
  let original: Vec<DVec3> = (0..60)
    .map(|_| DVec3::new(rng.random(), rng.random(), rng.random()))
    .collect();

  let mut points = original.clone();
  let tree = KdTree::build(&mut points, IdentityMap, &KdTreeParams::default());
  let graph = knn_graph(&tree, original.len() - 1);
  assert_eq!(graph.edge_count(), 60 * 59 / 2);

  let mst = minimum_spanning_tree(&graph);
  assert_eq!(mst.len(), 59);
  assert!((total(&mst) - prim_weight(&original)).abs() < 1e-9);
}
