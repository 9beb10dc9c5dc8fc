//! Branch-and-bound queries over the k-d tree.

use std::collections::BinaryHeap;

use glam::DVec3;
use ordered_float::OrderedFloat;

use super::{KdNode, KdTree};
use crate::bounds::Aabb3;
use crate::point::{axis_value, points_equal, PointMap};

const ROOT: usize = 0;

/// A k-NN result: the element, its position in the reordered buffer and its
/// squared distance to the query.
#[derive(Debug)]
pub struct Neighbour<'a, E> {
  pub element: &'a E,
  pub index: usize,
  pub distance_squared: f64,
}

impl<E> Clone for Neighbour<'_, E> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<E> Copy for Neighbour<'_, E> {}

/// Max-heap entry; ties on distance break on buffer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
  distance_squared: OrderedFloat<f64>,
  index: usize,
}

impl<'a, E, M: PointMap<E>> KdTree<'a, E, M> {
  /// Up to `k` elements nearest to `query`, ascending by distance.
  ///
  /// Elements coordinate-equal to the query are never returned, so querying
  /// with a point of the cloud yields its neighbours and not itself.
  pub fn nearest_neighbours(&self, query: DVec3, k: usize) -> Vec<&'a E> {
    let elements = self.elements;
    self
      .knn_candidates(query, k)
      .into_iter()
      .map(|c| &elements[c.index])
      .collect()
  }

  /// Same as [`nearest_neighbours`](Self::nearest_neighbours), as buffer
  /// positions.
  pub fn nearest_neighbour_indices(&self, query: DVec3, k: usize) -> Vec<usize> {
    self
      .knn_candidates(query, k)
      .into_iter()
      .map(|c| c.index)
      .collect()
  }

  /// Same as [`nearest_neighbours`](Self::nearest_neighbours), with
  /// positions and squared distances.
  pub fn nearest_neighbours_with_distance(&self, query: DVec3, k: usize) -> Vec<Neighbour<'a, E>> {
    let elements = self.elements;
    self
      .knn_candidates(query, k)
      .into_iter()
      .map(|c| Neighbour {
        element: &elements[c.index],
        index: c.index,
        distance_squared: c.distance_squared.into_inner(),
      })
      .collect()
  }

  /// All elements inside `range` (inclusive bounds), in buffer order.
  pub fn range_search(&self, range: &Aabb3) -> Vec<&'a E> {
    let mut found = Vec::new();
    if !self.is_empty() {
      self.range_recursive(ROOT, range, &mut found);
    }
    let elements = self.elements;
    found.into_iter().map(|i| &elements[i]).collect()
  }

  fn knn_candidates(&self, query: DVec3, k: usize) -> Vec<Candidate> {
    if k == 0 || self.is_empty() {
      return Vec::new();
    }
    let mut heap = BinaryHeap::with_capacity(k + 1);
    self.knn_recursive(ROOT, query, k, &mut heap);
    heap.into_sorted_vec()
  }

  fn knn_recursive(&self, node: usize, query: DVec3, k: usize, heap: &mut BinaryHeap<Candidate>) {
    match self.nodes[node] {
      KdNode::Leaf { start, end } => {
        for index in start..end {
          let p = self.map.point(&self.elements[index]);
          if points_equal(p, query) {
            continue;
          }
          let candidate = Candidate {
            distance_squared: OrderedFloat(p.distance_squared(query)),
            index,
          };
          if heap.len() < k {
            heap.push(candidate);
          } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
          }
        }
      }
      KdNode::Internal {
        axis,
        split,
        left,
        right,
      } => {
        let diff = axis_value(query, axis) - split;
        let (near, far) = if diff < 0.0 { (left, right) } else { (right, left) };

        self.knn_recursive(near, query, k, heap);

        // The far side is at least |diff| away on this axis
        let prune = heap.len() == k
          && heap
            .peek()
            .is_some_and(|worst| diff * diff > worst.distance_squared.into_inner());
        if !prune {
          self.knn_recursive(far, query, k, heap);
        }
      }
    }
  }

  fn range_recursive(&self, node: usize, range: &Aabb3, found: &mut Vec<usize>) {
    match self.nodes[node] {
      KdNode::Leaf { start, end } => {
        found.extend(
          (start..end).filter(|&i| range.contains_point(self.map.point(&self.elements[i]))),
        );
      }
      KdNode::Internal {
        axis,
        split,
        left,
        right,
      } => {
        if axis_value(range.min, axis) <= split {
          self.range_recursive(left, range, found);
        }
        if axis_value(range.max, axis) >= split {
          self.range_recursive(right, range, found);
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
