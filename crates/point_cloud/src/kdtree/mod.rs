//! Balanced k-d tree built in place over the caller's buffer.
//!
//! The tree owns no element copies. Construction reorders the caller's slice
//! so that every leaf is a contiguous range of it, then keeps a shared borrow
//! of the reordered slice for queries. Callers must not rely on the order of
//! the buffer after [`KdTree::build`].
//!
//! # Construction
//!
//! ```text
//! depth d splits on axis d % 3 at the middle element of the range
//!   NthElement: partial selection (select_nth_unstable)
//!   Median:     full sort of the range along the axis
//! stop when depth == max_depth or range.len() <= min_element_count
//! ```
//!
//! # Module Structure
//!
//! - [`node`]: `KdNode` - flat-array interior/leaf node
//! - `search`: k-nearest-neighbour and box range queries

pub mod node;
mod search;

pub use node::KdNode;
pub use search::Neighbour;

use crate::partition::{select_nth_on_axis, sort_on_axis};
use crate::point::{axis_value, PointMap};

/// Pivot placement strategy for each split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Construction {
  /// Partial selection of the middle element. O(n) per level.
  #[default]
  NthElement,
  /// Full sort of the range along the split axis. O(n log n) per level.
  Median,
}

/// Build parameters for [`KdTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct KdTreeParams {
  pub construction: Construction,
  /// Deepest level that may still split. Ignored when `compute_max_depth`.
  pub max_depth: usize,
  /// Ranges with at most this many elements become leaves (clamped to >= 1).
  pub min_element_count: usize,
  /// Derive the depth from the element count: ceil(log2(n / min_element_count)).
  pub compute_max_depth: bool,
}

impl Default for KdTreeParams {
  fn default() -> Self {
    Self {
      construction: Construction::NthElement,
      max_depth: 12,
      min_element_count: 8,
      compute_max_depth: false,
    }
  }
}

impl KdTreeParams {
  /// Leaf bucket size actually used.
  #[inline]
  pub fn bucket_size(&self) -> usize {
    self.min_element_count.max(1)
  }

  /// Depth limit for a tree over `count` elements.
  pub fn depth_limit(&self, count: usize) -> usize {
    if !self.compute_max_depth {
      return self.max_depth;
    }
    let leaves = count.div_ceil(self.bucket_size()).max(1);
    leaves.next_power_of_two().trailing_zeros() as usize
  }

  /// Whether a range of `count` elements at `depth` splits further.
  #[inline]
  pub fn should_split(&self, count: usize, depth: usize, depth_limit: usize) -> bool {
    depth < depth_limit && count > self.bucket_size()
  }
}

/// K-d tree over a borrowed, reordered element buffer.
pub struct KdTree<'a, E, M> {
  elements: &'a [E],
  nodes: Vec<KdNode>,
  map: M,
  depth: usize,
}

impl<'a, E, M: PointMap<E>> KdTree<'a, E, M> {
  /// Build the tree, reordering `elements` in place.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "kdtree::build"))]
  pub fn build(elements: &'a mut [E], map: M, params: &KdTreeParams) -> Self {
    let depth_limit = params.depth_limit(elements.len());
    let mut builder = Builder {
      nodes: Vec::new(),
      params,
      map: &map,
      depth_limit,
      deepest: 0,
    };
    builder.build_node(elements, 0, 0);

    let Builder { nodes, deepest, .. } = builder;
    let elements: &'a [E] = elements;

    Self {
      elements,
      nodes,
      map,
      depth: deepest,
    }
  }

  /// Number of elements indexed.
  #[inline]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// Deepest level reached during construction (0 = root only).
  #[inline]
  pub fn depth(&self) -> usize {
    self.depth
  }

  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Flat node array; index 0 is the root.
  #[inline]
  pub fn nodes(&self) -> &[KdNode] {
    &self.nodes
  }

  /// The reordered backing buffer.
  #[inline]
  pub fn elements(&self) -> &'a [E] {
    self.elements
  }

  #[inline]
  pub fn point_map(&self) -> &M {
    &self.map
  }

  /// Iterate over elements in buffer (leaf) order.
  pub fn iter(&self) -> std::slice::Iter<'a, E> {
    self.elements.iter()
  }
}

/// Recursive construction state.
struct Builder<'p, 'm, M> {
  nodes: Vec<KdNode>,
  params: &'p KdTreeParams,
  map: &'m M,
  depth_limit: usize,
  deepest: usize,
}

impl<M> Builder<'_, '_, M> {
  /// Build the subtree over `slice`, whose first element sits at `offset`
  /// in the full buffer. Returns the node index.
  fn build_node<E>(&mut self, slice: &mut [E], offset: usize, depth: usize) -> usize
  where
    M: PointMap<E>,
  {
    self.deepest = self.deepest.max(depth);
    let index = self.nodes.len();
    let count = slice.len();

    if !self.params.should_split(count, depth, self.depth_limit) {
      self.nodes.push(KdNode::Leaf {
        start: offset,
        end: offset + count,
      });
      return index;
    }

    let axis = depth % 3;
    let mid = count / 2;
    match self.params.construction {
      Construction::NthElement => select_nth_on_axis(slice, mid, axis, self.map),
      Construction::Median => sort_on_axis(slice, axis, self.map),
    }
    let split = axis_value(self.map.point(&slice[mid]), axis);

    // Reserve the slot so the root stays at index 0
    self.nodes.push(KdNode::Leaf { start: 0, end: 0 });

    let (lower, upper) = slice.split_at_mut(mid);
    let left = self.build_node(lower, offset, depth + 1);
    let right = self.build_node(upper, offset + mid, depth + 1);

    self.nodes[index] = KdNode::Internal {
      axis,
      split,
      left,
      right,
    };
    index
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
