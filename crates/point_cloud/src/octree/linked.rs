//! LinkedOctree - incremental octree stored as an arena of nodes.
//!
//! Children are created lazily, only for octants that receive an element. A
//! node is either a leaf holding a bucket of elements or an internal node
//! with at least one child and an empty bucket.

use glam::DVec3;
use smallvec::SmallVec;

use super::config::LinkedOctreeParams;
use super::iter::PostOrderIter;
use crate::bounds::Aabb3;
use crate::error::OctreeError;
use crate::point::{points_equal, PointMap};

pub(super) const ROOT: usize = 0;

/// Bucket entry: the element with its projected point cached at insert.
pub(super) type Entry<E> = (DVec3, E);

pub(super) struct Node<E> {
  pub(super) bounds: Aabb3,
  pub(super) depth: u8,
  pub(super) children: [Option<usize>; 8],
  pub(super) elements: SmallVec<[Entry<E>; 8]>,
}

impl<E> Node<E> {
  fn new(bounds: Aabb3, depth: u8) -> Self {
    Self {
      bounds,
      depth,
      children: [None; 8],
      elements: SmallVec::new(),
    }
  }

  #[inline]
  pub(super) fn has_children(&self) -> bool {
    self.children.iter().any(Option::is_some)
  }
}

/// Octree growing one insert at a time.
pub struct LinkedOctree<E> {
  nodes: Vec<Node<E>>,
  params: LinkedOctreeParams,
  len: usize,
}

impl<E> LinkedOctree<E> {
  /// Empty tree with a single root leaf spanning the voxel grid.
  pub fn new(params: LinkedOctreeParams) -> Result<Self, OctreeError> {
    params.validate()?;
    let root = Node::new(params.voxel_grid, 0);
    Ok(Self {
      nodes: vec![root],
      params,
      len: 0,
    })
  }

  /// Insert `element` at its mapped point.
  ///
  /// Points outside the voxel grid are rejected and the tree is left
  /// unchanged. A leaf that grows past `node_capacity` above `max_depth`
  /// pushes its whole bucket down into child octants.
  pub fn insert<M: PointMap<E>>(&mut self, element: E, map: &M) -> Result<(), OctreeError> {
    let point = map.point(&element);
    let grid = self.params.voxel_grid;
    if !grid.contains_point(point) {
      return Err(OctreeError::OutOfBounds {
        point,
        min: grid.min,
        max: grid.max,
      });
    }

    let mut node = ROOT;
    while self.nodes[node].has_children() {
      let octant = self.nodes[node].bounds.octant_of(point);
      node = self.child_or_create(node, octant);
    }
    self.nodes[node].elements.push((point, element));
    self.len += 1;

    self.subdivide(node);
    Ok(())
  }

  /// Element coordinate-equal to `point`, if one was inserted.
  pub fn find(&self, point: DVec3) -> Option<&E> {
    if !self.params.voxel_grid.contains_point(point) {
      return None;
    }
    let mut node = &self.nodes[ROOT];
    while node.has_children() {
      let child = node.children[node.bounds.octant_of(point) as usize]?;
      node = &self.nodes[child];
    }
    node
      .elements
      .iter()
      .find(|(p, _)| points_equal(*p, point))
      .map(|(_, e)| e)
  }

  /// All elements inside `range` (inclusive bounds).
  pub fn range_search(&self, range: &Aabb3) -> Vec<&E> {
    let mut found = Vec::new();
    let mut stack = vec![ROOT];
    while let Some(index) = stack.pop() {
      let node = &self.nodes[index];
      if !node.bounds.overlaps(range) {
        continue;
      }
      found.extend(
        node
          .elements
          .iter()
          .filter(|(p, _)| range.contains_point(*p))
          .map(|(_, e)| e),
      );
      stack.extend(node.children.iter().rev().flatten());
    }
    found
  }

  /// Elements in post-order: octants 0..7 of a node before the node itself.
  pub fn iter(&self) -> PostOrderIter<'_, E> {
    PostOrderIter::new(&self.nodes)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn bounds(&self) -> &Aabb3 {
    &self.params.voxel_grid
  }

  #[inline]
  pub fn params(&self) -> &LinkedOctreeParams {
    &self.params
  }

  /// Deepest node currently in the arena.
  pub fn depth(&self) -> u8 {
    self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
  }

  fn child_or_create(&mut self, parent: usize, octant: u8) -> usize {
    if let Some(child) = self.nodes[parent].children[octant as usize] {
      return child;
    }
    let bounds = self.nodes[parent].bounds.octant_bounds(octant);
    let depth = self.nodes[parent].depth + 1;
    let child = self.nodes.len();
    self.nodes.push(Node::new(bounds, depth));
    self.nodes[parent].children[octant as usize] = Some(child);
    child
  }

  /// Push over-capacity buckets down until every leaf fits or sits at
  /// `max_depth`.
  fn subdivide(&mut self, start: usize) {
    let mut pending = vec![start];
    while let Some(node) = pending.pop() {
      let over = self.nodes[node].elements.len() > self.params.node_capacity;
      if !over || self.nodes[node].depth >= self.params.max_depth {
        continue;
      }

      let bucket = std::mem::take(&mut self.nodes[node].elements);
      for (point, element) in bucket {
        let octant = self.nodes[node].bounds.octant_of(point);
        let child = self.child_or_create(node, octant);
        self.nodes[child].elements.push((point, element));
      }
      pending.extend(self.nodes[node].children.iter().flatten());
    }
  }
}

#[cfg(test)]
#[path = "linked_test.rs"]
mod linked_test;
