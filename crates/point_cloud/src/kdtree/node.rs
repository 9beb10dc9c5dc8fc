//! KdNode - flat-array node of the k-d tree.

use std::ops::Range;

/// Node stored in the tree's flat node array. Index 0 is the root.
#[derive(Clone, Debug, PartialEq)]
pub enum KdNode {
  /// Interior node: elements left of the split are <= `split` on `axis`,
  /// elements right of it are >= `split`.
  Internal {
    axis: usize,
    split: f64,
    left: usize,
    right: usize,
  },
  /// Leaf node: range `[start..end)` into the backing buffer.
  Leaf { start: usize, end: usize },
}

impl KdNode {
  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self, KdNode::Leaf { .. })
  }

  /// Buffer range of a leaf, `None` for interior nodes.
  #[inline]
  pub fn range(&self) -> Option<Range<usize>> {
    match *self {
      KdNode::Leaf { start, end } => Some(start..end),
      KdNode::Internal { .. } => None,
    }
  }
}
