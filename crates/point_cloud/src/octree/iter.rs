//! Post-order element iterator for the linked octree.

use super::linked::{Entry, Node, ROOT};

/// Child cursor of a node on the traversal path.
#[derive(Clone, Copy, Debug)]
struct Frame {
  node: usize,
  next_child: u8,
}

/// Depth-first, post-order walk over a [`LinkedOctree`](super::LinkedOctree).
///
/// Children are visited in octant order 0..7 and a node's own bucket is
/// yielded after all of its children. Traversal state is an explicit frame
/// stack, bounded by the tree depth.
pub struct PostOrderIter<'a, E> {
  nodes: &'a [Node<E>],
  stack: Vec<Frame>,
  bucket: std::slice::Iter<'a, Entry<E>>,
}

impl<'a, E> PostOrderIter<'a, E> {
  pub(super) fn new(nodes: &'a [Node<E>]) -> Self {
    let stack = if nodes.is_empty() {
      Vec::new()
    } else {
      vec![Frame {
        node: ROOT,
        next_child: 0,
      }]
    };
    Self {
      nodes,
      stack,
      bucket: std::slice::Iter::default(),
    }
  }
}

impl<'a, E> Iterator for PostOrderIter<'a, E> {
  type Item = &'a E;

  fn next(&mut self) -> Option<&'a E> {
    let nodes = self.nodes;
    loop {
      if let Some((_, element)) = self.bucket.next() {
        return Some(element);
      }

      let frame = self.stack.last_mut()?;
      let children = &nodes[frame.node].children;
      let next = (frame.next_child..8).find_map(|o| children[o as usize].map(|c| (o, c)));

      match next {
        Some((octant, child)) => {
          frame.next_child = octant + 1;
          self.stack.push(Frame {
            node: child,
            next_child: 0,
          });
        }
        None => {
          let node = frame.node;
          self.stack.pop();
          self.bucket = nodes[node].elements.iter();
        }
      }
    }
  }
}
