use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::point::IdentityMap;

fn random_points(count: usize, seed: u64) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      DVec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
      )
    })
    .collect()
}

/// Walk the tree, checking that leaves tile the buffer exactly once and that
/// every element honours the split planes above it.
fn check_invariants<M: PointMap<DVec3>>(tree: &KdTree<'_, DVec3, M>) {
  let mut covered = vec![0u32; tree.len()];
  let mut stack = vec![(0usize, Vec::<(usize, f64, bool)>::new())];

  while let Some((node, planes)) = stack.pop() {
    match tree.nodes()[node] {
      KdNode::Leaf { start, end } => {
        for i in start..end {
          covered[i] += 1;
          let p = tree.elements()[i];
          for &(axis, split, is_left) in &planes {
            let v = axis_value(p, axis);
            if is_left {
              assert!(v <= split, "Left element {:?} above split {}", p, split);
            } else {
              assert!(v >= split, "Right element {:?} below split {}", p, split);
            }
          }
        }
      }
      KdNode::Internal {
        axis,
        split,
        left,
        right,
      } => {
        let mut lp = planes.clone();
        lp.push((axis, split, true));
        let mut rp = planes;
        rp.push((axis, split, false));
        stack.push((left, lp));
        stack.push((right, rp));
      }
    }
  }

  assert!(
    covered.iter().all(|&c| c == 1),
    "Every element must belong to exactly one leaf"
  );
}

#[test]
fn test_empty_tree() {
  let mut points: Vec<DVec3> = Vec::new();
  let tree = KdTree::build(&mut points, IdentityMap, &KdTreeParams::default());

  assert!(tree.is_empty());
  assert_eq!(tree.node_count(), 1, "Empty tree keeps a single empty leaf");
  assert!(tree.nodes()[0].is_leaf());
}

#[test]
fn test_build_invariants_nth_element() {
  for max_depth in [1usize, 2, 4, 12] {
    let mut points = random_points(2_000, 7 + max_depth as u64);
    let params = KdTreeParams {
      max_depth,
      ..Default::default()
    };
    let tree = KdTree::build(&mut points, IdentityMap, &params);

    assert_eq!(tree.len(), 2_000);
    assert!(tree.depth() <= max_depth, "Depth {} > {}", tree.depth(), max_depth);
    check_invariants(&tree);
  }
}

#[test]
fn test_build_invariants_median() {
  let mut points = random_points(1_000, 99);
  let params = KdTreeParams {
    construction: Construction::Median,
    ..Default::default()
  };
  let tree = KdTree::build(&mut points, IdentityMap, &params);
  check_invariants(&tree);
}

/// Many duplicated coordinates must still tile the buffer.
#[test]
fn test_build_with_duplicates() {
  let mut points: Vec<DVec3> = (0..300).map(|i| DVec3::splat((i % 3) as f64)).collect();
  let tree = KdTree::build(&mut points, IdentityMap, &KdTreeParams::default());
  check_invariants(&tree);
}

/// Construction only permutes the caller's buffer.
#[test]
fn test_build_reorders_in_place() {
  let original = random_points(500, 3);
  let mut points = original.clone();
  let tree = KdTree::build(&mut points, IdentityMap, &KdTreeParams::default());

  let mut rebuilt: Vec<[f64; 3]> = tree.iter().map(|p| p.to_array()).collect();
  let mut expected: Vec<[f64; 3]> = original.iter().map(|p| p.to_array()).collect();
  rebuilt.sort_by(|a, b| a.partial_cmp(b).unwrap());
  expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
  assert_eq!(rebuilt, expected);
}

#[test]
fn test_leaf_bucket_size() {
  let mut points = random_points(1_024, 11);
  let params = KdTreeParams {
    max_depth: 64,
    min_element_count: 4,
    ..Default::default()
  };
  let tree = KdTree::build(&mut points, IdentityMap, &params);

  for node in tree.nodes() {
    if let Some(range) = node.range() {
      assert!(range.len() <= 4, "Leaf holds {} elements", range.len());
    }
  }
}

#[test]
fn test_computed_depth_limit() {
  let params = KdTreeParams {
    min_element_count: 8,
    compute_max_depth: true,
    ..Default::default()
  };
  assert_eq!(params.depth_limit(0), 0);
  assert_eq!(params.depth_limit(8), 0);
  assert_eq!(params.depth_limit(9), 1);
  assert_eq!(params.depth_limit(100), 4);

  let mut points = random_points(100, 5);
  let tree = KdTree::build(&mut points, IdentityMap, &params);
  assert!(tree.depth() <= 4);
  check_invariants(&tree);
}

/// Elements carrying payloads are indexed through a closure map.
#[test]
fn test_build_over_payload_elements() {
  #[derive(Clone, Copy)]
  struct Tagged {
    position: [f32; 3],
    tag: u32,
  }

  let mut elements: Vec<Tagged> = (0..64)
    .map(|i| Tagged {
      position: [i as f32, 0.0, 0.0],
      tag: i,
    })
    .collect();
  let map = |t: &Tagged| DVec3::new(t.position[0] as f64, t.position[1] as f64, t.position[2] as f64);
  let tree = KdTree::build(&mut elements, map, &KdTreeParams::default());

  let nearest = tree.nearest_neighbours(DVec3::new(10.2, 0.0, 0.0), 1);
  assert_eq!(nearest.len(), 1);
  assert_eq!(nearest[0].tag, 10);
}
