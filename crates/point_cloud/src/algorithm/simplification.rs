//! Hierarchy simplification: recursive PCA bisection down to small clusters.
//!
//! Clusters are contiguous ranges of the caller's buffer processed through a
//! FIFO queue, seeded with the whole buffer:
//!
//! ```text
//! pop cluster ──PCA──► too big or too varied? ──yes──► split by the plane
//!                                │                     through the centroid
//!                                no                    normal to the major
//!                                ▼                     axis, push both halves
//!                   emit element nearest the centroid
//! ```
//!
//! The buffer is partitioned in place; its final order is unspecified.

use std::collections::VecDeque;
use std::ops::Range;

use glam::DVec3;

use crate::covariance::pca;
use crate::partition::partition;
use crate::point::PointMap;

/// Parameters for [`hierarchy_simplification`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimplificationParams {
  /// Largest cluster kept without splitting. Must be > 0.
  pub cluster_size: usize,

  /// Largest variation (smallest eigenvalue over the eigenvalue sum) kept
  /// without splitting, in `[0, 1/3]`. At 1/3 only `cluster_size` matters.
  pub var_max: f64,
}

impl Default for SimplificationParams {
  fn default() -> Self {
    Self {
      cluster_size: 10,
      var_max: 1.0 / 3.0,
    }
  }
}

impl SimplificationParams {
  fn assert_valid(&self) {
    assert!(self.cluster_size > 0, "cluster_size must be > 0");
    assert!(
      (0.0..=1.0 / 3.0).contains(&self.var_max),
      "var_max must lie in [0, 1/3], got {}",
      self.var_max
    );
  }
}

/// Simplify `elements`, collecting one representative per cluster.
///
/// Representatives come out in cluster pop order.
///
/// # Panics
/// If `cluster_size == 0` or `var_max` is outside `[0, 1/3]`.
pub fn hierarchy_simplification<E: Clone, M: PointMap<E>>(
  elements: &mut [E],
  map: &M,
  params: &SimplificationParams,
) -> Vec<E> {
  let mut kept = Vec::new();
  simplify_into(elements, map, params, &mut kept);
  kept
}

/// Simplify `elements`, extending `out` with one clone per cluster.
///
/// Elements whose mapped point has a NaN or infinite coordinate are moved to
/// the back of the buffer and skipped. Returns the number of representatives
/// emitted.
///
/// # Panics
/// If `cluster_size == 0` or `var_max` is outside `[0, 1/3]`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "hierarchy_simplification"))]
pub fn simplify_into<E: Clone, M: PointMap<E>>(
  elements: &mut [E],
  map: &M,
  params: &SimplificationParams,
  out: &mut impl Extend<E>,
) -> usize {
  params.assert_valid();

  // Non-finite points are never clustered
  let finite = partition(elements, |e| map.point(e).is_finite());

  let mut queue: VecDeque<Range<usize>> = VecDeque::new();
  queue.push_back(0..finite);
  let mut emitted = 0;

  while let Some(range) = queue.pop_front() {
    let cluster = &mut elements[range.clone()];
    let Some(pca) = pca(cluster, map) else {
      continue;
    };

    let var = pca.eigen.variation();
    if cluster.len() > params.cluster_size || var > params.var_max {
      let normal = pca.major_axis();
      let d = pca.centroid.dot(normal);
      let split = partition(cluster, |e| normal.dot(map.point(e)) - d <= 0.0);

      if split > 0 && split < cluster.len() {
        queue.push_back(range.start..range.start + split);
        queue.push_back(range.start + split..range.end);
        continue;
      }
    }

    if let Some(representative) = nearest_to(cluster, map, pca.centroid) {
      out.extend(std::iter::once(representative.clone()));
      emitted += 1;
    }
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(
    input = elements.len(),
    skipped = elements.len() - finite,
    emitted,
    "simplified"
  );

  emitted
}

/// First element with the smallest squared distance to `target`.
fn nearest_to<'a, E, M: PointMap<E>>(elements: &'a [E], map: &M, target: DVec3) -> Option<&'a E> {
  let mut best: Option<(&E, f64)> = None;
  for e in elements {
    let d = map.point(e).distance_squared(target);
    match best {
      Some((_, b)) if b <= d => {}
      _ => best = Some((e, d)),
    }
  }
  best.map(|(e, _)| e)
}

#[cfg(test)]
#[path = "simplification_test.rs"]
mod simplification_test;
