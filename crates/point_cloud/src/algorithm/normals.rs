//! Surface normal estimation from local PCA.

use glam::DVec3;
use rayon::prelude::*;

use crate::covariance::pca;
use crate::kdtree::{KdTree, KdTreeParams};
use crate::point::{IdentityMap, PointMap};

/// Fewer samples than this cannot define a plane.
const MIN_SAMPLES: usize = 3;

/// Estimate one unit normal per element from its `k` nearest neighbours.
///
/// The normal is the smallest-variance direction of the element plus its
/// neighbours. Its sign is not oriented. Elements with fewer than two
/// neighbours get `+Z`. `elements` is left untouched; the search index is
/// built over a copy of the positions.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "estimate_normals"))]
pub fn estimate_normals<E: Sync, M: PointMap<E>>(elements: &[E], map: &M, k: usize) -> Vec<DVec3> {
  let mut positions: Vec<DVec3> = elements.iter().map(|e| map.point(e)).collect();
  let queries = positions.clone();
  let tree = KdTree::build(&mut positions, IdentityMap, &KdTreeParams::default());

  queries
    .par_iter()
    .map(|&query| {
      let mut samples: Vec<DVec3> = tree.nearest_neighbours(query, k).into_iter().copied().collect();
      samples.push(query);
      if samples.len() < MIN_SAMPLES {
        return DVec3::Z;
      }
      pca(&samples, &IdentityMap)
        .map(|p| p.minor_axis().normalize_or(DVec3::Z))
        .unwrap_or(DVec3::Z)
    })
    .collect()
}
