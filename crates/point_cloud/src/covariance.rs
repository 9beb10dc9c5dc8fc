//! Covariance and principal component analysis of point sets.
//!
//! The scatter matrix is accumulated from six independent sums
//! (xx, yy, zz, xy, xz, yz) around the centroid and is not normalized by the
//! element count; only the eigenvector directions and eigenvalue ratios are
//! consumed downstream.

use glam::DVec3;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use rayon::prelude::*;

use crate::point::PointMap;

/// Centroid and symmetric scatter matrix of a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Covariance {
  pub centroid: DVec3,
  pub matrix: Matrix3<f64>,
}

/// Eigenvalues in ascending order; column i of `vectors` pairs with `values[i]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortedEigen {
  pub values: Vector3<f64>,
  pub vectors: Matrix3<f64>,
}

impl SortedEigen {
  /// Eigenvector `i` (0 = smallest eigenvalue, 2 = largest).
  #[inline]
  pub fn vector(&self, i: usize) -> DVec3 {
    let c = self.vectors.column(i);
    DVec3::new(c[0], c[1], c[2])
  }

  /// Ratio of the smallest eigenvalue to the eigenvalue sum.
  ///
  /// 0 for planar sets, at most 1/3 for isotropic ones. NaN when every
  /// eigenvalue is zero.
  #[inline]
  pub fn variation(&self) -> f64 {
    self.values[0] / (self.values[0] + self.values[1] + self.values[2])
  }
}

/// Covariance plus its sorted eigendecomposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pca {
  pub centroid: DVec3,
  pub eigen: SortedEigen,
}

impl Pca {
  /// Direction of largest spread.
  #[inline]
  pub fn major_axis(&self) -> DVec3 {
    self.eigen.vector(2)
  }

  /// Direction of smallest spread (surface normal for planar sets).
  #[inline]
  pub fn minor_axis(&self) -> DVec3 {
    self.eigen.vector(0)
  }
}

/// Six independent scatter entries: xx, yy, zz, xy, xz, yz.
type Scatter = [f64; 6];

#[inline(always)]
fn scatter_of(d: DVec3) -> Scatter {
  [d.x * d.x, d.y * d.y, d.z * d.z, d.x * d.y, d.x * d.z, d.y * d.z]
}

#[inline(always)]
fn add_scatter(mut a: Scatter, b: Scatter) -> Scatter {
  for i in 0..6 {
    a[i] += b[i];
  }
  a
}

fn scatter_matrix(s: Scatter) -> Matrix3<f64> {
  Matrix3::new(
    s[0], s[3], s[4], //
    s[3], s[1], s[5], //
    s[4], s[5], s[2],
  )
}

/// Mean of the mapped points, `None` when empty.
pub fn centroid<E, M: PointMap<E>>(elements: &[E], map: &M) -> Option<DVec3> {
  if elements.is_empty() {
    return None;
  }
  let sum = elements.iter().fold(DVec3::ZERO, |acc, e| acc + map.point(e));
  Some(sum / elements.len() as f64)
}

/// Centroid and scatter matrix of `elements`, `None` when empty.
pub fn covariance<E, M: PointMap<E>>(elements: &[E], map: &M) -> Option<Covariance> {
  let mu = centroid(elements, map)?;
  let sums = elements
    .iter()
    .map(|e| scatter_of(map.point(e) - mu))
    .fold([0.0; 6], add_scatter);

  Some(Covariance {
    centroid: mu,
    matrix: scatter_matrix(sums),
  })
}

/// Parallel variant of [`covariance`].
///
/// Reduction order differs from the sequential version, so low-order bits
/// may differ.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "covariance::covariance_par"))]
pub fn covariance_par<E: Sync, M: PointMap<E>>(elements: &[E], map: &M) -> Option<Covariance> {
  if elements.is_empty() {
    return None;
  }
  let sum = elements
    .par_iter()
    .map(|e| map.point(e))
    .reduce(|| DVec3::ZERO, |a, b| a + b);
  let mu = sum / elements.len() as f64;

  let sums = elements
    .par_iter()
    .map(|e| scatter_of(map.point(e) - mu))
    .reduce(|| [0.0; 6], add_scatter);

  Some(Covariance {
    centroid: mu,
    matrix: scatter_matrix(sums),
  })
}

/// Reorder an eigendecomposition so eigenvalues ascend.
///
/// Ties keep their incoming order.
pub fn sort_eigen(values: Vector3<f64>, vectors: Matrix3<f64>) -> SortedEigen {
  let mut order = [0usize, 1, 2];
  order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

  SortedEigen {
    values: Vector3::new(values[order[0]], values[order[1]], values[order[2]]),
    vectors: Matrix3::from_columns(&[
      vectors.column(order[0]).into_owned(),
      vectors.column(order[1]).into_owned(),
      vectors.column(order[2]).into_owned(),
    ]),
  }
}

/// Ascending eigendecomposition of a symmetric matrix.
pub fn eigen_sorted(matrix: &Matrix3<f64>) -> SortedEigen {
  let eigen = SymmetricEigen::new(*matrix);
  sort_eigen(eigen.eigenvalues, eigen.eigenvectors)
}

/// Principal components of `elements`, `None` when empty.
pub fn pca<E, M: PointMap<E>>(elements: &[E], map: &M) -> Option<Pca> {
  let cov = covariance(elements, map)?;
  Some(Pca {
    centroid: cov.centroid,
    eigen: eigen_sorted(&cov.matrix),
  })
}

#[cfg(test)]
#[path = "covariance_test.rs"]
mod covariance_test;
