use glam::DVec3;
use nalgebra::{Matrix3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::point::IdentityMap;

fn assert_close(a: f64, b: f64, tol: f64, what: &str) {
  assert!((a - b).abs() <= tol, "{}: {} vs {}", what, a, b);
}

#[test]
fn test_empty_input_has_no_covariance() {
  let empty: Vec<DVec3> = Vec::new();
  assert!(covariance(&empty, &IdentityMap).is_none());
  assert!(covariance_par(&empty, &IdentityMap).is_none());
  assert!(pca(&empty, &IdentityMap).is_none());
}

/// N copies of one point scatter nothing.
#[test]
fn test_copies_of_one_point_give_zero_matrix() {
  for n in [1usize, 2, 17] {
    let points = vec![DVec3::new(3.0, -2.0, 7.5); n];
    let cov = covariance(&points, &IdentityMap).unwrap();

    assert_eq!(cov.centroid, DVec3::new(3.0, -2.0, 7.5));
    assert_eq!(cov.matrix, Matrix3::zeros(), "N = {}", n);
  }
}

#[test]
fn test_centroid_and_entries() {
  let points = vec![
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(-1.0, 0.0, 0.0),
    DVec3::new(0.0, 2.0, 0.0),
    DVec3::new(0.0, -2.0, 0.0),
  ];
  let cov = covariance(&points, &IdentityMap).unwrap();

  assert_eq!(cov.centroid, DVec3::ZERO);
  assert_eq!(cov.matrix[(0, 0)], 2.0, "xx");
  assert_eq!(cov.matrix[(1, 1)], 8.0, "yy");
  assert_eq!(cov.matrix[(2, 2)], 0.0, "zz");
  assert_eq!(cov.matrix[(0, 1)], 0.0, "xy");
  assert_eq!(cov.matrix, cov.matrix.transpose(), "Matrix must be symmetric");
}

/// Parallel reduction agrees with sequential accumulation up to rounding.
#[test]
fn test_parallel_matches_sequential() {
  let mut rng = StdRng::seed_from_u64(0x5EED);
  let points: Vec<DVec3> = (0..10_000)
    .map(|_| {
      DVec3::new(
        rng.random_range(-5.0..5.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(0.0..2.0),
      )
    })
    .collect();

  let seq = covariance(&points, &IdentityMap).unwrap();
  let par = covariance_par(&points, &IdentityMap).unwrap();

  assert!((seq.centroid - par.centroid).length() < 1e-9);
  for r in 0..3 {
    for c in 0..3 {
      assert_close(seq.matrix[(r, c)], par.matrix[(r, c)], 1e-6, "entry");
    }
  }
}

/// Already-ascending eigenpairs pass through unchanged.
#[test]
fn test_sort_eigen_is_noop_on_ascending() {
  let values = Vector3::new(0.5, 1.0, 4.0);
  let vectors = Matrix3::new(
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0, //
    1.0, 0.0, 0.0,
  );
  let sorted = sort_eigen(values, vectors);
  assert_eq!(sorted.values, values);
  assert_eq!(sorted.vectors, vectors);

  let again = sort_eigen(sorted.values, sorted.vectors);
  assert_eq!(again, sorted, "Sorting must be idempotent");
}

#[test]
fn test_sort_eigen_permutes_columns_with_values() {
  let values = Vector3::new(3.0, 1.0, 2.0);
  let vectors = Matrix3::identity();
  let sorted = sort_eigen(values, vectors);

  assert_eq!(sorted.values, Vector3::new(1.0, 2.0, 3.0));
  assert_eq!(sorted.vector(0), DVec3::Y, "Smallest value came from column 1");
  assert_eq!(sorted.vector(1), DVec3::Z);
  assert_eq!(sorted.vector(2), DVec3::X);
}

#[test]
fn test_eigen_sorted_diagonal() {
  let matrix = Matrix3::from_diagonal(&Vector3::new(9.0, 1.0, 4.0));
  let eigen = eigen_sorted(&matrix);

  assert_close(eigen.values[0], 1.0, 1e-12, "lambda0");
  assert_close(eigen.values[1], 4.0, 1e-12, "lambda1");
  assert_close(eigen.values[2], 9.0, 1e-12, "lambda2");
  assert_close(eigen.vector(2).x.abs(), 1.0, 1e-12, "major axis is X");
  assert_close(eigen.vector(0).y.abs(), 1.0, 1e-12, "minor axis is Y");
}

/// Points spread along a line: major axis follows the line, variation ~ 0.
#[test]
fn test_pca_of_a_line() {
  let dir = DVec3::new(1.0, 2.0, 2.0).normalize();
  let points: Vec<DVec3> = (-10..=10).map(|i| dir * i as f64).collect();
  let result = pca(&points, &IdentityMap).unwrap();

  assert!(result.centroid.length() < 1e-12);
  assert_close(result.major_axis().dot(dir).abs(), 1.0, 1e-9, "major axis");
  assert!(result.eigen.variation().abs() < 1e-9);
}

/// A flat square has its normal as the minor axis.
#[test]
fn test_pca_minor_axis_of_plane() {
  let mut points = Vec::new();
  for x in -3..=3 {
    for y in -3..=3 {
      points.push([x as f32, y as f32, 1.0f32]);
    }
  }
  let result = pca(&points, &IdentityMap).unwrap();

  assert_close(result.minor_axis().z.abs(), 1.0, 1e-9, "normal");
  assert_close(result.centroid.z, 1.0, 1e-12, "centroid z");
}
