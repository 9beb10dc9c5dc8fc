//! Point projection shared by every index and algorithm.
//!
//! Elements are opaque to the library. A [`PointMap`] projects an element to
//! double-precision coordinates; all geometry runs on [`DVec3`] regardless of
//! how the caller stores its coordinates.

use glam::{DVec3, Vec3};

/// Default per-axis tolerance for coordinate equality.
pub const EPSILON: f64 = 1e-5;

/// Projection from a caller element to 3D coordinates.
///
/// Implementations must be pure: the same element always maps to the same
/// point, and calls may happen concurrently from rayon workers.
pub trait PointMap<E: ?Sized>: Sync {
  fn point(&self, element: &E) -> DVec3;
}

impl<E: ?Sized, F> PointMap<E> for F
where
  F: Fn(&E) -> DVec3 + Sync,
{
  #[inline(always)]
  fn point(&self, element: &E) -> DVec3 {
    self(element)
  }
}

/// Element types that are their own coordinates.
pub trait Point {
  fn coords(&self) -> DVec3;
}

impl Point for DVec3 {
  #[inline(always)]
  fn coords(&self) -> DVec3 {
    *self
  }
}

impl Point for Vec3 {
  #[inline(always)]
  fn coords(&self) -> DVec3 {
    self.as_dvec3()
  }
}

impl Point for [f64; 3] {
  #[inline(always)]
  fn coords(&self) -> DVec3 {
    DVec3::from_array(*self)
  }
}

impl Point for [f32; 3] {
  #[inline(always)]
  fn coords(&self) -> DVec3 {
    DVec3::new(self[0] as f64, self[1] as f64, self[2] as f64)
  }
}

/// PointMap for elements implementing [`Point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMap;

impl<E: Point> PointMap<E> for IdentityMap {
  #[inline(always)]
  fn point(&self, element: &E) -> DVec3 {
    element.coords()
  }
}

/// Coordinate equality within [`EPSILON`] on every axis.
#[inline]
pub fn points_equal(a: DVec3, b: DVec3) -> bool {
  points_equal_eps(a, b, EPSILON)
}

/// Coordinate equality within `eps` on every axis.
#[inline]
pub fn points_equal_eps(a: DVec3, b: DVec3, eps: f64) -> bool {
  let d = (a - b).abs();
  d.x < eps && d.y < eps && d.z < eps
}

/// Squared Euclidean distance.
#[inline(always)]
pub fn squared_distance(a: DVec3, b: DVec3) -> f64 {
  a.distance_squared(b)
}

/// Coordinate of `p` on `axis` (0 = x, 1 = y, 2 = z).
#[inline(always)]
pub fn axis_value(p: DVec3, axis: usize) -> f64 {
  match axis {
    0 => p.x,
    1 => p.y,
    _ => p.z,
  }
}

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;
