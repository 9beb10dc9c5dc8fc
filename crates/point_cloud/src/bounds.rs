//! Axis-aligned bounding box used as the octree voxel grid.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
///
/// Used as the voxel grid of both octrees and as the query box of range
/// searches. Both corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl Aabb3 {
  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create a new AABB from center and half-extents.
  pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Smallest box enclosing every point, `None` for an empty iterator.
  pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Some(Self { min, max })
  }

  /// True when min <= max on every axis and no corner is NaN.
  pub fn is_valid(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
  }

  /// Check if this AABB overlaps with another.
  ///
  /// Two AABBs overlap if they share any interior or boundary points.
  #[inline]
  pub fn overlaps(&self, other: &Aabb3) -> bool {
    self.min.x <= other.max.x
      && self.max.x >= other.min.x
      && self.min.y <= other.max.y
      && self.max.y >= other.min.y
      && self.min.z <= other.max.z
      && self.max.z >= other.min.z
  }

  /// Check if this AABB contains a point.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.x >= self.min.x
      && point.x <= self.max.x
      && point.y >= self.min.y
      && point.y <= self.max.y
      && point.z >= self.min.z
      && point.z <= self.max.z
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Octant of `point` relative to this box's center.
  ///
  /// Bit i is set iff coordinate i is >= the center's coordinate i:
  /// - bit 0: X
  /// - bit 1: Y
  /// - bit 2: Z
  #[inline]
  pub fn octant_of(&self, point: DVec3) -> u8 {
    let c = self.center();
    (point.x >= c.x) as u8 | ((point.y >= c.y) as u8) << 1 | ((point.z >= c.z) as u8) << 2
  }

  /// Child box for `octant`: half the extent, offset toward the set bits.
  #[inline]
  pub fn octant_bounds(&self, octant: u8) -> Aabb3 {
    let c = self.center();
    let pick = |bit: u8, lo: f64, mid: f64, hi: f64| {
      if octant & bit != 0 {
        (mid, hi)
      } else {
        (lo, mid)
      }
    };
    let (x0, x1) = pick(1, self.min.x, c.x, self.max.x);
    let (y0, y1) = pick(2, self.min.y, c.y, self.max.y);
    let (z0, z1) = pick(4, self.min.z, c.z, self.max.z);
    Aabb3 {
      min: DVec3::new(x0, y0, z0),
      max: DVec3::new(x1, y1, z1),
    }
  }
}
