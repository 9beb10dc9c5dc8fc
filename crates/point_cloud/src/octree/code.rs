//! Packed cell codes for fixed-depth octree addressing.
//!
//! A code stores one 3-bit octant per level. The root level occupies the most
//! significant used bits, so ascending codes visit cells in depth-first octant
//! order.

use glam::DVec3;

use crate::bounds::Aabb3;

/// Deepest flat octree: 21 levels x 3 bits fit in a u64.
pub const MAX_FLAT_DEPTH: u8 = 21;

/// Code of the depth-`depth` cell holding `point`, `None` outside `grid`.
#[inline]
pub fn cell_code(grid: &Aabb3, point: DVec3, depth: u8) -> Option<u64> {
  if !grid.contains_point(point) {
    return None;
  }
  let mut bounds = *grid;
  let mut code = 0u64;
  for _ in 0..depth {
    let octant = bounds.octant_of(point);
    code = (code << 3) | octant as u64;
    bounds = bounds.octant_bounds(octant);
  }
  Some(code)
}

/// Octant chosen at `level` (0 = root) of a depth-`depth` code.
#[inline]
pub fn octant_at(code: u64, depth: u8, level: u8) -> u8 {
  debug_assert!(level < depth);
  ((code >> (3 * (depth - 1 - level) as u32)) & 0b111) as u8
}

/// Box of the cell addressed by `code`.
pub fn cell_bounds(grid: &Aabb3, code: u64, depth: u8) -> Aabb3 {
  (0..depth).fold(*grid, |bounds, level| {
    bounds.octant_bounds(octant_at(code, depth, level))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unit_grid() -> Aabb3 {
    Aabb3::from_center_half_extents(DVec3::ZERO, DVec3::ONE)
  }

  #[test]
  fn test_depth_one_code_is_root_octant() {
    let grid = unit_grid();
    assert_eq!(cell_code(&grid, DVec3::new(-0.5, -0.5, -0.5), 1), Some(0));
    assert_eq!(cell_code(&grid, DVec3::new(0.5, -0.5, 0.5), 1), Some(0b101));
  }

  #[test]
  fn test_root_level_most_significant() {
    let grid = unit_grid();
    // Root octant 7, then octant 0 inside [0,1]^3
    let code = cell_code(&grid, DVec3::splat(0.25), 2).unwrap();
    assert_eq!(code, 0b111_000);
    assert_eq!(octant_at(code, 2, 0), 7);
    assert_eq!(octant_at(code, 2, 1), 0);
  }

  #[test]
  fn test_outside_grid_has_no_code() {
    let grid = unit_grid();
    assert_eq!(cell_code(&grid, DVec3::new(1.5, 0.0, 0.0), 3), None);
    assert!(cell_code(&grid, DVec3::ONE, 3).is_some(), "Max corner is inclusive");
  }

  #[test]
  fn test_max_depth_fits_u64() {
    let grid = unit_grid();
    let code = cell_code(&grid, DVec3::ONE, MAX_FLAT_DEPTH).unwrap();
    assert_eq!(code, (1u64 << 63) - 1, "All-ones corner uses every packed bit");
  }

  #[test]
  fn test_cell_bounds_contains_point() {
    let grid = Aabb3::new(DVec3::splat(-1000.0), DVec3::splat(1000.0));
    let point = DVec3::new(123.4, -567.8, 9.1);
    for depth in [1u8, 5, 11, 21] {
      let code = cell_code(&grid, point, depth).unwrap();
      let cell = cell_bounds(&grid, code, depth);
      assert!(cell.contains_point(point), "Depth {} cell misses point", depth);
      assert_eq!(cell.size(), grid.size() / (1u64 << depth) as f64);
    }
  }
}
