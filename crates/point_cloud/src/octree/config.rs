//! Construction parameters for both octree variants.

use glam::DVec3;

use super::code::MAX_FLAT_DEPTH;
use crate::bounds::Aabb3;
use crate::error::OctreeError;

/// Parameters for [`LinkedOctree`](super::LinkedOctree).
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedOctreeParams {
  /// Root box. Inserts outside it fail.
  pub voxel_grid: Aabb3,

  /// Elements a leaf holds before it subdivides.
  pub node_capacity: usize,

  /// Deepest level a node may be created at (root = 0). Leaves at this depth
  /// keep growing past `node_capacity`.
  pub max_depth: u8,
}

impl LinkedOctreeParams {
  pub fn validate(&self) -> Result<(), OctreeError> {
    validate_grid(&self.voxel_grid)?;
    if self.node_capacity == 0 {
      return Err(OctreeError::ZeroCapacity);
    }
    Ok(())
  }
}

impl Default for LinkedOctreeParams {
  fn default() -> Self {
    Self {
      voxel_grid: Aabb3::from_center_half_extents(DVec3::ZERO, DVec3::ONE),
      node_capacity: 16,
      max_depth: 16,
    }
  }
}

/// Parameters for [`FlatOctree`](super::FlatOctree).
#[derive(Clone, Debug, PartialEq)]
pub struct FlatOctreeParams {
  /// Root box. Every element must lie inside it.
  pub voxel_grid: Aabb3,

  /// Levels below the root, in `1..=MAX_FLAT_DEPTH`.
  pub depth: u8,
}

impl FlatOctreeParams {
  pub fn validate(&self) -> Result<(), OctreeError> {
    validate_grid(&self.voxel_grid)?;
    if !(1..=MAX_FLAT_DEPTH).contains(&self.depth) {
      return Err(OctreeError::InvalidDepth {
        depth: self.depth,
        max: MAX_FLAT_DEPTH,
      });
    }
    Ok(())
  }

  /// Edge lengths of one cell, or `None` when `depth` is outside
  /// `1..=MAX_FLAT_DEPTH`.
  #[inline]
  pub fn cell_size(&self) -> Option<DVec3> {
    if !(1..=MAX_FLAT_DEPTH).contains(&self.depth) {
      return None;
    }
    Some(self.voxel_grid.size() / (1u64 << self.depth) as f64)
  }
}

impl Default for FlatOctreeParams {
  fn default() -> Self {
    Self {
      voxel_grid: Aabb3::from_center_half_extents(DVec3::ZERO, DVec3::ONE),
      depth: 8,
    }
  }
}

fn validate_grid(grid: &Aabb3) -> Result<(), OctreeError> {
  if grid.is_valid() && grid.size().is_finite() {
    Ok(())
  } else {
    Err(OctreeError::InvalidGrid {
      min: grid.min,
      max: grid.max,
    })
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
