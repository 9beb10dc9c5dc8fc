//! Error types for index construction and point cloud I/O.

use std::path::PathBuf;

use glam::DVec3;
use thiserror::Error;

/// Failures when building or inserting into an octree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OctreeError {
  /// The element's point lies outside the configured voxel grid.
  #[error("point {point} lies outside the voxel grid {min}..{max}")]
  OutOfBounds { point: DVec3, min: DVec3, max: DVec3 },

  /// The voxel grid has min > max on some axis (or NaN corners).
  #[error("voxel grid {min}..{max} is not a valid box")]
  InvalidGrid { min: DVec3, max: DVec3 },

  /// Flat octree depth outside 1..=MAX_FLAT_DEPTH.
  #[error("flat octree depth {depth} must be in 1..={max}")]
  InvalidDepth { depth: u8, max: u8 },

  /// Linked octree nodes need room for at least one element.
  #[error("node capacity must be at least 1")]
  ZeroCapacity,
}

/// Failures reading or writing the plain-text OBJ point format.
#[derive(Debug, Error)]
pub enum ObjError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// A `v` or `vn` line did not carry three numeric fields.
  #[error("line {line}: expected three numeric fields in {content:?}")]
  Parse { line: usize, content: String },

  #[error("expected a .obj file, got {}", .0.display())]
  Extension(PathBuf),

  /// Normals must be absent or paired one-to-one with points.
  #[error("{normals} normals for {points} points")]
  NormalCount { points: usize, normals: usize },
}
