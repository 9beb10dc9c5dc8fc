//! FlatOctree - bulk-built, fixed-depth octree addressed by cell code.
//!
//! There are no node objects. Every element is assigned the code of the
//! depth-`D` cell containing it, elements are stably sorted by code, and a
//! map from code to buffer range replaces the tree.
//!
//! ```text
//! elements ──(par) cell_code──► (code, point, element) ──stable sort──►
//!   [ cell 0b000.. | cell 0b001.. | ... ]   + HashMap<code, Range>
//! ```

use std::collections::HashMap;
use std::ops::Range;

use glam::DVec3;
use rayon::prelude::*;

use super::code;
use super::config::FlatOctreeParams;
use crate::bounds::Aabb3;
use crate::error::OctreeError;
use crate::point::{points_equal, PointMap};

/// Fixed-depth octree built once from a batch of elements.
pub struct FlatOctree<E> {
  params: FlatOctreeParams,
  /// Elements grouped by ascending cell code, input order within a cell.
  elements: Vec<E>,
  points: Vec<DVec3>,
  /// Populated cell codes, ascending.
  codes: Vec<u64>,
  cells: HashMap<u64, Range<usize>>,
}

impl<E: Send + Sync> FlatOctree<E> {
  /// Build from `elements`, taking ownership.
  ///
  /// Fails if the parameters are invalid or any element maps outside the
  /// voxel grid.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "flat_octree::build"))]
  pub fn build<M: PointMap<E>>(
    elements: Vec<E>,
    map: &M,
    params: FlatOctreeParams,
  ) -> Result<Self, OctreeError> {
    params.validate()?;
    let grid = params.voxel_grid;
    let depth = params.depth;

    let keyed: Vec<(u64, DVec3)> = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("cell_codes", count = elements.len()).entered();

      elements
        .par_iter()
        .map(|element| {
          let point = map.point(element);
          code::cell_code(&grid, point, depth)
            .map(|c| (c, point))
            .ok_or(OctreeError::OutOfBounds {
              point,
              min: grid.min,
              max: grid.max,
            })
        })
        .collect::<Result<_, _>>()?
    };

    let mut entries: Vec<(u64, DVec3, E)> = keyed
      .into_iter()
      .zip(elements)
      .map(|((c, p), e)| (c, p, e))
      .collect();
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("group_cells").entered();

      // Stable, so elements keep input order inside a cell
      entries.par_sort_by_key(|entry| entry.0);
    }

    let mut codes = Vec::new();
    let mut cells = HashMap::new();
    let mut points = Vec::with_capacity(entries.len());
    let mut grouped = Vec::with_capacity(entries.len());
    for (i, (c, p, e)) in entries.into_iter().enumerate() {
      if codes.last() != Some(&c) {
        codes.push(c);
        cells.insert(c, i..i);
      }
      if let Some(range) = cells.get_mut(&c) {
        range.end = i + 1;
      }
      points.push(p);
      grouped.push(e);
    }

    Ok(Self {
      params,
      elements: grouped,
      points,
      codes,
      cells,
    })
  }
}

impl<E> FlatOctree<E> {
  /// Element coordinate-equal to `point`, if one was built in.
  ///
  /// Recomputes the cell code exactly as construction did, then scans only
  /// that cell.
  pub fn find(&self, point: DVec3) -> Option<&E> {
    let range = self.cells.get(&self.cell_code(point)?)?;
    range
      .clone()
      .find(|&i| points_equal(self.points[i], point))
      .map(|i| &self.elements[i])
  }

  /// Code of the cell containing `point`, `None` outside the grid.
  #[inline]
  pub fn cell_code(&self, point: DVec3) -> Option<u64> {
    code::cell_code(&self.params.voxel_grid, point, self.params.depth)
  }

  /// Elements of the cell `code`, `None` if it is unpopulated.
  pub fn cell(&self, code: u64) -> Option<&[E]> {
    self.cells.get(&code).map(|r| &self.elements[r.clone()])
  }

  /// Box covered by cell `code`.
  pub fn cell_bounds(&self, code: u64) -> Aabb3 {
    code::cell_bounds(&self.params.voxel_grid, code, self.params.depth)
  }

  /// Number of populated cells.
  #[inline]
  pub fn cell_count(&self) -> usize {
    self.codes.len()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  #[inline]
  pub fn depth(&self) -> u8 {
    self.params.depth
  }

  #[inline]
  pub fn bounds(&self) -> &Aabb3 {
    &self.params.voxel_grid
  }

  /// Populated cells in ascending code order.
  pub fn iter(&self) -> impl Iterator<Item = (u64, &[E])> + '_ {
    self.codes.iter().map(move |&c| {
      let range = self.cells[&c].clone();
      (c, &self.elements[range])
    })
  }

  /// All elements, grouped by cell.
  #[inline]
  pub fn elements(&self) -> &[E] {
    &self.elements
  }
}

#[cfg(test)]
#[path = "flat_test.rs"]
mod flat_test;
