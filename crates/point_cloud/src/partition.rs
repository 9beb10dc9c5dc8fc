//! In-place reordering shared by the k-d tree build and simplification.
//!
//! Both consumers hand in the caller's buffer and leave it reordered; relative
//! order inside each side is unspecified.

use std::cmp::Ordering;

use crate::point::{axis_value, PointMap};

/// Move every element satisfying `pred` to the front of `elements`.
///
/// Returns the number of elements satisfying `pred` (the split index).
pub fn partition<E>(elements: &mut [E], mut pred: impl FnMut(&E) -> bool) -> usize {
  let mut split = 0;
  for i in 0..elements.len() {
    if pred(&elements[i]) {
      elements.swap(i, split);
      split += 1;
    }
  }
  split
}

fn compare_on_axis<E, M: PointMap<E>>(map: &M, axis: usize) -> impl Fn(&E, &E) -> Ordering + '_ {
  move |a: &E, b: &E| {
    axis_value(map.point(a), axis).total_cmp(&axis_value(map.point(b), axis))
  }
}

/// Place the `nth` smallest element along `axis` at position `nth`.
///
/// Afterwards everything before `nth` is <= it and everything after is >= it
/// on that axis.
pub fn select_nth_on_axis<E, M: PointMap<E>>(elements: &mut [E], nth: usize, axis: usize, map: &M) {
  elements.select_nth_unstable_by(nth, compare_on_axis(map, axis));
}

/// Fully sort `elements` along `axis`.
pub fn sort_on_axis<E, M: PointMap<E>>(elements: &mut [E], axis: usize, map: &M) {
  elements.sort_unstable_by(compare_on_axis(map, axis));
}
