//! Octrees over a fixed voxel grid.
//!
//! Both variants descend by octant codes recomputed from each node's box
//! center (bit 0 = X, bit 1 = Y, bit 2 = Z, set when the coordinate is >= the
//! center). Lookups recompute exactly the codes used at insertion, so a stored
//! element is always reachable from the root.
//!
//! ```text
//! root box ──octant_of──► child box (half extent) ──► ... ──► bucket
//! ```
//!
//! # Module Structure
//!
//! - [`code`]: packed fixed-depth cell codes
//! - [`config`]: `LinkedOctreeParams`, `FlatOctreeParams`
//! - [`linked`]: `LinkedOctree` - incremental arena tree with lazy subdivision
//! - [`flat`]: `FlatOctree` - bulk-built cells keyed by code

pub mod code;
pub mod config;
pub mod flat;
mod iter;
pub mod linked;

pub use code::MAX_FLAT_DEPTH;
pub use config::{FlatOctreeParams, LinkedOctreeParams};
pub use flat::FlatOctree;
pub use iter::PostOrderIter;
pub use linked::LinkedOctree;
