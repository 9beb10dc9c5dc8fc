//! Algorithms layered on the indices and PCA primitives.
//!
//! # Module Structure
//!
//! - [`simplification`]: hierarchy simplification by recursive PCA splits
//! - [`normals`]: k-NN PCA normal estimation

pub mod normals;
pub mod simplification;
