//! Point cloud import and export.
//!
//! - [`obj`]: plain-text OBJ points (`v`) with optional normals (`vn`)

pub mod obj;

pub use obj::ObjCloud;
