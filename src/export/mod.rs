//! Export modules
//!
//! Handles mesh export:
//! - OBJ: Wavefront OBJ export of a balloon's flat triangle list

pub mod obj_export;

pub use obj_export::{ExportError, export_obj, write_obj};
