//! Renderer-facing data
//!
//! Converts built balloons into GPU-ready vertex streams:
//! - Stream: draw styles, packed vertex layout and per-style primitive order
//! - Bounds: bounding sphere for framing the primary balloon

pub mod bounds;
pub mod stream;

pub use bounds::BoundingSphere;
pub use stream::{DrawStream, DrawStyle, PackedVertex, Topology, draw_stream};
