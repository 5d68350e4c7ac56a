//! Balloon physics
//!
//! Contains the geometric model for squashing balloons together:
//! - Geometry: UV-sphere tessellation into a flat triangle list
//! - Icosphere: subdivided icosahedron tessellation into the same layout
//! - Balloon: a positioned, pressurised body owning its mesh
//! - Deform: one-shot pairwise squash of one balloon against another

pub mod balloon;
pub mod deform;
pub mod error;
pub mod geometry;
pub mod icosphere;

pub use balloon::Balloon;
pub use deform::{DeformOutcome, PairwiseDeformer};
pub use error::{BalloonError, DegenerateReason};
pub use geometry::{BalloonMesh, MAX_TRIANGLES, SphereMeshBuilder, Triangle, Vertex};
pub use icosphere::IcosphereBuilder;
