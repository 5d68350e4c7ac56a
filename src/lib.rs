//! Balloon Modeling Library
//!
//! Squash deformation of touching spherical balloons:
//! - UV-sphere and icosphere tessellation with per-face normals
//! - Pressure-weighted one-shot deformation against neighbours
//! - Scene loading, draw streams and OBJ export

pub mod config;
pub mod export;
pub mod physics;
pub mod render;
pub mod scene;

pub use config::ModelConfig;
pub use physics::{Balloon, BalloonError, IcosphereBuilder, PairwiseDeformer, SphereMeshBuilder};
pub use scene::{Scene, SceneDescription};
