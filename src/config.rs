//! Configuration module for balloon modeling parameters.
//!
//! This module defines the fallback scene used when no scene file is given,
//! the mesh resolution overrides and where results are exported.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec3;

use crate::render::DrawStyle;
use crate::scene::{BalloonPlacement, SceneDescription};

/// Mesh resolution and coloring of the fallback scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshParameters {
    /// Latitude subdivisions
    #[serde(default = "default_resolution")]
    pub rings: u32,

    /// Longitude subdivisions
    #[serde(default = "default_resolution")]
    pub segments: u32,

    /// Checkerboard coloring
    #[serde(default = "default_use_color")]
    pub use_color: bool,

    /// Icosphere subdivisions for the primary balloon instead of a UV sphere
    #[serde(default)]
    pub icosphere: Option<u32>,
}

fn default_resolution() -> u32 {
    16
}

fn default_use_color() -> bool {
    true
}

/// Icosphere subdivisions used when an icosphere is requested without a level
pub const DEFAULT_ICOSPHERE_SUBDIVISIONS: u32 = 3;

/// Rings and segments for a UV sphere at detail `level`: `(level + 1) * 8`.
pub fn detail_resolution(level: u32) -> u32 {
    level.saturating_add(1).saturating_mul(8)
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            rings: default_resolution(),
            segments: default_resolution(),
            use_color: default_use_color(),
            icosphere: None,
        }
    }
}

/// How the primary and surrounding balloons are drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewParameters {
    #[serde(default = "default_object_style")]
    pub object_style: DrawStyle,

    #[serde(default)]
    pub surrounding_style: DrawStyle,

    /// Vertical field of view used to frame the primary balloon (degrees)
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,
}

fn default_object_style() -> DrawStyle {
    DrawStyle::Filled
}

fn default_fov() -> f64 {
    45.0
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            object_style: default_object_style(),
            surrounding_style: DrawStyle::None,
            fov_degrees: default_fov(),
        }
    }
}

fn default_balloon() -> BalloonPlacement {
    BalloonPlacement {
        center: DVec3::new(1.0, 0.0, 0.0),
        radius: 1.0,
        pressure: 1.0,
    }
}

/// Complete configuration combining all parameter groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Resolution and coloring of the fallback scene
    #[serde(default)]
    pub mesh: MeshParameters,

    /// Draw styles of the fallback scene
    #[serde(default)]
    pub view: ViewParameters,

    /// The single balloon shown when no scene file is loaded
    #[serde(default = "default_balloon")]
    pub default_balloon: BalloonPlacement,

    /// Write the primary balloon as OBJ here after assembly
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mesh: MeshParameters::default(),
            view: ViewParameters::default(),
            default_balloon: default_balloon(),
            export_path: None,
        }
    }
}

impl ModelConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Returns
    /// * `Ok(ModelConfig)` - Parsed configuration
    /// * `Err` - If file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Save configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Scene shown when no scene file is given: the default balloon alone.
    pub fn default_scene(&self) -> SceneDescription {
        SceneDescription {
            rings: self.mesh.rings,
            segments: self.mesh.segments,
            object_color: self.mesh.use_color,
            surrounding_color: false,
            object_style: self.view.object_style,
            surrounding_style: self.view.surrounding_style,
            icosphere: self.mesh.icosphere,
            balloons: vec![self.default_balloon],
        }
    }

    /// Vertical field of view in radians.
    pub fn fov_radians(&self) -> f64 {
        self.view.fov_degrees.to_radians()
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: std::path::PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
        }
    }
}
