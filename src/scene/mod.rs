//! Balloon scenes
//!
//! A scene is one primary balloon plus any number of surrounding balloons.
//! Only the primary balloon is ever deformed: it is squashed by every
//! surrounding balloon in file order, each pass starting from the result of
//! the previous one. Surrounding balloons keep their pristine spheres.

pub mod parser;

pub use parser::{BalloonPlacement, SceneDescription};

use crate::physics::{Balloon, BalloonError, DeformOutcome};
use crate::render::{BoundingSphere, DrawStream, DrawStyle, draw_stream};

/// Error types for scene loading and assembly.
#[derive(Debug)]
pub enum SceneError {
    /// IO error when reading a scene file
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// The text ended before `field` was read
    MissingToken { field: &'static str },
    /// `token` is not a valid value for `field`
    InvalidToken { field: &'static str, token: String },
    /// Draw style code outside 0..=3
    InvalidStyle { field: &'static str, code: i64 },
    /// The scene declares no balloons
    Empty,
    /// The shared mesh resolution is invalid
    Mesh(BalloonError),
    /// Building or deforming balloon `index` failed
    Balloon { index: usize, error: BalloonError },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read scene file '{}': {}",
                    path.display(),
                    error
                )
            }
            SceneError::MissingToken { field } => {
                write!(formatter, "Scene ended before {}", field)
            }
            SceneError::InvalidToken { field, token } => {
                write!(formatter, "Invalid {} in scene: '{}'", field, token)
            }
            SceneError::InvalidStyle { field, code } => {
                write!(formatter, "Invalid {} in scene: {}", field, code)
            }
            SceneError::Empty => write!(formatter, "Scene contains no balloons"),
            SceneError::Mesh(error) => write!(formatter, "Invalid scene resolution: {}", error),
            SceneError::Balloon { index, error } => {
                write!(formatter, "Balloon {} in scene: {}", index, error)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io { error, .. } => Some(error),
            SceneError::Mesh(error) => Some(error),
            SceneError::Balloon { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A built scene: every balloon tessellated, the primary one deformed.
#[derive(Debug, Clone)]
pub struct Scene {
    balloons: Vec<Balloon>,
    object_style: DrawStyle,
    surrounding_style: DrawStyle,
}

impl SceneDescription {
    /// Build every balloon and squash the primary one by the others.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let mut balloons = Vec::with_capacity(self.balloons.len());
        for (index, placement) in self.balloons.iter().enumerate() {
            let alternating_color = if index == 0 {
                self.object_color
            } else {
                self.surrounding_color
            };
            let mut balloon = Balloon::new(placement.center, placement.radius, placement.pressure)
                .map_err(|error| SceneError::Balloon { index, error })?;
            let built = match (index, self.icosphere) {
                (0, Some(subdivisions)) => {
                    balloon.setup_icosphere(subdivisions, alternating_color)
                }
                _ => balloon.setup(self.rings, self.segments, alternating_color),
            };
            built.map_err(|error| SceneError::Balloon { index, error })?;
            balloons.push(balloon);
        }

        let Some((primary, surroundings)) = balloons.split_first_mut() else {
            return Err(SceneError::Empty);
        };

        let mut displaced = 0;
        for (offset, other) in surroundings.iter().enumerate() {
            let outcome = primary.deform(other).map_err(|error| SceneError::Balloon {
                index: offset + 1,
                error,
            })?;
            if let DeformOutcome::Applied { displaced: n, .. } = outcome {
                displaced += n;
            }
        }

        log::info!(
            "Scene built: {} balloons at {}x{}, {} primary vertex displacements",
            balloons.len(),
            self.rings,
            self.segments,
            displaced
        );

        Ok(Scene {
            balloons,
            object_style: self.object_style,
            surrounding_style: self.surrounding_style,
        })
    }
}

impl Scene {
    /// The deformed primary balloon.
    pub fn primary(&self) -> &Balloon {
        &self.balloons[0]
    }

    pub fn surroundings(&self) -> &[Balloon] {
        &self.balloons[1..]
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn object_style(&self) -> DrawStyle {
        self.object_style
    }

    pub fn surrounding_style(&self) -> DrawStyle {
        self.surrounding_style
    }

    /// Draw streams in draw order: primary first, then the surroundings.
    /// Balloons whose style is [`DrawStyle::None`] are skipped.
    pub fn draw_streams(&self) -> Result<Vec<DrawStream>, BalloonError> {
        let mut streams = Vec::new();
        streams.extend(draw_stream(self.primary(), self.object_style)?);
        for balloon in self.surroundings() {
            streams.extend(draw_stream(balloon, self.surrounding_style)?);
        }
        Ok(streams)
    }

    /// Bounds of the primary balloon's current shape.
    pub fn primary_bounds(&self) -> Result<BoundingSphere, BalloonError> {
        Ok(BoundingSphere::from_points(self.primary().points()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DegenerateReason;
    use glam::DVec3;

    #[test]
    fn test_only_primary_deforms() {
        let description = SceneDescription::parse("2 8 8 0 0 3 2 0 0 0 1 1 1.5 0 0 1 1").unwrap();
        let scene = description.build().unwrap();

        let max_x = scene
            .primary()
            .points()
            .unwrap()
            .iter()
            .fold(f64::MIN, |acc, v| acc.max(v.position.x));
        assert!((max_x - 0.75).abs() < 1e-6);

        let other = &scene.surroundings()[0];
        for v in other.points().unwrap() {
            let distance = (v.position - other.center()).length();
            assert!((distance - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_color_flags_per_role() {
        let description = SceneDescription::parse("2 4 4 1 0 3 3 0 0 0 1 1 5 0 0 1 1").unwrap();
        let scene = description.build().unwrap();
        let dark = |b: &Balloon| {
            b.points()
                .unwrap()
                .iter()
                .any(|v| v.color == crate::physics::geometry::CHECKER_DARK)
        };
        assert!(dark(scene.primary()));
        assert!(!dark(&scene.surroundings()[0]));
    }

    #[test]
    fn test_draw_streams_respect_styles() {
        let description = SceneDescription::parse("3 4 4 0 0 3 0 0 0 0 1 1 5 0 0 1 1 -5 0 0 1 1").unwrap();
        let scene = description.build().unwrap();
        let streams = scene.draw_streams().unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].len(), 3 * 32);

        let description = SceneDescription {
            surrounding_style: DrawStyle::Points,
            ..description
        };
        assert_eq!(description.build().unwrap().draw_streams().unwrap().len(), 3);
    }

    #[test]
    fn test_bad_balloon_reports_index() {
        let err = SceneDescription::parse("2 4 4 0 0 3 0 0 0 0 1 1 2 0 0 -1 1")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::Balloon {
                index: 1,
                error: BalloonError::InvalidArgument(_)
            }
        ));
    }

    #[test]
    fn test_coincident_surrounding_balloon() {
        let err = SceneDescription::parse("2 4 4 0 0 3 0 1 1 1 1 1 1 1 1 2 1")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::Balloon {
                index: 1,
                error: BalloonError::DegenerateGeometry {
                    reason: DegenerateReason::CoincidentCenters,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_icosphere_primary() {
        let mut description =
            SceneDescription::parse("2 8 8 0 0 3 2 0 0 0 1 1 1.5 0 0 1 1").unwrap();
        description.icosphere = Some(2);
        let scene = description.build().unwrap();

        assert_eq!(scene.primary().triangles().unwrap().len(), 320);
        assert_eq!(scene.surroundings()[0].triangles().unwrap().len(), 128);
        let max_x = scene
            .primary()
            .points()
            .unwrap()
            .iter()
            .fold(f64::MIN, |acc, v| acc.max(v.position.x));
        assert!((max_x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_oversized_icosphere_reports_primary() {
        let mut description = SceneDescription::parse("1 8 8 0 0 3 0 0 0 0 1 1").unwrap();
        description.icosphere = Some(12);
        assert!(matches!(
            description.build().unwrap_err(),
            SceneError::Balloon {
                index: 0,
                error: BalloonError::InvalidArgument(_)
            }
        ));
    }

    #[test]
    fn test_primary_bounds() {
        let description = SceneDescription::parse("1 8 8 0 0 3 0 1 0 0 2 1").unwrap();
        let bounds = description.build().unwrap().primary_bounds().unwrap();
        assert!((bounds.center - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-9);
        assert!((bounds.radius - 2.0).abs() < 1e-9);
    }
}
