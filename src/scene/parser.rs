//! Scene description text format
//!
//! The file is a stream of whitespace-separated numbers; line breaks carry no
//! meaning:
//!
//! ```text
//! count rings segments object_color surrounding_color
//! object_style surrounding_style
//! x y z radius pressure        (count times)
//! ```
//!
//! The first balloon is the primary object, every other one surrounds it.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::SceneError;
use crate::physics::{BalloonError, SphereMeshBuilder};
use crate::render::DrawStyle;

/// Position, size and pressure of one balloon in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalloonPlacement {
    pub center: DVec3,
    pub radius: f64,
    pub pressure: f64,
}

/// A parsed, not yet built scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    /// Latitude subdivisions shared by every balloon
    pub rings: u32,
    /// Longitude subdivisions shared by every balloon
    pub segments: u32,
    /// Checkerboard coloring for the primary balloon
    pub object_color: bool,
    /// Checkerboard coloring for the surrounding balloons
    pub surrounding_color: bool,
    pub object_style: DrawStyle,
    pub surrounding_style: DrawStyle,
    /// Icosphere subdivisions for the primary balloon; `None` keeps the UV
    /// sphere. Not part of the text format.
    pub icosphere: Option<u32>,
    /// Primary balloon first
    pub balloons: Vec<BalloonPlacement>,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next_raw(&mut self, field: &'static str) -> Result<&'a str, SceneError> {
        self.inner.next().ok_or(SceneError::MissingToken { field })
    }

    fn next_int(&mut self, field: &'static str) -> Result<i64, SceneError> {
        let token = self.next_raw(field)?;
        token.parse().map_err(|_| SceneError::InvalidToken {
            field,
            token: token.to_string(),
        })
    }

    fn next_float(&mut self, field: &'static str) -> Result<f64, SceneError> {
        let token = self.next_raw(field)?;
        token.parse().map_err(|_| SceneError::InvalidToken {
            field,
            token: token.to_string(),
        })
    }

    fn next_style(&mut self, field: &'static str) -> Result<DrawStyle, SceneError> {
        let code = self.next_int(field)?;
        DrawStyle::try_from(code).map_err(|code| SceneError::InvalidStyle { field, code })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

fn resolution(value: i64, field: &'static str) -> Result<u32, SceneError> {
    u32::try_from(value).map_err(|_| {
        SceneError::Mesh(BalloonError::InvalidArgument(format!(
            "{} must be a positive count, got {}",
            field, value
        )))
    })
}

impl SceneDescription {
    /// Parse scene text.
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let mut tokens = Tokens::new(text);

        let count = tokens.next_int("balloon count")?;
        let rings = tokens.next_int("ring count")?;
        let segments = tokens.next_int("segment count")?;
        let object_color = tokens.next_int("object color flag")? != 0;
        let surrounding_color = tokens.next_int("surrounding color flag")? != 0;
        let object_style = tokens.next_style("object style")?;
        let surrounding_style = tokens.next_style("surrounding style")?;

        let count = usize::try_from(count).map_err(|_| SceneError::InvalidToken {
            field: "balloon count",
            token: count.to_string(),
        })?;
        if count == 0 {
            return Err(SceneError::Empty);
        }

        let rings = resolution(rings, "ring count")?;
        let segments = resolution(segments, "segment count")?;
        SphereMeshBuilder::new(rings, segments).map_err(SceneError::Mesh)?;

        // The count is untrusted; grow as balloons are actually read
        let mut balloons = Vec::new();
        for _ in 0..count {
            let x = tokens.next_float("x")?;
            let y = tokens.next_float("y")?;
            let z = tokens.next_float("z")?;
            let radius = tokens.next_float("radius")?;
            let pressure = tokens.next_float("pressure")?;
            balloons.push(BalloonPlacement {
                center: DVec3::new(x, y, z),
                radius,
                pressure,
            });
        }

        let trailing = tokens.remaining();
        if trailing > 0 {
            log::warn!("Ignoring {} trailing tokens in scene description", trailing);
        }

        Ok(Self {
            rings,
            segments,
            object_color,
            surrounding_color,
            object_style,
            surrounding_style,
            icosphere: None,
            balloons,
        })
    }

    /// Read and parse a scene file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| SceneError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        Self::parse(&contents)
    }

    /// Render back to the text format.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {} {}\n{} {}\n",
            self.balloons.len(),
            self.rings,
            self.segments,
            u8::from(self.object_color),
            u8::from(self.surrounding_color),
            self.object_style.code(),
            self.surrounding_style.code(),
        );
        for b in &self.balloons {
            text.push_str(&format!(
                "{} {} {} {} {}\n",
                b.center.x, b.center.y, b.center.z, b.radius, b.pressure
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BALLOONS: &str = "2 8 8 1 0\n3 2\n0 0 0 1 1\n1.5 0 0 1 1\n";

    #[test]
    fn test_parse_two_balloons() {
        let scene = SceneDescription::parse(TWO_BALLOONS).unwrap();
        assert_eq!(scene.rings, 8);
        assert_eq!(scene.segments, 8);
        assert!(scene.object_color);
        assert!(!scene.surrounding_color);
        assert_eq!(scene.object_style, DrawStyle::Filled);
        assert_eq!(scene.surrounding_style, DrawStyle::Wireframe);
        assert_eq!(scene.balloons.len(), 2);
        assert_eq!(scene.balloons[1].center, DVec3::new(1.5, 0.0, 0.0));
        assert!((scene.balloons[1].pressure - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_breaks_do_not_matter() {
        let flat = TWO_BALLOONS.replace('\n', " ");
        assert_eq!(
            SceneDescription::parse(&flat).unwrap(),
            SceneDescription::parse(TWO_BALLOONS).unwrap()
        );
    }

    #[test]
    fn test_missing_balloon_values() {
        let err = SceneDescription::parse("2 8 8 0 0 3 0 0 0 0 1 1 1.5 0 0").unwrap_err();
        assert!(matches!(err, SceneError::MissingToken { field: "radius" }));
    }

    #[test]
    fn test_bad_token() {
        let err = SceneDescription::parse("1 8 eight 0 0 3 0 0 0 0 1 1").unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidToken {
                field: "segment count",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_scene() {
        assert!(matches!(
            SceneDescription::parse("0 8 8 0 0 3 0").unwrap_err(),
            SceneError::Empty
        ));
        assert!(matches!(
            SceneDescription::parse("").unwrap_err(),
            SceneError::MissingToken {
                field: "balloon count"
            }
        ));
    }

    #[test]
    fn test_invalid_resolution() {
        for text in ["1 0 8 0 0 3 0 0 0 0 1 1", "1 8 -4 0 0 3 0 0 0 0 1 1"] {
            assert!(matches!(
                SceneDescription::parse(text).unwrap_err(),
                SceneError::Mesh(BalloonError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_huge_balloon_count_is_an_error() {
        let err = SceneDescription::parse("1000000000000000000 8 8 0 0 3 0 0 0 0 1 1").unwrap_err();
        assert!(matches!(err, SceneError::MissingToken { field: "x" }));
    }

    #[test]
    fn test_huge_resolution_is_an_error() {
        for text in [
            "1 4294967295 4294967295 0 0 3 0 0 0 0 1 1",
            "1 4096 4096 0 0 3 0 0 0 0 1 1",
            "1 4294967296 8 0 0 3 0 0 0 0 1 1",
        ] {
            assert!(
                matches!(
                    SceneDescription::parse(text).unwrap_err(),
                    SceneError::Mesh(BalloonError::InvalidArgument(_))
                ),
                "accepted: {}",
                text
            );
        }
    }

    #[test]
    fn test_invalid_style() {
        let err = SceneDescription::parse("1 8 8 0 0 7 0 0 0 0 1 1").unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidStyle {
                field: "object style",
                code: 7
            }
        ));
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let scene = SceneDescription::parse("1 4 4 0 0 3 0 0 0 0 1 1 99 98").unwrap();
        assert_eq!(scene.balloons.len(), 1);
    }

    #[test]
    fn test_text_roundtrip() {
        let scene = SceneDescription::parse(TWO_BALLOONS).unwrap();
        assert_eq!(SceneDescription::parse(&scene.to_text()).unwrap(), scene);
    }

    #[test]
    fn test_missing_file() {
        let err = SceneDescription::from_file("/nonexistent/scene.bal").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
