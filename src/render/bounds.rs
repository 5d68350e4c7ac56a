//! Bounding sphere used to frame a balloon in view

use glam::DVec3;

use crate::physics::Vertex;

/// Sphere enclosing a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: 1.0,
        }
    }
}

impl BoundingSphere {
    /// Centre of the axis-aligned bounds, radius to the farthest point.
    ///
    /// An empty slice yields the unit sphere at the origin.
    pub fn from_points(points: &[Vertex]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let (min, max) = points
            .iter()
            .fold((first.position, first.position), |(min, max), v| {
                (min.min(v.position), max.max(v.position))
            });
        let center = (min + max) * 0.5;

        let radius = points
            .iter()
            .map(|v| v.position.distance_squared(center))
            .fold(0.0, f64::max)
            .sqrt();

        Self { center, radius }
    }

    /// Camera distance at which the sphere fills a vertical field of view.
    pub fn framing_distance(&self, fov_y: f64) -> f64 {
        self.radius / (fov_y * 0.5).sin()
    }
}
