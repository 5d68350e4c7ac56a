//! UV-sphere mesh generation for balloon rendering and deformation
//!
//! Balloons are stored as a flat, non-indexed triangle list: every triangle owns
//! three independent vertex copies, so neighbouring faces never share normals.
//! The flat point list is a cached projection of those triangles in (A, B, C)
//! traversal order.

use glam::DVec3;
use std::f64::consts::PI;

use super::error::BalloonError;

/// Opaque white, the default vertex color
pub const WHITE: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

/// Darkened checkerboard cell (red and green channels at 0.2)
pub const CHECKER_DARK: [f64; 4] = [0.2, 0.2, 1.0, 1.0];

/// Largest triangle count a single balloon mesh may have
pub const MAX_TRIANGLES: usize = 1 << 21;

/// Reject a tessellation whose triangle count overflowed or exceeds [`MAX_TRIANGLES`].
pub(crate) fn bounded_triangle_count(
    count: Option<usize>,
    what: impl FnOnce() -> String,
) -> Result<usize, BalloonError> {
    count.filter(|&n| n <= MAX_TRIANGLES).ok_or_else(|| {
        BalloonError::invalid(format!(
            "{} exceeds {} triangles",
            what(),
            MAX_TRIANGLES
        ))
    })
}

/// Radius and center checks shared by the mesh builders.
pub(crate) fn validate_placement(center: DVec3, radius: f64) -> Result<(), BalloonError> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(BalloonError::invalid(format!(
            "radius must be positive and finite, got {}",
            radius
        )));
    }
    if !center.is_finite() {
        return Err(BalloonError::invalid("center must be finite"));
    }
    Ok(())
}

/// A single mesh corner with position, normal and RGBA color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Position in world space
    pub position: DVec3,
    /// Unit surface normal
    pub normal: DVec3,
    /// RGBA color, each channel in [0, 1]
    pub color: [f64; 4],
}

impl Vertex {
    /// Create a vertex; the normal is stored as given.
    pub fn new(position: DVec3, normal: DVec3, color: [f64; 4]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

/// One face of a balloon mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    /// Corners in (A, B, C) order.
    pub fn corners(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit normal of `(B - A) x (C - A)`, or `None` for a zero-area face.
    pub fn face_normal(&self) -> Option<DVec3> {
        (self.b.position - self.a.position)
            .cross(self.c.position - self.a.position)
            .try_normalize()
    }

    pub fn centroid(&self) -> DVec3 {
        (self.a.position + self.b.position + self.c.position) / 3.0
    }

    /// Assign the same normal to all three corners.
    pub fn set_normal(&mut self, normal: DVec3) {
        self.a.normal = normal;
        self.b.normal = normal;
        self.c.normal = normal;
    }
}

/// Flatten triangles into the (A, B, C) point list.
pub fn flatten_triangles(triangles: &[Triangle]) -> Vec<Vertex> {
    triangles.iter().flat_map(Triangle::corners).collect()
}

/// Triangle storage of a built balloon together with its flat point list.
///
/// The point list is only ever rebuilt from the triangles, so the two views
/// cannot drift apart.
#[derive(Debug, Clone)]
pub struct BalloonMesh {
    triangles: Vec<Triangle>,
    points: Vec<Vertex>,
}

impl BalloonMesh {
    /// Wrap a triangle list and derive its point list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let points = flatten_triangles(&triangles);
        Self { triangles, points }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Flat point list, three entries per triangle.
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Overwrite every triangle in place, then rebuild the point list.
    ///
    /// `updated` must have the same length as the current triangle list.
    pub(crate) fn replace_triangles(&mut self, updated: &[Triangle]) {
        debug_assert_eq!(updated.len(), self.triangles.len());
        self.triangles.copy_from_slice(updated);
        self.points = flatten_triangles(&self.triangles);
    }
}

/// Generates closed UV-sphere meshes.
///
/// Rings subdivide the colatitude range `[0, PI]`, segments subdivide the
/// longitude range `[0, 2 PI)`. Each (ring, segment) cell yields two triangles.
#[derive(Debug, Clone, Copy)]
pub struct SphereMeshBuilder {
    rings: u32,
    segments: u32,
    alternating_color: bool,
}

impl SphereMeshBuilder {
    /// Create a builder, rejecting zero resolution and meshes larger than
    /// [`MAX_TRIANGLES`].
    pub fn new(rings: u32, segments: u32) -> Result<Self, BalloonError> {
        if rings == 0 {
            return Err(BalloonError::invalid("ring count must be at least 1"));
        }
        if segments == 0 {
            return Err(BalloonError::invalid("segment count must be at least 1"));
        }
        bounded_triangle_count(
            (rings as usize)
                .checked_mul(segments as usize)
                .and_then(|cells| cells.checked_mul(2)),
            || format!("{}x{} sphere", rings, segments),
        )?;
        Ok(Self {
            rings,
            segments,
            alternating_color: false,
        })
    }

    /// Enable the checkerboard coloring.
    pub fn with_alternating_color(mut self, enabled: bool) -> Self {
        self.alternating_color = enabled;
        self
    }

    pub fn rings(&self) -> u32 {
        self.rings
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Number of triangles `build` will emit.
    pub fn triangle_count(&self) -> usize {
        2 * self.rings as usize * self.segments as usize
    }

    /// Build a sphere of `radius` around `center`.
    pub fn build(&self, center: DVec3, radius: f64) -> Result<BalloonMesh, BalloonError> {
        validate_placement(center, radius)?;

        let mut triangles = Vec::with_capacity(self.triangle_count());

        for ring in 1..=self.rings {
            for segment in 0..self.segments {
                let color = self.cell_color(ring, segment);
                let point = |r: u32, s: u32| self.sphere_point(center, radius, r, s, color);

                let a = point(ring, segment);
                let b = point(ring - 1, segment);
                let c = point(ring, segment + 1);
                let d = point(ring - 1, segment + 1);

                // (A, C, B) and (C, D, B) wind outward
                triangles.push(Triangle::new(a, c, b));
                triangles.push(Triangle::new(c, d, b));
            }
        }

        Ok(BalloonMesh::from_triangles(triangles))
    }

    fn cell_color(&self, ring: u32, segment: u32) -> [f64; 4] {
        if self.alternating_color && segment % 2 == ring % 2 {
            CHECKER_DARK
        } else {
            WHITE
        }
    }

    fn sphere_point(
        &self,
        center: DVec3,
        radius: f64,
        ring: u32,
        segment: u32,
        color: [f64; 4],
    ) -> Vertex {
        let colatitude = PI * ring as f64 / self.rings as f64;
        let longitude = 2.0 * PI * segment as f64 / self.segments as f64;

        let y = radius * colatitude.cos();
        let horizontal = (radius * radius - y * y).max(0.0).sqrt();
        let local = DVec3::new(horizontal * longitude.sin(), y, horizontal * longitude.cos());

        Vertex::new(center + local, local / radius, color)
    }
}
