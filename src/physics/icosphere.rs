//! Icosphere tessellation
//!
//! A regular icosahedron whose faces are split into four per subdivision
//! level. Vertices are projected onto the sphere once all levels are done.
//! Unlike the UV sphere there are no zero-area pole faces, and triangle sizes
//! stay close to uniform.

use std::collections::HashMap;

use glam::DVec3;

use super::error::BalloonError;
use super::geometry::{
    BalloonMesh, CHECKER_DARK, Triangle, Vertex, WHITE, bounded_triangle_count,
    validate_placement,
};

/// Faces of the base icosahedron, wound outward.
const BASE_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Corners of the base icosahedron: three orthogonal golden rectangles.
fn base_vertices() -> Vec<DVec3> {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    vec![
        DVec3::new(-1.0, t, 0.0),
        DVec3::new(1.0, t, 0.0),
        DVec3::new(-1.0, -t, 0.0),
        DVec3::new(1.0, -t, 0.0),
        DVec3::new(0.0, -1.0, t),
        DVec3::new(0.0, 1.0, t),
        DVec3::new(0.0, -1.0, -t),
        DVec3::new(0.0, 1.0, -t),
        DVec3::new(t, 0.0, -1.0),
        DVec3::new(t, 0.0, 1.0),
        DVec3::new(-t, 0.0, -1.0),
        DVec3::new(-t, 0.0, 1.0),
    ]
}

/// Index of the midpoint of edge (i, j), adding it on first use.
fn midpoint(
    vertices: &mut Vec<DVec3>,
    cache: &mut HashMap<(usize, usize), usize>,
    i: usize,
    j: usize,
) -> usize {
    *cache.entry((i.min(j), i.max(j))).or_insert_with(|| {
        vertices.push((vertices[i] + vertices[j]) * 0.5);
        vertices.len() - 1
    })
}

/// Generates subdivided icosahedron meshes.
///
/// Level `n` yields `20 * 4^n` triangles. Every triangle gets its own three
/// vertex copies, so the result plugs into deformation exactly like a UV
/// sphere.
#[derive(Debug, Clone, Copy)]
pub struct IcosphereBuilder {
    subdivisions: u32,
    alternating_color: bool,
}

impl IcosphereBuilder {
    /// Create a builder, rejecting levels whose mesh would exceed
    /// [`MAX_TRIANGLES`](super::geometry::MAX_TRIANGLES).
    pub fn new(subdivisions: u32) -> Result<Self, BalloonError> {
        bounded_triangle_count(
            4_usize
                .checked_pow(subdivisions)
                .and_then(|faces| faces.checked_mul(BASE_FACES.len())),
            || format!("icosphere with {} subdivisions", subdivisions),
        )?;
        Ok(Self {
            subdivisions,
            alternating_color: false,
        })
    }

    /// Darken every other face.
    pub fn with_alternating_color(mut self, enabled: bool) -> Self {
        self.alternating_color = enabled;
        self
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// Number of triangles `build` will emit.
    pub fn triangle_count(&self) -> usize {
        BASE_FACES.len() << (2 * self.subdivisions)
    }

    /// Build an icosphere of `radius` around `center`.
    pub fn build(&self, center: DVec3, radius: f64) -> Result<BalloonMesh, BalloonError> {
        validate_placement(center, radius)?;

        let mut vertices = base_vertices();
        let mut faces = BASE_FACES.to_vec();

        for _ in 0..self.subdivisions {
            let mut cache = HashMap::new();
            let mut split = Vec::with_capacity(faces.len() * 4);
            for [i, j, k] in faces {
                let ij = midpoint(&mut vertices, &mut cache, i, j);
                let jk = midpoint(&mut vertices, &mut cache, j, k);
                let ki = midpoint(&mut vertices, &mut cache, k, i);
                split.extend([[i, ij, ki], [j, jk, ij], [k, ki, jk], [ij, jk, ki]]);
            }
            faces = split;
        }

        let directions: Vec<DVec3> = vertices.iter().map(|v| v.normalize()).collect();

        let triangles = faces
            .iter()
            .enumerate()
            .map(|(index, face)| {
                let color = if self.alternating_color && index % 2 == 0 {
                    CHECKER_DARK
                } else {
                    WHITE
                };
                let corner = |i: usize| {
                    Vertex::new(center + directions[i] * radius, directions[i], color)
                };
                Triangle::new(corner(face[0]), corner(face[1]), corner(face[2]))
            })
            .collect();

        Ok(BalloonMesh::from_triangles(triangles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::geometry::MAX_TRIANGLES;

    const EPS: f64 = 1e-9;

    fn mesh(subdivisions: u32, center: DVec3, radius: f64) -> BalloonMesh {
        IcosphereBuilder::new(subdivisions)
            .unwrap()
            .build(center, radius)
            .unwrap()
    }

    #[test]
    fn test_triangle_counts() {
        for subdivisions in 0..4 {
            let builder = IcosphereBuilder::new(subdivisions).unwrap();
            let mesh = builder.build(DVec3::ZERO, 1.0).unwrap();
            let expected = 20 * 4_usize.pow(subdivisions);
            assert_eq!(builder.triangle_count(), expected);
            assert_eq!(mesh.triangle_count(), expected);
            assert_eq!(mesh.point_count(), 3 * expected);
        }
    }

    #[test]
    fn test_vertices_on_sphere() {
        let center = DVec3::new(-1.0, 2.0, 0.5);
        for v in mesh(3, center, 1.7).points() {
            let distance = (v.position - center).length();
            assert!(
                (distance - 1.7).abs() < EPS,
                "Vertex not on sphere: distance = {}",
                distance
            );
        }
    }

    #[test]
    fn test_normals_unit_and_outward() {
        let center = DVec3::new(0.0, -3.0, 1.0);
        let mesh = mesh(2, center, 0.6);
        for triangle in mesh.triangles() {
            for v in triangle.corners() {
                assert!((v.normal.length() - 1.0).abs() < EPS);
                assert!(v.normal.dot(v.position - center) > 0.0);
            }
            let face = triangle.face_normal().expect("icosphere faces have area");
            assert!(
                face.dot(triangle.centroid() - center) > 0.0,
                "face wound inward: {:?}",
                triangle
            );
        }
    }

    #[test]
    fn test_shared_edges_use_one_midpoint() {
        // A closed triangulation with F faces has F / 2 + 2 distinct vertices
        let mesh = mesh(2, DVec3::ZERO, 1.0);
        let mut distinct: Vec<[u64; 3]> = mesh
            .points()
            .iter()
            .map(|v| v.position.to_array().map(f64::to_bits))
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), mesh.triangle_count() / 2 + 2);
    }

    #[test]
    fn test_alternating_face_colors() {
        let plain = mesh(1, DVec3::ZERO, 1.0);
        assert!(plain.points().iter().all(|v| v.color == WHITE));

        let checker = IcosphereBuilder::new(1)
            .unwrap()
            .with_alternating_color(true)
            .build(DVec3::ZERO, 1.0)
            .unwrap();
        for (index, triangle) in checker.triangles().iter().enumerate() {
            let expected = if index % 2 == 0 { CHECKER_DARK } else { WHITE };
            assert_eq!(triangle.a.color, expected);
            assert_eq!(triangle.c.color, expected);
        }
    }

    #[test]
    fn test_subdivision_limit() {
        let deepest = IcosphereBuilder::new(8).unwrap();
        assert!(deepest.triangle_count() <= MAX_TRIANGLES);
        for subdivisions in [9, 40, u32::MAX] {
            assert!(matches!(
                IcosphereBuilder::new(subdivisions),
                Err(BalloonError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let builder = IcosphereBuilder::new(1).unwrap();
        assert!(matches!(
            builder.build(DVec3::ZERO, -1.0),
            Err(BalloonError::InvalidArgument(_))
        ));
    }
}
