//! Pairwise squash deformation between two balloons.
//!
//! Every vertex of the target that lies strictly inside the other balloon is
//! pushed along the line of centres (from the other centre toward the target
//! centre) until it would reach the other balloon's surface, scaled by the
//! other balloon's share of the total pressure:
//!
//! ```text
//! I  = V + t (C_self - C_other),  |I - C_other| = R_other,  t > 0
//! V' = V + (I - V) * P_other / (P_self + P_other)
//! ```
//!
//! Afterwards every triangle gets a single face normal on all three corners.
//! This is a one-shot projection, not a simulation step.

use glam::DVec3;

use super::balloon::Balloon;
use super::error::{BalloonError, DegenerateReason};
use super::geometry::Triangle;

/// Result of a successful [`PairwiseDeformer::deform`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeformOutcome {
    /// Both pressures are zero; the mesh was left untouched.
    NoInteraction,
    /// The mesh was rewritten.
    Applied {
        /// Vertices that were inside the other balloon and got pushed
        displaced: usize,
        /// Vertices examined (three per triangle)
        examined: usize,
    },
}

/// Applies the squash of one balloon against another.
///
/// With the `parallel` feature, triangles are resolved on the rayon pool.
/// The flat point list is rebuilt only once every triangle is resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseDeformer;

impl PairwiseDeformer {
    pub fn new() -> Self {
        Self
    }

    /// Deform `target` against `other`.
    ///
    /// Only `target` must be set up. `other` contributes its center, radius
    /// and pressure, so an unbuilt `other` is accepted.
    ///
    /// On error `target` is left exactly as it was.
    pub fn deform(
        &self,
        target: &mut Balloon,
        other: &Balloon,
    ) -> Result<DeformOutcome, BalloonError> {
        let body_center = target.center();
        let total_pressure = target.pressure() + other.pressure();
        let mesh = target.mesh_mut()?;

        if total_pressure == 0.0 {
            log::debug!("Zero total pressure, skipping deformation");
            return Ok(DeformOutcome::NoInteraction);
        }

        let push = Push::new(body_center, other, other.pressure() / total_pressure)?;

        let resolved = resolve_all(&push, mesh.triangles())?;
        let (triangles, moved): (Vec<Triangle>, Vec<usize>) = resolved.into_iter().unzip();
        let displaced: usize = moved.iter().sum();
        let examined = 3 * triangles.len();

        mesh.replace_triangles(&triangles);

        log::debug!(
            "Deformed balloon at {} against {}: {}/{} vertices displaced",
            body_center,
            other.center(),
            displaced,
            examined
        );

        Ok(DeformOutcome::Applied {
            displaced,
            examined,
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn resolve_all(
    push: &Push,
    triangles: &[Triangle],
) -> Result<Vec<(Triangle, usize)>, BalloonError> {
    triangles
        .iter()
        .enumerate()
        .map(|(index, triangle)| push.resolve(index, triangle))
        .collect()
}

#[cfg(feature = "parallel")]
fn resolve_all(
    push: &Push,
    triangles: &[Triangle],
) -> Result<Vec<(Triangle, usize)>, BalloonError> {
    use rayon::prelude::*;

    triangles
        .par_iter()
        .enumerate()
        .map(|(index, triangle)| push.resolve(index, triangle))
        .collect()
}

/// Precomputed per-pair quantities shared by every vertex.
#[derive(Debug, Clone, Copy)]
struct Push {
    body_center: DVec3,
    other_center: DVec3,
    other_radius: f64,
    /// `C_self - C_other`
    direction: DVec3,
    /// `|direction|^2`, the quadratic's leading coefficient
    a: f64,
    /// Fraction of the way toward the intersection a vertex travels
    weight: f64,
}

impl Push {
    fn new(body_center: DVec3, other: &Balloon, weight: f64) -> Result<Self, BalloonError> {
        let direction = body_center - other.center();
        let a = direction.length_squared();
        if a == 0.0 {
            return Err(BalloonError::DegenerateGeometry {
                triangle: None,
                reason: DegenerateReason::CoincidentCenters,
            });
        }
        Ok(Self {
            body_center,
            other_center: other.center(),
            other_radius: other.radius(),
            direction,
            a,
            weight,
        })
    }

    /// New position for `point`, or `None` when it is not inside the other balloon.
    ///
    /// For a finite point strictly inside, `c < 0` makes the discriminant
    /// positive and the two roots opposite in sign, so both error branches
    /// only fire on non-finite input or inconsistent coefficients.
    fn displace(&self, point: DVec3) -> Result<Option<DVec3>, DegenerateReason> {
        let offset = point - self.other_center;
        if offset.length() >= self.other_radius {
            return Ok(None);
        }

        // a t^2 + 2 b t + c = 0
        let b = self.direction.dot(offset);
        let c = offset.length_squared() - self.other_radius * self.other_radius;
        let discriminant = b * b - self.a * c;
        if discriminant < 0.0 {
            return Err(DegenerateReason::NegativeDiscriminant);
        }

        let root = discriminant.sqrt();
        let far = (root - b) / self.a;
        let near = (-root - b) / self.a;
        let t = [far, near]
            .into_iter()
            .find(|t| *t > 0.0)
            .ok_or(DegenerateReason::NoForwardIntersection)?;

        let intersection = point + self.direction * t;
        Ok(Some(point.lerp(intersection, self.weight)))
    }

    /// Displace the corners of one triangle and give it a face normal.
    fn resolve(
        &self,
        index: usize,
        triangle: &Triangle,
    ) -> Result<(Triangle, usize), BalloonError> {
        let mut resolved = *triangle;
        let mut moved = 0;

        for corner in [&mut resolved.a, &mut resolved.b, &mut resolved.c] {
            let displaced = self
                .displace(corner.position)
                .map_err(|reason| BalloonError::DegenerateGeometry {
                    triangle: Some(index),
                    reason,
                })?;
            if let Some(position) = displaced {
                corner.position = position;
                moved += 1;
            }
        }

        // Pole triangles have zero area; point them away from the body instead.
        let normal = resolved
            .face_normal()
            .or_else(|| (resolved.centroid() - self.body_center).try_normalize())
            .unwrap_or(triangle.a.normal);
        resolved.set_normal(normal);

        Ok((resolved, moved))
    }
}
