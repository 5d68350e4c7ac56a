//! Balloon bodies: a positioned sphere with a pressure and an owned mesh.

use glam::DVec3;

use super::deform::{DeformOutcome, PairwiseDeformer};
use super::error::BalloonError;
use super::geometry::{BalloonMesh, SphereMeshBuilder, Triangle, Vertex, WHITE};
use super::icosphere::IcosphereBuilder;

/// A pressurised sphere that can be squashed by its neighbours.
///
/// The mesh only exists after [`Balloon::setup`]; until then every mesh
/// accessor reports [`BalloonError::NotReady`].
#[derive(Debug, Clone)]
pub struct Balloon {
    center: DVec3,
    color: [f64; 4],
    radius: f64,
    pressure: f64,
    mesh: Option<BalloonMesh>,
}

impl Balloon {
    /// Create an unbuilt balloon.
    ///
    /// `radius` must be positive and `pressure` non-negative, both finite.
    pub fn new(center: DVec3, radius: f64, pressure: f64) -> Result<Self, BalloonError> {
        if !center.is_finite() {
            return Err(BalloonError::invalid(format!(
                "center must be finite, got {}",
                center
            )));
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(BalloonError::invalid(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        if pressure < 0.0 || !pressure.is_finite() {
            return Err(BalloonError::invalid(format!(
                "pressure must be non-negative and finite, got {}",
                pressure
            )));
        }

        Ok(Self {
            center,
            color: WHITE,
            radius,
            pressure,
            mesh: None,
        })
    }

    /// Set the uniform body color.
    pub fn with_color(mut self, color: [f64; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn color(&self) -> [f64; 4] {
        self.color
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Whether [`Balloon::setup`] has completed.
    pub fn is_ready(&self) -> bool {
        self.mesh.is_some()
    }

    /// Tessellate the balloon. Calling this again discards any deformation.
    pub fn setup(
        &mut self,
        rings: u32,
        segments: u32,
        alternating_color: bool,
    ) -> Result<(), BalloonError> {
        let mesh = SphereMeshBuilder::new(rings, segments)?
            .with_alternating_color(alternating_color)
            .build(self.center, self.radius)?;
        self.install(mesh, "UV sphere");
        Ok(())
    }

    /// Tessellate the balloon as a subdivided icosahedron instead of a UV
    /// sphere. Calling this again discards any deformation.
    pub fn setup_icosphere(
        &mut self,
        subdivisions: u32,
        alternating_color: bool,
    ) -> Result<(), BalloonError> {
        let mesh = IcosphereBuilder::new(subdivisions)?
            .with_alternating_color(alternating_color)
            .build(self.center, self.radius)?;
        self.install(mesh, "icosphere");
        Ok(())
    }

    fn install(&mut self, mesh: BalloonMesh, kind: &str) {
        log::debug!(
            "Balloon at {} set up as {} with {} triangles",
            self.center,
            kind,
            mesh.triangle_count()
        );
        self.mesh = Some(mesh);
    }

    pub fn mesh(&self) -> Result<&BalloonMesh, BalloonError> {
        self.mesh.as_ref().ok_or(BalloonError::NotReady)
    }

    pub(crate) fn mesh_mut(&mut self) -> Result<&mut BalloonMesh, BalloonError> {
        self.mesh.as_mut().ok_or(BalloonError::NotReady)
    }

    pub fn triangles(&self) -> Result<&[Triangle], BalloonError> {
        self.mesh().map(BalloonMesh::triangles)
    }

    /// Flat point list in (A, B, C) triangle order.
    pub fn points(&self) -> Result<&[Vertex], BalloonError> {
        self.mesh().map(BalloonMesh::points)
    }

    /// Push this balloon's vertices out of `other`. `other` is not modified.
    pub fn deform(&mut self, other: &Balloon) -> Result<DeformOutcome, BalloonError> {
        PairwiseDeformer::default().deform(self, other)
    }
}
