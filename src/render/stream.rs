//! Draw streams handed to a renderer
//!
//! A renderer consumes a balloon as an ordered list of (position, normal,
//! color) triples. The draw style picks the primitive topology and the order
//! in which triangle corners are emitted.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::physics::{Balloon, BalloonError, Vertex};

/// How a balloon is drawn. Numeric codes match the scene file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStyle {
    /// Not drawn at all
    #[default]
    None,
    /// Every corner as a point
    Points,
    /// Three edges per triangle
    Wireframe,
    /// Filled triangles
    Filled,
}

impl DrawStyle {
    /// Scene-file code for this style.
    pub fn code(self) -> u8 {
        match self {
            DrawStyle::None => 0,
            DrawStyle::Points => 1,
            DrawStyle::Wireframe => 2,
            DrawStyle::Filled => 3,
        }
    }
}

impl TryFrom<i64> for DrawStyle {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DrawStyle::None),
            1 => Ok(DrawStyle::Points),
            2 => Ok(DrawStyle::Wireframe),
            3 => Ok(DrawStyle::Filled),
            other => Err(other),
        }
    }
}

/// Primitive assembly mode of a [`DrawStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    PointList,
    LineList,
    TriangleList,
}

/// Vertex layout for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl From<&Vertex> for PackedVertex {
    fn from(vertex: &Vertex) -> Self {
        Self {
            position: vertex.position.as_vec3().to_array(),
            normal: vertex.normal.as_vec3().to_array(),
            color: vertex.color.map(|channel| channel as f32),
        }
    }
}

/// Ordered vertices plus the topology they should be assembled with.
#[derive(Debug, Clone)]
pub struct DrawStream {
    pub topology: Topology,
    pub vertices: Vec<PackedVertex>,
}

impl DrawStream {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as bytes for GPU buffer creation
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Build the stream for `balloon` in `style`; `None` when nothing is drawn.
pub fn draw_stream(
    balloon: &Balloon,
    style: DrawStyle,
) -> Result<Option<DrawStream>, BalloonError> {
    let mesh = balloon.mesh()?;

    let stream = match style {
        DrawStyle::None => return Ok(None),
        DrawStyle::Points => DrawStream {
            topology: Topology::PointList,
            vertices: mesh.points().iter().map(PackedVertex::from).collect(),
        },
        DrawStyle::Wireframe => DrawStream {
            topology: Topology::LineList,
            vertices: mesh
                .triangles()
                .iter()
                .flat_map(|t| [&t.a, &t.b, &t.a, &t.c, &t.b, &t.c])
                .map(PackedVertex::from)
                .collect(),
        },
        DrawStyle::Filled => DrawStream {
            topology: Topology::TriangleList,
            vertices: mesh.points().iter().map(PackedVertex::from).collect(),
        },
    };

    Ok(Some(stream))
}
