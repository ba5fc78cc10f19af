//! Model-space vertex data.

use crate::error::BufferError;
use crate::math::{Vec2, Vec3};

/// A model-space position with texture coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            uv: Vec2::new(u, v),
        }
    }
}

/// A non-indexed triangle list: every consecutive triple is one triangle.
///
/// Vertices shared between triangles are duplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    /// Wraps a triangle list, rejecting a trailing partial triangle.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self, BufferError> {
        if vertices.len() % 3 != 0 {
            return Err(BufferError::IncompleteTriangle(vertices.len()));
        }
        Ok(Self { vertices })
    }

    /// Builds a buffer from whole triangles, which cannot leave a remainder.
    pub fn from_triangles<I: IntoIterator<Item = [Vertex; 3]>>(triangles: I) -> Self {
        Self {
            vertices: triangles.into_iter().flatten().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Iterates the triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [&tri[0], &tri[1], &tri[2]])
    }

    /// Converts source texture coordinates (V up) to the rasterizer's
    /// convention (V down) with `v = 1 - v`.
    ///
    /// Meant to be run once by the loader before the buffer is rendered.
    pub fn flip_v(&mut self) {
        for vertex in &mut self.vertices {
            vertex.uv.y = 1.0 - vertex.uv.y;
        }
    }
}
