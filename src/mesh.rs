//! Built-in demo mesh.

use crate::math::{Vec2, Vec3};
use crate::vertex::{Vertex, VertexBuffer};

pub const CUBE_NUM_CORNERS: usize = 8;
pub const CUBE_NUM_FACES: usize = 12;

/// Corners of the unit cube `[-1, 1]^3`.
pub const CUBE_CORNERS: [Vec3; CUBE_NUM_CORNERS] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Triangles as indices into [`CUBE_CORNERS`]. Each side is a quad
/// `(a, b, c, d)` split into `(a, b, c)` and `(a, c, d)`.
pub const CUBE_FACES: [[usize; 3]; CUBE_NUM_FACES] = [
    // Front
    [0, 1, 2],
    [0, 2, 3],
    // Right
    [3, 2, 4],
    [3, 4, 5],
    // Back
    [5, 4, 6],
    [5, 6, 7],
    // Left
    [7, 6, 1],
    [7, 1, 0],
    // Top
    [1, 6, 4],
    [1, 4, 2],
    // Bottom
    [5, 7, 0],
    [5, 0, 3],
];

/// Texture coordinates (V down) for the two triangles of each side.
const QUAD_UVS: [[Vec2; 3]; 2] = [
    [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
    [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
];

/// A cube centered on the origin with the full texture on every side.
pub fn cube(half_extent: f32) -> VertexBuffer {
    VertexBuffer::from_triangles(CUBE_FACES.iter().enumerate().map(|(i, face)| {
        let uvs = &QUAD_UVS[i % 2];
        std::array::from_fn(|k| Vertex {
            position: CUBE_CORNERS[face[k]] * half_extent,
            uv: uvs[k],
        })
    }))
}
