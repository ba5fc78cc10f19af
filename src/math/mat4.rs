//! 4x4 transformation matrix using row-major storage and row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `p' = p * M`
//! - Translation is stored in the **last row** (elements 12, 13, 14)
//! - Transforms chain **left-to-right**: `v * (A * B)` applies A first, then B
//!
//! # Example
//! ```ignore
//! let model = scale * rotation;            // scale applied first, then rotation
//! let mvp = model * view * projection;     // model, then view, then projection
//! let clip = Vec4::point(x, y, z) * mvp;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`; flat element `i` is `data[i / 4][i % 4]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    /// Builds a matrix from 16 row-major floats.
    pub fn from_array(values: [f32; 16]) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (i, value) in values.into_iter().enumerate() {
            data[i / 4][i % 4] = value;
        }
        Mat4 { data }
    }

    /// Returns the 16 row-major floats.
    pub fn to_array(&self) -> [f32; 16] {
        let mut values = [0.0f32; 16];
        for (i, value) in values.iter_mut().enumerate() {
            *value = self.data[i / 4][i % 4];
        }
        values
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last row (row-vector convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation about an arbitrary axis using Rodrigues' formula.
    ///
    /// The angle is negated before use, so with the row-vector convention a
    /// positive angle about +Y carries +X to -Z. The axis must already be
    /// normalized; it is used as given.
    pub fn rotation(axis: Vec3, angle: f32) -> Self {
        let c = (-angle).cos();
        let s = (-angle).sin();
        let t = 1.0 - c;
        let Vec3 { x, y, z } = axis;

        Mat4::new([
            [c + t * x * x, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * y * x + s * z, c + t * y * y, t * y * z - s * x, 0.0],
            [t * z * x - s * y, t * z * y + s * x, c + t * z * z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the perspective projection matrix.
    ///
    /// `w` receives `-z` of the input point and post-divide depth grows as the
    /// point gets closer, which is what the depth test relies on.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let scale = 1.0 / (fov_y / 2.0).tan();
        let depth = far - near;
        Mat4::new([
            [scale / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, scale, 0.0, 0.0],
            [0.0, 0.0, -far / depth, -1.0],
            [0.0, 0.0, -far * near / depth, 0.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For row-vector convention, `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, value) in out.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a row vector: Vec4 * Mat4.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        let d = &m.data;
        Vec4::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + self.w * d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + self.w * d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + self.w * d[3][2],
            self.x * d[0][3] + self.y * d[1][3] + self.z * d[2][3] + self.w * d[3][3],
        )
    }
}
