//! Triangle rasterization.
//!
//! The rasterizer walks a screen-space triangle and hands every covered pixel
//! to a [`PixelSink`] together with its barycentric weights. What happens to
//! the pixel (depth test, texturing, recording in a test) is the sink's
//! business, the same split a GPU makes between fixed-function rasterization
//! and the fragment stage.
//!
//! # Sampling convention
//!
//! Vertices are snapped to integer pixel coordinates. Scanline `y` is sampled
//! exactly at `y`; within a scanline, pixel `x` covers the half-open interval
//! `[x, x + 1)` and is drawn when the edge crossings bracket it.

#[cfg(test)]
pub(crate) mod reference;
mod scanline;

pub use scanline::ScanlineRasterizer;

use crate::error::RasterError;

/// A vertex after transform: integer pixel position, post-divide depth and
/// the untouched texture coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterizedVertex {
    pub x: i32,
    pub y: i32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
}

impl RasterizedVertex {
    pub const fn new(x: i32, y: i32, z: f32, u: f32, v: f32) -> Self {
        Self { x, y, z, u, v }
    }
}

/// One of the three vertices of a [`RasterizedTriangle`], in sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    A = 0,
    B = 1,
    C = 2,
}

impl Corner {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The two corners that are not `self`.
    #[inline]
    pub const fn others(self) -> [Corner; 2] {
        match self {
            Corner::A => [Corner::B, Corner::C],
            Corner::B => [Corner::A, Corner::C],
            Corner::C => [Corner::A, Corner::B],
        }
    }
}

/// A triangle in screen space with `a.y <= b.y <= c.y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterizedTriangle {
    pub a: RasterizedVertex,
    pub b: RasterizedVertex,
    pub c: RasterizedVertex,
}

impl RasterizedTriangle {
    /// Builds a triangle and orders its vertices by ascending Y.
    ///
    /// Three compare-and-swaps; vertices with equal Y keep whatever order the
    /// network leaves them in.
    pub fn sorted(
        mut a: RasterizedVertex,
        mut b: RasterizedVertex,
        mut c: RasterizedVertex,
    ) -> Self {
        if a.y > b.y {
            std::mem::swap(&mut a, &mut b);
        }
        if b.y > c.y {
            std::mem::swap(&mut b, &mut c);
        }
        if a.y > b.y {
            std::mem::swap(&mut a, &mut b);
        }
        Self { a, b, c }
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.a.y <= self.b.y && self.b.y <= self.c.y
    }

    #[inline]
    pub fn vertex(&self, corner: Corner) -> &RasterizedVertex {
        match corner {
            Corner::A => &self.a,
            Corner::B => &self.b,
            Corner::C => &self.c,
        }
    }

    /// Twice the signed screen-space area. Zero for collinear vertices.
    ///
    /// Each product spans up to 66 bits for vertices saturated at the `i32`
    /// limits, hence `i128`.
    #[inline]
    pub fn double_area(&self) -> i128 {
        let (ax, ay) = (self.a.x as i128, self.a.y as i128);
        (self.b.x as i128 - ax) * (self.c.y as i128 - ay)
            - (self.c.x as i128 - ax) * (self.b.y as i128 - ay)
    }

    /// Blend a per-vertex attribute with barycentric weights `(ba, bb, bc)`.
    #[inline]
    pub fn interpolate(&self, lambda: [f32; 3], attr: impl Fn(&RasterizedVertex) -> f32) -> f32 {
        attr(&self.a) * lambda[0] + attr(&self.b) * lambda[1] + attr(&self.c) * lambda[2]
    }
}

/// Receives the pixels a rasterizer covers.
pub trait PixelSink {
    /// Called once per covered pixel with weights for `(a, b, c)`.
    fn plot(&mut self, x: i32, y: i32, lambda: [f32; 3]);

    /// Width and height of the target, if spans should be clipped to it.
    ///
    /// Clipping only skips work; a sink must still tolerate any coordinate.
    fn extent(&self) -> Option<(u32, u32)> {
        None
    }
}

/// Trait for triangle rasterization algorithms.
pub trait Rasterizer {
    /// Emit every pixel covered by `triangle` into `sink`.
    ///
    /// The triangle must be sorted by Y. Triangles with zero area are
    /// rejected with [`RasterError::DegenerateTriangle`] before any division.
    fn fill_triangle<S: PixelSink>(
        &self,
        triangle: &RasterizedTriangle,
        sink: &mut S,
    ) -> Result<(), RasterError>;
}
