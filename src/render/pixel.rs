//! Pixel stage: depth test, texture lookup and framebuffer write.

use super::framebuffer::DepthColorBuffer;
use super::rasterizer::{PixelSink, RasterizedTriangle};
use crate::texture::{ColorBuffer, TextureAddress};

/// Textures the pixels of one triangle at a time into a [`DepthColorBuffer`].
///
/// Bind a triangle with [`bind`](Self::bind), then let a rasterizer feed it
/// pixels. For each pixel the stage:
///
/// 1. ignores coordinates outside the framebuffer,
/// 2. interpolates depth from the barycentric weights,
/// 3. continues only if that depth is strictly greater than the stored one,
/// 4. interpolates (u, v) and samples the texture,
/// 5. writes the texel and the depth.
pub struct TexturedPixelStage<'a> {
    texture: &'a ColorBuffer,
    target: &'a mut DepthColorBuffer,
    address: TextureAddress,
    triangle: RasterizedTriangle,
    written: usize,
}

impl<'a> TexturedPixelStage<'a> {
    pub fn new(
        texture: &'a ColorBuffer,
        target: &'a mut DepthColorBuffer,
        address: TextureAddress,
    ) -> Self {
        Self {
            texture,
            target,
            address,
            triangle: RasterizedTriangle::default(),
            written: 0,
        }
    }

    /// Set the triangle whose attributes subsequent pixels interpolate.
    #[inline]
    pub fn bind(&mut self, triangle: RasterizedTriangle) {
        self.triangle = triangle;
    }

    /// Number of pixels that passed the depth test so far.
    pub fn pixels_written(&self) -> usize {
        self.written
    }

    /// Shade one pixel. Returns whether it was written.
    #[inline]
    pub fn shade(&mut self, x: i32, y: i32, lambda: [f32; 3]) -> bool {
        let tri = &self.triangle;
        let z = tri.interpolate(lambda, |v| v.z);
        if !self.target.passes_depth(x, y, z) {
            return false;
        }

        let u = tri.interpolate(lambda, |v| v.u);
        let v = tri.interpolate(lambda, |v| v.v);
        let color = self.texture.sample(u, v, self.address);
        self.target.write(x, y, z, color);
        self.written += 1;
        true
    }
}

impl PixelSink for TexturedPixelStage<'_> {
    #[inline]
    fn plot(&mut self, x: i32, y: i32, lambda: [f32; 3]) {
        self.shade(x, y, lambda);
    }

    fn extent(&self) -> Option<(u32, u32)> {
        Some((self.target.width(), self.target.height()))
    }
}
