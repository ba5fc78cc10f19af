//! Vertex transform, triangle assembly and the whole-mesh pass.

use super::framebuffer::DepthColorBuffer;
use super::pixel::TexturedPixelStage;
use super::rasterizer::{RasterizedTriangle, RasterizedVertex, Rasterizer, ScanlineRasterizer};
use crate::error::RasterError;
use crate::math::{Mat4, Vec4};
use crate::texture::{ColorBuffer, TextureAddress};
use crate::vertex::{Vertex, VertexBuffer};

/// Transforms one model-space vertex to screen space.
///
/// The clip position is `(x, y, z, 1) * mvp`. After the perspective divide,
/// `screen = (ndc + 0.5) * viewport` on both axes, truncated to whole
/// pixels. Depth is the divided z, texture coordinates pass through.
pub fn transform_vertex(
    vertex: &Vertex,
    mvp: &Mat4,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<RasterizedVertex, RasterError> {
    let p = vertex.position;
    let clip = Vec4::point(p.x, p.y, p.z) * *mvp;
    let ndc = clip
        .perspective_divide()
        .ok_or(RasterError::DegenerateTransform { w: clip.w })?;

    let screen_x = (ndc.x + 0.5) * viewport_width;
    let screen_y = (ndc.y + 0.5) * viewport_height;

    Ok(RasterizedVertex::new(
        screen_x as i32,
        screen_y as i32,
        ndc.z,
        vertex.uv.x,
        vertex.uv.y,
    ))
}

/// Transforms three vertices and sorts them into a [`RasterizedTriangle`].
///
/// The first vertex that fails to transform fails the whole triangle.
pub fn assemble_triangle(
    vertices: [&Vertex; 3],
    mvp: &Mat4,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<RasterizedTriangle, RasterError> {
    let [a, b, c] = vertices;
    Ok(RasterizedTriangle::sorted(
        transform_vertex(a, mvp, viewport_width, viewport_height)?,
        transform_vertex(b, mvp, viewport_width, viewport_height)?,
        transform_vertex(c, mvp, viewport_width, viewport_height)?,
    ))
}

/// Outcome of one pass over a vertex buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Triangles in the buffer.
    pub triangles: usize,
    /// Triangles handed to the pixel stage.
    pub drawn: usize,
    /// Triangles skipped because a vertex had `w == 0`.
    pub degenerate_transforms: usize,
    /// Triangles skipped for zero screen-space area.
    pub degenerate_triangles: usize,
    /// Pixels that passed the depth test.
    pub pixels_written: usize,
}

impl PassReport {
    pub fn skipped(&self) -> usize {
        self.degenerate_transforms + self.degenerate_triangles
    }

    fn record(&mut self, err: RasterError) {
        match err {
            RasterError::DegenerateTransform { .. } => self.degenerate_transforms += 1,
            RasterError::DegenerateTriangle => self.degenerate_triangles += 1,
        }
    }
}

/// Rasterizes every triangle of `vertices` into `target` with the scanline
/// rasterizer.
///
/// The viewport is the target's size. Degenerate triangles are skipped and
/// counted; the pass itself cannot fail.
pub fn rasterize_vertices(
    vertices: &VertexBuffer,
    mvp: &Mat4,
    texture: &ColorBuffer,
    target: &mut DepthColorBuffer,
    address: TextureAddress,
) -> PassReport {
    rasterize_with(&ScanlineRasterizer, vertices, mvp, texture, target, address)
}

/// [`rasterize_vertices`] with a caller-chosen [`Rasterizer`].
pub fn rasterize_with<R: Rasterizer>(
    rasterizer: &R,
    vertices: &VertexBuffer,
    mvp: &Mat4,
    texture: &ColorBuffer,
    target: &mut DepthColorBuffer,
    address: TextureAddress,
) -> PassReport {
    let viewport_width = target.width() as f32;
    let viewport_height = target.height() as f32;
    let mut report = PassReport {
        triangles: vertices.triangle_count(),
        ..PassReport::default()
    };

    let mut stage = TexturedPixelStage::new(texture, target, address);
    for (index, triangle) in vertices.triangles().enumerate() {
        let result = assemble_triangle(triangle, mvp, viewport_width, viewport_height)
            .and_then(|tri| {
                stage.bind(tri);
                rasterizer.fill_triangle(&tri, &mut stage)
            });
        match result {
            Ok(()) => report.drawn += 1,
            Err(err) => {
                log::trace!("skipping triangle {index}: {err}");
                report.record(err);
            }
        }
    }
    report.pixels_written = stage.pixels_written();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use approx::assert_abs_diff_eq;

    /// Model-space vertex that lands on screen pixel (x, y) of a 256x256
    /// viewport under the identity transform.
    fn at(x: i32, y: i32, z: f32) -> Vertex {
        Vertex::new(x as f32 / 256.0 - 0.5, y as f32 / 256.0 - 0.5, z, 0.0, 0.0)
    }

    #[test]
    fn identity_maps_offset_ndc_to_pixels() {
        let v = transform_vertex(&at(100, 37, 0.25), &Mat4::identity(), 256.0, 256.0)
            .expect("w = 1");
        assert_eq!((v.x, v.y), (100, 37));
        assert_abs_diff_eq!(v.z, 0.25);
    }

    #[test]
    fn origin_maps_to_viewport_center() {
        let v = transform_vertex(&Vertex::default(), &Mat4::identity(), 800.0, 600.0)
            .expect("w = 1");
        assert_eq!((v.x, v.y), (400, 300));
    }

    #[test]
    fn divides_by_w_and_keeps_uv() {
        let mut m = Mat4::identity();
        m.set(3, 3, 2.0);
        let vertex = Vertex::new(0.25, -0.25, 0.8, 0.75, 0.125);
        let v = transform_vertex(&vertex, &m, 100.0, 100.0).expect("w = 2");
        // 62.5 and 37.5 truncate.
        assert_eq!((v.x, v.y), (62, 37));
        assert_abs_diff_eq!(v.z, 0.4);
        assert_eq!((v.u, v.v), (0.75, 0.125));
    }

    #[test]
    fn zero_w_is_a_degenerate_transform() {
        let mut m = Mat4::identity();
        m.set(3, 3, 0.0);
        let err = transform_vertex(&Vertex::default(), &m, 10.0, 10.0).unwrap_err();
        assert_eq!(err, RasterError::DegenerateTransform { w: 0.0 });
    }

    #[test]
    fn assembled_triangle_is_sorted() {
        let tri = assemble_triangle(
            [&at(10, 90, 0.0), &at(50, 10, 0.0), &at(90, 50, 0.0)],
            &Mat4::identity(),
            256.0,
            256.0,
        )
        .expect("finite");
        assert!(tri.is_sorted());
        assert_eq!((tri.a.y, tri.b.y, tri.c.y), (10, 50, 90));
    }

    #[test]
    fn pass_counts_each_skip_kind() {
        let vertices = VertexBuffer::new(vec![
            // drawable
            at(10, 10, 0.5),
            at(60, 10, 0.5),
            at(30, 60, 0.5),
            // collinear
            at(10, 10, 0.5),
            at(20, 20, 0.5),
            at(30, 30, 0.5),
        ])
        .expect("two triangles");
        let texture = ColorBuffer::solid(1, 1, Color::WHITE).expect("1x1");
        let mut target = DepthColorBuffer::new(256, 256).expect("256x256");

        let report = rasterize_vertices(
            &vertices,
            &Mat4::identity(),
            &texture,
            &mut target,
            TextureAddress::Wrap,
        );
        assert_eq!(report.triangles, 2);
        assert_eq!(report.drawn, 1);
        assert_eq!(report.degenerate_triangles, 1);
        assert_eq!(report.degenerate_transforms, 0);
        assert_eq!(report.skipped(), 1);
        assert!(report.pixels_written > 0);
    }
}
