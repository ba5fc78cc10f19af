//! Per-pixel barycentric rasterizer used as a test oracle.
//!
//! Iterates the triangle's bounding box and evaluates the closed-form
//! barycentric coordinates at every sample point `(x + 0.5, y)`. Slow, but
//! independent of the incremental stepping in [`super::ScanlineRasterizer`],
//! so the two can be compared pixel by pixel.

use super::{PixelSink, RasterizedTriangle, Rasterizer};
use crate::error::RasterError;

pub(crate) struct ReferenceRasterizer;

/// Closed-form barycentric weights of `(px, py)`, or `None` for a degenerate
/// triangle.
pub(crate) fn barycentric(tri: &RasterizedTriangle, px: f32, py: f32) -> Option<[f32; 3]> {
    let (ax, ay) = (tri.a.x as f32, tri.a.y as f32);
    let (bx, by) = (tri.b.x as f32, tri.b.y as f32);
    let (cx, cy) = (tri.c.x as f32, tri.c.y as f32);

    let det = (by - cy) * (ax - cx) + (cx - bx) * (ay - cy);
    if det == 0.0 {
        return None;
    }
    let ba = ((by - cy) * (px - cx) + (cx - bx) * (py - cy)) / det;
    let bb = ((cy - ay) * (px - cx) + (ax - cx) * (py - cy)) / det;
    Some([ba, bb, 1.0 - ba - bb])
}

/// Signed distance in pixels from `(px, py)` to the nearest edge; positive
/// inside the triangle.
pub(crate) fn edge_distance(tri: &RasterizedTriangle, px: f32, py: f32) -> f32 {
    let pts = [
        (tri.a.x as f32, tri.a.y as f32),
        (tri.b.x as f32, tri.b.y as f32),
        (tri.c.x as f32, tri.c.y as f32),
    ];
    let orientation = (tri.double_area() as f32).signum();
    (0..3)
        .map(|i| {
            let (x0, y0) = pts[i];
            let (x1, y1) = pts[(i + 1) % 3];
            let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
            let cross = (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0);
            // double_area = cross of (b-a, c-a); same sign for interior points.
            orientation * cross / len
        })
        .fold(f32::INFINITY, f32::min)
}

impl Rasterizer for ReferenceRasterizer {
    fn fill_triangle<S: PixelSink>(
        &self,
        triangle: &RasterizedTriangle,
        sink: &mut S,
    ) -> Result<(), RasterError> {
        if triangle.double_area() == 0 {
            return Err(RasterError::DegenerateTriangle);
        }
        let min_x = triangle.a.x.min(triangle.b.x).min(triangle.c.x);
        let max_x = triangle.a.x.max(triangle.b.x).max(triangle.c.x);

        for y in triangle.a.y..=triangle.c.y {
            for x in min_x..=max_x {
                let Some(lambda) = barycentric(triangle, x as f32 + 0.5, y as f32) else {
                    continue;
                };
                if lambda.iter().all(|&l| l >= 0.0) {
                    sink.plot(x, y, lambda);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rasterizer::RasterizedVertex;
    use approx::assert_abs_diff_eq;

    fn tri() -> RasterizedTriangle {
        RasterizedTriangle::sorted(
            RasterizedVertex::new(0, 0, 0.0, 0.0, 0.0),
            RasterizedVertex::new(10, 0, 0.0, 0.0, 0.0),
            RasterizedVertex::new(0, 10, 0.0, 0.0, 0.0),
        )
    }

    #[test]
    fn vertices_get_unit_weights() {
        let t = tri();
        let at_c = barycentric(&t, t.c.x as f32, t.c.y as f32).expect("non-degenerate");
        assert_abs_diff_eq!(at_c[2], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(at_c[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_is_positive_inside_and_negative_outside() {
        let t = tri();
        assert!(edge_distance(&t, 2.0, 2.0) > 1.9);
        assert!(edge_distance(&t, -3.0, 2.0) < -2.9);
        assert!(edge_distance(&t, 8.0, 8.0) < 0.0);
    }
}
