//! Incremental scanline triangle rasterization.
//!
//! # Algorithm Overview
//!
//! With vertices sorted so that `a.y <= b.y <= c.y`, the triangle is split at
//! `b.y` into two halves that share the long edge A→C:
//!
//! ```text
//!        A
//!        |\
//!        | \        upper half: rows [a.y, b.y), edges A→C and A→B
//!        |  \
//!        |---B      split at b.y
//!        |  /
//!        | /        lower half: rows [b.y, c.y], edges A→C and B→C
//!        |/
//!        C
//! ```
//!
//! The long edge is walked once from A to C across both halves; the short
//! edge is swapped at the split. Row `b.y` belongs to the lower half only, so
//! the halves never draw the same pixel and never leave a row out.
//!
//! # Edge Stepping
//!
//! Each edge is walked with integer error accumulation, Bresenham style: per
//! scanline the error grows by `2 * dx` and X advances while the error is at
//! least `dy`, which keeps X at the rounded line position without dividing.
//! On an edge's final row X is stepped directly to the endpoint.
//!
//! Every X or Y step also moves the edge's interpolation parameter by
//! `1 / (dx + dy + 1)`, one pixel's share of the 4-connected path along the
//! edge, starting half a step in from the start vertex. The parameter turns
//! into barycentric weights for the edge's two vertices.
//!
//! # Span Filling
//!
//! Each scanline is filled from the lesser to the greater edge X (exclusive),
//! interpolating two barycentric weights with a per-pixel delta. The third
//! weight, for the vertex both edges of the half share (A for the upper half,
//! C for the lower), is `1 - wi - wj`, so the weights always sum to one.

use super::{Corner, PixelSink, RasterizedTriangle, Rasterizer};
use crate::error::RasterError;

/// The short edge that bounds one half, plus the vertex it shares with the
/// long edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EdgeDescriptor {
    start: Corner,
    end: Corner,
    anchor: Corner,
}

/// One of the two halves of a sorted triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Half {
    Upper,
    Lower,
}

impl Half {
    const fn edge(self) -> EdgeDescriptor {
        match self {
            Half::Upper => EdgeDescriptor {
                start: Corner::A,
                end: Corner::B,
                anchor: Corner::A,
            },
            Half::Lower => EdgeDescriptor {
                start: Corner::B,
                end: Corner::C,
                anchor: Corner::C,
            },
        }
    }

    /// Inclusive row range, or `None` for a zero-height half.
    fn rows(self, triangle: &RasterizedTriangle) -> Option<(i64, i64)> {
        let (ay, by, cy) = (
            triangle.a.y as i64,
            triangle.b.y as i64,
            triangle.c.y as i64,
        );
        match self {
            Half::Upper if by > ay => Some((ay, by - 1)),
            Half::Lower if cy > by => Some((by, cy)),
            _ => None,
        }
    }
}

/// Integer stepper along one triangle edge, top to bottom.
#[derive(Clone, Debug)]
struct EdgeWalker {
    x: i64,
    y: i64,
    target_x: i64,
    target_y: i64,
    dx: i64,
    dy: i64,
    step: i64,
    error: i64,
    /// Position along the edge: 0 at `start`, 1 at `end`.
    progress: f32,
    delta: f32,
    start: Corner,
    end: Corner,
}

impl EdgeWalker {
    fn new(triangle: &RasterizedTriangle, start: Corner, end: Corner) -> Self {
        let from = triangle.vertex(start);
        let to = triangle.vertex(end);
        let (x0, y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        debug_assert!(y1 >= y0, "edges are walked downwards");

        let dx = (x1 - x0).abs();
        let dy = y1 - y0;
        let delta = 1.0 / (dx + dy + 1) as f32;

        Self {
            x: x0,
            y: y0,
            target_x: x1,
            target_y: y1,
            dx,
            dy,
            step: if x1 >= x0 { 1 } else { -1 },
            error: 0,
            progress: 0.5 * delta,
            delta,
            start,
            end,
        }
    }

    /// Barycentric weights of the current position, indexed by [`Corner`].
    #[inline]
    fn barycentric(&self) -> [f32; 3] {
        let mut lambda = [0.0; 3];
        lambda[self.start.index()] = 1.0 - self.progress;
        lambda[self.end.index()] = self.progress;
        lambda
    }

    /// Move `steps` pixels along X.
    #[inline]
    fn step_x(&mut self, steps: i64) {
        self.x += self.step * steps;
        self.progress += self.delta * steps as f32;
    }

    /// Move down one scanline. No-op once the end row is reached.
    #[inline]
    fn advance(&mut self) {
        self.skip_rows(1);
    }

    /// Move down `rows` scanlines, ending where as many calls to
    /// [`advance`](Self::advance) would.
    ///
    /// The X steps a row owes are the number of `2 * dy` subtractions that
    /// bring the error back below `dy`, so they are counted rather than
    /// looped. Arriving on the end row snaps X to the endpoint.
    fn skip_rows(&mut self, rows: i64) {
        let rows = rows.min(self.target_y - self.y);
        if rows <= 0 {
            return;
        }
        self.y += rows;
        self.progress += self.delta * rows as f32;

        if self.y == self.target_y {
            let remaining = (self.target_x - self.x).abs();
            self.step_x(remaining);
            self.error = 0;
            return;
        }

        // dy > rows > 0 here. i128 because 2 * dx * rows can exceed i64
        // for vertices far off screen.
        let (dx, dy) = (self.dx as i128, self.dy as i128);
        let error = self.error as i128 + 2 * dx * rows as i128;
        let steps = if error >= dy {
            (error - dy) / (2 * dy) + 1
        } else {
            0
        };
        self.error = (error - 2 * dy * steps) as i64;
        self.step_x(steps as i64);
    }
}

/// Scanline rasterizer with incremental edge walking.
///
/// Per pixel it does two additions for the weights and no divisions; the
/// only division per scanline is the span's reciprocal length.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Walk the rows of one half, advancing `long` in step.
    ///
    /// `long` must be positioned at the first row of the half; on return it
    /// sits on the row after the last row walked (or on C). Rows below the
    /// sink's extent are not walked and rows above it are skipped in one step.
    fn fill_half<S: PixelSink>(
        &self,
        half: Half,
        triangle: &RasterizedTriangle,
        long: &mut EdgeWalker,
        sink: &mut S,
    ) {
        let Some((mut first, mut last)) = half.rows(triangle) else {
            return;
        };
        let extent = sink.extent();
        if let Some((_, height)) = extent {
            last = last.min(height as i64 - 1);
        }
        if first > last {
            return;
        }

        let edge = half.edge();
        let mut short = EdgeWalker::new(triangle, edge.start, edge.end);
        debug_assert_eq!(long.y, first);

        // Rows above the target are walked without emitting spans.
        if extent.is_some() && first < 0 {
            let skipped = (-first).min(last - first + 1);
            long.skip_rows(skipped);
            short.skip_rows(skipped);
            first += skipped;
        }

        for y in first..=last {
            Self::fill_span(y, long, &short, edge.anchor, extent, sink);
            long.advance();
            short.advance();
        }
    }

    fn fill_span<S: PixelSink>(
        y: i64,
        long: &EdgeWalker,
        short: &EdgeWalker,
        anchor: Corner,
        extent: Option<(u32, u32)>,
        sink: &mut S,
    ) {
        let (left, right) = if long.x <= short.x {
            (long, short)
        } else {
            (short, long)
        };
        let count = right.x - left.x;
        if count <= 0 {
            return;
        }

        let (mut x_start, mut x_end) = (left.x, right.x);
        if let Some((width, height)) = extent {
            if y < 0 || y >= height as i64 {
                return;
            }
            x_start = x_start.max(0);
            x_end = x_end.min(width as i64);
            if x_start >= x_end {
                return;
            }
        }

        let l = left.barycentric();
        let r = right.barycentric();
        let [ci, cj] = anchor.others();
        let (i, j) = (ci.index(), cj.index());

        let inv_count = 1.0 / count as f32;
        let step_i = (r[i] - l[i]) * inv_count;
        let step_j = (r[j] - l[j]) * inv_count;

        // Pixel centers sit half a step in from the left edge.
        let offset = 0.5 + (x_start - left.x) as f32;
        let mut wi = l[i] + step_i * offset;
        let mut wj = l[j] + step_j * offset;

        for x in x_start..x_end {
            let mut lambda = [0.0; 3];
            lambda[i] = wi;
            lambda[j] = wj;
            lambda[anchor.index()] = 1.0 - wi - wj;
            sink.plot(x as i32, y as i32, lambda);
            wi += step_i;
            wj += step_j;
        }
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle<S: PixelSink>(
        &self,
        triangle: &RasterizedTriangle,
        sink: &mut S,
    ) -> Result<(), RasterError> {
        debug_assert!(triangle.is_sorted());
        if triangle.double_area() == 0 {
            return Err(RasterError::DegenerateTriangle);
        }

        let mut long = EdgeWalker::new(triangle, Corner::A, Corner::C);
        self.fill_half(Half::Upper, triangle, &mut long, sink);
        self.fill_half(Half::Lower, triangle, &mut long, sink);
        Ok(())
    }
}
