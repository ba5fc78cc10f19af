//! Render target with a parallel depth buffer.
//!
//! Owns the color and depth arrays for the lifetime of the render core.
//! Both are row-major and indexed `y * width + x`.
//!
//! # Depth Buffer
//!
//! The depth buffer stores post-divide z. Larger values are closer to the
//! camera under the projection built by
//! [`Mat4::perspective`](crate::math::Mat4::perspective). "Nothing rendered
//! yet" is marked by a sentinel smaller than any valid depth, such as
//! [`DepthColorBuffer::EMPTY_DEPTH`].

use crate::color::Color;
use crate::error::BufferError;

pub struct DepthColorBuffer {
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthColorBuffer {
    /// Default "nothing drawn" depth.
    pub const EMPTY_DEPTH: f32 = -1000.0;

    /// Allocate a buffer cleared to black and [`Self::EMPTY_DEPTH`].
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroSized { width, height });
        }
        let size = width as usize * height as usize;
        Ok(Self {
            color_buffer: vec![Color::BLACK; size],
            depth_buffer: vec![Self::EMPTY_DEPTH; size],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to `color` and every depth to `depth`.
    pub fn clear(&mut self, color: Color, depth: f32) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(depth);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Stored depth at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Color at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Depth test against (x, y). Out-of-bounds pixels never pass.
    #[inline]
    pub fn passes_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        matches!(self.depth_at(x, y), Some(stored) if depth > stored)
    }

    /// Write color and depth at (x, y) without testing.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn write(&mut self, x: i32, y: i32, depth: f32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as packed BGRA bytes, top row first.
    ///
    /// A consumer that stores rows bottom-up (e.g. a DIB) must be told the
    /// image is top-down, typically through a negative height.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `Color` is `#[repr(C)]` with four `u8` fields, so it has
        // size 4, alignment 1 and no padding.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * std::mem::size_of::<Color>(),
            )
        }
    }

    /// Copies the color buffer out as RGBA8 bytes for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_rgba_bytes())
            .collect()
    }
}
