//! Power-of-two color buffers used as textures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{AssetError, BufferError};

/// How out-of-range texel indices are mapped back into the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureAddress {
    /// Repeat: the index is masked with `size - 1`.
    #[default]
    Wrap,
    /// Clamp the index to `[0, size - 1]`.
    Clamp,
}

/// A texture: row-major [`Color`] texels with power-of-two dimensions.
///
/// Data is expected in (B, G, R, A) order with V pointing down. The `from_*`
/// constructors perform the channel reorder; V flipping belongs to the
/// vertex data (see [`VertexBuffer::flip_v`](crate::VertexBuffer::flip_v)).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32, data: Vec<Color>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroSized { width, height });
        }
        if !width.is_power_of_two() || !height.is_power_of_two() {
            return Err(BufferError::NotPowerOfTwo { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Self, BufferError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// A `size` x `size` checkerboard with square cells of `cell` texels.
    pub fn checkerboard(size: u32, cell: u32, a: Color, b: Color) -> Result<Self, BufferError> {
        let cell = cell.max(1);
        let data = (0..size)
            .flat_map(|y| {
                (0..size).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b })
            })
            .collect();
        Self::new(size, size, data)
    }

    /// Builds a texture from tightly packed RGBA8 bytes, reordering to BGRA.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, data)
    }

    /// Load a texture from an image file (PNG, JPG, BMP).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba8(width, height, img.as_raw())?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[Color] {
        &self.data
    }

    /// Nearest-neighbor lookup of the texel under (u, v).
    ///
    /// The integer index is `trunc(u * width)` (likewise for v), then mapped
    /// into range according to `address`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, address: TextureAddress) -> Color {
        let tx = texel_index(u, self.width, address);
        let ty = texel_index(v, self.height, address);
        self.data[ty * self.width as usize + tx]
    }
}

#[inline]
fn texel_index(coord: f32, size: u32, address: TextureAddress) -> usize {
    // Saturating float-to-int cast; NaN maps to 0.
    let index = (coord * size as f32) as i32;
    match address {
        TextureAddress::Wrap => (index as u32 & (size - 1)) as usize,
        TextureAddress::Clamp => index.clamp(0, size as i32 - 1) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> ColorBuffer {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| Color::rgb(x as u8, y as u8, 0)))
            .collect();
        ColorBuffer::new(width, height, data).expect("valid texture")
    }

    #[test]
    fn rejects_non_power_of_two() {
        let err = ColorBuffer::solid(3, 4, Color::WHITE).unwrap_err();
        assert_eq!(err, BufferError::NotPowerOfTwo { width: 3, height: 4 });
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ColorBuffer::new(2, 2, vec![Color::WHITE; 3]).unwrap_err();
        assert_eq!(err, BufferError::LengthMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn wrap_repeats_past_one() {
        let tex = gradient(4, 4);
        assert_eq!(
            tex.sample(1.3, 0.0, TextureAddress::Wrap),
            tex.sample(0.3, 0.0, TextureAddress::Wrap)
        );
        assert_eq!(tex.sample(0.3, 0.0, TextureAddress::Wrap).r, 1);
    }

    #[test]
    fn wrap_handles_negative_coordinates() {
        let tex = gradient(4, 4);
        // trunc(-0.3 * 4) = -1, which wraps to the last column.
        assert_eq!(tex.sample(-0.3, 0.0, TextureAddress::Wrap).r, 3);
    }

    #[test]
    fn clamp_pins_to_the_border() {
        let tex = gradient(4, 4);
        assert_eq!(tex.sample(1.3, 0.0, TextureAddress::Clamp).r, 3);
        assert_eq!(tex.sample(-5.0, 2.0, TextureAddress::Clamp).g, 3);
    }

    #[test]
    fn rgba_bytes_are_reordered() {
        let tex = ColorBuffer::from_rgba8(1, 1, &[10, 20, 30, 40]).expect("1x1");
        let c = tex.data()[0];
        assert_eq!((c.b, c.g, c.r, c.a), (30, 20, 10, 40));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = ColorBuffer::checkerboard(4, 2, Color::WHITE, Color::BLACK).expect("4x4");
        assert_eq!(tex.sample(0.0, 0.0, TextureAddress::Wrap), Color::WHITE);
        assert_eq!(tex.sample(0.5, 0.0, TextureAddress::Wrap), Color::BLACK);
        assert_eq!(tex.sample(0.5, 0.5, TextureAddress::Wrap), Color::WHITE);
    }
}
