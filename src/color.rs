//! Pixel color in the byte order the display consumer expects.

/// A 32-bit color stored as (B, G, R, A) bytes.
///
/// The field order matches the memory layout of a little-endian `0xAARRGGBB`
/// word, which is what a top-down 32-bit DIB or an ARGB8888 streaming
/// texture reads.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BACKGROUND: Color = Color::from_argb(0xFF30_3030);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Unpacks a `0xAARRGGBB` word.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            b: argb as u8,
            g: (argb >> 8) as u8,
            r: (argb >> 16) as u8,
            a: (argb >> 24) as u8,
        }
    }

    /// Returns the channels reordered as (R, G, B, A).
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
