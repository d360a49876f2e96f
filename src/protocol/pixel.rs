//! # RGB565 Pixel Encoding
//!
//! The panel takes 16-bit colour words: 5 bits red, 6 bits green, 5 bits
//! blue. Narrowing from 8-bit channels keeps the top bits of each channel
//! and drops the rest.
//!
//! ```text
//! bit  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//!      R7 R6 R5 R4 R3 G7 G6 G5 G4 G3 G2 B7 B6 B5 B4 B3
//! ```
//!
//! ## Byte Order
//!
//! Colour words are byte-swapped relative to the host's little-endian
//! representation before they go on the wire:
//!
//! | Colour | Packed | Wire bytes |
//! |--------|--------|------------|
//! | red (255,0,0) | 0xF800 | `00 F8` |
//! | green (0,255,0) | 0x07E0 | `E0 07` |
//! | blue (0,0,255) | 0x001F | `1F 00` |
//! | black | 0x0000 | `00 00` |

/// A packed RGB565 colour.
///
/// The inner value is the native packed word; use [`Rgb565::to_wire`] to get
/// the bytes the panel expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);

    /// Pack 8-bit channels, keeping the top 5/6/5 bits.
    ///
    /// ```
    /// use s1display::protocol::pixel::Rgb565;
    ///
    /// assert_eq!(Rgb565::from_rgb(255, 0, 0).value(), 0xF800);
    /// assert_eq!(Rgb565::from_rgb(255, 0, 0).to_wire(), [0x00, 0xF8]);
    /// ```
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r >> 3) as u16;
        let g = (g >> 2) as u16;
        let b = (b >> 3) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    /// Grey level: the same intensity on all three channels.
    #[inline]
    pub const fn gray(intensity: u8) -> Self {
        Self::from_rgb(intensity, intensity, intensity)
    }

    /// Wrap an already packed RGB565 word.
    #[inline]
    pub const fn from_value(value: u16) -> Self {
        Self(value)
    }

    /// The native packed word.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// The two bytes sent to the panel for this colour.
    #[inline]
    pub const fn to_wire(self) -> [u8; 2] {
        self.0.swap_bytes().to_be_bytes()
    }
}

impl From<[u8; 3]> for Rgb565 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

/// Append the wire encoding of `pixels` to `out`.
pub fn encode_into(out: &mut Vec<u8>, pixels: &[Rgb565]) {
    out.reserve(pixels.len() * 2);
    for pixel in pixels {
        out.extend_from_slice(&pixel.to_wire());
    }
}

/// Wire encoding of `pixels`, two bytes per pixel.
pub fn encode(pixels: &[Rgb565]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * 2);
    encode_into(&mut out, pixels);
    out
}
