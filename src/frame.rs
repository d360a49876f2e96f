//! # Frame Buffers
//!
//! A [`Frame`] is one full panel image: `width × height` RGB565 pixels in
//! row-major order. Redraw sends its wire encoding, two bytes per pixel.
//!
//! Frames come from the caller. Two sources are provided here: a solid
//! colour fill, and an image file resized to the panel (via the [`image`]
//! crate).

use std::path::Path;

use image::{DynamicImage, imageops::FilterType};

use crate::error::DisplayError;
use crate::panel::PanelConfig;
use crate::protocol::pixel::{self, Rgb565};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    pixels: Vec<Rgb565>,
}

impl Frame {
    /// A frame filled with a single colour.
    pub fn solid(config: &PanelConfig, color: Rgb565) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pixels: vec![color; config.pixel_count()],
        }
    }

    /// Wrap row-major pixels.
    ///
    /// ## Errors
    ///
    /// [`DisplayError::InvalidCommand`] if `pixels.len() != width × height`.
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<Rgb565>) -> Result<Self, DisplayError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DisplayError::InvalidCommand(format!(
                "Frame {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Scale an image to the panel's resolution, ignoring aspect ratio.
    pub fn from_image(config: &PanelConfig, img: &DynamicImage) -> Self {
        let rgb = img
            .resize_exact(
                config.width as u32,
                config.height as u32,
                FilterType::Triangle,
            )
            .to_rgb8();

        let pixels = rgb.pixels().map(|p| Rgb565::from(p.0)).collect();

        Self {
            width: config.width,
            height: config.height,
            pixels,
        }
    }

    /// Load and scale an image file.
    pub fn open<P: AsRef<Path>>(config: &PanelConfig, path: P) -> Result<Self, DisplayError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            DisplayError::Image(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(Self::from_image(config, &img))
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Size of the wire encoding in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * 2
    }

    /// Set one pixel; out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: u16, y: u16, color: Rgb565) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Wire encoding of the whole frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        pixel::encode(&self.pixels)
    }
}
