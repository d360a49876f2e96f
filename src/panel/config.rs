//! # Panel Configuration
//!
//! This module defines hardware specifications for supported LCD panels.
//!
//! ## Supported Panels
//!
//! | Model | USB ID | Resolution | Frame bytes | Redraw chunks |
//! |-------|--------|------------|-------------|---------------|
//! | HT32 LCD | 04d9:fd01 | 320×170 RGB565 | 108 800 | 27 |
//!
//! ## Usage
//!
//! ```
//! use s1display::panel::PanelConfig;
//!
//! let config = PanelConfig::HT32_320X170;
//! println!("{}: {}x{} ({} bytes per frame)",
//!          config.name,
//!          config.width,
//!          config.height,
//!          config.frame_bytes());
//! ```

use crate::protocol::commands::DATA_SIZE;

/// # Panel Configuration
///
/// Defines the hardware characteristics of a USB LCD panel.
///
/// ## Frame Size
///
/// ```text
/// frame_bytes = width × height × 2   (RGB565)
///
/// For the HT32 panel:
///   320 × 170 × 2 = 108 800 bytes
///   = 26 × 4096 + 2304  → 27 redraw transfers
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Panel model name
    pub name: &'static str,

    /// USB vendor ID
    pub vendor_id: u16,

    /// USB product ID
    pub product_id: u16,

    /// Width in pixels (landscape)
    pub width: u16,

    /// Height in pixels (landscape)
    pub height: u16,
}

impl PanelConfig {
    /// # HT32 320×170 LCD
    ///
    /// The small status panel found on AceMagic-style mini PCs, driven by a
    /// Holtek HT32 microcontroller.
    pub const HT32_320X170: Self = Self {
        name: "Holtek HT32 LCD",
        vendor_id: 0x04D9,
        product_id: 0xFD01,
        width: 320,
        height: 170,
    };

    /// Number of pixels in one full frame.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of one full frame in wire bytes (2 per pixel).
    ///
    /// ## Example
    ///
    /// ```
    /// use s1display::panel::PanelConfig;
    ///
    /// assert_eq!(PanelConfig::HT32_320X170.frame_bytes(), 26 * 4096 + 2304);
    /// ```
    #[inline]
    pub fn frame_bytes(&self) -> usize {
        self.pixel_count() * 2
    }

    /// Number of bulk transfers a full redraw takes.
    #[inline]
    pub fn redraw_chunks(&self) -> usize {
        self.frame_bytes().div_ceil(DATA_SIZE)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::HT32_320X170
    }
}

/// Parse a USB ID given as hex, with or without a `0x` prefix.
///
/// Used by the CLI for `--vid` / `--pid`.
pub fn parse_usb_id(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|_| format!("Invalid USB ID: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ht32_frame_geometry() {
        let config = PanelConfig::HT32_320X170;
        assert_eq!(config.pixel_count(), 54_400);
        assert_eq!(config.frame_bytes(), 108_800);
        assert_eq!(config.redraw_chunks(), 27);
    }

    #[test]
    fn test_default_is_ht32() {
        assert_eq!(PanelConfig::default(), PanelConfig::HT32_320X170);
    }

    #[test]
    fn test_parse_usb_id() {
        assert_eq!(parse_usb_id("04d9"), Ok(0x04D9));
        assert_eq!(parse_usb_id("0xFD01"), Ok(0xFD01));
        assert_eq!(parse_usb_id("0Xfd01"), Ok(0xFD01));
        assert!(parse_usb_id("").is_err());
        assert!(parse_usb_id("12345").is_err());
        assert!(parse_usb_id("zz").is_err());
    }
}
