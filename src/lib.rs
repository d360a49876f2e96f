//! # s1display - USB LCD Panel Driver
//!
//! s1display drives the small 320×170 LCD panel (Holtek HT32, USB ID
//! `04d9:fd01`) found on a number of mini PCs. It provides:
//!
//! - **Protocol implementation**: fixed-size command buffer builders
//! - **Redraw chunking**: splitting a full frame into sequenced transfers
//! - **Pixel encoding**: RGB565 in the panel's byte order
//! - **Transport**: libusb bulk transfers, plus a recorder for tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use s1display::{Frame, LcdDevice, PanelConfig, UsbTransport};
//! use s1display::protocol::pixel::Rgb565;
//!
//! let config = PanelConfig::HT32_320X170;
//!
//! // Open and claim the panel
//! let transport = UsbTransport::open(&config)?;
//! let mut device = LcdDevice::new(transport);
//!
//! // Portrait, current time, black screen
//! device.set_orientation(true)?;
//! device.set_time()?;
//! device.redraw(&Frame::solid(&config, Rgb565::BLACK))?;
//!
//! // Keep the panel awake
//! device.send_heartbeat()?;
//!
//! # Ok::<(), s1display::error::DisplayError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Command builders, chunking, pixel encoding |
//! | [`device`] | The five panel operations |
//! | [`transport`] | Communication backends |
//! | [`panel`] | Panel configurations |
//! | [`frame`] | Full-frame pixel buffers |
//! | [`clock`] | Wall-clock source for time commands |
//! | [`logger`] | Stderr `log` backend for the CLI |
//! | [`error`] | Error types |
//!
//! ## Threading
//!
//! Everything is synchronous and blocking. One [`LcdDevice`] owns its
//! connection; callers that heartbeat and redraw from different places must
//! serialise those calls themselves.

pub mod clock;
pub mod device;
pub mod error;
pub mod frame;
pub mod logger;
pub mod panel;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use device::LcdDevice;
pub use error::DisplayError;
pub use frame::Frame;
pub use panel::PanelConfig;
pub use transport::UsbTransport;
