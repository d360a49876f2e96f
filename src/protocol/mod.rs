//! # Panel Protocol Implementation
//!
//! This module provides the command builders for the vendor protocol
//! spoken by HT32-based USB LCD panels.
//!
//! ## Module Structure
//!
//! - [`commands`]: Fixed-size command buffers (config, refresh, redraw)
//! - [`chunking`]: Splitting a full frame into redraw transfers
//! - [`pixel`]: RGB565 colour encoding
//!
//! ## Usage Example
//!
//! ```
//! use s1display::clock::WallTime;
//! use s1display::protocol::{chunking, commands, pixel::Rgb565};
//!
//! // Portrait mode, then set the clock
//! let orientation = commands::set_orientation(commands::Orientation::Portrait);
//! let time = commands::set_time(WallTime::new(9, 30, 0));
//!
//! // Paint a red 24×12 block
//! let block = vec![Rgb565::RED; 24 * 12];
//! let update = commands::update_region(commands::Region::new(90, 90, 24, 12), &block)?;
//!
//! // Split a black frame into redraw chunks
//! let frame = vec![0u8; 320 * 170 * 2];
//! let chunks: Vec<_> = chunking::plan_chunks(frame.len(), commands::DATA_SIZE)?
//!     .iter()
//!     .map(|c| commands::redraw_chunk(c, &frame[c.range()]))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(chunks.len(), 27);
//! // Send each buffer via a transport...
//! # let _ = (orientation, time, update);
//! # Ok::<(), s1display::DisplayError>(())
//! ```
//!
//! ## Protocol Reference
//!
//! There is no public documentation for this protocol. The layouts here
//! are the ones the panel is known to accept; it sends no acknowledgment,
//! so a malformed command simply has no visible effect.

pub mod chunking;
pub mod commands;
pub mod pixel;
