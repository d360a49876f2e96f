//! # LCD Device
//!
//! [`LcdDevice`] is the whole public surface of the driver: five blocking
//! operations, each building its command buffer(s) and pushing them through
//! a [`Transport`].
//!
//! | Operation | Transfers |
//! |-----------|-----------|
//! | [`set_orientation`](LcdDevice::set_orientation) | 1 |
//! | [`set_time`](LcdDevice::set_time) | 1 |
//! | [`send_heartbeat`](LcdDevice::send_heartbeat) | 1 |
//! | [`redraw`](LcdDevice::redraw) | 27 for the 320×170 panel |
//! | [`update_region`](LcdDevice::update_region) | 1 |
//!
//! Nothing is retried and nothing is kept between calls. A redraw that
//! fails partway leaves the chunks already sent on the panel.
//!
//! ## Example
//!
//! ```
//! use s1display::{Frame, LcdDevice, PanelConfig};
//! use s1display::protocol::pixel::Rgb565;
//! use s1display::transport::RecordingTransport;
//!
//! let mut device = LcdDevice::new(RecordingTransport::new());
//! device.set_orientation(true)?;
//! device.redraw(&Frame::solid(&PanelConfig::HT32_320X170, Rgb565::BLACK))?;
//!
//! assert_eq!(device.transport().sent().len(), 1 + 27);
//! # Ok::<(), s1display::DisplayError>(())
//! ```

use log::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{DisplayError, Operation};
use crate::frame::Frame;
use crate::panel::PanelConfig;
use crate::protocol::chunking::plan_chunks;
use crate::protocol::commands::{self, CommandBuffer, DATA_SIZE, Orientation, Region};
use crate::protocol::pixel::Rgb565;
use crate::transport::{Transport, TransportError};

/// A panel reachable through `T`, reading wall-clock time from `C`.
pub struct LcdDevice<T, C = SystemClock> {
    transport: T,
    clock: C,
    config: PanelConfig,
}

impl<T: Transport> LcdDevice<T, SystemClock> {
    /// Drive the default HT32 panel using the system clock.
    pub fn new(transport: T) -> Self {
        Self::with_clock(transport, SystemClock)
    }
}

impl<T: Transport, C: Clock> LcdDevice<T, C> {
    pub fn with_clock(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            config: PanelConfig::default(),
        }
    }

    /// Use a different panel geometry.
    pub fn with_config(mut self, config: PanelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Switch between portrait (`true`) and landscape (`false`).
    pub fn set_orientation(&mut self, portrait: bool) -> Result<(), DisplayError> {
        let orientation = Orientation::from_portrait(portrait);
        debug!("set orientation: {:?}", orientation);
        let buf = commands::set_orientation(orientation);
        self.send(&buf).map_err(|e| DisplayError::transport(Operation::SetOrientation, e))
    }

    /// Set the panel clock to the current local time.
    pub fn set_time(&mut self) -> Result<(), DisplayError> {
        let now = self.clock.now()?;
        debug!("set time: {:02}:{:02}:{:02}", now.hour, now.minute, now.second);
        let buf = commands::set_time(now);
        self.send(&buf).map_err(|e| DisplayError::transport(Operation::SetTime, e))
    }

    /// Keep-alive carrying the current local time.
    pub fn send_heartbeat(&mut self) -> Result<(), DisplayError> {
        let now = self.clock.now()?;
        trace!("heartbeat: {:02}:{:02}:{:02}", now.hour, now.minute, now.second);
        let buf = commands::heartbeat(now);
        self.send(&buf).map_err(|e| DisplayError::transport(Operation::Heartbeat, e))
    }

    /// Repaint the whole panel.
    ///
    /// Sends the frame as a Start/Continue.../End chunk sequence, one
    /// transfer per chunk, and stops at the first failing chunk.
    ///
    /// ## Errors
    ///
    /// - [`DisplayError::InvalidCommand`] if the frame's size does not match
    ///   the panel; nothing is sent
    /// - [`DisplayError::TransportFailure`] with `chunk` set to the failing
    ///   sequence number
    pub fn redraw(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = self.config.frame_bytes();
        if frame.byte_len() != expected {
            return Err(DisplayError::InvalidCommand(format!(
                "Frame is {} bytes, {} expects {}",
                frame.byte_len(),
                self.config.name,
                expected
            )));
        }

        let data = frame.to_bytes();
        let plan = plan_chunks(data.len(), DATA_SIZE)?;
        debug!("redraw: {} bytes in {} chunks", data.len(), plan.len());

        for chunk in &plan {
            let buf = commands::redraw_chunk(chunk, &data[chunk.range()])?;
            trace!(
                "redraw chunk {} ({:?}) offset {} length {}",
                chunk.sequence, chunk.role, chunk.offset, chunk.length
            );
            self.send(&buf).map_err(|e| DisplayError::chunk(chunk.sequence, e))?;
        }

        Ok(())
    }

    /// Repaint a `width × height` rectangle at (`x`, `y`).
    ///
    /// `pixels` is row-major and must hold exactly `width × height` entries,
    /// at most 2048 (one transfer).
    pub fn update_region(
        &mut self,
        x: u16,
        y: u16,
        width: u8,
        height: u8,
        pixels: &[Rgb565],
    ) -> Result<(), DisplayError> {
        let region = Region::new(x, y, width, height);
        debug!("update region: {:?}", region);
        let buf = commands::update_region(region, pixels)?;
        self.send(&buf).map_err(|e| DisplayError::transport(Operation::UpdateRegion, e))
    }

    fn send(&mut self, buf: &CommandBuffer) -> Result<(), TransportError> {
        let bytes = buf.as_bytes();
        let transferred = self.transport.send(bytes)?;
        if transferred < bytes.len() {
            warn!("short transfer: {} of {} bytes", transferred, bytes.len());
        }
        Ok(())
    }
}
