//! # Panel Transport Layer
//!
//! This module provides communication backends for sending command buffers
//! to the panel.
//!
//! ## Available Transports
//!
//! - [`usb`]: libusb bulk transfers to the panel's OUT endpoint
//! - [`mock`]: in-memory recorder with failure injection, for tests
//!
//! ## Contract
//!
//! One [`Transport::send`] call is exactly one bulk transfer. Transports
//! never retry, batch or split a buffer; the caller decides what to do
//! with a failure.

use std::fmt;

pub mod mock;
pub mod usb;

pub use mock::RecordingTransport;
pub use usb::UsbTransport;

/// Failure reported by a transport for a single transfer.
///
/// `code` follows libusb numbering (negative values) so errors from real
/// hardware and from test doubles read the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub code: i32,
    pub description: String,
}

impl TransportError {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transfer error {} ({})", self.code, self.description)
    }
}

impl std::error::Error for TransportError {}

/// A connection that can push one command buffer to the panel.
///
/// Implementations own their connection exclusively; `&mut self` keeps two
/// operations from interleaving transfers on the same endpoint.
pub trait Transport {
    /// Perform one blocking bulk transfer of `buffer`.
    ///
    /// Returns the number of bytes the transport reports as transferred.
    fn send(&mut self, buffer: &[u8]) -> Result<usize, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, buffer: &[u8]) -> Result<usize, TransportError> {
        (**self).send(buffer)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, buffer: &[u8]) -> Result<usize, TransportError> {
        (**self).send(buffer)
    }
}
