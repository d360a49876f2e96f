//! # Error Types
//!
//! This module defines error types used throughout the s1display library.
//!
//! Every error reaches the caller of the [`LcdDevice`](crate::LcdDevice)
//! operation that hit it. Nothing here is retried: the panel never
//! acknowledges a transfer, so there is nothing to retry against.

use std::fmt;

use thiserror::Error;

use crate::transport::TransportError;

/// The device operation that was running when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SetOrientation,
    SetTime,
    Heartbeat,
    Redraw,
    UpdateRegion,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::SetOrientation => "set orientation",
            Operation::SetTime => "set time",
            Operation::Heartbeat => "heartbeat",
            Operation::Redraw => "redraw",
            Operation::UpdateRegion => "update region",
        };
        f.write_str(name)
    }
}

/// Main error type for s1display operations
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The local wall-clock time could not be read
    #[error("Clock unavailable: {0}")]
    ClockUnavailable(String),

    /// A bulk transfer failed.
    ///
    /// `chunk` carries the 1-based sequence number of the redraw chunk that
    /// failed; it is `None` for single-transfer operations.
    #[error("{operation} failed{}: {source}", chunk_suffix(.chunk))]
    TransportFailure {
        operation: Operation,
        chunk: Option<u8>,
        #[source]
        source: TransportError,
    },

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// No USB device with the requested vendor/product ID
    #[error("Device {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// The device exposes no interface with a single bulk OUT endpoint
    #[error("No OUT endpoint found on device")]
    EndpointNotFound,

    /// A kernel driver holds the interface we need to claim
    #[error("Unable to claim interface {0}: kernel driver is active")]
    KernelDriverActive(u8),

    /// USB setup error (enumeration, open, claim)
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Image loading error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn chunk_suffix(chunk: &Option<u8>) -> String {
    match chunk {
        Some(seq) => format!(" at chunk {}", seq),
        None => String::new(),
    }
}

impl DisplayError {
    /// Wrap a transport error with the identity of the failing operation.
    pub fn transport(operation: Operation, source: TransportError) -> Self {
        DisplayError::TransportFailure {
            operation,
            chunk: None,
            source,
        }
    }

    /// Wrap a transport error raised while sending redraw chunk `sequence`.
    pub fn chunk(sequence: u8, source: TransportError) -> Self {
        DisplayError::TransportFailure {
            operation: Operation::Redraw,
            chunk: Some(sequence),
            source,
        }
    }
}
