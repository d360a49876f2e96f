//! # Recording Transport
//!
//! In-memory [`Transport`] that keeps a copy of every buffer it is given.
//! It can be told to fail on the Nth transfer, which is how the chunked
//! redraw's abort behaviour is exercised without hardware.

use super::{Transport, TransportError};

/// libusb's `LIBUSB_ERROR_IO`, used for injected failures.
pub const INJECTED_ERROR_CODE: i32 = -1;

/// Records sent buffers; optionally fails one transfer.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Vec<Vec<u8>>,
    attempts: usize,
    fail_on: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th transfer (1-based). Buffers from that call onward
    /// are not recorded.
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    /// Buffers that were successfully "transferred", in order.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Number of `send` calls, including the failed one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.attempts = 0;
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, buffer: &[u8]) -> Result<usize, TransportError> {
        self.attempts += 1;
        if self.fail_on == Some(self.attempts) {
            return Err(TransportError::new(
                INJECTED_ERROR_CODE,
                format!("injected failure on transfer {}", self.attempts),
            ));
        }
        self.sent.push(buffer.to_vec());
        Ok(buffer.len())
    }
}
