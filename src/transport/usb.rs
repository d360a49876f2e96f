//! # USB Bulk Transport
//!
//! This module talks to the panel through libusb (via [`rusb`]).
//!
//! ## Device Setup
//!
//! The panel enumerates as `04d9:fd01` and exposes several interfaces. The
//! one we want has a single alternate setting carrying a single OUT
//! endpoint; every command buffer goes out through that endpoint as one
//! bulk transfer.
//!
//! ```text
//! enumerate ─► match VID:PID ─► active config ─► find OUT endpoint
//!           ─► open ─► kernel driver check ─► claim interface
//! ```
//!
//! ## Permissions (Linux)
//!
//! Opening the device usually requires a udev rule, e.g.:
//!
//! ```text
//! SUBSYSTEM=="usb", ATTR{idVendor}=="04d9", ATTR{idProduct}=="fd01", MODE="0660", GROUP="plugdev"
//! ```
//!
//! The interface is released again when the transport is dropped.

use std::time::Duration;

use log::{debug, error, trace};
use rusb::{Context, Device, DeviceHandle, Direction, UsbContext};

use super::{Transport, TransportError};
use crate::error::DisplayError;
use crate::panel::PanelConfig;

/// Location of the panel's bulk OUT endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEndpoint {
    pub interface: u8,
    pub address: u8,
}

/// # USB Panel Transport
///
/// Owns an opened device handle with the OUT interface claimed.
///
/// ## Example
///
/// ```no_run
/// use s1display::panel::PanelConfig;
/// use s1display::transport::{Transport, UsbTransport};
///
/// let mut transport = UsbTransport::open(&PanelConfig::HT32_320X170)?;
/// let buffer = [0u8; 4104];
/// transport.send(&buffer)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    endpoint: OutEndpoint,
    timeout: Duration,
}

impl UsbTransport {
    /// Find, open and claim the first panel matching `config`'s IDs.
    ///
    /// ## Errors
    ///
    /// - [`DisplayError::DeviceNotFound`] if no device matches
    /// - [`DisplayError::EndpointNotFound`] if no suitable OUT endpoint exists
    /// - [`DisplayError::KernelDriverActive`] if the interface is held by the kernel
    /// - [`DisplayError::Usb`] if libusb cannot be initialised, or for any
///   libusb failure along the way
    pub fn open(config: &PanelConfig) -> Result<Self, DisplayError> {
        Self::open_with_ids(config.vendor_id, config.product_id)
    }

    pub fn open_with_ids(vendor_id: u16, product_id: u16) -> Result<Self, DisplayError> {
        let context = Context::new().map_err(|e| {
            error!("unable to init USB context");
            DisplayError::Usb(e)
        })?;
        let device = find_device(&context, vendor_id, product_id)?;
        let endpoint = find_out_endpoint(&device)?;

        let handle = device.open()?;

        if handle.kernel_driver_active(endpoint.interface)? {
            return Err(DisplayError::KernelDriverActive(endpoint.interface));
        }
        handle.claim_interface(endpoint.interface)?;
        debug!(
            "claimed interface {}, OUT endpoint {:#04x}",
            endpoint.interface, endpoint.address
        );

        Ok(Self {
            handle,
            endpoint,
            timeout: Duration::ZERO,
        })
    }

    /// Set the bulk write timeout. `Duration::ZERO` waits forever (default).
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn endpoint(&self) -> OutEndpoint {
        self.endpoint
    }
}

impl Transport for UsbTransport {
    fn send(&mut self, buffer: &[u8]) -> Result<usize, TransportError> {
        let transferred = self
            .handle
            .write_bulk(self.endpoint.address, buffer, self.timeout)
            .map_err(transport_error)?;
        trace!("transferred: {}", transferred);
        Ok(transferred)
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.endpoint.interface) {
            error!("unable to release interface: {}", e);
        }
    }
}

fn find_device(
    context: &Context,
    vendor_id: u16,
    product_id: u16,
) -> Result<Device<Context>, DisplayError> {
    let devices = context.devices()?;
    if devices.len() == 0 {
        error!("no USB devices found. Do you have enough permissions to list them?");
    }

    for device in devices.iter() {
        let desc = device.device_descriptor()?;
        if desc.vendor_id() == vendor_id && desc.product_id() == product_id {
            debug!("found the required USB device");
            return Ok(device);
        }
        trace!(
            "skipping the device {:04x}:{:04x}",
            desc.vendor_id(),
            desc.product_id()
        );
    }

    Err(DisplayError::DeviceNotFound {
        vendor_id,
        product_id,
    })
}

/// Pick the first interface with exactly one alt setting holding exactly
/// one endpoint, where that endpoint is OUT.
fn find_out_endpoint(device: &Device<Context>) -> Result<OutEndpoint, DisplayError> {
    let config = device.active_config_descriptor()?;
    debug!(
        "the device's configuration has got {} interfaces",
        config.num_interfaces()
    );

    for interface in config.interfaces() {
        let settings: Vec<_> = interface.descriptors().collect();
        if settings.len() != 1 || settings[0].num_endpoints() != 1 {
            continue;
        }

        if let Some(ep) = settings[0].endpoint_descriptors().next() {
            trace!(
                "endpoint address for interface {} is {:02x}",
                interface.number(),
                ep.address()
            );
            if ep.direction() == Direction::Out {
                debug!("found OUT endpoint");
                return Ok(OutEndpoint {
                    interface: interface.number(),
                    address: ep.address(),
                });
            }
        }
    }

    Err(DisplayError::EndpointNotFound)
}

/// Map a libusb failure to a transport error using libusb's own codes.
pub fn transport_error(e: rusb::Error) -> TransportError {
    let (code, name) = match e {
        rusb::Error::Io => (-1, "LIBUSB_ERROR_IO"),
        rusb::Error::InvalidParam => (-2, "LIBUSB_ERROR_INVALID_PARAM"),
        rusb::Error::Access => (-3, "LIBUSB_ERROR_ACCESS"),
        rusb::Error::NoDevice => (-4, "LIBUSB_ERROR_NO_DEVICE"),
        rusb::Error::NotFound => (-5, "LIBUSB_ERROR_NOT_FOUND"),
        rusb::Error::Busy => (-6, "LIBUSB_ERROR_BUSY"),
        rusb::Error::Timeout => (-7, "LIBUSB_ERROR_TIMEOUT"),
        rusb::Error::Overflow => (-8, "LIBUSB_ERROR_OVERFLOW"),
        rusb::Error::Pipe => (-9, "LIBUSB_ERROR_PIPE"),
        rusb::Error::Interrupted => (-10, "LIBUSB_ERROR_INTERRUPTED"),
        rusb::Error::NoMem => (-11, "LIBUSB_ERROR_NO_MEM"),
        rusb::Error::NotSupported => (-12, "LIBUSB_ERROR_NOT_SUPPORTED"),
        _ => (-99, "LIBUSB_ERROR_OTHER"),
    };
    TransportError::new(code, name)
}
