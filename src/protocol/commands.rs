//! # Panel Command Builders
//!
//! Every command is one bulk transfer of exactly [`BUFFER_SIZE`] bytes: an
//! 8-byte header region followed by up to [`DATA_SIZE`] bytes of payload.
//! Anything a command does not set stays zero.
//!
//! ## Buffer Layout
//!
//! ```text
//!  0        1         2            3 .. 8             8 .. 4104
//! ┌────────┬─────────┬────────────┬──────────────────┬───────────────┐
//! │ 0x55   │ command │ subcommand │ command fields   │ pixel payload │
//! └────────┴─────────┴────────────┴──────────────────┴───────────────┘
//! ```
//!
//! | Command | byte 1 | byte 2 | fields |
//! |---------|--------|--------|--------|
//! | Set orientation | `A1` | `F1` | `[3]` 1 = landscape, 2 = portrait |
//! | Heartbeat | `A1` | `F2` | `[3..6]` hour, minute, second |
//! | Set time | `A1` | `F3` | `[3..6]` hour, minute, second |
//! | Update region | `A2` | — | `[2..4]` x, `[4..6]` y, `[6]` w, `[7]` h |
//! | Redraw chunk | `A3` | `F0`/`F1`/`F2` | `[3]` seq, `[4..6]` offset, `[6..8]` length |
//!
//! ## Byte Order
//!
//! Multi-byte header integers are **big-endian**:
//! - `u16` value 0x1234 is sent as bytes `[0x12, 0x34]`

use super::chunking::TransferChunk;
use super::pixel::Rgb565;
use crate::clock::WallTime;
use crate::error::DisplayError;

// ============================================================================
// WIRE CONSTANTS
// ============================================================================

/// Size of every bulk transfer
pub const BUFFER_SIZE: usize = 4104;

/// Size of the header region ahead of the payload
pub const HEADER_SIZE: usize = 8;

/// Maximum payload bytes per transfer
pub const DATA_SIZE: usize = BUFFER_SIZE - HEADER_SIZE;

/// Protocol marker, first byte of every command
pub const SIGNATURE: u8 = 0x55;

/// Command discriminator (byte 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    Config = 0xA1,
    Refresh = 0xA2,
    Redraw = 0xA3,
}

/// Subcommands of [`Command::Config`] (byte 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConfigCommand {
    Orientation = 0xF1,
    Heartbeat = 0xF2,
    SetTime = 0xF3,
}

/// Panel orientation value carried by the orientation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Landscape = 0x01,
    Portrait = 0x02,
}

impl Orientation {
    pub fn from_portrait(portrait: bool) -> Self {
        if portrait {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

// Field offsets
const OFFSET_SUBCOMMAND: usize = 2;
const OFFSET_ORIENTATION: usize = 3;
const OFFSET_HOUR: usize = 3;
const OFFSET_MINUTE: usize = 4;
const OFFSET_SECOND: usize = 5;
const OFFSET_REGION_X: usize = 2;
const OFFSET_REGION_Y: usize = 4;
const OFFSET_REGION_W: usize = 6;
const OFFSET_REGION_H: usize = 7;
const OFFSET_SEQUENCE: usize = 3;
const OFFSET_CHUNK_OFFSET: usize = 4;
const OFFSET_CHUNK_LENGTH: usize = 6;

// ============================================================================
// COMMAND BUFFER
// ============================================================================

/// A zero-padded, fixed-size command ready for one bulk transfer.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Box<[u8; BUFFER_SIZE]>,
}

impl CommandBuffer {
    /// Start a command: marker and command byte set, everything else zero.
    fn new(command: Command) -> Self {
        let mut bytes = Box::new([0u8; BUFFER_SIZE]);
        bytes[0] = SIGNATURE;
        bytes[1] = command as u8;
        Self { bytes }
    }

    fn with_subcommand(command: Command, subcommand: u8) -> Self {
        let mut buf = Self::new(command);
        buf.put_u8(OFFSET_SUBCOMMAND, subcommand);
        buf
    }

    #[inline]
    fn put_u8(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    #[inline]
    fn put_u16(&mut self, offset: usize, value: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&u16_be(value));
    }

    /// Whole buffer, always [`BUFFER_SIZE`] bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    #[inline]
    pub fn command(&self) -> u8 {
        self.bytes[1]
    }

    #[inline]
    pub fn subcommand(&self) -> u8 {
        self.bytes[OFFSET_SUBCOMMAND]
    }

    /// Payload region after the 8-byte header.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[HEADER_SIZE..]
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CommandBuffer({:02x?} ..)", &self.bytes[..HEADER_SIZE])
    }
}

// ============================================================================
// CONFIG COMMANDS
// ============================================================================

/// # Set Orientation (55 A1 F1 o)
///
/// ## Example
///
/// ```
/// use s1display::protocol::commands::{self, Orientation};
///
/// let cmd = commands::set_orientation(Orientation::Portrait);
/// assert_eq!(&cmd.as_bytes()[..4], &[0x55, 0xA1, 0xF1, 0x02]);
/// assert_eq!(cmd.as_bytes().len(), 4104);
/// ```
pub fn set_orientation(orientation: Orientation) -> CommandBuffer {
    let mut buf = CommandBuffer::with_subcommand(Command::Config, ConfigCommand::Orientation as u8);
    buf.put_u8(OFFSET_ORIENTATION, orientation as u8);
    buf
}

/// # Set Time (55 A1 F3 h m s)
///
/// Sets the panel's clock to the given local time of day.
pub fn set_time(time: WallTime) -> CommandBuffer {
    clock_command(ConfigCommand::SetTime, time)
}

/// # Heartbeat (55 A1 F2 h m s)
///
/// Same layout as [`set_time`]; only the subcommand differs. The panel
/// expects one roughly every second to stay out of its idle screen.
pub fn heartbeat(time: WallTime) -> CommandBuffer {
    clock_command(ConfigCommand::Heartbeat, time)
}

fn clock_command(subcommand: ConfigCommand, time: WallTime) -> CommandBuffer {
    let mut buf = CommandBuffer::with_subcommand(Command::Config, subcommand as u8);
    buf.put_u8(OFFSET_HOUR, time.hour);
    buf.put_u8(OFFSET_MINUTE, time.minute);
    buf.put_u8(OFFSET_SECOND, time.second);
    buf
}

// ============================================================================
// REFRESH (PARTIAL UPDATE)
// ============================================================================

/// A rectangle of the panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u8,
    pub height: u8,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// # Update Region (55 A2 x y w h pixels...)
///
/// Repaints a rectangle in one transfer. Pixels are row-major, `width`
/// per row, and follow the header immediately.
///
/// ## Errors
///
/// [`DisplayError::InvalidCommand`] if `pixels` does not hold exactly
/// `width × height` entries, or if they would not fit in one transfer
/// (more than 2048 pixels).
///
/// ## Example
///
/// ```
/// use s1display::protocol::commands::{self, Region};
/// use s1display::protocol::pixel::Rgb565;
///
/// let pixels = vec![Rgb565::RED; 24 * 12];
/// let cmd = commands::update_region(Region::new(90, 90, 24, 12), &pixels)?;
/// assert_eq!(&cmd.as_bytes()[..8], &[0x55, 0xA2, 0, 90, 0, 90, 24, 12]);
/// # Ok::<(), s1display::DisplayError>(())
/// ```
pub fn update_region(region: Region, pixels: &[Rgb565]) -> Result<CommandBuffer, DisplayError> {
    let count = region.pixel_count();
    if pixels.len() != count {
        return Err(DisplayError::InvalidCommand(format!(
            "Region {}x{} needs {} pixels, got {}",
            region.width,
            region.height,
            count,
            pixels.len()
        )));
    }
    if count * 2 > DATA_SIZE {
        return Err(DisplayError::InvalidCommand(format!(
            "Region {}x{} is {} bytes, more than the {} one transfer carries",
            region.width,
            region.height,
            count * 2,
            DATA_SIZE
        )));
    }

    let mut buf = CommandBuffer::new(Command::Refresh);
    buf.put_u16(OFFSET_REGION_X, region.x);
    buf.put_u16(OFFSET_REGION_Y, region.y);
    buf.put_u8(OFFSET_REGION_W, region.width);
    buf.put_u8(OFFSET_REGION_H, region.height);

    for (dst, pixel) in buf.payload_mut().chunks_exact_mut(2).zip(pixels) {
        dst.copy_from_slice(&pixel.to_wire());
    }

    Ok(buf)
}

// ============================================================================
// REDRAW
// ============================================================================

/// # Redraw Chunk (55 A3 role seq offset length data...)
///
/// One piece of a full-frame redraw; see [`super::chunking`] for how a
/// frame is split. `data` is the chunk's slice of the encoded frame.
///
/// The offset field is 16 bits wide, so offsets past 65535 are written
/// modulo 2^16. The panel orders chunks by sequence number.
///
/// Fails with [`DisplayError::InvalidCommand`] if `chunk.length` exceeds
/// [`DATA_SIZE`] or `data` is not exactly `chunk.length` bytes.
pub fn redraw_chunk(chunk: &TransferChunk, data: &[u8]) -> Result<CommandBuffer, DisplayError> {
    if chunk.length > DATA_SIZE {
        return Err(DisplayError::InvalidCommand(format!(
            "Chunk {} is {} bytes, max is {}",
            chunk.sequence, chunk.length, DATA_SIZE
        )));
    }
    if data.len() != chunk.length {
        return Err(DisplayError::InvalidCommand(format!(
            "Chunk {} expects {} bytes, got {}",
            chunk.sequence,
            chunk.length,
            data.len()
        )));
    }

    let mut buf = CommandBuffer::with_subcommand(Command::Redraw, chunk.role as u8);
    buf.put_u8(OFFSET_SEQUENCE, chunk.sequence);
    buf.put_u16(OFFSET_CHUNK_OFFSET, chunk.offset as u16);
    buf.put_u16(OFFSET_CHUNK_LENGTH, chunk.length as u16);
    buf.payload_mut()[..data.len()].copy_from_slice(data);
    Ok(buf)
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Encode a u16 as big-endian bytes
///
/// ## Example
///
/// ```
/// use s1display::protocol::commands::u16_be;
///
/// assert_eq!(u16_be(0x1234), [0x12, 0x34]);
/// assert_eq!(u16_be(4096), [0x10, 0x00]);
/// ```
#[inline]
pub const fn u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::chunking::ChunkRole;

    #[test]
    fn test_orientation_portrait() {
        let cmd = set_orientation(Orientation::Portrait);
        assert_eq!(&cmd.as_bytes()[..4], &[0x55, 0xA1, 0xF1, 0x02]);
    }

    #[test]
    fn test_orientation_landscape() {
        let cmd = set_orientation(Orientation::from_portrait(false));
        assert_eq!(cmd.subcommand(), ConfigCommand::Orientation as u8);
        assert_eq!(cmd.as_bytes()[3], 0x01);
    }

    #[test]
    fn test_orientation_rest_is_zero() {
        let cmd = set_orientation(Orientation::Portrait);
        assert!(cmd.as_bytes()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_time_layout() {
        let cmd = set_time(WallTime::new(13, 45, 7));
        assert_eq!(&cmd.as_bytes()[..8], &[0x55, 0xA1, 0xF3, 13, 45, 7, 0, 0]);
        assert!(cmd.payload().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_heartbeat_differs_only_in_subcommand() {
        let time = WallTime::new(23, 59, 59);
        let hb = heartbeat(time);
        let st = set_time(time);

        assert_eq!(hb.subcommand(), 0xF2);
        assert_eq!(st.subcommand(), 0xF3);
        assert_eq!(hb.as_bytes()[..2], st.as_bytes()[..2]);
        assert_eq!(hb.as_bytes()[3..], st.as_bytes()[3..]);
    }

    #[test]
    fn test_every_command_is_transfer_sized() {
        let time = WallTime::new(0, 0, 0);
        let chunk = TransferChunk {
            sequence: 1,
            role: ChunkRole::Start,
            offset: 0,
            length: 4,
        };
        let buffers = [
            set_orientation(Orientation::Portrait),
            set_time(time),
            heartbeat(time),
            update_region(Region::new(0, 0, 1, 1), &[Rgb565::RED]).unwrap(),
            redraw_chunk(&chunk, &[1, 2, 3, 4]).unwrap(),
        ];
        for buf in &buffers {
            assert_eq!(buf.as_bytes().len(), BUFFER_SIZE);
            assert_eq!(buf.as_bytes()[0], SIGNATURE);
        }
    }

    #[test]
    fn test_update_region_header() {
        let pixels = vec![Rgb565::RED; 24 * 12];
        let cmd = update_region(Region::new(0x0102, 300, 24, 12), &pixels).unwrap();
        assert_eq!(
            &cmd.as_bytes()[..8],
            &[0x55, 0xA2, 0x01, 0x02, 0x01, 0x2C, 24, 12]
        );
    }

    #[test]
    fn test_update_region_payload() {
        let pixels = vec![Rgb565::RED; 24 * 12];
        let cmd = update_region(Region::new(90, 90, 24, 12), &pixels).unwrap();

        let payload = cmd.payload();
        for pair in payload[..576].chunks(2) {
            assert_eq!(pair, &[0x00, 0xF8]);
        }
        assert!(payload[576..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_update_region_row_major() {
        let pixels = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
        let cmd = update_region(Region::new(0, 0, 2, 2), &pixels).unwrap();
        assert_eq!(
            &cmd.payload()[..8],
            &[0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_update_region_full_transfer() {
        // 64 × 32 × 2 = 4096, exactly one payload
        let pixels = vec![Rgb565::WHITE; 64 * 32];
        let cmd = update_region(Region::new(0, 0, 64, 32), &pixels).unwrap();
        assert!(cmd.payload().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_update_region_too_large() {
        let pixels = vec![Rgb565::BLACK; 65 * 32];
        let err = update_region(Region::new(0, 0, 65, 32), &pixels).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidCommand(_)));
    }

    #[test]
    fn test_update_region_pixel_count_mismatch() {
        let err = update_region(Region::new(0, 0, 4, 4), &[Rgb565::BLACK; 15]).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidCommand(_)));
    }

    #[test]
    fn test_redraw_chunk_header() {
        let chunk = TransferChunk {
            sequence: 2,
            role: ChunkRole::Continue,
            offset: 4096,
            length: 4096,
        };
        let data = vec![0xAB; 4096];
        let cmd = redraw_chunk(&chunk, &data).unwrap();

        assert_eq!(
            &cmd.as_bytes()[..8],
            &[0x55, 0xA3, 0xF1, 2, 0x10, 0x00, 0x10, 0x00]
        );
        assert_eq!(cmd.payload(), &data[..]);
    }

    #[test]
    fn test_redraw_final_chunk_is_zero_padded() {
        let chunk = TransferChunk {
            sequence: 27,
            role: ChunkRole::End,
            offset: 26 * 4096,
            length: 2304,
        };
        let data = vec![0x11; 2304];
        let cmd = redraw_chunk(&chunk, &data).unwrap();

        assert_eq!(cmd.subcommand(), 0xF2);
        assert_eq!(cmd.as_bytes()[3], 27);
        // 106496 wraps to 0xA000 in the 16-bit field
        assert_eq!(&cmd.as_bytes()[4..6], &[0xA0, 0x00]);
        assert_eq!(&cmd.as_bytes()[6..8], &[0x09, 0x00]);
        assert!(cmd.payload()[..2304].iter().all(|&b| b == 0x11));
        assert!(cmd.payload()[2304..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_redraw_chunk_rejects_oversized_length() {
        let chunk = TransferChunk {
            sequence: 1,
            role: ChunkRole::Start,
            offset: 0,
            length: 70000,
        };
        let data = vec![0u8; 70000];
        let err = redraw_chunk(&chunk, &data).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidCommand(_)));
    }

    #[test]
    fn test_redraw_chunk_rejects_length_mismatch() {
        let chunk = TransferChunk {
            sequence: 3,
            role: ChunkRole::Continue,
            offset: 8192,
            length: 4096,
        };
        let err = redraw_chunk(&chunk, &[0u8; 100]).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidCommand(_)));
    }

    #[test]
    fn test_u16_be() {
        assert_eq!(u16_be(0), [0, 0]);
        assert_eq!(u16_be(0x00FF), [0x00, 0xFF]);
        assert_eq!(u16_be(0xFF00), [0xFF, 0x00]);
    }
}
