//! # Protocol Tests
//!
//! End-to-end checks of the bytes the panel receives, driven through
//! [`LcdDevice`] with a [`RecordingTransport`] standing in for USB.
//!
//! ## Coverage
//!
//! - Buffer sizing and zero padding for every command
//! - Orientation values and byte-identical repeats
//! - Full redraw: chunk count, order, framing, payload
//! - Redraw aborting on an injected transport failure
//! - Partial update payload size

use pretty_assertions::assert_eq;

use s1display::clock::FixedClock;
use s1display::error::Operation;
use s1display::protocol::chunking::{ChunkRole, plan_chunks};
use s1display::protocol::commands::{BUFFER_SIZE, DATA_SIZE, HEADER_SIZE};
use s1display::protocol::pixel::Rgb565;
use s1display::transport::RecordingTransport;
use s1display::{DisplayError, Frame, LcdDevice, PanelConfig};

const PANEL: PanelConfig = PanelConfig::HT32_320X170;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn device_with(transport: RecordingTransport) -> LcdDevice<RecordingTransport, FixedClock> {
    LcdDevice::with_clock(transport, FixedClock::at(8, 15, 30))
}

fn device() -> LcdDevice<RecordingTransport, FixedClock> {
    device_with(RecordingTransport::new())
}

fn black_frame() -> Frame {
    Frame::solid(&PANEL, Rgb565::BLACK)
}

/// Read a big-endian u16 header field.
fn be16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

// ============================================================================
// COMMAND BUFFERS
// ============================================================================

#[test]
fn test_all_operations_send_transfer_sized_buffers() {
    let mut dev = device();
    dev.set_orientation(true).unwrap();
    dev.set_time().unwrap();
    dev.send_heartbeat().unwrap();
    dev.update_region(90, 90, 24, 12, &[Rgb565::RED; 24 * 12]).unwrap();
    dev.redraw(&black_frame()).unwrap();

    let sent = dev.transport().sent();
    assert_eq!(sent.len(), 4 + 27);
    for buf in sent {
        assert_eq!(buf.len(), BUFFER_SIZE);
        assert_eq!(buf[0], 0x55);
    }
}

#[test]
fn test_orientation_values() {
    let mut dev = device();
    dev.set_orientation(true).unwrap();
    dev.set_orientation(false).unwrap();

    let sent = dev.transport().sent();
    assert_eq!(&sent[0][..4], &[0x55, 0xA1, 0xF1, 0x02]);
    assert_eq!(&sent[1][..4], &[0x55, 0xA1, 0xF1, 0x01]);
}

#[test]
fn test_orientation_is_idempotent() {
    let mut dev = device();
    dev.set_orientation(true).unwrap();
    dev.set_orientation(true).unwrap();

    let sent = dev.transport().sent();
    assert_eq!(sent[0], sent[1]);
}

#[test]
fn test_time_commands_embed_clock() {
    let mut dev = device();
    dev.set_time().unwrap();
    dev.send_heartbeat().unwrap();

    let sent = dev.transport().sent();
    assert_eq!(&sent[0][..8], &[0x55, 0xA1, 0xF3, 8, 15, 30, 0, 0]);
    assert_eq!(&sent[1][..8], &[0x55, 0xA1, 0xF2, 8, 15, 30, 0, 0]);
    assert!(sent[0][8..].iter().all(|&b| b == 0));
}

// ============================================================================
// FULL REDRAW
// ============================================================================

#[test]
fn test_redraw_plan_for_panel() {
    let plan = plan_chunks(PANEL.frame_bytes(), DATA_SIZE).unwrap();

    assert_eq!(plan.len(), 27);
    assert_eq!(plan[0].role, ChunkRole::Start);
    assert_eq!(plan[0].offset, 0);
    assert!(plan[1..26].iter().all(|c| c.role == ChunkRole::Continue));
    assert_eq!(plan[26].role, ChunkRole::End);
    assert_eq!(plan[26].length, 2304);
    assert_eq!(plan[26].offset, 26 * 4096);
    assert_eq!(
        plan.iter().map(|c| c.length).sum::<usize>(),
        4096 * 26 + 2304
    );
}

#[test]
fn test_redraw_black_frame_sends_27_ordered_chunks() {
    let mut dev = device();
    dev.redraw(&black_frame()).unwrap();

    let sent = dev.transport().sent();
    assert_eq!(sent.len(), 27);

    for (i, buf) in sent.iter().enumerate() {
        let expected_role = match i {
            0 => ChunkRole::Start,
            26 => ChunkRole::End,
            _ => ChunkRole::Continue,
        };
        assert_eq!(buf.len(), BUFFER_SIZE);
        assert_eq!(buf[1], 0xA3);
        assert_eq!(buf[2], expected_role as u8);
        assert_eq!(buf[3] as usize, i + 1);
        assert_eq!(be16(buf, 4), (i * 4096) as u16);

        let length = if i == 26 { 2304 } else { 4096 };
        assert_eq!(be16(buf, 6) as usize, length);
        assert!(buf[HEADER_SIZE..].iter().all(|&b| b == 0));
    }
}

#[test]
fn test_redraw_payload_reassembles_frame() {
    let pixels: Vec<Rgb565> = (0..PANEL.pixel_count())
        .map(|i| Rgb565::from_value(i as u16))
        .collect();
    let frame = Frame::from_pixels(PANEL.width, PANEL.height, pixels).unwrap();

    let mut dev = device();
    dev.redraw(&frame).unwrap();

    let mut reassembled = Vec::new();
    for buf in dev.transport().sent() {
        let length = be16(buf, 6) as usize;
        reassembled.extend_from_slice(&buf[HEADER_SIZE..HEADER_SIZE + length]);
    }
    assert_eq!(reassembled, frame.to_bytes());
}

#[test]
fn test_redraw_aborts_on_failing_chunk() {
    let mut dev = device_with(RecordingTransport::failing_on(15));
    let err = dev.redraw(&black_frame()).unwrap_err();

    match err {
        DisplayError::TransportFailure {
            operation, chunk, ..
        } => {
            assert_eq!(operation, Operation::Redraw);
            assert_eq!(chunk, Some(15));
        }
        other => panic!("expected transport failure, got {:?}", other),
    }

    // Chunks 1..=14 stay sent, 16 is never attempted
    assert_eq!(dev.transport().sent().len(), 14);
    assert_eq!(dev.transport().attempts(), 15);
    assert_eq!(dev.transport().sent()[13][3], 14);
}

#[test]
fn test_redraw_restarts_from_idle() {
    let mut dev = device();
    dev.redraw(&black_frame()).unwrap();
    dev.redraw(&black_frame()).unwrap();

    let sent = dev.transport().sent();
    assert_eq!(sent.len(), 54);
    assert_eq!(sent[27][2], ChunkRole::Start as u8);
    assert_eq!(sent[27][3], 1);
    assert_eq!(sent[..27], sent[27..]);
}

// ============================================================================
// PARTIAL UPDATE
// ============================================================================

#[test]
fn test_update_region_payload_size() {
    let mut dev = device();
    dev.update_region(90, 90, 24, 12, &[Rgb565::RED; 24 * 12]).unwrap();

    let buf = &dev.transport().sent()[0];
    assert_eq!(&buf[..HEADER_SIZE], &[0x55, 0xA2, 0, 90, 0, 90, 24, 12]);

    let payload = &buf[HEADER_SIZE..];
    let pixel_bytes = 24 * 12 * 2;
    assert_eq!(pixel_bytes, 576);
    assert!(payload[..pixel_bytes].chunks(2).all(|p| p == [0x00, 0xF8]));
    assert!(payload[pixel_bytes..].iter().all(|&b| b == 0));
}

#[test]
fn test_update_region_failure_names_operation() {
    let mut dev = device_with(RecordingTransport::failing_on(1));
    let err = dev.update_region(0, 0, 1, 1, &[Rgb565::WHITE]).unwrap_err();

    assert!(matches!(
        err,
        DisplayError::TransportFailure {
            operation: Operation::UpdateRegion,
            chunk: None,
            ..
        }
    ));
}
