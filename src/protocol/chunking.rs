//! # Redraw Chunking
//!
//! A full frame is far larger than one transfer unit, so a redraw goes out
//! as a sequence of chunks. Each chunk is tagged with its 1-based sequence
//! number, its byte offset into the frame, its length, and a role telling
//! the panel where it sits in the sequence:
//!
//! ```text
//! Idle ─► Start(seq 1) ─► Continue(seq 2..n-1) ─► End(seq n) ─► Idle
//! ```
//!
//! ## Partitioning
//!
//! For a frame of `total` bytes and a chunk limit of `max` bytes there are
//! `ceil(total / max)` chunks. All chunks but the last are exactly `max`
//! bytes; the last carries whatever remains.
//!
//! ```text
//! 320×170 RGB565 frame = 108 800 bytes, max = 4096
//!
//! seq  1   offset      0  len 4096  Start
//! seq  2   offset   4096  len 4096  Continue
//! ...
//! seq 26   offset 102400  len 4096  Continue
//! seq 27   offset 106496  len 2304  End
//! ```

use std::ops::Range;

use crate::error::DisplayError;

/// Position of a chunk within a redraw sequence (the redraw subcommand byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChunkRole {
    Start = 0xF0,
    Continue = 0xF1,
    End = 0xF2,
}

/// One slice of a full-frame redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferChunk {
    /// 1-based, increasing by one per chunk
    pub sequence: u8,
    pub role: ChunkRole,
    /// Byte offset into the frame
    pub offset: usize,
    /// Bytes carried by this chunk
    pub length: usize,
}

impl TransferChunk {
    /// Byte range of this chunk within the frame.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Split `total_size` bytes into transfer chunks of at most `max_chunk_size`.
///
/// A plan with a single chunk tags it [`ChunkRole::End`]. An empty frame
/// produces an empty plan.
///
/// ## Errors
///
/// [`DisplayError::InvalidCommand`] if `max_chunk_size` is zero or the plan
/// would need more chunks than an 8-bit sequence number can count.
///
/// ## Example
///
/// ```
/// use s1display::protocol::chunking::{plan_chunks, ChunkRole};
///
/// let plan = plan_chunks(26 * 4096 + 2304, 4096)?;
/// assert_eq!(plan.len(), 27);
/// assert_eq!(plan[26].role, ChunkRole::End);
/// assert_eq!(plan[26].length, 2304);
/// # Ok::<(), s1display::DisplayError>(())
/// ```
pub fn plan_chunks(
    total_size: usize,
    max_chunk_size: usize,
) -> Result<Vec<TransferChunk>, DisplayError> {
    if max_chunk_size == 0 {
        return Err(DisplayError::InvalidCommand(
            "Chunk size must be non-zero".to_string(),
        ));
    }

    let count = total_size.div_ceil(max_chunk_size);
    if count > u8::MAX as usize {
        return Err(DisplayError::InvalidCommand(format!(
            "{} bytes need {} chunks of {}, more than the {} a redraw can sequence",
            total_size,
            count,
            max_chunk_size,
            u8::MAX
        )));
    }

    let last = count.saturating_sub(1);
    let chunks = (0..count)
        .map(|index| {
            let offset = index * max_chunk_size;
            let role = if index == last {
                ChunkRole::End
            } else if index == 0 {
                ChunkRole::Start
            } else {
                ChunkRole::Continue
            };
            TransferChunk {
                sequence: (index + 1) as u8,
                role,
                offset,
                length: max_chunk_size.min(total_size - offset),
            }
        })
        .collect();

    Ok(chunks)
}
