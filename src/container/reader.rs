//! Bounds-checked little-endian primitives over a byte buffer.
//!
//! Every container header field is decoded through these helpers so that an
//! offset past the end of the buffer is a recoverable error, never garbage
//! and never a panic.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{ExtractError, Result};

fn out_of_bounds(offset: usize, len: usize) -> ExtractError {
    ExtractError::Structural(format!("read past end of buffer (offset {offset}, length {len})"))
}

fn tail(data: &[u8], offset: usize) -> Result<&[u8]> {
    data.get(offset..)
        .ok_or_else(|| out_of_bounds(offset, data.len()))
}

/// Decode an unsigned 16-bit little-endian integer at `offset`.
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    let mut cursor = Cursor::new(tail(data, offset)?);
    cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| out_of_bounds(offset, data.len()))
}

/// Decode an unsigned 32-bit little-endian integer at `offset`.
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    let mut cursor = Cursor::new(tail(data, offset)?);
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| out_of_bounds(offset, data.len()))
}

/// Decode `len` bytes at `offset` as a UTF-8 string.
///
/// Invalid sequences are replaced rather than rejected; entry names in
/// real-world containers are not always clean UTF-8.
pub fn read_str(data: &[u8], offset: usize, len: usize) -> Result<String> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| out_of_bounds(offset, data.len()))?;
    let bytes = data
        .get(offset..end)
        .ok_or_else(|| out_of_bounds(offset, data.len()))?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
