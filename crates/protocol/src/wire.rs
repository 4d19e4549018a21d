//! proto2 wire format primitives
//!
//! Bounds-checked reads over a borrowed buffer without any schema knowledge.
//!
//! # Wire Format
//!
//! ```text
//! field := tag value
//! tag   := varint(field_number << 3 | wire_type)
//!
//! wire type 0: varint            (1..=10 bytes)
//! wire type 1: fixed 64-bit      (8 bytes, little-endian)
//! wire type 2: length-delimited  (varint length + bytes)
//! wire type 5: fixed 32-bit      (4 bytes, little-endian)
//! ```
//!
//! Wire types 3 and 4 (groups) and the reserved values 6 and 7 are rejected:
//! the decoder never guesses a size for them.

use crate::{DecodeError, MAX_VARINT_LEN, Result};

/// Wire type of a field, taken from the low three bits of its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
    /// Any other value (3, 4, 6, 7)
    Unsupported(u8),
}

impl WireType {
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Varint,
            1 => Self::Fixed64,
            2 => Self::LengthDelimited,
            5 => Self::Fixed32,
            other => Self::Unsupported(other),
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::LengthDelimited => 2,
            Self::Fixed32 => 5,
            Self::Unsupported(v) => v,
        }
    }
}

/// A decoded field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field: u64,
    pub wire_type: WireType,
}

impl Tag {
    /// Split a raw tag varint into field number and wire type
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            field: raw >> 3,
            wire_type: WireType::from_u8((raw & 0x7) as u8),
        }
    }

    /// Combine field number and wire type into the raw tag value
    #[inline]
    pub const fn to_raw(self) -> u64 {
        (self.field << 3) | self.wire_type.as_u8() as u64
    }
}

/// Forward-only cursor over a proto2 encoded buffer
///
/// The position only ever moves forward and never passes the end of the
/// buffer. A failed read leaves the position where it was.
#[derive(Debug, Clone, Copy)]
pub struct WireCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor at the start of `buf`
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once every byte has been consumed
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read a base-128 varint
    ///
    /// # Errors
    ///
    /// - `Truncated` if the buffer ends with the continuation bit still set
    /// - `Overflow` if the value needs more than 10 bytes
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, next) = read_varint(self.buf, self.pos)?;
        self.pos = next;
        Ok(value)
    }

    /// Read a field tag
    #[inline]
    pub fn read_tag(&mut self) -> Result<Tag> {
        self.read_varint().map(Tag::from_raw)
    }

    /// Read a length-prefixed byte slice, borrowed from the buffer
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let (bytes, next) = read_length_delimited(self.buf, self.pos)?;
        self.pos = next;
        Ok(bytes)
    }

    /// Read a little-endian 32-bit value
    pub fn read_fixed32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian 64-bit value
    pub fn read_fixed64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Advance past one field value of the given wire type
    ///
    /// # Errors
    ///
    /// `UnsupportedWireType` for anything other than 0, 1, 2 or 5, plus
    /// whatever the underlying read reports.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => self.read_varint().map(drop),
            WireType::Fixed64 => self.take(8).map(drop),
            WireType::LengthDelimited => self.read_length_delimited().map(drop),
            WireType::Fixed32 => self.take(4).map(drop),
            WireType::Unsupported(wt) => Err(DecodeError::unsupported_wire_type(wt, self.pos)),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = checked_end(self.buf, self.pos, n)?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

/// Read a varint at `offset`, returning the value and the offset after it
pub fn read_varint(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut pos = offset;

    loop {
        let Some(&byte) = buf.get(pos) else {
            return Err(DecodeError::truncated(pos, 1, 0));
        };
        pos += 1;

        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
        if pos - offset == MAX_VARINT_LEN {
            return Err(DecodeError::overflow(offset));
        }

        shift += 7;
    }
}

/// Read a length-delimited slice at `offset`, returning it and the offset after it
pub fn read_length_delimited(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (length, start) = read_varint(buf, offset)?;
    let length = usize::try_from(length)
        .map_err(|_| DecodeError::truncated(start, usize::MAX, buf.len() - start))?;
    let end = checked_end(buf, start, length)?;
    Ok((&buf[start..end], end))
}

#[inline]
fn checked_end(buf: &[u8], start: usize, len: usize) -> Result<usize> {
    match start.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(end),
        _ => Err(DecodeError::truncated(start, len, buf.len() - start)),
    }
}
