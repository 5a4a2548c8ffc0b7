//! # Binary Cursor
//!
//! Sequential typed reader and writer over an in-memory byte buffer.
//!
//! Every multi-octet read and write honours the cursor's [`ByteOrder`]. DIS
//! mandates network (big-endian) order, but the order is negotiated by the
//! transport, so both directions are supported.
//!
//! Reads are bounds-checked and return [`DisError::Truncated`] rather than
//! panicking. [`DisReader::take`] carves out a sub-reader bounded to exactly a
//! declared length; self-framed units decode from such a sub-reader so they can
//! never consume more, and the parent always advances by the full declared length.

use crate::error::{DisError, Result};
use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Octet order for multi-octet fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Network order, required by IEEE 1278.1
    #[default]
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::BigEndian => "big_endian",
            ByteOrder::LittleEndian => "little_endian",
        }
    }

    /// Parse a configuration value such as `big_endian` or `le`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "big_endian" | "big" | "be" | "network" => Some(ByteOrder::BigEndian),
            "little_endian" | "little" | "le" => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

macro_rules! read_fixed {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $be:ident, $le:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self) -> Result<$ty> {
            let mut src = self.claim(std::mem::size_of::<$ty>())?;
            Ok(match self.order {
                ByteOrder::BigEndian => src.$be(),
                ByteOrder::LittleEndian => src.$le(),
            })
        }
    };
}

macro_rules! write_fixed {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $be:ident, $le:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, value: $ty) {
            match self.order {
                ByteOrder::BigEndian => self.buf.$be(value),
                ByteOrder::LittleEndian => self.buf.$le(value),
            }
        }
    };
}

/// Bounded, bounds-checked reader over a byte slice
#[derive(Debug, Clone)]
pub struct DisReader<'a> {
    buf: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> DisReader<'a> {
    pub fn new(buf: &'a [u8], order: ByteOrder) -> Self {
        Self { buf, pos: 0, order }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Octets consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Octets left before the end of this reader's bound
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reserve `n` octets and return them, advancing past them.
    fn claim(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DisError::truncated(n, remaining));
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..start + n])
    }

    /// Fail with [`DisError::Truncated`] unless at least `n` octets remain.
    pub fn ensure(&self, n: usize) -> Result<()> {
        let remaining = self.remaining();
        if n > remaining {
            Err(DisError::truncated(n, remaining))
        } else {
            Ok(())
        }
    }

    read_fixed!(read_u16, u16, get_u16, get_u16_le);
    read_fixed!(read_u32, u32, get_u32, get_u32_le);
    read_fixed!(read_u64, u64, get_u64, get_u64_le);
    read_fixed!(read_i16, i16, get_i16, get_i16_le);
    read_fixed!(read_i32, i32, get_i32, get_i32_le);
    read_fixed!(
        /// IEEE-754 single precision
        read_f32, f32, get_f32, get_f32_le
    );
    read_fixed!(
        /// IEEE-754 double precision
        read_f64, f64, get_f64, get_f64_le
    );

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.claim(1)?[0])
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a raw run of `n` octets.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.claim(n)?.to_vec())
    }

    /// Read a fixed-size octet array (markings, call signs).
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.claim(N)?);
        Ok(out)
    }

    /// Skip `n` octets without interpreting them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.claim(n).map(|_| ())
    }

    /// Split off a reader bounded to the next `n` octets and advance past them.
    pub fn take(&mut self, n: usize) -> Result<DisReader<'a>> {
        let slice = self.claim(n)?;
        Ok(DisReader::new(slice, self.order))
    }

    /// Rewind or fast-forward to an absolute position within this reader.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.buf.len() {
            return Err(DisError::truncated(position, self.buf.len()));
        }
        self.pos = position;
        Ok(())
    }

    /// Everything not yet consumed, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

/// Typed writer appending to a `BytesMut`.
///
/// Counts and lengths go through [`DisWriter::write_count_u16`] and friends.
/// A value too wide for its field is remembered rather than truncated, and
/// [`DisWriter::finish`] reports it; output written after an overflow must
/// be discarded.
#[derive(Debug)]
pub struct DisWriter<'a> {
    buf: &'a mut BytesMut,
    start: usize,
    order: ByteOrder,
    overflow: Option<DisError>,
}

impl<'a> DisWriter<'a> {
    pub fn new(buf: &'a mut BytesMut, order: ByteOrder) -> Self {
        let start = buf.len();
        Self {
            buf,
            start,
            order,
            overflow: None,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Octets written through this writer
    pub fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    write_fixed!(write_u16, u16, put_u16, put_u16_le);
    write_fixed!(write_u32, u32, put_u32, put_u32_le);
    write_fixed!(write_u64, u64, put_u64, put_u64_le);
    write_fixed!(write_i16, i16, put_i16, put_i16_le);
    write_fixed!(write_i32, i32, put_i32, put_i32_le);
    write_fixed!(write_f32, f32, put_f32, put_f32_le);
    write_fixed!(write_f64, f64, put_f64, put_f64_le);

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Zero-valued filler octets
    pub fn write_zeros(&mut self, n: usize) {
        self.buf.put_bytes(0, n);
    }

    /// Narrow a count or length to 16 bits, recording an overflow when it
    /// does not fit. The returned placeholder is `u16::MAX`.
    pub fn narrow_u16(&mut self, value: usize, what: &'static str) -> u16 {
        match u16::try_from(value) {
            Ok(narrow) => narrow,
            Err(_) => {
                self.record_overflow(what, value, u16::MAX as usize);
                u16::MAX
            }
        }
    }

    pub fn write_count_u16(&mut self, value: usize, what: &'static str) {
        let narrow = self.narrow_u16(value, what);
        self.write_u16(narrow);
    }

    pub fn write_count_u32(&mut self, value: usize, what: &'static str) {
        let narrow = match u32::try_from(value) {
            Ok(narrow) => narrow,
            Err(_) => {
                self.record_overflow(what, value, u32::MAX as usize);
                u32::MAX
            }
        };
        self.write_u32(narrow);
    }

    fn record_overflow(&mut self, what: &'static str, value: usize, limit: usize) {
        if self.overflow.is_none() {
            self.overflow = Some(DisError::FieldOverflow { what, value, limit });
        }
    }

    /// Report the first field overflow seen by this writer.
    pub fn finish(&mut self) -> Result<()> {
        match self.overflow.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
