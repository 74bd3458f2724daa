//! Builder for columnar wire payloads.
//!
//! Mirrors the layout the decoders expect so tests can describe a block in
//! terms of values instead of raw bytes.

use bytes::{BufMut, Bytes, BytesMut};
use colstream_codec::varint::put_unsigned_varint;
use colstream_common::constants::{UUID_HALF_SIZE, UUID_SIZE};
use uuid::Uuid;

/// Accumulates an encoded payload.
///
/// # Example
///
/// ```rust
/// use colstream_test::WireBuilder;
///
/// let payload = WireBuilder::new().str("hello").str("foo").finish();
/// assert_eq!(&payload[..], b"\x05hello\x03foo");
/// ```
#[derive(Debug, Default)]
pub struct WireBuilder {
    buf: BytesMut,
}

impl WireBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a varint.
    pub fn varint(mut self, n: u64) -> Self {
        put_unsigned_varint(&mut self.buf, n);
        self
    }

    /// Appends a varint length-prefixed string.
    pub fn str(self, s: &str) -> Self {
        self.bytes_with_len(s.as_bytes())
    }

    /// Appends varint length-prefixed raw bytes.
    pub fn bytes_with_len(mut self, data: &[u8]) -> Self {
        put_unsigned_varint(&mut self.buf, data.len() as u64);
        self.buf.put_slice(data);
        self
    }

    /// Appends raw bytes.
    pub fn raw(mut self, data: &[u8]) -> Self {
        self.buf.put_slice(data);
        self
    }

    /// Appends a little-endian u16.
    pub fn u16(mut self, v: u16) -> Self {
        self.buf.put_u16_le(v);
        self
    }

    /// Appends a little-endian u32.
    pub fn u32(mut self, v: u32) -> Self {
        self.buf.put_u32_le(v);
        self
    }

    /// Appends a little-endian i32.
    pub fn i32(mut self, v: i32) -> Self {
        self.buf.put_i32_le(v);
        self
    }

    /// Appends a little-endian u64.
    pub fn u64(mut self, v: u64) -> Self {
        self.buf.put_u64_le(v);
        self
    }

    /// Appends a little-endian i64.
    pub fn i64(mut self, v: i64) -> Self {
        self.buf.put_i64_le(v);
        self
    }

    /// Appends a little-endian f64.
    pub fn f64(mut self, v: f64) -> Self {
        self.buf.put_f64_le(v);
        self
    }

    /// Appends an identifier in wire order (halves swapped).
    pub fn uuid(mut self, id: Uuid) -> Self {
        let be = id.as_bytes();
        self.buf.put_slice(&be[UUID_HALF_SIZE..UUID_SIZE]);
        self.buf.put_slice(&be[..UUID_HALF_SIZE]);
        self
    }

    /// Appends a null mask, one byte per row.
    pub fn null_mask(mut self, nulls: &[bool]) -> Self {
        for &null in nulls {
            self.buf.put_u8(u8::from(null));
        }
        self
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finishes the payload.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}
