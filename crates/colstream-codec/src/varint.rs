//! Variable-length integer encoding (LEB128).
//!
//! Every length-delimited string and most block metadata carry this prefix:
//! little-endian base-128 groups, least significant group first, with bit 7
//! of each byte set when more bytes follow.

use bytes::BufMut;
use colstream_common::constants::MAX_VARINT_LEN;

use crate::byte_source::ByteSource;
use crate::error::{DecodeError, DecodeResult};

/// Reads an unsigned varint, one byte at a time.
///
/// Bytes may be split across any number of chunks. An encoding that does not
/// terminate within [`MAX_VARINT_LEN`] bytes, or whose tenth byte carries
/// bits beyond 64, fails with [`DecodeError::VarintOverflow`].
pub fn read_unsigned_varint<S: ByteSource + ?Sized>(source: &mut S) -> DecodeResult<u64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let b = source.read_byte()?;
        // The tenth byte may only carry the top bit of the value.
        if shift == 63 && b > 1 {
            return Err(DecodeError::VarintOverflow);
        }
        result |= u64::from(b & 0x7F) << shift;
        if b & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
        if shift >= 64 {
            return Err(DecodeError::VarintOverflow);
        }
    }
}

/// Reads a varint used as a byte or element count.
pub fn read_length<S: ByteSource + ?Sized>(source: &mut S) -> DecodeResult<usize> {
    let len = read_unsigned_varint(source)?;
    usize::try_from(len).map_err(|_| DecodeError::VarintOverflow)
}

/// Encodes `n` into `buf`. Returns the number of bytes written.
#[inline]
pub fn encode(mut n: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while n >= 0x80 {
        buf[i] = (n as u8) | 0x80;
        n >>= 7;
        i += 1;
    }
    buf[i] = n as u8;
    i + 1
}

/// Returns the encoded length of `n` without encoding it.
#[inline]
pub fn encoded_len(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Appends the varint encoding of `n` to a buffer.
pub fn put_unsigned_varint<B: BufMut>(buf: &mut B, n: u64) {
    let mut tmp = [0u8; MAX_VARINT_LEN];
    let len = encode(n, &mut tmp);
    buf.put_slice(&tmp[..len]);
}
