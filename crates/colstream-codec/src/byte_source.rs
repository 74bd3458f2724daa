//! Byte-level read interface shared by all column decoders.

use colstream_common::config::TextEncoding;

use crate::column::string::decode_text;
use crate::error::DecodeResult;
use crate::varint;

/// Sequential byte access over the wire stream.
///
/// Implemented by the chunk-spanning [`StreamCursor`](crate::StreamCursor)
/// and by the in-memory [`SliceSource`](crate::SliceSource).
pub trait ByteSource {
    /// Reads the next byte.
    fn read_byte(&mut self) -> DecodeResult<u8>;

    /// Reads exactly `n` contiguous bytes.
    ///
    /// The returned view is only valid until the next read.
    fn read_bytes(&mut self, n: usize) -> DecodeResult<&[u8]>;

    /// Text encoding applied by string decoders reading from this source.
    fn text_encoding(&self) -> TextEncoding {
        TextEncoding::default()
    }

    /// Reads a base-128 varint.
    fn read_leb128(&mut self) -> DecodeResult<u64> {
        varint::read_unsigned_varint(self)
    }

    /// Reads a little-endian unsigned 64-bit integer.
    fn read_uint64(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(read_fixed(self)?))
    }

    /// Reads a single varint length-prefixed string in
    /// [`text_encoding`](Self::text_encoding).
    ///
    /// Invalid text falls back to the hex form of the raw bytes.
    fn read_leb128_str(&mut self) -> DecodeResult<String> {
        let encoding = self.text_encoding();
        let len = varint::read_length(self)?;
        let bytes = self.read_bytes(len)?;
        Ok(decode_text(bytes, encoding))
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_byte(&mut self) -> DecodeResult<u8> {
        (**self).read_byte()
    }

    #[inline]
    fn read_bytes(&mut self, n: usize) -> DecodeResult<&[u8]> {
        (**self).read_bytes(n)
    }

    #[inline]
    fn text_encoding(&self) -> TextEncoding {
        (**self).text_encoding()
    }
}

/// Reads exactly `N` bytes into an owned array.
#[inline]
pub(crate) fn read_fixed<S: ByteSource + ?Sized, const N: usize>(
    source: &mut S,
) -> DecodeResult<[u8; N]> {
    let mut buf = [0u8; N];
    buf.copy_from_slice(source.read_bytes(N)?);
    Ok(buf)
}
