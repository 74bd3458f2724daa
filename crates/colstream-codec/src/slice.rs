//! In-memory byte source.
//!
//! Used to decode single values out of a buffer that is already complete,
//! for example a variant-encoded value embedded in another column.

use colstream_common::config::TextEncoding;

use crate::byte_source::ByteSource;
use crate::error::{DecodeError, DecodeResult};

/// A [`ByteSource`] over a borrowed byte slice.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{ByteSource, SliceSource};
///
/// let mut source = SliceSource::new(b"\x03abc");
/// assert_eq!(source.read_leb128().unwrap(), 3);
/// assert_eq!(source.read_bytes(3).unwrap(), b"abc");
/// assert!(source.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
    encoding: TextEncoding,
}

impl<'a> SliceSource<'a> {
    /// Creates a source reading `data` from the start.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            encoding: TextEncoding::default(),
        }
    }

    /// Sets the text encoding used by string decoders.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Returns the current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self) -> DecodeResult<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| DecodeError::end_of_stream(1, 0))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, n: usize) -> DecodeResult<&[u8]> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::end_of_stream(n, available));
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..start + n])
    }

    fn text_encoding(&self) -> TextEncoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let mut source = SliceSource::new(&[1, 2, 3, 4, 5]);
        assert_eq!(source.read_byte().unwrap(), 1);
        assert_eq!(source.read_bytes(3).unwrap(), &[2, 3, 4]);
        assert_eq!(source.position(), 4);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_read_past_end() {
        let mut source = SliceSource::new(&[1, 2]);
        let err = source.read_bytes(3).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::EndOfStream {
                requested: 3,
                available: 2
            }
        ));
        // A failed read consumes nothing.
        assert_eq!(source.position(), 0);

        source.read_bytes(2).unwrap();
        assert!(source.read_byte().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_scalar_helpers() {
        let mut data = Vec::new();
        data.extend_from_slice(&42u64.to_le_bytes());
        data.extend_from_slice(b"\x02hi");
        let mut source = SliceSource::new(&data);

        assert_eq!(source.read_uint64().unwrap(), 42);
        assert_eq!(source.read_leb128_str().unwrap(), "hi");
        assert!(source.is_empty());
    }

    #[test]
    fn test_configured_encoding() {
        let mut source = SliceSource::new(b"\x01\xe9\x01\xe9");
        assert_eq!(source.text_encoding(), TextEncoding::Utf8);
        assert_eq!(source.read_leb128_str().unwrap(), "e9");

        let mut source = SliceSource::new(b"\x01\xe9").with_encoding(TextEncoding::Latin1);
        assert_eq!(source.read_leb128_str().unwrap(), "é");
    }
}
