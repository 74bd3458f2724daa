//! String columns.
//!
//! Text is decoded with the source's configured [`TextEncoding`]. A cell
//! whose bytes are not valid in that encoding is not an error: it decodes
//! to the lowercase hex form of its raw bytes, so one bad cell never shifts
//! or aborts the rest of the column.

use bytes::Bytes;
use colstream_common::config::TextEncoding;
use tracing::trace;

use crate::byte_source::ByteSource;
use crate::error::DecodeResult;
use crate::varint;

/// Decodes one cell, falling back to hex for invalid UTF-8.
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_owned(),
            Err(e) => {
                trace!(
                    len = bytes.len(),
                    valid_up_to = e.valid_up_to(),
                    "invalid utf-8 cell, using hex"
                );
                hex::encode(bytes)
            }
        },
        TextEncoding::Latin1 => bytes.iter().copied().map(char::from).collect(),
    }
}

/// Reads `rows` varint length-prefixed strings.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{column::read_str_col, SliceSource};
///
/// let mut source = SliceSource::new(b"\x05hello\x02\xff\xfe");
/// let column = read_str_col(&mut source, 2).unwrap();
/// assert_eq!(column, vec!["hello", "fffe"]);
/// ```
pub fn read_str_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<String>>
where
    S: ByteSource + ?Sized,
{
    let encoding = source.text_encoding();
    let mut column = Vec::with_capacity(rows);
    for _ in 0..rows {
        let len = varint::read_length(source)?;
        column.push(decode_text(source.read_bytes(len)?, encoding));
    }
    Ok(column)
}

/// Reads `rows` varint length-prefixed strings without decoding them.
pub fn read_raw_str_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<Bytes>>
where
    S: ByteSource + ?Sized,
{
    let mut column = Vec::with_capacity(rows);
    for _ in 0..rows {
        let len = varint::read_length(source)?;
        column.push(Bytes::copy_from_slice(source.read_bytes(len)?));
    }
    Ok(column)
}

/// Reads `rows` strings of exactly `size` bytes each.
///
/// Padding bytes are kept as part of the value.
pub fn read_fixed_str_col<S>(source: &mut S, size: usize, rows: usize) -> DecodeResult<Vec<String>>
where
    S: ByteSource + ?Sized,
{
    let encoding = source.text_encoding();
    if size == 0 {
        return Ok(vec![String::new(); rows]);
    }
    let block = source.read_bytes(size.saturating_mul(rows))?;
    Ok(block
        .chunks_exact(size)
        .map(|cell| decode_text(cell, encoding))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::StreamCursor;
    use crate::slice::SliceSource;
    use crate::source::ChunkIter;
    use colstream_common::config::DecoderConfig;

    #[test]
    fn test_split_at_string_boundary() {
        let chunks = vec![&b"\x05hello"[..], &b"\x03foo"[..]];
        let mut cursor = StreamCursor::new(ChunkIter::new(chunks));
        let column = read_str_col(&mut cursor, 2).unwrap();
        assert_eq!(column, vec!["hello", "foo"]);
    }

    #[test]
    fn test_split_mid_string_and_prefix() {
        let mut data = vec![0x80, 0x01];
        data.extend(std::iter::repeat(b'x').take(128));
        data.extend_from_slice(b"\x02ok");
        let chunks: Vec<Vec<u8>> = data.chunks(7).map(<[u8]>::to_vec).collect();

        let mut cursor = StreamCursor::new(ChunkIter::new(chunks));
        let column = read_str_col(&mut cursor, 2).unwrap();
        assert_eq!(column[0].len(), 128);
        assert_eq!(column[1], "ok");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_hex() {
        let mut source = SliceSource::new(b"\x02\xc3\x28\x01a");
        let column = read_str_col(&mut source, 2).unwrap();
        assert_eq!(column, vec!["c328", "a"]);
    }

    #[test]
    fn test_multibyte_utf8() {
        let text = "grüße 🌍";
        let mut data = vec![text.len() as u8];
        data.extend_from_slice(text.as_bytes());
        let column = read_str_col(&mut SliceSource::new(&data), 1).unwrap();
        assert_eq!(column, vec![text]);
    }

    #[test]
    fn test_latin1() {
        let mut source = SliceSource::new(b"\x04caf\xe9").with_encoding(TextEncoding::Latin1);
        let column = read_str_col(&mut source, 1).unwrap();
        assert_eq!(column, vec!["café"]);

        let mut source = SliceSource::new(b"caf\xe9").with_encoding(TextEncoding::Latin1);
        let column = read_fixed_str_col(&mut source, 4, 1).unwrap();
        assert_eq!(column, vec!["café"]);
    }

    #[test]
    fn test_cursor_applies_configured_encoding() {
        let chunks = vec![&b"\x02\xe9"[..], &b"t"[..]];
        let config = DecoderConfig::new(TextEncoding::Latin1);
        let mut cursor = StreamCursor::with_config(ChunkIter::new(chunks.clone()), config).unwrap();
        assert_eq!(read_str_col(&mut cursor, 1).unwrap(), vec!["ét"]);

        let mut cursor = StreamCursor::new(ChunkIter::new(chunks));
        assert_eq!(read_str_col(&mut cursor, 1).unwrap(), vec!["e974"]);
    }

    #[test]
    fn test_hex_fallback_is_lowercase() {
        assert_eq!(decode_text(&[0xC3, 0x28, 0x0A], TextEncoding::Utf8), "c3280a");
    }

    #[test]
    fn test_empty_strings() {
        let column = read_str_col(&mut SliceSource::new(&[0, 0]), 2).unwrap();
        assert_eq!(column, vec!["", ""]);
    }

    #[test]
    fn test_raw_str_col() {
        let column = read_raw_str_col(&mut SliceSource::new(b"\x02\xff\xfe\x00"), 2).unwrap();
        assert_eq!(column, vec![Bytes::from_static(b"\xff\xfe"), Bytes::new()]);
    }

    #[test]
    fn test_fixed_str_col() {
        let mut source = SliceSource::new(b"ab\0cd\0\xff\xff\xff");
        let column = read_fixed_str_col(&mut source, 3, 3).unwrap();
        assert_eq!(column, vec!["ab\0", "cd\0", "ffffff"]);
        assert!(source.is_empty());

        let column = read_fixed_str_col(&mut SliceSource::new(&[]), 0, 2).unwrap();
        assert_eq!(column, vec!["", ""]);
    }

    #[test]
    fn test_truncated_string() {
        let err = read_str_col(&mut SliceSource::new(b"\x05hel"), 1).unwrap_err();
        assert!(err.is_end_of_stream());
    }
}
