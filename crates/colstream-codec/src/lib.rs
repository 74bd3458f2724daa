//! # colstream-codec
//!
//! Streaming decoder for a chunked columnar binary wire format.
//!
//! A response arrives as a sequence of byte chunks whose boundaries carry no
//! meaning: a varint, a string, or an entire value block may be split at any
//! byte. This crate provides:
//! - A stream cursor that turns those chunks into contiguous reads
//! - LEB128 varint decoding
//! - Epoch-day to calendar date conversion
//! - Column decoders for numbers, strings, identifiers, addresses, dates,
//!   timestamps, and nullable wrappers
//!
//! # Architecture
//!
//! ```text
//!   ChunkSource ──► StreamCursor ──► ByteSource ──► column::read_*_col
//!   (Bytes chunks)  (zero-copy or     (read_byte,      (Vec<T> per column)
//!                    scratch copy)     read_bytes)
//! ```
//!
//! Every decoder is generic over [`ByteSource`], so the same code decodes a
//! live chunk stream or an in-memory [`SliceSource`].
//!
//! # Example
//!
//! ```rust
//! use colstream_codec::column::{read_array, read_str_col};
//! use colstream_codec::{ChunkIter, StreamCursor};
//!
//! let chunks = vec![&b"\x05hel"[..], &b"lo\x03foo\x2a"[..], &b"\x00"[..]];
//! let mut cursor = StreamCursor::new(ChunkIter::new(chunks));
//!
//! let names = read_str_col(&mut cursor, 2).unwrap();
//! let ids: Vec<u16> = read_array(&mut cursor, 1).unwrap();
//! assert_eq!(names, vec!["hello", "foo"]);
//! assert_eq!(ids, vec![42]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod byte_source;
mod cursor;
mod error;
mod slice;

/// Chunk producers.
pub mod source;

/// Variable-length integer codec.
pub mod varint;

/// Epoch day to calendar date conversion.
pub mod calendar;

/// Typed column decoders.
pub mod column;

// Re-exports for convenience
pub use byte_source::ByteSource;
pub use cursor::{CursorStats, StreamCursor};
pub use error::{DecodeError, DecodeResult};
pub use slice::SliceSource;
pub use source::{ChunkIter, ChunkSource, ReaderSource};
