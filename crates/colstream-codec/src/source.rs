//! Chunk sources.
//!
//! A chunk source is the upstream collaborator that hands the cursor plain,
//! already-decompressed bytes. Chunk boundaries carry no meaning for the
//! wire format. `None` or a zero-length chunk ends the stream.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};
use colstream_common::config::DecoderConfig;
use tracing::trace;

use crate::error::DecodeResult;

/// A pull source of byte chunks.
pub trait ChunkSource {
    /// Returns the next chunk, or `None` once the source is exhausted.
    ///
    /// A returned zero-length chunk is treated the same as `None`.
    fn next_chunk(&mut self) -> DecodeResult<Option<Bytes>>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn next_chunk(&mut self) -> DecodeResult<Option<Bytes>> {
        (**self).next_chunk()
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn next_chunk(&mut self) -> DecodeResult<Option<Bytes>> {
        (**self).next_chunk()
    }
}

/// Chunk source over any iterator of byte buffers.
///
/// # Example
///
/// ```rust
/// use colstream_codec::source::{ChunkIter, ChunkSource};
///
/// let mut source = ChunkIter::new(vec![&b"\x05hello"[..], &b"\x03foo"[..]]);
/// assert_eq!(source.next_chunk().unwrap().unwrap().len(), 6);
/// ```
#[derive(Debug)]
pub struct ChunkIter<I> {
    inner: I,
}

impl<I> ChunkIter<I> {
    /// Wraps an iterator (or anything iterable) of chunks.
    pub fn new<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: chunks.into_iter(),
        }
    }

    /// Returns the wrapped iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I, B> ChunkSource for ChunkIter<I>
where
    I: Iterator<Item = B>,
    B: Into<Bytes>,
{
    fn next_chunk(&mut self) -> DecodeResult<Option<Bytes>> {
        Ok(self.inner.next().map(Into::into))
    }
}

/// Chunk source that pulls fixed-size chunks from a blocking reader.
///
/// The reader is typically a decompressing response body. A read returning
/// zero bytes ends the stream.
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
    finished: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a reader source producing chunks of at most `chunk_size` bytes.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            finished: false,
        }
    }

    /// Creates a reader source using `config.reader_chunk_size`.
    pub fn from_config(reader: R, config: &DecoderConfig) -> Self {
        Self::new(reader, config.reader_chunk_size)
    }

    /// Returns the configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> DecodeResult<Option<Bytes>> {
        if self.finished {
            return Ok(None);
        }

        let mut buf = BytesMut::zeroed(self.chunk_size);
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.finished = true;
                    return Ok(None);
                }
                Ok(n) => {
                    buf.truncate(n);
                    trace!(len = n, "pulled chunk from reader");
                    return Ok(Some(buf.freeze()));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("chunk_size", &self.chunk_size)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
