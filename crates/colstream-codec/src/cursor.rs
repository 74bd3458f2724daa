//! Chunk-spanning stream cursor.
//!
//! The cursor pulls chunks from a [`ChunkSource`] on demand and serves
//! byte-exact reads across chunk boundaries:
//! - Reads that fit in the current chunk are zero-copy views into it
//! - Reads that straddle a boundary are assembled in an owned scratch buffer
//! - The scratch buffer grows geometrically and never shrinks
//!
//! ## Regions
//!
//! ```text
//!            chunk k                 chunk k+1             chunk k+2
//! ... [#########|----]   [--------------------------]   [------|######] ...
//!               ^pos      copied into scratch (slow path)       ^new chunk region
//! ```
//!
//! Views returned by [`StreamCursor::read_bytes`] borrow the cursor, so they
//! cannot outlive the next read that may replace the chunk or overwrite the
//! scratch buffer.

use bytes::Bytes;
use tracing::{debug, trace};

use colstream_common::config::{DecoderConfig, TextEncoding};

use crate::byte_source::{read_fixed, ByteSource};
use crate::error::{DecodeError, DecodeResult};
use crate::source::ChunkSource;

/// The region the cursor is currently serving bytes from.
#[derive(Debug)]
enum Region {
    /// Zero-copy view into the most recently pulled chunk.
    Chunk {
        /// The chunk itself.
        data: Bytes,
        /// Offset of the next unread byte.
        pos: usize,
    },
    /// The last read was assembled in scratch storage and consumed every
    /// pulled byte.
    Scratch,
}

impl Region {
    fn empty() -> Self {
        Self::Chunk {
            data: Bytes::new(),
            pos: 0,
        }
    }

    fn remaining(&self) -> usize {
        match self {
            Self::Chunk { data, pos } => data.len() - pos,
            Self::Scratch => 0,
        }
    }
}

/// Counters describing the work a cursor has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorStats {
    /// Non-empty chunks pulled from the source.
    pub chunks_pulled: u64,
    /// Total bytes handed out to callers.
    pub bytes_consumed: u64,
    /// Multi-byte reads served directly from a chunk.
    pub zero_copy_reads: u64,
    /// Multi-byte reads assembled in the scratch buffer.
    pub scratch_reads: u64,
    /// Current scratch buffer capacity.
    pub scratch_capacity: usize,
}

/// Pull-based cursor over a stream of byte chunks.
///
/// A cursor is created once per response and exclusively owned by one
/// decoder at a time.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{ChunkIter, StreamCursor};
///
/// let mut cursor = StreamCursor::new(ChunkIter::new(vec![&b"ab"[..], &b"cd"[..]]));
/// assert_eq!(cursor.read_bytes(3).unwrap(), b"abc");
/// assert_eq!(cursor.read_byte().unwrap(), b'd');
/// assert!(cursor.read_byte().unwrap_err().is_end_of_stream());
/// ```
pub struct StreamCursor<S> {
    /// Upstream chunk source.
    source: S,
    /// Active region.
    region: Region,
    /// Owned storage for reads that straddle chunks.
    scratch: Vec<u8>,
    /// Configuration.
    config: DecoderConfig,
    /// Whether the source has reported its end.
    exhausted: bool,
    /// Whether the cursor has been released.
    closed: bool,
    /// Work counters.
    stats: CursorStats,
}

impl<S: ChunkSource> StreamCursor<S> {
    /// Creates a cursor with the default configuration.
    pub fn new(source: S) -> Self {
        Self::build(source, DecoderConfig::default())
    }

    /// Creates a cursor with the given configuration.
    pub fn with_config(source: S, config: DecoderConfig) -> DecodeResult<Self> {
        config.validate().map_err(DecodeError::config_error)?;
        Ok(Self::build(source, config))
    }

    fn build(source: S, config: DecoderConfig) -> Self {
        Self {
            source,
            region: Region::empty(),
            scratch: Vec::new(),
            config,
            exhausted: false,
            closed: false,
            stats: CursorStats::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the work counters.
    pub fn stats(&self) -> CursorStats {
        CursorStats {
            scratch_capacity: self.scratch.capacity(),
            ..self.stats
        }
    }

    /// Returns the number of bytes consumed since the cursor was created.
    pub fn position(&self) -> u64 {
        self.stats.bytes_consumed
    }

    /// Returns the number of pulled but unread bytes.
    pub fn buffered(&self) -> usize {
        self.region.remaining()
    }

    /// Returns true once the source has reported its end.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns true if the cursor has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Reads the next byte, pulling a chunk if the current one is spent.
    pub fn read_byte(&mut self) -> DecodeResult<u8> {
        self.ensure_open()?;
        loop {
            if let Region::Chunk { data, pos } = &mut self.region {
                if *pos < data.len() {
                    let byte = data[*pos];
                    *pos += 1;
                    self.stats.bytes_consumed += 1;
                    return Ok(byte);
                }
            }

            match self.pull_chunk()? {
                Some(chunk) => self.region = Region::Chunk { data: chunk, pos: 0 },
                None => return Err(DecodeError::end_of_stream(1, 0)),
            }
        }
    }

    /// Reads exactly `n` contiguous bytes.
    ///
    /// Returns a zero-copy view into the current chunk when it holds `n`
    /// unread bytes, otherwise assembles the bytes in the scratch buffer.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&[u8]> {
        self.ensure_open()?;
        if n == 0 {
            return Ok(&[]);
        }
        if n > self.config.max_read_size {
            return Err(DecodeError::read_too_large(n, self.config.max_read_size));
        }

        if self.region.remaining() == 0 {
            match self.pull_chunk()? {
                Some(chunk) => self.region = Region::Chunk { data: chunk, pos: 0 },
                None => return Err(DecodeError::end_of_stream(n, 0)),
            }
        }

        if self.region.remaining() >= n {
            return Ok(self.take_from_chunk(n));
        }
        self.read_straddling(n)
    }

    /// Reads a little-endian unsigned 64-bit integer.
    pub fn read_fixed_u64_le(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(read_fixed(self)?))
    }

    /// Releases the current chunk and frees the scratch buffer.
    ///
    /// Any later read fails with [`DecodeError::Closed`].
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        debug!(
            consumed = self.stats.bytes_consumed,
            chunks = self.stats.chunks_pulled,
            "closing stream cursor"
        );
        self.region = Region::empty();
        self.scratch = Vec::new();
        self.closed = true;
    }

    /// Consumes the cursor, returning the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn ensure_open(&self) -> DecodeResult<()> {
        if self.closed {
            return Err(DecodeError::Closed);
        }
        Ok(())
    }

    /// Serves `n` bytes from the current chunk. The caller checks that the
    /// chunk holds at least `n` unread bytes.
    fn take_from_chunk(&mut self, n: usize) -> &[u8] {
        self.stats.bytes_consumed += n as u64;
        self.stats.zero_copy_reads += 1;
        match &mut self.region {
            Region::Chunk { data, pos } => {
                let start = *pos;
                *pos += n;
                &data[start..start + n]
            }
            Region::Scratch => &[],
        }
    }

    fn read_straddling(&mut self, n: usize) -> DecodeResult<&[u8]> {
        self.scratch.clear();
        self.grow_scratch(n);

        // Carry the unread tail over before the chunk can be replaced.
        let previous = std::mem::replace(&mut self.region, Region::Scratch);
        if let Region::Chunk { data, pos } = previous {
            self.scratch.extend_from_slice(&data[pos..]);
        }

        while self.scratch.len() < n {
            let Some(chunk) = self.pull_chunk()? else {
                return Err(DecodeError::end_of_stream(n, self.scratch.len()));
            };

            let needed = n - self.scratch.len();
            if chunk.len() > needed {
                self.scratch.extend_from_slice(&chunk[..needed]);
                self.region = Region::Chunk {
                    data: chunk,
                    pos: needed,
                };
            } else {
                self.scratch.extend_from_slice(&chunk);
            }
        }

        self.stats.bytes_consumed += n as u64;
        self.stats.scratch_reads += 1;
        Ok(&self.scratch[..n])
    }

    /// Grows scratch capacity to the smallest power-of-two multiple of the
    /// current capacity that holds `2 * n` bytes.
    fn grow_scratch(&mut self, n: usize) {
        let target = n.saturating_mul(2);
        let current = self.scratch.capacity();
        if current >= target {
            return;
        }

        let mut capacity = current.max(self.config.initial_scratch_capacity);
        while capacity < target {
            capacity = capacity.saturating_mul(2);
        }
        self.scratch.reserve_exact(capacity - self.scratch.len());
        debug!(from = current, to = capacity, request = n, "grew scratch buffer");
    }

    fn pull_chunk(&mut self) -> DecodeResult<Option<Bytes>> {
        if self.exhausted {
            return Ok(None);
        }

        match self.source.next_chunk()? {
            Some(chunk) if !chunk.is_empty() => {
                self.stats.chunks_pulled += 1;
                trace!(len = chunk.len(), offset = self.stats.bytes_consumed, "pulled chunk");
                Ok(Some(chunk))
            }
            _ => {
                self.exhausted = true;
                debug!(consumed = self.stats.bytes_consumed, "chunk source exhausted");
                Ok(None)
            }
        }
    }
}

impl<S: ChunkSource> ByteSource for StreamCursor<S> {
    #[inline]
    fn read_byte(&mut self) -> DecodeResult<u8> {
        StreamCursor::read_byte(self)
    }

    #[inline]
    fn read_bytes(&mut self, n: usize) -> DecodeResult<&[u8]> {
        StreamCursor::read_bytes(self, n)
    }

    #[inline]
    fn text_encoding(&self) -> TextEncoding {
        self.config.encoding
    }

    #[inline]
    fn read_uint64(&mut self) -> DecodeResult<u64> {
        self.read_fixed_u64_le()
    }
}

impl<S> std::fmt::Debug for StreamCursor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCursor")
            .field("region", &self.region)
            .field("scratch_capacity", &self.scratch.capacity())
            .field("exhausted", &self.exhausted)
            .field("closed", &self.closed)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChunkIter;

    type TestCursor = StreamCursor<ChunkIter<std::vec::IntoIter<&'static [u8]>>>;

    fn cursor(chunks: Vec<&'static [u8]>) -> TestCursor {
        StreamCursor::new(ChunkIter::new(chunks))
    }

    #[test]
    fn test_read_byte_across_chunks() {
        let mut c = cursor(vec![&b"a"[..], &b"bc"[..]]);
        assert_eq!(c.read_byte().unwrap(), b'a');
        assert_eq!(c.read_byte().unwrap(), b'b');
        assert_eq!(c.read_byte().unwrap(), b'c');
        let err = c.read_byte().unwrap_err();
        assert!(err.is_end_of_stream());
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn test_zero_copy_fast_path() {
        let mut c = cursor(vec![&b"hello world"[..]]);
        assert_eq!(c.read_bytes(5).unwrap(), b"hello");
        assert_eq!(c.read_bytes(6).unwrap(), b" world");

        let stats = c.stats();
        assert_eq!(stats.zero_copy_reads, 2);
        assert_eq!(stats.scratch_reads, 0);
        assert_eq!(stats.scratch_capacity, 0);
    }

    #[test]
    fn test_straddling_read_keeps_remainder() {
        let mut c = cursor(vec![&b"abc"[..], &b"de"[..], &b"fghij"[..]]);
        assert_eq!(c.read_bytes(2).unwrap(), b"ab");
        assert_eq!(c.read_bytes(5).unwrap(), b"cdefg");
        assert_eq!(c.buffered(), 3);
        assert_eq!(c.read_bytes(3).unwrap(), b"hij");

        let stats = c.stats();
        assert_eq!(stats.chunks_pulled, 3);
        assert_eq!(stats.scratch_reads, 1);
        assert_eq!(stats.bytes_consumed, 10);
    }

    #[test]
    fn test_straddling_read_exact_fit() {
        let mut c = cursor(vec![&b"ab"[..], &b"cd"[..], &b"ef"[..]]);
        assert_eq!(c.read_bytes(4).unwrap(), b"abcd");
        assert_eq!(c.buffered(), 0);
        assert_eq!(c.read_bytes(2).unwrap(), b"ef");
    }

    #[test]
    fn test_empty_chunk_ends_stream() {
        let mut c = cursor(vec![&b"ab"[..], &b""[..], &b"cd"[..]]);
        let err = c.read_bytes(3).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::EndOfStream {
                requested: 3,
                available: 2
            }
        ));
        assert!(c.is_exhausted());
    }

    #[test]
    fn test_zero_length_read() {
        let mut c = cursor(vec![]);
        assert!(c.read_bytes(0).unwrap().is_empty());
        assert_eq!(c.stats().chunks_pulled, 0);
    }

    #[test]
    fn test_scratch_growth_policy() {
        let chunks = vec![vec![1u8; 100], vec![2u8; 100], vec![3u8; 1000], vec![4u8; 1000]];
        let config = DecoderConfig::default().with_initial_scratch_capacity(64);
        let mut c = StreamCursor::with_config(ChunkIter::new(chunks), config).unwrap();

        c.read_bytes(50).unwrap();
        c.read_bytes(60).unwrap(); // straddles: 2 * 60 = 120 -> 128
        let first = c.stats().scratch_capacity;
        assert_eq!(first, 128);

        c.read_bytes(1000).unwrap(); // straddles: 2000 -> 2048
        let second = c.stats().scratch_capacity;
        assert_eq!(second, 2048);
        assert_eq!(second % first, 0);
        assert!((second / first).is_power_of_two());

        // A small straddling read never shrinks the buffer.
        c.read_bytes(89).unwrap();
        assert_eq!(c.read_bytes(2).unwrap(), &[3u8, 4u8]);
        assert_eq!(c.stats().scratch_reads, 3);
        assert_eq!(c.stats().scratch_capacity, second);
    }

    #[test]
    fn test_read_too_large() {
        let config = DecoderConfig::default().with_max_read_size(16);
        let mut c = StreamCursor::with_config(ChunkIter::new(vec![vec![0u8; 32]]), config).unwrap();
        let err = c.read_bytes(17).unwrap_err();
        assert!(matches!(err, DecodeError::ReadTooLarge { size: 17, max: 16 }));
        assert_eq!(c.read_bytes(16).unwrap().len(), 16);
    }

    #[test]
    fn test_invalid_config() {
        let config = DecoderConfig::default().with_initial_scratch_capacity(3);
        let result = StreamCursor::with_config(ChunkIter::new(Vec::<Bytes>::new()), config);
        assert!(matches!(result, Err(DecodeError::ConfigError { .. })));
    }

    #[test]
    fn test_close_releases() {
        let mut c = cursor(vec![&b"ab"[..], &b"cd"[..]]);
        c.read_bytes(3).unwrap();
        assert!(c.stats().scratch_capacity > 0);

        c.close();
        assert!(c.is_closed());
        assert_eq!(c.stats().scratch_capacity, 0);
        assert_eq!(c.buffered(), 0);
        assert!(matches!(c.read_byte(), Err(DecodeError::Closed)));
        assert!(matches!(c.read_bytes(1), Err(DecodeError::Closed)));
    }

    #[test]
    fn test_read_fixed_u64() {
        let value: u64 = 0x0102_0304_0506_0708;
        let bytes = value.to_le_bytes();
        let (a, b) = bytes.split_at(3);
        let mut c = StreamCursor::new(ChunkIter::new(vec![a.to_vec(), b.to_vec()]));
        assert_eq!(c.read_fixed_u64_le().unwrap(), value);
    }
}
