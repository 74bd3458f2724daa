//! Decoder error types.
//!
//! This module defines all error types for the streaming decoder.

use std::io;
use thiserror::Error;

/// Result type for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a chunk stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source ran out of chunks before a read could be satisfied.
    #[error("stream ended unexpectedly: needed {requested} bytes, {available} available")]
    EndOfStream {
        /// Bytes the read asked for.
        requested: usize,
        /// Bytes that were still available when the source ended.
        available: usize,
    },

    /// The chunk source failed to produce the next chunk.
    #[error("chunk source error: {source}")]
    Source {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// A single read exceeded the configured bound.
    #[error("read too large: {size} bytes exceeds maximum {max} bytes")]
    ReadTooLarge {
        /// Requested read size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A varint ran past the width of a 64-bit accumulator.
    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    /// A day offset fell outside the supported calendar range.
    #[error("day offset {days} is outside the supported date range")]
    DateOutOfRange {
        /// Offending day offset from 1970-01-01.
        days: i64,
    },

    /// A timestamp could not be represented.
    #[error("timestamp {seconds}s is outside the supported range")]
    TimestampOutOfRange {
        /// Offending offset in seconds from the Unix epoch.
        seconds: i64,
    },

    /// A `DateTime64` precision above nanoseconds was requested.
    #[error("unsupported DateTime64 precision {precision} (max 9)")]
    InvalidPrecision {
        /// Requested number of sub-second digits.
        precision: u8,
    },

    /// The cursor was read after being closed.
    #[error("stream cursor is closed")]
    Closed,

    /// Configuration error.
    #[error("decoder configuration error: {reason}")]
    ConfigError {
        /// Description of the invalid setting.
        reason: String,
    },
}

impl DecodeError {
    /// Creates an end-of-stream error.
    pub fn end_of_stream(requested: usize, available: usize) -> Self {
        Self::EndOfStream {
            requested,
            available,
        }
    }

    /// Creates a read too large error.
    pub fn read_too_large(size: usize, max: usize) -> Self {
        Self::ReadTooLarge { size, max }
    }

    /// Creates a config error.
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Returns true if the stream ended before the data it promised.
    ///
    /// Callers use this to tell a truncated response apart from a
    /// server-reported error.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream { .. })
    }

    /// Returns true if retrying the whole request may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EndOfStream { .. } | Self::Source { .. })
    }

    /// Returns true if the bytes themselves could not be interpreted.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::VarintOverflow
                | Self::DateOutOfRange { .. }
                | Self::TimestampOutOfRange { .. }
                | Self::ReadTooLarge { .. }
        )
    }
}
