//! System-wide constants for colstream.
//!
//! Wire sizes are fixed by the columnar binary format; decoder limits are
//! defaults that `DecoderConfig` may override.

// =============================================================================
// Wire Sizes
// =============================================================================

/// Maximum encoded length of an unsigned 64-bit varint.
///
/// Each byte carries 7 payload bits, so 64 bits need at most 10 bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Size of a 128-bit identifier on the wire.
pub const UUID_SIZE: usize = 16;

/// Size of one 8-byte half of a 128-bit identifier.
pub const UUID_HALF_SIZE: usize = 8;

/// Size of an IPv6 address on the wire.
pub const IPV6_SIZE: usize = 16;

/// Size of one null-mask entry.
pub const NULL_MASK_ENTRY_SIZE: usize = 1;

// =============================================================================
// Temporal Limits
// =============================================================================

/// Highest sub-second precision accepted for `DateTime64` (nanoseconds).
pub const MAX_DATETIME64_PRECISION: u8 = 9;

/// Smallest day offset the calendar converter accepts (0001-01-01).
pub const EPOCH_DAY_MIN: i64 = -719_162;

/// Largest day offset the calendar converter accepts (9999-12-31).
pub const EPOCH_DAY_MAX: i64 = 2_932_896;

// =============================================================================
// Cursor Defaults
// =============================================================================

/// Initial capacity of the cursor scratch buffer (4 KB).
///
/// The scratch buffer is only allocated on the first read that straddles a
/// chunk boundary.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 4 * 1024;

/// Smallest scratch capacity the cursor will start growing from.
pub const MIN_SCRATCH_CAPACITY: usize = 64;

/// Default upper bound for a single contiguous read (1 GB).
pub const DEFAULT_MAX_READ_SIZE: usize = 1024 * 1024 * 1024;

/// Default chunk size when pulling from a blocking reader (64 KB).
pub const DEFAULT_READER_CHUNK_SIZE: usize = 64 * 1024;
