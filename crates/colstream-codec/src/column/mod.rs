//! Column decoders.
//!
//! Each decoder consumes a [`ByteSource`](crate::ByteSource) and a row count
//! and returns a column: a `Vec` of exactly `rows` values in wire order.
//! Decoders are stateless; which one to call for a given wire type is the
//! caller's decision and is never inferred from the data.
//!
//! | Wire type | Decoder |
//! |---|---|
//! | `UInt8`..`Int128`, `Float32`, `Float64`, `Bool` | [`read_array`] |
//! | raw blocks | [`read_bytes_col`] |
//! | `String` | [`read_str_col`], [`read_raw_str_col`] |
//! | `FixedString(N)` | [`read_fixed_str_col`] |
//! | `UUID` | [`read_uuid_col`] |
//! | `IPv4`, `IPv6` | [`read_ipv4_col`], [`read_ipv6_col`] |
//! | `Date`, `Date32` | [`read_date_col`], [`read_date32_col`] |
//! | `DateTime`, `DateTime64(p)` | [`read_datetime_col`], [`read_datetime64_col`] |
//! | `Nullable(T)` | [`read_nullable_col`], [`read_nullable_array`] |
//! | `Nullable(Date)`, `Nullable(Date32)` | [`read_nullable_date_col`], [`read_nullable_date32_col`] |
//! | `Nullable(DateTime)`, `Nullable(DateTime64(p))` | [`read_nullable_datetime_col`], [`read_nullable_datetime64_col`] |

pub mod network;
pub mod nullable;
pub mod numeric;
pub mod string;
pub mod temporal;

pub use network::{read_ipv4_col, read_ipv6_col, read_uuid_col};
pub use nullable::{read_null_mask, read_nullable_array, read_nullable_col, NullMask};
pub use numeric::{read_array, read_bytes_col, FixedWidth};
pub use string::{read_fixed_str_col, read_raw_str_col, read_str_col};
pub use temporal::{
    read_date32_col, read_date_col, read_datetime64_col, read_datetime_col,
    read_nullable_date32_col, read_nullable_date_col, read_nullable_datetime64_col,
    read_nullable_datetime_col,
};
