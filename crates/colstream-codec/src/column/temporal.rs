//! Date and timestamp columns.
//!
//! Dates are day offsets from 1970-01-01 resolved by [`crate::calendar`].
//! Timestamps are UTC; time zones are left to the caller.
//!
//! Each decoder has a `read_nullable_*` twin that reads the null mask first
//! and only validates rows that are not null.

use chrono::{DateTime, NaiveDate, Utc};
use colstream_common::constants::MAX_DATETIME64_PRECISION;

use crate::byte_source::ByteSource;
use crate::calendar::epoch_days_to_naive_date;
use crate::column::nullable::read_nullable_col;
use crate::column::numeric::read_array;
use crate::error::{DecodeError, DecodeResult};

fn timestamp(seconds: i64, nanos: u32) -> DecodeResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, nanos).ok_or(DecodeError::TimestampOutOfRange { seconds })
}

fn datetime_from_secs(secs: u32) -> DecodeResult<DateTime<Utc>> {
    timestamp(i64::from(secs), 0)
}

/// Tick scale of a `DateTime64(precision)` column.
#[derive(Debug, Clone, Copy)]
struct TickScale {
    ticks_per_second: i64,
    nanos_per_tick: i64,
}

impl TickScale {
    fn new(precision: u8) -> DecodeResult<Self> {
        if precision > MAX_DATETIME64_PRECISION {
            return Err(DecodeError::InvalidPrecision { precision });
        }
        Ok(Self {
            ticks_per_second: 10i64.pow(u32::from(precision)),
            nanos_per_tick: 10i64.pow(u32::from(MAX_DATETIME64_PRECISION - precision)),
        })
    }

    fn to_datetime(self, ticks: i64) -> DecodeResult<DateTime<Utc>> {
        let seconds = ticks.div_euclid(self.ticks_per_second);
        // rem_euclid is in 0..10^precision, so the product is below 10^9.
        let nanos = ticks.rem_euclid(self.ticks_per_second) * self.nanos_per_tick;
        timestamp(seconds, nanos as u32)
    }
}

/// Reads `rows` dates stored as unsigned 16-bit day offsets.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{column::read_date_col, SliceSource};
///
/// let column = read_date_col(&mut SliceSource::new(&18_262u16.to_le_bytes()), 1).unwrap();
/// assert_eq!(column[0].to_string(), "2020-01-01");
/// ```
pub fn read_date_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<NaiveDate>>
where
    S: ByteSource + ?Sized,
{
    let raw: Vec<u16> = read_array(source, rows)?;
    raw.into_iter()
        .map(|days| epoch_days_to_naive_date(i64::from(days)))
        .collect()
}

/// Reads `rows` dates stored as signed 32-bit day offsets.
pub fn read_date32_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<NaiveDate>>
where
    S: ByteSource + ?Sized,
{
    let raw: Vec<i32> = read_array(source, rows)?;
    raw.into_iter()
        .map(|days| epoch_days_to_naive_date(i64::from(days)))
        .collect()
}

/// Reads `rows` timestamps stored as unsigned 32-bit seconds.
pub fn read_datetime_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<DateTime<Utc>>>
where
    S: ByteSource + ?Sized,
{
    let raw: Vec<u32> = read_array(source, rows)?;
    raw.into_iter().map(datetime_from_secs).collect()
}

/// Reads `rows` timestamps stored as signed 64-bit ticks of
/// `10^-precision` seconds.
///
/// Negative ticks are before the epoch; sub-second parts are always
/// non-negative.
pub fn read_datetime64_col<S>(
    source: &mut S,
    rows: usize,
    precision: u8,
) -> DecodeResult<Vec<DateTime<Utc>>>
where
    S: ByteSource + ?Sized,
{
    let scale = TickScale::new(precision)?;
    let raw: Vec<i64> = read_array(source, rows)?;
    raw.into_iter().map(|ticks| scale.to_datetime(ticks)).collect()
}

/// Reads a nullable `Date` column.
pub fn read_nullable_date_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<Option<NaiveDate>>>
where
    S: ByteSource + ?Sized,
{
    read_nullable_col(source, rows, |s, mask| {
        let raw: Vec<u16> = read_array(s, mask.len())?;
        mask.try_map(raw, |days| epoch_days_to_naive_date(i64::from(days)))
    })
}

/// Reads a nullable `Date32` column.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{column::read_nullable_date32_col, SliceSource};
///
/// let mut data = vec![1u8, 0];
/// data.extend_from_slice(&i32::MAX.to_le_bytes());
/// data.extend_from_slice(&0i32.to_le_bytes());
/// let column = read_nullable_date32_col(&mut SliceSource::new(&data), 2).unwrap();
/// assert_eq!(column[0], None);
/// assert_eq!(column[1].unwrap().to_string(), "1970-01-01");
/// ```
pub fn read_nullable_date32_col<S>(
    source: &mut S,
    rows: usize,
) -> DecodeResult<Vec<Option<NaiveDate>>>
where
    S: ByteSource + ?Sized,
{
    read_nullable_col(source, rows, |s, mask| {
        let raw: Vec<i32> = read_array(s, mask.len())?;
        mask.try_map(raw, |days| epoch_days_to_naive_date(i64::from(days)))
    })
}

/// Reads a nullable `DateTime` column.
pub fn read_nullable_datetime_col<S>(
    source: &mut S,
    rows: usize,
) -> DecodeResult<Vec<Option<DateTime<Utc>>>>
where
    S: ByteSource + ?Sized,
{
    read_nullable_col(source, rows, |s, mask| {
        let raw: Vec<u32> = read_array(s, mask.len())?;
        mask.try_map(raw, datetime_from_secs)
    })
}

/// Reads a nullable `DateTime64(precision)` column.
///
/// The precision is checked before any bytes are consumed.
pub fn read_nullable_datetime64_col<S>(
    source: &mut S,
    rows: usize,
    precision: u8,
) -> DecodeResult<Vec<Option<DateTime<Utc>>>>
where
    S: ByteSource + ?Sized,
{
    let scale = TickScale::new(precision)?;
    read_nullable_col(source, rows, |s, mask| {
        let raw: Vec<i64> = read_array(s, mask.len())?;
        mask.try_map(raw, |ticks| scale.to_datetime(ticks))
    })
}
