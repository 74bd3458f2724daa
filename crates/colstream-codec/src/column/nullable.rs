//! Nullable columns.
//!
//! A nullable column is a block of `rows` mask bytes followed by a full
//! value block of the inner type. A non-zero mask byte marks the row null;
//! its slot in the value block is still present and is skipped.
//!
//! Null slots may hold arbitrary bytes. Decoders that validate each value
//! (dates, timestamps) receive the [`NullMask`] and only convert the rows
//! that are not null, so garbage under the mask never fails the column.

use colstream_common::constants::NULL_MASK_ENTRY_SIZE;

use crate::byte_source::ByteSource;
use crate::column::numeric::{read_array, FixedWidth};
use crate::error::DecodeResult;

/// An owned null mask, one entry per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullMask {
    entries: Vec<u8>,
}

impl NullMask {
    /// Wraps raw mask bytes.
    pub fn new(entries: Vec<u8>) -> Self {
        Self { entries }
    }

    /// Number of rows covered by the mask.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mask covers no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `row` is null. Rows past the end are not null.
    pub fn is_null(&self, row: usize) -> bool {
        self.entries.get(row).is_some_and(|&b| b != 0)
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.entries.iter().filter(|&&b| b != 0).count()
    }

    /// Raw mask bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.entries
    }

    /// Pairs already-decoded values with the mask.
    pub fn apply<T>(&self, values: Vec<T>) -> Vec<Option<T>> {
        debug_assert_eq!(values.len(), self.len(), "value block does not match mask");
        self.entries
            .iter()
            .zip(values)
            .map(|(&null, value)| (null == 0).then_some(value))
            .collect()
    }

    /// Converts raw values with `convert`, skipping null rows.
    ///
    /// `convert` is never called for a null row, so a slot whose bytes do
    /// not form a valid value cannot fail the column.
    pub fn try_map<R, T, F>(&self, raw: Vec<R>, mut convert: F) -> DecodeResult<Vec<Option<T>>>
    where
        F: FnMut(R) -> DecodeResult<T>,
    {
        debug_assert_eq!(raw.len(), self.len(), "value block does not match mask");
        self.entries
            .iter()
            .zip(raw)
            .map(|(&null, value)| {
                if null == 0 {
                    convert(value).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect()
    }
}

/// Reads a null mask of `rows` entries.
///
/// The mask is copied out of the source so it stays valid while the value
/// block that follows is read.
pub fn read_null_mask<S>(source: &mut S, rows: usize) -> DecodeResult<NullMask>
where
    S: ByteSource + ?Sized,
{
    let entries = source
        .read_bytes(NULL_MASK_ENTRY_SIZE.saturating_mul(rows))?
        .to_vec();
    Ok(NullMask::new(entries))
}

/// Reads a nullable column.
///
/// `read_values` gets the mask and must consume the full value block,
/// returning one entry per row.
///
/// # Example
///
/// ```rust
/// use colstream_codec::column::{read_array, read_nullable_col};
/// use colstream_codec::SliceSource;
///
/// let mut source = SliceSource::new(&[0, 1, 0, 7, 8, 9]);
/// let column = read_nullable_col(&mut source, 3, |s, mask| {
///     Ok(mask.apply(read_array::<u8, _>(s, mask.len())?))
/// })
/// .unwrap();
/// assert_eq!(column, vec![Some(7), None, Some(9)]);
/// ```
pub fn read_nullable_col<S, T, F>(
    source: &mut S,
    rows: usize,
    read_values: F,
) -> DecodeResult<Vec<Option<T>>>
where
    S: ByteSource + ?Sized,
    F: FnOnce(&mut S, &NullMask) -> DecodeResult<Vec<Option<T>>>,
{
    let mask = read_null_mask(source, rows)?;
    let values = read_values(source, &mask)?;
    debug_assert_eq!(values.len(), rows, "nullable decoder returned wrong row count");
    Ok(values)
}

/// Reads a nullable column of fixed-width values.
pub fn read_nullable_array<T, S>(source: &mut S, rows: usize) -> DecodeResult<Vec<Option<T>>>
where
    T: FixedWidth,
    S: ByteSource + ?Sized,
{
    read_nullable_col(source, rows, |s, mask| {
        Ok(mask.apply(read_array::<T, _>(s, mask.len())?))
    })
}
