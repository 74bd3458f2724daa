//! Fixed-width numeric columns and raw byte blocks.

use bytes::Bytes;

use crate::byte_source::ByteSource;
use crate::error::DecodeResult;

/// A value stored on the wire as `SIZE` little-endian bytes.
///
/// Conversion goes through `from_le_bytes`, so host byte order is handled
/// at compile time.
pub trait FixedWidth: Copy {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decodes one value from exactly `SIZE` bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_fixed_width!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl FixedWidth for bool {
    const SIZE: usize = 1;

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Reads `rows` fixed-width values with a single bulk read.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{column::read_array, SliceSource};
///
/// let mut source = SliceSource::new(&[1, 0, 2, 0, 0xFF, 0xFF]);
/// let column: Vec<i16> = read_array(&mut source, 3).unwrap();
/// assert_eq!(column, vec![1, 2, -1]);
/// ```
pub fn read_array<T, S>(source: &mut S, rows: usize) -> DecodeResult<Vec<T>>
where
    T: FixedWidth,
    S: ByteSource + ?Sized,
{
    let block = source.read_bytes(T::SIZE.saturating_mul(rows))?;
    Ok(block.chunks_exact(T::SIZE).map(T::from_le_slice).collect())
}

/// Reads `rows` opaque blocks of `size` bytes each.
///
/// The whole block is copied once; each row is a zero-copy slice of that
/// copy.
pub fn read_bytes_col<S>(source: &mut S, size: usize, rows: usize) -> DecodeResult<Vec<Bytes>>
where
    S: ByteSource + ?Sized,
{
    let block = Bytes::copy_from_slice(source.read_bytes(size.saturating_mul(rows))?);
    Ok((0..rows)
        .map(|row| block.slice(row * size..(row + 1) * size))
        .collect())
}
