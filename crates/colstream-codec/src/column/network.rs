//! Identifier and address columns.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use colstream_common::constants::{IPV6_SIZE, UUID_HALF_SIZE, UUID_SIZE};
use uuid::Uuid;

use crate::byte_source::ByteSource;
use crate::column::numeric::read_array;
use crate::error::DecodeResult;

/// Reads `rows` 16-byte identifiers.
///
/// Each value is stored with its two 64-bit halves swapped.
///
/// # Example
///
/// ```rust
/// use colstream_codec::{column::read_uuid_col, SliceSource};
///
/// let mut wire = [0u8; 16];
/// wire[8] = 0x55;
/// wire[7] = 0xaa;
/// let column = read_uuid_col(&mut SliceSource::new(&wire), 1).unwrap();
/// assert_eq!(column[0].to_string(), "55000000-0000-0000-0000-0000000000aa");
/// ```
pub fn read_uuid_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<Uuid>>
where
    S: ByteSource + ?Sized,
{
    let block = source.read_bytes(UUID_SIZE.saturating_mul(rows))?;
    Ok(block
        .chunks_exact(UUID_SIZE)
        .map(uuid_from_wire)
        .collect())
}

/// Undoes the wire half swap: the second big-endian half is stored first.
fn uuid_from_wire(cell: &[u8]) -> Uuid {
    let mut bytes = [0u8; UUID_SIZE];
    bytes[..UUID_HALF_SIZE].copy_from_slice(&cell[UUID_HALF_SIZE..]);
    bytes[UUID_HALF_SIZE..].copy_from_slice(&cell[..UUID_HALF_SIZE]);
    Uuid::from_bytes(bytes)
}

/// Reads `rows` IPv4 addresses stored as little-endian 32-bit integers.
pub fn read_ipv4_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<Ipv4Addr>>
where
    S: ByteSource + ?Sized,
{
    let raw: Vec<u32> = read_array(source, rows)?;
    Ok(raw.into_iter().map(Ipv4Addr::from).collect())
}

/// Reads `rows` IPv6 addresses stored in network byte order.
///
/// IPv4-mapped addresses (`::ffff:a.b.c.d`) come back as [`IpAddr::V4`].
pub fn read_ipv6_col<S>(source: &mut S, rows: usize) -> DecodeResult<Vec<IpAddr>>
where
    S: ByteSource + ?Sized,
{
    let block = source.read_bytes(IPV6_SIZE.saturating_mul(rows))?;
    Ok(block
        .chunks_exact(IPV6_SIZE)
        .map(|cell| {
            let mut octets = [0u8; IPV6_SIZE];
            octets.copy_from_slice(cell);
            let addr = Ipv6Addr::from(octets);
            match addr.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(addr),
            }
        })
        .collect())
}
