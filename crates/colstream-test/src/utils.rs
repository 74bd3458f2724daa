use std::sync::Once;

use bytes::Bytes;
use colstream_codec::ChunkIter;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test subscriber once per process.
///
/// Filtering follows `RUST_LOG`; nothing is printed when it is unset.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Splits `data` into chunks of `size` bytes; the last may be shorter.
pub fn split_into_chunks(data: &[u8], size: usize) -> Vec<Bytes> {
    let payload = Bytes::copy_from_slice(data);
    (0..data.len())
        .step_by(size.max(1))
        .map(|start| payload.slice(start..(start + size.max(1)).min(data.len())))
        .collect()
}

/// Splits `data` at the given offsets. Offsets must be ascending.
pub fn split_at_offsets(data: &[u8], offsets: &[usize]) -> Vec<Bytes> {
    let payload = Bytes::copy_from_slice(data);
    let mut chunks = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    for &offset in offsets {
        let end = offset.clamp(start, data.len());
        if end > start {
            chunks.push(payload.slice(start..end));
        }
        start = end;
    }
    if start < data.len() {
        chunks.push(payload.slice(start..));
    }
    chunks
}

/// Builds a chunk source over `data` split into `size`-byte chunks.
pub fn chunk_source(data: &[u8], size: usize) -> ChunkIter<std::vec::IntoIter<Bytes>> {
    ChunkIter::new(split_into_chunks(data, size))
}
