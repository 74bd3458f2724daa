//! Benchmark utilities and helpers.

use bytes::Bytes;
use colstream_test::WireBuilder;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates random string data for benchmarks.
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates a string column payload with lengths in `1..=max_len`.
pub fn generate_str_column(rows: usize, max_len: usize) -> Bytes {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wire = WireBuilder::new();
    for _ in 0..rows {
        let len = rng.gen_range(1..=max_len);
        wire = wire.str(&random_string(&mut rng, len));
    }
    wire.finish()
}

/// Generates a `UInt64` column payload.
pub fn generate_u64_column(rows: usize) -> Bytes {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wire = WireBuilder::new();
    for _ in 0..rows {
        wire = wire.u64(rng.gen());
    }
    wire.finish()
}

/// Generates a `Date32` column payload spanning 1900 through 2200.
pub fn generate_date32_column(rows: usize) -> Bytes {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wire = WireBuilder::new();
    for _ in 0..rows {
        wire = wire.i32(rng.gen_range(-25_567..84_000));
    }
    wire.finish()
}

/// Generates a payload of varints with mixed encoded lengths.
pub fn generate_varints(count: usize) -> Bytes {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wire = WireBuilder::new();
    for _ in 0..count {
        let bits = rng.gen_range(0..64);
        wire = wire.varint(rng.gen::<u64>() >> bits);
    }
    wire.finish()
}
