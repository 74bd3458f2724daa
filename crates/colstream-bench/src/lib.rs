//! colstream Performance Benchmarks
//!
//! This crate contains benchmarks for the decoding pipeline:
//! - Stream cursor reads on the zero-copy and scratch paths
//! - Varint decoding
//! - Column decoders for strings, integers, and dates
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p colstream-bench
//! ```

pub mod utils;
