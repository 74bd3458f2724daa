//! # colstream-test
//!
//! Integration tests for colstream.
//!
//! This crate contains:
//! - A wire builder for composing column blocks byte by byte
//! - Chunking helpers that split a payload at arbitrary boundaries
//! - Tracing setup shared by the suites under `tests/`

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Test utilities and helpers
pub mod utils;

/// Wire payload builder
pub mod wire;

pub use utils::{chunk_source, init_tracing, split_at_offsets, split_into_chunks};
pub use wire::WireBuilder;
