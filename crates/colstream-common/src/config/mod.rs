//! Configuration for colstream.
//!
//! This module contains configuration structures for the decoder.

mod decoder;

pub use decoder::{DecoderConfig, TextEncoding};
