//! # colstream-common
//!
//! Common types and configuration for colstream.
//!
//! This crate provides the foundational pieces shared by the decoder and its
//! test and benchmark harnesses:
//!
//! - **Config**: decoder configuration (`DecoderConfig`, `TextEncoding`)
//! - **Constants**: wire sizes and decoder limits
//!
//! ## Example
//!
//! ```rust
//! use colstream_common::config::{DecoderConfig, TextEncoding};
//!
//! let config = DecoderConfig::default().with_encoding(TextEncoding::Latin1);
//! assert!(config.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{DecoderConfig, TextEncoding};
pub use constants::*;
