//! Decoder configuration structures.
//!
//! These structures define the configurable aspects of a stream cursor and
//! the column decoders that read from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_MAX_READ_SIZE, DEFAULT_READER_CHUNK_SIZE, DEFAULT_SCRATCH_CAPACITY,
    MIN_SCRATCH_CAPACITY,
};

/// Text encoding applied to string columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8. Cells that are not valid UTF-8 decode to the lowercase hex
    /// representation of their raw bytes.
    #[default]
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value, so
    /// decoding never falls back.
    Latin1,
}

impl TextEncoding {
    /// Returns the canonical encoding name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(format!("unsupported text encoding: {other}")),
        }
    }
}

/// Configuration for a stream cursor and its column decoders.
///
/// # Example
///
/// ```rust
/// use colstream_common::config::DecoderConfig;
///
/// let config = DecoderConfig::default();
/// assert_eq!(config.initial_scratch_capacity, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Encoding used when decoding string cells.
    pub encoding: TextEncoding,

    /// Capacity the scratch buffer starts growing from on the first
    /// straddling read.
    pub initial_scratch_capacity: usize,

    /// Largest single contiguous read the cursor will satisfy.
    pub max_read_size: usize,

    /// Chunk size used when pulling from a blocking reader.
    pub reader_chunk_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            initial_scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
            max_read_size: DEFAULT_MAX_READ_SIZE,
            reader_chunk_size: DEFAULT_READER_CHUNK_SIZE,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration with the specified text encoding.
    #[must_use]
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }

    /// Sets the text encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the initial scratch capacity.
    #[must_use]
    pub fn with_initial_scratch_capacity(mut self, capacity: usize) -> Self {
        self.initial_scratch_capacity = capacity;
        self
    }

    /// Sets the maximum single read size.
    #[must_use]
    pub fn with_max_read_size(mut self, size: usize) -> Self {
        self.max_read_size = size;
        self
    }

    /// Sets the reader chunk size.
    #[must_use]
    pub fn with_reader_chunk_size(mut self, size: usize) -> Self {
        self.reader_chunk_size = size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_scratch_capacity < MIN_SCRATCH_CAPACITY {
            return Err(format!(
                "Initial scratch capacity must be at least {MIN_SCRATCH_CAPACITY} bytes"
            ));
        }

        if !self.initial_scratch_capacity.is_power_of_two() {
            return Err("Initial scratch capacity must be a power of two".to_string());
        }

        if self.max_read_size == 0 {
            return Err("Max read size must be positive".to_string());
        }

        if self.reader_chunk_size == 0 {
            return Err("Reader chunk size must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.encoding, TextEncoding::Utf8);
        assert_eq!(config.initial_scratch_capacity, DEFAULT_SCRATCH_CAPACITY);
        assert_eq!(config.max_read_size, DEFAULT_MAX_READ_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DecoderConfig::new(TextEncoding::Latin1)
            .with_initial_scratch_capacity(128)
            .with_max_read_size(1024)
            .with_reader_chunk_size(16);

        assert_eq!(config.encoding, TextEncoding::Latin1);
        assert_eq!(config.initial_scratch_capacity, 128);
        assert_eq!(config.max_read_size, 1024);
        assert_eq!(config.reader_chunk_size, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        // Scratch too small
        let config = DecoderConfig::default().with_initial_scratch_capacity(8);
        assert!(config.validate().is_err());

        // Scratch not a power of two
        let config = DecoderConfig::default().with_initial_scratch_capacity(100);
        assert!(config.validate().is_err());

        // Zero read bound
        let config = DecoderConfig::default().with_max_read_size(0);
        assert!(config.validate().is_err());

        // Zero reader chunk
        let config = DecoderConfig::default().with_reader_chunk_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_encoding_parse() {
        assert_eq!("utf-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("UTF8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("latin1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert!("ebcdic".parse::<TextEncoding>().is_err());
        assert_eq!(TextEncoding::Latin1.to_string(), "latin-1");
    }

    #[test]
    fn test_config_serde() {
        let config = DecoderConfig::default().with_encoding(TextEncoding::Latin1);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"latin1\""));

        let parsed: DecoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // Missing fields fall back to defaults
        let partial: DecoderConfig = serde_json::from_str(r#"{"max_read_size": 512}"#).unwrap();
        assert_eq!(partial.max_read_size, 512);
        assert_eq!(partial.encoding, TextEncoding::Utf8);
        assert_eq!(partial.initial_scratch_capacity, DEFAULT_SCRATCH_CAPACITY);
    }
}
