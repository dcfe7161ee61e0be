//! Pipeline configuration.
//!
//! [`PipelineConfig`] is the single record of options threaded through every
//! stage. It carries no CLI framework types, so library users build it with
//! the `with_*` methods or deserialize it from JSON.
//!
//! # Example
//!
//! ```rust
//! use chatprep::config::PipelineConfig;
//!
//! let config = PipelineConfig::new()
//!     .with_remove_media(false)
//!     .with_max_gap_minutes(30)
//!     .with_max_words_per_chunk(200);
//!
//! assert!(config.convert_emojis);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatprepError, Result};

/// Default inactivity gap (minutes) that starts a new conversation.
pub const DEFAULT_MAX_GAP_MINUTES: i64 = 60;

/// Default soft cap on words per training chunk.
pub const DEFAULT_MAX_WORDS_PER_CHUNK: usize = 150;

/// Options for normalization, segmentation and chunking.
///
/// Missing keys in a JSON config take their default values:
///
/// | Option | Default | Stage |
/// |--------|---------|-------|
/// | `remove_media` | `true` | normalizer |
/// | `convert_emojis` | `true` | normalizer |
/// | `max_gap_minutes` | `60` | segmenter |
/// | `max_words_per_chunk` | `150` | chunk builder |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Drop messages containing the `<Media omitted>` marker.
    pub remove_media: bool,

    /// Rewrite emoji glyphs as `:shortcode:` text.
    pub convert_emojis: bool,

    /// A gap strictly greater than this many minutes starts a new conversation.
    pub max_gap_minutes: i64,

    /// A chunk is sealed once its word count exceeds this value.
    pub max_words_per_chunk: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remove_media: true,
            convert_emojis: true,
            max_gap_minutes: DEFAULT_MAX_GAP_MINUTES,
            max_words_per_chunk: DEFAULT_MAX_WORDS_PER_CHUNK,
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables media-placeholder filtering.
    #[must_use]
    pub fn with_remove_media(mut self, enabled: bool) -> Self {
        self.remove_media = enabled;
        self
    }

    /// Enables or disables emoji canonicalization.
    #[must_use]
    pub fn with_convert_emojis(mut self, enabled: bool) -> Self {
        self.convert_emojis = enabled;
        self
    }

    /// Sets the conversation inactivity threshold in minutes.
    #[must_use]
    pub fn with_max_gap_minutes(mut self, minutes: i64) -> Self {
        self.max_gap_minutes = minutes;
        self
    }

    /// Sets the soft word cap per chunk.
    #[must_use]
    pub fn with_max_words_per_chunk(mut self, words: usize) -> Self {
        self.max_words_per_chunk = words;
        self
    }

    /// Checks that numeric options are usable.
    ///
    /// The gap must be non-negative and the word cap at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.max_gap_minutes < 0 {
            return Err(ChatprepError::invalid_config(
                "max_gap_minutes",
                format!("must not be negative, got {}", self.max_gap_minutes),
            ));
        }
        if self.max_words_per_chunk == 0 {
            return Err(ChatprepError::invalid_config(
                "max_words_per_chunk",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parses a configuration from a JSON string and validates it.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file and validates it.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
