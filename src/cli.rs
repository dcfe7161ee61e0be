//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! Pipeline options come from three layers, later ones winning: built-in
//! defaults, the `--config` JSON file, then individual flags.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::Result;

/// Default record table path.
pub const DEFAULT_OUTPUT: &str = "cleaned_chat.csv";

/// Clean a WhatsApp chat export into a conversation-segmented table
/// and word-bounded training chunks.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatprep")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatprep chat.txt
    chatprep chat.txt -o cleaned.csv --chunks chunks.jsonl
    chatprep chat.txt -f jsonl --max-gap-minutes 30
    chatprep chat.txt --keep-media --keep-emojis
    chatprep big_export.txt --streaming --config pipeline.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Path to the record table
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Record table format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Also write training chunks as JSONL to this path
    #[arg(long, value_name = "PATH")]
    pub chunks: Option<PathBuf>,

    /// Keep messages that only say "<Media omitted>"
    #[arg(long)]
    pub keep_media: bool,

    /// Leave emoji glyphs as they are instead of converting to :shortcodes:
    #[arg(long)]
    pub keep_emojis: bool,

    /// Minutes of silence that start a new conversation
    #[arg(long, value_name = "N")]
    pub max_gap_minutes: Option<i64>,

    /// Soft word limit per training chunk
    #[arg(long, value_name = "N")]
    pub max_words: Option<usize>,

    /// JSON file with pipeline options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the export line by line instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolves the pipeline options: defaults, then `--config`, then flags.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be read or the result is invalid.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => PipelineConfig::default(),
        };

        if self.keep_media {
            config = config.with_remove_media(false);
        }
        if self.keep_emojis {
            config = config.with_convert_emojis(false);
        }
        if let Some(minutes) = self.max_gap_minutes {
            config = config.with_max_gap_minutes(minutes);
        }
        if let Some(words) = self.max_words {
            config = config.with_max_words_per_chunk(words);
        }

        config.validate()?;
        Ok(config)
    }

    /// Output path, with the extension following `--format` when the
    /// default path is used.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_path() != Path::new(DEFAULT_OUTPUT) {
            return self.output.clone();
        }
        let lib_format: crate::format::OutputFormat = self.format.into();
        self.output.with_extension(lib_format.extension())
    }
}

#[cfg(feature = "json-output")]
fn load_config_file(path: &Path) -> Result<PipelineConfig> {
    PipelineConfig::from_json_file(path)
}

#[cfg(not(feature = "json-output"))]
fn load_config_file(_path: &Path) -> Result<PipelineConfig> {
    Err(crate::ChatprepError::invalid_config(
        "config",
        "reading a config file requires the 'json-output' feature",
    ))
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use chatprep::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// println!("Extension: {}", format.extension()); // "jsonl"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-delimited table with header (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
