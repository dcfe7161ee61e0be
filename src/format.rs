//! Output formats for the record table.
//!
//! [`OutputFormat`] is the library-side choice. The CLI maps its own value
//! enum onto it. The chunk stream is always JSONL and has its own writer in
//! [`core::output`](crate::core::output).
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatprep::Result<()> {
//! use chatprep::format::{OutputFormat, write_to_format};
//!
//! let format = OutputFormat::from_path("records.ndjson")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! write_to_format(&[], "records.ndjson", format)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::models::ChatRecord;
use crate::error::{ChatprepError, Result};

/// Names accepted for each format, matched case-insensitively.
const NAMES: [(&str, OutputFormat); 4] = [
    ("csv", OutputFormat::Csv),
    ("json", OutputFormat::Json),
    ("jsonl", OutputFormat::Jsonl),
    ("ndjson", OutputFormat::Jsonl),
];

/// Serialization of the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Header row plus one comma-delimited row per record. Can be loaded
    /// again with [`read_csv`](crate::core::output::read_csv).
    #[default]
    Csv,
    /// Pretty-printed array.
    Json,
    /// One object per line.
    Jsonl,
}

impl OutputFormat {
    /// Every format, in CLI order.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature that provides the writer.
    pub fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Returns `true` if this build can write the format.
    pub fn is_available(self) -> bool {
        match self {
            OutputFormat::Csv => cfg!(feature = "csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => cfg!(feature = "json-output"),
        }
    }

    /// Looks up a format by name or alias (`ndjson`).
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, format)| format)
    }

    /// Picks the format from a file extension.
    ///
    /// ```rust
    /// use chatprep::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/CHAT.JSON")?, OutputFormat::Json);
    /// assert!(OutputFormat::from_path("chat.txt").is_err());
    /// # Ok::<(), chatprep::ChatprepError>(())
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::from_name(ext).ok_or_else(|| {
            ChatprepError::invalid_format(
                "output",
                format!("no output format for extension '.{ext}' (expected {})", known_names()),
            )
        })
    }
}

fn known_names() -> String {
    NAMES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = ChatprepError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            ChatprepError::invalid_format(
                "output",
                format!("unknown format '{s}' (expected {})", known_names()),
            )
        })
    }
}

/// Writes `records` to `path` in `format`.
///
/// # Errors
///
/// Fails with [`ChatprepError::InvalidFormat`] if the writer was compiled
/// out, and with an I/O or serializer error otherwise.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[ChatRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), %format, rows = records.len(), "writing records");

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(format)),
    }
}

/// Renders `records` in `format` without touching the filesystem.
#[allow(unused_variables)]
pub fn to_format_string(records: &[ChatRecord], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(format)),
    }
}

#[allow(dead_code)]
fn unavailable(format: OutputFormat) -> ChatprepError {
    ChatprepError::invalid_format(
        "output",
        format!(
            "{format} output needs the '{}' feature",
            format.required_feature()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_aliases() {
        assert_eq!(OutputFormat::from_name("csv"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("ndjson"), Some(OutputFormat::Jsonl));
        assert_eq!(OutputFormat::from_name("xml"), None);

        let parsed: OutputFormat = "Jsonl".parse().unwrap();
        assert_eq!(parsed, OutputFormat::Jsonl);

        let err = "tsv".parse::<OutputFormat>().unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("csv, json, jsonl, ndjson"));
    }

    #[test]
    fn test_extension_matches_name() {
        for format in OutputFormat::all() {
            assert_eq!(OutputFormat::from_name(format.extension()), Some(*format));
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            OutputFormat::from_path("cleaned_chat.csv").unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path("/tmp/rows.ndjson").unwrap(),
            OutputFormat::Jsonl
        );
        assert!(OutputFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn test_display_and_default() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_availability_in_default_build() {
        assert_eq!(
            OutputFormat::Csv.is_available(),
            cfg!(feature = "csv-output")
        );
        assert_eq!(OutputFormat::Json.required_feature(), "json-output");
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_empty() {
        assert_eq!(
            to_format_string(&[], OutputFormat::Csv).unwrap(),
            "datetime,sender,message,conversation_id\n"
        );
        assert_eq!(to_format_string(&[], OutputFormat::Json).unwrap(), "[]");
        assert_eq!(to_format_string(&[], OutputFormat::Jsonl).unwrap(), "");
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }
}
