//! Error type shared by every stage.
//!
//! Two input conditions are not errors:
//! - a continuation line before the first header is discarded and counted in
//!   [`ParseReport::orphan_lines`](crate::parsers::ParseReport::orphan_lines);
//! - an export without a single header line yields an empty record stream.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// `Result` with [`ChatprepError`] as the error.
///
/// ```rust
/// use chatprep::Message;
/// use chatprep::error::Result;
///
/// fn no_messages() -> Result<Vec<Message>> {
///     Ok(Vec::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatprepError>;

/// What went wrong while reading an export, running the pipeline or writing
/// its output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatprepError {
    /// Reading the export or writing an output file failed.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// A line has the header shape but names a date or time that does not
    /// exist. The whole parse stops here.
    #[error("bad timestamp on line {line}: {message} ({content:?})")]
    Format {
        /// 1-based position in the input.
        line: usize,
        /// The trimmed line.
        content: String,
        message: String,
    },

    /// One message outgrew the streaming parser's `max_message_size`.
    #[error("message of {actual_size} bytes exceeds the {max_size}-byte limit")]
    BufferOverflow { max_size: usize, actual_size: usize },

    /// A pipeline option was out of range.
    #[error("option '{field}' rejected: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// An output format was unknown or compiled out, or a stored table
    /// could not be read back.
    #[error("{format}: {message}")]
    InvalidFormat {
        /// Which format or table was involved (`output`, `csv`).
        format: &'static str,
        message: String,
    },

    #[cfg(feature = "csv-output")]
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "json-output")]
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// A writer produced bytes that are not UTF-8.
    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl ChatprepError {
    pub fn format_error(
        line: usize,
        content: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ChatprepError::Format {
            line,
            content: content.into(),
            message: message.into(),
        }
    }

    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatprepError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatprepError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    pub fn buffer_overflow(max_size: usize, actual_size: usize) -> Self {
        ChatprepError::BufferOverflow {
            max_size,
            actual_size,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ChatprepError::Io(_))
    }

    /// `true` for a bad header timestamp.
    pub fn is_format(&self) -> bool {
        matches!(self, ChatprepError::Format { .. })
    }

    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatprepError::InvalidConfig { .. })
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatprepError::InvalidFormat { .. })
    }

    /// Input line of a [`Format`](ChatprepError::Format) error.
    pub fn line(&self) -> Option<usize> {
        match self {
            ChatprepError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_line_and_content() {
        let err = ChatprepError::format_error(
            7,
            "31/02/24, 9:00 am - Bob: hi",
            "no such date 31/2/2024",
        );
        let display = err.to_string();

        assert!(display.starts_with("bad timestamp on line 7"));
        assert!(display.contains("31/02/24, 9:00 am"));
        assert_eq!(err.line(), Some(7));
        assert!(err.is_format());
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        use std::error::Error;

        let err = ChatprepError::from(io::Error::new(io::ErrorKind::NotFound, "chat.txt missing"));
        assert!(err.is_io());
        assert!(err.to_string().contains("chat.txt missing"));
        assert!(err.source().is_some());
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_config_and_format_errors() {
        let err = ChatprepError::invalid_config("max_gap_minutes", "must not be negative, got -3");
        assert!(err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "option 'max_gap_minutes' rejected: must not be negative, got -3"
        );

        let err = ChatprepError::invalid_format("csv", "row 4: bad datetime");
        assert!(err.is_invalid_format());
        assert!(!err.is_invalid_config());
        assert_eq!(err.to_string(), "csv: row 4: bad datetime");
    }

    #[test]
    fn test_buffer_overflow_sizes() {
        let err = ChatprepError::buffer_overflow(1024, 2048);
        assert_eq!(
            err.to_string(),
            "message of 2048 bytes exceeds the 1024-byte limit"
        );
    }

    #[test]
    fn test_utf8_conversion() {
        let bad = String::from_utf8(vec![b'a', 0xff]).unwrap_err();
        let err = ChatprepError::from(bad);
        assert!(err.to_string().contains("not UTF-8"));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_csv_conversion() {
        let err: ChatprepError = csv::Error::from(io::Error::other("disk full")).into();
        assert!(err.to_string().starts_with("csv: "));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_conversion() {
        let err: ChatprepError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("json: "));
    }
}
