//! The streaming iterator contract and its tuning knobs.

use crate::Message;
use crate::error::Result;
use crate::parsers::ParseReport;

/// Read buffer used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Size limit for one reassembled message when none is configured.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// A message iterator that can report how far into its input it is.
///
/// Object safe, so parsers hand it out as `Box<dyn MessageIterator>`.
///
/// ```no_run
/// use chatprep::streaming::{MessageIterator, WhatsAppStreamingParser};
/// use std::path::Path;
///
/// let mut iter = WhatsAppStreamingParser::new().stream(Path::new("chat.txt"))?;
///
/// while let Some(result) = iter.next() {
///     let msg = result?;
///     if let Some(pct) = iter.progress() {
///         eprint!("\r{pct:5.1}% {}", msg.sender);
///     }
/// }
/// eprintln!("\n{} orphan lines", iter.report().orphan_lines);
/// # Ok::<(), chatprep::ChatprepError>(())
/// ```
pub trait MessageIterator: Iterator<Item = Result<Message>> + Send {
    /// Percentage of input consumed, `None` when the size is unknown or zero.
    fn progress(&self) -> Option<f64> {
        let total = self.total_bytes().filter(|&total| total > 0)?;
        Some(self.bytes_processed() as f64 / total as f64 * 100.0)
    }

    /// Bytes consumed so far, line terminators included.
    fn bytes_processed(&self) -> u64;

    /// Input size, when reading from a file.
    fn total_bytes(&self) -> Option<u64> {
        None
    }

    /// Line counters so far. Final once the iterator returns `None`.
    fn report(&self) -> ParseReport;
}

/// Buffering and safety limits for streaming parsers.
///
/// ```
/// use chatprep::streaming::StreamingConfig;
///
/// let config = StreamingConfig::new()
///     .with_buffer_size(256 * 1024)
///     .with_max_message_size(1024 * 1024);
/// assert_eq!(config.buffer_size, 256 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Capacity of the `BufReader` wrapped around the file.
    pub buffer_size: usize,

    /// Largest accepted message text in bytes. A message that grows past it
    /// ends the stream with
    /// [`ChatprepError::BufferOverflow`](crate::ChatprepError::BufferOverflow).
    pub max_message_size: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl StreamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        done: u64,
        total: Option<u64>,
    }

    impl Iterator for Fixed {
        type Item = Result<Message>;

        fn next(&mut self) -> Option<Self::Item> {
            None
        }
    }

    impl MessageIterator for Fixed {
        fn bytes_processed(&self) -> u64 {
            self.done
        }

        fn total_bytes(&self) -> Option<u64> {
            self.total
        }

        fn report(&self) -> ParseReport {
            ParseReport::default()
        }
    }

    #[test]
    fn test_progress() {
        let half = Fixed {
            done: 50,
            total: Some(200),
        };
        assert_eq!(half.progress(), Some(25.0));

        let unknown = Fixed {
            done: 50,
            total: None,
        };
        assert_eq!(unknown.progress(), None);

        let empty = Fixed {
            done: 0,
            total: Some(0),
        };
        assert_eq!(empty.progress(), None);
    }

    #[test]
    fn test_config_defaults_and_builders() {
        let config = StreamingConfig::default();
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.max_message_size, DEFAULT_MAX_MESSAGE_SIZE);
        assert_eq!(StreamingConfig::new(), config);

        let tuned = config.with_buffer_size(4096).with_max_message_size(512);
        assert_eq!(tuned.buffer_size, 4096);
        assert_eq!(tuned.max_message_size, 512);
    }
}
