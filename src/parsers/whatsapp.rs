//! `WhatsApp` TXT export parser.
//!
//! Reads `D/M/YY, H:MM am - Sender: Message` exports and reassembles
//! multi-line messages. Output order is file order; sorting happens later in
//! the pipeline.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::reassemble::{ParseReport, Reassembler, reassemble};
use crate::Message;
use crate::error::Result;
use crate::parser::Parser;

#[cfg(feature = "streaming")]
use crate::parser::MessageStream;
#[cfg(feature = "streaming")]
use crate::streaming::{StreamingConfig, WhatsAppStreamingParser};

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatprep::parsers::WhatsAppParser;
/// use chatprep::parser::Parser;
///
/// let chat = "12/06/24, 9:00 am - Bob: Hello!\nThis is a continuation.\n";
/// let messages = WhatsAppParser::new().parse_str(chat)?;
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].text, "Hello! This is a continuation.");
/// # Ok::<(), chatprep::ChatprepError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    #[cfg(feature = "streaming")]
    streaming: Option<StreamingConfig>,
}

impl WhatsAppParser {
    /// Creates a parser that loads whole files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser whose [`Parser::stream`] reads line by line.
    #[cfg(feature = "streaming")]
    pub fn with_streaming(config: StreamingConfig) -> Self {
        Self {
            streaming: Some(config),
        }
    }

    /// Parses in-memory content and returns the reassembly counters too.
    pub fn parse_with_report(&self, content: &str) -> Result<(Vec<Message>, ParseReport)> {
        let result = reassemble(content.lines())?;
        log_report(&result.1);
        Ok(result)
    }

    /// Parses from any buffered reader.
    ///
    /// Invalid UTF-8 surfaces as an [`Io`](crate::ChatprepError::Io) error
    /// of kind `InvalidData`.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<(Vec<Message>, ParseReport)> {
        let mut messages = Vec::new();
        let mut fold = Reassembler::new();

        for line in reader.lines() {
            if let Some(sealed) = fold.push_line(&line?)? {
                messages.push(sealed);
            }
        }

        let (last, report) = fold.finish();
        messages.extend(last);
        log_report(&report);
        Ok((messages, report))
    }

    /// Parses the file at `path` and returns the reassembly counters too.
    pub fn parse_file_with_report(&self, path: &Path) -> Result<(Vec<Message>, ParseReport)> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }
}

fn log_report(report: &ParseReport) {
    debug!(
        lines = report.total_lines,
        headers = report.header_lines,
        continuations = report.continuation_lines,
        orphans = report.orphan_lines,
        "reassembled export"
    );
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        self.parse_file_with_report(path).map(|(messages, _)| messages)
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_with_report(content).map(|(messages, _)| messages)
    }

    #[cfg(feature = "streaming")]
    fn stream(&self, path: &Path) -> Result<MessageStream> {
        if let Some(config) = self.streaming {
            let iterator = WhatsAppStreamingParser::with_config(config).stream(path)?;
            Ok(Box::new(iterator))
        } else {
            let messages = Parser::parse(self, path)?;
            Ok(Box::new(messages.into_iter().map(Ok)))
        }
    }

    #[cfg(feature = "streaming")]
    fn supports_streaming(&self) -> bool {
        self.streaming.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CHAT: &str = "12/06/24, 9:00 am - Bob: Hello!
12/06/24, 9:01 am - Jane: Hi Bob!
12/06/24, 9:05 am - Bob: How are you?
12/06/24, 10:10 am - Jane: Good, thanks!
";

    #[test]
    fn test_parser_name() {
        assert_eq!(Parser::name(&WhatsAppParser::new()), "WhatsApp");
    }

    #[test]
    fn test_parse_str_basic() {
        let messages = WhatsAppParser::new().parse_str(CHAT).unwrap();
        let senders: Vec<_> = messages.iter().map(|m| m.sender.as_str()).collect();
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();

        assert_eq!(senders, ["Bob", "Jane", "Bob", "Jane"]);
        assert_eq!(texts, ["Hello!", "Hi Bob!", "How are you?", "Good, thanks!"]);
    }

    #[test]
    fn test_parse_reader_matches_parse_str() {
        let parser = WhatsAppParser::new();
        let (from_reader, report) = parser.parse_reader(Cursor::new(CHAT)).unwrap();
        assert_eq!(from_reader, parser.parse_str(CHAT).unwrap());
        assert_eq!(report.header_lines, 4);
    }

    #[test]
    fn test_crlf_line_endings() {
        let chat = "12/06/24, 9:00 am - Bob: Hello!\r\nsecond line\r\n";
        let messages = WhatsAppParser::new().parse_str(chat).unwrap();
        assert_eq!(messages[0].text, "Hello! second line");
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"12/06/24, 9:00 am - Bob: \xff\xfe\n";
        let err = WhatsAppParser::new().parse_reader(Cursor::new(bytes)).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WhatsAppParser::new()
            .parse(Path::new("/nonexistent/chat.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[cfg(feature = "streaming")]
    #[test]
    fn test_supports_streaming() {
        assert!(!WhatsAppParser::new().supports_streaming());
        assert!(WhatsAppParser::with_streaming(StreamingConfig::default()).supports_streaming());
    }
}
