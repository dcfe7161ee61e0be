//! The reassembled chat message.
//!
//! A [`Message`] is what the reassembler produces for every header line of
//! an export, with any continuation lines already folded into its text.
//!
//! # Example
//!
//! ```
//! use chatprep::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 6, 12)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Bob", "Hello!");
//!
//! assert_eq!(msg.sender(), "Bob");
//! assert_eq!(msg.text(), "Hello!");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single chat message: one timestamp, one sender, one text.
///
/// Exports carry no timezone, so timestamps are naive local times with
/// minute precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent.
    pub timestamp: NaiveDateTime,

    /// Display name of the author, trimmed.
    pub sender: String,

    /// Message body. Continuation lines are joined with a single space.
    pub text: String,
}

impl Message {
    /// Creates a message. The sender is trimmed.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into().trim().to_string(),
            text: text.into(),
        }
    }

    /// Appends a continuation line, space-joined.
    pub(crate) fn append_line(&mut self, line: &str) {
        self.text.push(' ');
        self.text.push_str(line);
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-delimited words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_trims_sender() {
        let msg = Message::new(ts(9, 0), "  Bob ", "Hello!");
        assert_eq!(msg.sender(), "Bob");
        assert_eq!(msg.timestamp(), ts(9, 0));
    }

    #[test]
    fn test_append_line() {
        let mut msg = Message::new(ts(9, 0), "Bob", "Hello!");
        msg.append_line("This is a continuation.");
        assert_eq!(msg.text(), "Hello! This is a continuation.");
    }

    #[test]
    fn test_append_empty_line_adds_space() {
        let mut msg = Message::new(ts(9, 0), "Bob", "Hello!");
        msg.append_line("");
        assert_eq!(msg.text(), "Hello! ");
    }

    #[test]
    fn test_word_count() {
        let msg = Message::new(ts(9, 0), "Bob", "  one two\tthree ");
        assert_eq!(msg.word_count(), 3);
        assert_eq!(Message::new(ts(9, 0), "Bob", "").word_count(), 0);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_serialization() {
        let msg = Message::new(ts(9, 5), "Jane", "Hi!");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("2024-06-12T09:05:00"));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
