//! Parser trait for chat exports.
//!
//! A [`Parser`] turns an export into reassembled [`Message`]s in file order,
//! either all at once or, with the `streaming` feature, one message at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatprep::parser::Parser;
//! use chatprep::parsers::WhatsAppParser;
//! use std::path::Path;
//!
//! let parser = WhatsAppParser::new();
//!
//! // Parse entire file into memory
//! let messages = parser.parse(Path::new("chat.txt"))?;
//! println!("{} messages", messages.len());
//! # Ok::<(), chatprep::ChatprepError>(())
//! ```

use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Boxed message iterator returned by [`Parser::stream`].
#[cfg(feature = "streaming")]
pub type MessageStream = Box<dyn Iterator<Item = Result<Message>> + Send>;

/// Common interface of chat export parsers.
pub trait Parser: Send + Sync {
    /// Human-readable parser name.
    fn name(&self) -> &'static str;

    /// Parses the export at `path` into messages in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ChatprepError::Io`](crate::ChatprepError::Io) if the file
    /// cannot be read and [`ChatprepError::Format`](crate::ChatprepError::Format)
    /// on a malformed header timestamp.
    fn parse(&self, path: &Path) -> Result<Vec<Message>>;

    /// Parses export content already held in memory.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Yields messages one at a time.
    ///
    /// The default implementation loads the whole file and replays it;
    /// parsers with a native streaming mode override it.
    #[cfg(feature = "streaming")]
    fn stream(&self, path: &Path) -> Result<MessageStream> {
        let messages = self.parse(path)?;
        Ok(Box::new(messages.into_iter().map(Ok)))
    }

    /// Returns `true` if [`stream`](Parser::stream) avoids loading the whole file.
    #[cfg(feature = "streaming")]
    fn supports_streaming(&self) -> bool {
        false
    }
}
