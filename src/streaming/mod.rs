//! Streaming parsing for large chat exports.
//!
//! The streaming parser reads an export line by line and yields messages as
//! they are sealed, instead of loading the whole file. It drives the same
//! [`Reassembler`](crate::parsers::Reassembler) as the batch parser, so both
//! produce identical messages.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatprep::streaming::WhatsAppStreamingParser;
//! use chatprep::Message;
//! use std::path::Path;
//!
//! let parser = WhatsAppStreamingParser::new();
//!
//! // Errors are fatal: collect into a Result to stop at the first one
//! let messages: Vec<Message> = parser
//!     .stream(Path::new("chat.txt"))?
//!     .collect::<chatprep::Result<_>>()?;
//! # Ok::<(), chatprep::ChatprepError>(())
//! ```

mod traits;
mod whatsapp;

pub use traits::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_MESSAGE_SIZE, MessageIterator, StreamingConfig};
pub use whatsapp::{WhatsAppMessageIterator, WhatsAppStreamingParser};
