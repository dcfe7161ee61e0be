//! Chat export parsers.
//!
//! - [`WhatsAppParser`] - batch parser for WhatsApp TXT exports
//! - [`Reassembler`] - the line fold shared with the streaming parser
//!
//! # Example
//!
//! ```rust
//! use chatprep::parsers::reassemble;
//!
//! let (messages, report) = reassemble([
//!     "note before the first header",
//!     "12/06/24, 9:00 am - Bob: Hello!",
//!     "This is a continuation.",
//! ])?;
//!
//! assert_eq!(messages[0].text, "Hello! This is a continuation.");
//! assert_eq!(report.orphan_lines, 1);
//! # Ok::<(), chatprep::ChatprepError>(())
//! ```

mod reassemble;
mod whatsapp;

pub use reassemble::{ParseReport, Reassembler, reassemble};
pub use whatsapp::WhatsAppParser;
