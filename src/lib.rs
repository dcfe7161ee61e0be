//! # Chatprep
//!
//! A Rust library for turning WhatsApp chat exports into a normalized,
//! conversation-segmented record table and word-bounded, speaker-tagged text
//! chunks ready for language-model training.
//!
//! ## Overview
//!
//! An export is a text file of `D/M/YY, H:MM am - Sender: Message` lines,
//! where a message may continue over several lines. The pipeline:
//!
//! 1. **Classify** each line as a header or a continuation ([`parsing`])
//! 2. **Reassemble** multi-line messages ([`parsers`], [`streaming`])
//! 3. **Normalize** text: drop media placeholders, emoji to `:shortcode:`,
//!    links to `[LINK]` ([`core::normalize`])
//! 4. **Segment** into conversations by inactivity gap ([`core::segment`])
//! 5. **Chunk** each conversation into `<sender>: text` blocks ([`core::chunk`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatprep::Result<()> {
//! use chatprep::prelude::*;
//! use std::path::Path;
//!
//! let messages = WhatsAppParser::new().parse(Path::new("chat.txt"))?;
//! let out = process(messages, &PipelineConfig::default())?;
//!
//! write_csv(&out.records, "cleaned_chat.csv")?;
//! write_chunks_jsonl(&out.chunks, "chunks.jsonl")?;
//! println!("Found {} messages", out.stats.retained);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! # #[cfg(feature = "streaming")]
//! # fn main() -> chatprep::Result<()> {
//! use chatprep::streaming::WhatsAppStreamingParser;
//! use std::path::Path;
//!
//! for result in WhatsAppStreamingParser::new().stream(Path::new("huge_chat.txt"))? {
//!     let msg = result?;
//!     println!("{}: {}", msg.sender, msg.text);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "streaming"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - header grammar and line classification
//! - [`parsers`] - batch parser and the shared [`Reassembler`](parsers::Reassembler)
//! - [`streaming`] - line-by-line parser with progress
//! - [`core`] - normalization, segmentation, chunking, output writers
//! - [`config`] - [`PipelineConfig`](config::PipelineConfig)
//! - [`format`] - output format selection
//! - [`error`] - [`ChatprepError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{ChatprepError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatprep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChatprepError, Result};

    pub use crate::config::PipelineConfig;
    pub use crate::parser::Parser;
    pub use crate::parsers::{ParseReport, WhatsAppParser};

    pub use crate::core::{
        ChatRecord, ConversationGroup, ProcessedChat, ProcessingStats, TextChunk,
        assign_conversations, build_chunks, chunk_records, group_conversations, normalize,
        process, speaker_tokens,
    };

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{read_csv, to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{
        to_chunks_jsonl, to_json, to_jsonl, write_chunks_jsonl, write_json, write_jsonl,
    };

    pub use crate::format::{OutputFormat, write_to_format};

    #[cfg(feature = "streaming")]
    pub use crate::streaming::{MessageIterator, StreamingConfig, WhatsAppStreamingParser};
}
