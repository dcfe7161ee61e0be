//! Processing stages that run after parsing.
//!
//! - [`normalize`] - media filtering, emoji canonicalization, link redaction
//! - [`segment`] - chronological sort and gap-based conversation ids
//! - [`chunk`] - speaker-tagged, word-bounded text chunks
//! - [`processor`] - all stages composed, with [`ProcessingStats`]
//! - [`models`] - the [`ChatRecord`] output row
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatprep::core::{
//!     ChatRecord, TextChunk, process, assign_conversations, build_chunks,
//!     write_csv, write_chunks_jsonl,
//! };
//! # }
//! ```

pub mod chunk;
pub mod models;
pub mod normalize;
pub mod output;
pub mod processor;
pub mod segment;

pub use chunk::{TextChunk, build_chunks, speaker_tokens};
#[cfg(feature = "parallel")]
pub use chunk::build_chunks_parallel;
pub use models::ChatRecord;
pub use normalize::{normalize, normalize_text};
pub use processor::{ProcessedChat, ProcessingStats, chunk_records, process};
pub use segment::{ConversationGroup, assign_conversations, group_conversations};

// Re-export Message from the crate root
pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{read_csv, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_chunks_jsonl, to_json, to_jsonl, write_chunks_jsonl, write_json, write_jsonl};
