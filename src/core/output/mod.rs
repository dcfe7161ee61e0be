//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] / [`read_csv`] - the record table as CSV - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one record per line - requires `json-output` feature
//! - [`write_chunks_jsonl`] / [`to_chunks_jsonl`] - the chunk stream - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatprep::Result<()> {
//! use chatprep::config::PipelineConfig;
//! use chatprep::core::output::{read_csv, write_chunks_jsonl, write_csv};
//! use chatprep::core::processor::{chunk_records, process};
//! use chatprep::parser::Parser;
//! use chatprep::parsers::WhatsAppParser;
//! use std::path::Path;
//!
//! let messages = WhatsAppParser::new().parse(Path::new("chat.txt"))?;
//! let out = process(messages, &PipelineConfig::default())?;
//! write_csv(&out.records, "cleaned_chat.csv")?;
//!
//! // Later: rebuild the chunk stream from the table
//! let records = read_csv("cleaned_chat.csv")?;
//! write_chunks_jsonl(&chunk_records(records, 150), "chunks.jsonl")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, from_csv_reader, read_csv, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_chunks_jsonl, to_jsonl, write_chunks_jsonl, write_jsonl};
