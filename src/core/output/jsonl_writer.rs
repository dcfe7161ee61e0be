//! JSON Lines (JSONL) output writer.
//!
//! Used for both the record table and the chunk stream fed to the trainer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::chunk::TextChunk;
use crate::core::models::ChatRecord;
use crate::error::Result;

fn write_lines<T: Serialize, W: Write>(items: &[T], out: W) -> Result<()> {
    let mut writer = BufWriter::new(out);
    for item in items {
        let line = serde_json::to_string(item)?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

fn to_lines<T: Serialize>(items: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(items, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes records to a JSONL file, one object per line.
///
/// ```jsonl
/// {"datetime":"2024-06-12 09:00:00","sender":"Bob","message":"Hello!","conversation_id":0}
/// ```
pub fn write_jsonl(records: &[ChatRecord], output_path: impl AsRef<Path>) -> Result<()> {
    write_lines(records, File::create(output_path)?)
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[ChatRecord]) -> Result<String> {
    to_lines(records)
}

/// Writes the chunk stream, one object per chunk.
///
/// ```jsonl
/// {"conversation_id":0,"text_for_model":"<Bob>: Hello!\n<Jane>: Hi Bob!"}
/// ```
pub fn write_chunks_jsonl(chunks: &[TextChunk], output_path: impl AsRef<Path>) -> Result<()> {
    write_lines(chunks, File::create(output_path)?)
}

/// Converts chunks to a JSONL string.
pub fn to_chunks_jsonl(chunks: &[TextChunk]) -> Result<String> {
    to_lines(chunks)
}
