//! CSV record table reader and writer.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::core::models::{ChatRecord, DATETIME_FORMAT};
use crate::error::{ChatprepError, Result};

/// Column names, in output order.
pub const CSV_HEADER: [&str; 4] = ["datetime", "sender", "message", "conversation_id"];

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `datetime`, `sender`, `message`, `conversation_id`
/// - Header row is always written, even for an empty table
/// - Encoding: UTF-8
pub fn write_csv(records: &[ChatRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[ChatRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(records: &[ChatRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Loose row shape used when reading a table back.
///
/// Missing or empty cells become `None`; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    datetime: String,
    sender: Option<String>,
    message: Option<String>,
    conversation_id: Option<usize>,
}

/// Reads a record table written by [`write_csv`].
///
/// Rows with an empty `sender`, `message` or `conversation_id` are skipped.
/// Senders are trimmed.
///
/// # Errors
///
/// Returns [`ChatprepError::Csv`] if a required column is missing, and
/// [`ChatprepError::InvalidFormat`] if a `datetime` cell does not parse.
pub fn read_csv(input_path: impl AsRef<Path>) -> Result<Vec<ChatRecord>> {
    let file = File::open(input_path)?;
    from_csv_reader(file)
}

/// Reads a record table from any reader. See [`read_csv`].
pub fn from_csv_reader<R: Read>(input: R) -> Result<Vec<ChatRecord>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let (Some(sender), Some(text), Some(conversation_id)) =
            (row.sender, row.message, row.conversation_id)
        else {
            skipped += 1;
            continue;
        };

        let sender = sender.trim();
        if sender.is_empty() || text.is_empty() {
            skipped += 1;
            continue;
        }

        let timestamp = NaiveDateTime::parse_from_str(row.datetime.trim(), DATETIME_FORMAT)
            .map_err(|e| {
                ChatprepError::invalid_format(
                    "csv",
                    format!("row {}: bad datetime {:?}: {e}", idx + 2, row.datetime),
                )
            })?;

        records.push(ChatRecord {
            timestamp,
            sender: sender.to_string(),
            text,
            conversation_id,
        });
    }

    if skipped > 0 {
        debug!(skipped, "skipped incomplete csv rows");
    }
    Ok(records)
}
