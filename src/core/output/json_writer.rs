//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::ChatRecord;
use crate::error::Result;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {
///     "datetime": "2024-06-12 09:00:00",
///     "sender": "Bob",
///     "message": "Hello!",
///     "conversation_id": 0
///   }
/// ]
/// ```
pub fn write_json(records: &[ChatRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a JSON array string.
///
/// Same format as [`write_json`], but returns a String instead of writing to file.
pub fn to_json(records: &[ChatRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn records() -> Vec<ChatRecord> {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        vec![
            ChatRecord::new(Message::new(ts, "Bob", "Hello!"), 0),
            ChatRecord::new(Message::new(ts, "Jane", "Hi"), 0),
        ]
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&records()).unwrap();

        assert!(json.contains(r#""datetime": "2024-06-12 09:00:00""#));
        assert!(json.contains(r#""sender": "Bob""#));
        assert!(json.contains(r#""message": "Hello!""#));
        assert!(json.contains(r#""conversation_id": 0"#));
    }

    #[test]
    fn test_write_json_parses_back() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&records(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: Vec<ChatRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records());
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
