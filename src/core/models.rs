//! Output row model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Timestamp layout of the `datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the record table: a normalized message tagged with its
/// conversation.
///
/// Serializes with the column names `datetime`, `sender`, `message` and
/// `conversation_id`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(rename = "datetime", with = "datetime_column")]
    pub timestamp: NaiveDateTime,
    pub sender: String,
    #[serde(rename = "message")]
    pub text: String,
    pub conversation_id: usize,
}

impl ChatRecord {
    /// Tags a message with its conversation id.
    pub fn new(message: Message, conversation_id: usize) -> Self {
        Self {
            timestamp: message.timestamp,
            sender: message.sender,
            text: message.text,
            conversation_id,
        }
    }

    /// Drops the conversation tag.
    pub fn into_message(self) -> Message {
        Message {
            timestamp: self.timestamp,
            sender: self.sender,
            text: self.text,
        }
    }

    /// Formats the timestamp as written to the `datetime` column.
    pub fn datetime_string(&self) -> String {
        self.timestamp.format(DATETIME_FORMAT).to_string()
    }
}

/// `%Y-%m-%d %H:%M:%S` instead of chrono's default ISO 8601 `T` separator.
mod datetime_column {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT).map_err(D::Error::custom)
    }
}
