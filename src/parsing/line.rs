//! Line classification for WhatsApp TXT exports.
//!
//! Every line of an export either starts a new message (a *header line*) or
//! continues the previous one. Header lines look like:
//!
//! ```text
//! 12/06/24, 9:00 am - Bob: Hello!
//! ```
//!
//! that is `D/M/YY, H:MM am|pm - Sender: Message`, with 1–2 digit day and
//! month, a 2-digit year, 12-hour time and a lowercase `am`/`pm` marker.
//! Recent exports put a narrow no-break space (U+202F) before the marker;
//! any single whitespace character is accepted there.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{ChatprepError, Result};

/// Header grammar. Captures: day, month, year, hour, minute, marker, sender, text.
///
/// The sender is matched lazily so it ends at the first `": "`.
const HEADER_PATTERN: &str =
    r"^(\d{1,2})/(\d{1,2})/(\d{2}), (\d{1,2}):(\d{2})\s([ap]m) - (.*?): (.*)$";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"));

/// Parsed parts of a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    /// Date and time of the message.
    pub timestamp: NaiveDateTime,
    /// Sender, trimmed.
    pub sender: &'a str,
    /// Text following `Sender: ` on the header line.
    pub text: &'a str,
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line starts a new message.
    Header(Header<'a>),
    /// The line belongs to the previous message.
    Continuation(&'a str),
}

/// Returns `true` if the line has the shape of a header.
///
/// Does not validate the date; use [`classify_line`] for that.
pub fn is_header_line(line: &str) -> bool {
    HEADER_RE.is_match(line)
}

/// Classifies one trimmed line.
///
/// `line_no` is the 1-based position in the input and only used for error
/// reporting.
///
/// # Errors
///
/// Returns [`ChatprepError::Format`] when the line matches the header grammar
/// but its date or time does not exist (`31/02/24`, `13:10 pm`, `0:30 am`).
/// Such a line is never treated as a continuation.
///
/// # Example
///
/// ```
/// use chatprep::parsing::{LineKind, classify_line};
///
/// let kind = classify_line("12/06/24, 9:00 am - Bob: Hello!", 1).unwrap();
/// match kind {
///     LineKind::Header(header) => {
///         assert_eq!(header.sender, "Bob");
///         assert_eq!(header.text, "Hello!");
///     }
///     LineKind::Continuation(_) => unreachable!(),
/// }
///
/// assert_eq!(
///     classify_line("just more text", 2).unwrap(),
///     LineKind::Continuation("just more text"),
/// );
/// ```
pub fn classify_line(line: &str, line_no: usize) -> Result<LineKind<'_>> {
    let Some(caps) = HEADER_RE.captures(line) else {
        return Ok(LineKind::Continuation(line));
    };

    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let timestamp = build_timestamp(
        field(1),
        field(2),
        field(3),
        field(4),
        field(5),
        field(6),
    )
    .map_err(|message| ChatprepError::format_error(line_no, line, message))?;

    Ok(LineKind::Header(Header {
        timestamp,
        sender: field(7).trim(),
        text: field(8),
    }))
}

/// Builds a timestamp from the captured header fields.
///
/// Two-digit years pivot like POSIX `%y`: `00..=68` → 20xx, `69..=99` → 19xx.
fn build_timestamp(
    day: &str,
    month: &str,
    year: &str,
    hour: &str,
    minute: &str,
    marker: &str,
) -> std::result::Result<NaiveDateTime, String> {
    let number = |s: &str| {
        s.parse::<u32>()
            .map_err(|e| format!("invalid number '{s}': {e}"))
    };

    let (day, month, yy) = (number(day)?, number(month)?, number(year)?);
    let (hour12, minute) = (number(hour)?, number(minute)?);

    let century = if yy < 69 { 2000 } else { 1900 };
    let year = century + yy as i32;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("no such date {day}/{month}/{year}"))?;

    if !(1..=12).contains(&hour12) {
        return Err(format!("hour {hour12} is outside 1-12"));
    }
    let hour = match (hour12, marker) {
        (12, "am") => 0,
        (12, _) => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    };

    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("no such time {hour12}:{minute:02} {marker}"))
}
