//! Edge case tests for chatprep
//!
//! These tests cover unusual export content: encodings, line endings,
//! boundary dates and malformed headers.

use chatprep::Message;
use chatprep::config::PipelineConfig;
use chatprep::core::processor::process;
use chatprep::core::segment::assign_conversations;
use chatprep::parser::Parser;
use chatprep::parsers::WhatsAppParser;
use chrono::{NaiveDate, NaiveDateTime};

fn parse(content: &str) -> Vec<Message> {
    WhatsAppParser::new().parse_str(content).unwrap()
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

// =========================================================================
// Input encoding and layout
// =========================================================================

#[test]
fn test_byte_order_mark() {
    let messages = parse("\u{feff}12/06/24, 9:00 am - Bob: Hello!\n");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, "Bob");
}

#[test]
fn test_crlf_line_endings() {
    let messages = parse("12/06/24, 9:00 am - Bob: Hello!\r\nsecond line\r\n12/06/24, 9:01 am - Jane: Hi\r\n");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "Hello! second line");
    assert_eq!(messages[1].text, "Hi");
}

#[test]
fn test_narrow_no_break_space_export() {
    let messages = parse("12/06/24, 9:00\u{202f}pm - Bob: evening\n");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].timestamp, dt(2024, 6, 12, 21, 0));
}

#[test]
fn test_blank_lines_inside_message() {
    let messages = parse("12/06/24, 9:00 am - Bob: first\n\nafter blank\n");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "first  after blank");
    assert_eq!(messages[0].word_count(), 3);
}

#[test]
fn test_only_orphan_lines() {
    let messages = parse("Messages and calls are end-to-end encrypted.\nno headers here\n");
    assert!(messages.is_empty());
}

#[test]
fn test_system_line_without_sender_is_continuation() {
    let messages = parse(
        "12/06/24, 9:00 am - Bob: hi\n12/06/24, 9:01 am - Jane joined using this group's invite link\n",
    );
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].text,
        "hi 12/06/24, 9:01 am - Jane joined using this group's invite link"
    );
}

#[test]
fn test_header_with_empty_body_is_not_a_header() {
    // Trimming removes the space after the colon, so the line no longer
    // matches the header shape.
    let messages = parse("12/06/24, 9:00 am - Bob: \n");
    assert!(messages.is_empty());
}

#[test]
fn test_very_long_message() {
    let long = "word ".repeat(10_000);
    let content = format!("12/06/24, 9:00 am - Bob: {}\n", long.trim());
    let messages = parse(&content);
    assert_eq!(messages[0].word_count(), 10_000);
}

// =========================================================================
// Senders
// =========================================================================

#[test]
fn test_unicode_senders() {
    let content = "\
12/06/24, 9:00 am - Иван: Привет
12/06/24, 9:01 am - 村上: こんにちは
12/06/24, 9:02 am - +44 7700 900123: hello
";
    let senders: Vec<String> = parse(content).into_iter().map(|m| m.sender).collect();
    assert_eq!(senders, ["Иван", "村上", "+44 7700 900123"]);
}

#[test]
fn test_sender_text_split_at_first_separator() {
    let messages = parse("12/06/24, 9:00 am - Bob: note: meet at 5\n");
    assert_eq!(messages[0].sender, "Bob");
    assert_eq!(messages[0].text, "note: meet at 5");
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_midnight_and_noon() {
    let messages = parse("12/06/24, 12:05 am - Bob: late\n12/06/24, 12:05 pm - Bob: lunch\n");
    assert_eq!(messages[0].timestamp, dt(2024, 6, 12, 0, 5));
    assert_eq!(messages[1].timestamp, dt(2024, 6, 12, 12, 5));
}

#[test]
fn test_year_pivot_boundary() {
    let messages = parse("1/1/68, 1:00 am - Bob: future\n1/1/69, 1:00 am - Bob: past\n");
    assert_eq!(messages[0].timestamp, dt(2068, 1, 1, 1, 0));
    assert_eq!(messages[1].timestamp, dt(1969, 1, 1, 1, 0));
}

#[test]
fn test_leap_day() {
    let messages = parse("29/02/24, 9:00 am - Bob: leap\n");
    assert_eq!(messages[0].timestamp, dt(2024, 2, 29, 9, 0));

    let err = WhatsAppParser::new()
        .parse_str("29/02/23, 9:00 am - Bob: not leap\n")
        .unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_malformed_date_reports_line() {
    let content = "\
12/06/24, 9:00 am - Bob: fine
continuation
31/02/24, 9:01 am - Jane: impossible
";
    let err = WhatsAppParser::new().parse_str(content).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_hour_out_of_range() {
    for line in ["12/06/24, 13:10 pm - Bob: x", "12/06/24, 0:10 am - Bob: x"] {
        let err = WhatsAppParser::new().parse_str(line).unwrap_err();
        assert!(err.is_format(), "expected format error for {line:?}");
    }
}

#[test]
fn test_uppercase_marker_is_not_a_header() {
    let messages = parse("12/06/24, 9:00 am - Bob: hi\n12/06/24, 9:01 AM - Jane: hey\n");
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_gap_across_midnight() {
    let content = "\
12/06/24, 11:50 pm - Bob: good night
13/06/24, 12:10 am - Jane: still up?
";
    let records = assign_conversations(parse(content), 60);
    assert_eq!(records[0].conversation_id, 0);
    assert_eq!(records[1].conversation_id, 0);
}

// =========================================================================
// Normalization corner cases
// =========================================================================

#[test]
fn test_media_marker_inside_longer_text() {
    let messages = parse("12/06/24, 9:00 am - Bob: photo <Media omitted> here\n");
    let out = process(messages, &PipelineConfig::default()).unwrap();
    assert!(out.records.is_empty());
    assert!(out.chunks.is_empty());
    assert_eq!(out.stats.media_removed, 1);
}

#[test]
fn test_link_with_trailing_punctuation() {
    let messages = parse("12/06/24, 9:00 am - Bob: see https://example.com/a?b=1, ok\n");
    let out = process(messages, &PipelineConfig::default()).unwrap();
    assert_eq!(out.records[0].text, "see [LINK] ok");
}

#[test]
fn test_compound_emoji_converted_as_unit() {
    let messages = parse("12/06/24, 9:00 am - Bob: 🇫🇷 👨\u{200d}👩\u{200d}👧\n");
    let out = process(messages, &PipelineConfig::default()).unwrap();
    let text = &out.records[0].text;

    assert!(text.is_ascii(), "{text}");
    assert_eq!(text.split_whitespace().count(), 2);
    assert_eq!(text.matches(':').count(), 4);
}

#[test]
fn test_all_media_export() {
    let content = "\
12/06/24, 9:00 am - Bob: <Media omitted>
12/06/24, 9:01 am - Jane: <Media omitted>
";
    let out = process(parse(content), &PipelineConfig::default()).unwrap();
    assert_eq!(out.stats.parsed, 2);
    assert_eq!(out.stats.retained, 0);
    assert_eq!(out.stats.conversations, 0);
    assert_eq!(out.stats.retention_ratio(), 0.0);
}

// =========================================================================
// Output escaping
// =========================================================================

#[cfg(feature = "csv-output")]
#[test]
fn test_csv_escaping_special_chars() {
    use chatprep::core::output::{from_csv_reader, to_csv};

    let content = "12/06/24, 9:00 am - Bob, Jr.: he said \"hi\", then left\nnext line\n";
    let out = process(parse(content), &PipelineConfig::default()).unwrap();

    let csv = to_csv(&out.records).unwrap();
    assert!(csv.contains("\"Bob, Jr.\""));
    assert!(csv.contains("\"\"hi\"\""));

    let back = from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(back, out.records);
}

#[cfg(feature = "json-output")]
#[test]
fn test_json_escaping_special_chars() {
    use chatprep::core::output::to_json;

    let content = "12/06/24, 9:00 am - Bob: quote \" and backslash \\\n";
    let out = process(parse(content), &PipelineConfig::default()).unwrap();

    let json = to_json(&out.records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["message"], "quote \" and backslash \\");
}
