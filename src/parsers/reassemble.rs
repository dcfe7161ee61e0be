//! Multi-line message reassembly.
//!
//! [`Reassembler`] is the accumulator of a fold over the lines of an export:
//! each header line seals the message in progress and opens a new one, each
//! continuation line is appended to the message in progress. Batch and
//! streaming parsers both drive the same accumulator, so they agree on every
//! input.

use tracing::debug;

use crate::Message;
use crate::error::Result;
use crate::parsing::{LineKind, classify_line};

/// Counters collected while reassembling an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Lines consumed, including blank ones.
    pub total_lines: usize,
    /// Lines that started a message.
    pub header_lines: usize,
    /// Lines folded into a preceding message.
    pub continuation_lines: usize,
    /// Continuation lines seen before any header and dropped.
    pub orphan_lines: usize,
}

impl ParseReport {
    /// Returns `true` if no header line was found.
    pub fn is_empty_input(&self) -> bool {
        self.header_lines == 0
    }
}

/// Fold state: the message currently being assembled.
///
/// # Orphan continuations
///
/// A continuation line that appears before the first header has no message
/// to attach to. It is dropped on purpose and counted in
/// [`ParseReport::orphan_lines`]; this is intentional data loss, not a
/// failure.
///
/// # Example
///
/// ```
/// use chatprep::parsers::Reassembler;
///
/// let mut fold = Reassembler::new();
/// assert!(fold.push_line("12/06/24, 9:00 am - Bob: Hello!").unwrap().is_none());
/// assert!(fold.push_line("This is a continuation.").unwrap().is_none());
///
/// let (last, report) = fold.finish();
/// let msg = last.unwrap();
/// assert_eq!(msg.text, "Hello! This is a continuation.");
/// assert_eq!(report.header_lines, 1);
/// ```
#[derive(Debug, Default)]
pub struct Reassembler {
    current: Option<Message>,
    report: ParseReport,
}

impl Reassembler {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line (line terminator optional).
    ///
    /// Returns the message sealed by this line, if the line was a header and
    /// a message was in progress.
    pub fn push_line(&mut self, raw: &str) -> Result<Option<Message>> {
        self.report.total_lines += 1;
        let line_no = self.report.total_lines;

        let raw = if line_no == 1 {
            raw.strip_prefix('\u{feff}').unwrap_or(raw)
        } else {
            raw
        };
        let line = raw.trim();

        match classify_line(line, line_no)? {
            LineKind::Header(header) => {
                self.report.header_lines += 1;
                let next = Message::new(header.timestamp, header.sender, header.text);
                Ok(self.current.replace(next))
            }
            LineKind::Continuation(text) => {
                if let Some(current) = self.current.as_mut() {
                    self.report.continuation_lines += 1;
                    current.append_line(text);
                } else {
                    self.report.orphan_lines += 1;
                    debug!(line = line_no, "dropping continuation line before first header");
                }
                Ok(None)
            }
        }
    }

    /// Size in bytes of the message in progress.
    pub fn pending_len(&self) -> usize {
        self.current.as_ref().map_or(0, |m| m.text.len())
    }

    /// Returns the counters collected so far.
    pub fn report(&self) -> ParseReport {
        self.report
    }

    /// Seals the message in progress without consuming the accumulator.
    ///
    /// Counters are kept, so [`report`](Self::report) stays valid afterwards.
    pub fn take_pending(&mut self) -> Option<Message> {
        self.current.take()
    }

    /// Seals the last message and returns it with the final counters.
    pub fn finish(mut self) -> (Option<Message>, ParseReport) {
        (self.take_pending(), self.report)
    }
}

/// Reassembles all messages from a sequence of lines, in input order.
pub fn reassemble<'a, I>(lines: I) -> Result<(Vec<Message>, ParseReport)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut messages = Vec::new();
    let mut fold = Reassembler::new();

    for line in lines {
        if let Some(sealed) = fold.push_line(line)? {
            messages.push(sealed);
        }
    }

    let (last, report) = fold.finish();
    messages.extend(last);
    Ok((messages, report))
}
