//! Packing conversations into word-bounded text chunks.
//!
//! Each record is rendered as a speaker-tagged line, `<sender>: text`, and
//! lines are appended to an accumulator until its word count exceeds the
//! limit. The limit is a soft cap: it is checked after the append, so a
//! chunk may overshoot by at most its last message and no message is ever
//! split. Chunks never span two conversations.

use serde::Serialize;

use crate::core::models::ChatRecord;
use crate::core::segment::ConversationGroup;

/// A bounded block of speaker-tagged lines from one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    pub conversation_id: usize,
    /// Newline-joined `<sender>: text` lines, trimmed.
    #[serde(rename = "text_for_model")]
    pub text: String,
    #[serde(skip)]
    pub message_count: usize,
    #[serde(skip)]
    pub word_count: usize,
}

/// Wraps a sender name in angle brackets.
pub fn speaker_token(sender: &str) -> String {
    format!("<{sender}>")
}

/// Renders one record as a chunk line.
pub fn render_line(record: &ChatRecord) -> String {
    format!("{}: {}", speaker_token(&record.sender), record.text.trim())
}

/// Distinct speaker tokens in order of first appearance.
///
/// # Example
///
/// ```
/// use chatprep::core::chunk::speaker_tokens;
/// use chatprep::core::segment::assign_conversations;
/// use chatprep::parsers::reassemble;
///
/// let (messages, _) = reassemble([
///     "12/06/24, 9:00 am - Bob: Hello!",
///     "12/06/24, 9:01 am - Jane: Hi Bob!",
///     "12/06/24, 9:05 am - Bob: How are you?",
/// ])?;
/// let records = assign_conversations(messages, 60);
///
/// assert_eq!(speaker_tokens(&records), ["<Bob>", "<Jane>"]);
/// # Ok::<(), chatprep::ChatprepError>(())
/// ```
pub fn speaker_tokens(records: &[ChatRecord]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for record in records {
        let token = speaker_token(&record.sender);
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// In-progress chunk for one group.
struct Accumulator {
    conversation_id: usize,
    text: String,
    message_count: usize,
    word_count: usize,
}

impl Accumulator {
    fn new(conversation_id: usize) -> Self {
        Self {
            conversation_id,
            text: String::new(),
            message_count: 0,
            word_count: 0,
        }
    }

    fn push(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.message_count += 1;
        self.word_count += line.split_whitespace().count();
    }

    fn seal(&mut self) -> Option<TextChunk> {
        if self.text.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.text);
        let chunk = TextChunk {
            conversation_id: self.conversation_id,
            text: text.trim().to_string(),
            message_count: self.message_count,
            word_count: self.word_count,
        };
        self.message_count = 0;
        self.word_count = 0;
        Some(chunk)
    }
}

/// Chunks a single conversation.
pub fn chunk_group(group: &ConversationGroup, max_words: usize) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut acc = Accumulator::new(group.id);

    for record in &group.records {
        acc.push(&render_line(record));
        if acc.word_count > max_words {
            chunks.extend(acc.seal());
        }
    }
    chunks.extend(acc.seal());

    chunks
}

/// Chunks every group in order.
pub fn build_chunks(groups: &[ConversationGroup], max_words: usize) -> Vec<TextChunk> {
    groups
        .iter()
        .flat_map(|group| chunk_group(group, max_words))
        .collect()
}

/// Chunks groups on the rayon thread pool.
///
/// Output is identical to [`build_chunks`]: results are collected in group
/// order.
#[cfg(feature = "parallel")]
pub fn build_chunks_parallel(groups: &[ConversationGroup], max_words: usize) -> Vec<TextChunk> {
    use rayon::prelude::*;

    let per_group: Vec<Vec<TextChunk>> = groups
        .par_iter()
        .map(|group| chunk_group(group, max_words))
        .collect();

    per_group.into_iter().flatten().collect()
}
