//! End-to-end pipeline over already parsed messages.

use tracing::info;

use crate::Message;
use crate::config::PipelineConfig;
use crate::core::chunk::{TextChunk, build_chunks};
use crate::core::models::ChatRecord;
use crate::core::normalize::normalize;
use crate::core::segment::{ConversationGroup, assign_conversations, group_conversations};
use crate::error::Result;

/// Counts collected by [`process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Messages produced by the parser.
    pub parsed: usize,
    /// Messages dropped as media placeholders.
    pub media_removed: usize,
    /// Messages written to the record table.
    pub retained: usize,
    pub conversations: usize,
    pub chunks: usize,
}

impl ProcessingStats {
    /// Share of parsed messages that were retained, in percent.
    pub fn retention_ratio(&self) -> f64 {
        if self.parsed == 0 {
            return 0.0;
        }
        (self.retained as f64 / self.parsed as f64) * 100.0
    }
}

/// Everything the pipeline produces for one export.
#[derive(Debug, Clone, Default)]
pub struct ProcessedChat {
    /// Sorted, normalized records with their conversation ids.
    pub records: Vec<ChatRecord>,
    pub chunks: Vec<TextChunk>,
    pub stats: ProcessingStats,
}

/// Normalizes, segments and chunks `messages`.
///
/// The configuration is validated first.
///
/// # Example
///
/// ```
/// use chatprep::config::PipelineConfig;
/// use chatprep::core::processor::process;
/// use chatprep::parsers::reassemble;
///
/// let (messages, _) = reassemble([
///     "12/06/24, 9:00 am - Bob: Look https://example.com",
///     "12/06/24, 9:01 am - Jane: <Media omitted>",
///     "12/06/24, 11:00 am - Bob: Anyone?",
/// ])?;
///
/// let out = process(messages, &PipelineConfig::default())?;
/// assert_eq!(out.stats.media_removed, 1);
/// assert_eq!(out.stats.conversations, 2);
/// assert_eq!(out.records[0].text, "Look [LINK]");
/// # Ok::<(), chatprep::ChatprepError>(())
/// ```
pub fn process(messages: Vec<Message>, config: &PipelineConfig) -> Result<ProcessedChat> {
    config.validate()?;

    let parsed = messages.len();
    let normalized = normalize(messages, config);
    let retained = normalized.len();

    let records = assign_conversations(normalized, config.max_gap_minutes);
    let groups = group_conversations(records.clone());
    let chunks = chunk_groups(&groups, config.max_words_per_chunk);

    let stats = ProcessingStats {
        parsed,
        media_removed: parsed - retained,
        retained,
        conversations: groups.len(),
        chunks: chunks.len(),
    };
    info!(
        parsed = stats.parsed,
        retained = stats.retained,
        conversations = stats.conversations,
        chunks = stats.chunks,
        "pipeline finished"
    );

    Ok(ProcessedChat {
        records,
        chunks,
        stats,
    })
}

#[cfg(feature = "parallel")]
fn chunk_groups(groups: &[ConversationGroup], max_words: usize) -> Vec<TextChunk> {
    crate::core::chunk::build_chunks_parallel(groups, max_words)
}

#[cfg(not(feature = "parallel"))]
fn chunk_groups(groups: &[ConversationGroup], max_words: usize) -> Vec<TextChunk> {
    build_chunks(groups, max_words)
}

/// Re-chunks a record table, e.g. one loaded with
/// [`read_csv`](crate::core::output::read_csv).
pub fn chunk_records(records: Vec<ChatRecord>, max_words: usize) -> Vec<TextChunk> {
    build_chunks(&group_conversations(records), max_words)
}
