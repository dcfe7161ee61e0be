//! Conversation segmentation.
//!
//! Messages are sorted by timestamp and split into conversations wherever the
//! gap between two neighbours exceeds a threshold.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::Message;
use crate::core::models::ChatRecord;

/// A maximal run of records with no internal gap above the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationGroup {
    pub id: usize,
    /// Never empty.
    pub records: Vec<ChatRecord>,
}

impl ConversationGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Sorts messages by timestamp.
///
/// The sort is stable: messages with equal timestamps keep their input
/// order, so reruns assign the same conversation ids.
pub fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by_key(|msg| msg.timestamp);
}

/// Sorts `messages` and tags each with a conversation id.
///
/// The first message opens conversation 0. A message whose distance to its
/// predecessor is strictly greater than `max_gap_minutes` opens the next
/// one. Ids are dense and increase with time.
///
/// # Example
///
/// ```
/// use chatprep::core::segment::assign_conversations;
/// use chatprep::parsers::reassemble;
///
/// let (messages, _) = reassemble([
///     "12/06/24, 9:00 am - Bob: Hello!",
///     "12/06/24, 9:01 am - Jane: Hi Bob!",
///     "12/06/24, 9:05 am - Bob: How are you?",
///     "12/06/24, 10:10 am - Jane: Sorry, was away",
/// ])?;
///
/// let records = assign_conversations(messages, 30);
/// let ids: Vec<_> = records.iter().map(|r| r.conversation_id).collect();
/// assert_eq!(ids, [0, 0, 0, 1]);
/// # Ok::<(), chatprep::ChatprepError>(())
/// ```
pub fn assign_conversations(mut messages: Vec<Message>, max_gap_minutes: i64) -> Vec<ChatRecord> {
    sort_chronologically(&mut messages);

    let mut records = Vec::with_capacity(messages.len());
    let mut conversation_id = 0;
    let mut previous: Option<NaiveDateTime> = None;

    for msg in messages {
        if let Some(prev) = previous {
            let gap = (msg.timestamp - prev).num_minutes();
            if gap > max_gap_minutes {
                conversation_id += 1;
            }
        }
        previous = Some(msg.timestamp);
        records.push(ChatRecord::new(msg, conversation_id));
    }

    debug!(
        records = records.len(),
        conversations = records.last().map_or(0, |r| r.conversation_id + 1),
        "assigned conversations"
    );
    records
}

/// Groups records by conversation id, in order of first appearance.
///
/// Records keep their relative order inside each group. Works on any
/// id-tagged sequence, including one read back from CSV where equal ids may
/// not be adjacent.
pub fn group_conversations(records: Vec<ChatRecord>) -> Vec<ConversationGroup> {
    let mut groups: Vec<ConversationGroup> = Vec::new();

    for record in records {
        match groups.last_mut() {
            Some(last) if last.id == record.conversation_id => last.records.push(record),
            _ => match groups.iter_mut().find(|g| g.id == record.conversation_id) {
                Some(group) => group.records.push(record),
                None => groups.push(ConversationGroup {
                    id: record.conversation_id,
                    records: vec![record],
                }),
            },
        }
    }

    groups
}

/// Sorts, tags and groups in one step.
pub fn segment(messages: Vec<Message>, max_gap_minutes: i64) -> Vec<ConversationGroup> {
    group_conversations(assign_conversations(messages, max_gap_minutes))
}
