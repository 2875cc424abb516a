use tracing::info;

use crate::models::{Conversation, RawConversation};
use crate::parsers::parse_conversation;

/// Counts gathered while assembling an archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub total: usize,
    pub assembled: usize,
    pub dropped: usize,
}

/// Reconstruct every conversation in an archive, omitting those that yield nothing
///
/// The result keeps the relative order of the input and may be shorter than it, or empty.
pub fn assemble_conversations(raw: &[RawConversation]) -> Vec<Conversation> {
    assemble_with_stats(raw).0
}

/// Same as [`assemble_conversations`], also returning how many conversations were dropped
pub fn assemble_with_stats(raw: &[RawConversation]) -> (Vec<Conversation>, AssemblyStats) {
    let conversations: Vec<Conversation> = raw.iter().filter_map(parse_conversation).collect();

    let stats = AssemblyStats {
        total: raw.len(),
        assembled: conversations.len(),
        dropped: raw.len() - conversations.len(),
    };

    info!(
        total = stats.total,
        assembled = stats.assembled,
        dropped = stats.dropped,
        "assembled conversations"
    );

    (conversations, stats)
}
