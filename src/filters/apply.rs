use tracing::debug;

use crate::models::{Conversation, Message};

/// Drop messages whose content is blank after trimming
///
/// Returns `None` when no message remains, so an empty conversation is never represented.
pub fn filter_empty_messages(conversation: &Conversation) -> Option<Conversation> {
    let messages: Vec<Message> = conversation
        .messages
        .iter()
        .filter(|message| !message.content.trim().is_empty())
        .cloned()
        .collect();

    if messages.is_empty() {
        debug!(conversation = %conversation.id, "dropping conversation left empty by preprocessing");
        return None;
    }

    Some(Conversation {
        id: conversation.id.clone(),
        title: conversation.title.clone(),
        create_time: conversation.create_time,
        messages,
    })
}

/// Apply [`filter_empty_messages`] to every conversation, dropping the ones left empty
///
/// Must run after content preprocessing so messages emptied by it are pruned.
pub fn filter_conversations(conversations: &[Conversation]) -> Vec<Conversation> {
    conversations.iter().filter_map(filter_empty_messages).collect()
}
