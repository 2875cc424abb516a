use std::sync::OnceLock;

use regex::Regex;

use super::config::PreprocessConfig;
use crate::models::{Conversation, Message};

fn code_fence_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // Leftmost-shortest: a fence closes at the next triple backtick
    REGEX.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("code fence regex should compile"))
}

fn whitespace_run_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex should compile"))
}

/// Delete every fenced code block, fences included
///
/// Text on either side of a removed block is joined as-is: no placeholder and no
/// trimming at the seam. An opening fence without a closing one is left in place.
pub fn remove_code_blocks(content: &str) -> String {
    code_fence_regex().replace_all(content, "").into_owned()
}

/// Collapse each run of whitespace to a single space and trim both ends
///
/// Available on its own; [`preprocess_conversation`] does not apply it.
pub fn normalize_whitespace(content: &str) -> String {
    whitespace_run_regex().replace_all(content.trim(), " ").into_owned()
}

/// Apply the configured content transformations to one message
pub fn preprocess_message(message: &Message, config: &PreprocessConfig) -> Message {
    let content = if config.remove_code_blocks {
        remove_code_blocks(&message.content)
    } else {
        message.content.clone()
    };

    Message { content, ..message.clone() }
}

/// Apply the configured content transformations to every message of a conversation
///
/// Identity, title, creation time, and message count are unchanged.
pub fn preprocess_conversation(conversation: &Conversation, config: &PreprocessConfig) -> Conversation {
    Conversation {
        id: conversation.id.clone(),
        title: conversation.title.clone(),
        create_time: conversation.create_time,
        messages: conversation
            .messages
            .iter()
            .map(|message| preprocess_message(message, config))
            .collect(),
    }
}

pub fn preprocess_conversations(
    conversations: &[Conversation],
    config: &PreprocessConfig,
) -> Vec<Conversation> {
    conversations.iter().map(|conversation| preprocess_conversation(conversation, config)).collect()
}
