//! Trunk reconstruction for a single conversation's node mapping.
//!
//! The walk starts at the root and repeatedly follows the first child that exists in the
//! mapping and carries a message. Alternate branches (edits, regenerations) are skipped
//! without being inspected. The walk is a loop so that arbitrarily long conversations
//! cannot exhaust the stack.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::models::{Conversation, Message, NodeMapping, RawConversation, RawNode};

/// Reconstruct a conversation from its trunk
///
/// Returns `None` when the conversation contributes nothing: no mapping, no parentless
/// node, or no message on the trunk that survives extraction. This is never an error.
pub fn parse_conversation(raw: &RawConversation) -> Option<Conversation> {
    let Some(mapping) = raw.mapping.as_ref().filter(|mapping| !mapping.is_empty()) else {
        debug!(conversation = %raw.id, "skipping conversation without mapping");
        return None;
    };

    let Some((root_id, root)) = mapping.root() else {
        debug!(conversation = %raw.id, nodes = mapping.len(), "skipping conversation without root node");
        return None;
    };

    let messages = walk_trunk(mapping, root_id, root);
    if messages.is_empty() {
        debug!(conversation = %raw.id, "skipping conversation with no usable messages");
        return None;
    }

    Some(Conversation {
        id: raw.id.clone(),
        title: raw.title.clone().unwrap_or_default(),
        create_time: raw.create_time,
        messages,
    })
}

/// Collect messages along the trunk starting at `root`
pub fn walk_trunk<'a>(mapping: &'a NodeMapping, root_id: &'a str, root: &'a RawNode) -> Vec<Message> {
    let mut messages = Vec::new();
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut current_id = root_id;
    let mut current = root;

    loop {
        if !visited.insert(current_id) {
            debug!(node = current_id, "cycle in mapping, stopping trunk walk");
            break;
        }

        if let Some(message) = extract_message(current) {
            messages.push(message);
        }

        match next_trunk_node(mapping, current) {
            Some((next_id, next)) => {
                current_id = next_id;
                current = next;
            }
            None => break,
        }
    }

    messages
}

/// First child, in `children` order, that exists in the mapping and carries a message
fn next_trunk_node<'a>(mapping: &'a NodeMapping, node: &'a RawNode) -> Option<(&'a str, &'a RawNode)> {
    node.children.iter().find_map(|child_id| match mapping.get(child_id) {
        Some(child) if child.message.is_some() => Some((child_id.as_str(), child)),
        Some(_) => {
            trace!(node = %child_id, "skipping child without message");
            None
        }
        None => {
            trace!(node = %child_id, "skipping dangling child reference");
            None
        }
    })
}

/// Build an output message from a node, if it carries one worth keeping
///
/// System messages, messages without parts, and messages whose parts join to an empty
/// string are dropped.
fn extract_message(node: &RawNode) -> Option<Message> {
    let message = node.message.as_ref()?;
    if message.is_system() {
        return None;
    }

    let content = message.content.as_ref()?.joined_text()?;
    if content.is_empty() {
        return None;
    }

    Some(Message {
        id: message.id.clone(),
        author: message.author.role.clone(),
        content,
        timestamp: message.create_time,
    })
}
