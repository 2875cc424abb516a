//! Data models for conversation-export archives.
//!
//! - [`RawConversation`], [`RawNode`], [`RawMessage`] - the archive as exported, with each
//!   conversation stored as an id-keyed node graph ([`NodeMapping`])
//! - [`Conversation`], [`Message`] - the linear, cleaned output handed to downstream consumers
//!
//! Raw models are read-only inputs. Custom deserializers for their lenient fields live in
//! `parsers::deserializers`.

pub mod conversation;
pub mod raw;

pub use conversation::{Conversation, Message};
pub use raw::{NodeMapping, RawAuthor, RawContent, RawConversation, RawMessage, RawNode, ROLE_SYSTEM};
