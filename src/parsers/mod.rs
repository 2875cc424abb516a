//! Parsers for conversation-export archives
//!
//! # Error Handling Strategy
//!
//! Two failure classes are kept strictly apart:
//!
//! - **Input-shape violations**: the archive is not valid JSON, is not an array, contains a
//!   non-object entry, or has a known field with the wrong JSON type. These mean the exporter
//!   contract is broken, so the whole archive is rejected with an `anyhow` error naming the
//!   offending entry.
//!
//! - **Structural omissions**: a missing mapping, no root node, dangling child ids, system or
//!   empty messages. These are quirks of individual conversations and are resolved by dropping
//!   the smallest affected unit (one message or one conversation). They are logged at `debug`
//!   level and never surface as errors.

pub mod archive;
pub mod deserializers;
pub mod graph;

pub use archive::{parse_archive_file, parse_archive_str, parse_archive_value};
pub use graph::parse_conversation;
