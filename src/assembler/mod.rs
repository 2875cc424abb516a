//! Conversation assembly for a whole archive
//!
//! Applies the trunk parser to every raw conversation and keeps the ones that yield at least
//! one message, preserving archive order. Dropped conversations are counted in
//! [`AssemblyStats`] so callers can report how much of an archive was usable.

pub mod builder;

pub use builder::{AssemblyStats, assemble_conversations, assemble_with_stats};
