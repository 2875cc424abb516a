//! Content preprocessing for reconstructed conversations
//!
//! Every function returns a new value and leaves its input untouched, so stages can be
//! composed and tested in isolation. The only configurable transformation is fenced
//! code block removal ([`PreprocessConfig::remove_code_blocks`]). Whitespace
//! normalization is exposed as a standalone primitive and is not part of the
//! conversation-level pass.

pub mod config;
pub mod content;

pub use config::PreprocessConfig;
pub use content::{
    normalize_whitespace, preprocess_conversation, preprocess_conversations, preprocess_message,
    remove_code_blocks,
};
