//! Chat Archive Importer - Reconstruct linear conversations from chat export archives
//!
//! Export archives store each conversation as a node graph (a *mapping*) in which edits and
//! regenerations branch off into alternate continuations. This library recovers the single
//! path shown to the user (the *trunk*) and cleans it for downstream indexing:
//!
//! - Parsing archives into raw conversations, rejecting archives with a broken shape
//! - Walking each conversation's trunk into an ordered message list
//! - Optionally stripping fenced code blocks from message content
//! - Pruning messages and conversations left empty
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_importer::{PreprocessConfig, import_archive};
//! use std::path::Path;
//!
//! let config = PreprocessConfig { remove_code_blocks: true };
//! let output = import_archive(Path::new("conversations.json"), &config)?;
//! println!("Imported {} conversations", output.conversations.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod assembler;
pub mod cli;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod preprocess;
pub mod utils;

// Re-export commonly used types
pub use assembler::{assemble_conversations, assemble_with_stats};
pub use filters::filter_conversations;
pub use models::{Conversation, Message, RawConversation};
pub use parsers::{parse_archive_file, parse_archive_str, parse_conversation};
pub use pipeline::{PipelineOutput, PipelineReport, import_archive, import_archives, run_pipeline};
pub use preprocess::{PreprocessConfig, preprocess_conversation, remove_code_blocks};
