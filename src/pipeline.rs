//! End-to-end import: archive → trunk reconstruction → preprocessing → filtering.
//!
//! Every stage consumes one value and produces a new one. Nothing here performs I/O except
//! [`import_archive`], which reads the archive file before handing it to [`run_pipeline`].
//! Independent archives share no state, so [`import_archives`] processes them in parallel.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::info;

use crate::assembler::assemble_with_stats;
use crate::filters::filter_conversations;
use crate::models::{Conversation, RawConversation};
use crate::parsers::parse_archive_file;
use crate::preprocess::{PreprocessConfig, preprocess_conversations};

/// Counts describing how an archive shrank on its way through the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub raw_conversations: usize,
    pub assembled: usize,
    pub dropped_by_parser: usize,
    pub dropped_by_filter: usize,
    pub conversations: usize,
    pub messages: usize,
}

impl PipelineReport {
    /// Combine reports from several archives
    pub fn merge(self, other: PipelineReport) -> PipelineReport {
        PipelineReport {
            raw_conversations: self.raw_conversations + other.raw_conversations,
            assembled: self.assembled + other.assembled,
            dropped_by_parser: self.dropped_by_parser + other.dropped_by_parser,
            dropped_by_filter: self.dropped_by_filter + other.dropped_by_filter,
            conversations: self.conversations + other.conversations,
            messages: self.messages + other.messages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub conversations: Vec<Conversation>,
    pub report: PipelineReport,
}

/// Run all stages over an already-parsed archive
pub fn run_pipeline(raw: &[RawConversation], config: &PreprocessConfig) -> PipelineOutput {
    let (assembled, assembly) = assemble_with_stats(raw);
    let preprocessed = preprocess_conversations(&assembled, config);
    let conversations = filter_conversations(&preprocessed);

    let report = PipelineReport {
        raw_conversations: assembly.total,
        assembled: assembly.assembled,
        dropped_by_parser: assembly.dropped,
        dropped_by_filter: assembled.len() - conversations.len(),
        conversations: conversations.len(),
        messages: conversations.iter().map(Conversation::message_count).sum(),
    };

    info!(
        conversations = report.conversations,
        messages = report.messages,
        dropped_by_parser = report.dropped_by_parser,
        dropped_by_filter = report.dropped_by_filter,
        remove_code_blocks = config.remove_code_blocks,
        "pipeline finished"
    );

    PipelineOutput { conversations, report }
}

/// Read an archive file and run the pipeline over it
///
/// # Errors
///
/// Fails when the archive cannot be read or violates the archive shape. Problems inside
/// individual conversations never fail the import.
pub fn import_archive(path: &Path, config: &PreprocessConfig) -> Result<PipelineOutput> {
    let raw = parse_archive_file(path)?;
    info!(archive = %path.display(), conversations = raw.len(), "importing archive");
    Ok(run_pipeline(&raw, config))
}

/// Import several archives in parallel, one worker per archive
///
/// Results are returned in the order of `paths`, each paired with its path.
pub fn import_archives(
    paths: &[PathBuf],
    config: &PreprocessConfig,
) -> Vec<(PathBuf, Result<PipelineOutput>)> {
    paths.par_iter().map(|path| (path.clone(), import_archive(path, config))).collect()
}
