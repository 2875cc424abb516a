use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::models::Conversation;
use crate::pipeline::{PipelineReport, import_archive, import_archives};
use crate::preprocess::PreprocessConfig;
use crate::utils::format_create_time;

#[derive(Parser)]
#[command(name = "chat-archive-importer")]
#[command(version = "0.1.0")]
#[command(
    about = "Reconstruct and clean conversations from a chat export archive",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct PreprocessArgs {
    /// Strip fenced code blocks from message content
    #[arg(long)]
    pub remove_code_blocks: bool,

    /// Keep fenced code blocks even if the config file removes them
    #[arg(long, conflicts_with = "remove_code_blocks")]
    pub keep_code_blocks: bool,

    /// JSON config file, e.g. {"removeCodeBlocks": true}
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PreprocessArgs {
    pub fn resolve(&self) -> Result<PreprocessConfig> {
        let remove_code_blocks = match (self.remove_code_blocks, self.keep_code_blocks) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Ok(PreprocessConfig::load(self.config.as_deref())?.with_overrides(remove_code_blocks))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import one or more archives and write the cleaned conversations as JSON
    Import {
        /// Archive files (JSON arrays of exported conversations)
        #[arg(required = true, value_name = "ARCHIVE")]
        archives: Vec<PathBuf>,

        #[command(flatten)]
        preprocess: PreprocessArgs,

        /// Write output to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show statistics about an archive
    Stats {
        /// Archive file
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        #[command(flatten)]
        preprocess: PreprocessArgs,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Import { archives, preprocess, output, pretty }) => {
            let config = preprocess.resolve()?;
            import(archives, &config, output.as_deref(), *pretty)?;
        }
        Some(Commands::Stats { archive, preprocess }) => {
            let config = preprocess.resolve()?;
            show_stats(archive, &config)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn import(
    archives: &[PathBuf],
    config: &PreprocessConfig,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let mut conversations = Vec::new();
    let mut report = PipelineReport::default();

    // A malformed archive fails the whole import
    for (path, result) in import_archives(archives, config) {
        let imported =
            result.with_context(|| format!("Failed to import archive {}", path.display()))?;
        report = report.merge(imported.report);
        conversations.extend(imported.conversations);
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_conversations(BufWriter::new(file), &conversations, pretty)?;
            println!(
                "Imported {} conversations ({} messages) to {}",
                report.conversations,
                report.messages,
                path.display()
            );
        }
        None => {
            write_conversations(BufWriter::new(io::stdout().lock()), &conversations, pretty)?;
        }
    }

    Ok(())
}

fn write_conversations<W: Write>(
    mut writer: W,
    conversations: &[Conversation],
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, conversations)?;
    } else {
        serde_json::to_writer(&mut writer, conversations)?;
    }
    writeln!(writer)?;
    writer.flush().context("Failed to write output")?;
    Ok(())
}

fn show_stats(archive: &Path, config: &PreprocessConfig) -> Result<()> {
    let output = import_archive(archive, config)?;
    let report = output.report;

    let mut roles: BTreeMap<&str, usize> = BTreeMap::new();
    for message in output.conversations.iter().flat_map(|c| &c.messages) {
        *roles.entry(message.author.as_str()).or_default() += 1;
    }

    println!("Chat Archive Statistics");
    println!("=======================");
    println!("Archive: {}", archive.display());
    println!("Raw conversations: {}", report.raw_conversations);
    println!("Conversations kept: {}", report.conversations);
    println!("  Dropped by parser: {}", report.dropped_by_parser);
    println!("  Dropped by filter: {}", report.dropped_by_filter);
    println!("Messages: {}", report.messages);
    for (role, count) in &roles {
        println!("  {}: {}", role, count);
    }
    println!("Code blocks removed: {}", if config.remove_code_blocks { "yes" } else { "no" });

    let create_times = output.conversations.iter().filter_map(|c| c.create_time);
    let oldest = create_times.clone().min_by(f64::total_cmp);
    let newest = create_times.max_by(f64::total_cmp);

    if let Some(oldest) = oldest.and_then(format_create_time) {
        println!("Oldest conversation: {}", oldest);
    }
    if let Some(newest) = newest.and_then(format_create_time) {
        println!("Newest conversation: {}", newest);
    }

    Ok(())
}
