use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::RawConversation;
use crate::utils::open_archive;

/// Parse an archive file into raw conversations
///
/// # Errors
///
/// Returns an error if the file cannot be opened, exceeds the size limit, is not valid
/// JSON, or violates the archive shape (see [`parse_archive_value`]).
pub fn parse_archive_file(path: &Path) -> Result<Vec<RawConversation>> {
    let file = open_archive(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse archive JSON: {}", path.display()))?;

    parse_archive_value(value).with_context(|| format!("Invalid archive: {}", path.display()))
}

/// Parse an archive from a JSON string
pub fn parse_archive_str(json: &str) -> Result<Vec<RawConversation>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse archive JSON")?;
    parse_archive_value(value)
}

/// Convert an already-parsed JSON document into raw conversations
///
/// The archive must be an array whose every entry is an object; anything else fails the
/// whole archive. An object entry whose known fields have the wrong type is kept as an
/// empty conversation (same id when it has a string one, no mapping) so the parser drops
/// it like any other unusable conversation and its siblings survive.
pub fn parse_archive_value(value: Value) -> Result<Vec<RawConversation>> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => bail!(
            "Archive must be a JSON array of conversations, found {}",
            json_type_name(&other)
        ),
    };

    let mut conversations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            bail!(
                "Archive entry {} must be a conversation object, found {}",
                index,
                json_type_name(&entry)
            );
        }

        let id = entry.get("id").and_then(Value::as_str).map(str::to_string).unwrap_or_default();
        match serde_json::from_value::<RawConversation>(entry) {
            Ok(conversation) => conversations.push(conversation),
            Err(err) => {
                warn!(entry = index, conversation = %id, error = %err, "dropping malformed conversation");
                conversations.push(RawConversation { id, ..RawConversation::default() });
            }
        }
    }

    debug!(conversations = conversations.len(), "parsed archive");
    Ok(conversations)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
