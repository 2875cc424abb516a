//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for export archives written to a temporary directory
pub struct ArchiveBuilder {
    conversations: Vec<ConversationBuilder>,
}

impl ArchiveBuilder {
    /// Create a new builder for an empty archive
    pub fn new() -> Self {
        Self { conversations: Vec::new() }
    }

    /// Add a conversation
    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        Value::Array(self.conversations.iter().map(|c| c.to_value()).collect())
    }

    /// Convert to a JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Write the archive as `conversations.json` in a new temp dir
    pub fn build(&self) -> TestArchive {
        TestArchive::with_content(&self.to_json())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An archive file on disk, removed when dropped
pub struct TestArchive {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestArchive {
    /// Write raw content (valid or not) as an archive file
    pub fn with_content(content: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("conversations.json");
        fs::write(&path, content).expect("Failed to write archive");
        Self { temp_dir, path }
    }

    /// Path to the archive file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the archive, for writing outputs next to it
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Builder for one exported conversation
pub struct ConversationBuilder {
    id: String,
    title: Option<String>,
    create_time: Option<f64>,
    nodes: Option<Vec<NodeBuilder>>,
}

impl ConversationBuilder {
    /// Create a conversation with an empty mapping
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: Some(format!("Conversation {}", id)),
            create_time: Some(1700000000.0),
            nodes: Some(Vec::new()),
        }
    }

    /// Create a conversation whose trunk is a parentless, messageless root followed by a
    /// single-child chain of `(role, text)` messages
    pub fn chain(id: &str, messages: &[(&str, &str)]) -> Self {
        let mut builder = Self::new(id);
        let first = messages.first().map(|_| format!("{}-m0", id));
        builder = builder.with_node(NodeBuilder::new("root").children(first.as_slice()));

        for (i, (role, text)) in messages.iter().enumerate() {
            let node_id = format!("{}-m{}", id, i);
            let parent = if i == 0 { "root".to_string() } else { format!("{}-m{}", id, i - 1) };
            let mut node = NodeBuilder::new(&node_id).parent(&parent).message(role, text);
            if i + 1 < messages.len() {
                node = node.children(&[format!("{}-m{}", id, i + 1)]);
            }
            builder = builder.with_node(node);
        }

        builder
    }

    /// Set the title
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the creation time (unix seconds)
    pub fn create_time(mut self, create_time: f64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    /// Omit the mapping entirely
    pub fn without_mapping(mut self) -> Self {
        self.nodes = None;
        self
    }

    /// Add a node to the mapping (document order is insertion order)
    pub fn with_node(mut self, node: NodeBuilder) -> Self {
        self.nodes.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        let mut conversation = Map::new();
        conversation.insert("id".to_string(), json!(self.id));
        conversation.insert("title".to_string(), json!(self.title));
        conversation.insert("create_time".to_string(), json!(self.create_time));

        if let Some(nodes) = &self.nodes {
            let mut mapping = Map::new();
            for node in nodes {
                mapping.insert(node.id.clone(), node.to_value());
            }
            conversation.insert("mapping".to_string(), Value::Object(mapping));
        }

        Value::Object(conversation)
    }
}

/// Builder for a mapping node
pub struct NodeBuilder {
    id: String,
    parent: Option<String>,
    children: Vec<String>,
    message: Option<Value>,
}

impl NodeBuilder {
    /// Create a parentless node without children or message
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string(), parent: None, children: Vec::new(), message: None }
    }

    /// Set the parent id
    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Set the child ids, in order
    pub fn children<S: AsRef<str>>(mut self, children: &[S]) -> Self {
        self.children = children.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Attach a single-part text message
    pub fn message(self, role: &str, text: &str) -> Self {
        self.message_parts(role, &[text])
    }

    /// Attach a message with several text parts
    pub fn message_parts(mut self, role: &str, parts: &[&str]) -> Self {
        self.message = Some(json!({
            "id": format!("msg-{}", self.id),
            "author": {"role": role},
            "content": {"content_type": "text", "parts": parts},
            "create_time": 1700000000.0,
        }));
        self
    }

    /// Attach an arbitrary raw message value
    pub fn raw_message(mut self, message: Value) -> Self {
        self.message = Some(message);
        self
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        let mut node = json!({
            "id": self.id,
            "parent": self.parent,
            "children": self.children,
        });
        if let Some(message) = &self.message {
            node["message"] = message.clone();
        }
        node
    }
}

/// Helper to create an archive resembling a real export: a plain chat, a chat with an
/// edited prompt, a code-only exchange, and a conversation with only a system message
pub fn realistic_archive() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .with_conversation(
            ConversationBuilder::chain("greeting", &[("user", "Hello"), ("assistant", "Hi there")])
                .title("Greeting")
                .create_time(1700000000.0),
        )
        .with_conversation(
            ConversationBuilder::new("edited")
                .title("Edited prompt")
                .create_time(1700003600.0)
                .with_node(NodeBuilder::new("root").children(&["sys"]))
                .with_node(
                    NodeBuilder::new("sys")
                        .parent("root")
                        .children(&["q-old", "q-new"])
                        .message("system", "You are a helpful assistant"),
                )
                .with_node(
                    NodeBuilder::new("q-old")
                        .parent("sys")
                        .children(&["a-old"])
                        .message("user", "What is Rust?"),
                )
                .with_node(NodeBuilder::new("a-old").parent("q-old").message("assistant", "A language."))
                .with_node(
                    NodeBuilder::new("q-new")
                        .parent("sys")
                        .message("user", "What is Rust, briefly?"),
                ),
        )
        .with_conversation(
            ConversationBuilder::chain("code", &[("user", "```\nfn main() {}\n```")])
                .title("Code only")
                .create_time(1700007200.0),
        )
        .with_conversation(
            ConversationBuilder::chain("system-only", &[("system", "Custom instructions")])
                .title("System only"),
        )
}
