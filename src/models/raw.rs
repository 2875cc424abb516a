use std::collections::HashMap;

use serde::Deserialize;

/// Role whose messages never appear in the reconstructed conversation
pub const ROLE_SYSTEM: &str = "system";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_parts")]
    pub parts: Option<Vec<String>>,
}

impl RawContent {
    /// Concatenates all parts with no separator, or `None` when parts are absent
    pub fn joined_text(&self) -> Option<String> {
        self.parts.as_ref().map(|parts| parts.concat())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::null_as_default")]
    pub author: RawAuthor,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub create_time: Option<f64>,
}

impl RawMessage {
    pub fn is_system(&self) -> bool {
        self.author.role == ROLE_SYSTEM
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::null_as_default")]
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_children")]
    pub children: Vec<String>,
    #[serde(default)]
    pub message: Option<RawMessage>,
}

impl RawNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Id-keyed node arena for one conversation.
///
/// Nodes are kept in the key order of the source document so that root selection
/// is deterministic. Parent/child relations are plain id lookups into this table;
/// an id with no entry is a dead end.
#[derive(Debug, Clone, Default)]
pub struct NodeMapping {
    nodes: Vec<(String, RawNode)>,
    index: HashMap<String, usize>,
}

impl NodeMapping {
    /// Builds the arena from `(key, node)` pairs in document order.
    /// A repeated key keeps its first position and its last value.
    pub fn from_entries(entries: Vec<(String, RawNode)>) -> Self {
        let mut nodes: Vec<(String, RawNode)> = Vec::with_capacity(entries.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(entries.len());

        for (key, node) in entries {
            match index.get(&key) {
                Some(&position) => nodes[position].1 = node,
                None => {
                    index.insert(key.clone(), nodes.len());
                    nodes.push((key, node));
                }
            }
        }

        Self { nodes, index }
    }

    pub fn get(&self, id: &str) -> Option<&RawNode> {
        self.index.get(id).map(|&position| &self.nodes[position].1)
    }

    /// Iterates `(key, node)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawNode)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in document order without a parent
    pub fn root(&self) -> Option<(&str, &RawNode)> {
        self.iter().find(|(_, node)| node.is_root())
    }
}

impl FromIterator<(String, RawNode)> for NodeMapping {
    fn from_iter<I: IntoIterator<Item = (String, RawNode)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConversation {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::null_as_default")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_mapping")]
    pub mapping: Option<NodeMapping>,
}
