use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{NodeMapping, RawNode};

/// Deserializes `null` the same as a missing field: into `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom deserializer for `content.parts` that keeps only string parts
///
/// Exports may interleave non-text parts (asset pointers, images) with text. Those carry
/// no message text and are dropped here. A `parts` value that is not an array at all is
/// treated as absent, so only that message is lost.
pub fn deserialize_parts<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(parts)) => Some(string_elements(parts)),
        _ => None,
    })
}

/// Custom deserializer for a node's `children` that keeps only string ids
///
/// A non-string element cannot name a node, so it is a dangling reference like any
/// other and is dropped. Anything other than an array means no children.
pub fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(children)) => string_elements(children),
        _ => Vec::new(),
    })
}

fn string_elements(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Custom deserializer for a conversation's node mapping that keeps document key order
pub fn deserialize_mapping<'de, D>(deserializer: D) -> Result<Option<NodeMapping>, D::Error>
where
    D: Deserializer<'de>,
{
    let nodes = Option::<OrderedNodes>::deserialize(deserializer)?;
    Ok(nodes.map(|OrderedNodes(entries)| NodeMapping::from_entries(entries)))
}

struct OrderedNodes(Vec<(String, RawNode)>);

impl<'de> Deserialize<'de> for OrderedNodes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedNodesVisitor)
    }
}

struct OrderedNodesVisitor;

impl<'de> Visitor<'de> for OrderedNodesVisitor {
    type Value = OrderedNodes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of node ids to nodes")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, node)) = access.next_entry::<String, RawNode>()? {
            entries.push((key, node));
        }
        Ok(OrderedNodes(entries))
    }
}
