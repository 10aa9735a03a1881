// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation document model
//!
//! A document is a YAML file whose root mapping has a single key, the
//! locale token, holding the namespace's nested translation tree.
//! Mappings become [`Node::Branch`]; every other value is kept verbatim as a
//! [`Node::Leaf`] so a rewritten file carries the same scalars it was read
//! with.
//!
//! This is the *resolved* parse: a mapping that repeats a key keeps the last
//! value, as ordinary YAML loaders do. The duplicate-preserving parse lives
//! in [`raw`].

pub mod raw;

use crate::error::LocaleError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Insertion-ordered mapping from key to child node.
pub type Tree = IndexMap<String, Node>;

/// One value in a translation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Any non-mapping value: usually a string, sometimes a number, boolean,
    /// null or sequence.
    Leaf(serde_yaml::Value),
    /// A nested mapping.
    Branch(Tree),
}

impl Node {
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(serde_yaml::Value::String(text.into()))
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

}

impl From<Node> for serde_yaml::Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Leaf(value) => value,
            Node::Branch(tree) => serde_yaml::Value::Mapping(
                tree.into_iter()
                    .map(|(key, child)| (serde_yaml::Value::String(key), child.into()))
                    .collect(),
            ),
        }
    }
}

/// Mapping key normalized to its string form (`1:` and `"1":` collide).
pub(crate) struct ScalarKey(pub(crate) String);

impl<'de> Deserialize<'de> for ScalarKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = ScalarKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar mapping key")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ScalarKey, E> {
                Err(E::invalid_type(Unexpected::Unit, &self))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a translation value or a mapping of translation values")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Number(v.into())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Number(v.into())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Number(v.into())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::leaf(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Leaf(serde_yaml::Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::new();
        // Items go through `Node` so a repeated key inside one resolves like
        // any other mapping instead of failing the parse.
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item.into());
        }
        Ok(Node::Leaf(serde_yaml::Value::Sequence(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut tree = Tree::new();
        while let Some(ScalarKey(key)) = map.next_key()? {
            let value: Node = map.next_value()?;
            // Later declarations win and keep the first declaration's slot.
            tree.insert(key, value);
        }
        Ok(Node::Branch(tree))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) => value.serialize(serializer),
            Node::Branch(tree) => tree.serialize(serializer),
        }
    }
}

/// True when the text holds nothing but blank lines and comments.
pub(crate) fn is_blank_yaml(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Parse a bare YAML mapping into a tree.
pub fn parse_tree(text: &str) -> Result<Tree> {
    if is_blank_yaml(text) {
        return Ok(Tree::new());
    }
    let node: Node = serde_yaml::from_str(text)?;
    match node {
        Node::Branch(tree) => Ok(tree),
        Node::Leaf(serde_yaml::Value::Null) => Ok(Tree::new()),
        Node::Leaf(_) => Err(LocaleError::InvalidDocument(
            "the document root is not a mapping".to_string(),
        )
        .into()),
    }
}

/// A parsed translation file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Tree,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        let mut root = parse_tree(text)?;
        // `de:` with nothing under it is an empty translation, not a string.
        for value in root.values_mut() {
            if matches!(value, Node::Leaf(serde_yaml::Value::Null)) {
                *value = Node::Branch(Tree::new());
            }
        }
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading translation file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing translation file {}", path.display()))
    }

    pub fn root(&self) -> &Tree {
        &self.root
    }

    pub fn root_keys(&self) -> Vec<&str> {
        self.root.keys().map(String::as_str).collect()
    }

    /// First root entry, provided its value is a mapping.
    pub fn single_root(&self) -> Option<(&str, &Tree)> {
        let (locale, node) = self.root.first()?;
        node.as_tree().map(|tree| (locale.as_str(), tree))
    }

    pub fn locale_tree(&self, locale: &str) -> Option<&Tree> {
        self.root.get(locale).and_then(Node::as_tree)
    }

    /// Serialize `tree` under `locale`, preceded by `header`.
    pub fn render(locale: &str, tree: &Tree, header: &str) -> Result<String> {
        let body = serde_yaml::to_string(&SingleRoot { locale, tree })
            .context("serializing translation tree")?;
        let header = header.trim_end();
        if header.is_empty() {
            return Ok(body);
        }
        Ok(format!("{}\n\n{}", header, body))
    }
}

struct SingleRoot<'a> {
    locale: &'a str,
    tree: &'a Tree,
}

impl Serialize for SingleRoot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.locale, self.tree)?;
        map.end()
    }
}
