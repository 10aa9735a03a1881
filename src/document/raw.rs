// SPDX-License-Identifier: PMPL-1.0-or-later

//! Structural parse that keeps every mapping entry
//!
//! Resolving a YAML mapping into a key/value map silently drops the earlier
//! of two identical keys. [`RawNode`] instead records the mapping as the
//! ordered sequence of (key, value) events the parser produced, so repeated
//! keys survive for the duplicate detector.

use super::{is_blank_yaml, ScalarKey};
use anyhow::Result;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Scalar(String),
    Sequence(Vec<RawNode>),
    /// Entries in declaration order, repeats included.
    Mapping(Vec<(String, RawNode)>),
}

impl RawNode {
    pub fn parse(text: &str) -> Result<Self> {
        if is_blank_yaml(text) {
            return Ok(RawNode::Mapping(Vec::new()));
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn entries(&self) -> &[(String, RawNode)] {
        match self {
            RawNode::Mapping(entries) => entries,
            _ => &[],
        }
    }
}

struct RawVisitor;

impl<'de> Visitor<'de> for RawVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML node")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawNode, E> {
        Ok(RawNode::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Scalar("~".to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawNode, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RawNode, D::Error> {
        RawNode::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawNode::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawNode, A::Error> {
        let mut entries = Vec::new();
        while let Some(ScalarKey(key)) = map.next_key()? {
            let value: RawNode = map.next_value()?;
            entries.push((key, value));
        }
        Ok(RawNode::Mapping(entries))
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_are_kept() {
        let raw = RawNode::parse("en:\n  a: 1\n  a: 2\n").unwrap();
        let (root_key, inner) = &raw.entries()[0];
        assert_eq!(root_key, "en");
        let keys: Vec<&str> = inner.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "a"]);
    }

    #[test]
    fn test_sequences_and_scalars() {
        let raw = RawNode::parse("days: [Mon, Tue]\nflag: true\nempty:\n").unwrap();
        assert_eq!(
            raw.entries()[0].1,
            RawNode::Sequence(vec![
                RawNode::Scalar("Mon".into()),
                RawNode::Scalar("Tue".into())
            ])
        );
        assert_eq!(raw.entries()[1].1, RawNode::Scalar("true".into()));
        assert_eq!(raw.entries()[2].1, RawNode::Scalar("~".into()));
    }

    #[test]
    fn test_blank_text_is_empty_mapping() {
        assert_eq!(RawNode::parse("").unwrap(), RawNode::Mapping(vec![]));
    }
}
