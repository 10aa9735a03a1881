// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pluralization locator
//!
//! A pluralization node is a mapping with at least one child named after a
//! plural form (`zero one two few many other`). Which forms a locale needs
//! depends on its grammar, so these nodes are compared as opaque units.

use crate::document::{Node, Tree};
use crate::keys::flatten::join_path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized plural form names, in canonical order.
pub const PLURALIZATION_KEYS: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralForm {
    pub fn all() -> &'static [PluralForm] {
        &[
            PluralForm::Zero,
            PluralForm::One,
            PluralForm::Two,
            PluralForm::Few,
            PluralForm::Many,
            PluralForm::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralForm::Zero => "zero",
            PluralForm::One => "one",
            PluralForm::Two => "two",
            PluralForm::Few => "few",
            PluralForm::Many => "many",
            PluralForm::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "zero" => Some(PluralForm::Zero),
            "one" => Some(PluralForm::One),
            "two" => Some(PluralForm::Two),
            "few" => Some(PluralForm::Few),
            "many" => Some(PluralForm::Many),
            "other" => Some(PluralForm::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_plural_key(key: &str) -> bool {
    PLURALIZATION_KEYS.contains(&key)
}

/// Every pluralization node, keyed by its dotted path.
///
/// A plural-named child only marks its parent when it is itself a leaf;
/// nested mappings are always descended into, including those below a node
/// that was already recorded. A pluralization node at the root is recorded
/// under the empty path.
pub fn find_pluralizations(tree: &Tree) -> IndexMap<String, &Tree> {
    let mut found = IndexMap::new();
    collect(tree, "", &mut found);
    found
}

fn collect<'a>(tree: &'a Tree, parent: &str, found: &mut IndexMap<String, &'a Tree>) {
    for (key, node) in tree {
        match node {
            Node::Branch(child) => collect(child, &join_path(parent, key), found),
            Node::Leaf(_) if is_plural_key(key) => {
                found.insert(parent.to_string(), tree);
            }
            Node::Leaf(_) => {}
        }
    }
}

/// Children of a pluralization node that are not plural forms.
pub fn stray_keys(node: &Tree) -> Vec<&str> {
    node.keys()
        .map(String::as_str)
        .filter(|key| !is_plural_key(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_tree;

    #[test]
    fn test_finds_nested_pluralizations() {
        let tree = parse_tree(
            "greeting: hi\ncount:\n  one: 1 item\n  other: '%{count} items'\njs:\n  topics:\n    few: a few\n    other: many\n",
        )
        .unwrap();
        let found = find_pluralizations(&tree);
        let paths: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["count", "js.topics"]);
        assert_eq!(found["count"].len(), 2);
    }

    #[test]
    fn test_root_pluralization_uses_empty_path() {
        let tree = parse_tree("one: 1\nother: n\n").unwrap();
        let found = find_pluralizations(&tree);
        assert_eq!(found.keys().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_plural_named_branch_is_descended() {
        let tree = parse_tree("other:\n  nested:\n    one: a\n    other: b\n").unwrap();
        let found = find_pluralizations(&tree);
        assert_eq!(found.keys().collect::<Vec<_>>(), vec!["other.nested"]);
    }

    #[test]
    fn test_stray_keys_in_mixed_node() {
        let tree = parse_tree("one: a\nother: b\ntitle: c\n").unwrap();
        assert_eq!(stray_keys(&tree), vec!["title"]);
    }

    #[test]
    fn test_form_round_trip() {
        for form in PluralForm::all() {
            assert_eq!(PluralForm::parse(form.as_str()), Some(*form));
            assert!(is_plural_key(form.as_str()));
        }
        assert_eq!(PluralForm::parse("several"), None);
    }
}
