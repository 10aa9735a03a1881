// SPDX-License-Identifier: PMPL-1.0-or-later

//! Hierarchical flattener

use crate::document::{Node, Tree};
use std::collections::BTreeMap;

/// Join a parent path and a key; the empty parent is the root.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Map every leaf's dotted key path to its value.
///
/// Empty nested mappings contribute nothing.
pub fn flatten(tree: &Tree) -> BTreeMap<String, &serde_yaml::Value> {
    let mut flat = BTreeMap::new();
    collect(tree, "", &mut flat);
    flat
}

fn collect<'a>(tree: &'a Tree, parent: &str, flat: &mut BTreeMap<String, &'a serde_yaml::Value>) {
    for (key, node) in tree {
        let path = join_path(parent, key);
        match node {
            Node::Branch(child) => collect(child, &path, flat),
            Node::Leaf(value) => {
                flat.insert(path, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_tree;

    #[test]
    fn test_flatten_nested_paths() {
        let tree = parse_tree("a:\n  b: x\n  c:\n    d: y\ne: z\n").unwrap();
        let flat = flatten(&tree);
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a.b", "a.c.d", "e"]);
        assert_eq!(flat["a.c.d"], &serde_yaml::Value::String("y".into()));
    }

    #[test]
    fn test_flatten_empty_inputs() {
        assert!(flatten(&Tree::new()).is_empty());
        let tree = parse_tree("a: {}\nb:\n  c: {}\n").unwrap();
        assert!(flatten(&tree).is_empty());
    }

    #[test]
    fn test_sequences_are_leaves() {
        let tree = parse_tree("days: [Mon, Tue]\n").unwrap();
        let flat = flatten(&tree);
        assert_eq!(flat.len(), 1);
        assert!(flat["days"].is_sequence());
    }

    #[test]
    fn test_join_path_root() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a.b", "c"), "a.b.c");
    }
}
