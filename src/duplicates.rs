// SPDX-License-Identifier: PMPL-1.0-or-later

//! Duplicate-key detection
//!
//! Runs over [`RawNode`], which keeps every mapping entry as declared. A
//! resolved mapping would already have merged the repeats away.

use crate::document::raw::RawNode;
use crate::keys::flatten::join_path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A key declared more than once in one mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateKey {
    pub key: String,
    pub occurrences: usize,
}

/// All repeated keys of one mapping scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFinding {
    /// Dotted path of the mapping; empty for the document root
    pub scope: String,
    pub keys: Vec<DuplicateKey>,
}

impl DuplicateFinding {
    pub fn scope_label(&self) -> &str {
        if self.scope.is_empty() {
            "(root)"
        } else {
            &self.scope
        }
    }
}

impl fmt::Display for DuplicateFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .keys
            .iter()
            .map(|d| format!("{} (x{})", d.key, d.occurrences))
            .collect();
        write!(f, "{}: {}", self.scope_label(), keys.join(", "))
    }
}

/// One finding per mapping that repeats a key; empty when there are none.
pub fn find_duplicates(node: &RawNode) -> Vec<DuplicateFinding> {
    let mut findings = Vec::new();
    walk(node, "", &mut findings);
    findings
}

fn walk(node: &RawNode, scope: &str, findings: &mut Vec<DuplicateFinding>) {
    match node {
        RawNode::Scalar(_) => {}
        RawNode::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, &format!("{}[{}]", scope, index), findings);
            }
        }
        RawNode::Mapping(entries) => {
            let mut counts: Vec<DuplicateKey> = Vec::new();
            for (key, _) in entries {
                match counts.iter_mut().find(|d| &d.key == key) {
                    Some(seen) => seen.occurrences += 1,
                    None => counts.push(DuplicateKey {
                        key: key.clone(),
                        occurrences: 1,
                    }),
                }
            }
            counts.retain(|d| d.occurrences > 1);
            if !counts.is_empty() {
                findings.push(DuplicateFinding {
                    scope: scope.to_string(),
                    keys: counts,
                });
            }

            for (key, value) in entries {
                walk(value, &join_path(scope, key), findings);
            }
        }
    }
}
