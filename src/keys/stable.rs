// SPDX-License-Identifier: PMPL-1.0-or-later

//! Key-set reconciliation
//!
//! Stable keys are the flattened key paths that do not sit inside a
//! pluralization node. Locales legitimately differ in their plural forms,
//! so only stable keys are compared across locales.

use crate::document::Tree;
use crate::keys::flatten::{flatten, join_path};
use crate::keys::plural::{find_pluralizations, PluralForm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Flattened key paths minus those inside pluralization nodes.
pub fn stable_keys(tree: &Tree) -> BTreeSet<String> {
    let mut keys: BTreeSet<String> = flatten(tree).into_keys().collect();
    for (parent, node) in find_pluralizations(tree) {
        for inner in flatten(node).keys() {
            keys.remove(&join_path(&parent, inner));
        }
    }
    keys
}

/// Stable-key differences between a translation and its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDrift {
    /// In the translation, absent from the source
    pub extra: Vec<String>,
    /// In the source, absent from the translation
    pub missing: Vec<String>,
}

impl KeyDrift {
    pub fn between(source: &BTreeSet<String>, candidate: &BTreeSet<String>) -> Self {
        Self {
            extra: candidate.difference(source).cloned().collect(),
            missing: source.difference(candidate).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extra.is_empty() && self.missing.is_empty()
    }
}

pub fn reconcile(source: &Tree, candidate: &Tree) -> KeyDrift {
    KeyDrift::between(&stable_keys(source), &stable_keys(candidate))
}

/// A pluralization node whose keys differ from the required forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralGap {
    pub path: String,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

/// Pluralization nodes whose key set is not exactly `required`.
///
/// Nodes whose path contains any of `exemptions` are skipped.
pub fn check_completeness(
    tree: &Tree,
    required: &[PluralForm],
    exemptions: &[String],
) -> Vec<PluralGap> {
    let required: BTreeSet<&str> = required.iter().map(PluralForm::as_str).collect();
    let mut gaps = Vec::new();

    for (path, node) in find_pluralizations(tree) {
        if exemptions.iter().any(|exempt| path.contains(exempt.as_str())) {
            continue;
        }
        let present: BTreeSet<&str> = node.keys().map(String::as_str).collect();
        if present == required {
            continue;
        }
        gaps.push(PluralGap {
            missing: required
                .difference(&present)
                .map(|k| k.to_string())
                .collect(),
            unexpected: present
                .difference(&required)
                .map(|k| k.to_string())
                .collect(),
            path,
        });
    }

    gaps
}
