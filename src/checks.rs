// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-document checks
//!
//! Each function inspects one document (or one document against its source)
//! and returns a [`CheckOutcome`] holding every offense it found. None of
//! them stop at the first problem.

use crate::document::raw::RawNode;
use crate::document::{Document, Tree};
use crate::duplicates::find_duplicates;
use crate::keys::plural::{find_pluralizations, stray_keys, PluralForm};
use crate::keys::stable::{check_completeness, stable_keys, KeyDrift};
use crate::types::{CheckCategory, CheckOutcome, Finding, Severity};
use std::collections::BTreeSet;

pub fn parse_failure(message: impl Into<String>) -> CheckOutcome {
    CheckOutcome::from_findings(
        CheckCategory::Parse,
        vec![Finding::error(CheckCategory::Parse, message)],
    )
}

pub fn duplicate_keys(raw: &RawNode) -> CheckOutcome {
    let findings = find_duplicates(raw)
        .into_iter()
        .map(|dup| {
            let scope = dup.scope.clone();
            Finding::error(
                CheckCategory::DuplicateKeys,
                format!("duplicate keys in {}", dup),
            )
            .at_key(scope)
        })
        .collect();
    CheckOutcome::from_findings(CheckCategory::DuplicateKeys, findings)
}

/// The document's only root key must be `locale`.
pub fn root_locale(document: &Document, locale: &str) -> CheckOutcome {
    let keys = document.root_keys();
    let findings = if keys == [locale] {
        Vec::new()
    } else if keys.is_empty() {
        vec![Finding::error(
            CheckCategory::RootLocale,
            format!("document is empty; expected a single `{}` root", locale),
        )]
    } else {
        vec![Finding::error(
            CheckCategory::RootLocale,
            format!(
                "root keys are [{}]; expected only `{}`",
                keys.join(", "),
                locale
            ),
        )]
    };
    CheckOutcome::from_findings(CheckCategory::RootLocale, findings)
}

pub fn required_sections(tree: Option<&Tree>, sections: &[String]) -> CheckOutcome {
    if sections.is_empty() {
        return CheckOutcome::skipped(
            CheckCategory::RequiredSections,
            "no sections required for this namespace",
        );
    }
    let findings = sections
        .iter()
        .filter(|section| tree.map_or(true, |t| !t.contains_key(section.as_str())))
        .map(|section| {
            Finding::error(
                CheckCategory::RequiredSections,
                format!("required section `{}` is missing", section),
            )
            .at_key(section.clone())
        })
        .collect();
    CheckOutcome::from_findings(CheckCategory::RequiredSections, findings)
}

/// Source documents: every pluralization node carries exactly `forms`.
pub fn source_pluralization(
    tree: &Tree,
    forms: &[PluralForm],
    exemptions: &[String],
) -> CheckOutcome {
    let expected: Vec<&str> = forms.iter().map(PluralForm::as_str).collect();
    let findings = check_completeness(tree, forms, exemptions)
        .into_iter()
        .map(|gap| {
            let mut problems = Vec::new();
            if !gap.missing.is_empty() {
                problems.push(format!("missing {}", gap.missing.join(", ")));
            }
            if !gap.unexpected.is_empty() {
                problems.push(format!("unexpected {}", gap.unexpected.join(", ")));
            }
            Finding::error(
                CheckCategory::Pluralization,
                format!(
                    "pluralization must have exactly [{}]: {}",
                    expected.join(", "),
                    problems.join("; ")
                ),
            )
            .at_key(display_path(&gap.path))
        })
        .collect();
    CheckOutcome::from_findings(CheckCategory::Pluralization, findings)
}

/// Translations: plural forms may vary, but a pluralization node must not
/// also carry ordinary keys.
pub fn candidate_pluralization(tree: &Tree) -> CheckOutcome {
    let findings = find_pluralizations(tree)
        .into_iter()
        .filter_map(|(path, node)| {
            let strays = stray_keys(node);
            if strays.is_empty() {
                return None;
            }
            Some(
                Finding::warning(
                    CheckCategory::Pluralization,
                    format!(
                        "pluralization node also carries non-plural keys: {}",
                        strays.join(", ")
                    ),
                )
                .at_key(display_path(&path)),
            )
        })
        .collect();
    CheckOutcome::from_findings(CheckCategory::Pluralization, findings)
}

/// Extra stable keys (always errors) and missing ones (warnings unless
/// `missing_is_error`).
pub fn key_equivalence(
    source_keys: &BTreeSet<String>,
    candidate: &Tree,
    missing_is_error: bool,
) -> (CheckOutcome, CheckOutcome) {
    let drift = KeyDrift::between(source_keys, &stable_keys(candidate));

    let extra = drift
        .extra
        .into_iter()
        .map(|key| {
            Finding::error(
                CheckCategory::KeyEquivalence,
                "key is not present in the source document",
            )
            .at_key(key)
        })
        .collect();

    let severity = if missing_is_error {
        Severity::Error
    } else {
        Severity::Warning
    };
    let missing = drift
        .missing
        .into_iter()
        .map(|key| Finding {
            category: CheckCategory::MissingKeys,
            severity,
            message: "key is not translated".to_string(),
            key: Some(key),
        })
        .collect();

    (
        CheckOutcome::from_findings(CheckCategory::KeyEquivalence, extra),
        CheckOutcome::from_findings(CheckCategory::MissingKeys, missing),
    )
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_tree;

    #[test]
    fn test_root_locale_mismatch() {
        let doc = Document::parse("de:\n  a: b\n").unwrap();
        assert!(root_locale(&doc, "de").passed);
        let outcome = root_locale(&doc, "fr");
        assert!(!outcome.passed);
        assert!(outcome.findings[0].message.contains("[de]"));

        let doc = Document::parse("de:\n  a: b\nfr:\n  a: c\n").unwrap();
        assert!(!root_locale(&doc, "de").passed);
    }

    #[test]
    fn test_required_sections() {
        let tree = parse_tree("js:\n  a: b\n").unwrap();
        let sections = vec!["js".to_string(), "admin_js".to_string()];
        let outcome = required_sections(Some(&tree), &sections);
        assert!(!outcome.passed);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].key.as_deref(), Some("admin_js"));
        assert_eq!(required_sections(None, &sections).findings.len(), 2);
        assert!(required_sections(Some(&tree), &[]).skipped.is_some());
    }

    #[test]
    fn test_source_pluralization_message() {
        let tree = parse_tree("topics:\n  other: many\n").unwrap();
        let outcome =
            source_pluralization(&tree, &[PluralForm::One, PluralForm::Other], &[]);
        assert!(!outcome.passed);
        assert_eq!(outcome.findings[0].key.as_deref(), Some("topics"));
        assert!(outcome.findings[0].message.contains("missing one"));
    }

    #[test]
    fn test_candidate_mixed_node_is_warning() {
        let tree = parse_tree("topics:\n  one: a\n  other: b\n  title: c\n").unwrap();
        let outcome = candidate_pluralization(&tree);
        assert!(outcome.passed);
        assert_eq!(outcome.count(Severity::Warning), 1);
    }

    #[test]
    fn test_key_equivalence_split() {
        let source = stable_keys(&parse_tree("a: x\nb: y\n").unwrap());
        let candidate = parse_tree("a: x\nc: z\n").unwrap();
        let (extra, missing) = key_equivalence(&source, &candidate, false);
        assert!(!extra.passed);
        assert_eq!(extra.findings[0].key.as_deref(), Some("c"));
        assert!(missing.passed);
        assert_eq!(missing.findings[0].key.as_deref(), Some("b"));

        let (_, missing) = key_equivalence(&source, &candidate, true);
        assert!(!missing.passed);
    }

    #[test]
    fn test_duplicate_keys_outcome() {
        let raw = RawNode::parse("en:\n  a: 1\n  a: 2\n").unwrap();
        let outcome = duplicate_keys(&raw);
        assert!(!outcome.passed);
        assert_eq!(outcome.findings[0].key.as_deref(), Some("en"));
    }
}
