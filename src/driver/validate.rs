// SPDX-License-Identifier: PMPL-1.0-or-later

//! Validation pass
//!
//! Every check runs to completion and every offense is recorded, so one run
//! surfaces all defects across all namespaces.

use crate::checks;
use crate::config::Config;
use crate::document::raw::RawNode;
use crate::document::{Document, Tree};
use crate::driver::{discover, Namespace};
use crate::keys::stable::stable_keys;
use crate::locale::is_transliteration;
use crate::types::{CheckCategory, CheckOutcome, DocumentRole, PairResult, ValidationReport};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A file read and parsed both ways.
struct LoadedDocument {
    raw: RawNode,
    document: Document,
}

fn load(path: &Path) -> Result<LoadedDocument> {
    let text = fs::read_to_string(path).context("cannot read file")?;
    let raw = RawNode::parse(&text).context("invalid YAML")?;
    let document = Document::parse(&text).context("invalid YAML")?;
    tracing::debug!(path = %path.display(), "loaded translation file");
    Ok(LoadedDocument { raw, document })
}

/// Run every check over every discovered namespace.
pub fn validate(config: &Config) -> Result<ValidationReport> {
    let namespaces = discover(config)?;
    let mut pairs = Vec::new();

    for namespace in &namespaces {
        tracing::info!(namespace = %namespace.id(), "validating namespace");
        pairs.extend(validate_namespace(namespace, config)?);
    }

    Ok(ValidationReport::new(
        config.roots.clone(),
        namespaces.len(),
        pairs,
    ))
}

/// The source document's pair first, then one pair per translation.
pub fn validate_namespace(namespace: &Namespace, config: &Config) -> Result<Vec<PairResult>> {
    let source_locale = config.source_locale.as_str();
    let sections = config.sections_for(&namespace.prefix);
    let mut pairs = Vec::new();

    let source = load(&namespace.source_path);
    let source_keys: Option<BTreeSet<String>> = match &source {
        Ok(loaded) => loaded.document.locale_tree(source_locale).map(stable_keys),
        Err(_) => None,
    };

    let source_checks = match &source {
        Err(err) => vec![checks::parse_failure(format!("{:#}", err))],
        Ok(loaded) => {
            let tree = loaded.document.locale_tree(source_locale);
            let mut outcomes = common_checks(loaded, source_locale, tree, sections);
            outcomes.push(checks::source_pluralization(
                tree.unwrap_or(&Tree::new()),
                &config.source_plural_forms,
                &config.plural_exemptions,
            ));
            outcomes
        }
    };
    pairs.push(PairResult {
        namespace: namespace.id(),
        locale: source_locale.to_string(),
        path: namespace.source_path.clone(),
        role: DocumentRole::Source,
        checks: source_checks,
    });

    for (locale, path) in namespace.candidates(source_locale)? {
        let checks = candidate_checks(&path, &locale, source_keys.as_ref(), sections, config);
        pairs.push(PairResult {
            namespace: namespace.id(),
            locale,
            path,
            role: DocumentRole::Candidate,
            checks,
        });
    }

    Ok(pairs)
}

fn common_checks(
    loaded: &LoadedDocument,
    locale: &str,
    tree: Option<&Tree>,
    sections: &[String],
) -> Vec<CheckOutcome> {
    vec![
        checks::duplicate_keys(&loaded.raw),
        checks::root_locale(&loaded.document, locale),
        checks::required_sections(tree, sections),
    ]
}

fn candidate_checks(
    path: &Path,
    locale: &str,
    source_keys: Option<&BTreeSet<String>>,
    sections: &[String],
    config: &Config,
) -> Vec<CheckOutcome> {
    let loaded = match load(path) {
        Ok(loaded) => loaded,
        Err(err) => return vec![checks::parse_failure(format!("{:#}", err))],
    };

    // Without its own locale root the translation has nothing to compare.
    let empty = Tree::new();
    let tree = loaded.document.locale_tree(locale);
    let mut outcomes = common_checks(&loaded, locale, tree, sections);
    let tree = tree.unwrap_or(&empty);
    outcomes.push(checks::candidate_pluralization(tree));

    if is_transliteration(path, &config.transliteration_marker) {
        let reason = "transliteration variant";
        outcomes.push(CheckOutcome::skipped(CheckCategory::KeyEquivalence, reason));
        outcomes.push(CheckOutcome::skipped(CheckCategory::MissingKeys, reason));
        return outcomes;
    }

    match source_keys {
        Some(source_keys) => {
            let (extra, missing) =
                checks::key_equivalence(source_keys, tree, config.fail_on_missing_keys);
            outcomes.push(extra);
            outcomes.push(missing);
        }
        None => {
            let reason = "source document could not be loaded";
            outcomes.push(CheckOutcome::skipped(CheckCategory::KeyEquivalence, reason));
            outcomes.push(CheckOutcome::skipped(CheckCategory::MissingKeys, reason));
        }
    }

    outcomes
}
