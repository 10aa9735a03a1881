// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fix-up pass
//!
//! Rebuilds each translation file from the source skeleton: translated
//! values are imported by [`deep_localize`], keys the source does not know
//! are dropped, and the file is rewritten under the provenance header.
//! A file that cannot be read or parsed is recorded in
//! [`LocalizeSummary::failed`] and the pass moves on.

use crate::config::Config;
use crate::document::{Document, Tree};
use crate::driver::{discover, Namespace};
use crate::merge::deep_localize;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LocalizeOptions {
    /// Locales to rewrite; empty means every translation found
    pub languages: Vec<String>,
    /// Compute the merged documents without writing them
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizeSummary {
    pub rewritten: Vec<PathBuf>,
    /// Files whose content would not change
    pub unchanged: Vec<PathBuf>,
    /// Files left untouched because they could not be read or parsed
    pub failed: Vec<PathBuf>,
}

impl LocalizeSummary {
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Merge a translation into a copy of the source tree.
pub fn localize_tree(source: &Tree, translated: &Tree) -> Tree {
    deep_localize(source.clone(), translated)
}

pub fn localize(config: &Config, options: &LocalizeOptions) -> Result<LocalizeSummary> {
    let mut summary = LocalizeSummary::default();
    for namespace in discover(config)? {
        localize_namespace(&namespace, config, options, &mut summary)?;
    }
    tracing::info!(
        rewritten = summary.rewritten.len(),
        unchanged = summary.unchanged.len(),
        failed = summary.failed.len(),
        "localize finished"
    );
    Ok(summary)
}

pub fn localize_namespace(
    namespace: &Namespace,
    config: &Config,
    options: &LocalizeOptions,
    summary: &mut LocalizeSummary,
) -> Result<()> {
    let source_doc = match Document::load(&namespace.source_path) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(
                path = %namespace.source_path.display(),
                error = %format!("{:#}", err),
                "source unreadable, skipping namespace"
            );
            summary.failed.push(namespace.source_path.clone());
            return Ok(());
        }
    };
    let Some((_, source)) = source_doc.single_root() else {
        tracing::warn!(
            path = %namespace.source_path.display(),
            "source has no translation tree under its root, skipping namespace"
        );
        summary.failed.push(namespace.source_path.clone());
        return Ok(());
    };

    let targets: Vec<(String, PathBuf)> = if options.languages.is_empty() {
        namespace.candidates(&config.source_locale)?
    } else {
        options
            .languages
            .iter()
            .filter(|lang| **lang != config.source_locale)
            .map(|lang| (lang.clone(), namespace.locale_path(lang)))
            .collect()
    };

    for (locale, path) in targets {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no translation file, nothing to do");
            continue;
        }
        let (existing, translated_doc) = match read_translation(&path) {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{:#}", err),
                    "translation unreadable, leaving it as is"
                );
                summary.failed.push(path);
                continue;
            }
        };
        let empty = Tree::new();
        let translated = translated_doc
            .single_root()
            .map(|(_, tree)| tree)
            .unwrap_or(&empty);

        let fixed = localize_tree(source, translated);
        let rendered = Document::render(&locale, &fixed, &config.provenance_header)?;
        if rendered == existing {
            summary.unchanged.push(path);
            continue;
        }
        if !options.dry_run {
            fs::write(&path, rendered)
                .with_context(|| format!("writing translation file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "rewrote translation file");
        }
        summary.rewritten.push(path);
    }

    Ok(())
}

fn read_translation(path: &Path) -> Result<(String, Document)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading translation file {}", path.display()))?;
    let document = Document::parse(&text)
        .with_context(|| format!("parsing translation file {}", path.display()))?;
    Ok((text, document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_tree;

    #[test]
    fn test_localize_tree_leaves_source_alone() {
        let source = parse_tree("a: hello\nb: bye\n").unwrap();
        let translated = parse_tree("a: hallo\nz: extra\n").unwrap();
        let fixed = localize_tree(&source, &translated);
        assert_eq!(fixed, parse_tree("a: hallo\nb: bye\n").unwrap());
        assert_eq!(source, parse_tree("a: hello\nb: bye\n").unwrap());
    }
}
