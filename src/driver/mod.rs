// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reconciliation driver
//!
//! Finds namespaces under the configured roots and runs either the
//! validation pass ([`validate`]) or the fix-up pass ([`localize`]) over
//! every (namespace, locale) pair. [`pull`] chains the upstream sync in
//! front of the fix-up pass.

pub mod localize;
pub mod validate;

use crate::config::Config;
use crate::locale::{extract_locale, locale_file_name, namespace_prefix};
use crate::sync::{discover_languages, select_languages, SyncOutcome};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use localize::{localize, LocalizeOptions, LocalizeSummary};
pub use validate::validate;

/// A bundle of translation files sharing a prefix in one directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace {
    pub dir: PathBuf,
    pub prefix: String,
    pub source_path: PathBuf,
}

impl Namespace {
    /// `<dir>/<prefix>`, used as the namespace's name in reports.
    pub fn id(&self) -> String {
        self.dir.join(&self.prefix).display().to_string()
    }

    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.dir.join(locale_file_name(&self.prefix, locale))
    }

    /// Sibling translations `(locale, path)`, sorted by locale.
    pub fn candidates(&self, source_locale: &str) -> Result<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("listing {}", self.dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            let same_prefix = namespace_prefix(&path).as_deref() == Some(self.prefix.as_str());
            if !path.is_file() || !same_prefix {
                continue;
            }
            match extract_locale(&path) {
                Some(locale) if locale == source_locale => {}
                Some(locale) => found.push((locale, path)),
                None => {}
            }
        }
        found.sort();
        Ok(found)
    }
}

/// Every namespace with a source document under the configured roots.
pub fn discover(config: &Config) -> Result<Vec<Namespace>> {
    let mut namespaces = Vec::new();

    for root in &config.roots {
        if !root.is_dir() {
            tracing::warn!(root = %root.display(), "translation root is not a directory, skipping");
            continue;
        }
        let depth = if config.recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(root).max_depth(depth).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yml") {
                continue;
            }
            let (Some(locale), Some(prefix)) = (extract_locale(path), namespace_prefix(path))
            else {
                tracing::warn!(path = %path.display(), "no locale token in file name, skipping");
                continue;
            };
            if locale != config.source_locale || !config.accepts_prefix(&prefix) {
                continue;
            }
            namespaces.push(Namespace {
                dir: path.parent().unwrap_or(Path::new("")).to_path_buf(),
                prefix,
                source_path: path.to_path_buf(),
            });
        }
    }

    namespaces.sort();
    namespaces.dedup();
    tracing::debug!(count = namespaces.len(), "discovered namespaces");
    Ok(namespaces)
}

/// Sync the requested languages from upstream, then localize them.
///
/// A sync failure aborts before any file is touched.
pub fn pull<F>(config: &Config, requested: &[String], sink: F) -> Result<LocalizeSummary>
where
    F: FnMut(&str),
{
    let discovered = match config.primary_root() {
        Some(root) => discover_languages(root)?,
        None => Vec::new(),
    };
    let languages = select_languages(requested, &discovered, &config.source_locale)?;

    match config.sync.run(&languages, sink)? {
        SyncOutcome::Skipped => return Ok(LocalizeSummary::default()),
        SyncOutcome::Completed { languages } => {
            tracing::info!(count = languages.len(), "sync finished, fixing translation files");
        }
    }

    localize(
        config,
        &LocalizeOptions {
            languages,
            dry_run: false,
        },
    )
}
