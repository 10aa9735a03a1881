// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! Read from `locale-warden.yml` when present; every field falls back to
//! the defaults below, so an empty file (or none at all) is valid.

use crate::keys::plural::PluralForm;
use crate::sync::SyncCommand;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "locale-warden.yml";

/// Written verbatim above every rewritten translation file.
pub const DEFAULT_PROVENANCE_HEADER: &str = "\
# encoding: utf-8
#
# Never edit this file. It will be overwritten when translations are pulled from Transifex.
#
# To work with us on translations, join this project:
# https://www.transifex.com/projects/p/discourse-org/
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories holding translation files
    pub roots: Vec<PathBuf>,
    /// Namespace prefixes to consider; empty means every prefix
    pub prefixes: Vec<String>,
    /// Descend into subdirectories of each root
    pub recursive: bool,
    /// Locale of the authoritative documents
    pub source_locale: String,
    /// Exact plural forms every source pluralization node must carry
    pub source_plural_forms: Vec<PluralForm>,
    /// Pluralization paths (substring match) exempt from the exact-forms rule
    pub plural_exemptions: Vec<String>,
    /// Path fragment marking transliteration variants
    pub transliteration_marker: String,
    /// Sections each namespace prefix must carry under its locale root
    pub required_sections: BTreeMap<String, Vec<String>>,
    /// Treat keys missing from a translation as errors instead of warnings
    pub fail_on_missing_keys: bool,
    pub provenance_header: String,
    pub sync: SyncCommand,
}

impl Default for Config {
    fn default() -> Self {
        let mut required_sections = BTreeMap::new();
        required_sections.insert(
            "client".to_string(),
            vec!["js".to_string(), "admin_js".to_string()],
        );

        Self {
            roots: vec![
                PathBuf::from("config/locales"),
                PathBuf::from("plugins/poll/config/locales"),
                PathBuf::from("vendor/gems/discourse_imgur/lib/discourse_imgur/locale"),
            ],
            prefixes: vec!["server".to_string(), "client".to_string()],
            recursive: false,
            source_locale: "en".to_string(),
            source_plural_forms: vec![PluralForm::One, PluralForm::Other],
            plural_exemptions: vec!["messages.restrict_dependent_destroy".to_string()],
            transliteration_marker: "transliterate".to_string(),
            required_sections,
            fail_on_missing_keys: false,
            provenance_header: DEFAULT_PROVENANCE_HEADER.to_string(),
            sync: SyncCommand::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Root whose `client.*.yml` files define the languages to pull.
    pub fn primary_root(&self) -> Option<&Path> {
        self.roots.first().map(PathBuf::as_path)
    }

    pub fn accepts_prefix(&self, prefix: &str) -> bool {
        self.prefixes.is_empty() || self.prefixes.iter().any(|p| p == prefix)
    }

    pub fn sections_for(&self, prefix: &str) -> &[String] {
        self.required_sections
            .get(prefix)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
