// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for locale-warden
//!
//! Findings are grouped per check category, check outcomes per
//! (namespace, locale) pair, and pairs per validation run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The families of checks run against every document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckCategory {
    /// The file could not be read or parsed at all
    Parse,
    /// A mapping declares the same key more than once
    DuplicateKeys,
    /// The root key does not match the locale in the file name
    RootLocale,
    /// A namespace-mandated top-level section is absent
    RequiredSections,
    /// A pluralization node is incomplete or mixes in ordinary keys
    Pluralization,
    /// The translation carries stable keys the source lacks
    KeyEquivalence,
    /// The translation lacks stable keys the source has
    MissingKeys,
}

impl CheckCategory {
    pub fn all() -> Vec<CheckCategory> {
        vec![
            CheckCategory::Parse,
            CheckCategory::DuplicateKeys,
            CheckCategory::RootLocale,
            CheckCategory::RequiredSections,
            CheckCategory::Pluralization,
            CheckCategory::KeyEquivalence,
            CheckCategory::MissingKeys,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::Parse => "parse",
            CheckCategory::DuplicateKeys => "duplicate-keys",
            CheckCategory::RootLocale => "root-locale",
            CheckCategory::RequiredSections => "required-sections",
            CheckCategory::Pluralization => "pluralization",
            CheckCategory::KeyEquivalence => "key-equivalence",
            CheckCategory::MissingKeys => "missing-keys",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckCategory::Parse => "document is readable YAML with a mapping at its root",
            CheckCategory::DuplicateKeys => "no mapping declares the same key twice",
            CheckCategory::RootLocale => "the only root key is the locale from the file name",
            CheckCategory::RequiredSections => "namespace-mandated sections are present",
            CheckCategory::Pluralization => "pluralization nodes carry the expected forms",
            CheckCategory::KeyEquivalence => "no stable keys beyond those of the source document",
            CheckCategory::MissingKeys => "every stable key of the source document is translated",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a finding weighs on the pass/fail outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: CheckCategory,
    pub severity: Severity,
    pub message: String,
    /// Dotted key path the finding is about, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Finding {
    pub fn error(category: CheckCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Error,
            message: message.into(),
            key: None,
        }
    }

    pub fn warning(category: CheckCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            message: message.into(),
            key: None,
        }
    }

    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Result of one check category against one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub category: CheckCategory,
    pub passed: bool,
    pub findings: Vec<Finding>,
    /// Set when the check was deliberately not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl CheckOutcome {
    /// Build an outcome; it passes unless a finding has error severity.
    pub fn from_findings(category: CheckCategory, findings: Vec<Finding>) -> Self {
        let passed = !findings.iter().any(|f| f.severity == Severity::Error);
        Self {
            category,
            passed,
            findings,
            skipped: None,
        }
    }

    pub fn skipped(category: CheckCategory, reason: impl Into<String>) -> Self {
        Self {
            category,
            passed: true,
            findings: Vec::new(),
            skipped: Some(reason.into()),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Which side of the comparison a document sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    Source,
    Candidate,
}

/// All check outcomes for one (namespace, locale) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResult {
    pub namespace: String,
    pub locale: String,
    pub path: PathBuf,
    pub role: DocumentRole,
    pub checks: Vec<CheckOutcome>,
}

impl PairResult {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn outcome(&self, category: CheckCategory) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.category == category)
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.checks.iter().flat_map(|c| c.findings.iter())
    }
}

/// Aggregate of a validation run across every configured root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub created_at: String,
    pub roots: Vec<PathBuf>,
    pub namespaces: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub pairs: Vec<PairResult>,
}

impl ValidationReport {
    pub fn new(roots: Vec<PathBuf>, namespaces: usize, pairs: Vec<PairResult>) -> Self {
        let count = |severity: Severity| -> usize {
            pairs
                .iter()
                .flat_map(|p| p.checks.iter())
                .map(|c| c.count(severity))
                .sum()
        };
        let total_errors = count(Severity::Error);
        let total_warnings = count(Severity::Warning);
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            roots,
            namespaces,
            total_errors,
            total_warnings,
            pairs,
        }
    }

    pub fn passed(&self) -> bool {
        self.pairs.iter().all(PairResult::passed)
    }

    pub fn failed_pairs(&self) -> impl Iterator<Item = &PairResult> {
        self.pairs.iter().filter(|p| !p.passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_passes_with_only_warnings() {
        let outcome = CheckOutcome::from_findings(
            CheckCategory::MissingKeys,
            vec![Finding::warning(CheckCategory::MissingKeys, "missing").at_key("a.b")],
        );
        assert!(outcome.passed);
        assert_eq!(outcome.count(Severity::Warning), 1);
        assert_eq!(outcome.count(Severity::Error), 0);
    }

    #[test]
    fn test_report_totals() {
        let pair = PairResult {
            namespace: "config/locales/server".into(),
            locale: "de".into(),
            path: "config/locales/server.de.yml".into(),
            role: DocumentRole::Candidate,
            checks: vec![
                CheckOutcome::from_findings(
                    CheckCategory::KeyEquivalence,
                    vec![Finding::error(CheckCategory::KeyEquivalence, "extra").at_key("x")],
                ),
                CheckOutcome::skipped(CheckCategory::MissingKeys, "not applicable"),
            ],
        };
        let report = ValidationReport::new(vec![], 1, vec![pair]);
        assert_eq!(report.total_errors, 1);
        assert_eq!(report.total_warnings, 0);
        assert!(!report.passed());
        assert_eq!(report.failed_pairs().count(), 1);
    }

    #[test]
    fn test_category_names_are_kebab_case() {
        let json = serde_json::to_string(&CheckCategory::DuplicateKeys).unwrap();
        assert_eq!(json, "\"duplicate-keys\"");
        for category in CheckCategory::all() {
            assert_eq!(
                serde_json::to_string(&category).unwrap(),
                format!("\"{}\"", category.as_str())
            );
        }
    }
}
