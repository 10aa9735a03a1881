// SPDX-License-Identifier: PMPL-1.0-or-later

//! SARIF 2.1.0 output for code-scanning integrations
//!
//! Converts validation findings into OASIS SARIF format. Findings point at
//! the translation file; the offending key path goes into a logical
//! location since YAML positions are not tracked.
//! See: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::types::{CheckCategory, Severity, ValidationReport};
use anyhow::Result;
use serde::Serialize;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Top-level SARIF log
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

/// A single SARIF run (one tool execution)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifTool {
    pub driver: SarifToolComponent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifToolComponent {
    pub name: String,
    pub version: String,
    pub information_uri: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    pub short_description: SarifMessage,
}

/// A single finding
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifArtifactLocation {
    pub uri: String,
}

/// Dotted key path inside the document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLogicalLocation {
    pub fully_qualified_name: String,
}

/// Map a check category to a stable rule ID
fn rule_id(category: CheckCategory) -> &'static str {
    match category {
        CheckCategory::Parse => "LW001",
        CheckCategory::DuplicateKeys => "LW002",
        CheckCategory::RootLocale => "LW003",
        CheckCategory::RequiredSections => "LW004",
        CheckCategory::Pluralization => "LW005",
        CheckCategory::KeyEquivalence => "LW006",
        CheckCategory::MissingKeys => "LW007",
    }
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

/// Convert a ValidationReport to a SARIF log
pub fn to_sarif(report: &ValidationReport) -> Result<SarifLog> {
    let mut categories: Vec<CheckCategory> = report
        .pairs
        .iter()
        .flat_map(|p| p.findings())
        .map(|f| f.category)
        .collect();
    categories.sort();
    categories.dedup();

    let rules = categories
        .into_iter()
        .map(|category| SarifRule {
            id: rule_id(category).to_string(),
            name: category.as_str().to_string(),
            short_description: SarifMessage {
                text: category.description().to_string(),
            },
        })
        .collect();

    let mut results = Vec::new();
    for pair in &report.pairs {
        let uri = pair.path.to_string_lossy().replace('\\', "/");
        for finding in pair.findings() {
            results.push(SarifResult {
                rule_id: rule_id(finding.category).to_string(),
                level: sarif_level(finding.severity).to_string(),
                message: SarifMessage {
                    text: finding.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation { uri: uri.clone() },
                    },
                    logical_locations: finding
                        .key
                        .iter()
                        .map(|key| SarifLogicalLocation {
                            fully_qualified_name: key.clone(),
                        })
                        .collect(),
                }],
            });
        }
    }

    Ok(SarifLog {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifToolComponent {
                    name: "locale-warden".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/locale-warden".to_string(),
                    rules,
                },
            },
            results,
        }],
    })
}

/// Serialize a SARIF log to JSON string
pub fn to_sarif_json(report: &ValidationReport) -> Result<String> {
    let log = to_sarif(report)?;
    let json = serde_json::to_string_pretty(&log)?;
    Ok(json)
}
