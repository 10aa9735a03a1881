// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported reports

use crate::report::sarif;
use crate::types::ValidationReport;
use anyhow::Result;
use clap::ValueEnum;
use serde_json;
use serde_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Json,
    Yaml,
    Sarif,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            "sarif" => Some(ReportOutputFormat::Sarif),
            _ => None,
        }
    }

    /// Pick a format from a file extension, defaulting to JSON.
    pub fn for_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(ReportOutputFormat::Json)
    }

    pub fn serialize(&self, report: &ValidationReport) -> Result<String> {
        match self {
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            ReportOutputFormat::Sarif => sarif::to_sarif_json(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ReportOutputFormat::for_path(Path::new("out/report.yml")),
            ReportOutputFormat::Yaml
        );
        assert_eq!(
            ReportOutputFormat::for_path(Path::new("report.sarif")),
            ReportOutputFormat::Sarif
        );
        assert_eq!(
            ReportOutputFormat::for_path(Path::new("report")),
            ReportOutputFormat::Json
        );
    }

    #[test]
    fn test_yaml_export_parses_back() {
        let report = ValidationReport::new(vec!["config/locales".into()], 0, vec![]);
        let yaml = ReportOutputFormat::Yaml.serialize(&report).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed["namespaces"], serde_yaml::Value::Number(0.into()));
    }
}
