// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report output: terminal summary, serialized exports, SARIF

pub mod formatter;
pub mod output;
pub mod sarif;

use crate::types::ValidationReport;
use anyhow::Result;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

/// Save report to file in the given format
pub fn save_report<P: AsRef<Path>>(
    report: &ValidationReport,
    path: P,
    format: ReportOutputFormat,
) -> Result<()> {
    let formatter = ReportFormatter::new();
    formatter.save(report, path, format)
}

/// Print report to console
pub fn print_report(report: &ValidationReport, verbose: bool) {
    let formatter = ReportFormatter::new().verbose(verbose);
    formatter.print(report);
}
