// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use crate::report::output::ReportOutputFormat;
use crate::types::*;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub struct ReportFormatter {
    verbose: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Also list passing pairs and warning-only findings.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn print(&self, report: &ValidationReport) {
        println!("\n{}", "=== LOCALE-WARDEN VALIDATION REPORT ===".bold().cyan());
        println!();

        self.print_overview(report);
        println!();

        self.print_pairs(report);

        self.print_verdict(report);
        println!();
    }

    fn print_overview(&self, report: &ValidationReport) {
        println!("{}", "OVERVIEW".bold().yellow());
        for root in &report.roots {
            println!("  Root: {}", root.display());
        }
        println!("  Namespaces: {}", report.namespaces);
        println!("  Documents checked: {}", report.pairs.len());
        println!(
            "  Findings: {} errors, {} warnings",
            report.total_errors.to_string().red(),
            report.total_warnings.to_string().yellow()
        );
    }

    fn print_pairs(&self, report: &ValidationReport) {
        for pair in &report.pairs {
            let has_warnings = pair
                .checks
                .iter()
                .any(|c| c.count(Severity::Warning) > 0);
            if pair.passed() && !(self.verbose && has_warnings) {
                if self.verbose {
                    println!("  {} {} [{}]", "PASSED".green(), pair.path.display(), pair.locale);
                }
                continue;
            }

            let status = if pair.passed() {
                "WARNED".yellow()
            } else {
                "FAILED".red()
            };
            println!(
                "{} {} [{}]",
                status,
                pair.path.display().to_string().bold(),
                pair.locale
            );

            for check in &pair.checks {
                let shown: Vec<&Finding> = check
                    .findings
                    .iter()
                    .filter(|f| self.verbose || f.severity == Severity::Error)
                    .collect();
                if shown.is_empty() {
                    continue;
                }
                println!("  {} ({})", check.category.as_str().bold(), shown.len());
                for finding in shown {
                    let tag = match finding.severity {
                        Severity::Error => "error".red(),
                        Severity::Warning => "warning".yellow(),
                    };
                    match &finding.key {
                        Some(key) => println!("    - [{}] {}: {}", tag, key, finding.message),
                        None => println!("    - [{}] {}", tag, finding.message),
                    }
                }
            }
            println!();
        }
    }

    fn print_verdict(&self, report: &ValidationReport) {
        let failed = report.failed_pairs().count();
        if failed == 0 {
            println!("{}", "All translation files are consistent".green().bold());
        } else {
            println!(
                "{}",
                format!("{} of {} documents failed", failed, report.pairs.len())
                    .red()
                    .bold()
            );
        }
    }

    pub fn save<P: AsRef<Path>>(
        &self,
        report: &ValidationReport,
        path: P,
        format: ReportOutputFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = format.serialize(report)?;
        fs::write(path, content).with_context(|| format!("writing report {}", path.display()))?;
        println!("Report saved to: {}", path.display());
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
