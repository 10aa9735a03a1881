// SPDX-License-Identifier: PMPL-1.0-or-later

//! Upstream translation sync
//!
//! Runs the external pull command (the Transifex client by default) for a
//! list of languages, streaming its output line by line. A failed pull is
//! fatal: nothing may be rewritten from a partial download.

use crate::error::LocaleError;
use crate::locale::{extract_locale, namespace_prefix};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Namespace whose files enumerate the languages to pull.
const LANGUAGE_LISTING_PREFIX: &str = "client";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Flag receiving the comma-joined language list
    pub language_flag: String,
}

impl Default for SyncCommand {
    fn default() -> Self {
        Self {
            program: "tx".to_string(),
            args: vec![
                "pull".to_string(),
                "--mode=developer".to_string(),
                "--force".to_string(),
            ],
            language_flag: "--language".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No languages left to pull
    Skipped,
    Completed { languages: Vec<String> },
}

impl SyncCommand {
    /// Arguments passed to the program for `languages`.
    pub fn arguments(&self, languages: &[String]) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("{}={}", self.language_flag, languages.join(",")));
        args
    }

    pub fn locate(&self) -> Option<PathBuf> {
        locate_program(&self.program)
    }

    /// Pull `languages`, handing each line of output to `sink`.
    ///
    /// An empty list is a no-op. Any non-zero exit becomes
    /// [`LocaleError::SyncFailed`] carrying the program's status.
    pub fn run<F>(&self, languages: &[String], mut sink: F) -> Result<SyncOutcome>
    where
        F: FnMut(&str),
    {
        if languages.is_empty() {
            tracing::info!("no languages to pull, skipping sync");
            return Ok(SyncOutcome::Skipped);
        }

        let program = self.locate().ok_or_else(|| LocaleError::SyncToolMissing {
            program: self.program.clone(),
        })?;
        let args = self.arguments(languages);
        tracing::info!(program = %program.display(), args = ?args, "pulling translations");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("starting {}", program.display()))?;

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line.context("reading sync output")?;
                sink(&line);
            }
        }

        let status = child.wait().context("waiting for sync to finish")?;
        if !status.success() {
            return Err(LocaleError::SyncFailed {
                status: status.code(),
            }
            .into());
        }

        Ok(SyncOutcome::Completed {
            languages: languages.to_vec(),
        })
    }
}

/// Resolve a program name against `PATH`, or check it directly when it
/// already contains a path separator.
pub fn locate_program(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        let with_exe = candidate.with_extension(env::consts::EXE_EXTENSION);
        (!env::consts::EXE_EXTENSION.is_empty() && with_exe.is_file()).then_some(with_exe)
    })
}

/// Locales present as `client.<locale>.yml` directly under `root`.
pub fn discover_languages(root: &Path) -> Result<Vec<String>> {
    let mut languages = Vec::new();
    if !root.is_dir() {
        return Ok(languages);
    }
    let entries =
        fs::read_dir(root).with_context(|| format!("listing {}", root.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if namespace_prefix(&path).as_deref() != Some(LANGUAGE_LISTING_PREFIX) {
            continue;
        }
        if let Some(locale) = extract_locale(&path) {
            languages.push(locale);
        }
    }
    languages.sort();
    languages.dedup();
    Ok(languages)
}

/// Languages to pull: the requested ones, or every discovered one, minus
/// the source locale.
pub fn select_languages(
    requested: &[String],
    discovered: &[String],
    source_locale: &str,
) -> Result<Vec<String>> {
    if let Some(bad) = requested.iter().find(|lang| lang.as_str() == "force") {
        return Err(LocaleError::RejectedArgument(bad.clone()).into());
    }
    let pool = if requested.is_empty() {
        discovered
    } else {
        requested
    };
    Ok(pool
        .iter()
        .filter(|lang| lang.as_str() != source_locale)
        .cloned()
        .collect())
}
