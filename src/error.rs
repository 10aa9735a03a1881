// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error conditions the binary needs to tell apart.
//!
//! Everything else travels as `anyhow::Error` with context attached at the
//! I/O and parse boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocaleError {
    /// The upstream sync program could not be resolved.
    #[error("translation sync tool `{program}` was not found on PATH; install it before pulling")]
    SyncToolMissing { program: String },

    /// The upstream sync program ran and reported failure.
    #[error("translation sync failed ({}); check the output above", describe_status(.status))]
    SyncFailed { status: Option<i32> },

    /// A document whose shape cannot be a translation file.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A language argument the pull workflow refuses.
    #[error("`{0}` is not a language (usage: locale-warden pull [languages], e.g. `pull de it`)")]
    RejectedArgument(String),
}

impl LocaleError {
    /// Process exit code to report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LocaleError::SyncFailed { status: Some(code) } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
