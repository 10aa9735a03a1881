// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-warden: consistency checks and skeleton-preserving merges for
//! hierarchical YAML translation files
//!
//! `check` validates every namespace/locale pair, `localize` rewrites
//! translations onto the source skeleton, and `pull` syncs from upstream
//! before localizing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use locale_warden::config::{Config, DEFAULT_CONFIG_FILE};
use locale_warden::document::raw::RawNode;
use locale_warden::document::Document;
use locale_warden::driver::{self, LocalizeOptions, LocalizeSummary};
use locale_warden::duplicates::find_duplicates;
use locale_warden::error::LocaleError;
use locale_warden::keys::{find_pluralizations, flatten, stable_keys};
use locale_warden::report::{self, ReportOutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locale-warden")]
#[command(version)]
#[command(about = "Consistency checks and skeleton-preserving merges for YAML translation files")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Translation root (repeatable); replaces the configured roots
    #[arg(short, long = "root", global = true, value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Verbose output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every translation file against its source document
    Check {
        /// Export the report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (defaults to the output file's extension)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,
    },

    /// Rebuild translation files on the source skeleton
    Localize {
        /// Locales to rewrite (default: every translation found)
        #[arg(value_name = "LANGUAGE")]
        languages: Vec<String>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Pull translations from upstream, then localize them
    Pull {
        /// Locales to pull (default: every client.*.yml in the first root)
        #[arg(value_name = "LANGUAGE")]
        languages: Vec<String>,
    },

    /// Print the flattened key paths of a translation file
    Flatten {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only keys outside pluralization nodes
        #[arg(long, conflicts_with = "plurals")]
        stable: bool,

        /// Only pluralization nodes and their forms
        #[arg(long)]
        plurals: bool,
    },

    /// Report keys declared twice in the same mapping
    Dupes {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;
    if !cli.roots.is_empty() {
        config.roots = cli.roots.clone();
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            let code = err
                .downcast_ref::<LocaleError>()
                .map(LocaleError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Check { output, format } => {
            let report = driver::validate(&config)?;
            report::print_report(&report, cli.verbose);

            if let Some(output_path) = output {
                let format = format.unwrap_or_else(|| ReportOutputFormat::for_path(&output_path));
                report::save_report(&report, &output_path, format)?;
            } else if let Some(format) = format {
                println!("{}", format.serialize(&report)?);
            }

            Ok(if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Localize { languages, dry_run } => {
            let summary = driver::localize(&config, &LocalizeOptions { languages, dry_run })?;
            print_localize_summary(&summary, dry_run);
            Ok(localize_exit_code(&summary))
        }

        Commands::Pull { languages } => {
            println!("Pulling new translations...");
            let summary = driver::pull(&config, &languages, |line| println!("{}", line))?;
            println!("Fixing ymls...");
            print_localize_summary(&summary, false);
            println!("Done!");
            Ok(localize_exit_code(&summary))
        }

        Commands::Flatten {
            file,
            stable,
            plurals,
        } => {
            print_flattened(&file, stable, plurals)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Dupes { files } => {
            let mut clean = true;
            for file in &files {
                let text = fs::read_to_string(file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let raw = RawNode::parse(&text)
                    .with_context(|| format!("parsing {}", file.display()))?;
                let findings = find_duplicates(&raw);
                if findings.is_empty() {
                    println!("{} {}", "OK".green(), file.display());
                    continue;
                }
                clean = false;
                println!("{} {}", "DUPLICATES".red(), file.display());
                for finding in &findings {
                    println!("  - {}", finding);
                }
            }
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn print_localize_summary(summary: &LocalizeSummary, dry_run: bool) {
    let verb = if dry_run { "Would rewrite" } else { "Rewrote" };
    for path in &summary.rewritten {
        println!("  {} {}", verb, path.display());
    }
    println!(
        "{} {} files, {} already up to date",
        verb,
        summary.rewritten.len(),
        summary.unchanged.len()
    );
    for path in &summary.failed {
        println!("  {} {}", "Skipped unreadable".red(), path.display());
    }
}

fn localize_exit_code(summary: &LocalizeSummary) -> ExitCode {
    if summary.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_flattened(file: &Path, stable: bool, plurals: bool) -> Result<()> {
    let document = Document::load(file)?;
    let Some((locale, tree)) = document.single_root() else {
        return Err(LocaleError::InvalidDocument(format!(
            "{} has no translation tree under its root",
            file.display()
        ))
        .into());
    };
    println!("# {} ({})", file.display(), locale);

    if plurals {
        for (path, node) in find_pluralizations(tree) {
            let forms: Vec<&str> = node.keys().map(String::as_str).collect();
            println!("{}: [{}]", path, forms.join(", "));
        }
    } else if stable {
        for key in stable_keys(tree) {
            println!("{}", key);
        }
    } else {
        for (key, value) in flatten(tree) {
            println!("{} = {}", key, serde_json::to_string(value)?);
        }
    }
    Ok(())
}
