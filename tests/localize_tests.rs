// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the fix-up pass and the pull workflow

use locale_warden::config::{Config, DEFAULT_PROVENANCE_HEADER};
use locale_warden::document::{parse_tree, Document};
use locale_warden::driver::{self, LocalizeOptions};
use locale_warden::error::LocaleError;
use locale_warden::sync::SyncCommand;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup(dir: &Path) -> Config {
    fs::write(
        dir.join("server.en.yml"),
        "en:\n  greeting: Hello\n  farewell: Bye\n  items:\n    one: 1 item\n    other: '%{count} items'\n",
    )
    .unwrap();
    fs::write(
        dir.join("server.ru.yml"),
        "ru:\n  greeting: Привет\n  rogue: key\n  items:\n    one: 1 штука\n    few: '%{count} штуки'\n    many: '%{count} штук'\n    other: '%{count} штуки'\n",
    )
    .unwrap();
    Config {
        roots: vec![dir.to_path_buf()],
        ..Config::default()
    }
}

#[test]
fn test_localize_rewrites_onto_skeleton() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());

    let summary = driver::localize(&config, &LocalizeOptions::default()).unwrap();
    let russian = dir.path().join("server.ru.yml");
    assert_eq!(summary.rewritten, vec![russian.clone()]);

    let written = fs::read_to_string(&russian).unwrap();
    assert!(written.starts_with(DEFAULT_PROVENANCE_HEADER.trim_end()));

    let doc = Document::parse(&written).unwrap();
    assert_eq!(doc.root_keys(), vec!["ru"]);
    let tree = doc.locale_tree("ru").unwrap();
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["greeting", "farewell", "items"]);
    assert_eq!(
        tree["farewell"],
        locale_warden::document::Node::leaf("Bye"),
        "untranslated keys fall back to the source text"
    );
    let items = tree["items"].as_tree().unwrap();
    assert_eq!(items.len(), 4);

    // The source document itself is never rewritten.
    let english = fs::read_to_string(dir.path().join("server.en.yml")).unwrap();
    assert!(english.starts_with("en:\n"));
}

#[test]
fn test_localize_is_stable_on_second_run() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());

    driver::localize(&config, &LocalizeOptions::default()).unwrap();
    let again = driver::localize(&config, &LocalizeOptions::default()).unwrap();
    assert!(again.rewritten.is_empty());
    assert_eq!(again.unchanged.len(), 1);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());
    let before = fs::read_to_string(dir.path().join("server.ru.yml")).unwrap();

    let summary = driver::localize(
        &config,
        &LocalizeOptions {
            languages: Vec::new(),
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(summary.rewritten.len(), 1);
    let after = fs::read_to_string(dir.path().join("server.ru.yml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_requested_language_without_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());

    let summary = driver::localize(
        &config,
        &LocalizeOptions {
            languages: vec!["ja".to_string(), "en".to_string()],
            dry_run: false,
        },
    )
    .unwrap();
    assert!(summary.rewritten.is_empty());
    assert!(summary.unchanged.is_empty());
    assert!(!dir.path().join("server.ja.yml").exists());
}

#[test]
fn test_localized_output_passes_validation() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());
    assert!(!driver::validate(&config).unwrap().passed());

    driver::localize(&config, &LocalizeOptions::default()).unwrap();
    let report = driver::validate(&config).unwrap();
    assert!(report.passed());
    assert_eq!(report.total_warnings, 0);
}

#[test]
fn test_merged_tree_matches_expected_document() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());
    driver::localize(&config, &LocalizeOptions::default()).unwrap();

    let doc = Document::load(&dir.path().join("server.ru.yml")).unwrap();
    let expected = parse_tree(
        "greeting: Привет\nfarewell: Bye\nitems:\n  one: 1 штука\n  other: '%{count} штуки'\n  few: '%{count} штуки'\n  many: '%{count} штук'\n",
    )
    .unwrap();
    assert_eq!(doc.locale_tree("ru"), Some(&expected));
}

#[cfg(unix)]
#[test]
fn test_failed_pull_rewrites_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = setup(dir.path());
    config.sync = SyncCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "echo pulling $0; exit 4".to_string()],
        language_flag: "--language".to_string(),
    };
    let before = fs::read_to_string(dir.path().join("server.ru.yml")).unwrap();

    let mut lines = Vec::new();
    let err = driver::pull(&config, &["ru".to_string()], |line| lines.push(line.to_string()))
        .unwrap_err();
    match err.downcast_ref::<LocaleError>() {
        Some(LocaleError::SyncFailed { status }) => assert_eq!(*status, Some(4)),
        other => panic!("expected sync failure, got {:?}", other),
    }
    assert_eq!(err.downcast_ref::<LocaleError>().unwrap().exit_code(), 4);
    assert_eq!(lines, vec!["pulling --language=ru".to_string()]);

    let after = fs::read_to_string(dir.path().join("server.ru.yml")).unwrap();
    assert_eq!(before, after);
}

#[cfg(unix)]
#[test]
fn test_successful_pull_localizes() {
    let dir = TempDir::new().unwrap();
    let mut config = setup(dir.path());
    config.sync = SyncCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "echo ok".to_string()],
        language_flag: "--language".to_string(),
    };

    let summary = driver::pull(&config, &["ru".to_string()], |_| {}).unwrap();
    assert_eq!(summary.rewritten, vec![dir.path().join("server.ru.yml")]);
}

#[test]
fn test_pull_with_only_source_language_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut config = setup(dir.path());
    config.sync.program = "definitely-not-installed-sync-tool".to_string();

    let summary = driver::pull(&config, &["en".to_string()], |_| {}).unwrap();
    assert!(summary.rewritten.is_empty());
}

#[test]
fn test_unreadable_translation_does_not_stop_the_pass() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());
    let broken = dir.path().join("server.de.yml");
    fs::write(&broken, "de: [unclosed\n").unwrap();

    let summary = driver::localize(&config, &LocalizeOptions::default()).unwrap();
    assert_eq!(summary.failed, vec![broken.clone()]);
    assert!(!summary.succeeded());
    assert_eq!(summary.rewritten, vec![dir.path().join("server.ru.yml")]);
    assert_eq!(fs::read_to_string(&broken).unwrap(), "de: [unclosed\n");
}

#[test]
fn test_unreadable_source_skips_only_its_namespace() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path());
    fs::write(dir.path().join("client.en.yml"), "en: [unclosed\n").unwrap();
    fs::write(dir.path().join("client.ru.yml"), "ru:\n  js:\n    a: b\n").unwrap();

    let summary = driver::localize(&config, &LocalizeOptions::default()).unwrap();
    assert_eq!(summary.failed, vec![dir.path().join("client.en.yml")]);
    assert_eq!(summary.rewritten, vec![dir.path().join("server.ru.yml")]);
    assert_eq!(
        fs::read_to_string(dir.path().join("client.ru.yml")).unwrap(),
        "ru:\n  js:\n    a: b\n"
    );
}
