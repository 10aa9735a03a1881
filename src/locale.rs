// SPDX-License-Identifier: PMPL-1.0-or-later

//! File-name conventions for translation documents
//!
//! Documents are named `<prefix>.<locale>.yml`. The locale token is read
//! syntactically from the file name and never checked against a locale
//! registry; any token of two or more characters without a dot is accepted.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.([^.]{2,})\.yml$").expect("locale pattern is valid"))
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Locale token of a translation file, e.g. `pt-BR` for `server.pt-BR.yml`.
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let name = file_name(path.as_ref())?;
    locale_pattern()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Namespace prefix of a translation file, e.g. `server` for `server.pt-BR.yml`.
pub fn namespace_prefix(path: impl AsRef<Path>) -> Option<String> {
    let name = file_name(path.as_ref())?;
    let found = locale_pattern().find(name)?;
    let prefix = &name[..found.start()];
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}

pub fn locale_file_name(prefix: &str, locale: &str) -> String {
    format!("{}.{}.yml", prefix, locale)
}

/// Transliteration variants (e.g. `sr_Latn` files kept under a
/// `transliterate` directory) mirror another locale and skip key equivalence.
pub fn is_transliteration(path: impl AsRef<Path>, marker: &str) -> bool {
    !marker.is_empty() && path.as_ref().to_string_lossy().contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_locale() {
        assert_eq!(extract_locale("client.de.yml").as_deref(), Some("de"));
        assert_eq!(
            extract_locale("config/locales/server.pt-BR.yml").as_deref(),
            Some("pt-BR")
        );
        assert_eq!(extract_locale("client.zh_CN.yml").as_deref(), Some("zh_CN"));
    }

    #[test]
    fn test_extract_rejects_short_or_missing_tokens() {
        assert_eq!(extract_locale("client.d.yml"), None);
        assert_eq!(extract_locale("client.yml"), None);
        assert_eq!(extract_locale("client.de.yaml"), None);
    }

    #[test]
    fn test_extract_ignores_dotted_directories() {
        assert_eq!(
            extract_locale("plugins/poll.v2/config/locales/client.fr.yml").as_deref(),
            Some("fr")
        );
    }

    #[test]
    fn test_namespace_prefix() {
        assert_eq!(namespace_prefix("server.pt-BR.yml").as_deref(), Some("server"));
        assert_eq!(
            namespace_prefix("a/b/plugin.admin.en.yml").as_deref(),
            Some("plugin.admin")
        );
        assert_eq!(namespace_prefix(".en.yml"), None);
        assert_eq!(locale_file_name("client", "it"), "client.it.yml");
    }

    #[test]
    fn test_transliteration_marker() {
        assert!(is_transliteration(
            "config/locales/transliterate.sr.yml",
            "transliterate"
        ));
        assert!(!is_transliteration("config/locales/server.sr.yml", "transliterate"));
        assert!(!is_transliteration("config/locales/server.sr.yml", ""));
    }
}
