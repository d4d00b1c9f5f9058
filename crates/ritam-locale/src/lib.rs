// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Locale definitions.
//!
//! A locale supplies the native spelling of every universal keyword, the
//! native names of builtin namespace members, and the message templates
//! used for diagnostics. Locales are plain data, usually loaded from JSON:
//!
//! ```json
//! {
//!   "meta": { "name": "Español", "code": "es", "direction": "ltr" },
//!   "keywords": { "var": "variable", "if": "si", "else": "sino" },
//!   "builtins": { "std": "base", "print": "mostrar" },
//!   "messages": { "error_unexpected_token": "Símbolo inesperado '{0}'" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ritam_ast::Keyword;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod keys;

/// Errors from loading a locale.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid locale definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Descriptive metadata; not used by the lexer or parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleMeta {
    pub name: String,
    pub code: String,
    pub direction: String,
}

/// A locale definition.
///
/// Maps are keyed by universal key and valued by native spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDef {
    #[serde(default)]
    pub meta: LocaleMeta,
    pub keywords: BTreeMap<String, String>,
    #[serde(default)]
    pub builtins: BTreeMap<String, String>,
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl LocaleDef {
    /// An empty locale: no keywords, builtins or messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English locale.
    ///
    /// Every keyword is spelled as its universal key, except `else_if`,
    /// which is the two-word `else if`.
    pub fn english() -> Self {
        let mut locale = LocaleDef {
            meta: LocaleMeta {
                name: "English".to_string(),
                code: "en".to_string(),
                direction: "ltr".to_string(),
            },
            ..LocaleDef::default()
        };
        for &kw in Keyword::ALL {
            let spelling = match kw {
                Keyword::ElseIf => "else if",
                other => other.as_str(),
            };
            locale.keywords.insert(kw.as_str().to_string(), spelling.to_string());
        }
        for (key, template) in keys::ENGLISH_MESSAGES {
            locale.messages.insert(key.to_string(), template.to_string());
        }
        locale
    }

    pub fn from_json_str(json: &str) -> Result<Self, LocaleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LocaleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let locale = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), name = %locale.meta.name, "loaded locale");
        Ok(locale)
    }

    pub fn with_keyword(mut self, keyword: Keyword, native: impl Into<String>) -> Self {
        self.keywords.insert(keyword.as_str().to_string(), native.into());
        self
    }

    pub fn with_builtin(mut self, universal: impl Into<String>, native: impl Into<String>) -> Self {
        self.builtins.insert(universal.into(), native.into());
        self
    }

    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Keyword spellings with their universal keys.
    ///
    /// Entries whose key is not a known universal keyword are skipped.
    pub fn keywords(&self) -> impl Iterator<Item = (Keyword, &str)> {
        self.keywords.iter().filter_map(|(key, native)| match key.parse::<Keyword>() {
            Ok(kw) => Some((kw, native.as_str())),
            Err(_) => {
                tracing::warn!(key = %key, locale = %self.meta.name, "ignoring unknown keyword key");
                None
            }
        })
    }

    pub fn keyword_spelling(&self, keyword: Keyword) -> Option<&str> {
        self.keywords.get(keyword.as_str()).map(String::as_str)
    }

    pub fn builtin_spelling(&self, universal: &str) -> Option<&str> {
        self.builtins.get(universal).map(String::as_str)
    }

    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPANISH: &str = r#"{
        "meta": { "name": "Español", "code": "es", "direction": "ltr" },
        "keywords": { "var": "variable", "if": "si", "bogus": "nada" },
        "builtins": { "print": "mostrar" }
    }"#;

    #[test]
    fn english_spells_keys_natively() {
        let en = LocaleDef::english();
        assert_eq!(en.keyword_spelling(Keyword::While), Some("while"));
        assert_eq!(en.keyword_spelling(Keyword::ElseIf), Some("else if"));
        assert_eq!(en.keywords().count(), Keyword::ALL.len());
        assert!(en.message(keys::EXPECTED_TOKEN).is_some());
    }

    #[test]
    fn parses_json_and_skips_unknown_keys() {
        let es = LocaleDef::from_json_str(SPANISH).unwrap();
        assert_eq!(es.meta.code, "es");
        assert_eq!(es.keyword_spelling(Keyword::Var), Some("variable"));
        assert_eq!(es.builtin_spelling("print"), Some("mostrar"));
        assert!(es.messages.is_empty());

        let kws: Vec<_> = es.keywords().collect();
        assert_eq!(kws, vec![(Keyword::If, "si"), (Keyword::Var, "variable")]);
    }

    #[test]
    fn missing_keywords_table_is_an_error() {
        let err = LocaleDef::from_json_str(r#"{ "builtins": {} }"#).unwrap_err();
        assert!(matches!(err, LocaleError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SPANISH.as_bytes()).unwrap();
        let es = LocaleDef::from_path(file.path()).unwrap();
        assert_eq!(es.meta.name, "Español");

        let err = LocaleDef::from_path("/nonexistent/locale.json").unwrap_err();
        assert!(matches!(err, LocaleError::Io { .. }));
    }

    #[test]
    fn builder_overrides() {
        let locale = LocaleDef::new()
            .with_keyword(Keyword::Print, "show")
            .with_builtin("std", "core")
            .with_message(keys::UNEXPECTED_TOKEN, "bad {0}");
        assert_eq!(locale.keyword_spelling(Keyword::Print), Some("show"));
        assert_eq!(locale.builtin_spelling("std"), Some("core"));
        assert_eq!(locale.message(keys::UNEXPECTED_TOKEN), Some("bad {0}"));
    }
}
