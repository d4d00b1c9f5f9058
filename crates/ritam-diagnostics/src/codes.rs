// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0100, etc.) to titles, categories and the
//! locale message key they are raised with.

use std::collections::HashMap;

use ritam_locale::keys;

/// Code for exporting a statement that cannot be exported.
pub const NOT_EXPORTABLE: &str = "E0200";

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    /// Message key, for errors that are localized.
    pub key: Option<&'static str>,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Module,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Module => write!(f, "Module"),
        }
    }
}

macro_rules! register_codes {
    ($($code:expr => ($title:literal, $cat:expr, $key:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                key: $key,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Lexical, Some(keys::UNEXPECTED_CHARACTER)),

                // Parser errors (E01xx)
                "E0100" => ("unexpected token", Syntax, Some(keys::UNEXPECTED_TOKEN)),
                "E0101" => ("expected token not found", Syntax, Some(keys::EXPECTED_TOKEN)),
                "E0102" => ("nesting too deep", Syntax, Some(keys::NESTING_TOO_DEEP)),

                // Module errors (E02xx)
                NOT_EXPORTABLE => ("declaration cannot be exported", Module, None),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }

    /// The code registered for a message key.
    pub fn for_key(&self, key: &str) -> Option<&ErrorCodeInfo> {
        self.codes.values().find(|info| info.key == Some(key))
    }
}

/// Shorthand for the code of a message key.
pub fn code_for_key(key: &str) -> Option<&'static str> {
    ErrorCodeRegistry::default().for_key(key).map(|info| info.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_codes() {
        assert_eq!(code_for_key(keys::UNEXPECTED_CHARACTER), Some("E0001"));
        assert_eq!(code_for_key(keys::EXPECTED_TOKEN), Some("E0101"));
        assert_eq!(code_for_key(keys::NESTING_TOO_DEEP), Some("E0102"));
        assert_eq!(code_for_key("no_such_key"), None);
    }

    #[test]
    fn registry_lookup() {
        let registry = ErrorCodeRegistry::default();
        let info = registry.get(NOT_EXPORTABLE).unwrap();
        assert_eq!(info.category, ErrorCategory::Module);
        assert_eq!(info.key, None);
        assert_eq!(registry.all().count(), 5);
    }
}
