// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Ritam diagnostics.
//!
//! [`Diagnostics`] turns a message key plus arguments into a localized
//! [`SyntaxError`] with a source snippet. Errors from every phase can also be
//! converted to a [`Diagnostic`] via [`ToDiagnostic`] for rich terminal
//! ([`formatter`]) or machine-readable ([`json`]) display.

pub mod codes;
pub mod formatter;
pub mod json;
pub mod suggestions;

use ritam_ast::LineMap;
use ritam_locale::{keys, LocaleDef};
use serde::Serialize;
use thiserror::Error;

pub use suggestions::{edit_distance, suggest};

/// Template used for "did you mean" hints when the locale has none.
const DEFAULT_DID_YOU_MEAN: &str = "Did you mean \"{0}\"?";

// ============================================================================
// Syntax errors
// ============================================================================

/// A localized, located syntax error.
///
/// `message` is the formatted template only; `Display` adds the location
/// and the snippet.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}{}", location_suffix(.line, .column, .snippet))]
pub struct SyntaxError {
    /// The message key the error was raised with.
    pub key: String,
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    /// Two-line source excerpt with a caret under the column.
    pub snippet: Option<String>,
    pub hint: Option<String>,
}

impl SyntaxError {
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn location_suffix(line: &Option<u32>, column: &Option<u32>, snippet: &Option<String>) -> String {
    let Some(line) = line else {
        return String::new();
    };
    let mut out = match column {
        Some(column) => format!(" (line {line}, column {column})"),
        None => format!(" (line {line})"),
    };
    if let Some(snippet) = snippet {
        out.push('\n');
        out.push_str(snippet);
    }
    out
}

/// Raises syntax errors against one source text, localized by one locale.
pub struct Diagnostics<'a> {
    source: &'a str,
    locale: &'a LocaleDef,
    line_map: LineMap,
}

impl<'a> Diagnostics<'a> {
    pub fn new(source: &'a str, locale: &'a LocaleDef) -> Self {
        Self {
            source,
            locale,
            line_map: LineMap::new(source),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn locale(&self) -> &'a LocaleDef {
        self.locale
    }

    /// Build the error for `key`. Callers return it with `?`.
    ///
    /// The template comes from the locale, falling back to the key itself.
    /// A snippet is attached when `location` names a line of the source.
    pub fn fail(&self, key: &str, location: Option<(u32, u32)>, args: &[String]) -> SyntaxError {
        let message = self.message(key, args);
        let snippet = location.and_then(|(line, column)| self.snippet(line, column));
        tracing::debug!(key, line = location.map(|l| l.0), column = location.map(|l| l.1), "syntax error");
        SyntaxError {
            key: key.to_string(),
            message,
            line: location.map(|(line, _)| line),
            column: location.map(|(_, column)| column),
            snippet,
            hint: None,
        }
    }

    /// The localized message for `key` with `{n}` placeholders filled in.
    pub fn message(&self, key: &str, args: &[String]) -> String {
        let template = self.locale.message(key).unwrap_or(key);
        substitute(template, args)
    }

    /// Render the source line and a caret under `column`:
    ///
    /// ```text
    /// 3 | if x {
    ///   |      ^
    /// ```
    pub fn snippet(&self, line: u32, column: u32) -> Option<String> {
        render_snippet(self.source, &self.line_map, line, column)
    }

    /// Localized "did you mean" hint for a suggested spelling.
    pub fn did_you_mean(&self, suggestion: &str) -> String {
        let template = self
            .locale
            .message(keys::DID_YOU_MEAN)
            .unwrap_or(DEFAULT_DID_YOU_MEAN);
        substitute(template, &[suggestion.to_string()])
    }
}

pub(crate) fn render_snippet(source: &str, line_map: &LineMap, line: u32, column: u32) -> Option<String> {
    let text = line_map.line_text(source, line)?;
    let number = line.to_string();
    Some(format!(
        "{number} | {text}\n{pad} | {indent}^",
        pad = " ".repeat(number.len()),
        indent = " ".repeat(column.saturating_sub(1) as usize),
    ))
}

/// Replace `{n}` with `args[n]`. Placeholders without an argument stay.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let arg = if digits > 0 && after[digits..].starts_with('}') {
            after[..digits].parse::<usize>().ok().and_then(|i| args.get(i))
        } else {
            None
        };
        match arg {
            Some(arg) => {
                out.push_str(arg);
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Display model
// ============================================================================

/// An error with rich context for display.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: Option<ErrorCode>,
    pub message: String,
    /// The first label is the primary location.
    pub labels: Vec<Label>,
    pub help: Option<String>,
}

/// A labeled source location within a diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: u32,
    /// Byte length of the labeled text; zero marks a single position.
    pub len: usize,
    pub message: Option<String>,
}

/// An error code like E0100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn with_label(mut self, line: u32, column: u32, len: usize, msg: Option<String>) -> Self {
        self.labels.push(Label {
            line,
            column,
            len,
            message: msg,
        });
        self
    }

    pub fn with_primary(self, line: u32, column: u32, len: usize, msg: impl Into<String>) -> Self {
        self.with_label(line, column, len, Some(msg.into()))
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.first()
    }
}

/// Convert a compiler error into a rich diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

impl ToDiagnostic for SyntaxError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message);
        if let Some(code) = codes::code_for_key(&self.key) {
            diag = diag.with_code(code);
        }
        if let Some(line) = self.line {
            let column = self.column.unwrap_or(1);
            diag = diag.with_label(line, column, 0, None);
        }
        if let Some(hint) = &self.hint {
            diag = diag.with_help(hint);
        }
        diag
    }
}
