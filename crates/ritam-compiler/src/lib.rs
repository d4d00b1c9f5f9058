// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Ritam front end as a pipeline.
//!
//! Each entry point builds a fresh lexer and parser over a borrowed locale,
//! so different sources can be compiled on different threads against the
//! same `LocaleDef`.

use std::path::Path;

use ritam_ast::Program;
use ritam_diagnostics::formatter::DiagnosticFormatter;
use ritam_diagnostics::json::{to_json_report, to_json_string};
use ritam_diagnostics::{Diagnostic, Diagnostics, ToDiagnostic};
use ritam_fmt::FormatConfig;
use ritam_lexer::Lexer;
use ritam_locale::{LocaleDef, LocaleError};
use ritam_parser::{ParseError, Parser};
use thiserror::Error;

const DEFAULT_FILE_NAME: &str = "<source>";

/// Options for one compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Fail on characters no token rule matches instead of dropping them.
    pub strict_lexing: bool,
    /// Shown in rendered diagnostics.
    pub file_name: Option<String>,
}

impl CompileOptions {
    fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Locale(#[from] LocaleError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ToDiagnostic for CompileError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse(e) => e.to_diagnostic(),
            CompileError::Locale(e) => Diagnostic::error(e.to_string()),
        }
    }
}

/// Load a locale definition from a JSON file.
pub fn load_locale(path: impl AsRef<Path>) -> Result<LocaleDef, CompileError> {
    Ok(LocaleDef::from_path(path)?)
}

/// Lex and parse `source` with default options.
pub fn parse_source(source: &str, locale: &LocaleDef) -> Result<Program, CompileError> {
    parse_source_with(source, locale, &CompileOptions::default())
}

pub fn parse_source_with(source: &str, locale: &LocaleDef, options: &CompileOptions) -> Result<Program, CompileError> {
    let span = tracing::debug_span!(
        "parse_source",
        file = options.file_name(),
        locale = %locale.meta.code,
        strict = options.strict_lexing,
    );
    let _enter = span.enter();

    let lexer = Lexer::new(source, locale);
    let tokens = if options.strict_lexing {
        lexer.tokenize_strict().map_err(ParseError::from)?
    } else {
        lexer.tokenize()
    };

    let diagnostics = Diagnostics::new(source, locale);
    let program = Parser::new(tokens, &diagnostics).parse()?;
    Ok(program)
}

/// Reprint `source` in canonical layout, keeping its comments.
pub fn format_source(source: &str, locale: &LocaleDef, config: &FormatConfig) -> Result<String, CompileError> {
    let program = parse_source(source, locale)?;
    Ok(ritam_fmt::format_program_with_source(&program, source, locale, config))
}

/// Parse `source` written in `from` and print it in `to`'s spellings.
/// Comments are carried over untranslated.
pub fn translate_source(
    source: &str,
    from: &LocaleDef,
    to: &LocaleDef,
    config: &FormatConfig,
) -> Result<String, CompileError> {
    let span = tracing::debug_span!("translate_source", from = %from.meta.code, to = %to.meta.code);
    let _enter = span.enter();

    let program = parse_source(source, from)?;
    Ok(ritam_fmt::format_program_with_source(&program, source, to, config))
}

/// Render a failed compilation for a terminal.
pub fn render_error(error: &CompileError, source: &str, options: &CompileOptions) -> String {
    DiagnosticFormatter::new(source)
        .with_file_name(options.file_name())
        .format(&error.to_diagnostic())
}

/// Machine-readable report of a compilation; `None` means it succeeded.
pub fn json_report(error: Option<&CompileError>, source: &str, options: &CompileOptions) -> String {
    let diagnostics: Vec<Diagnostic> = error.map(ToDiagnostic::to_diagnostic).into_iter().collect();
    to_json_string(&to_json_report(&diagnostics, source, options.file_name()))
}
