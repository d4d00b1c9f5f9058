// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent for statements, precedence
//! climbing for binary expressions.

mod expr;
mod stmt;
mod ui;

use ritam_ast::stmt::Program;
use ritam_ast::token::{Keyword, Token, TokenKind};
use ritam_ast::Span;
use ritam_diagnostics::codes;
use ritam_diagnostics::{suggest, Diagnostic, Diagnostics, SyntaxError, ToDiagnostic};
use ritam_locale::keys;
use thiserror::Error;

/// How the end-of-input token is named in messages.
const EOF_TEXT: &str = "EOF";

/// Deepest nesting of statements and expressions accepted before parsing
/// stops with an error instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// The parser for one token stream.
///
/// Stops at the first error; there is no recovery and no partial tree.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    /// Current nesting of recursive rules; see [`MAX_NESTING`].
    depth: usize,
    diagnostics: &'a Diagnostics<'a>,
}

impl<'a> Parser<'a> {
    /// `tokens` should end with an `Eof` token; one is added if missing.
    pub fn new(mut tokens: Vec<Token>, diagnostics: &'a Diagnostics<'a>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let end = diagnostics.source().len();
            let span = tokens
                .last()
                .map(|t| Span::new(end, end, t.span.line, t.span.column))
                .unwrap_or_else(|| Span::new(end, end, 1, 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            diagnostics,
        }
    }

    // =========================================================================
    // Top-Level Parsing
    // =========================================================================

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let start = self.current().span;
        let mut body = Vec::new();

        loop {
            self.skip_separators();
            if self.at_end() {
                break;
            }
            body.push(self.parse_stmt()?);
        }

        tracing::debug!(statements = body.len(), tokens = self.tokens.len(), "parsed program");
        Ok(Program {
            body,
            span: start.to(self.previous().span),
        })
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    /// The last consumed token (the first token if none was consumed).
    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn check_keyword(&self, kw: Keyword) -> bool {
        self.current().is_keyword(kw)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(kind.display_name()))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(kw) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(&self.describe_keyword(kw)))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.check(&TokenKind::Ident { universal: None }) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.error_expected("a name"))
        }
    }

    fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.error_expected("a string")),
        }
    }

    /// `;` separates statements but carries no meaning.
    fn skip_separators(&mut self) {
        while self.match_token(&TokenKind::Semi) {}
    }

    /// Enter a recursive rule. Pair with [`Parser::leave`] on success; an
    /// error abandons the whole parse, so the count needs no unwinding.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            let (line, column) = self.location();
            return Err(self
                .diagnostics
                .fail(
                    keys::NESTING_TOO_DEEP,
                    Some((line, column)),
                    &[MAX_NESTING.to_string(), line.to_string()],
                )
                .into());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Span from `start` to the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.to(self.previous().span)
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn location(&self) -> (u32, u32) {
        let span = self.current().span;
        (span.line, span.column)
    }

    fn found_text(&self) -> String {
        let tok = self.current();
        match tok.kind {
            TokenKind::Eof => EOF_TEXT.to_string(),
            _ => tok.text.clone(),
        }
    }

    /// The expected keyword as the reader wrote it: its native spelling.
    fn describe_keyword(&self, kw: Keyword) -> String {
        let spelling = self
            .diagnostics
            .locale()
            .keyword_spelling(kw)
            .unwrap_or(kw.as_str());
        format!("'{spelling}'")
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        let (line, column) = self.location();
        self.diagnostics
            .fail(
                keys::EXPECTED_TOKEN,
                Some((line, column)),
                &[expected.to_string(), self.found_text(), line.to_string()],
            )
            .into()
    }

    /// The current token cannot start an expression.
    ///
    /// Suggests the closest keyword spelling used elsewhere in the file.
    fn error_unexpected(&self) -> ParseError {
        let (line, column) = self.location();
        let found = self.found_text();

        let hint = if self.at_end() {
            None
        } else {
            let mut seen: Vec<&str> = Vec::new();
            for tok in &self.tokens {
                if tok.keyword().is_some() && tok.text != found && !seen.contains(&tok.text.as_str()) {
                    seen.push(&tok.text);
                }
            }
            suggest(&found, seen).map(|s| self.diagnostics.did_you_mean(s))
        };

        let shown = match &hint {
            Some(hint) => format!("{found} {hint}"),
            None => found,
        };
        let err = self
            .diagnostics
            .fail(keys::UNEXPECTED_TOKEN, Some((line, column)), &[shown, line.to_string()]);
        match hint {
            Some(hint) => err.with_hint(hint).into(),
            None => err.into(),
        }
    }
}

/// A parse failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Localized syntax error raised through the diagnostics subsystem.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// `export` applied to something other than a declaration.
    #[error("cannot export {kind}")]
    NotExportable { kind: &'static str, span: Span },
}

impl ParseError {
    /// 1-based line of the error, when known.
    pub fn line(&self) -> Option<u32> {
        match self {
            ParseError::Syntax(e) => e.line,
            ParseError::NotExportable { span, .. } => Some(span.line),
        }
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Syntax(e) => e.to_diagnostic(),
            ParseError::NotExportable { span, .. } => Diagnostic::error(self.to_string())
                .with_code(codes::NOT_EXPORTABLE)
                .with_primary(span.line, span.column, span.len(), "not a declaration")
                .with_help("only variable, function, struct, enum and component declarations can be exported"),
        }
    }
}
