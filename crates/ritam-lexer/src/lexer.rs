// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation.
//!
//! Keywords are runtime data (they come from the locale), so whitespace,
//! comments and keyword matching are done by hand. Everything else is
//! recognised by a logos-derived raw token run over the remainder of the
//! input, one token at a time.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::convert::Infallible;

use logos::Logos;
use ritam_ast::token::{Keyword, Token, TokenKind};
use ritam_ast::Span;
use ritam_diagnostics::{Diagnostics, SyntaxError};
use ritam_locale::{keys, LocaleDef};

/// Raw token type for logos - values are extracted in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    // === Literals ===
    // Unterminated strings run to the end of input.
    #[regex(r#""[^"]*"?"#)]
    #[regex(r#"'[^']*'?"#)]
    Str,

    #[regex(r"#[a-zA-Z0-9_.\x{80}-\x{10FFFF}]*")]
    Sovereign,

    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    // === Operators (longer first) ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
}

/// A character that continues a word: a keyword spelled with a trailing
/// word character must not be followed by one.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Line and column of a byte offset, moved forward as the scan advances so
/// each character is counted once.
#[derive(Debug, Clone, Copy)]
struct Position {
    offset: usize,
    line: u32,
    column: u32,
}

impl Position {
    fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Move to `offset`. Offsets behind the current one are ignored.
    fn advance_to(&mut self, source: &str, offset: usize) {
        let Some(skipped) = source.get(self.offset..offset) else {
            return;
        };
        for ch in skipped.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
    }
}

/// The lexer for one source text under one locale.
pub struct Lexer<'a> {
    source: &'a str,
    locale: &'a LocaleDef,
    /// Native keyword spellings, longest first.
    keywords: Vec<(&'a str, Keyword)>,
    /// Native builtin spelling to universal name.
    builtins: HashMap<&'a str, &'a str>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, locale: &'a LocaleDef) -> Self {
        let mut by_spelling: HashMap<&'a str, Keyword> = HashMap::new();
        for (kw, native) in locale.keywords() {
            if native.is_empty() {
                tracing::warn!(keyword = %kw, "ignoring empty keyword spelling");
                continue;
            }
            // Last write wins for duplicate spellings.
            by_spelling.insert(native, kw);
        }
        let mut keywords: Vec<(&'a str, Keyword)> = by_spelling.into_iter().collect();
        keywords.sort_by_key(|&(spelling, _)| (Reverse(spelling.chars().count()), spelling));

        let builtins = locale
            .builtins
            .iter()
            .map(|(universal, native)| (native.as_str(), universal.as_str()))
            .collect();

        Self {
            source,
            locale,
            keywords,
            builtins,
        }
    }

    /// Tokenize the whole source. Characters that match no rule are dropped.
    pub fn tokenize(&self) -> Vec<Token> {
        let mut dropped = 0usize;
        let scanned = self.scan(|at, ch| {
            tracing::trace!(offset = at.offset, line = at.line, column = at.column, character = %ch.escape_debug(), "dropping unrecognised character");
            dropped += 1;
            Ok::<(), Infallible>(())
        });
        let tokens = match scanned {
            Ok(tokens) => tokens,
            Err(never) => match never {},
        };
        tracing::debug!(tokens = tokens.len(), dropped, "tokenized");
        tokens
    }

    /// Tokenize the whole source, failing on the first character that
    /// matches no rule.
    pub fn tokenize_strict(&self) -> Result<Vec<Token>, SyntaxError> {
        let diagnostics = Diagnostics::new(self.source, self.locale);
        let tokens = self.scan(|at, ch| {
            Err(diagnostics.fail(
                keys::UNEXPECTED_CHARACTER,
                Some((at.line, at.column)),
                &[ch.to_string(), at.line.to_string()],
            ))
        })?;
        tracing::debug!(tokens = tokens.len(), "tokenized (strict)");
        Ok(tokens)
    }

    fn scan<E>(
        &self,
        mut on_unknown: impl FnMut(Position, char) -> Result<(), E>,
    ) -> Result<Vec<Token>, E> {
        let source = self.source;
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut at = Position::start();

        while let Some(ch) = source[pos..].chars().next() {
            let rest = &source[pos..];

            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }

            if rest.starts_with("//") {
                pos += rest.find('\n').unwrap_or(rest.len());
                continue;
            }

            if let Some((spelling, kw)) = self.match_keyword(rest) {
                tokens.push(self.token(TokenKind::Keyword(kw), pos, pos + spelling.len(), &mut at));
                pos += spelling.len();
                continue;
            }

            let mut raw = RawToken::lexer(rest);
            match raw.next() {
                Some(Ok(kind)) => {
                    let len = raw.span().end;
                    let slice = raw.slice();
                    tokens.push(self.token(self.convert(kind, slice), pos, pos + len, &mut at));
                    pos += len;
                }
                _ => {
                    at.advance_to(source, pos);
                    on_unknown(at, ch)?;
                    pos += ch.len_utf8();
                }
            }
        }

        tokens.push(self.token(TokenKind::Eof, source.len(), source.len(), &mut at));
        Ok(tokens)
    }

    fn match_keyword(&self, rest: &str) -> Option<(&'a str, Keyword)> {
        self.keywords.iter().copied().find(|&(spelling, _)| {
            if !rest.starts_with(spelling) {
                return false;
            }
            let ends_in_word = spelling.chars().next_back().is_some_and(is_word_char);
            let next = rest[spelling.len()..].chars().next();
            !ends_in_word || !next.is_some_and(is_word_char)
        })
    }

    fn convert(&self, raw: RawToken, slice: &str) -> TokenKind {
        match raw {
            RawToken::Str => {
                let quote = &slice[..1];
                let inner = &slice[1..];
                let content = if inner.ends_with(quote) {
                    &inner[..inner.len() - 1]
                } else {
                    inner
                };
                TokenKind::Str(content.to_string())
            }
            RawToken::Sovereign => {
                let segments: Vec<&str> = slice[1..]
                    .split('.')
                    .map(|segment| self.builtins.get(segment).copied().unwrap_or(segment))
                    .collect();
                TokenKind::Ident {
                    universal: Some(format!("#{}", segments.join("."))),
                }
            }
            RawToken::Ident => TokenKind::Ident {
                universal: self.builtins.get(slice).map(|u| u.to_string()),
            },
            RawToken::Int => TokenKind::Int(
                slice
                    .bytes()
                    .fold(0.0, |acc, digit| acc * 10.0 + f64::from(digit - b'0')),
            ),

            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Bang => TokenKind::Bang,

            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Colon => TokenKind::Colon,
        }
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize, at: &mut Position) -> Token {
        at.advance_to(self.source, start);
        Token {
            kind,
            text: self.source[start..end].to_string(),
            span: Span::new(start, end, at.line, at.column),
        }
    }
}

/// Tokenize `source` under `locale`, dropping unrecognised characters.
pub fn tokenize(source: &str, locale: &LocaleDef) -> Vec<Token> {
    Lexer::new(source, locale).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    fn ident(universal: Option<&str>) -> TokenKind {
        TokenKind::Ident { universal: universal.map(str::to_string) }
    }

    fn tamil() -> LocaleDef {
        LocaleDef::new()
            .with_keyword(Keyword::Var, "மாறி")
            .with_keyword(Keyword::If, "என்றால்")
            .with_keyword(Keyword::Print, "அச்சிடு")
            .with_builtin("std", "அடிப்படை")
            .with_builtin("print", "காட்டு")
    }

    #[test]
    fn blank_input_is_just_eof() {
        let en = LocaleDef::english();
        for src in ["", "   \n\t ", "// only a comment", "  // one\n// two\n"] {
            let tokens = tokenize(src, &en);
            assert_eq!(kinds(&tokens), vec![TokenKind::Eof], "source: {src:?}");
            assert_eq!(tokens[0].text, "");
            assert_eq!(tokens[0].span.start, src.len());
        }
    }

    #[test]
    fn token_text_is_the_source_slice() {
        let en = LocaleDef::english();
        let src = "var x = \"hi\" + 'there' // trailing\nif x >= 10 && !y { print(#std.print, [1, 2]) }";
        let tokens = tokenize(src, &en);
        let mut last_end = 0;
        for tok in &tokens {
            assert_eq!(tok.text, &src[tok.span.start..tok.span.end]);
            assert!(tok.span.start >= last_end);
            last_end = tok.span.end;
        }
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn basic_statement() {
        let en = LocaleDef::english();
        let tokens = tokenize("var x = 42;", &en);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword(Keyword::Var),
                ident(None),
                TokenKind::Eq,
                TokenKind::Int(42.0),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text, "x");
        assert_eq!((tokens[3].span.line, tokens[3].span.column), (1, 9));
    }

    #[test]
    fn longest_keyword_wins() {
        let locale = LocaleDef::new()
            .with_keyword(Keyword::If, "if")
            .with_keyword(Keyword::While, "ifx");

        let tokens = tokenize("ifx", &locale);
        assert_eq!(kinds(&tokens), vec![TokenKind::Keyword(Keyword::While), TokenKind::Eof]);
        assert_eq!(tokens[0].text, "ifx");

        let tokens = tokenize("ifxy if(", &locale);
        assert_eq!(
            kinds(&tokens),
            vec![ident(None), TokenKind::Keyword(Keyword::If), TokenKind::LParen, TokenKind::Eof]
        );
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        let en = LocaleDef::english();
        let tokens = tokenize("variable var1 var_ var", &en);
        assert_eq!(
            kinds(&tokens),
            vec![ident(None), ident(None), ident(None), TokenKind::Keyword(Keyword::Var), TokenKind::Eof]
        );
    }

    #[test]
    fn multi_word_keyword() {
        let en = LocaleDef::english();
        let tokens = tokenize("} else if x {", &en);
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::ElseIf));
        assert_eq!(tokens[1].text, "else if");

        let tokens = tokenize("} else {", &en);
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Else));
    }

    #[test]
    fn non_latin_keywords_and_identifiers() {
        let ta = tamil();
        let src = "மாறி எண் = 5";
        let tokens = tokenize(src, &ta);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword(Keyword::Var),
                ident(None),
                TokenKind::Eq,
                TokenKind::Int(5.0),
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text, "எண்");
        // Columns count characters: "மாறி" is four chars, then a space.
        assert_eq!(tokens[1].span.column, 6);

        // A keyword spelling followed by more letters is an identifier.
        let tokens = tokenize("மாறிகள்", &ta);
        assert_eq!(kinds(&tokens), vec![ident(None), TokenKind::Eof]);
    }

    #[test]
    fn builtins_and_sovereign_paths() {
        let ta = tamil();
        let tokens = tokenize("காட்டு #அடிப்படை.காட்டு #அடிப்படை.other", &ta);
        assert_eq!(tokens[0].universal_key(), Some("print"));
        assert_eq!(tokens[1].universal_key(), Some("#std.print"));
        assert_eq!(tokens[1].text, "#அடிப்படை.காட்டு");
        assert!(tokens[1].is_sovereign());
        assert_eq!(tokens[2].universal_key(), Some("#std.other"));
    }

    #[test]
    fn strings_are_verbatim() {
        let en = LocaleDef::english();
        let tokens = tokenize(r#""a\n" 'it"s' "open"#, &en);
        assert_eq!(tokens[0].kind, TokenKind::Str("a\\n".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Str("it\"s".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Str("open".to_string()));
        assert_eq!(tokens[2].text, "\"open");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn operators_prefer_two_characters() {
        let en = LocaleDef::english();
        let tokens = tokenize("a==b!=c<=d>=e&&f||g<h>i!j:k", &en);
        let ops: Vec<_> = kinds(&tokens)
            .into_iter()
            .filter(|k| !matches!(k, TokenKind::Ident { .. } | TokenKind::Eof))
            .collect();
        assert_eq!(
            ops,
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Bang,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn unknown_characters_are_dropped() {
        let en = LocaleDef::english();
        let tokens = tokenize("a @ b % c", &en);
        assert_eq!(kinds(&tokens), vec![ident(None), ident(None), ident(None), TokenKind::Eof]);
        assert_eq!(tokens[1].text, "b");

        // `€` is not ASCII, so it lexes as an identifier character.
        let tokens = tokenize("x € y", &en);
        assert_eq!(tokens[1].text, "€");
    }

    #[test]
    fn strict_mode_reports_unknown_characters() {
        let en = LocaleDef::english();
        let lexer = Lexer::new("var x = 1\nvar y = @", &en);
        let err = lexer.tokenize_strict().unwrap_err();
        assert_eq!(err.key, keys::UNEXPECTED_CHARACTER);
        assert_eq!(err.line, Some(2));
        assert_eq!(err.column, Some(9));
        assert!(err.message.contains('@'));

        let ok = Lexer::new("var x = 1", &en).tokenize_strict().unwrap();
        assert_eq!(ok.len(), 5);
    }

    #[test]
    fn positions_agree_with_the_line_map() {
        let ta = tamil();
        let mut src = "மாறி எண் = 1\r\n\n".to_string();
        for i in 0..2000 {
            src.push_str(&format!("மாறி v{i} = எண் + {i}; "));
        }
        src.push_str("\n  என்றால் @ x");

        let line_map = ritam_ast::LineMap::new(&src);
        let tokens = tokenize(&src, &ta);
        for tok in &tokens {
            let expected = line_map.offset_to_line_col(&src, tok.span.start);
            assert_eq!((tok.span.line, tok.span.column), expected, "token {:?}", tok.text);
        }
        let last = &tokens[tokens.len() - 2];
        assert_eq!((last.span.line, last.span.column), (4, 13));

        let err = Lexer::new(&src, &ta).tokenize_strict().unwrap_err();
        assert_eq!((err.line, err.column), (Some(4), Some(11)));
    }

    #[test]
    fn duplicate_spellings_last_write_wins() {
        // Universal keys iterate in order, so `while` overrides `if`.
        let locale = LocaleDef::new()
            .with_keyword(Keyword::If, "loop")
            .with_keyword(Keyword::While, "loop");
        let tokens = tokenize("loop", &locale);
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::While));
    }
}
