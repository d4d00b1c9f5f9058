// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use std::fmt;
use std::str::FromStr;

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, exactly `source[span.start..span.end]`.
    pub text: String,
    pub span: Span,
}

impl Token {
    /// The locale-independent key the parser dispatches on.
    ///
    /// Keywords yield their universal key. Identifiers yield the builtin
    /// namespace path they were mapped to, if any.
    pub fn universal_key(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(kw.as_str()),
            TokenKind::Ident { universal } => universal.as_deref(),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }

    /// `#`-prefixed builtin path such as `#std.print`.
    pub fn is_sovereign(&self) -> bool {
        matches!(self.kind, TokenKind::Ident { .. }) && self.text.starts_with('#')
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Keyword, already resolved from its native spelling.
    Keyword(Keyword),
    /// Identifier, including sovereign `#` paths.
    Ident { universal: Option<String> },
    /// String literal content, quotes removed, no escape processing.
    Str(String),
    /// Integer literal.
    Int(f64),

    // Operators
    Eq,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    AmpAmp,
    PipePipe,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Colon,

    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "a keyword",
            TokenKind::Ident { .. } => "a name",
            TokenKind::Str(_) => "a string",
            TokenKind::Int(_) => "a number",

            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Bang => "'!'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",

            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",

            TokenKind::Eof => "end of file",
        }
    }
}

macro_rules! keywords {
    ($($variant:ident => $key:literal),* $(,)?) => {
        /// Universal keyword keys.
        ///
        /// This set is closed: locales choose the spelling of each key but
        /// cannot add new ones.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),*];

            /// The universal key, e.g. `"else_if"`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $key),*
                }
            }
        }

        impl FromStr for Keyword {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Keyword::$variant),)*
                    _ => Err(UnknownKeyword(s.to_string())),
                }
            }
        }
    };
}

keywords! {
    Var => "var",
    Const => "const",
    Print => "print",
    Component => "component",
    Render => "render",
    Tag => "tag",
    Text => "text",
    Function => "function",
    Async => "async",
    Struct => "struct",
    Enum => "enum",
    If => "if",
    ElseIf => "else_if",
    Else => "else",
    While => "while",
    For => "for",
    In => "in",
    Return => "return",
    Import => "import",
    From => "from",
    Export => "export",
    Try => "try",
    Catch => "catch",
    Throw => "throw",
    Match => "match",
    Click => "click",
    Attr => "attr",
    True => "true",
    False => "false",
    Null => "null",
    Await => "await",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A universal key that is not part of the keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword(pub String);

impl fmt::Display for UnknownKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyword key `{}`", self.0)
    }
}

impl std::error::Error for UnknownKeyword {}
