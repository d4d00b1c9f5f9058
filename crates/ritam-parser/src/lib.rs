// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Ritam language.
//!
//! Transforms a token stream into an abstract syntax tree. The parser only
//! ever looks at universal keyword keys, so the same program written in two
//! locales produces the same tree.

mod parser;

pub use parser::{MAX_NESTING, ParseError, Parser};

use ritam_ast::{Program, Token};
use ritam_diagnostics::Diagnostics;

/// Parse a complete token stream.
pub fn parse(tokens: Vec<Token>, diagnostics: &Diagnostics<'_>) -> Result<Program, ParseError> {
    Parser::new(tokens, diagnostics).parse()
}
