// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Ritam language.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser, formatter, and the code generators that consume a `Program`.
//! Nothing here depends on a particular locale: keywords are identified by
//! their universal key, and native spellings live only in token text.

pub mod span;
pub mod token;
pub mod expr;
pub mod stmt;
pub mod decl;

pub use span::{LineMap, Span};
pub use stmt::Program;
pub use token::{Keyword, Token, TokenKind};
