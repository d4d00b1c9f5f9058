// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for Ritam source.
//!
//! Tokenizes source text under a locale into a stream of locale-independent
//! tokens for the parser.

mod lexer;

pub use lexer::{tokenize, Lexer};
