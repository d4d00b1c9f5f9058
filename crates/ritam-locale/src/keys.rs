// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Message keys looked up in a locale's `messages` table.
//!
//! Templates use positional placeholders `{0}`, `{1}`, ...

/// `{0}` expected description, `{1}` found token text, `{2}` line.
pub const EXPECTED_TOKEN: &str = "error_expected_token";
/// `{0}` offending token text (with any hint appended), `{1}` line.
pub const UNEXPECTED_TOKEN: &str = "error_unexpected_token";
/// `{0}` the character, `{1}` line. Strict lexing only.
pub const UNEXPECTED_CHARACTER: &str = "error_unexpected_character";
/// `{0}` the nesting limit, `{1}` line.
pub const NESTING_TOO_DEEP: &str = "error_nesting_too_deep";
/// `{0}` the suggested keyword spelling.
pub const DID_YOU_MEAN: &str = "hint_did_you_mean";

pub(crate) const ENGLISH_MESSAGES: &[(&str, &str)] = &[
    (EXPECTED_TOKEN, "Expected {0} but found '{1}'"),
    (UNEXPECTED_TOKEN, "Unexpected token '{0}'"),
    (UNEXPECTED_CHARACTER, "Unexpected character '{0}'"),
    (NESTING_TOO_DEEP, "Nesting is too deep (more than {0} levels)"),
    (DID_YOU_MEAN, "Did you mean \"{0}\"?"),
];
