// SPDX-License-Identifier: (MIT OR Apache-2.0)

#[derive(Debug, Clone)]
pub struct FormatConfig {
    pub indent_width: usize,
    /// Struct fields and enum cases stay on one line while they fit.
    pub max_line_width: usize,
    /// Separate top-level declarations from their neighbours with a blank line.
    pub blank_line_between_items: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_line_width: 100,
            blank_line_between_items: true,
        }
    }
}
